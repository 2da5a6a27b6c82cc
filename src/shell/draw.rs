//! Rendering of every screen

use icon_quiz::{
    game::{GameOutcome, QuestionView, SyncMessage},
    options::{Difficulty, GameMode},
    player::Player,
    round::Outcome,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Row, Table, Wrap},
};

use super::{
    app::{App, Finished, Menu, MenuField, NameEntry, Play, Screen},
    icon_view::IconView,
};

pub const ORANGE: Color = Color::Rgb(0xFF, 0x99, 0x00);
pub const NAVY: Color = Color::Rgb(0x23, 0x2F, 0x3E);

/// Width of the icon panel, in cells, borders included
const ICON_PANEL_WIDTH: u16 = 34;

pub fn draw(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("Cloud Icon Quiz")
            .alignment(Alignment::Center)
            .style(Style::new().fg(ORANGE).add_modifier(Modifier::BOLD))
            .block(Block::bordered()),
        header,
    );

    let help = match app.screen() {
        Screen::Menu => {
            draw_menu(frame, body, app.menu());
            "↑/↓ select · ←/→ change · Enter start · h high scores · q quit"
        }
        Screen::Names(entry) => {
            draw_names(frame, body, entry);
            "type a name · Enter next · Esc back"
        }
        Screen::Playing(play) => draw_play(frame, body, play),
        Screen::Finished(finished) => {
            draw_finished(frame, body, finished);
            "r play again · Enter menu · h high scores · q quit"
        }
        Screen::HighScores => {
            draw_high_scores(frame, body, app);
            "Esc back"
        }
    };

    frame.render_widget(Paragraph::new(help).fg(Color::DarkGray), footer);
}

fn draw_menu(frame: &mut Frame, area: Rect, menu: &Menu) {
    let mut lines = MenuField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let (label, value) = match field {
                MenuField::Mode => (
                    "Mode",
                    match menu.mode {
                        GameMode::Single => "Single player".to_owned(),
                        GameMode::Multi => "Multiplayer".to_owned(),
                    },
                ),
                MenuField::Players => (
                    "Players",
                    match menu.mode {
                        GameMode::Single => "1".to_owned(),
                        GameMode::Multi => menu.player_count.to_string(),
                    },
                ),
                MenuField::Difficulty => ("Difficulty", difficulty_summary(menu.difficulty())),
                MenuField::Category => ("Category", menu.category().label()),
                MenuField::Start => ("", "[ Start game ]".to_owned()),
            };
            let focused = index == menu.focus;
            let style = if focused {
                Style::new().fg(ORANGE).add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            Line::from(vec![
                Span::raw(if focused { "> " } else { "  " }),
                Span::styled(format!("{label:<12}"), style),
                Span::styled(value, style),
            ])
        })
        .collect::<Vec<_>>();

    if let Some(error) = &menu.error {
        lines.push(Line::default());
        lines.push(Line::styled(error.clone(), Style::new().fg(Color::Red)));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" New game ")),
        area,
    );
}

fn difficulty_summary(difficulty: Difficulty) -> String {
    let rules = difficulty.rules();
    match rules.time_budget {
        Some(budget) => format!(
            "{} ({} options, {} s)",
            difficulty.label(),
            rules.option_count,
            budget.as_secs()
        ),
        None => format!(
            "{} ({} options, no timer)",
            difficulty.label(),
            rules.option_count
        ),
    }
}

fn draw_names(frame: &mut Frame, area: Rect, entry: &NameEntry) {
    let lines = entry
        .names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let active = seat == entry.seat;
            let mut spans = vec![Span::raw(format!("Player {}: ", seat + 1)), Span::raw(name.clone())];
            if active {
                spans.push(Span::styled("_", Style::new().fg(ORANGE)));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered().title(" Player names (leave blank for a default) "),
        ),
        area,
    );
}

fn draw_play(frame: &mut Frame, area: Rect, play: &Play) -> &'static str {
    let (question, players, remaining, outcome) = match play.game.state_message() {
        SyncMessage::Question {
            question,
            players,
            remaining,
        } => (question, players, remaining, None),
        SyncMessage::Reveal {
            question,
            players,
            outcome,
        } => (question, players, None, Some(outcome)),
        SyncMessage::NotStarted { .. } | SyncMessage::Done(_) => return "",
    };

    let [status, main, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    draw_scoreboard(frame, status, &players, question.player, &question);

    let [icon_area, options_area] =
        Layout::horizontal([Constraint::Length(ICON_PANEL_WIDTH), Constraint::Min(0)]).areas(main);
    let icon_block = Block::bordered().title(" Which service is this? ");
    let icon_inner = icon_block.inner(icon_area);
    frame.render_widget(icon_block, icon_area);
    if let Some(bitmap) = &play.hud.icon {
        frame.render_widget(
            IconView::new(bitmap).label(play.hud.label.as_deref()),
            icon_inner,
        );
    }

    draw_options(frame, options_area, &question, outcome.as_ref());

    match outcome {
        None => {
            let budget = play.game.options().difficulty.rules().time_budget;
            if let (Some(budget), Some(remaining)) = (budget, remaining) {
                let ratio = (remaining.as_secs_f64() / budget.as_secs_f64()).clamp(0.0, 1.0);
                frame.render_widget(
                    Gauge::default()
                        .block(Block::bordered().title(" Time "))
                        .gauge_style(Style::new().fg(ORANGE).bg(NAVY))
                        .ratio(ratio)
                        .label(format!("{:.1} s", remaining.as_secs_f64())),
                    bottom,
                );
            }
            "1-5 answer · Esc quit to menu"
        }
        Some(_) => {
            frame.render_widget(
                Paragraph::new(play.hud.notices.join("  "))
                    .wrap(Wrap { trim: true })
                    .block(Block::bordered()),
                bottom,
            );
            "Enter next question · Esc quit to menu"
        }
    }
}

fn draw_scoreboard(
    frame: &mut Frame,
    area: Rect,
    players: &[Player],
    current: usize,
    question: &QuestionView,
) {
    let mut spans = Vec::new();
    for (index, player) in players.iter().enumerate() {
        let mut style = Style::new();
        if index == current {
            style = style.fg(ORANGE).add_modifier(Modifier::BOLD);
        }
        if !player.is_alive() {
            style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
        }
        spans.push(Span::styled(
            format!("{}  {} pts  ", player.name(), player.score()),
            style,
        ));
        spans.push(Span::styled(
            "♥".repeat(player.lives() as usize),
            Style::new().fg(Color::Red),
        ));
        spans.push(Span::raw("    "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::bordered().title(format!(" Round {} ", question.round))),
        area,
    );
}

fn draw_options(frame: &mut Frame, area: Rect, question: &QuestionView, outcome: Option<&Outcome>) {
    let lines = question
        .options
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let style = match outcome {
                Some(outcome) if index == outcome.correct_index => {
                    Style::new().fg(Color::Green).add_modifier(Modifier::BOLD)
                }
                Some(outcome) if outcome.chosen == Some(index) => Style::new().fg(Color::Red),
                _ => Style::new(),
            };
            Line::styled(format!(" {}. {name}", index + 1), style)
        })
        .flat_map(|line| [line, Line::default()])
        .collect::<Vec<_>>();

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Options ")),
        area,
    );
}

fn draw_finished(frame: &mut Frame, area: Rect, finished: &Finished) {
    let GameOutcome {
        winner,
        standings,
        high_score,
    } = &finished.outcome;

    let mut lines = vec![Line::styled(
        "Game Over!",
        Style::new().fg(ORANGE).add_modifier(Modifier::BOLD),
    )];
    if let Some(notice) = &finished.last_notice {
        lines.push(Line::raw(notice.clone()));
    }
    match (high_score, winner) {
        (Some(entry), _) => lines.push(Line::raw(format!("Final score: {}", entry.score))),
        (None, Some(winner)) => lines.push(Line::raw(format!("{winner} wins!"))),
        (None, None) => lines.push(Line::raw("Nobody is left standing.")),
    }
    match &finished.saved {
        Some(Ok(())) => lines.push(Line::styled("Score saved.", Style::new().fg(Color::Green))),
        Some(Err(error)) => lines.push(Line::styled(
            format!("Could not save score: {error}"),
            Style::new().fg(Color::Red),
        )),
        None => {}
    }

    let [summary, table] = Layout::vertical([
        Constraint::Length(lines.len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), summary);

    let rows = standings.iter().map(|standing| {
        Row::new([
            standing.position.to_string(),
            standing.name.clone(),
            standing.score.to_string(),
            standing.lives.to_string(),
        ])
    });
    frame.render_widget(
        Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(7),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(["#", "Player", "Score", "Lives"])
                .style(Style::new().add_modifier(Modifier::BOLD)),
        )
        .block(Block::bordered().title(" Standings ")),
        table,
    );
}

fn draw_high_scores(frame: &mut Frame, area: Rect, app: &App) {
    let top = app.high_scores().top();
    let total = top.exact_count();
    let rows = top.map(|entry| {
        Row::new([
            entry.name.clone(),
            entry.score.to_string(),
            entry.date.clone(),
        ])
    });

    let title = if total == 0 {
        " High Scores (none yet) ".to_owned()
    } else {
        format!(" High Scores (top {} of {total}) ", rows.items().len())
    };

    frame.render_widget(
        Table::new(
            rows.items()
                .iter()
                .enumerate()
                .map(|(index, row)| row.clone().style(rank_style(index))),
            [
                Constraint::Min(12),
                Constraint::Length(7),
                Constraint::Length(12),
            ],
        )
        .header(Row::new(["Name", "Score", "Date"]).style(Style::new().add_modifier(Modifier::BOLD)))
        .block(Block::bordered().title(title)),
        area,
    );
}

fn rank_style(index: usize) -> Style {
    if index == 0 {
        Style::new().fg(ORANGE)
    } else {
        Style::new()
    }
}
