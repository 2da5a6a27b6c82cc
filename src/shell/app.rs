//! Screen state and key handling

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fastrand::Rng;
use icon_quiz::{
    catalog::{Catalog, IconReference},
    constants,
    game::{Game, GameOutcome, IncomingMessage, UpdateMessage},
    high_scores::HighScores,
    icon::{self, IconResolver, LocalIconSource},
    options::{CategoryFilter, Difficulty, GameMode, GameOptions},
    presenter::Presenter,
    settings::Settings,
    timer::AlarmMessage,
};
use image::RgbaImage;
use itertools::Itertools;
use web_time::{Duration, Instant};

/// Rows of the mode-selection menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    Mode,
    Players,
    Difficulty,
    Category,
    Start,
}

impl MenuField {
    pub const ALL: [MenuField; 5] = [
        MenuField::Mode,
        MenuField::Players,
        MenuField::Difficulty,
        MenuField::Category,
        MenuField::Start,
    ];
}

/// Choices made on the mode-selection screen
#[derive(Debug, Clone)]
pub struct Menu {
    pub focus: usize,
    pub mode: GameMode,
    pub player_count: usize,
    pub difficulty: usize,
    /// 0 is every category, `n` is the `n`th catalog category
    pub category: usize,
    pub categories: Vec<String>,
    pub error: Option<String>,
}

impl Menu {
    fn new(catalog: &Catalog) -> Self {
        Self {
            focus: MenuField::ALL.len() - 1,
            mode: GameMode::Single,
            player_count: constants::player::MIN_MULTIPLAYER_COUNT,
            difficulty: 0,
            category: 0,
            categories: catalog.categories().map(str::to_owned).collect_vec(),
            error: None,
        }
    }

    pub fn field(&self) -> MenuField {
        MenuField::ALL[self.focus]
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty]
    }

    pub fn category(&self) -> CategoryFilter {
        match self.category {
            0 => CategoryFilter::All,
            n => CategoryFilter::Named(self.categories[n - 1].clone()),
        }
    }

    pub fn seats(&self) -> usize {
        match self.mode {
            GameMode::Single => constants::player::SINGLE_PLAYER_COUNT,
            GameMode::Multi => self.player_count,
        }
    }

    fn cycle(&mut self, forward: bool) {
        let step = |value: usize, len: usize| {
            if forward {
                (value + 1) % len
            } else {
                (value + len - 1) % len
            }
        };
        match self.field() {
            MenuField::Mode => {
                self.mode = match self.mode {
                    GameMode::Single => GameMode::Multi,
                    GameMode::Multi => GameMode::Single,
                };
            }
            MenuField::Players => {
                let (min, max) = GameMode::Multi.player_bounds();
                self.player_count = min + step(self.player_count - min, max - min + 1);
            }
            MenuField::Difficulty => {
                self.difficulty = step(self.difficulty, Difficulty::ALL.len());
            }
            MenuField::Category => {
                self.category = step(self.category, self.categories.len() + 1);
            }
            MenuField::Start => {}
        }
    }
}

/// Typing player names before a game
#[derive(Debug, Clone)]
pub struct NameEntry {
    pub names: Vec<String>,
    pub seat: usize,
    template: GameOptions,
}

/// What the game has reported since the round started
#[derive(Debug, Default)]
pub struct Hud {
    pub icon: Option<Arc<RgbaImage>>,
    /// Drawn over placeholder icons
    pub label: Option<String>,
    pub notices: Vec<String>,
    finished: Option<GameOutcome>,
}

/// A game in progress
#[derive(Debug)]
pub struct Play {
    pub game: Game,
    pub hud: Hud,
}

/// The end-of-game summary
#[derive(Debug)]
pub struct Finished {
    pub outcome: GameOutcome,
    pub last_notice: Option<String>,
    /// `Some` in single-player: whether the score reached the high-score file
    pub saved: Option<Result<(), String>>,
    options: GameOptions,
}

#[derive(Debug)]
pub enum Screen {
    Menu,
    Names(NameEntry),
    Playing(Box<Play>),
    Finished(Finished),
    HighScores,
}

enum Action {
    None,
    Quit,
    Show(Screen),
    Start(GameOptions),
    Menu(Option<String>),
}

/// Turns game updates into what the play screen shows
struct HudPresenter<'a> {
    hud: &'a mut Hud,
    resolver: &'a mut IconResolver,
    catalog: &'a Catalog,
}

impl Presenter for HudPresenter<'_> {
    fn present(&mut self, message: &UpdateMessage) {
        match message {
            UpdateMessage::RoundStarted {
                icon: reference, ..
            } => {
                self.hud.notices.clear();
                let bitmap = self.resolver.resolve(reference);
                self.hud.label =
                    icon::is_placeholder(&bitmap).then(|| placeholder_label(self.catalog, reference));
                self.hud.icon = Some(bitmap);
            }
            UpdateMessage::Countdown { .. } => {}
            UpdateMessage::AnswerRevealed { outcome, .. } => {
                let name = &outcome.correct_name;
                self.hud.notices.push(match (outcome.correct, outcome.chosen) {
                    (true, _) => format!("Correct! That's {name}."),
                    (false, Some(_)) => format!("Sorry, that was {name}."),
                    (false, None) => format!("Time's up! That was {name}."),
                });
            }
            UpdateMessage::PlayerEliminated { name, .. } => {
                self.hud.notices.push(format!("{name} is out of the game!"));
            }
            UpdateMessage::GameOver(outcome) => {
                self.hud.finished = Some(outcome.clone());
            }
        }
    }
}

/// Abbreviated name of the service whose icon could not be drawn
fn placeholder_label(catalog: &Catalog, icon: &IconReference) -> String {
    catalog
        .by_icon(icon)
        .map(|item| icon::abbreviation(item.name()))
        .unwrap_or_default()
}

fn scheduler(
    alarms: &mut Vec<(Instant, AlarmMessage)>,
) -> impl FnMut(AlarmMessage, Duration) + '_ {
    move |alarm, delay| alarms.push((Instant::now() + delay, alarm))
}

/// Everything the terminal UI keeps between frames
pub struct App {
    catalog: Arc<Catalog>,
    settings: Settings,
    high_scores: HighScores,
    resolver: IconResolver,
    alarms: Vec<(Instant, AlarmMessage)>,
    menu: Menu,
    screen: Screen,
    quit: bool,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, settings: Settings, high_scores: HighScores) -> Self {
        let resolver = IconResolver::new(
            LocalIconSource::new(settings.icons_dir.clone()),
            settings.icon_size,
        );
        Self {
            menu: Menu::new(&catalog),
            catalog,
            settings,
            high_scores,
            resolver,
            alarms: Vec::new(),
            screen: Screen::Menu,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn next_alarm_due(&self) -> Option<Instant> {
        self.alarms.iter().map(|(due, _)| *due).min()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        let action = match &mut self.screen {
            Screen::Menu => menu_key(&mut self.menu, key),
            Screen::Names(entry) => names_key(entry, key),
            Screen::Playing(play) => play_key(
                play,
                key,
                &mut self.alarms,
                &mut self.resolver,
                &self.catalog,
            ),
            Screen::Finished(finished) => finished_key(finished, key),
            Screen::HighScores => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'h') => Action::Menu(None),
                _ => Action::None,
            },
        };

        match action {
            Action::None => self.collect_finished(),
            Action::Quit => self.quit = true,
            Action::Show(screen) => self.screen = screen,
            Action::Start(options) => self.start_game(options),
            Action::Menu(error) => {
                self.alarms.clear();
                self.menu.error = error;
                self.screen = Screen::Menu;
            }
        }
    }

    /// Delivers every alarm that is due at `now`
    pub fn fire_due_alarms(&mut self, now: Instant) {
        let Screen::Playing(play) = &mut self.screen else {
            self.alarms.clear();
            return;
        };

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.alarms)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.alarms = pending;

        let Play { game, hud } = &mut **play;
        for (_, alarm) in due {
            game.receive_alarm(
                alarm,
                scheduler(&mut self.alarms),
                HudPresenter {
                    hud: &mut *hud,
                    resolver: &mut self.resolver,
                    catalog: &self.catalog,
                },
            );
        }

        self.collect_finished();
    }

    fn start_game(&mut self, options: GameOptions) {
        self.alarms.clear();

        let game = match Game::new(Arc::clone(&self.catalog), options, Rng::new()) {
            Ok(game) => game.avoid_repeats(self.settings.avoid_repeats),
            Err(e) => {
                tracing::warn!(error = %e, "cannot start game");
                self.menu.error = Some(e.to_string());
                self.screen = Screen::Menu;
                return;
            }
        };

        let mut play = Box::new(Play {
            game,
            hud: Hud::default(),
        });
        let Play { game, hud } = &mut *play;
        let started = game.play(
            scheduler(&mut self.alarms),
            HudPresenter {
                hud,
                resolver: &mut self.resolver,
                catalog: &self.catalog,
            },
        );

        match started {
            Ok(()) => {
                self.menu.error = None;
                self.screen = Screen::Playing(play);
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot start game");
                self.alarms.clear();
                self.menu.error = Some(e.to_string());
                self.screen = Screen::Menu;
            }
        }
    }

    /// Moves to the summary once the game reports that it is over
    fn collect_finished(&mut self) {
        let Screen::Playing(play) = &mut self.screen else {
            return;
        };
        let Some(outcome) = play.hud.finished.take() else {
            return;
        };
        let options = play.game.options().clone();
        let last_notice = play.hud.notices.last().cloned();
        self.alarms.clear();

        let saved = outcome.high_score.clone().map(|entry| {
            self.high_scores.record(entry);
            self.high_scores.save().map_err(|e| {
                tracing::error!(error = %e, "cannot save high scores");
                e.to_string()
            })
        });

        self.screen = Screen::Finished(Finished {
            outcome,
            last_notice,
            saved,
            options,
        });
    }
}

fn menu_key(menu: &mut Menu, key: KeyEvent) -> Action {
    let fields = MenuField::ALL.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => menu.focus = (menu.focus + fields - 1) % fields,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => menu.focus = (menu.focus + 1) % fields,
        KeyCode::Left => menu.cycle(false),
        KeyCode::Right => menu.cycle(true),
        KeyCode::Char('h') => return Action::Show(Screen::HighScores),
        KeyCode::Enter => {
            let template = GameOptions {
                mode: menu.mode,
                difficulty: menu.difficulty(),
                category: menu.category(),
                player_names: Vec::new(),
            };
            return Action::Show(Screen::Names(NameEntry {
                names: vec![String::new(); menu.seats()],
                seat: 0,
                template,
            }));
        }
        KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn names_key(entry: &mut NameEntry, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) => {
            let name = &mut entry.names[entry.seat];
            if name.len() + c.len_utf8() <= constants::player::MAX_NAME_LENGTH {
                name.push(c);
            }
        }
        KeyCode::Backspace => {
            entry.names[entry.seat].pop();
        }
        KeyCode::Up | KeyCode::BackTab if entry.seat > 0 => entry.seat -= 1,
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
            if entry.seat + 1 < entry.names.len() {
                entry.seat += 1;
            } else if key.code == KeyCode::Enter {
                let mut options = entry.template.clone();
                options.player_names = entry.names.clone();
                return Action::Start(options);
            }
        }
        KeyCode::Esc => return Action::Menu(None),
        _ => {}
    }
    Action::None
}

fn play_key(
    play: &mut Play,
    key: KeyEvent,
    alarms: &mut Vec<(Instant, AlarmMessage)>,
    resolver: &mut IconResolver,
    catalog: &Catalog,
) -> Action {
    let message = match key.code {
        KeyCode::Char(c @ '1'..='9') => match c.to_digit(10) {
            Some(digit) => IncomingMessage::Answer(digit as usize - 1),
            None => return Action::None,
        },
        KeyCode::Enter | KeyCode::Char(' ' | 'n') => IncomingMessage::Next,
        KeyCode::Esc => return Action::Menu(None),
        _ => return Action::None,
    };

    let Play { game, hud } = play;
    let presenter = HudPresenter {
        hud,
        resolver,
        catalog,
    };
    match game.receive_message(message, scheduler(alarms), presenter) {
        Ok(()) => Action::None,
        Err(e) => {
            tracing::error!(error = %e, "cannot continue game");
            Action::Menu(Some(e.to_string()))
        }
    }
}

fn finished_key(finished: &Finished, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('r') => Action::Start(finished.options.clone()),
        KeyCode::Char('h') => Action::Show(Screen::HighScores),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => Action::Menu(None),
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}
