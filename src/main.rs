//! Terminal front end for the icon quiz

use std::{fs::OpenOptions, path::Path, sync::{Arc, Mutex}};

use icon_quiz::{
    catalog::Catalog,
    high_scores::HighScores,
    settings::{self, Settings},
};
use tracing_subscriber::EnvFilter;

mod shell;

const LOG_FILE: &str = "icon-quiz.log";

/// Sends log output to a file so it does not draw over the UI
fn init_tracing(settings: &Settings) -> Result<(), shell::Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)?,
    };
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), shell::Error> {
    let settings = Settings::load(Path::new(settings::DEFAULT_FILE))?;
    init_tracing(&settings)?;
    tracing::info!("icon quiz starting");

    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let high_scores = HighScores::load(&settings.high_scores_path);

    let app = shell::App::new(Arc::new(catalog), settings, high_scores);
    shell::run(app)?;

    tracing::info!("icon quiz exiting");
    Ok(())
}
