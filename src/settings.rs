//! Runtime settings read from `icon-quiz.toml`

use std::{
    fs,
    path::{Path, PathBuf},
};

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// File looked up in the working directory
pub const DEFAULT_FILE: &str = "icon-quiz.toml";

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file exists but could not be read
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid TOML for [`Settings`]
    #[error("malformed settings: {0}")]
    Toml(#[from] toml::de::Error),
    /// A value is out of range
    #[error("invalid settings: {0}")]
    Invalid(#[from] garde::Report),
}

/// Everything the binary can be configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// JSON catalog to use instead of the built-in one
    #[garde(skip)]
    pub catalog_path: Option<PathBuf>,
    /// Directory holding the icon images
    #[garde(skip)]
    pub icons_dir: PathBuf,
    /// Where high scores are kept
    #[garde(skip)]
    pub high_scores_path: PathBuf,
    /// Edge length icons are resized to, in pixels
    #[garde(range(min = constants::icon::MIN_SIZE, max = constants::icon::MAX_SIZE))]
    pub icon_size: u32,
    /// Never ask the same item twice in a row
    #[garde(skip)]
    pub avoid_repeats: bool,
    /// `tracing` filter directives; `RUST_LOG` takes precedence
    #[garde(length(min = 1))]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            icons_dir: PathBuf::from(constants::icon::DEFAULT_DIR),
            high_scores_path: PathBuf::from(constants::high_scores::DEFAULT_FILE),
            icon_size: constants::icon::DEFAULT_SIZE,
            avoid_repeats: false,
            log_filter: "icon_quiz=info".to_owned(),
        }
    }
}

impl Settings {
    /// Parses and validates settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is out of
    /// range.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`, using defaults if the file is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
