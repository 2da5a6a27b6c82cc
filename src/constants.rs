//! Configuration constants for the icon quiz
//!
//! This module contains the fixed limits and tuning values used
//! throughout the engine, grouped by the component that owns them.

/// Player record constants
pub mod player {
    /// Lives every player starts a game with
    pub const STARTING_LIVES: u32 = 3;
    /// Maximum length of a player name in bytes
    pub const MAX_NAME_LENGTH: usize = 30;
    /// Number of players in a single-player game
    pub const SINGLE_PLAYER_COUNT: usize = 1;
    /// Minimum number of players in a multiplayer game
    pub const MIN_MULTIPLAYER_COUNT: usize = 2;
    /// Maximum number of players in a multiplayer game
    pub const MAX_MULTIPLAYER_COUNT: usize = 6;
}

/// Round generation constants
pub mod round {
    /// Smallest option set a round can show
    pub const MIN_OPTION_COUNT: usize = 3;
    /// Largest option set a round can show
    pub const MAX_OPTION_COUNT: usize = 5;
}

/// Countdown constants for timed difficulties
pub mod timer {
    /// Interval between two countdown ticks in milliseconds
    pub const TICK_INTERVAL_MILLIS: u64 = 100;
    /// Countdown budget in seconds on medium difficulty
    pub const MEDIUM_BUDGET_SECS: u64 = 15;
    /// Countdown budget in seconds on hard difficulty
    pub const HARD_BUDGET_SECS: u64 = 8;
}

/// Catalog constants
pub mod catalog {
    /// Maximum length of a service name
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum length of an icon reference (file name or URL)
    pub const MAX_ICON_LENGTH: usize = 2048;
    /// Maximum length of a category name
    pub const MAX_CATEGORY_LENGTH: usize = 50;
}

/// Icon resolution constants
pub mod icon {
    /// Default edge length of a resolved icon bitmap in pixels
    pub const DEFAULT_SIZE: u32 = 100;
    /// Smallest accepted icon edge length
    pub const MIN_SIZE: u32 = 16;
    /// Largest accepted icon edge length
    pub const MAX_SIZE: u32 = 512;
    /// Fill color of the placeholder bitmap (#FF9900)
    pub const PLACEHOLDER_RGBA: [u8; 4] = [0xFF, 0x99, 0x00, 0xFF];
    /// Default directory holding local icon files
    pub const DEFAULT_DIR: &str = "images";
}

/// High-score list constants
pub mod high_scores {
    /// Number of entries shown on the high-score screen
    pub const DISPLAY_LIMIT: usize = 10;
    /// Default file the list is persisted to
    pub const DEFAULT_FILE: &str = "high_scores.json";
    /// Date format used for entries
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}
