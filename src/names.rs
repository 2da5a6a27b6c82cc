//! Player name management and validation
//!
//! This module cleans up the names typed on the setup screen. It fills in a
//! seat-based default for blank names, filters inappropriate content, and
//! keeps names unique within one game.

use std::collections::HashSet;

use rustrict::CensorStr;
use serde::Serialize;
use thiserror::Error;

use crate::constants;

/// Errors that can occur during name validation
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested name is already in use by another player
    #[error("name already in-use")]
    Used,
    /// The name contains inappropriate content
    #[error("name is inappropriate")]
    Sinful,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// Default name for a seat left blank, e.g. `Player 2` for seat index 1
pub fn default_name(seat: usize) -> String {
    format!("Player {}", seat + 1)
}

/// Names already handed out in one game
#[derive(Debug, Default, Clone)]
pub struct Names {
    existing: HashSet<String>,
}

impl Names {
    /// Validates the name requested for a seat and reserves it
    ///
    /// # Arguments
    ///
    /// * `seat` - Zero-based seat index, used for the default name
    /// * `requested` - The name as typed (will be trimmed of whitespace)
    ///
    /// # Returns
    ///
    /// The cleaned name, or the seat default if the request was blank.
    ///
    /// # Errors
    ///
    /// * `Error::TooLong` - Name exceeds 30 bytes
    /// * `Error::Sinful` - Name contains inappropriate content
    /// * `Error::Used` - Name is already taken by another seat
    pub fn assign(&mut self, seat: usize, requested: &str) -> Result<String, Error> {
        if requested.len() > constants::player::MAX_NAME_LENGTH {
            return Err(Error::TooLong);
        }
        let trimmed = rustrict::trim_whitespace(requested);
        let name = if trimmed.is_empty() {
            default_name(seat)
        } else {
            if trimmed.is_inappropriate() {
                return Err(Error::Sinful);
            }
            trimmed.to_owned()
        };
        if !self.existing.insert(name.clone()) {
            return Err(Error::Used);
        }
        Ok(name)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_names_assign() {
        let mut names = Names::default();
        assert_eq!(names.assign(0, "TestPlayer"), Ok("TestPlayer".to_string()));
    }

    #[test]
    fn test_names_too_long() {
        let mut names = Names::default();
        let long_name = "a".repeat(31);
        assert_eq!(names.assign(0, &long_name), Err(Error::TooLong));
    }

    #[test]
    fn test_names_max_length_allowed() {
        let mut names = Names::default();
        let max_name = "a".repeat(30);
        assert_eq!(names.assign(0, &max_name), Ok(max_name));
    }

    #[test]
    fn test_names_blank_uses_seat_default() {
        let mut names = Names::default();
        assert_eq!(names.assign(0, ""), Ok("Player 1".to_string()));
        assert_eq!(names.assign(1, "   "), Ok("Player 2".to_string()));
        assert_eq!(names.assign(2, "\t\n"), Ok("Player 3".to_string()));
    }

    #[test]
    fn test_names_whitespace_trimming() {
        let mut names = Names::default();
        assert_eq!(names.assign(0, "  TestPlayer  "), Ok("TestPlayer".to_string()));
    }

    #[test]
    fn test_names_duplicate_error() {
        let mut names = Names::default();
        names.assign(0, "Player").unwrap();
        assert_eq!(names.assign(1, "Player"), Err(Error::Used));
        // Whitespace-trimmed names are also considered duplicates
        assert_eq!(names.assign(2, "  Player  "), Err(Error::Used));
    }

    #[test]
    fn test_names_default_collides_with_typed_name() {
        let mut names = Names::default();
        names.assign(0, "Player 2").unwrap();
        assert_eq!(names.assign(1, ""), Err(Error::Used));
    }

    #[test]
    fn test_names_inappropriate_content() {
        let mut names = Names::default();
        for (seat, name) in ["damn", "fuck", "shit"].into_iter().enumerate() {
            assert_eq!(
                names.assign(seat, name),
                Err(Error::Sinful),
                "Expected '{name}' to be flagged as inappropriate"
            );
        }
    }

    #[test]
    fn test_names_case_sensitivity() {
        let mut names = Names::default();
        names.assign(0, "Player").unwrap();
        assert!(names.assign(1, "player").is_ok());
    }

    #[test]
    fn test_names_unicode_support() {
        let mut names = Names::default();
        let unicode_name = "Плеер测试🎮";
        assert_eq!(names.assign(0, unicode_name), Ok(unicode_name.to_string()));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Used.to_string(), "name already in-use");
        assert_eq!(Error::Sinful.to_string(), "name is inappropriate");
        assert_eq!(Error::TooLong.to_string(), "name is too long");
    }
}
