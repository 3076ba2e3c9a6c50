//! Player roster for one game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LadderConfig;
use crate::constants::PLAYER_NAME_PREFIX;

/// Errors raised while setting up players and prizes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("player count {count} is outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("{winners} winners cannot fit on {slots} terminals")]
    TooManyWinners { winners: usize, slots: usize },
    #[error("{outcomes} outcomes cannot be paired with {players} players")]
    SizeMismatch { outcomes: usize, players: usize },
}

/// Ordered player names; player `i` starts on rail `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster, naming blank entries `Player N`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::PlayerCount`] when the number of names falls
    /// outside the configured player window.
    pub fn new<I, S>(names: I, config: &LadderConfig) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name: String = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    default_name(index)
                } else {
                    trimmed.to_string()
                }
            })
            .collect();
        let count = names.len();
        if count < config.min_players || count > config.max_players {
            return Err(SetupError::PlayerCount {
                count,
                min: config.min_players,
                max: config.max_players,
            });
        }
        Ok(Self { names })
    }

    /// A roster of `count` default-named players.
    ///
    /// # Errors
    ///
    /// See [`Roster::new`].
    pub fn numbered(count: usize, config: &LadderConfig) -> Result<Self, SetupError> {
        Self::new(vec![String::new(); count], config)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

fn default_name(index: usize) -> String {
    format!("{PLAYER_NAME_PREFIX} {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_get_defaults() {
        let config = LadderConfig::default();
        let roster = Roster::new(["Mina", "  ", " Joon "], &config).unwrap();
        assert_eq!(roster.names(), &["Mina", "Player 2", "Joon"]);
        assert_eq!(roster.name(2), Some("Joon"));
        assert_eq!(roster.name(3), None);
    }

    #[test]
    fn player_window_is_enforced() {
        let config = LadderConfig::default();
        assert_eq!(
            Roster::numbered(1, &config).unwrap_err(),
            SetupError::PlayerCount {
                count: 1,
                min: 2,
                max: 10
            }
        );
        assert!(Roster::numbered(11, &config).is_err());
        assert_eq!(Roster::numbered(10, &config).unwrap().len(), 10);
    }
}
