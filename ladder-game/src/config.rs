//! Tunable ladder shape and session limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_GENERATION_ATTEMPTS, DEFAULT_MAX_PLAYERS, DEFAULT_MAX_RUNGS_PER_GAP,
    DEFAULT_MIN_PLAYERS, DEFAULT_MIN_RUNGS_PER_GAP, DEFAULT_STEPS, MAX_STEPS,
};

/// Errors raised when ladder configuration invariants are violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("steps must be between 1 and {max} (got {value})")]
    StepsRange { value: u8, max: u8 },
    #[error("rung minimum {min} exceeds maximum {max}")]
    RungMinExceedsMax { min: u8, max: u8 },
    #[error("{max} rungs per gap cannot avoid the previous gap within {steps} rows")]
    RungsExceedRows { max: u8, steps: u8 },
    #[error("player window invalid (min {min} > max {max})")]
    PlayerRange { min: usize, max: usize },
    #[error("players must be at least 1 (got {value})")]
    NoPlayers { value: usize },
    #[error("max_generation_attempts must be at least 1")]
    NoAttempts,
    #[error("config JSON could not be parsed: {0}")]
    Parse(String),
}

/// Ladder shape and session limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderConfig {
    /// Interior rows that may carry rungs.
    #[serde(default = "LadderConfig::default_steps")]
    pub steps: u8,
    #[serde(default = "LadderConfig::default_min_rungs")]
    pub min_rungs: u8,
    #[serde(default = "LadderConfig::default_max_rungs")]
    pub max_rungs: u8,
    #[serde(default = "LadderConfig::default_min_players")]
    pub min_players: usize,
    #[serde(default = "LadderConfig::default_max_players")]
    pub max_players: usize,
    #[serde(default = "LadderConfig::default_max_generation_attempts")]
    pub max_generation_attempts: u32,
    /// Resolve every rail after generation and regenerate unless the result
    /// is a permutation.
    #[serde(default = "LadderConfig::default_validate_permutation")]
    pub validate_permutation: bool,
}

impl LadderConfig {
    const fn default_steps() -> u8 {
        DEFAULT_STEPS
    }

    const fn default_min_rungs() -> u8 {
        DEFAULT_MIN_RUNGS_PER_GAP
    }

    const fn default_max_rungs() -> u8 {
        DEFAULT_MAX_RUNGS_PER_GAP
    }

    const fn default_min_players() -> usize {
        DEFAULT_MIN_PLAYERS
    }

    const fn default_max_players() -> usize {
        DEFAULT_MAX_PLAYERS
    }

    const fn default_max_generation_attempts() -> u32 {
        DEFAULT_MAX_GENERATION_ATTEMPTS
    }

    const fn default_validate_permutation() -> bool {
        true
    }

    /// Parse a config from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the first
    /// validation failure.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for internal consistency.
    ///
    /// `2 * max_rungs <= steps` keeps every gap satisfiable: even when the
    /// previous gap used `max_rungs` rows, enough rows remain to draw from.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ConfigError::StepsRange {
                value: self.steps,
                max: MAX_STEPS,
            });
        }
        if self.min_rungs > self.max_rungs {
            return Err(ConfigError::RungMinExceedsMax {
                min: self.min_rungs,
                max: self.max_rungs,
            });
        }
        if u16::from(self.max_rungs) * 2 > u16::from(self.steps) {
            return Err(ConfigError::RungsExceedRows {
                max: self.max_rungs,
                steps: self.steps,
            });
        }
        if self.min_players == 0 {
            return Err(ConfigError::NoPlayers {
                value: self.min_players,
            });
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::PlayerRange {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }

    /// Row index of the bottom of every rail.
    #[must_use]
    pub const fn bottom_row(&self) -> u8 {
        self.steps.saturating_add(1)
    }
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            steps: Self::default_steps(),
            min_rungs: Self::default_min_rungs(),
            max_rungs: Self::default_max_rungs(),
            min_players: Self::default_min_players(),
            max_players: Self::default_max_players(),
            max_generation_attempts: Self::default_max_generation_attempts(),
            validate_permutation: Self::default_validate_permutation(),
        }
    }
}
