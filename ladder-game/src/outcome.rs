//! Outcomes waiting at the bottom of each rail, and pairing them with players.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::constants::BLANK_OUTCOME_LABEL;
use crate::permutation::Permutation;
use crate::roster::{Roster, SetupError};

/// What a player receives at a terminal rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub label: String,
    pub is_winner: bool,
}

impl Outcome {
    #[must_use]
    pub fn winner(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_winner: true,
        }
    }

    #[must_use]
    pub fn blank() -> Self {
        Self {
            label: BLANK_OUTCOME_LABEL.to_string(),
            is_winner: false,
        }
    }
}

/// One outcome per terminal rail, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBoard {
    slots: Vec<Outcome>,
}

impl PrizeBoard {
    /// Scatter the winning prizes across `rail_count` terminals at random and
    /// fill the remaining terminals with blanks.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::TooManyWinners`] when there are more prizes than
    /// terminals.
    pub fn shuffled<S, R>(
        rail_count: usize,
        prizes: &[S],
        rng: &mut R,
    ) -> Result<Self, SetupError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if prizes.len() > rail_count {
            return Err(SetupError::TooManyWinners {
                winners: prizes.len(),
                slots: rail_count,
            });
        }
        let mut slots: Vec<Outcome> = prizes
            .iter()
            .map(|prize| Outcome::winner(prize.as_ref().trim()))
            .collect();
        slots.resize_with(rail_count, Outcome::blank);
        slots.shuffle(rng);
        Ok(Self { slots })
    }

    /// Use `slots` as laid out.
    #[must_use]
    pub const fn from_outcomes(slots: Vec<Outcome>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn outcome_at(&self, terminal: usize) -> Option<&Outcome> {
        self.slots.get(terminal)
    }

    #[must_use]
    pub fn slots(&self) -> &[Outcome] {
        &self.slots
    }

    #[must_use]
    pub fn winner_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_winner).count()
    }
}

/// A player matched with the outcome at the end of their path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player: String,
    pub start: usize,
    pub terminal: usize,
    pub outcome: Outcome,
}

/// Pair every player with the outcome their rail leads to.
///
/// # Errors
///
/// Returns [`SetupError::SizeMismatch`] unless roster, permutation and board
/// all cover the same number of rails.
pub fn assign(
    permutation: &Permutation,
    roster: &Roster,
    board: &PrizeBoard,
) -> Result<Vec<Pairing>, SetupError> {
    if roster.len() != permutation.len() || board.len() != permutation.len() {
        return Err(SetupError::SizeMismatch {
            outcomes: board.len(),
            players: roster.len(),
        });
    }
    Ok(permutation
        .iter()
        .zip(roster.names())
        .map(|((start, terminal), player)| Pairing {
            player: player.clone(),
            start,
            terminal,
            outcome: board
                .outcome_at(terminal)
                .cloned()
                .unwrap_or_else(Outcome::blank),
        })
        .collect())
}
