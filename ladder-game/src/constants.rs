//! Default ladder shape and generation limits.
//!
//! [`LadderConfig`](crate::config::LadderConfig) starts from these values;
//! the rest are fixed.

// Ladder geometry ----------------------------------------------------------
/// Interior row subdivisions; rows `1..=DEFAULT_STEPS` may carry rungs.
pub const DEFAULT_STEPS: u8 = 10;
/// Largest supported `steps`; the bottom row `steps + 1` must fit in a `u8`.
pub const MAX_STEPS: u8 = u8::MAX - 1;
/// Row index of the top of every rail.
pub const TOP_ROW: u8 = 0;

// Rung draws ---------------------------------------------------------------
pub const DEFAULT_MIN_RUNGS_PER_GAP: u8 = 1;
pub const DEFAULT_MAX_RUNGS_PER_GAP: u8 = 5;
/// Ceiling on row draws for a single gap before generation gives up.
pub const MAX_ROW_DRAWS_PER_GAP: u32 = 4_096;

// Regeneration -------------------------------------------------------------
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 16;

// Players ------------------------------------------------------------------
pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 10;
pub(crate) const PLAYER_NAME_PREFIX: &str = "Player";
pub(crate) const BLANK_OUTCOME_LABEL: &str = "Nothing";

// Seed stream domain tags --------------------------------------------------
pub(crate) const STREAM_LADDER: &[u8] = b"ladder";
pub(crate) const STREAM_PRIZES: &[u8] = b"prizes";
