//! Error taxonomy for ladder generation and path resolution.

use thiserror::Error;

/// Errors raised by the ladder engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LadderError {
    #[error("rail count must be at least 1 (got {rail_count})")]
    InvalidInput { rail_count: usize },
    #[error("index {index} is outside 0..{rail_count}")]
    OutOfRange { index: usize, rail_count: usize },
    #[error("malformed ladder diagram: {0}")]
    MalformedDiagram(#[from] DiagramDefect),
    #[error("no valid ladder produced after {attempts} attempts")]
    GenerationFailed { attempts: u32 },
}

/// Structural defects that make a diagram untraceable.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DiagramDefect {
    #[error("diagram has no rails")]
    NoRails,
    #[error("steps must be between 1 and {max} (got {steps})")]
    StepsOutOfRange { steps: u8, max: u8 },
    #[error("expected {expected} gaps for the rail count, found {found}")]
    GapCount { expected: usize, found: usize },
    #[error("rung in gap {gap} has no rail on its right")]
    GapOutOfRange { gap: usize },
    #[error("rung in gap {gap} sits on row {row}, outside 1..={steps}")]
    RowOutOfRange { gap: usize, row: u8, steps: u8 },
    #[error("gap {gap} repeats row {row}")]
    DuplicateRung { gap: usize, row: u8 },
    #[error("gaps {left} and {right} both use row {row}")]
    SharedJunction { left: usize, right: usize, row: u8 },
    #[error("rail {rail} has two rungs at row {row}")]
    AmbiguousJunction { rail: usize, row: u8 },
    #[error("rail {rail} stopped at row {row} with no rung to cross")]
    DeadEnd { rail: usize, row: u8 },
    #[error("rails {first} and {second} both finish on rail {terminal}")]
    NotBijective {
        first: usize,
        second: usize,
        terminal: usize,
    },
}

pub type LadderResult<T> = Result<T, LadderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defects_convert_into_malformed_diagram() {
        let err: LadderError = DiagramDefect::DeadEnd { rail: 2, row: 4 }.into();
        assert_eq!(
            err.to_string(),
            "malformed ladder diagram: rail 2 stopped at row 4 with no rung to cross"
        );
    }

    #[test]
    fn out_of_range_mentions_bounds() {
        let err = LadderError::OutOfRange {
            index: 7,
            rail_count: 3,
        };
        assert_eq!(err.to_string(), "index 7 is outside 0..3");
    }
}
