//! Ladder Game Engine
//!
//! Platform-agnostic core logic for the ladder game (Amidakuji): random ladder
//! generation, deterministic path tracing, and pairing players with outcomes.
//! This crate exposes plain data and pure functions; drawing, animation, and
//! scheduling belong to the caller.

pub mod config;
pub mod constants;
pub mod diagram;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod numbers;
pub mod outcome;
pub mod permutation;
pub mod random;
pub mod resolver;
pub mod roster;
pub mod seed;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, LadderConfig};
pub use diagram::LadderDiagram;
pub use error::{DiagramDefect, LadderError, LadderResult};
pub use generator::{GapRows, LadderGenerator, generate};
pub use geometry::{NormalizedPoint, Point, Projection, Rail, Rung, Segment};
pub use outcome::{Outcome, Pairing, PrizeBoard, assign};
pub use permutation::Permutation;
pub use random::{CountingRng, RandomSource, RngBundle, ScriptedRolls, derive_stream_seed};
pub use resolver::{PathResolver, ResolvedPath};
pub use roster::{Roster, SetupError};
pub use seed::{code_from_entropy, decode_code, encode_code, seed_from_entropy};
pub use session::{LadderSession, Reveal, SessionError};

/// Trace one rail of `diagram`.
///
/// # Errors
///
/// See [`PathResolver::resolve`].
pub fn resolve(diagram: &LadderDiagram, start: usize) -> LadderResult<ResolvedPath> {
    PathResolver::resolve(diagram, start)
}

/// The permutation induced by `diagram`.
///
/// # Errors
///
/// See [`PathResolver::resolve_all`].
pub fn resolve_all(diagram: &LadderDiagram) -> LadderResult<Permutation> {
    PathResolver::resolve_all(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generate_then_resolve_every_rail() {
        let mut rng = ChaCha20Rng::seed_from_u64(0xABCD);
        let diagram = generate(6, &mut rng).unwrap();
        let permutation = resolve_all(&diagram).unwrap();
        assert_eq!(permutation.len(), 6);
        for (start, terminal) in permutation.iter() {
            assert_eq!(resolve(&diagram, start).unwrap().terminal(), terminal);
        }
    }

    #[test]
    fn diagram_json_roundtrips_for_renderers() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let diagram = generate(4, &mut rng).unwrap();
        let json = serde_json::to_string(&diagram).unwrap();
        let restored: LadderDiagram = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diagram);
    }
}
