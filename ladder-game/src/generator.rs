//! Randomized ladder generation.
//!
//! Each gap draws a rung count, then rejection-samples that many distinct rows
//! while avoiding every row used by the gap to its left. The finished diagram
//! is validated structurally and, unless disabled, traced end to end; a
//! diagram whose traces do not form a permutation is thrown away and drawn
//! again.

use smallvec::SmallVec;

use crate::config::{ConfigError, LadderConfig};
use crate::constants::MAX_ROW_DRAWS_PER_GAP;
use crate::diagram::LadderDiagram;
use crate::error::{LadderError, LadderResult};
use crate::random::RandomSource;
use crate::resolver::PathResolver;

/// Rows chosen for a single gap, ascending.
pub type GapRows = SmallVec<[u8; 8]>;

/// Produces ladder diagrams according to a [`LadderConfig`].
#[derive(Debug, Clone, Default)]
pub struct LadderGenerator {
    config: LadderConfig,
}

impl LadderGenerator {
    /// Create a generator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the first violated configuration constraint.
    pub fn new(config: LadderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &LadderConfig {
        &self.config
    }

    /// Generate a diagram with `rail_count` rails.
    ///
    /// One rail yields a bare diagram without consuming randomness.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidInput`] when `rail_count` is zero and
    /// [`LadderError::GenerationFailed`] when every attempt was rejected.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        rail_count: usize,
        rng: &mut R,
    ) -> LadderResult<LadderDiagram> {
        if rail_count == 0 {
            return Err(LadderError::InvalidInput { rail_count });
        }

        let attempts = self.config.max_generation_attempts;
        for attempt in 1..=attempts {
            let diagram = match self.draw_diagram(rail_count, rng) {
                Ok(Some(diagram)) => diagram,
                Ok(None) => {
                    log::warn!("ladder attempt {attempt}/{attempts}: row draws exhausted");
                    continue;
                }
                Err(err) => {
                    log::warn!("ladder attempt {attempt}/{attempts} malformed: {err}");
                    continue;
                }
            };
            if !self.config.validate_permutation {
                return Ok(diagram);
            }
            match PathResolver::resolve_all(&diagram) {
                Ok(permutation) => {
                    log::debug!(
                        "ladder generated: {rail_count} rails, {} rungs, attempt {attempt}, permutation {:?}",
                        diagram.rungs().len(),
                        permutation.as_slice()
                    );
                    return Ok(diagram);
                }
                Err(err) => {
                    log::warn!("ladder attempt {attempt}/{attempts} rejected: {err}");
                }
            }
        }

        Err(LadderError::GenerationFailed { attempts })
    }

    fn draw_diagram<R: RandomSource + ?Sized>(
        &self,
        rail_count: usize,
        rng: &mut R,
    ) -> LadderResult<Option<LadderDiagram>> {
        let gap_count = rail_count - 1;
        let mut rows_per_gap: Vec<GapRows> = Vec::with_capacity(gap_count);
        let mut previous = GapRows::new();

        for gap in 0..gap_count {
            let count = rng.roll(self.config.min_rungs, self.config.max_rungs);
            let Some(rows) = self.draw_rows(count, &previous, rng) else {
                return Ok(None);
            };
            log::trace!("gap {gap}: {count} rungs at rows {rows:?}");
            previous.clone_from(&rows);
            rows_per_gap.push(rows);
        }

        LadderDiagram::from_gap_rows(rail_count, self.config.steps, rows_per_gap.as_slice())
            .map(Some)
    }

    fn draw_rows<R: RandomSource + ?Sized>(
        &self,
        count: u8,
        excluded: &[u8],
        rng: &mut R,
    ) -> Option<GapRows> {
        let mut rows = GapRows::new();
        let mut draws = 0u32;
        while rows.len() < usize::from(count) {
            if draws >= MAX_ROW_DRAWS_PER_GAP {
                return None;
            }
            draws += 1;
            let row = rng.roll(1, self.config.steps);
            if !excluded.contains(&row) && !rows.contains(&row) {
                rows.push(row);
            }
        }
        rows.sort_unstable();
        Some(rows)
    }
}

/// Generate a diagram with the default configuration.
///
/// # Errors
///
/// See [`LadderGenerator::generate`].
pub fn generate<R: RandomSource + ?Sized>(
    rail_count: usize,
    rng: &mut R,
) -> LadderResult<LadderDiagram> {
    LadderGenerator::default().generate(rail_count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRolls;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn scripted_rolls_place_rungs_exactly() {
        let mut rolls = ScriptedRolls::new(vec![2, 3, 7, 1, 5]);
        let diagram = generate(3, &mut rolls).unwrap();
        assert_eq!(diagram.rows_in_gap(0).collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(diagram.rows_in_gap(1).collect::<Vec<_>>(), vec![5]);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn excluded_rows_are_redrawn() {
        // gap 1 draws 3 (taken by gap 0) before settling on 6
        let mut rolls = ScriptedRolls::new(vec![1, 3, 1, 3, 6]);
        let diagram = generate(3, &mut rolls).unwrap();
        assert_eq!(diagram.rows_in_gap(0).collect::<Vec<_>>(), vec![3]);
        assert_eq!(diagram.rows_in_gap(1).collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn zero_rails_is_invalid_input() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            generate(0, &mut rng).unwrap_err(),
            LadderError::InvalidInput { rail_count: 0 }
        );
    }

    #[test]
    fn single_rail_consumes_no_randomness() {
        let mut rolls = ScriptedRolls::new(vec![4, 4]);
        let diagram = generate(1, &mut rolls).unwrap();
        assert_eq!(diagram.rail_count(), 1);
        assert!(diagram.rungs().is_empty());
        assert_eq!(rolls.remaining(), 2);
    }

    #[test]
    fn same_seed_same_diagram() {
        let first = generate(7, &mut ChaCha20Rng::seed_from_u64(99)).unwrap();
        let second = generate(7, &mut ChaCha20Rng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rung_counts_respect_config() {
        let generator = LadderGenerator::new(LadderConfig {
            min_rungs: 2,
            max_rungs: 3,
            ..LadderConfig::default()
        })
        .unwrap();
        for seed in 0..50 {
            let diagram = generator
                .generate(6, &mut ChaCha20Rng::seed_from_u64(seed))
                .unwrap();
            for gap in 0..diagram.gap_count() {
                let count = diagram.rows_in_gap(gap).count();
                assert!((2..=3).contains(&count), "seed {seed} gap {gap}: {count}");
            }
        }
    }

    #[test]
    fn unsatisfiable_rolls_exhaust_attempts() {
        let generator = LadderGenerator::new(LadderConfig {
            max_generation_attempts: 3,
            ..LadderConfig::default()
        })
        .unwrap();
        let mut rolls = ScriptedRolls::new(vec![1]);
        assert_eq!(
            generator.generate(3, &mut rolls).unwrap_err(),
            LadderError::GenerationFailed { attempts: 3 }
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = LadderGenerator::new(LadderConfig {
            steps: 6,
            ..LadderConfig::default()
        });
        assert_eq!(
            result.unwrap_err(),
            ConfigError::RungsExceedRows { max: 5, steps: 6 }
        );
    }
}
