//! Immutable ladder geometry and its structural invariants.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_STEPS;
use crate::error::{DiagramDefect, LadderResult};
use crate::geometry::{Projection, Rail, Rung, Segment};

/// The complete geometry of one ladder: rails plus the rungs between them.
///
/// A diagram can only be obtained through validating constructors (or
/// deserialization, which runs the same checks), so every value upholds:
/// rungs sit on existing gaps and rows `1..=steps`, no `(gap, row)` repeats,
/// and neighbouring gaps never share a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiagramParts", into = "DiagramParts")]
pub struct LadderDiagram {
    rail_count: usize,
    steps: u8,
    rungs: Vec<Rung>,
}

#[derive(Serialize, Deserialize)]
struct DiagramParts {
    rail_count: usize,
    steps: u8,
    rungs: Vec<Rung>,
}

impl TryFrom<DiagramParts> for LadderDiagram {
    type Error = crate::LadderError;

    fn try_from(parts: DiagramParts) -> Result<Self, Self::Error> {
        Self::from_rungs(parts.rail_count, parts.steps, parts.rungs)
    }
}

impl From<LadderDiagram> for DiagramParts {
    fn from(diagram: LadderDiagram) -> Self {
        Self {
            rail_count: diagram.rail_count,
            steps: diagram.steps,
            rungs: diagram.rungs,
        }
    }
}

impl LadderDiagram {
    /// Build a diagram from arbitrary rungs, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::MalformedDiagram`](crate::LadderError::MalformedDiagram)
    /// naming the first defect found.
    pub fn from_rungs(
        rail_count: usize,
        steps: u8,
        rungs: impl IntoIterator<Item = Rung>,
    ) -> LadderResult<Self> {
        let mut rungs: Vec<Rung> = rungs.into_iter().collect();
        rungs.sort_unstable();
        let diagram = Self {
            rail_count,
            steps,
            rungs,
        };
        diagram.validate()?;
        Ok(diagram)
    }

    /// Build a diagram from the rows chosen for each gap, left to right.
    ///
    /// `rows_per_gap` must hold exactly `rail_count - 1` entries.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::MalformedDiagram`](crate::LadderError::MalformedDiagram)
    /// when the gap count is wrong or any invariant is violated.
    pub fn from_gap_rows<R: AsRef<[u8]>>(
        rail_count: usize,
        steps: u8,
        rows_per_gap: &[R],
    ) -> LadderResult<Self> {
        if rail_count == 0 {
            return Err(DiagramDefect::NoRails.into());
        }
        let expected = rail_count - 1;
        if rows_per_gap.len() != expected {
            return Err(DiagramDefect::GapCount {
                expected,
                found: rows_per_gap.len(),
            }
            .into());
        }
        let rungs = rows_per_gap.iter().enumerate().flat_map(|(gap, rows)| {
            rows.as_ref().iter().map(move |&row| Rung::new(gap, row))
        });
        Self::from_rungs(rail_count, steps, rungs)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(rail_count: usize, steps: u8, rungs: Vec<Rung>) -> Self {
        Self {
            rail_count,
            steps,
            rungs,
        }
    }

    /// Check the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`DiagramDefect`] encountered.
    pub fn validate(&self) -> Result<(), DiagramDefect> {
        if self.rail_count == 0 {
            return Err(DiagramDefect::NoRails);
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(DiagramDefect::StepsOutOfRange {
                steps: self.steps,
                max: MAX_STEPS,
            });
        }
        let gap_count = self.gap_count();
        let mut previous: Option<Rung> = None;
        for &rung in &self.rungs {
            if rung.gap >= gap_count {
                return Err(DiagramDefect::GapOutOfRange { gap: rung.gap });
            }
            if rung.row == 0 || rung.row > self.steps {
                return Err(DiagramDefect::RowOutOfRange {
                    gap: rung.gap,
                    row: rung.row,
                    steps: self.steps,
                });
            }
            if previous == Some(rung) {
                return Err(DiagramDefect::DuplicateRung {
                    gap: rung.gap,
                    row: rung.row,
                });
            }
            if rung.gap > 0 && self.has_rung(rung.gap - 1, rung.row) {
                return Err(DiagramDefect::SharedJunction {
                    left: rung.gap - 1,
                    right: rung.gap,
                    row: rung.row,
                });
            }
            previous = Some(rung);
        }
        Ok(())
    }

    #[must_use]
    pub const fn rail_count(&self) -> usize {
        self.rail_count
    }

    #[must_use]
    pub const fn steps(&self) -> u8 {
        self.steps
    }

    /// Row index shared by the bottom end of every rail.
    #[must_use]
    pub const fn bottom_row(&self) -> u8 {
        self.steps + 1
    }

    #[must_use]
    pub const fn gap_count(&self) -> usize {
        self.rail_count.saturating_sub(1)
    }

    #[must_use]
    pub fn rail(&self, index: usize) -> Option<Rail> {
        (index < self.rail_count).then(|| Rail {
            index,
            bottom_row: self.bottom_row(),
        })
    }

    pub fn rails(&self) -> impl Iterator<Item = Rail> + '_ {
        (0..self.rail_count).map(|index| Rail {
            index,
            bottom_row: self.bottom_row(),
        })
    }

    /// Rungs ordered by gap, then row.
    #[must_use]
    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    /// Rows used by the rungs of one gap, top to bottom.
    pub fn rows_in_gap(&self, gap: usize) -> impl Iterator<Item = u8> + '_ {
        self.rungs
            .iter()
            .filter(move |rung| rung.gap == gap)
            .map(|rung| rung.row)
    }

    #[must_use]
    pub fn has_rung(&self, gap: usize, row: u8) -> bool {
        self.rungs.binary_search(&Rung::new(gap, row)).is_ok()
    }

    /// Rungs with an endpoint at `(rail, row)`.
    pub fn rungs_at(&self, rail: usize, row: u8) -> impl Iterator<Item = Rung> + '_ {
        self.rungs
            .iter()
            .copied()
            .filter(move |rung| rung.row == row && rung.touches(rail))
    }

    /// First row strictly below `row` where a rung meets `rail`.
    #[must_use]
    pub fn next_junction_below(&self, rail: usize, row: u8) -> Option<u8> {
        self.rungs
            .iter()
            .filter(|rung| rung.row > row && rung.touches(rail))
            .map(|rung| rung.row)
            .min()
    }

    #[must_use]
    pub const fn projection(&self) -> Projection {
        Projection::new(self.rail_count, self.steps)
    }

    /// Normalized top-to-bottom segment of every rail.
    #[must_use]
    pub fn rail_segments(&self) -> Vec<Segment> {
        let projection = self.projection();
        self.rails()
            .map(|rail| projection.segment(rail.top(), rail.bottom()))
            .collect()
    }

    /// Normalized left-to-right segment of every rung.
    #[must_use]
    pub fn rung_segments(&self) -> Vec<Segment> {
        let projection = self.projection();
        self.rungs
            .iter()
            .map(|rung| projection.segment(rung.start(), rung.end()))
            .collect()
    }
}
