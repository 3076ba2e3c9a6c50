//! Deterministic path tracing over a ladder diagram.

use serde::{Deserialize, Serialize};

use crate::diagram::LadderDiagram;
use crate::error::{DiagramDefect, LadderError, LadderResult};
use crate::geometry::{NormalizedPoint, Point};
use crate::permutation::Permutation;

/// The route of one token from the top of its start rail to the bottom of
/// its terminal rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPath {
    start: usize,
    terminal: usize,
    waypoints: Vec<Point>,
}

impl ResolvedPath {
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn terminal(&self) -> usize {
        self.terminal
    }

    /// Visited points in travel order, alternating drops and jumps.
    #[must_use]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Number of rungs crossed.
    #[must_use]
    pub fn crossings(&self) -> usize {
        self.waypoints
            .windows(2)
            .filter(|pair| pair[0].rail != pair[1].rail)
            .count()
    }

    /// Waypoints projected into the unit square of `diagram`.
    #[must_use]
    pub fn normalized(&self, diagram: &LadderDiagram) -> Vec<NormalizedPoint> {
        let projection = diagram.projection();
        self.waypoints
            .iter()
            .map(|&point| projection.point(point))
            .collect()
    }
}

/// Traces paths through a [`LadderDiagram`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl PathResolver {
    /// Trace the path that starts at the top of `start`.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::OutOfRange`] when `start` is not a rail of the
    /// diagram, and [`LadderError::MalformedDiagram`] when a junction has no
    /// rung or more than one rung to cross.
    pub fn resolve(diagram: &LadderDiagram, start: usize) -> LadderResult<ResolvedPath> {
        let rail = diagram.rail(start).ok_or(LadderError::OutOfRange {
            index: start,
            rail_count: diagram.rail_count(),
        })?;
        let bottom = diagram.bottom_row();
        let mut current = rail.top();
        let mut waypoints = vec![current];

        // every pass descends at least one row
        for _ in 0..=usize::from(bottom) {
            let row = diagram
                .next_junction_below(current.rail, current.row)
                .unwrap_or(bottom);
            current = Point::new(current.rail, row);
            waypoints.push(current);
            if row == bottom {
                return Ok(ResolvedPath {
                    start,
                    terminal: current.rail,
                    waypoints,
                });
            }

            let mut junction = diagram.rungs_at(current.rail, row);
            let rung = junction.next().ok_or(DiagramDefect::DeadEnd {
                rail: current.rail,
                row,
            })?;
            if junction.next().is_some() {
                return Err(DiagramDefect::AmbiguousJunction {
                    rail: current.rail,
                    row,
                }
                .into());
            }
            let across = rung.across_from(current.rail).ok_or(DiagramDefect::DeadEnd {
                rail: current.rail,
                row,
            })?;
            current = Point::new(across, row);
            waypoints.push(current);
        }

        Err(DiagramDefect::DeadEnd {
            rail: current.rail,
            row: current.row,
        }
        .into())
    }

    /// Trace every rail, in start order.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from [`PathResolver::resolve`].
    pub fn resolve_paths(diagram: &LadderDiagram) -> LadderResult<Vec<ResolvedPath>> {
        (0..diagram.rail_count())
            .map(|start| Self::resolve(diagram, start))
            .collect()
    }

    /// The permutation induced by `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::MalformedDiagram`] if any trace fails or two
    /// rails finish on the same terminal.
    pub fn resolve_all(diagram: &LadderDiagram) -> LadderResult<Permutation> {
        let terminals = Self::resolve_paths(diagram)?
            .iter()
            .map(ResolvedPath::terminal)
            .collect();
        Permutation::from_terminals(terminals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rung;

    fn three_rail_diagram() -> LadderDiagram {
        LadderDiagram::from_gap_rows(3, 10, &[vec![3, 7], vec![5]]).unwrap()
    }

    #[test]
    fn traces_hand_computed_routes() {
        let diagram = three_rail_diagram();

        let path = PathResolver::resolve(&diagram, 0).unwrap();
        assert_eq!(
            path.waypoints(),
            &[
                Point::new(0, 0),
                Point::new(0, 3),
                Point::new(1, 3),
                Point::new(1, 5),
                Point::new(2, 5),
                Point::new(2, 11),
            ]
        );
        assert_eq!(path.terminal(), 2);
        assert_eq!(path.crossings(), 2);

        let middle = PathResolver::resolve(&diagram, 1).unwrap();
        assert_eq!(
            middle.waypoints(),
            &[
                Point::new(1, 0),
                Point::new(1, 3),
                Point::new(0, 3),
                Point::new(0, 7),
                Point::new(1, 7),
                Point::new(1, 11),
            ]
        );

        let permutation = PathResolver::resolve_all(&diagram).unwrap();
        assert_eq!(permutation.as_slice(), &[2, 1, 0]);
    }

    #[test]
    fn out_of_range_start_is_rejected() {
        let diagram = three_rail_diagram();
        assert_eq!(
            PathResolver::resolve(&diagram, 3).unwrap_err(),
            LadderError::OutOfRange {
                index: 3,
                rail_count: 3
            }
        );
    }

    #[test]
    fn single_rail_drops_straight_down() {
        let diagram = LadderDiagram::from_gap_rows::<Vec<u8>>(1, 10, &[]).unwrap();
        let path = PathResolver::resolve(&diagram, 0).unwrap();
        assert_eq!(path.waypoints(), &[Point::new(0, 0), Point::new(0, 11)]);
        let normalized = path.normalized(&diagram);
        assert!((normalized[0].x - 0.5).abs() < f32::EPSILON);
        assert!(normalized[0].y.abs() < f32::EPSILON);
        assert!((normalized[1].y - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn shared_junction_is_reported_not_looped() {
        let diagram = LadderDiagram::unchecked(3, 10, vec![Rung::new(0, 4), Rung::new(1, 4)]);
        assert_eq!(
            PathResolver::resolve(&diagram, 1).unwrap_err(),
            LadderError::MalformedDiagram(DiagramDefect::AmbiguousJunction { rail: 1, row: 4 })
        );
    }

    #[test]
    fn stray_rung_cannot_yield_a_permutation() {
        // gap 1 has no right rail, so rail 0 walks off to a phantom rail 2
        let diagram = LadderDiagram::unchecked(2, 10, vec![Rung::new(0, 2), Rung::new(1, 5)]);
        assert_eq!(
            PathResolver::resolve_all(&diagram).unwrap_err(),
            LadderError::OutOfRange {
                index: 2,
                rail_count: 2
            }
        );
    }
}
