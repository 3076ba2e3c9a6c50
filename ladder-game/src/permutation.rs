//! The start-rail to terminal-rail mapping induced by a ladder.

use serde::{Deserialize, Serialize};

use crate::error::{DiagramDefect, LadderError, LadderResult};

/// A bijection from start rails to terminal rails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    terminals: Vec<usize>,
}

impl Permutation {
    /// Wrap `terminals[start] = terminal`, checking it is a bijection.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::OutOfRange`] for a terminal outside the rail
    /// range, or [`DiagramDefect::NotBijective`] when two starts share a
    /// terminal.
    pub fn from_terminals(terminals: Vec<usize>) -> LadderResult<Self> {
        let rail_count = terminals.len();
        let mut reached_by: Vec<Option<usize>> = vec![None; rail_count];
        for (start, &terminal) in terminals.iter().enumerate() {
            let slot = reached_by
                .get_mut(terminal)
                .ok_or(LadderError::OutOfRange {
                    index: terminal,
                    rail_count,
                })?;
            if let Some(first) = *slot {
                return Err(DiagramDefect::NotBijective {
                    first,
                    second: start,
                    terminal,
                }
                .into());
            }
            *slot = Some(start);
        }
        Ok(Self { terminals })
    }

    #[must_use]
    pub fn identity(rail_count: usize) -> Self {
        Self {
            terminals: (0..rail_count).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    #[must_use]
    pub fn terminal_of(&self, start: usize) -> Option<usize> {
        self.terminals.get(start).copied()
    }

    /// The start rail whose path ends on `terminal`.
    #[must_use]
    pub fn start_for(&self, terminal: usize) -> Option<usize> {
        self.terminals.iter().position(|&t| t == terminal)
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut starts = vec![0; self.terminals.len()];
        for (start, &terminal) in self.terminals.iter().enumerate() {
            starts[terminal] = start;
        }
        Self { terminals: starts }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.terminals.iter().enumerate().all(|(start, &t)| start == t)
    }

    /// `(start, terminal)` pairs in start order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.terminals.iter().copied().enumerate()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.terminals
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = LadderError;

    fn try_from(terminals: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_terminals(terminals)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.terminals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_and_inverse_agree() {
        let permutation = Permutation::from_terminals(vec![2, 0, 1]).unwrap();
        assert_eq!(permutation.terminal_of(0), Some(2));
        assert_eq!(permutation.start_for(2), Some(0));
        assert_eq!(permutation.terminal_of(3), None);

        let inverse = permutation.inverse();
        assert_eq!(inverse.as_slice(), &[1, 2, 0]);
        for (start, terminal) in permutation.iter() {
            assert_eq!(inverse.terminal_of(terminal), Some(start));
        }
        assert!(!permutation.is_identity());
        assert!(Permutation::identity(4).is_identity());
    }

    #[test]
    fn rejects_non_bijective_mappings() {
        assert_eq!(
            Permutation::from_terminals(vec![1, 1, 0]).unwrap_err(),
            LadderError::MalformedDiagram(DiagramDefect::NotBijective {
                first: 0,
                second: 1,
                terminal: 1
            })
        );
        assert_eq!(
            Permutation::from_terminals(vec![0, 5]).unwrap_err(),
            LadderError::OutOfRange {
                index: 5,
                rail_count: 2
            }
        );
    }

    #[test]
    fn serializes_as_plain_list() {
        let permutation = Permutation::from_terminals(vec![1, 0]).unwrap();
        assert_eq!(serde_json::to_string(&permutation).unwrap(), "[1,0]");
        assert!(serde_json::from_str::<Permutation>("[0,0]").is_err());
    }
}
