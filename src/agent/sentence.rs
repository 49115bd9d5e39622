use crate::Position;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// A logical statement about the board: exactly `count` of `cells` are
/// mines. Sentences are mutated in place as cells become known and compared
/// structurally for deduplication.
///
/// Well-formed sentences keep `count <= cells.len()`; every constructor and
/// update below preserves this as long as the observations feeding them are
/// truthful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    cells: HashSet<Position>,
    count: u8,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Position>, count: u8) -> Self {
        let cells: HashSet<Position> = cells.into_iter().collect();
        debug_assert!(
            count as usize <= cells.len(),
            "malformed sentence: count {} over {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// The cells this sentence proves to be mines: all of them, when every
    /// remaining cell must be one. A zero count never proves mines; that
    /// case is safety evidence.
    pub fn known_mines(&self) -> Option<&HashSet<Position>> {
        if self.count != 0 && self.count as usize == self.cells.len() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// The cells this sentence proves to be safe: all of them, when none
    /// can be a mine. An empty sentence carries no information.
    pub fn known_safes(&self) -> Option<&HashSet<Position>> {
        if self.count == 0 && !self.cells.is_empty() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Removes a cell now known to be a mine. One mine is accounted for, so
    /// the count drops by exactly one; it is never recomputed from the
    /// remaining cardinality, since each remaining cell may still be a mine
    /// or not. No-op if the cell is not a member.
    pub fn mark_mine(&mut self, cell: Position) {
        if self.cells.remove(&cell) {
            self.count -= 1;
        }
    }

    /// Removes a cell now known to be safe. The count is unchanged: the
    /// mines are still among the remaining cells. No-op if the cell is not
    /// a member.
    pub fn mark_safe(&mut self, cell: Position) {
        self.cells.remove(&cell);
    }

    pub fn is_subset_of(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// The remainder constraint `self - other`. Callers uphold
    /// `other ⊆ self`, which keeps the count subtraction well-formed.
    pub fn difference(&self, other: &Sentence) -> Sentence {
        Sentence {
            cells: self.cells.difference(&other.cells).copied().collect(),
            count: self.count - other.count,
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .cells
            .iter()
            .sorted()
            .map(|p| format!("({}, {})", p.x, p.y))
            .join(", ");
        write!(f, "{{{}}} = {}", cells, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(cells: &[(i32, i32)], count: u8) -> Sentence {
        Sentence::new(cells.iter().map(|&(x, y)| Position::new(x, y)), count)
    }

    #[test]
    fn test_known_mines_when_saturated() {
        let s = sentence(&[(0, 0), (0, 1)], 2);
        assert_eq!(s.known_mines().unwrap(), s.cells());
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn test_zero_count_is_safety_not_mine_evidence() {
        let s = sentence(&[(0, 0), (0, 1)], 0);
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes().unwrap(), s.cells());
    }

    #[test]
    fn test_undetermined_sentence_yields_nothing() {
        let s = sentence(&[(0, 0), (0, 1), (0, 2)], 1);
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn test_empty_sentence_yields_nothing() {
        let s = sentence(&[], 0);
        assert_eq!(s.known_mines(), None);
        assert_eq!(s.known_safes(), None);
    }

    #[test]
    fn test_mark_mine_decrements_once() {
        let mut s = sentence(&[(0, 0), (0, 1), (0, 2)], 2);
        s.mark_mine(Position::new(0, 1));
        assert_eq!(s.count(), 1);
        assert_eq!(s.cells().len(), 2);

        // Second mark of the same cell is a no-op.
        s.mark_mine(Position::new(0, 1));
        assert_eq!(s.count(), 1);
        assert_eq!(s.cells().len(), 2);
    }

    #[test]
    fn test_mark_safe_keeps_count() {
        let mut s = sentence(&[(0, 0), (0, 1), (0, 2)], 1);
        s.mark_safe(Position::new(0, 0));
        assert_eq!(s.count(), 1);
        assert!(!s.cells().contains(&Position::new(0, 0)));

        // Non-member cell is a no-op.
        s.mark_safe(Position::new(5, 5));
        assert_eq!(s.cells().len(), 2);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = sentence(&[(1, 0), (0, 1)], 1);
        let b = sentence(&[(0, 1), (1, 0)], 1);
        let c = sentence(&[(0, 1), (1, 0)], 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_difference() {
        let small = sentence(&[(0, 0), (0, 1)], 1);
        let large = sentence(&[(0, 0), (0, 1), (0, 2)], 1);
        assert!(small.is_subset_of(&large));

        let derived = large.difference(&small);
        assert_eq!(derived, sentence(&[(0, 2)], 0));
    }

    #[test]
    fn test_display_is_sorted() {
        let s = sentence(&[(1, 1), (0, 0), (1, 0)], 2);
        assert_eq!(s.to_string(), "{(0, 0), (1, 0), (1, 1)} = 2");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_sentence() -> impl Strategy<Value = Sentence> {
            // Cell sets from a small grid so overlap is common; count is
            // always within [0, |cells|].
            proptest::collection::hash_set((0i32..6, 0i32..6), 0..9).prop_flat_map(|cells| {
                let len = cells.len() as u8;
                (Just(cells), 0..=len).prop_map(|(cells, count)| {
                    Sentence::new(cells.into_iter().map(|(x, y)| Position::new(x, y)), count)
                })
            })
        }

        proptest! {
            #[test]
            fn known_mines_and_safes_follow_truth_table(s in arb_sentence()) {
                let saturated = s.count() as usize == s.cells().len();
                match s.known_mines() {
                    Some(cells) => prop_assert!(s.count() != 0 && saturated && cells == s.cells()),
                    None => prop_assert!(s.count() == 0 || !saturated),
                }
                match s.known_safes() {
                    Some(cells) => prop_assert!(s.count() == 0 && cells == s.cells()),
                    None => prop_assert!(s.count() != 0 || s.cells().is_empty()),
                }
            }

            #[test]
            fn marking_preserves_well_formedness(mut s in arb_sentence()) {
                let cells: Vec<Position> = s.cells().iter().copied().collect();
                for cell in cells {
                    if s.known_safes().is_some() {
                        s.mark_safe(cell);
                    } else if s.known_mines().is_some() {
                        s.mark_mine(cell);
                    } else {
                        // Undetermined cell status; either mark keeps the
                        // sentence well-formed.
                        s.mark_safe(cell);
                    }
                    prop_assert!(s.count() as usize <= s.cells().len());
                }
            }

            #[test]
            fn mark_of_non_member_is_noop(s in arb_sentence()) {
                let outside = Position::new(100, 100);
                let mut marked = s.clone();
                marked.mark_mine(outside);
                prop_assert_eq!(&marked, &s);
                marked.mark_safe(outside);
                prop_assert_eq!(&marked, &s);
            }
        }
    }
}
