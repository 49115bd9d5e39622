use super::Sentence;
use crate::{GameError, Position};
use itertools::Itertools;
use rand::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Minesweeper player that accumulates a propositional knowledge base from
/// per-cell observations and answers move queries from it.
///
/// Belief state only grows: `moves_made`, `mines`, and `safes` are
/// monotonic, and `knowledge` is append-only (existing sentences shrink in
/// place as cells become known, but are never removed).
pub struct MinesweeperAi {
    width: u32,
    height: u32,
    moves_made: BTreeSet<Position>,
    mines: BTreeSet<Position>,
    safes: BTreeSet<Position>,
    knowledge: Vec<Sentence>,
}

impl MinesweeperAi {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            knowledge: Vec::new(),
        }
    }

    /// Records that `cell` is a mine and pushes the fact into every
    /// sentence. Callers only pass cells proven to be mines.
    pub fn mark_mine(&mut self, cell: Position) {
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Records that `cell` is safe and pushes the fact into every sentence.
    pub fn mark_safe(&mut self, cell: Position) {
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Intake for one observation: the board reported `count` mines among
    /// the 8-neighborhood of the just-revealed `cell`.
    ///
    /// Builds one new sentence over the still-uncertain neighbors, sweeps
    /// the knowledge base once for directly-decided sentences, then runs
    /// one pairwise subset-inference pass. No fixed point is computed in a
    /// single call; repeated calls propagate across moves.
    ///
    /// Re-observing a cell is accepted; an out-of-bounds cell or a count
    /// exceeding the in-bounds neighborhood is rejected.
    pub fn add_knowledge(&mut self, cell: Position, count: u8) -> Result<(), GameError> {
        if !self.is_within_bounds(cell) {
            return Err(GameError::OutOfBounds(cell));
        }
        let neighbors: Vec<Position> = cell
            .neighbors()
            .filter(|p| self.is_within_bounds(*p))
            .collect();
        if count as usize > neighbors.len() {
            return Err(GameError::ImpossibleCount {
                cell,
                count,
                neighbors: neighbors.len(),
            });
        }

        // The revealed cell is a move and is safe by construction.
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        // Fold already-known neighbors out of the observation: known mines
        // reduce the count, known safes contribute nothing.
        let mut uncertain = HashSet::new();
        let mut count = count;
        for neighbor in neighbors {
            if self.mines.contains(&neighbor) {
                count -= 1;
            } else if !self.safes.contains(&neighbor) {
                uncertain.insert(neighbor);
            }
        }
        self.knowledge.push(Sentence::new(uncertain, count));

        // One sweep over the knowledge base for sentences that are now
        // fully decided, collected first and then broadcast.
        let mut inferred_mines: BTreeSet<Position> = BTreeSet::new();
        let mut inferred_safes: BTreeSet<Position> = BTreeSet::new();
        for sentence in &self.knowledge {
            if let Some(found) = sentence.known_mines() {
                inferred_mines.extend(found.iter().copied());
            }
            if let Some(found) = sentence.known_safes() {
                inferred_safes.extend(found.iter().copied());
            }
        }
        for cell in inferred_mines {
            self.mark_mine(cell);
        }
        for cell in inferred_safes {
            self.mark_safe(cell);
        }

        // Pairwise subset inference over the knowledge base as it stands
        // now: when one constrained region contains another, the remainder
        // region is constrained by the difference. Sentences appended here
        // are deduplicated against the growing list but not themselves
        // paired until the next observation.
        let len = self.knowledge.len();
        for (i, j) in (0..len).tuple_combinations() {
            let a = &self.knowledge[i];
            let b = &self.knowledge[j];
            let mut derived = Vec::new();
            if a.is_subset_of(b) {
                derived.push(b.difference(a));
            }
            if b.is_subset_of(a) {
                derived.push(a.difference(b));
            }
            for sentence in derived {
                if !self.knowledge.contains(&sentence) {
                    self.knowledge.push(sentence);
                }
            }
        }

        Ok(())
    }

    /// A cell proven safe and not yet played, or `None`. Ties break to the
    /// first eligible cell in row-major order. Never mutates state.
    pub fn make_safe_move(&self) -> Option<Position> {
        self.safes
            .iter()
            .find(|cell| !self.moves_made.contains(*cell))
            .copied()
    }

    /// A uniformly random cell that is neither played nor a known mine, or
    /// `None` when no candidate remains. Candidates are enumerated up
    /// front, so this always terminates.
    pub fn make_random_move(&self, rng: &mut impl Rng) -> Option<Position> {
        let candidates: Vec<Position> = self
            .iter_positions()
            .filter(|p| !self.moves_made.contains(p) && !self.mines.contains(p))
            .collect();
        candidates.choose(rng).copied()
    }

    pub fn mines(&self) -> &BTreeSet<Position> {
        &self.mines
    }

    pub fn safes(&self) -> &BTreeSet<Position> {
        &self.safes
    }

    pub fn moves_made(&self) -> &BTreeSet<Position> {
        &self.moves_made
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    fn iter_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
    }
}
