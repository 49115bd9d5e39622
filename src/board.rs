use crate::{GameError, Position};
use rand::prelude::*;
use std::collections::HashSet;

/// Ground-truth mine field. Knows where the mines are; reveal and flag
/// state live in [`crate::Game`].
#[derive(Debug)]
pub struct Board {
    mines: HashSet<Position>,
    width: u32,
    height: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, mines_count: u32) -> Result<Self, GameError> {
        Self::with_rng(width, height, mines_count, &mut rand::thread_rng())
    }

    /// Places `mines_count` mines uniformly at random using the supplied
    /// generator, so seeded boards are reproducible.
    pub fn with_rng(
        width: u32,
        height: u32,
        mines_count: u32,
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        if mines_count >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: mines_count,
            });
        }

        let mut mines = HashSet::new();
        while mines.len() < mines_count as usize {
            let x = rng.gen_range(0..width) as i32;
            let y = rng.gen_range(0..height) as i32;
            mines.insert(Position::new(x, y));
        }

        Ok(Board {
            mines,
            width,
            height,
        })
    }

    /// Builds a board with an exact mine layout. Positions must be in bounds.
    pub fn with_mines(
        width: u32,
        height: u32,
        mines: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GameError> {
        let mut board = Board {
            mines: HashSet::new(),
            width,
            height,
        };
        for pos in mines {
            if !board.is_within_bounds(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            board.mines.insert(pos);
        }
        if board.mines.len() as u32 >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: board.mines.len() as u32,
            });
        }
        Ok(board)
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn is_mine(&self, pos: Position) -> bool {
        self.mines.contains(&pos)
    }

    /// Number of mines within one row and column of `pos`, the cell itself
    /// excluded and out-of-bounds neighbors clipped.
    pub fn nearby_mines(&self, pos: Position) -> u8 {
        pos.neighbors()
            .filter(|p| self.is_within_bounds(*p))
            .filter(|p| self.mines.contains(p))
            .count() as u8
    }

    /// All board positions in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.mines.iter().copied()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mines_count(&self) -> u32 {
        self.mines.len() as u32
    }
}
