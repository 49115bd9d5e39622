use crate::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Game is over; no further moves are possible")]
    GameOver,
    #[error("Cell at {0:?} is already revealed")]
    AlreadyRevealed(Position),
    #[error("Too many mines ({mines}) for board size {width}x{height}")]
    TooManyMines { width: u32, height: u32, mines: u32 },
    #[error("Reported count {count} at {cell:?} exceeds its {neighbors} in-bounds neighbors")]
    ImpossibleCount {
        cell: Position,
        count: u8,
        neighbors: usize,
    },
}
