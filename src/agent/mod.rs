mod knowledge;
mod sentence;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use knowledge::MinesweeperAi;
pub use sentence::Sentence;
