use crate::{Board, Game, GameState, MinesweeperAi, Position, Reveal};
use rand::prelude::*;
use std::collections::HashSet;

/// Configuration for generated test games
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub mine_density: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            mine_density: 0.15,
        }
    }
}

/// Generates boards with known mine layouts from a seedable source
pub struct GameGenerator {
    config: GameConfig,
    rng: StdRng,
}

impl GameGenerator {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> Board {
        let mines_count = (self.config.width as f64
            * self.config.height as f64
            * self.config.mine_density) as u32;
        Board::with_rng(
            self.config.width,
            self.config.height,
            mines_count,
            &mut self.rng,
        )
        .unwrap()
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<Board> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// What happened over one fully-played game
#[derive(Debug, Default)]
pub struct PlayedGame {
    pub won: bool,
    pub moves: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Cells the agent classified as mines that are not mines
    pub false_mines: usize,
    /// Cells the agent classified as safe that are mines
    pub false_safes: usize,
    /// Safe moves that revealed a mine (must never happen)
    pub unsafe_safe_moves: usize,
}

/// Drives the agent through a complete game, checking its classifications
/// against the board's ground truth after every observation.
pub fn play_game(board: Board, rng: &mut impl Rng) -> PlayedGame {
    let truth: HashSet<Position> = board.mine_positions().collect();
    let (width, height) = board.dimensions();
    let mut game = Game::from_board(board);
    let mut ai = MinesweeperAi::new(width, height);
    let mut outcome = PlayedGame::default();

    while game.state() == GameState::Playing {
        let (cell, was_safe_move) = match ai.make_safe_move() {
            Some(cell) => (cell, true),
            None => match ai.make_random_move(rng) {
                Some(cell) => (cell, false),
                None => break,
            },
        };

        outcome.moves += 1;
        if was_safe_move {
            outcome.safe_moves += 1;
        } else {
            outcome.random_moves += 1;
        }

        match game.reveal(cell).unwrap() {
            Reveal::Mine => {
                if was_safe_move {
                    outcome.unsafe_safe_moves += 1;
                }
                break;
            }
            Reveal::Clear(count) => {
                ai.add_knowledge(cell, count).unwrap();
            }
        }

        outcome.false_mines += ai.mines().iter().filter(|c| !truth.contains(*c)).count();
        outcome.false_safes += ai.safes().iter().filter(|c| truth.contains(*c)).count();
    }

    outcome.won = game.state() == GameState::Won;
    outcome
}

/// Validates one game's outcome; prints a diagnostic and returns false on
/// any soundness violation.
pub fn validate_played_game(outcome: &PlayedGame) -> bool {
    if outcome.false_mines > 0 {
        println!(
            "Agent classified {} safe cell(s) as mines",
            outcome.false_mines
        );
        return false;
    }
    if outcome.false_safes > 0 {
        println!(
            "Agent classified {} mine(s) as safe",
            outcome.false_safes
        );
        return false;
    }
    if outcome.unsafe_safe_moves > 0 {
        println!(
            "Agent made {} supposedly-safe move(s) onto mines",
            outcome.unsafe_safe_moves
        );
        return false;
    }
    true
}
