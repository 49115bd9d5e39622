use minesweeper_ai::{Game, GameError, GameState, MinesweeperAi, Position, Reveal, Tile};

fn main() {
    let (width, height, mines) = parse_args();
    match run_game(width, height, mines) {
        Ok(GameState::Won) => println!("The agent cleared the board!"),
        Ok(GameState::Lost) => println!("Boom. The agent hit a mine."),
        Ok(GameState::Playing) => println!("No moves left to make."),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn parse_args() -> (u32, u32, u32) {
    let mut args = std::env::args().skip(1).filter_map(|a| a.parse().ok());
    let width = args.next().unwrap_or(8);
    let height = args.next().unwrap_or(8);
    let mines = args.next().unwrap_or(8);
    (width, height, mines)
}

fn run_game(width: u32, height: u32, mines: u32) -> Result<GameState, GameError> {
    let mut game = Game::new(width, height, mines)?;
    let mut ai = MinesweeperAi::new(width, height);
    let mut rng = rand::thread_rng();

    while game.state() == GameState::Playing {
        let cell = match ai.make_safe_move() {
            Some(cell) => {
                println!("Safe move: ({}, {})", cell.x, cell.y);
                cell
            }
            None => match ai.make_random_move(&mut rng) {
                Some(cell) => {
                    println!("No known safe moves; trying ({}, {})", cell.x, cell.y);
                    cell
                }
                None => break,
            },
        };

        match game.reveal(cell)? {
            Reveal::Mine => break,
            Reveal::Clear(count) => ai.add_knowledge(cell, count)?,
        }

        // Keep the display in sync with what the agent has deduced.
        if game.state() == GameState::Playing {
            for &mine in ai.mines() {
                if game.tile(mine)? == Tile::Hidden {
                    game.toggle_flag(mine)?;
                }
            }
        }

        print_board(&game);
    }

    print_board(&game);
    Ok(game.state())
}

fn print_board(game: &Game) {
    let (width, height) = game.dimensions();

    print!("  ");
    for x in 0..width {
        print!("{} ", x % 10);
    }
    println!();

    for y in 0..height {
        print!("{} ", y % 10);
        for x in 0..width {
            let pos = Position::new(x as i32, y as i32);
            match game.tile(pos).expect("position is in bounds") {
                Tile::Hidden => print!("□ "),
                Tile::Flagged => print!("⚑ "),
                Tile::Revealed(0) => print!("  "),
                Tile::Revealed(n) => print!("{} ", n),
            }
        }
        println!();
    }
    println!();
}
