use clap::Parser;
use hexsweeper::{
    Action, FrameInput, Game, GameConfig, GameError, GameState, Position, RenderState,
};
use itertools::Itertools;
use std::io::{self, Write};

/// Hex grid minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[arg(long, default_value_t = 11)]
    width: usize,
    #[arg(long, default_value_t = 12)]
    height: usize,
    /// Fraction of tiles holding a mine
    #[arg(long, default_value_t = 0.2)]
    density: f64,
    #[arg(long, default_value_t = 42069)]
    seed: u64,
    /// Log filter such as "debug" or "hexsweeper=trace"; falls back to RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

enum Command {
    Act(usize, Action),
    Reset,
    Quit,
}

fn main() {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    match run_game(&args) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn init_logging(filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    match filter.map(str::to_owned).or_else(|| std::env::var("RUST_LOG").ok()) {
        Some(filter) => {
            builder.parse_filters(&filter);
        }
        None => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    builder.init();
}

fn run_game(args: &Args) -> Result<(), GameError> {
    let config = GameConfig {
        width: args.width,
        height: args.height,
        mine_density: args.density,
        seed: args.seed,
        diameter: None,
    };
    let mut game = Game::new(config)?;

    loop {
        print_board(&game);

        let Some(command) = get_user_input(&game) else {
            continue;
        };

        let input = match command {
            Command::Quit => return Ok(()),
            Command::Reset => FrameInput {
                reset: true,
                ..FrameInput::default()
            },
            Command::Act(index, action) => FrameInput {
                cursor: Some(game.anchor(index)),
                sweep: action == Action::Sweep,
                flag: action == Action::Flag,
                reset: false,
            },
        };

        // release first so the press registers as a fresh edge
        game.frame(&FrameInput {
            cursor: input.cursor,
            ..FrameInput::default()
        });
        if game.frame(&input) == GameState::Exploding {
            println!("Boom!");
        }

        let frames = game.advance_until_idle();
        log::debug!("settled after {frames} frames");

        if game.is_won() {
            print_board(&game);
            println!("Board cleared! Enter 'r' for a new one.");
        }
    }
}

fn symbol(state: RenderState) -> char {
    match state {
        RenderState::Hidden => '.',
        RenderState::Flagged => 'F',
        RenderState::Detonated => '*',
        RenderState::Revealed(0) => ' ',
        RenderState::Revealed(n) => char::from(b'0' + n),
    }
}

fn print_board(game: &Game) {
    let grid = game.board().grid();

    // Row 0 sits at the bottom of the screen, odd rows shifted half a cell
    for y in (0..grid.height()).rev() {
        let indent = if y % 2 == 1 { " " } else { "" };
        let cells = grid
            .row(y)
            .map(|index| symbol(game.tile_view(index).render_state()))
            .join(" ");
        println!("{:>3} {}{}", y, indent, cells);
    }
    println!("    {}", (0..grid.width()).map(|x| x % 10).join(" "));
}

fn get_user_input(game: &Game) -> Option<Command> {
    print!("Enter command (s x y | f x y | r | q): ");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input).ok()? == 0 {
        return Some(Command::Quit);
    }

    let mut parts = input.split_whitespace();
    let action = match parts.next()? {
        "q" => return Some(Command::Quit),
        "r" => return Some(Command::Reset),
        "s" => Action::Sweep,
        "f" => Action::Flag,
        _ => {
            println!("Invalid command. Use 's' to sweep, 'f' to flag, 'r' to reset, 'q' to quit");
            return None;
        }
    };

    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;

    match game.board().grid().index_of(Position::new(x, y)) {
        Some(index) => Some(Command::Act(index, action)),
        None => {
            println!("Position out of bounds");
            None
        }
    }
}
