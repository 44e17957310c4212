//! Terminal driver for the center game engine.
//!
//! ## Usage
//!
//! - `center` - Search bot against weak bot
//! - `center watch` - Two bots play each other
//! - `center play` - Play against a bot on stdin
//! - `center best-move B.... ..... ..... ..... .....` - Search one position
//! - `center legal B.... ..... ..... ..... .....` - List legal placements
//!
//! Set `RUST_LOG=debug` to see each completed search depth.

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use log::warn;

use center::config::DEFAULT_BOARD_SIZE;
use center::{
    legal_moves, Board, Engine, GameConfig, GameOutcome, GameState, Player, PlayerConfig,
    PlayerKind, Pos,
};

/// Center game: reach the middle of the board first
#[derive(Parser)]
#[command(name = "center")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two bots play a full game
    Watch {
        /// Strategy for Black: human, weak or search
        #[arg(long, default_value = "search")]
        black: PlayerKind,
        /// Strategy for White: human, weak or search
        #[arg(long, default_value = "search")]
        white: PlayerKind,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Play against a bot, entering moves as `row col`
    Play {
        /// Your color
        #[arg(long, default_value = "black")]
        human: Player,
        /// Opponent strategy: weak or search
        #[arg(long, default_value = "search")]
        bot: PlayerKind,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Search a position and print the chosen move with diagnostics
    BestMove {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print the legal placements in a position
    Legal {
        #[command(flatten)]
        position: PositionArgs,
    },
}

#[derive(Args)]
struct GameArgs {
    /// Board size (odd, at least 3)
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Seed for the bots' random choices
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Args)]
struct SearchArgs {
    /// Thinking time per bot move in milliseconds
    #[arg(short, long = "time-ms", default_value_t = 1000)]
    time_ms: u64,
    /// Cap on iterative deepening
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,
}

impl SearchArgs {
    fn player(&self, kind: PlayerKind) -> PlayerConfig {
        let config = PlayerConfig::new(kind).with_time_limit_ms(self.time_ms);
        match self.max_depth {
            Some(depth) => config.with_max_depth(depth),
            None => config,
        }
    }
}

#[derive(Args)]
struct PositionArgs {
    /// Board rows, e.g. `B.... ..W.. ..... ..... .....`
    #[arg(required = true)]
    rows: Vec<String>,
    /// Player to move
    #[arg(short, long, default_value = "black")]
    player: Player,
}

impl PositionArgs {
    fn board(&self) -> Result<Board, Box<dyn Error>> {
        Ok(Board::from_rows(&self.rows)?)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Watch { black, white, game }) => {
            let config = game_config(&game, black, white);
            run_watch(config)
        }
        Some(Commands::Play { human, bot, game }) => {
            let (black, white) = match human {
                Player::Black => (PlayerKind::Human, bot),
                Player::White => (bot, PlayerKind::Human),
            };
            let config = game_config(&game, black, white);
            run_play(config)
        }
        Some(Commands::BestMove { position, search }) => run_best_move(&position, &search),
        Some(Commands::Legal { position }) => run_legal(&position),
        None => run_watch(GameConfig::new(
            DEFAULT_BOARD_SIZE,
            PlayerConfig::new(PlayerKind::SearchBot),
            PlayerConfig::new(PlayerKind::WeakBot),
        )),
    }
}

fn game_config(args: &GameArgs, black: PlayerKind, white: PlayerKind) -> GameConfig {
    let config = GameConfig::new(args.size, args.search.player(black), args.search.player(white));
    match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

fn run_watch(config: GameConfig) -> Result<(), Box<dyn Error>> {
    if !config.black.kind.is_bot() || !config.white.kind.is_bot() {
        return Err("watch needs a bot on both sides".into());
    }
    let mut state = GameState::new(config)?;
    println!("{}", state.board);

    while !state.is_over() {
        let mover = state.current_turn;
        if !state.play_bot_turn() {
            warn!("{} did not produce a move", mover);
            break;
        }
        print_bot_move(&state, mover);
        println!("{}", state.board);
    }

    print_outcome(&state);
    Ok(())
}

fn run_play(config: GameConfig) -> Result<(), Box<dyn Error>> {
    let mut state = GameState::new(config)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_over() {
        let mover = state.current_turn;
        if state.is_bot_turn() {
            if !state.play_bot_turn() {
                warn!("{} did not produce a move", mover);
                break;
            }
            print_bot_move(&state, mover);
            continue;
        }

        println!("{}", render(&state.board, &state.legal_moves()));
        print!("{} to move (row col, or q): ", mover);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        match parse_pos(line) {
            Some(pos) => {
                if let Err(err) = state.try_place_stone(pos) {
                    println!("{}", err);
                }
            }
            None => println!("expected `row col`, got {:?}", line),
        }
    }

    println!("{}", state.board);
    print_outcome(&state);
    Ok(())
}

fn run_best_move(position: &PositionArgs, search: &SearchArgs) -> Result<(), Box<dyn Error>> {
    let board = position.board()?;
    let limits = search.player(PlayerKind::SearchBot).limits();
    let mut engine = Engine::new(limits);
    let result = engine.request_move(&board, position.player);

    match result.best_move {
        Some(pos) => println!("{} plays {}", position.player, pos),
        None => println!("{} has no move", position.player),
    }
    println!("decision: {}", result.decision);
    if let Some(score) = result.score {
        println!("score: {}", score);
    }
    println!(
        "depth: {}  nodes: {}  time: {}ms",
        result.depth, result.nodes, result.time_ms
    );
    if !result.principal_variation.is_empty() {
        println!("line: {}", format_line(&result.principal_variation));
        println!(
            "{}",
            board.with_line(&result.principal_variation, position.player)
        );
    }
    Ok(())
}

fn run_legal(position: &PositionArgs) -> Result<(), Box<dyn Error>> {
    let board = position.board()?;
    let moves = legal_moves(&board, position.player);
    println!("{}", render(&board, &moves));
    println!("{} legal moves for {}: {}", moves.len(), position.player, format_line(&moves));
    Ok(())
}

fn print_bot_move(state: &GameState, mover: Player) {
    let Some(result) = state.last_bot_result.as_ref() else {
        return;
    };
    match result.best_move {
        Some(pos) => println!(
            "{} plays {} ({}, depth {}, {} nodes, {}ms)",
            mover, pos, result.decision, result.depth, result.nodes, result.time_ms
        ),
        None => println!("{} passes ({})", mover, result.decision),
    }
}

fn print_outcome(state: &GameState) {
    match state.outcome {
        Some(GameOutcome::Win(player)) => println!("{} wins", player),
        Some(GameOutcome::Draw) => println!("Draw"),
        None => println!("Game abandoned"),
    }
}

/// Board text with `*` on the given empty cells
fn render(board: &Board, marks: &[Pos]) -> String {
    let mut out = String::new();
    for row in 0..board.size() {
        for col in 0..board.size() {
            let pos = Pos::new(row as u8, col as u8);
            let c = match board.get(pos) {
                Some(player) => player.symbol(),
                None if marks.contains(&pos) => '*',
                None => '.',
            };
            if col > 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn format_line(moves: &[Pos]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_pos(text: &str) -> Option<Pos> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Pos::new(row, col))
}
