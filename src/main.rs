//! Gomoku AI engine CLI
//!
//! - `gomoku solve [FILE]` - Read a JSON move request (stdin if no file) and
//!   print the JSON response
//! - `gomoku demo` - Run canned scenarios through both searches
//!
//! Set `RUST_LOG=debug` to see search diagnostics on stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gomoku::board::DEFAULT_BOARD_SIZE;
use gomoku::protocol::handle_json;
use gomoku::{AIEngine, Algorithm, Board, EngineConfig, MoveResult, Pos, RuleKind, Stone};

/// Gomoku move engine (Freestyle and Renju)
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the minimax depth
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// Override the MCTS iteration count
    #[arg(long, global = true)]
    iterations: Option<u32>,

    /// Override the MCTS random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a JSON move request and print the JSON response
    Solve {
        /// Request file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
    /// Run canned scenarios
    Demo {
        /// Ruleset for the scenarios
        #[arg(long, default_value = "renju")]
        rule: RuleKind,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Solve { input, pretty }) => solve(&config, input, pretty),
        Some(Commands::Demo { rule }) => {
            run_demo(&config, rule);
            Ok(())
        }
        None => {
            run_demo(&config, RuleKind::Renju);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.minimax_depth = depth;
    }
    if let Some(iterations) = cli.iterations {
        config.mcts_iterations = iterations;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate().context("invalid command-line overrides")?;
    Ok(config)
}

fn solve(config: &EngineConfig, input: Option<PathBuf>, pretty: bool) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading request from {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading request from stdin")?;
            text
        }
    };

    let response = handle_json(config, &text);
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");
    Ok(())
}

fn run_demo(config: &EngineConfig, rule: RuleKind) {
    println!("===========================================");
    println!("       Gomoku AI Engine ({rule})");
    println!("===========================================\n");

    let engine = AIEngine::with_config(config.clone());

    println!("--- Scenario 1: Empty Board ---");
    let board = Board::square(DEFAULT_BOARD_SIZE);
    run_scenario(&engine, &board, rule, "center (7, 7)");

    println!("\n--- Scenario 2: Find Winning Move ---");
    let mut board = Board::square(DEFAULT_BOARD_SIZE);
    for c in 3..7 {
        board.place_stone(Pos::new(7, c), Stone::Black);
    }
    for c in 3..6 {
        board.place_stone(Pos::new(9, c), Stone::White);
    }
    board.place_stone(Pos::new(7, 2), Stone::White);
    run_scenario(&engine, &board, rule, "(7, 7) completes five");

    println!("\n--- Scenario 3: Block Open Four ---");
    let mut board = Board::square(DEFAULT_BOARD_SIZE);
    for c in 5..9 {
        board.place_stone(Pos::new(7, c), Stone::Black);
    }
    for pos in [Pos::new(0, 0), Pos::new(0, 14), Pos::new(14, 0)] {
        board.place_stone(pos, Stone::White);
    }
    run_scenario(&engine, &board, rule, "(7, 4) or (7, 9)");

    println!("\n--- Scenario 4: Finished Game ---");
    let mut board = Board::square(DEFAULT_BOARD_SIZE);
    for r in 2..7 {
        board.place_stone(Pos::new(r, 10), Stone::White);
    }
    for c in 0..6 {
        board.place_stone(Pos::new(12, c * 2), Stone::Black);
    }
    run_scenario(&engine, &board, rule, "White already won");

    println!("\n===========================================");
    println!("          All Scenarios Completed!");
    println!("===========================================");
}

fn run_scenario(engine: &AIEngine, board: &Board, rule: RuleKind, expected: &str) {
    println!("{board}");
    for algorithm in [Algorithm::Minimax, Algorithm::Mcts] {
        let result = engine.get_move_with_stats(board, rule, algorithm);
        print_result(&result);
    }
    println!("  Expected: {expected}");
}

fn print_result(result: &MoveResult) {
    match result.best_move {
        Some(m) => println!(
            "  [{}] {} plays ({}, {})  score {}  nodes {}  {}ms",
            result.algorithm,
            result.player,
            m.row,
            m.col,
            result.score,
            result.nodes,
            result.time_ms
        ),
        None => println!(
            "  [{}] {:?} ({})  {}ms",
            result.algorithm, result.status, result.player, result.time_ms
        ),
    }
}
