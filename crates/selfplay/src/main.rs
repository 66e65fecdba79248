//! Dalmuti AI runner.
//!
//! Plays single narrated games, seeded AI-vs-AI tournaments, and records
//! per-decision strategy logs as JSON lines.

mod strategy;
mod tournament;

use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use dalmuti_ai::DEFAULT_ITERATIONS;
use dalmuti_core::{MAX_SEATS, MIN_SEATS};
use dalmuti_game::Personality;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Dalmuti self-play and evaluation tool.
#[derive(Parser)]
#[command(name = "dalmuti-selfplay")]
#[command(about = "Play Dalmuti games between AI personalities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print its log.
    Play {
        /// Personality per seat, comma separated
        /// (balanced, aggressive, defensive, mcts, mcts_pro).
        #[arg(short, long, value_delimiter = ',', default_value = "mcts_pro,balanced,aggressive,defensive")]
        seats: Vec<Personality>,

        /// Search iterations per decision.
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Play many games in parallel and report win rates per seat.
    Tournament {
        /// Personality per seat, comma separated.
        #[arg(short, long, value_delimiter = ',', default_value = "mcts_pro,mcts,balanced,aggressive")]
        seats: Vec<Personality>,

        /// Number of games.
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Search iterations per decision.
        #[arg(short, long, default_value = "200")]
        iterations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Append per-decision records of all-MCTS-Pro games to a JSONL file.
    StrategyLog {
        /// Player counts to simulate, comma separated.
        #[arg(short, long, value_delimiter = ',', default_value = "4,5,6,7")]
        players: Vec<usize>,

        /// Games per player count.
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Search iterations per decision.
        #[arg(short, long, default_value = "500")]
        iterations: usize,

        /// Output file, appended to.
        #[arg(short, long, default_value = "dalmuti_strategy_log.jsonl")]
        output: PathBuf,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn check_seats(count: usize) -> Result<()> {
    ensure!(
        (MIN_SEATS..=MAX_SEATS).contains(&count),
        "need between {} and {} seats, got {}",
        MIN_SEATS,
        MAX_SEATS,
        count
    );
    Ok(())
}

fn cmd_play(seats: &[Personality], iterations: usize, seed: u64) -> Result<()> {
    check_seats(seats.len())?;
    let state = tournament::play_game(seats, iterations, seed)?;
    for line in state.log().lines() {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_tournament(seats: &[Personality], games: usize, iterations: usize, seed: u64) -> Result<()> {
    check_seats(seats.len())?;
    println!(
        "Playing {} games, {} seats, {} iterations per decision",
        games,
        seats.len(),
        iterations
    );
    let start = Instant::now();
    let standings = tournament::run_tournament(seats, games, iterations, seed)?;

    println!("\n================================================");
    println!("RESULTS");
    println!("================================================");
    for (seat, personality) in standings.seats.iter().enumerate() {
        println!(
            "Seat {} ({:<10}) wins: {:>4} ({:.1}%)",
            seat,
            personality.to_string(),
            standings.wins[seat],
            standings.win_rate(seat) * 100.0
        );
    }
    println!("------------------------------------------------");
    println!("Average game length: {:.1} moves", standings.avg_plies());
    println!("Completed in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn cmd_strategy_log(
    players: &[usize],
    games: usize,
    iterations: usize,
    output: &PathBuf,
    seed: u64,
) -> Result<()> {
    for &n in players {
        check_seats(n)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .with_context(|| format!("failed to open {:?}", output))?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for &n in players {
        info!(players = n, games, "simulating setup");
        for i in 0..games {
            let game_seed = seed.wrapping_add((n * 100_000 + i) as u64);
            let records = strategy::record_game(n, i, iterations, game_seed)?;
            let winner = records
                .iter()
                .find(|r| r.outcome_win == 1)
                .map(|r| r.player_index);
            strategy::write_jsonl(&mut out, &records)
                .with_context(|| format!("failed to write {:?}", output))?;
            written += records.len();
            match winner {
                Some(w) => println!("Game {}/{} finished. Winner: Player {}", i + 1, games, w),
                None => println!("Game {}/{} finished.", i + 1, games),
            }
        }
    }
    println!("Wrote {} records to {:?}", written, output);
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            seats,
            iterations,
            seed,
        } => cmd_play(&seats, iterations, seed),
        Commands::Tournament {
            seats,
            games,
            iterations,
            seed,
        } => cmd_tournament(&seats, games, iterations, seed),
        Commands::StrategyLog {
            players,
            games,
            iterations,
            output,
            seed,
        } => cmd_strategy_log(&players, games, iterations, &output, seed),
    }
}
