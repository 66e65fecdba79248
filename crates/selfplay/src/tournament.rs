//! Seeded AI-vs-AI games and their tally.

use anyhow::{bail, Result};
use dalmuti_ai::AiPlayer;
use dalmuti_core::SeatId;
use dalmuti_game::{GameEvent, GameState, Personality, SeatConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

/// Plies after which a game is abandoned as stuck.
const MAX_PLIES: usize = 10_000;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: SeatId,
    pub plies: usize,
}

/// Play one game to the end. Returns the final state.
pub fn play_game(seats: &[Personality], iterations: usize, seed: u64) -> Result<GameState> {
    let configs: Vec<_> = seats.iter().map(|&p| SeatConfig::ai(p)).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new_game(&configs, &mut rng)?;
    let mut players: Vec<_> = seats
        .iter()
        .enumerate()
        .map(|(i, &p)| AiPlayer::new(p, iterations, seed.wrapping_add(1 + i as u64)))
        .collect();

    for _ in 0..MAX_PLIES {
        if state.is_game_over() {
            return Ok(state);
        }
        let seat = state.current_seat();
        players[seat].play_turn(&mut state)?;
    }
    bail!("game with seed {} did not finish in {} plies", seed, MAX_PLIES)
}

/// Wins per seat over a set of games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub seats: Vec<Personality>,
    pub wins: Vec<usize>,
    pub games: usize,
    pub plies: usize,
}

impl Standings {
    pub fn win_rate(&self, seat: SeatId) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.wins[seat] as f32 / self.games as f32
        }
    }

    pub fn avg_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.plies as f64 / self.games as f64
        }
    }
}

/// Play `games` seeded games in parallel and tally the winners.
pub fn run_tournament(
    seats: &[Personality],
    games: usize,
    iterations: usize,
    seed: u64,
) -> Result<Standings> {
    let outcomes: Vec<GameOutcome> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            let state = play_game(seats, iterations, game_seed)?;
            let winner = state
                .winner()
                .expect("BUG: finished game without a winner");
            debug!(game = i, winner, "game finished");
            let plies = state
                .log()
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Played { .. } | GameEvent::Passed { .. }))
                .count();
            Ok(GameOutcome { winner, plies })
        })
        .collect::<Result<_>>()?;

    let mut wins = vec![0; seats.len()];
    for outcome in &outcomes {
        wins[outcome.winner] += 1;
    }
    Ok(Standings {
        seats: seats.to_vec(),
        wins,
        games,
        plies: outcomes.iter().map(|o| o.plies).sum(),
    })
}
