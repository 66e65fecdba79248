//! Per-decision records for strategy analysis.
//!
//! Each decision of a finished game becomes one JSON line:
//! `{game_id, turn_number, player_index, state_vector, action, outcome_win}`.

use std::io::Write;

use anyhow::{Context, Result};
use dalmuti_ai::AiPlayer;
use dalmuti_core::SeatId;
use dalmuti_game::{GameState, Move, Personality, SeatConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// One decision and whether the deciding seat went on to win.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub game_id: String,
    pub turn_number: usize,
    pub player_index: SeatId,
    pub state_vector: Vec<u32>,
    pub action: Move,
    pub outcome_win: u8,
}

/// Play one game with every seat searching by determinization and record
/// each decision.
pub fn record_game(
    num_players: usize,
    game_index: usize,
    iterations: usize,
    seed: u64,
) -> Result<Vec<TurnRecord>> {
    let configs = vec![SeatConfig::ai(Personality::MctsPro); num_players];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new_game(&configs, &mut rng)?;
    let mut player = AiPlayer::new(Personality::MctsPro, iterations, seed.wrapping_add(1));

    let game_id = format!("{}p_{}", num_players, game_index);
    let mut records = Vec::new();
    while !state.is_game_over() {
        let seat = state.current_seat();
        let state_vector = state.observe(seat)?.features();
        let action = player
            .play_turn(&mut state)
            .with_context(|| format!("game {} turn {}", game_id, records.len() + 1))?;
        records.push(TurnRecord {
            game_id: game_id.clone(),
            turn_number: records.len() + 1,
            player_index: seat,
            state_vector,
            action,
            outcome_win: 0,
        });
    }

    let winner = state.winner();
    for record in &mut records {
        record.outcome_win = u8::from(winner == Some(record.player_index));
    }
    Ok(records)
}

/// Write records as JSON lines.
pub fn write_jsonl<W: Write>(mut out: W, records: &[TurnRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record).context("failed to encode record")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_game() {
        let records = record_game(4, 0, 5, 42).unwrap();
        assert!(!records.is_empty());

        let winners: Vec<_> = records.iter().filter(|r| r.outcome_win == 1).collect();
        assert!(!winners.is_empty());
        let winner = winners[0].player_index;
        assert!(winners.iter().all(|r| r.player_index == winner));

        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.game_id, "4p_0");
            assert_eq!(record.turn_number, i + 1);
            assert_eq!(record.state_vector.len(), 13 + 3 + 3 + 13);
        }
        // the winner made the last move
        assert_eq!(records.last().unwrap().player_index, winner);
    }

    #[test]
    fn test_jsonl_shape() {
        let record = TurnRecord {
            game_id: "5p_3".into(),
            turn_number: 7,
            player_index: 2,
            state_vector: vec![1, 0, 4],
            action: Move::play(6, 2),
            outcome_win: 1,
        };
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &[record.clone(), record]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["game_id"], "5p_3");
        assert_eq!(value["action"]["action_type"], "play");
        assert_eq!(value["action"]["rank"], 6);
        assert_eq!(value["action"]["count"], 2);
        assert_eq!(value["outcome_win"], 1);
    }

    #[test]
    fn test_jsonl_appends() {
        use std::fs::OpenOptions;

        let file = tempfile::NamedTempFile::new().unwrap();
        let records = record_game(3, 1, 5, 7).unwrap();
        for _ in 0..2 {
            let out = OpenOptions::new().append(true).open(file.path()).unwrap();
            write_jsonl(out, &records).unwrap();
        }
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.lines().count(), records.len() * 2);
        assert!(text.lines().all(|l| l.contains("\"game_id\":\"3p_1\"")));
    }
}
