//! Append-only audit trail of game transitions.
//!
//! Every transition of the authoritative state appends exactly one event,
//! each rendered as one line. Simulation copies carry a detached log that
//! records nothing.

use std::fmt;

use dalmuti_core::SeatId;
use serde::Serialize;

use crate::Card;

/// One state transition.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Dealt {
        num_players: usize,
        first: SeatId,
        first_name: String,
    },
    Played {
        seat: SeatId,
        name: String,
        rank: u8,
        count: u8,
        jokers: u8,
    },
    Passed {
        seat: SeatId,
        name: String,
        auto: bool,
    },
    RoundReset {
        leader: SeatId,
        name: String,
    },
    Won {
        seat: SeatId,
        name: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Dealt {
                num_players,
                first_name,
                ..
            } => write!(
                f,
                "--- New game: {} seats dealt, first turn: {} ---",
                num_players, first_name
            ),
            GameEvent::Played {
                name,
                rank,
                count,
                jokers,
                ..
            } => {
                let shown = if *rank == Card::JOKER_RANK {
                    "J".to_string()
                } else {
                    rank.to_string()
                };
                write!(f, "{} plays {}x card {}", name, count, shown)?;
                if *jokers > 0 && *rank != Card::JOKER_RANK {
                    write!(f, " ({} as joker)", jokers)?;
                }
                write!(f, ".")
            }
            GameEvent::Passed { name, auto, .. } => {
                if *auto {
                    write!(f, "{} auto-passes.", name)
                } else {
                    write!(f, "{} passes.", name)
                }
            }
            GameEvent::RoundReset { name, .. } => {
                write!(f, "--- New round starts, {} leads ---", name)
            }
            GameEvent::Won { name, .. } => write!(f, "{} wins the game!", name),
        }
    }
}

/// Chronological list of events.
#[derive(Clone, Debug)]
pub struct EventLog {
    events: Vec<GameEvent>,
    recording: bool,
}

impl EventLog {
    /// A log that records.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            recording: true,
        }
    }

    /// A log that silently drops everything.
    pub fn detached() -> Self {
        Self {
            events: Vec::new(),
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Append an event; the closure only runs when recording.
    pub(crate) fn record(&mut self, event: impl FnOnce() -> GameEvent) {
        if self.recording {
            self.events.push(event());
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_log_records_nothing() {
        let mut log = EventLog::detached();
        log.record(|| GameEvent::Won {
            seat: 0,
            name: "AI 1".into(),
        });
        assert!(log.is_empty());
        assert!(!log.is_recording());
    }

    #[test]
    fn test_lines() {
        let mut log = EventLog::new();
        log.record(|| GameEvent::Played {
            seat: 1,
            name: "AI 1".into(),
            rank: 4,
            count: 3,
            jokers: 1,
        });
        log.record(|| GameEvent::Passed {
            seat: 2,
            name: "You".into(),
            auto: false,
        });
        log.record(|| GameEvent::Passed {
            seat: 2,
            name: "You".into(),
            auto: true,
        });
        assert_eq!(
            log.lines(),
            vec![
                "AI 1 plays 3x card 4 (1 as joker).",
                "You passes.",
                "You auto-passes.",
            ]
        );
    }

    #[test]
    fn test_joker_play_line() {
        let event = GameEvent::Played {
            seat: 0,
            name: "AI 1".into(),
            rank: 13,
            count: 2,
            jokers: 2,
        };
        assert_eq!(event.to_string(), "AI 1 plays 2x card J.");
    }
}
