//! Seats and who controls them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Hand;

/// Tie-break rules for the non-search computer players.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicStyle {
    Aggressive,
    Defensive,
    Balanced,
}

/// How a computer seat picks its moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Heuristic(HeuristicStyle),
    Mcts,
    MctsPro,
}

impl Personality {
    pub const BALANCED: Self = Personality::Heuristic(HeuristicStyle::Balanced);
    pub const AGGRESSIVE: Self = Personality::Heuristic(HeuristicStyle::Aggressive);
    pub const DEFENSIVE: Self = Personality::Heuristic(HeuristicStyle::Defensive);
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Personality::Heuristic(HeuristicStyle::Aggressive) => "aggressive",
            Personality::Heuristic(HeuristicStyle::Defensive) => "defensive",
            Personality::Heuristic(HeuristicStyle::Balanced) => "balanced",
            Personality::Mcts => "mcts",
            Personality::MctsPro => "mcts_pro",
        };
        f.write_str(name)
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "aggressive" => Ok(Self::AGGRESSIVE),
            "defensive" => Ok(Self::DEFENSIVE),
            "balanced" => Ok(Self::BALANCED),
            "mcts" => Ok(Personality::Mcts),
            "mcts_pro" | "pro" => Ok(Personality::MctsPro),
            other => Err(format!(
                "unknown personality '{}' (expected aggressive, defensive, balanced, mcts or mcts_pro)",
                other
            )),
        }
    }
}

/// Who sits in a seat.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Human,
    Ai(Personality),
}

/// Configuration for one seat at game creation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SeatConfig {
    pub kind: SeatKind,
}

impl SeatConfig {
    pub const fn human() -> Self {
        Self {
            kind: SeatKind::Human,
        }
    }

    pub const fn ai(personality: Personality) -> Self {
        Self {
            kind: SeatKind::Ai(personality),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, SeatKind::Human)
    }

    pub fn personality(&self) -> Option<Personality> {
        match self.kind {
            SeatKind::Human => None,
            SeatKind::Ai(p) => Some(p),
        }
    }
}

/// A seat at the table and the hand it owns.
#[derive(Clone, Debug)]
pub struct Seat {
    name: Arc<str>,
    config: SeatConfig,
    pub(crate) hand: Hand,
}

impl Seat {
    pub(crate) fn new(name: String, config: SeatConfig, hand: Hand) -> Self {
        Self {
            name: name.into(),
            config,
            hand,
        }
    }

    /// Display names: "You" for the human, "AI n" for computers.
    ///
    /// Computer seats are numbered by index when a human is present (the
    /// human takes a slot), and from 1 otherwise.
    pub(crate) fn names(configs: &[SeatConfig]) -> Vec<String> {
        let has_human = configs.iter().any(SeatConfig::is_human);
        configs
            .iter()
            .enumerate()
            .map(|(i, config)| {
                if config.is_human() {
                    "You".to_string()
                } else if has_human {
                    format!("AI {}", i)
                } else {
                    format!("AI {}", i + 1)
                }
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> SeatConfig {
        self.config
    }

    pub fn is_human(&self) -> bool {
        self.config.is_human()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// True once the seat has shed every card.
    pub fn is_out(&self) -> bool {
        self.hand.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personality_parse_roundtrip() {
        for p in [
            Personality::AGGRESSIVE,
            Personality::DEFENSIVE,
            Personality::BALANCED,
            Personality::Mcts,
            Personality::MctsPro,
        ] {
            assert_eq!(p.to_string().parse::<Personality>(), Ok(p));
        }
        assert_eq!("MCTS-Pro".parse::<Personality>(), Ok(Personality::MctsPro));
        assert!("random".parse::<Personality>().is_err());
    }

    #[test]
    fn test_names_with_human() {
        let configs = [
            SeatConfig::human(),
            SeatConfig::ai(Personality::Mcts),
            SeatConfig::ai(Personality::BALANCED),
        ];
        assert_eq!(Seat::names(&configs), vec!["You", "AI 1", "AI 2"]);
    }

    #[test]
    fn test_names_all_ai() {
        let configs = [SeatConfig::ai(Personality::Mcts); 3];
        assert_eq!(Seat::names(&configs), vec!["AI 1", "AI 2", "AI 3"]);
    }
}
