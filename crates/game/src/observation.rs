//! What one seat can see, and its flat numeric encoding.

use dalmuti_core::SeatId;
use serde::Serialize;

use crate::deck::RankCounts;
use crate::GameState;

/// The public state plus one seat's own hand.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Observation {
    pub seat: SeatId,
    pub turn: SeatId,
    pub round_lead: SeatId,
    /// Own hand as counts for ranks 1..=13.
    pub hand: [u8; 13],
    /// Card count of every seat, in seat order.
    pub hand_sizes: Vec<usize>,
    pub table_rank: u8,
    pub table_count: u8,
    pub passed: Vec<SeatId>,
    pub consecutive_passes: u32,
    /// Cards no longer in any hand (table and discard pile), ranks 1..=13.
    pub played: [u8; 13],
}

impl Observation {
    pub(crate) fn new(state: &GameState, seat: SeatId) -> Self {
        let mut in_hands = RankCounts::new();
        for s in state.seats() {
            in_hands.add_all(s.hand().cards());
        }
        let full = RankCounts::full_deck().as_array();
        let held = in_hands.as_array();
        let played = std::array::from_fn(|i| full[i] - held[i]);

        Self {
            seat,
            turn: state.current_seat(),
            round_lead: state.round_lead(),
            hand: state.seats()[seat].hand().counts().as_array(),
            hand_sizes: state.hand_sizes(),
            table_rank: state.table().effective_rank(),
            table_count: state.table().count(),
            passed: state.passed().iter().collect(),
            consecutive_passes: state.consecutive_passes(),
            played,
        }
    }

    /// Flat vector for strategy analysis.
    ///
    /// Layout: 13 own-hand counts, the other seats' card counts clockwise
    /// starting after this seat, table rank, table count, number of seats
    /// that passed, then 13 counts of cards out of hands.
    pub fn features(&self) -> Vec<u32> {
        let n = self.hand_sizes.len();
        let mut v = Vec::with_capacity(13 + (n - 1) + 3 + 13);
        v.extend(self.hand.iter().map(|&c| c as u32));
        v.extend((1..n).map(|i| self.hand_sizes[(self.seat + i) % n] as u32));
        v.push(self.table_rank as u32);
        v.push(self.table_count as u32);
        v.push(self.passed.len() as u32);
        v.extend(self.played.iter().map(|&c| c as u32));
        v
    }
}
