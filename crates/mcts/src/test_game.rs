//! A tiny N-seat race game for unit tests.
//!
//! Seats take turns adding 1 or 2 to a shared total; whoever lands exactly
//! on the target wins.

use dalmuti_core::{DalmutiError, Determinize, Game, Result, SeatId};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct RaceTo {
    target: u8,
    seats: usize,
}

impl RaceTo {
    pub fn new(target: u8, seats: usize) -> Self {
        Self { target, seats }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceState {
    pub total: u8,
    pub to_move: SeatId,
    pub winner: Option<SeatId>,
}

impl RaceState {
    pub fn start() -> Self {
        Self {
            total: 0,
            to_move: 0,
            winner: None,
        }
    }
}

impl Game for RaceTo {
    type State = RaceState;
    type Action = u8;

    fn legal_actions(&self, state: &RaceState) -> Vec<u8> {
        if state.winner.is_some() {
            return Vec::new();
        }
        (1..=2).filter(|&a| state.total + a <= self.target).collect()
    }

    fn apply(&self, state: &RaceState, action: u8) -> RaceState {
        let total = state.total + action;
        RaceState {
            total,
            to_move: (state.to_move + 1) % self.seats,
            winner: (total == self.target).then_some(state.to_move),
        }
    }

    fn is_terminal(&self, state: &RaceState) -> bool {
        state.winner.is_some()
    }

    fn current_seat(&self, state: &RaceState) -> SeatId {
        state.to_move
    }

    fn winner(&self, state: &RaceState) -> Option<SeatId> {
        state.winner
    }
}

impl Determinize for RaceTo {
    fn determinize<R: Rng + ?Sized>(
        &self,
        state: &RaceState,
        _observer: SeatId,
        _rng: &mut R,
    ) -> Result<RaceState> {
        Ok(state.clone())
    }
}

/// A race whose hidden information can never be sampled.
#[derive(Clone, Debug)]
pub struct Unsampleable(pub RaceTo);

impl Game for Unsampleable {
    type State = RaceState;
    type Action = u8;

    fn legal_actions(&self, state: &RaceState) -> Vec<u8> {
        self.0.legal_actions(state)
    }

    fn apply(&self, state: &RaceState, action: u8) -> RaceState {
        self.0.apply(state, action)
    }

    fn is_terminal(&self, state: &RaceState) -> bool {
        self.0.is_terminal(state)
    }

    fn current_seat(&self, state: &RaceState) -> SeatId {
        self.0.current_seat(state)
    }

    fn winner(&self, state: &RaceState) -> Option<SeatId> {
        self.0.winner(state)
    }
}

impl Determinize for Unsampleable {
    fn determinize<R: Rng + ?Sized>(
        &self,
        _state: &RaceState,
        _observer: SeatId,
        _rng: &mut R,
    ) -> Result<RaceState> {
        Err(DalmutiError::InconsistentCardPool("nothing to deal".into()))
    }
}
