use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::{Result, SeatId};

/// A turn-based game for N seats that the search crate can plan over.
///
/// The search never mutates a state it was handed: `apply` returns a fresh
/// derived state, leaving the caller's state untouched.
pub trait Game: Clone {
    /// The full game state (every seat's hand included).
    type State: Clone;

    /// A single move by the seat to act.
    type Action: Clone + Copy + Eq + Hash + Debug;

    /// Returns all legal actions for the seat to act.
    ///
    /// Must never be empty for a non-terminal state.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action for the seat to act, returning a new state.
    ///
    /// Only called with actions produced by `legal_actions` for `state`.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns true once the game has a winner.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// The seat whose move it is.
    fn current_seat(&self, state: &Self::State) -> SeatId;

    /// The winning seat, or `None` while the game is running.
    fn winner(&self, state: &Self::State) -> Option<SeatId>;

    /// A move the seat to act is obliged to make without searching, if any.
    fn forced_action(&self, _state: &Self::State) -> Option<Self::Action> {
        None
    }
}

/// A game with hidden information that can sample a concrete world.
pub trait Determinize: Game {
    /// Sample one full-information state consistent with everything
    /// `observer` can see in `state`.
    ///
    /// The observer's own hand and all public cards are kept; every other
    /// seat receives a random hand of its true size drawn from the unseen
    /// cards.
    fn determinize<R: Rng + ?Sized>(
        &self,
        state: &Self::State,
        observer: SeatId,
        rng: &mut R,
    ) -> Result<Self::State>;
}
