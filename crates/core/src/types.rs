//! Shared domain types.
//!
//! - SeatId: positional seat index
//! - Reward: playout result in [0, 1] from one seat's perspective

/// Positional index of a seat, `0..num_players`.
pub type SeatId = usize;

/// Fewest seats a game accepts.
pub const MIN_SEATS: usize = 2;

/// Most seats a game accepts.
pub const MAX_SEATS: usize = 8;

/// Result of a playout as seen by one seat.
///
/// Invariant: value is in range [0, 1] where 1 is a win for that seat and 0
/// is anything else (another seat won, or the playout was cut short).
///
/// # Example
/// ```
/// use dalmuti_core::Reward;
///
/// assert_eq!(Reward::for_seat(Some(2), 2), Reward::WIN);
/// assert_eq!(Reward::for_seat(None, 2), Reward::LOSS);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reward(f32);

impl Reward {
    /// Reward for a win.
    pub const WIN: Self = Self(1.0);

    /// Reward for a loss or an unfinished playout.
    pub const LOSS: Self = Self(0.0);

    /// Reward for `seat` given the playout's winner.
    pub fn for_seat(winner: Option<usize>, seat: usize) -> Self {
        if winner == Some(seat) {
            Self::WIN
        } else {
            Self::LOSS
        }
    }

    /// Get the underlying value.
    pub fn get(self) -> f32 {
        self.0
    }
}
