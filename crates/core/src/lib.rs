//! Dalmuti Core - Game abstractions and common types
//!
//! This crate provides the `Game` and `Determinize` traits that the search
//! crate plans over, plus the error type shared by every crate in the
//! workspace.
//!
//! # Types
//!
//! - [`Game`] - Trait for N-seat turn-based games
//! - [`Determinize`] - Sampling of hidden information for one observer
//! - [`Reward`] - Playout result from one seat's perspective, in [0, 1]
//! - [`SeatId`] - Positional seat index

mod error;
mod game;
mod types;

pub use error::{DalmutiError, Result};
pub use game::{Determinize, Game};
pub use types::{Reward, SeatId, MAX_SEATS, MIN_SEATS};
