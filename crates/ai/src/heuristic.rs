//! Non-search baseline players.
//!
//! Every canonical play is ranked by a fixed comparator for the style and
//! the first one is taken. These players never pass while a play exists.

use std::cmp::Ordering;

use dalmuti_game::{GameState, HeuristicStyle, Move, PlayOption};

/// Weight applied to joker usage by the defensive style.
const DEFENSIVE_JOKER_WEIGHT: u32 = 10;

/// Order two plays for `style`; `Less` means preferred.
fn compare(style: HeuristicStyle, round_start: bool, a: &PlayOption, b: &PlayOption) -> Ordering {
    match style {
        HeuristicStyle::Aggressive => {
            let by_jokers = a.jokers_used.cmp(&b.jokers_used);
            if round_start {
                by_jokers.then(b.count.cmp(&a.count))
            } else {
                by_jokers.then(a.rank.cmp(&b.rank))
            }
        }
        HeuristicStyle::Defensive => {
            let weight = |p: &PlayOption| p.jokers_used as u32 * DEFENSIVE_JOKER_WEIGHT;
            weight(a).cmp(&weight(b)).then(b.rank.cmp(&a.rank))
        }
        HeuristicStyle::Balanced => a
            .jokers_used
            .cmp(&b.jokers_used)
            .then(b.rank.cmp(&a.rank)),
    }
}

/// The seat to act's plays, best first. Ties keep enumeration order.
pub fn rank_plays(state: &GameState, style: HeuristicStyle) -> Vec<PlayOption> {
    let round_start = state.table().is_empty();
    let mut plays = state.play_options_for(state.current_seat());
    plays.sort_by(|a, b| compare(style, round_start, a, b));
    plays
}

/// The move a heuristic player makes; `Pass` if nothing can be played.
pub fn heuristic_move(state: &GameState, style: HeuristicStyle) -> Move {
    rank_plays(state, style)
        .first()
        .map_or(Move::Pass, |p| p.to_move())
}
