//! Property-based tests for the rules engine over seeded random playouts.

use dalmuti_core::{Determinize, Game};
use dalmuti_game::{
    Card, Dalmuti, GameState, Move, Personality, RankCounts, SeatConfig, DECK_SIZE,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Upper bound on plies for any playout; far above the longest real game.
const PLY_LIMIT: usize = 5_000;

// =============================================================================
// Strategies
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn arb_seats() -> impl Strategy<Value = usize> {
    2usize..=8
}

fn configs(n: usize) -> Vec<SeatConfig> {
    vec![SeatConfig::ai(Personality::BALANCED); n]
}

/// Every card in play: all hands, the table and the discard pile.
fn composition(state: &GameState) -> RankCounts {
    let mut all = *state.discard();
    all.add_all(state.table().cards());
    for seat in state.seats() {
        all.add_all(seat.hand().cards());
    }
    all
}

/// Play uniformly random legal moves, calling `check` before every move.
fn random_playout(
    seed: u64,
    seats: usize,
    mut check: impl FnMut(&GameState, Move),
) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new_game(&configs(seats), &mut rng).unwrap();
    for _ in 0..PLY_LIMIT {
        if state.is_game_over() {
            break;
        }
        let moves = state.possible_moves();
        let mv = *moves.choose(&mut rng).unwrap();
        check(&state, mv);
        let seat = state.current_seat();
        state.apply_move(seat, mv).unwrap();
    }
    state
}

// =============================================================================
// Card conservation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cards_are_conserved(seed in arb_seed(), seats in arb_seats()) {
        let end = random_playout(seed, seats, |state, _| {
            assert_eq!(state.total_cards(), DECK_SIZE);
        });
        prop_assert_eq!(end.total_cards(), DECK_SIZE);
    }
}

// =============================================================================
// Legality soundness
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_possible_moves_are_legal(seed in arb_seed(), seats in arb_seats()) {
        random_playout(seed, seats, |state, _| {
            let seat = state.current_seat();
            let moves = state.possible_moves();
            assert!(!moves.is_empty(), "seat {} holding cards has no move", seat);
            for mv in moves {
                assert!(state.is_legal_move(seat, mv), "{} offered but illegal", mv);
            }
        });
    }

    #[test]
    fn prop_canonical_legal_plays_are_offered(seed in arb_seed(), seats in arb_seats()) {
        random_playout(seed, seats, |state, _| {
            let seat = state.current_seat();
            let moves = state.possible_moves();
            let hand = state.seats()[seat].hand();
            let jokers = hand.jokers();

            let mut canonical = Vec::new();
            for rank in Card::MIN_RANK..=Card::MAX_NATURAL_RANK {
                let native = hand.count(rank);
                if native == 0 {
                    continue;
                }
                for j in 0..=jokers {
                    canonical.push((rank, native + j));
                }
            }
            for count in 1..=jokers {
                canonical.push((Card::JOKER_RANK, count));
            }

            for (rank, count) in canonical {
                if state.is_legal(seat, rank, count) {
                    assert!(
                        moves.contains(&Move::play(rank, count)),
                        "legal {}x{} missing",
                        count,
                        rank
                    );
                }
            }
        });
    }

    #[test]
    fn prop_passed_seat_only_passes(seed in arb_seed(), seats in arb_seats()) {
        random_playout(seed, seats, |state, _| {
            let seat = state.current_seat();
            if state.has_passed(seat) {
                assert_eq!(state.possible_moves(), vec![Move::Pass]);
            }
        });
    }
}

// =============================================================================
// Round reset
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_resets_when_one_seat_left(seed in arb_seed(), seats in arb_seats()) {
        random_playout(seed, seats, |state, mv| {
            if !mv.is_pass() {
                return;
            }
            let seat = state.current_seat();
            let unpassed = (0..state.num_players())
                .filter(|&s| s != seat && !state.has_passed(s) && !state.seats()[s].is_out())
                .count();
            let next = state.after(mv);
            if unpassed <= 1 {
                assert!(next.table().is_empty());
                assert!(next.passed().is_empty());
                assert_eq!(next.current_seat(), state.round_lead());
            } else {
                assert!(next.has_passed(seat));
                assert_eq!(next.table(), state.table());
            }
        });
    }

    #[test]
    fn prop_turn_never_on_empty_hand(seed in arb_seed(), seats in arb_seats()) {
        let end = random_playout(seed, seats, |state, _| {
            assert!(!state.seats()[state.current_seat()].is_out());
        });
        prop_assert!(end.is_game_over());
    }
}

// =============================================================================
// Termination
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_game_terminates_with_one_winner(seed in arb_seed(), seats in arb_seats()) {
        let end = random_playout(seed, seats, |_, _| {});
        prop_assert!(end.is_game_over());
        let winner = end.winner().unwrap();
        prop_assert!(end.seats()[winner].is_out());
        prop_assert_eq!(end.seats().iter().filter(|s| s.is_out()).count(), 1);
        prop_assert!(end.possible_moves().is_empty());
    }

    #[test]
    fn prop_log_has_one_line_per_transition(seed in arb_seed(), seats in arb_seats()) {
        let mut moves = 0usize;
        let mut resets = 0usize;
        let end = random_playout(seed, seats, |state, mv| {
            moves += 1;
            if state.after(mv).table().is_empty() && mv.is_pass() {
                resets += 1;
            }
        });
        // dealt + moves + resets + win
        prop_assert_eq!(end.log().len(), 1 + moves + resets + 1);
    }
}

// =============================================================================
// Determinization
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_determinization_respects_public_info(
        seed in arb_seed(),
        seats in arb_seats(),
        plies in 0usize..60,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new_game(&configs(seats), &mut rng).unwrap();
        for _ in 0..plies {
            if state.is_game_over() {
                break;
            }
            let mv = *state.possible_moves().choose(&mut rng).unwrap();
            state.step(mv);
        }
        prop_assume!(!state.is_game_over());

        let observer = state.current_seat();
        let world = Dalmuti.determinize(&state, observer, &mut rng).unwrap();
        prop_assert_eq!(world.hand_sizes(), state.hand_sizes());
        prop_assert_eq!(world.seats()[observer].hand(), state.seats()[observer].hand());
        prop_assert_eq!(world.table(), state.table());
        prop_assert_eq!(world.discard(), state.discard());
        prop_assert_eq!(world.total_cards(), DECK_SIZE);
        prop_assert_eq!(composition(&world), RankCounts::full_deck());
        prop_assert_eq!(
            Dalmuti.legal_actions(&world),
            Dalmuti.legal_actions(&state)
        );
    }
}
