//! `Game` and `Determinize` for the search crate.

use dalmuti_core::{DalmutiError, Determinize, Game, Result, SeatId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::deck::RankCounts;
use crate::{GameState, Move};

/// The Dalmuti rules as seen by a search.
#[derive(Clone, Copy, Default, Debug)]
pub struct Dalmuti;

impl Game for Dalmuti {
    type State = GameState;
    type Action = Move;

    fn legal_actions(&self, state: &GameState) -> Vec<Move> {
        state.possible_moves()
    }

    fn apply(&self, state: &GameState, action: Move) -> GameState {
        state.after(action)
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        state.is_game_over()
    }

    fn current_seat(&self, state: &GameState) -> SeatId {
        state.current_seat()
    }

    fn winner(&self, state: &GameState) -> Option<SeatId> {
        state.winner()
    }

    fn forced_action(&self, state: &GameState) -> Option<Move> {
        state.must_pass().then_some(Move::Pass)
    }
}

impl Determinize for Dalmuti {
    fn determinize<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        observer: SeatId,
        rng: &mut R,
    ) -> Result<GameState> {
        let mut known = state.seat(observer)?.hand().counts();
        known.add_all(state.table().cards());
        known.add_all(&state.discard().to_cards());

        let mut unseen = RankCounts::full_deck();
        unseen
            .remove_all(&known)
            .map_err(|e| DalmutiError::InconsistentCardPool(e.to_string()))?;
        let mut pool = unseen.to_cards();
        pool.shuffle(rng);

        let mut world = state.detached();
        world.redeal_others(observer, &pool)?;
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Personality, SeatConfig, DECK_SIZE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_determinize_keeps_observer_and_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let configs = [SeatConfig::ai(Personality::MctsPro); 5];
        let mut state = GameState::new_game(&configs, &mut rng).unwrap();
        for _ in 0..12 {
            if state.is_game_over() {
                break;
            }
            let mv = state.possible_moves()[0];
            state.step(mv);
        }

        let observer = state.current_seat();
        let world = Dalmuti.determinize(&state, observer, &mut rng).unwrap();
        assert_eq!(world.hand_sizes(), state.hand_sizes());
        assert_eq!(
            world.seats()[observer].hand(),
            state.seats()[observer].hand()
        );
        assert_eq!(world.table(), state.table());
        assert_eq!(world.total_cards(), DECK_SIZE);
        assert!(!world.log().is_recording());
    }

    #[test]
    fn test_determinize_two_seats_is_exact() {
        // with two seats the unseen pool is exactly the opponent's hand
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let configs = [SeatConfig::ai(Personality::MctsPro); 2];
        let state = GameState::new_game(&configs, &mut rng).unwrap();
        let world = Dalmuti.determinize(&state, 0, &mut rng).unwrap();
        assert_eq!(world.seats()[1].hand(), state.seats()[1].hand());
    }

    #[test]
    fn test_forced_pass_on_unbeatable_table() {
        let configs = [SeatConfig::ai(Personality::Mcts); 2];
        let mut state = GameState::from_hands(
            &configs,
            vec![
                vec![Card::new(4).unwrap(), Card::new(5).unwrap()],
                vec![Card::new(6).unwrap()],
            ],
            0,
        )
        .unwrap();
        assert_eq!(Dalmuti.forced_action(&state), None);
        state.place_on_table(&[Card::new(1).unwrap()], 1, 1).unwrap();
        assert_eq!(Dalmuti.forced_action(&state), Some(Move::Pass));
    }
}
