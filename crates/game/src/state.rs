//! The rules engine: seats, table, turn order, passes and round resets.
//!
//! A `GameState` is either the authoritative game (recording an event log)
//! or a detached copy used by search, which records nothing. Validated
//! mutations (`apply_play`, `apply_pass`, `apply_move`) leave the state
//! untouched on error. `after` derives a new state from a move produced by
//! `possible_moves` and never fails.

use dalmuti_core::{DalmutiError, Result, SeatId, MAX_SEATS, MIN_SEATS};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::deck::{shuffled_deck, RankCounts, DECK_SIZE};
use crate::{
    Card, EventLog, GameEvent, Hand, JokerSplit, Move, Observation, PlayOption, Seat, SeatConfig,
    TableState,
};

/// A set of seat indices.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize)]
#[serde(transparent)]
pub struct SeatSet(u16);

impl SeatSet {
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub fn contains(self, seat: SeatId) -> bool {
        seat < 16 && self.0 & (1 << seat) != 0
    }

    #[inline]
    pub fn insert(&mut self, seat: SeatId) {
        debug_assert!(seat < MAX_SEATS);
        self.0 |= 1 << seat;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = SeatId> {
        (0..16).filter(move |&s| self.contains(s))
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    seats: Vec<Seat>,
    turn: SeatId,
    round_lead: SeatId,
    table: TableState,
    discard: RankCounts,
    passed: SeatSet,
    /// Passes since the last play or round reset.
    consecutive_passes: u32,
    game_over: bool,
    winner: Option<SeatId>,
    log: EventLog,
}

impl GameState {
    /// Shuffle, deal round-robin and pick a random seat to lead.
    pub fn new_game<R: Rng + ?Sized>(configs: &[SeatConfig], rng: &mut R) -> Result<Self> {
        check_seat_count(configs.len())?;
        let n = configs.len();

        let mut dealt = vec![Vec::with_capacity(DECK_SIZE / n + 1); n];
        for (i, card) in shuffled_deck(rng).into_iter().enumerate() {
            dealt[i % n].push(card);
        }
        let first = rng.gen_range(0..n);

        let state = Self::assemble(configs, dealt, first, RankCounts::new());
        debug!(
            num_players = n,
            first = state.seats[first].name(),
            "dealt new game"
        );
        Ok(state)
    }

    /// Build a position from explicit hands, `turn` to act and lead.
    ///
    /// Cards of the deck that appear in no hand are placed in the discard
    /// pile. Every hand must hold at least one card.
    pub fn from_hands(configs: &[SeatConfig], hands: Vec<Vec<Card>>, turn: SeatId) -> Result<Self> {
        check_seat_count(configs.len())?;
        if hands.len() != configs.len() {
            return Err(DalmutiError::InvalidPosition(format!(
                "{} hands given for {} seats",
                hands.len(),
                configs.len()
            )));
        }
        if turn >= configs.len() {
            return Err(DalmutiError::UnknownSeat(turn));
        }
        if let Some(empty) = hands.iter().position(Vec::is_empty) {
            return Err(DalmutiError::InvalidPosition(format!(
                "seat {} has no cards",
                empty
            )));
        }

        let mut discard = RankCounts::full_deck();
        for hand in &hands {
            discard
                .remove_all(&RankCounts::from_cards(hand))
                .map_err(|e| DalmutiError::InvalidPosition(e.to_string()))?;
        }
        Ok(Self::assemble(configs, hands, turn, discard))
    }

    fn assemble(
        configs: &[SeatConfig],
        hands: Vec<Vec<Card>>,
        first: SeatId,
        discard: RankCounts,
    ) -> Self {
        let seats: Vec<Seat> = Seat::names(configs)
            .into_iter()
            .zip(configs)
            .zip(hands)
            .map(|((name, &config), cards)| Seat::new(name, config, Hand::new(cards)))
            .collect();

        let mut log = EventLog::new();
        log.record(|| GameEvent::Dealt {
            num_players: seats.len(),
            first,
            first_name: seats[first].name().to_string(),
        });

        Self {
            seats,
            turn: first,
            round_lead: first,
            table: TableState::empty(),
            discard,
            passed: SeatSet::new(),
            consecutive_passes: 0,
            game_over: false,
            winner: None,
            log,
        }
    }

    /// Put a combination on the table as if `lead` had just played it.
    ///
    /// The cards come out of the discard pile. Jokers in `cards` stand in for
    /// `effective_rank`.
    pub fn place_on_table(&mut self, cards: &[Card], effective_rank: u8, lead: SeatId) -> Result<()> {
        if lead >= self.seats.len() {
            return Err(DalmutiError::UnknownSeat(lead));
        }
        if !Card::is_valid_rank(effective_rank) {
            return Err(DalmutiError::InvalidRank(effective_rank));
        }
        if cards.is_empty() {
            return Err(DalmutiError::InvalidPosition("empty combination".into()));
        }
        if let Some(odd) = cards
            .iter()
            .find(|c| c.rank() != effective_rank && !c.is_joker())
        {
            return Err(DalmutiError::InvalidPosition(format!(
                "card {} does not belong to a rank {} combination",
                odd, effective_rank
            )));
        }

        let mut discard = self.discard;
        discard.add_all(self.table.cards());
        discard
            .remove_all(&RankCounts::from_cards(cards))
            .map_err(|e| DalmutiError::InvalidPosition(e.to_string()))?;

        let mut cards = cards.to_vec();
        cards.sort_unstable();
        self.discard = discard;
        self.table = TableState::new(cards, effective_rank);
        self.round_lead = lead;
        Ok(())
    }

    // ---- observers ----

    pub fn num_players(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, seat: SeatId) -> Result<&Seat> {
        self.seats.get(seat).ok_or(DalmutiError::UnknownSeat(seat))
    }

    /// The seat whose move is next.
    #[inline]
    pub fn current_seat(&self) -> SeatId {
        self.turn
    }

    pub fn round_lead(&self) -> SeatId {
        self.round_lead
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn discard(&self) -> &RankCounts {
        &self.discard
    }

    pub fn passed(&self) -> SeatSet {
        self.passed
    }

    pub fn has_passed(&self, seat: SeatId) -> bool {
        self.passed.contains(seat)
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<SeatId> {
        self.winner
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.seats.iter().map(|s| s.hand().len()).collect()
    }

    /// Cards in hands, on the table and in the discard pile.
    pub fn total_cards(&self) -> usize {
        self.seats.iter().map(|s| s.hand().len()).sum::<usize>()
            + self.table.cards().len()
            + self.discard.total()
    }

    /// Everything `seat` is allowed to see.
    pub fn observe(&self, seat: SeatId) -> Result<Observation> {
        self.seat(seat)?;
        Ok(Observation::new(self, seat))
    }

    // ---- rules ----

    /// Whether `seat` may play `count` cards as `rank` right now, turn aside.
    pub fn is_legal(&self, seat: SeatId, rank: u8, count: u8) -> bool {
        let Some(player) = self.seats.get(seat) else {
            return false;
        };
        if self.game_over || count == 0 || !Card::is_valid_rank(rank) {
            return false;
        }
        if self.passed.contains(seat) {
            return false;
        }

        let hand = player.hand();
        let jokers = hand.jokers();
        let fieldable = if rank == Card::JOKER_RANK {
            jokers
        } else {
            hand.count(rank) + jokers
        };
        if fieldable < count {
            return false;
        }

        if self.table.is_empty() {
            return true;
        }
        count == self.table.count() && rank < self.table.effective_rank()
    }

    /// Legality of a whole move for `seat`, turn aside.
    ///
    /// A pass is legal once something is on the table, when no play exists,
    /// or when the seat already passed this round.
    pub fn is_legal_move(&self, seat: SeatId, mv: Move) -> bool {
        match mv {
            Move::Play { rank, count } => self.is_legal(seat, rank, count),
            Move::Pass => {
                seat < self.seats.len()
                    && !self.game_over
                    && (self.passed.contains(seat)
                        || !self.table.is_empty()
                        || self.play_options_for(seat).is_empty())
            }
        }
    }

    /// Canonical plays for `seat`, in enumeration order.
    ///
    /// First every natural rank with all native cards, then every natural
    /// rank topped up with 1..=J jokers, then jokers alone.
    pub fn play_options_for(&self, seat: SeatId) -> Vec<PlayOption> {
        let Some(player) = self.seats.get(seat) else {
            return Vec::new();
        };
        if self.game_over || self.passed.contains(seat) {
            return Vec::new();
        }

        let counts = player.hand().counts();
        let jokers = counts.jokers();
        let mut options = Vec::new();

        for (rank, native) in counts.naturals() {
            if self.is_legal(seat, rank, native) {
                options.push(PlayOption {
                    rank,
                    count: native,
                    jokers_used: 0,
                });
            }
        }
        for (rank, native) in counts.naturals() {
            for j in 1..=jokers {
                if self.is_legal(seat, rank, native + j) {
                    options.push(PlayOption {
                        rank,
                        count: native + j,
                        jokers_used: j,
                    });
                }
            }
        }
        for count in 1..=jokers {
            if self.is_legal(seat, Card::JOKER_RANK, count) {
                options.push(PlayOption {
                    rank: Card::JOKER_RANK,
                    count,
                    jokers_used: count,
                });
            }
        }
        options
    }

    /// Moves for the seat to act. Empty only once the game is over.
    pub fn possible_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        if self.passed.contains(self.turn) {
            return vec![Move::Pass];
        }
        let mut moves: Vec<Move> = self
            .play_options_for(self.turn)
            .into_iter()
            .map(PlayOption::to_move)
            .collect();
        if !self.table.is_empty() || moves.is_empty() {
            moves.push(Move::Pass);
        }
        moves
    }

    /// True when the seat to act cannot do anything but pass: it already
    /// passed, holds fewer cards than the table needs, or the table is
    /// unbeatable.
    pub fn must_pass(&self) -> bool {
        if self.game_over {
            return false;
        }
        if self.passed.contains(self.turn) {
            return true;
        }
        !self.table.is_empty()
            && (self.seats[self.turn].hand().len() < self.table.count() as usize
                || self.table.is_unbeatable())
    }

    // ---- validated mutations ----

    /// Play `count` cards as `rank` for `seat`.
    ///
    /// Without `split` the fewest possible jokers are used. An explicit
    /// split is honored as long as it adds up and the hand holds it.
    pub fn apply_play(
        &mut self,
        seat: SeatId,
        rank: u8,
        count: u8,
        split: Option<JokerSplit>,
    ) -> Result<()> {
        self.check_turn(seat)?;
        if !self.is_legal(seat, rank, count) {
            return Err(DalmutiError::IllegalPlay { seat, rank, count });
        }
        let split = match split {
            Some(split) => self.validate_split(seat, rank, count, split)?,
            None => self.default_split(seat, rank, count),
        };
        self.play_cards(seat, rank, split);
        Ok(())
    }

    pub fn apply_pass(&mut self, seat: SeatId) -> Result<()> {
        self.check_turn(seat)?;
        if !self.is_legal_move(seat, Move::Pass) {
            return Err(DalmutiError::PassNotAllowed(seat));
        }
        self.pass(seat);
        Ok(())
    }

    pub fn apply_move(&mut self, seat: SeatId, mv: Move) -> Result<()> {
        match mv {
            Move::Pass => self.apply_pass(seat),
            Move::Play { rank, count } => self.apply_play(seat, rank, count, None),
        }
    }

    // ---- search helpers ----

    /// A copy with a log that records nothing.
    pub fn detached(&self) -> Self {
        Self {
            seats: self.seats.clone(),
            turn: self.turn,
            round_lead: self.round_lead,
            table: self.table.clone(),
            discard: self.discard,
            passed: self.passed,
            consecutive_passes: self.consecutive_passes,
            game_over: self.game_over,
            winner: self.winner,
            log: EventLog::detached(),
        }
    }

    /// The detached state reached when the seat to act makes `mv`.
    ///
    /// `mv` must come from `possible_moves`.
    pub fn after(&self, mv: Move) -> Self {
        let mut next = self.detached();
        next.step(mv);
        next
    }

    /// Apply a move from `possible_moves` for the seat to act, in place.
    pub fn step(&mut self, mv: Move) {
        debug_assert!(
            !self.game_over && self.is_legal_move(self.turn, mv),
            "BUG: {} is not legal for seat {}",
            mv,
            self.turn
        );
        let seat = self.turn;
        match mv {
            Move::Pass => self.pass(seat),
            Move::Play { rank, count } => {
                let split = self.default_split(seat, rank, count);
                self.play_cards(seat, rank, split);
            }
        }
    }

    /// Replace every hand but `keep`'s with cards dealt from `pool`, each
    /// seat receiving exactly as many as it holds now.
    pub(crate) fn redeal_others(&mut self, keep: SeatId, pool: &[Card]) -> Result<()> {
        let needed: usize = self
            .seats
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != keep)
            .map(|(_, s)| s.hand().len())
            .sum();
        if needed != pool.len() {
            return Err(DalmutiError::InconsistentCardPool(format!(
                "opponents hold {} cards but {} are unseen",
                needed,
                pool.len()
            )));
        }

        let mut rest = pool;
        for (i, seat) in self.seats.iter_mut().enumerate() {
            if i == keep {
                continue;
            }
            let (dealt, tail) = rest.split_at(seat.hand().len());
            seat.hand = Hand::new(dealt.to_vec());
            rest = tail;
        }
        Ok(())
    }

    // ---- internals ----

    fn check_turn(&self, seat: SeatId) -> Result<()> {
        if seat >= self.seats.len() {
            return Err(DalmutiError::UnknownSeat(seat));
        }
        if self.game_over {
            return Err(DalmutiError::GameOver);
        }
        if seat != self.turn {
            return Err(DalmutiError::NotYourTurn {
                expected: self.turn,
                got: seat,
            });
        }
        Ok(())
    }

    fn default_split(&self, seat: SeatId, rank: u8, count: u8) -> JokerSplit {
        if rank == Card::JOKER_RANK {
            return JokerSplit::new(0, count);
        }
        let native = count.min(self.seats[seat].hand().count(rank));
        JokerSplit::new(native, count - native)
    }

    fn validate_split(
        &self,
        seat: SeatId,
        rank: u8,
        count: u8,
        split: JokerSplit,
    ) -> Result<JokerSplit> {
        if split.total() != u16::from(count) {
            return Err(DalmutiError::InvalidSplit(format!(
                "{} native + {} jokers does not make {}",
                split.native, split.jokers, count
            )));
        }
        if rank == Card::JOKER_RANK {
            return Ok(JokerSplit::new(0, count));
        }
        let hand = self.seats[seat].hand();
        if split.native > hand.count(rank) || split.jokers > hand.jokers() {
            return Err(DalmutiError::InvalidSplit(format!(
                "hand cannot field {} native + {} jokers of rank {}",
                split.native, split.jokers, rank
            )));
        }
        Ok(split)
    }

    fn play_cards(&mut self, seat: SeatId, rank: u8, split: JokerSplit) {
        let hand = &mut self.seats[seat].hand;
        hand.remove(rank, split.native)
            .expect("BUG: play validated against hand");
        hand.remove(Card::JOKER_RANK, split.jokers)
            .expect("BUG: play validated against hand");

        let mut cards = Vec::with_capacity(split.total() as usize);
        cards.extend(std::iter::repeat(Card::new_unchecked(rank)).take(split.native as usize));
        cards.extend(std::iter::repeat(Card::JOKER).take(split.jokers as usize));

        let covered = self.table.take();
        self.discard.add_all(&covered);
        self.table = TableState::new(cards, rank);
        self.consecutive_passes = 0;
        self.round_lead = seat;

        let name = self.seats[seat].name();
        self.log.record(|| GameEvent::Played {
            seat,
            name: name.to_string(),
            rank,
            count: self.table.count(),
            jokers: split.jokers,
        });

        if self.seats[seat].is_out() {
            self.game_over = true;
            self.winner = Some(seat);
            let name = self.seats[seat].name();
            self.log.record(|| GameEvent::Won {
                seat,
                name: name.to_string(),
            });
            return;
        }
        self.advance_turn();
    }

    fn pass(&mut self, seat: SeatId) {
        let auto = self.passed.contains(seat);
        self.passed.insert(seat);
        self.consecutive_passes += 1;

        let name = self.seats[seat].name();
        self.log.record(|| GameEvent::Passed {
            seat,
            name: name.to_string(),
            auto,
        });

        let with_cards = self.seats.iter().filter(|s| !s.is_out()).count();
        let unpassed = self
            .seats
            .iter()
            .enumerate()
            .filter(|&(i, s)| !s.is_out() && !self.passed.contains(i))
            .count();

        if unpassed <= 1 && with_cards > 1 {
            self.reset_round();
        } else {
            self.advance_turn();
        }
    }

    fn reset_round(&mut self) {
        let cleared = self.table.take();
        self.discard.add_all(&cleared);
        self.passed.clear();
        self.consecutive_passes = 0;
        self.turn = self.round_lead;
        if self.seats[self.turn].is_out() {
            self.advance_turn();
        }

        let leader = self.turn;
        let name = self.seats[leader].name();
        self.log.record(|| GameEvent::RoundReset {
            leader,
            name: name.to_string(),
        });
        trace!(leader, "round reset");
    }

    fn advance_turn(&mut self) {
        if self.game_over {
            return;
        }
        let n = self.seats.len();
        for step in 1..=n {
            let next = (self.turn + step) % n;
            if !self.seats[next].is_out() {
                self.turn = next;
                return;
            }
        }
    }
}

fn check_seat_count(n: usize) -> Result<()> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
        return Err(DalmutiError::InvalidSeatCount {
            got: n,
            min: MIN_SEATS,
            max: MAX_SEATS,
        });
    }
    Ok(())
}
