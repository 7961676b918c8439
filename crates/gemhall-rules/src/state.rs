//! The read-only game-state view a single validation call runs against.
//!
//! Assembled by the caller from the authoritative state as a consistent
//! snapshot. The validator only queries it; applying an accepted action is
//! the caller's state-transition step, outside this crate.

use gemhall_types::{
    BoardState, Card, CardId, CardLevel, NobleId, NobleTile, PlayerState, TokenBag, TokenType,
};

use crate::config::RuleSet;

/// Everything one legality decision may look at: the acting player's own
/// state, the shared board, the turn index, and the table rules.
///
/// The view exposes no mutation. Callers that could race concurrent
/// submissions for the same turn must serialize validate-and-commit around
/// a snapshot themselves.
#[derive(Debug, Clone)]
pub struct PlayerGameState {
    /// The acting player's authoritative state.
    pub player: PlayerState,
    /// The shared board state.
    pub board: BoardState,
    /// The index of the turn being played.
    pub turn: usize,
    /// The table rules in force.
    pub rules: RuleSet,
}

impl PlayerGameState {
    /// Tokens the acting player currently holds.
    #[must_use]
    pub const fn held_tokens(&self) -> &TokenBag {
        &self.player.held_tokens
    }

    /// The acting player's accumulated per-type discounts.
    #[must_use]
    pub const fn discounts(&self) -> &TokenBag {
        &self.player.discounts
    }

    /// Maximum tokens the player may hold at the end of the turn.
    #[must_use]
    pub const fn hand_limit(&self) -> i64 {
        self.rules.hand_limit
    }

    /// How many cards the player currently has reserved.
    #[must_use]
    pub fn reservation_count(&self) -> usize {
        self.player.reserved_cards.len()
    }

    /// Maximum cards the player may hold reserved at once.
    #[must_use]
    pub const fn reservation_cap(&self) -> usize {
        self.rules.reservation_cap
    }

    /// Whether the player has room for one more reservation.
    #[must_use]
    pub fn can_reserve(&self) -> bool {
        self.reservation_count() < self.reservation_cap()
    }

    /// The board's token supply.
    #[must_use]
    pub const fn available_tokens(&self) -> &TokenBag {
        &self.board.available
    }

    /// Look up a card in any deck's revealed window.
    #[must_use]
    pub fn revealed_card(&self, id: &CardId) -> Option<&Card> {
        self.board
            .decks
            .values()
            .flat_map(|deck| deck.revealed.iter())
            .find(|card| card.id == *id)
    }

    /// Look up a card among the acting player's reservations.
    #[must_use]
    pub fn reserved_card(&self, id: &CardId) -> Option<&Card> {
        self.player.reserved_cards.iter().find(|card| card.id == *id)
    }

    /// Look up a card in the player's reservations first, then in the
    /// revealed windows -- the two pools a purchase may draw from.
    #[must_use]
    pub fn reserved_or_revealed_card(&self, id: &CardId) -> Option<&Card> {
        self.reserved_card(id).or_else(|| self.revealed_card(id))
    }

    /// Whether the named deck still has face-down cards to reserve blind.
    #[must_use]
    pub fn hidden_deck_nonempty(&self, level: CardLevel) -> bool {
        self.board
            .decks
            .get(&level)
            .is_some_and(|deck| deck.hidden > 0)
    }

    /// Look up a noble tile still available on the board.
    #[must_use]
    pub fn noble_tile(&self, id: &NobleId) -> Option<&NobleTile> {
        self.board.nobles.iter().find(|noble| noble.id == *id)
    }

    /// Minimum board supply of `kind` required before a pair of it may be
    /// taken. For the wildcard type no supply is ever enough.
    #[must_use]
    pub const fn min_supply_for_pair_take(&self, kind: TokenType) -> i64 {
        if kind.is_wildcard() {
            i64::MAX
        } else {
            self.rules.pair_take_min_supply
        }
    }

    /// How many distinct non-wildcard token types the board currently
    /// offers at all.
    #[must_use]
    pub fn count_available_nonwildcard_types(&self) -> usize {
        gemhall_tokens::distinct_spendable_kinds(&self.board.available)
    }
}
