//! Core entity structs: token bags, cards, noble tiles, and game state.
//!
//! Everything here is plain data. The legality logic lives in
//! `gemhall-rules`; the counting primitives live in `gemhall-tokens`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{CardLevel, TokenType};
use crate::ids::{CardId, NobleId};

// ---------------------------------------------------------------------------
// Token bag
// ---------------------------------------------------------------------------

/// A per-type count of tokens.
///
/// One shape, several roles: the board supply, a player's holdings, the
/// tokens a request takes or returns, a card's cost, a player's accumulated
/// discounts, and a noble's discount thresholds.
///
/// Counts are deliberately signed. A bag also carries untrusted submitter
/// input, and a negative count must be detected and rejected by the
/// validator -- never silently clamped away at construction. Authoritative
/// bags (supply, holdings, costs) maintain the all-counts-non-negative
/// invariant by convention.
///
/// Zero counts are never stored; a type that is absent counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBag(BTreeMap<TokenType, i32>);

impl TokenBag {
    /// An empty bag (every type counts zero).
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The count for one token type (zero when absent).
    #[must_use]
    pub fn count(&self, kind: TokenType) -> i32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Set the count for one token type. A zero count removes the entry.
    pub fn set(&mut self, kind: TokenType, count: i32) {
        if count == 0 {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, count);
        }
    }

    /// Iterate over the stored (non-zero) counts in token-type order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenType, i32)> + '_ {
        self.0.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Whether every type counts zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(TokenType, i32); N]> for TokenBag {
    fn from(counts: [(TokenType, i32); N]) -> Self {
        counts.into_iter().collect()
    }
}

impl FromIterator<(TokenType, i32)> for TokenBag {
    /// Collect counts into a bag. Later entries for a type overwrite
    /// earlier ones; zero counts are dropped.
    fn from_iter<I: IntoIterator<Item = (TokenType, i32)>>(counts: I) -> Self {
        let mut bag = Self::new();
        for (kind, count) in counts {
            bag.set(kind, count);
        }
        bag
    }
}

// ---------------------------------------------------------------------------
// Cards and nobles
// ---------------------------------------------------------------------------

/// A development card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// The card's asset id.
    pub id: CardId,
    /// The deck this card belongs to.
    pub level: CardLevel,
    /// The token cost to purchase the card. Never contains `Gold`.
    pub cost: TokenBag,
    /// The token type this card permanently discounts once owned.
    pub bonus: TokenType,
}

/// A noble tile.
///
/// Nobles are claimed against a player's accumulated card discounts, never
/// against raw token holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NobleTile {
    /// The tile's asset id.
    pub id: NobleId,
    /// Per-type discount counts the player must have accumulated.
    pub requirements: TokenBag,
}

// ---------------------------------------------------------------------------
// Player and board state
// ---------------------------------------------------------------------------

/// The authoritative per-player state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Tokens the player currently holds.
    pub held_tokens: TokenBag,
    /// Accumulated per-type discounts, derived from owned cards.
    pub discounts: TokenBag,
    /// Cards the player has reserved but not yet purchased.
    ///
    /// Stored whole (not as ids) so a snapshot view can resolve a
    /// reserved-card reference without a global card catalog. Bounded by
    /// the reservation cap.
    pub reserved_cards: Vec<Card>,
    /// Ids of cards the player has purchased.
    pub purchased_card_ids: Vec<CardId>,
}

/// One level's card pools on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    /// The face-up window, purchasable and reservable by id.
    pub revealed: Vec<Card>,
    /// How many face-down cards remain, drawable only by blind reservation.
    pub hidden: usize,
}

/// The shared board state every player acts against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// The token supply available to take from.
    pub available: TokenBag,
    /// Card pools, one per deck level.
    pub decks: BTreeMap<CardLevel, DeckState>,
    /// Noble tiles still up for acquisition.
    pub nobles: Vec<NobleTile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_type_counts_zero() {
        let bag = TokenBag::new();
        assert_eq!(bag.count(TokenType::Red), 0);
        assert!(bag.is_empty());
    }

    #[test]
    fn setting_zero_removes_the_entry() {
        let mut bag = TokenBag::from([(TokenType::Red, 2)]);
        bag.set(TokenType::Red, 0);
        assert!(bag.is_empty());
        assert_eq!(bag, TokenBag::new());
    }

    #[test]
    fn zero_counts_are_dropped_at_construction() {
        let bag = TokenBag::from([(TokenType::Red, 1), (TokenType::Blue, 0)]);
        assert_eq!(bag.iter().count(), 1);
        assert_eq!(bag, TokenBag::from([(TokenType::Red, 1)]));
    }

    #[test]
    fn negative_counts_are_representable() {
        let bag = TokenBag::from([(TokenType::Green, -1)]);
        assert_eq!(bag.count(TokenType::Green), -1);
        assert!(!bag.is_empty());
    }

    #[test]
    fn iteration_follows_token_type_order() {
        let bag = TokenBag::from([(TokenType::Gold, 1), (TokenType::White, 2)]);
        let kinds: Vec<TokenType> = bag.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![TokenType::White, TokenType::Gold]);
    }
}
