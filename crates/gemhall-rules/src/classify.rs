//! Action shape classification.
//!
//! A [`ProposedAction`] is a flat record; which move it represents is implied
//! by which optional references are populated and by the token-count
//! pattern. Classification recovers that intent as an explicit [`Move`]
//! variant, or reports the combination as unrecognized. It is a pure
//! function of the request: no game state, no legality judgment.
//!
//! The five shape predicates are mutually exclusive by construction:
//!
//! - the two reservation shapes require exactly one of the card-reference
//!   fields and differ on which one;
//! - a purchase requires the purchase reference, which every other shape
//!   forbids;
//! - the two token-take shapes require all four references absent and differ
//!   on the count pattern (all ones vs. a single two).
//!
//! Evaluation order therefore never changes the outcome; a debug assertion
//! guards the no-overlap contract against future predicate edits.

use gemhall_types::{CardId, CardLevel, NobleId, ProposedAction, TokenType};

/// A proposed action resolved into one of the five recognized moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Reserve a face-up card from a revealed window.
    ReserveRevealed {
        /// The revealed card being reserved.
        card_id: CardId,
    },
    /// Reserve the unseen top card of a deck.
    ReserveBlind {
        /// The deck being reserved from.
        level: CardLevel,
    },
    /// Purchase a revealed or previously reserved card.
    Purchase {
        /// The card being purchased.
        card_id: CardId,
        /// A noble tile claimed alongside the purchase, if any.
        noble_id: Option<NobleId>,
    },
    /// Take up to three tokens of distinct types, one of each.
    TakeDistinct {
        /// The types taken, in token-type order. At most three.
        kinds: Vec<TokenType>,
    },
    /// Take two tokens of one non-wildcard type.
    TakeTwoIdentical {
        /// The type taken twice.
        kind: TokenType,
    },
}

/// The classifier's verdict on a request's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The request matches exactly one recognized move shape.
    Move(Move),
    /// The request matches no recognized move shape.
    Unrecognized,
}

/// Classify a proposed action into a [`Move`], or [`Unrecognized`] when its
/// field combination matches no move shape.
///
/// [`Unrecognized`]: Classification::Unrecognized
#[must_use]
pub fn classify(action: &ProposedAction) -> Classification {
    let reserve_revealed = is_reserve_revealed(action);
    let reserve_blind = is_reserve_blind(action);
    let purchase = is_purchase(action);
    let take_distinct = is_take_distinct(action);
    let take_two = is_take_two(action);

    let hits = usize::from(reserve_revealed)
        + usize::from(reserve_blind)
        + usize::from(purchase)
        + usize::from(take_distinct)
        + usize::from(take_two);
    debug_assert!(hits <= 1, "move shape predicates overlap for {action:?}");

    if reserve_revealed && let Some(card_id) = action.reserved_card_id.clone() {
        return Classification::Move(Move::ReserveRevealed { card_id });
    }
    if reserve_blind && let Some(level) = action.topdeck_level {
        return Classification::Move(Move::ReserveBlind { level });
    }
    if purchase && let Some(card_id) = action.purchased_card_id.clone() {
        return Classification::Move(Move::Purchase {
            card_id,
            noble_id: action.noble_tile_id.clone(),
        });
    }
    if take_distinct {
        return Classification::Move(Move::TakeDistinct {
            kinds: gemhall_tokens::non_empty_kinds(&action.tokens_taken),
        });
    }
    if take_two && let Some((kind, _)) = action.tokens_taken.iter().next() {
        return Classification::Move(Move::TakeTwoIdentical { kind });
    }
    Classification::Unrecognized
}

/// Shared precondition of the two reservation shapes: nothing is taken
/// except possibly a single wildcard token.
fn wildcard_only_take(action: &ProposedAction) -> bool {
    gemhall_tokens::zero_except(&action.tokens_taken, TokenType::Gold)
        && matches!(action.tokens_taken.count(TokenType::Gold), 0 | 1)
}

/// Whether none of the four optional references are populated.
const fn no_references(action: &ProposedAction) -> bool {
    action.purchased_card_id.is_none()
        && action.reserved_card_id.is_none()
        && action.topdeck_level.is_none()
        && action.noble_tile_id.is_none()
}

fn is_reserve_revealed(action: &ProposedAction) -> bool {
    wildcard_only_take(action)
        && action.purchased_card_id.is_none()
        && action.reserved_card_id.is_some()
        && action.topdeck_level.is_none()
        && action.noble_tile_id.is_none()
}

fn is_reserve_blind(action: &ProposedAction) -> bool {
    wildcard_only_take(action)
        && action.purchased_card_id.is_none()
        && action.reserved_card_id.is_none()
        && action.topdeck_level.is_some()
        && action.noble_tile_id.is_none()
}

/// A purchase takes no tokens and may carry a noble reference alongside.
fn is_purchase(action: &ProposedAction) -> bool {
    action.tokens_taken.is_empty()
        && action.purchased_card_id.is_some()
        && action.reserved_card_id.is_none()
        && action.topdeck_level.is_none()
}

fn is_take_distinct(action: &ProposedAction) -> bool {
    let kinds = gemhall_tokens::non_empty_kinds(&action.tokens_taken);
    kinds.len() <= 3
        && kinds
            .iter()
            .all(|kind| action.tokens_taken.count(*kind) == 1)
        && no_references(action)
}

/// Exactly one type, exactly twice, never the wildcard.
fn is_take_two(action: &ProposedAction) -> bool {
    let kinds = gemhall_tokens::non_empty_kinds(&action.tokens_taken);
    let [kind] = kinds.as_slice() else {
        return false;
    };
    action.tokens_taken.count(*kind) == 2 && !kind.is_wildcard() && no_references(action)
}
