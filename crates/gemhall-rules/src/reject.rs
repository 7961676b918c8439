//! Typed rejections.
//!
//! Every way an action can fail validation is a [`Rejection`] variant
//! carrying the structured context a caller needs to render a message or
//! resubmit a corrected action. The flat [`RejectReason`] code travels in
//! the verdict; the `Display` text here becomes its context string.

use gemhall_types::{CardId, CardLevel, NobleId, ProposedAction, RejectReason, TokenBag, TokenType};

/// Why a proposed action was rejected.
///
/// Checks short-circuit, so a rejection names exactly one failing condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The request's field combination matches no recognized move shape.
    #[error("action matches no recognized move shape: {action:?}")]
    MalformedAction {
        /// The raw request as submitted.
        action: ProposedAction,
    },

    /// A token count in the request was negative.
    #[error("negative {kind:?} count {count} in {field}")]
    NegativeTokens {
        /// The offending token type.
        kind: TokenType,
        /// The negative count submitted.
        count: i32,
        /// Which bag of the request held it.
        field: &'static str,
    },

    /// More tokens were taken than the board supply holds.
    #[error("not enough {kind:?} in the board supply: requested {requested}, available {available}")]
    InsufficientSupply {
        /// The token type in shortfall.
        kind: TokenType,
        /// How many the request takes.
        requested: i32,
        /// How many the board offers.
        available: i32,
    },

    /// More tokens were returned than the player holds.
    #[error("not enough {kind:?} held to return: returning {returning}, holding {holding}")]
    InsufficientHolding {
        /// The token type in shortfall.
        kind: TokenType,
        /// How many the request returns.
        returning: i32,
        /// How many the player holds.
        holding: i32,
    },

    /// Tokens were returned while the hand would stay at or under the limit.
    #[error("cannot return tokens under the hand limit: hand would be {hand} of {limit}, yet {returned} returned")]
    UnnecessaryReturn {
        /// Total tokens returned.
        returned: i64,
        /// Hand size after taking, before any return.
        hand: i64,
        /// The hand limit in force.
        limit: i64,
    },

    /// The return does not bring the hand back to exactly the limit.
    #[error("must return exactly {excess} tokens to reach the hand limit, returned {returned}")]
    IncorrectReturnAmount {
        /// Tokens over the limit that must come back.
        excess: i64,
        /// Total tokens actually returned.
        returned: i64,
    },

    /// The player is already at the reservation cap.
    #[error("cannot reserve any more cards: {count} reserved of a cap of {cap}")]
    ReserveLimitExceeded {
        /// Cards currently reserved.
        count: usize,
        /// The reservation cap in force.
        cap: usize,
    },

    /// The referenced card is in no pool this move may draw from.
    #[error("card {card_id} is not available to this move")]
    CardNotFound {
        /// The unresolved card reference.
        card_id: CardId,
    },

    /// The named deck has no hidden cards left to reserve blind.
    #[error("no hidden cards left in deck {level:?}")]
    DeckEmpty {
        /// The empty deck.
        level: CardLevel,
    },

    /// The returned tokens do not pay the discounted cost exactly.
    #[error("payment for card {card_id} must be exactly {expected:?}, offered {offered:?}")]
    PaymentMismatch {
        /// The card being purchased.
        card_id: CardId,
        /// The cost after the player's discounts.
        expected: TokenBag,
        /// What the request offered instead.
        offered: TokenBag,
    },

    /// Fewer than three types were taken while the board could offer three.
    #[error("took {taken} distinct types while the board offers {offered} non-wildcard types")]
    MustTakeAvailableTypes {
        /// Distinct types the request takes.
        taken: usize,
        /// Distinct non-wildcard types the board offers.
        offered: usize,
    },

    /// The board supply is below the pair-take minimum for that type.
    #[error("not enough {kind:?} on the board to take two: {available} available, {required} required")]
    InsufficientPairSupply {
        /// The type taken twice.
        kind: TokenType,
        /// The board's remaining supply of it.
        available: i64,
        /// The configured minimum supply.
        required: i64,
    },

    /// The referenced noble tile is not available on the board.
    #[error("noble tile {noble_id} is not available")]
    NobleNotFound {
        /// The unresolved noble reference.
        noble_id: NobleId,
    },

    /// The player's discounts do not meet the noble's thresholds.
    #[error("noble {noble_id} requires {required} {kind:?} discounts, player has {discount}")]
    DiscountRequirementsUnmet {
        /// The noble tile, as resolved from the board.
        noble_id: NobleId,
        /// The first token type whose threshold is unmet.
        kind: TokenType,
        /// The discount count the noble requires.
        required: i32,
        /// The discount count the player has.
        discount: i32,
    },
}

impl Rejection {
    /// The stable reason code for this rejection.
    #[must_use]
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::MalformedAction { .. } => RejectReason::MalformedAction,
            Self::NegativeTokens { .. } => RejectReason::NegativeTokens,
            Self::InsufficientSupply { .. } => RejectReason::InsufficientSupply,
            Self::InsufficientHolding { .. } => RejectReason::InsufficientHolding,
            Self::UnnecessaryReturn { .. } => RejectReason::UnnecessaryReturn,
            Self::IncorrectReturnAmount { .. } => RejectReason::IncorrectReturnAmount,
            Self::ReserveLimitExceeded { .. } => RejectReason::ReserveLimitExceeded,
            Self::CardNotFound { .. } => RejectReason::CardNotFound,
            Self::DeckEmpty { .. } => RejectReason::DeckEmpty,
            Self::PaymentMismatch { .. } => RejectReason::PaymentMismatch,
            Self::MustTakeAvailableTypes { .. } => RejectReason::MustTakeAvailableTypes,
            Self::InsufficientPairSupply { .. } => RejectReason::InsufficientPairSupply,
            Self::NobleNotFound { .. } => RejectReason::NobleNotFound,
            Self::DiscountRequirementsUnmet { .. } => RejectReason::DiscountRequirementsUnmet,
        }
    }
}
