//! Enumeration types for the Gemhall rules engine.
//!
//! The token palette, the three card decks, and the closed set of stable
//! rejection reason codes the validator can return.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

/// A token (gem) type in the shared board supply.
///
/// `Gold` is the wildcard: it is handed out alongside card reservations and
/// can never be taken through the two-identical-tokens move. Every other
/// type is an ordinary spendable color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// White gems.
    White,
    /// Blue gems.
    Blue,
    /// Green gems.
    Green,
    /// Red gems.
    Red,
    /// Brown gems.
    Brown,
    /// Gold gems -- the wildcard type.
    Gold,
}

impl TokenType {
    /// Every token type, in a fixed order, for exhaustive per-type checks.
    pub const ALL: [Self; 6] = [
        Self::White,
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Brown,
        Self::Gold,
    ];

    /// Whether this is the wildcard (`Gold`) type.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::Gold)
    }
}

// ---------------------------------------------------------------------------
// Card levels
// ---------------------------------------------------------------------------

/// The deck a development card belongs to.
///
/// Each level has its own hidden deck and revealed window on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardLevel {
    /// The first (cheapest) deck.
    One,
    /// The second deck.
    Two,
    /// The third (most expensive) deck.
    Three,
}

impl CardLevel {
    /// Every card level, in ascending order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];
}

// ---------------------------------------------------------------------------
// Rejection reason codes
// ---------------------------------------------------------------------------

/// Stable reason code attached to every rejected action.
///
/// Codes are grouped by the validation stage that produces them. Callers
/// dispatch on the code; the free-form context string that travels with it
/// is for rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The action matched none of the recognized move shapes.
    MalformedAction,
    /// A token count in the request was negative.
    NegativeTokens,
    /// More tokens were taken than the board supply holds.
    InsufficientSupply,
    /// More tokens were returned than the player holds.
    InsufficientHolding,
    /// Tokens were returned while the player was at or under the hand limit.
    UnnecessaryReturn,
    /// The return did not bring the hand back to exactly the limit.
    IncorrectReturnAmount,
    /// The player is already at the reservation cap.
    ReserveLimitExceeded,
    /// The referenced card is not in any pool the move may draw from.
    CardNotFound,
    /// The named deck has no hidden cards left to reserve blind.
    DeckEmpty,
    /// The returned tokens do not pay the discounted cost exactly.
    PaymentMismatch,
    /// Fewer than three types were taken while the board could offer three.
    MustTakeAvailableTypes,
    /// The board supply is below the pair-take minimum for that type.
    InsufficientPairSupply,
    /// The referenced noble tile is not available on the board.
    NobleNotFound,
    /// The player's discounts do not meet the noble's thresholds.
    DiscountRequirementsUnmet,
}
