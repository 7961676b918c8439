//! The untrusted action request and the verdict returned for it.
//!
//! A transport collaborator marshals both losslessly; nothing here carries
//! behavior.

use serde::{Deserialize, Serialize};

use crate::enums::{CardLevel, RejectReason};
use crate::ids::{CardId, NobleId};
use crate::structs::TokenBag;

/// A player's proposed turn, exactly as submitted.
///
/// The request is a flat record: which single move it represents is not
/// tagged, but implied by which optional references are populated and by the
/// token-count pattern. The classifier in `gemhall-rules` recovers the
/// intent or rejects the combination. Read-only from submission to verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Tokens the player wants to take from the board supply.
    pub tokens_taken: TokenBag,
    /// Tokens the player offers back (overflow change, or card payment).
    pub tokens_returned: TokenBag,
    /// A revealed or reserved card to purchase.
    pub purchased_card_id: Option<CardId>,
    /// A revealed card to reserve.
    pub reserved_card_id: Option<CardId>,
    /// A deck level to reserve blind from the top of.
    pub topdeck_level: Option<CardLevel>,
    /// A noble tile to acquire this turn.
    pub noble_tile_id: Option<NobleId>,
}

/// The outcome of evaluating a proposed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The action is legal; committing it is the caller's next step.
    Accepted,
    /// The action is illegal for exactly one reason.
    Rejected {
        /// The stable reason code.
        reason: RejectReason,
        /// Human-readable context (offending ids, counts) for rendering.
        context: String,
    },
}

impl Verdict {
    /// Whether this verdict accepts the action.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
