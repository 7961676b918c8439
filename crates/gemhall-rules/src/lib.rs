//! Action classification and turn legality validation for Gemhall.
//!
//! The engine answers one question: is this player's proposed turn legal
//! against this snapshot of the game? It classifies the loosely-structured
//! request into one of five move shapes, checks the move's full legality
//! against resource availability, ownership, and the table rules, and
//! returns a single accept-or-reject verdict. It never mutates state;
//! committing an accepted action is the caller's next step.
//!
//! # Modules
//!
//! - [`classify`] -- Pure shape classification of a request into a [`Move`]
//! - [`validate`] -- The staged legality pipeline
//! - [`reject`] -- Typed rejections with structured context
//! - [`state`] -- The read-only [`PlayerGameState`] snapshot view
//! - [`config`] -- The [`RuleSet`] table tunables
//!
//! # Usage
//!
//! ```
//! use gemhall_rules::{PlayerGameState, RuleSet, evaluate};
//! use gemhall_types::{BoardState, PlayerState, ProposedAction, TokenBag, TokenType};
//!
//! let view = PlayerGameState {
//!     player: PlayerState::default(),
//!     board: BoardState {
//!         available: TokenBag::from([
//!             (TokenType::Red, 4),
//!             (TokenType::Blue, 4),
//!             (TokenType::Green, 4),
//!         ]),
//!         ..BoardState::default()
//!     },
//!     turn: 0,
//!     rules: RuleSet::default(),
//! };
//! let action = ProposedAction {
//!     tokens_taken: TokenBag::from([
//!         (TokenType::Red, 1),
//!         (TokenType::Blue, 1),
//!         (TokenType::Green, 1),
//!     ]),
//!     ..ProposedAction::default()
//! };
//! assert!(evaluate(&view, &action).is_accepted());
//! ```

pub mod classify;
pub mod config;
pub mod reject;
pub mod state;
pub mod validate;

// Re-export the boundary types at crate root.
pub use classify::{Classification, Move, classify};
pub use config::RuleSet;
pub use reject::Rejection;
pub use state::PlayerGameState;
pub use validate::validate;

use gemhall_types::{ProposedAction, Verdict};

/// Evaluate a proposed action against a consistent state snapshot.
///
/// This is the engine's single boundary operation: classification plus
/// validation, folded into a transport-ready [`Verdict`]. Callers that need
/// the structured rejection instead of its rendered context can call
/// [`validate`] directly.
#[must_use]
pub fn evaluate(view: &PlayerGameState, action: &ProposedAction) -> Verdict {
    match validate::validate(view, action) {
        Ok(()) => {
            tracing::debug!(turn = view.turn, "action accepted");
            Verdict::Accepted
        }
        Err(rejection) => {
            let reason = rejection.reason();
            let context = rejection.to_string();
            tracing::debug!(turn = view.turn, ?reason, %context, "action rejected");
            Verdict::Rejected { reason, context }
        }
    }
}
