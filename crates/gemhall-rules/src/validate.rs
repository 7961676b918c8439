//! The turn legality pipeline.
//!
//! Every submitted action runs four stages in order:
//!
//! 1. **Shape** -- classify the request; an unrecognized combination is
//!    rejected outright, before any resource check.
//! 2. **Accounting** -- move-kind-independent token checks: no negative
//!    counts, the board can supply what is taken, the player holds what is
//!    returned, and any overflow over the hand limit is returned exactly.
//! 3. **Move legality** -- the per-kind check, an exhaustive match on the
//!    classified move.
//! 4. **Noble acquisition** -- orthogonal to the move kind, runs whenever
//!    the request names a noble tile.
//!
//! Stages short-circuit: the first failing condition is the rejection, and
//! a passing action produces no side effects at all. Committing an accepted
//! action is the caller's state-transition step.

use gemhall_tokens as tokens;
use gemhall_types::ProposedAction;

use crate::classify::{Classification, Move, classify};
use crate::reject::Rejection;
use crate::state::PlayerGameState;

/// Validate a proposed action against a consistent state snapshot.
///
/// Returns `Ok(())` if the action is legal, or the single [`Rejection`]
/// produced by the first failing check.
pub fn validate(view: &PlayerGameState, action: &ProposedAction) -> Result<(), Rejection> {
    let mv = match classify(action) {
        Classification::Move(mv) => mv,
        Classification::Unrecognized => {
            return Err(Rejection::MalformedAction {
                action: action.clone(),
            });
        }
    };

    check_accounting(view, action, &mv)?;
    check_move(view, action, &mv)?;
    check_noble(view, action)
}

/// Stage 2: universal resource accounting.
fn check_accounting(
    view: &PlayerGameState,
    action: &ProposedAction,
    mv: &Move,
) -> Result<(), Rejection> {
    if let Some((kind, count)) = tokens::first_negative(&action.tokens_taken) {
        return Err(Rejection::NegativeTokens {
            kind,
            count,
            field: "tokens_taken",
        });
    }
    if let Some((kind, count)) = tokens::first_negative(&action.tokens_returned) {
        return Err(Rejection::NegativeTokens {
            kind,
            count,
            field: "tokens_returned",
        });
    }

    if let Some(kind) = tokens::first_shortfall(view.available_tokens(), &action.tokens_taken) {
        return Err(Rejection::InsufficientSupply {
            kind,
            requested: action.tokens_taken.count(kind),
            available: view.available_tokens().count(kind),
        });
    }
    if let Some(kind) = tokens::first_shortfall(view.held_tokens(), &action.tokens_returned) {
        return Err(Rejection::InsufficientHolding {
            kind,
            returning: action.tokens_returned.count(kind),
            holding: view.held_tokens().count(kind),
        });
    }

    // A purchase settles its cost through `tokens_returned`; the exact-
    // payment check owns that bag instead of the return-to-limit rule.
    if matches!(mv, Move::Purchase { .. }) {
        return Ok(());
    }

    let hand =
        tokens::total(view.held_tokens()).saturating_add(tokens::total(&action.tokens_taken));
    let excess = hand.saturating_sub(view.hand_limit());
    let returned = tokens::total(&action.tokens_returned);
    if excess <= 0 && returned != 0 {
        return Err(Rejection::UnnecessaryReturn {
            returned,
            hand,
            limit: view.hand_limit(),
        });
    }
    if excess > 0 && returned != excess {
        return Err(Rejection::IncorrectReturnAmount { excess, returned });
    }
    Ok(())
}

/// Stage 3: the per-kind legality check.
fn check_move(
    view: &PlayerGameState,
    action: &ProposedAction,
    mv: &Move,
) -> Result<(), Rejection> {
    match mv {
        Move::ReserveRevealed { card_id } => {
            check_reserve_headroom(view)?;
            if view.revealed_card(card_id).is_none() {
                return Err(Rejection::CardNotFound {
                    card_id: card_id.clone(),
                });
            }
            Ok(())
        }
        Move::ReserveBlind { level } => {
            check_reserve_headroom(view)?;
            if !view.hidden_deck_nonempty(*level) {
                return Err(Rejection::DeckEmpty { level: *level });
            }
            Ok(())
        }
        Move::Purchase { card_id, .. } => {
            let Some(card) = view.reserved_or_revealed_card(card_id) else {
                return Err(Rejection::CardNotFound {
                    card_id: card_id.clone(),
                });
            };
            let expected = tokens::discounted_cost(&card.cost, view.discounts());
            if !tokens::pays_exactly(&action.tokens_returned, &expected) {
                return Err(Rejection::PaymentMismatch {
                    card_id: card.id.clone(),
                    expected,
                    offered: action.tokens_returned.clone(),
                });
            }
            Ok(())
        }
        Move::TakeDistinct { kinds } => {
            // Taking fewer than three is legal only when the board cannot
            // offer three distinct non-wildcard types at all.
            let offered = view.count_available_nonwildcard_types();
            if kinds.len() < 3 && offered >= 3 {
                return Err(Rejection::MustTakeAvailableTypes {
                    taken: kinds.len(),
                    offered,
                });
            }
            Ok(())
        }
        Move::TakeTwoIdentical { kind } => {
            let available = i64::from(view.available_tokens().count(*kind));
            let required = view.min_supply_for_pair_take(*kind);
            if available < required {
                return Err(Rejection::InsufficientPairSupply {
                    kind: *kind,
                    available,
                    required,
                });
            }
            Ok(())
        }
    }
}

/// Stage 4: noble acquisition, whenever the request names a noble tile.
fn check_noble(view: &PlayerGameState, action: &ProposedAction) -> Result<(), Rejection> {
    let Some(noble_id) = &action.noble_tile_id else {
        return Ok(());
    };
    let Some(noble) = view.noble_tile(noble_id) else {
        return Err(Rejection::NobleNotFound {
            noble_id: noble_id.clone(),
        });
    };
    // Diagnostics draw from the resolved tile, not the raw request field.
    for (kind, required) in noble.requirements.iter() {
        let discount = view.discounts().count(kind);
        if discount < required {
            return Err(Rejection::DiscountRequirementsUnmet {
                noble_id: noble.id.clone(),
                kind,
                required,
                discount,
            });
        }
    }
    Ok(())
}

/// Reject when the player has no reservation headroom left.
fn check_reserve_headroom(view: &PlayerGameState) -> Result<(), Rejection> {
    if view.can_reserve() {
        Ok(())
    } else {
        Err(Rejection::ReserveLimitExceeded {
            count: view.reservation_count(),
            cap: view.reservation_cap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use gemhall_types::{
        BoardState, Card, CardId, CardLevel, DeckState, NobleId, NobleTile, PlayerState, TokenBag,
        TokenType,
    };

    use crate::config::RuleSet;

    use super::*;

    fn make_card(id: &str, level: CardLevel, cost: TokenBag, bonus: TokenType) -> Card {
        Card {
            id: CardId::new(id),
            level,
            cost,
            bonus,
        }
    }

    /// A fresh table: every color at 4, five gold, three decks dealt,
    /// one noble wanting three red and three blue discounts.
    fn make_view() -> PlayerGameState {
        let mut decks = BTreeMap::new();
        decks.insert(
            CardLevel::One,
            DeckState {
                revealed: vec![
                    make_card(
                        "C1",
                        CardLevel::One,
                        TokenBag::from([(TokenType::White, 1)]),
                        TokenType::Red,
                    ),
                    make_card(
                        "C2",
                        CardLevel::One,
                        TokenBag::from([(TokenType::Red, 3), (TokenType::Blue, 2)]),
                        TokenType::Green,
                    ),
                ],
                hidden: 30,
            },
        );
        decks.insert(
            CardLevel::Two,
            DeckState {
                revealed: vec![make_card(
                    "C7",
                    CardLevel::Two,
                    TokenBag::from([(TokenType::Green, 2)]),
                    TokenType::Blue,
                )],
                hidden: 20,
            },
        );
        decks.insert(
            CardLevel::Three,
            DeckState {
                revealed: Vec::new(),
                hidden: 0,
            },
        );
        PlayerGameState {
            player: PlayerState::default(),
            board: BoardState {
                available: TokenBag::from([
                    (TokenType::White, 4),
                    (TokenType::Blue, 4),
                    (TokenType::Green, 4),
                    (TokenType::Red, 4),
                    (TokenType::Brown, 4),
                    (TokenType::Gold, 5),
                ]),
                decks,
                nobles: vec![NobleTile {
                    id: NobleId::new("N1"),
                    requirements: TokenBag::from([(TokenType::Red, 3), (TokenType::Blue, 3)]),
                }],
            },
            turn: 0,
            rules: RuleSet::default(),
        }
    }

    fn take_three() -> ProposedAction {
        ProposedAction {
            tokens_taken: TokenBag::from([
                (TokenType::Red, 1),
                (TokenType::Blue, 1),
                (TokenType::Green, 1),
            ]),
            ..ProposedAction::default()
        }
    }

    fn reason_of(result: Result<(), Rejection>) -> Option<gemhall_types::RejectReason> {
        result.err().map(|rejection| rejection.reason())
    }

    // -----------------------------------------------------------------------
    // Shape stage
    // -----------------------------------------------------------------------

    #[test]
    fn unrecognized_shape_rejected_before_resource_checks() {
        let view = make_view();
        // Take alongside a purchase reference, and a supply shortfall that
        // would trip accounting if it ever ran.
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Red, 9)]),
            purchased_card_id: Some(CardId::new("C2")),
            ..ProposedAction::default()
        };
        assert_eq!(
            reason_of(validate(&view, &action)),
            Some(gemhall_types::RejectReason::MalformedAction)
        );
    }

    // -----------------------------------------------------------------------
    // Accounting stage
    // -----------------------------------------------------------------------

    #[test]
    fn negative_return_count_rejected() {
        let view = make_view();
        let mut action = take_three();
        action.tokens_returned = TokenBag::from([(TokenType::White, -1)]);
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::NegativeTokens {
                kind: TokenType::White,
                count: -1,
                field: "tokens_returned",
            })
        );
    }

    #[test]
    fn supply_shortfall_rejected() {
        let mut view = make_view();
        view.board.available.set(TokenType::Red, 0);
        assert_eq!(
            validate(&view, &take_three()),
            Err(Rejection::InsufficientSupply {
                kind: TokenType::Red,
                requested: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn accounting_runs_before_the_move_check() {
        let mut view = make_view();
        view.board.available.set(TokenType::Gold, 0);
        // The referenced card does not exist either; supply fails first.
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Gold, 1)]),
            reserved_card_id: Some(CardId::new("C99")),
            ..ProposedAction::default()
        };
        assert_eq!(
            reason_of(validate(&view, &action)),
            Some(gemhall_types::RejectReason::InsufficientSupply)
        );
    }

    #[test]
    fn returning_tokens_not_held_rejected() {
        let view = make_view();
        let mut action = take_three();
        action.tokens_returned = TokenBag::from([(TokenType::White, 1)]);
        // The player holds nothing, so this fails before the limit rule.
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::InsufficientHolding {
                kind: TokenType::White,
                returning: 1,
                holding: 0,
            })
        );
    }

    #[test]
    fn landing_exactly_on_the_limit_needs_no_return() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 7)]);
        assert_eq!(validate(&view, &take_three()), Ok(()));
    }

    #[test]
    fn returning_while_under_the_limit_rejected() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 6)]);
        let mut action = take_three();
        action.tokens_returned = TokenBag::from([(TokenType::White, 1)]);
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::UnnecessaryReturn {
                returned: 1,
                hand: 9,
                limit: 10,
            })
        );
    }

    #[test]
    fn one_over_the_limit_must_return_exactly_one() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 8)]);

        let mut exact = take_three();
        exact.tokens_returned = TokenBag::from([(TokenType::White, 1)]);
        assert_eq!(validate(&view, &exact), Ok(()));

        let none = take_three();
        assert_eq!(
            validate(&view, &none),
            Err(Rejection::IncorrectReturnAmount {
                excess: 1,
                returned: 0,
            })
        );

        let mut too_many = take_three();
        too_many.tokens_returned = TokenBag::from([(TokenType::White, 2)]);
        assert_eq!(
            validate(&view, &too_many),
            Err(Rejection::IncorrectReturnAmount {
                excess: 1,
                returned: 2,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Reservations
    // -----------------------------------------------------------------------

    #[test]
    fn reserve_revealed_card_accepted() {
        let view = make_view();
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Gold, 1)]),
            reserved_card_id: Some(CardId::new("C7")),
            ..ProposedAction::default()
        };
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn reserve_at_full_hand_returns_the_overflow() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 10)]);
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Gold, 1)]),
            tokens_returned: TokenBag::from([(TokenType::White, 1)]),
            reserved_card_id: Some(CardId::new("C7")),
            ..ProposedAction::default()
        };
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn reserve_past_the_cap_rejected() {
        let mut view = make_view();
        for id in ["R1", "R2", "R3"] {
            view.player.reserved_cards.push(make_card(
                id,
                CardLevel::One,
                TokenBag::new(),
                TokenType::White,
            ));
        }
        let action = ProposedAction {
            reserved_card_id: Some(CardId::new("C7")),
            ..ProposedAction::default()
        };
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::ReserveLimitExceeded { count: 3, cap: 3 })
        );
    }

    #[test]
    fn reserve_of_unknown_card_rejected() {
        let view = make_view();
        let action = ProposedAction {
            reserved_card_id: Some(CardId::new("C99")),
            ..ProposedAction::default()
        };
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::CardNotFound {
                card_id: CardId::new("C99"),
            })
        );
    }

    #[test]
    fn blind_reserve_follows_deck_contents() {
        let view = make_view();
        let stocked = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Gold, 1)]),
            topdeck_level: Some(CardLevel::One),
            ..ProposedAction::default()
        };
        assert_eq!(validate(&view, &stocked), Ok(()));

        let exhausted = ProposedAction {
            topdeck_level: Some(CardLevel::Three),
            ..ProposedAction::default()
        };
        assert_eq!(
            validate(&view, &exhausted),
            Err(Rejection::DeckEmpty {
                level: CardLevel::Three,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Purchases
    // -----------------------------------------------------------------------

    fn purchase(card: &str) -> ProposedAction {
        ProposedAction {
            purchased_card_id: Some(CardId::new(card)),
            ..ProposedAction::default()
        }
    }

    #[test]
    fn purchase_pays_the_discounted_cost_exactly() {
        let mut view = make_view();
        view.player.discounts = TokenBag::from([(TokenType::Red, 1)]);
        view.player.held_tokens = TokenBag::from([(TokenType::Red, 2), (TokenType::Blue, 2)]);

        let mut action = purchase("C2");
        action.tokens_returned = TokenBag::from([(TokenType::Red, 2), (TokenType::Blue, 2)]);
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn underpayment_and_overpayment_both_rejected() {
        let mut view = make_view();
        view.player.discounts = TokenBag::from([(TokenType::Red, 1)]);
        view.player.held_tokens = TokenBag::from([(TokenType::Red, 3), (TokenType::Blue, 3)]);

        let expected = TokenBag::from([(TokenType::Red, 2), (TokenType::Blue, 2)]);
        for offered in [
            TokenBag::from([(TokenType::Red, 1), (TokenType::Blue, 2)]),
            TokenBag::from([(TokenType::Red, 2), (TokenType::Blue, 3)]),
        ] {
            let mut action = purchase("C2");
            action.tokens_returned = offered.clone();
            assert_eq!(
                validate(&view, &action),
                Err(Rejection::PaymentMismatch {
                    card_id: CardId::new("C2"),
                    expected: expected.clone(),
                    offered,
                })
            );
        }
    }

    #[test]
    fn purchase_may_pay_from_a_full_hand() {
        // Payment is not overflow change; the return-to-limit rule does not
        // apply to a purchase.
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 8), (TokenType::Green, 2)]);

        let mut action = purchase("C7");
        action.tokens_returned = TokenBag::from([(TokenType::Green, 2)]);
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn purchase_of_a_reserved_card_accepted() {
        let mut view = make_view();
        view.player.reserved_cards.push(make_card(
            "C42",
            CardLevel::Two,
            TokenBag::from([(TokenType::Brown, 1)]),
            TokenType::White,
        ));
        view.player.held_tokens = TokenBag::from([(TokenType::Brown, 1)]);

        let mut action = purchase("C42");
        action.tokens_returned = TokenBag::from([(TokenType::Brown, 1)]);
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn purchase_of_unknown_card_rejected() {
        let view = make_view();
        assert_eq!(
            validate(&view, &purchase("C99")),
            Err(Rejection::CardNotFound {
                card_id: CardId::new("C99"),
            })
        );
    }

    #[test]
    fn payment_must_actually_be_held() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::Green, 1)]);
        let mut action = purchase("C7");
        action.tokens_returned = TokenBag::from([(TokenType::Green, 2)]);
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::InsufficientHolding {
                kind: TokenType::Green,
                returning: 2,
                holding: 1,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Token takes
    // -----------------------------------------------------------------------

    #[test]
    fn short_distinct_take_rejected_on_a_stocked_board() {
        let view = make_view();
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Red, 1), (TokenType::Blue, 1)]),
            ..ProposedAction::default()
        };
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::MustTakeAvailableTypes {
                taken: 2,
                offered: 5,
            })
        );
    }

    #[test]
    fn short_distinct_take_allowed_on_a_depleted_board() {
        let mut view = make_view();
        view.board.available = TokenBag::from([
            (TokenType::Red, 4),
            (TokenType::Blue, 4),
            (TokenType::Gold, 5),
        ]);
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Red, 1), (TokenType::Blue, 1)]),
            ..ProposedAction::default()
        };
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn pair_take_at_the_supply_threshold() {
        let view = make_view();
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Red, 2)]),
            ..ProposedAction::default()
        };
        // Supply of 4 meets the default minimum of 4.
        assert_eq!(validate(&view, &action), Ok(()));
    }

    #[test]
    fn pair_take_one_below_the_threshold_rejected() {
        let mut view = make_view();
        view.board.available.set(TokenType::Red, 3);
        let action = ProposedAction {
            tokens_taken: TokenBag::from([(TokenType::Red, 2)]),
            ..ProposedAction::default()
        };
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::InsufficientPairSupply {
                kind: TokenType::Red,
                available: 3,
                required: 4,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Noble acquisition
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_noble_rejected_after_a_legal_purchase() {
        let mut view = make_view();
        view.player.held_tokens = TokenBag::from([(TokenType::White, 1)]);
        let mut action = purchase("C1");
        action.tokens_returned = TokenBag::from([(TokenType::White, 1)]);
        action.noble_tile_id = Some(NobleId::new("N9"));
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::NobleNotFound {
                noble_id: NobleId::new("N9"),
            })
        );
    }

    #[test]
    fn noble_thresholds_check_discounts_not_holdings() {
        let mut view = make_view();
        // Plenty of tokens, no discounts: the noble is still out of reach.
        view.player.held_tokens = TokenBag::from([(TokenType::White, 1)]);
        let mut action = purchase("C1");
        action.tokens_returned = TokenBag::from([(TokenType::White, 1)]);
        action.noble_tile_id = Some(NobleId::new("N1"));
        assert_eq!(
            validate(&view, &action),
            Err(Rejection::DiscountRequirementsUnmet {
                noble_id: NobleId::new("N1"),
                kind: TokenType::Blue,
                required: 3,
                discount: 0,
            })
        );
    }

    #[test]
    fn noble_acquired_alongside_a_purchase() {
        let mut view = make_view();
        view.player.discounts = TokenBag::from([(TokenType::Red, 3), (TokenType::Blue, 3)]);
        // C2 costs {red:3, blue:2}; the discounts cover it entirely.
        let mut action = purchase("C2");
        action.noble_tile_id = Some(NobleId::new("N1"));
        assert_eq!(validate(&view, &action), Ok(()));
    }
}
