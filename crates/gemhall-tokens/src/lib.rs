//! Token-counting primitives for the Gemhall turn-validation engine.
//!
//! Pure functions over [`TokenBag`] with full checked arithmetic -- no
//! silent overflows, no panics. The legality validator in `gemhall-rules`
//! composes these into its resource-accounting checks; nothing here reads
//! game state or produces a verdict.

use gemhall_types::{TokenBag, TokenType};

/// Sum of all counts in the bag, widened to avoid overflow.
#[must_use]
pub fn total(bag: &TokenBag) -> i64 {
    bag.iter()
        .fold(0_i64, |acc, (_, count)| acc.saturating_add(i64::from(count)))
}

/// The first token type with a negative count, with that count, if any.
///
/// This is the non-negativity witness: a `Some` return means the bag came
/// from an untrusted source and must be rejected outright.
#[must_use]
pub fn first_negative(bag: &TokenBag) -> Option<(TokenType, i32)> {
    bag.iter().find(|(_, count)| *count < 0)
}

/// The first token type for which `inner` exceeds `outer`, if any.
///
/// A `None` return means `inner` can be subtracted from `outer` without any
/// count going negative. Counts are compared as-is; callers reject negative
/// counts first.
#[must_use]
pub fn first_shortfall(outer: &TokenBag, inner: &TokenBag) -> Option<TokenType> {
    TokenType::ALL
        .into_iter()
        .find(|kind| inner.count(*kind) > outer.count(*kind))
}

/// The token types with a non-zero count, in token-type order.
#[must_use]
pub fn non_empty_kinds(bag: &TokenBag) -> Vec<TokenType> {
    bag.iter().map(|(kind, _)| kind).collect()
}

/// Whether every type other than `allowed` counts zero.
///
/// The count of `allowed` itself is unconstrained (including zero).
#[must_use]
pub fn zero_except(bag: &TokenBag, allowed: TokenType) -> bool {
    bag.iter().all(|(kind, _)| kind == allowed)
}

/// How many non-wildcard types have a positive count.
///
/// Against the board supply this answers "how many distinct colors could a
/// take-tokens move draw from right now".
#[must_use]
pub fn distinct_spendable_kinds(bag: &TokenBag) -> usize {
    bag.iter()
        .filter(|(kind, count)| !kind.is_wildcard() && *count > 0)
        .count()
}

/// A cost reduced by per-type discounts: `max(cost[t] - discounts[t], 0)`
/// for every type. A discount never drives a cost below zero.
#[must_use]
pub fn discounted_cost(cost: &TokenBag, discounts: &TokenBag) -> TokenBag {
    TokenType::ALL
        .into_iter()
        .map(|kind| {
            let remaining = cost.count(kind).saturating_sub(discounts.count(kind)).max(0);
            (kind, remaining)
        })
        .collect()
}

/// Whether `payment` settles `cost` exactly, type for type.
///
/// Not "at least": overpaying a type fails just like underpaying it.
#[must_use]
pub fn pays_exactly(payment: &TokenBag, cost: &TokenBag) -> bool {
    // Bags never store zero counts, so map equality is per-type equality.
    payment == cost
}
