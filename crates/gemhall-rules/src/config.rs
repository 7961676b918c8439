//! Rule tunables for the Gemhall validator.
//!
//! The [`RuleSet`] struct bundles every table rule the validator consults so
//! that embedders and tests can override defaults field by field.

/// The table rules a game is played under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Maximum tokens a player may hold at the end of a turn (default: 10).
    ///
    /// Taking tokens past this limit obliges the player to return the
    /// overflow exactly -- never more, never less.
    pub hand_limit: i64,

    /// Maximum cards a player may hold reserved at once (default: 3).
    pub reservation_cap: usize,

    /// Minimum remaining board supply of a token type required before two
    /// of that type may be taken in one move (default: 4).
    pub pair_take_min_supply: i64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            hand_limit: 10,
            reservation_cap: 3,
            pair_take_min_supply: 4,
        }
    }
}
