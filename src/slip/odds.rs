use rust_decimal::{Decimal, RoundingStrategy};

use crate::state::Selection;

/// Accumulator odds: the product of every leg's odds.
/// An empty list yields 1, the multiplicative identity.
pub fn combined_odds(list: &[Selection]) -> Decimal {
    list.iter().map(|s| s.odds).product()
}

/// Payout if every leg wins: `stake * combined_odds`.
pub fn potential_return(list: &[Selection], stake: Decimal) -> Decimal {
    stake * combined_odds(list)
}

/// Odds as shown on buttons and the slip footer (3 dp).
/// Presentation only; never feed the result back into arithmetic.
pub fn display_odds(odds: Decimal) -> String {
    format!("{:.3}", round_half_up(odds, 3))
}

/// Amount as sent on the wire to the bet endpoint (2 dp).
pub fn wire_amount(amount: Decimal) -> String {
    format!("{:.2}", round_half_up(amount, 2))
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
