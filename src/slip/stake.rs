use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::SlipError;

/// Stake per leg when N legs go out as N single bets.
///
/// Splits the total evenly. Zero legs yields zero.
pub fn per_leg_stake(total_stake: Decimal, leg_count: usize) -> Decimal {
    if leg_count == 0 {
        return Decimal::ZERO;
    }
    total_stake / Decimal::from(leg_count)
}

/// Per-leg stake as it goes on the wire, rounded to 2 dp.
pub fn leg_wire_stake(total_stake: Decimal, leg_count: usize) -> Decimal {
    per_leg_stake(total_stake, leg_count)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Submission requires a positive stake on every leg after the split
/// and rounding, not just a positive total.
pub fn validate_stake(stake: Decimal, leg_count: usize) -> Result<Decimal, SlipError> {
    if stake > Decimal::ZERO && leg_wire_stake(stake, leg_count) > Decimal::ZERO {
        Ok(stake)
    } else {
        Err(SlipError::InvalidStake(stake))
    }
}
