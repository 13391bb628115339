use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display currency of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ugx,
    Usd,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ugx => "Sh",
            Self::Usd => "$",
        }
    }

    /// Shillings are shown without minor units.
    pub fn minor_digits(&self) -> u32 {
        match self {
            Self::Ugx => 0,
            Self::Usd => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ugx => write!(f, "UGX"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UGX" => Ok(Self::Ugx),
            "USD" => Ok(Self::Usd),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// Format an amount for display, e.g. `Sh 6,720` or `$6,720.00`.
///
/// Arithmetic happens before this; the result is for display only.
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    let digits = currency.minor_digits();
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.*}", digits as usize, rounded.abs());
    let (whole, frac) = match plain.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (plain.as_str(), None),
    };
    let grouped = group_thousands(whole);
    let number = match frac {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    };
    match currency {
        Currency::Ugx => format!("{}{} {}", sign, currency.symbol(), number),
        Currency::Usd => format!("{}{}{}", sign, currency.symbol(), number),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shillings() {
        assert_eq!(format_currency(dec!(6720), Currency::Ugx), "Sh 6,720");
        assert_eq!(format_currency(dec!(1234567.6), Currency::Ugx), "Sh 1,234,568");
        assert_eq!(format_currency(dec!(999), Currency::Ugx), "Sh 999");
        assert_eq!(format_currency(Decimal::ZERO, Currency::Ugx), "Sh 0");
    }

    #[test]
    fn test_dollars() {
        assert_eq!(format_currency(dec!(6720), Currency::Usd), "$6,720.00");
        assert_eq!(format_currency(dec!(21.5), Currency::Usd), "$21.50");
        assert_eq!(format_currency(dec!(-1000.005), Currency::Usd), "-$1,000.01");
    }

    #[test]
    fn test_parse_code() {
        assert_eq!("ugx".parse::<Currency>(), Ok(Currency::Ugx));
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert!("EUR".parse::<Currency>().is_err());
        assert_eq!(Currency::default().to_string(), "UGX");
    }
}
