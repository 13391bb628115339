use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::api::bets::{BetRequest, PlacedBet};
use crate::api::feed::{League, Sport};

const BET_STATUSES: [&str; 3] = ["pending", "won", "lost"];

/// Tournaments with verified feed endpoints, grouped by country:
/// (country, flag, [(tournament id, name)]).
const TOURNAMENTS: [(&str, &str, &[(&str, &str)]); 6] = [
    ("England", "GB", &[
        ("663", "Premier League"),
        ("113", "Championship"),
        ("3102", "EFL Cup"),
        ("2232", "FA Cup"),
        ("26", "League One"),
        ("116", "League Two"),
        ("2458", "National League"),
    ]),
    ("Spain", "ES", &[
        ("626", "LaLiga"),
        ("627", "LaLiga 2"),
        ("3293", "Super Copa"),
        ("14337", "U19 Division de Honor Juvenil"),
    ]),
    ("Germany", "DE", &[
        ("599", "Bundesliga"),
        ("437", "Bundesliga 2"),
        ("2496", "DFB-Pokal"),
    ]),
    ("Italy", "IT", &[("576", "Serie A"), ("574", "Coppa Italia")]),
    ("France", "FR", &[("424", "Ligue 1"), ("2325", "Ligue 2")]),
    ("International", "UN", &[
        ("2244", "Champions League"),
        ("2246", "Europa League"),
    ]),
];

pub fn sports() -> Vec<Sport> {
    vec![Sport {
        id: "1".to_string(),
        name: "Soccer".to_string(),
        slug: "soccer".to_string(),
    }]
}

pub fn leagues() -> Vec<League> {
    TOURNAMENTS
        .iter()
        .flat_map(|(country, flag, list)| {
            list.iter().map(move |(id, name)| League {
                id: id.to_string(),
                sport_id: "1".to_string(),
                name: name.to_string(),
                country: country.to_string(),
                flag: Some(flag.to_string()),
                is_popular: true,
            })
        })
        .collect()
}

/// Demo bet storage. Accepted bets are echoed back, never kept.
#[derive(Debug, Default)]
pub struct DemoStorage {
    last_id: AtomicI64,
}

impl DemoStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a bet and echo it with a generated id.
    /// The error string is the 400 message.
    pub fn create_bet(&self, bet: BetRequest) -> Result<PlacedBet, String> {
        validate(&bet)?;
        let now = Utc::now();
        Ok(PlacedBet {
            id: self.next_id(now.timestamp_millis()).to_string(),
            match_id: bet.match_id,
            selection: bet.selection,
            odds: bet.odds,
            stake: bet.stake,
            status: bet.status,
            created_at: Some(now.to_rfc3339()),
        })
    }

    /// Always empty.
    pub fn bets(&self) -> Vec<PlacedBet> {
        Vec::new()
    }

    /// Millisecond timestamp, bumped past the previous id when two bets
    /// land in the same millisecond.
    fn next_id(&self, now_ms: i64) -> i64 {
        let mut last = self.last_id.load(Ordering::Relaxed);
        loop {
            let next = now_ms.max(last + 1);
            match self
                .last_id
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(current) => last = current,
            }
        }
    }
}

fn validate(bet: &BetRequest) -> Result<(), String> {
    if bet.selection.trim().is_empty() {
        return Err("Selection is required".to_string());
    }
    positive_amount("odds", &bet.odds)?;
    positive_amount("stake", &bet.stake)?;
    if !BET_STATUSES.contains(&bet.status.as_str()) {
        return Err(format!("Invalid status: {}", bet.status));
    }
    Ok(())
}

fn positive_amount(field: &str, value: &str) -> Result<Decimal, String> {
    match Decimal::from_str(value) {
        Ok(d) if d > Decimal::ZERO => Ok(d),
        _ => Err(format!("Invalid {}: expected a positive decimal", field)),
    }
}
