//! Virtual soccer: a fixed card of simulated matches with five markets each.
//! Selections from here go to the virtual list only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::state::{MatchInfo, Selection};

pub const VIRTUAL_LEAGUE: &str = "Virtual Soccer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    FullTime,
    FirstHalf,
    TotalGoals,
    CorrectScore,
    BothTeamsToScore,
}

impl Market {
    pub const ALL: [Market; 5] = [
        Market::FullTime,
        Market::FirstHalf,
        Market::TotalGoals,
        Market::CorrectScore,
        Market::BothTeamsToScore,
    ];

    /// Prefix of the selection label, e.g. "Full Time" in "Full Time: 1".
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::FullTime => "Full Time",
            Self::FirstHalf => "1st Half",
            Self::TotalGoals => "Total Goals",
            Self::CorrectScore => "Correct Score",
            Self::BothTeamsToScore => "BTTS",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FullTime => "Full Time Result",
            Self::FirstHalf => "1st Half Result",
            Self::TotalGoals => "Total Goals",
            Self::CorrectScore => "Correct Score",
            Self::BothTeamsToScore => "Both Teams To Score",
        }
    }

    pub fn label(&self, outcome: &str) -> String {
        format!("{}: {}", self.prefix(), outcome)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirtualMatch {
    pub id: i64,
    pub home_team: &'static str,
    pub away_team: &'static str,
    pub markets: Vec<(Market, Vec<(&'static str, Decimal)>)>,
}

impl VirtualMatch {
    pub fn outcomes(&self, market: Market) -> &[(&'static str, Decimal)] {
        self.markets
            .iter()
            .find(|(m, _)| *m == market)
            .map(|(_, o)| o.as_slice())
            .unwrap_or(&[])
    }

    pub fn price(&self, market: Market, outcome: &str) -> Option<Decimal> {
        self.outcomes(market)
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, price)| *price)
    }

    /// Selection for the virtual list. Start time is the moment of selection.
    pub fn selection(&self, market: Market, outcome: &str, now: DateTime<Utc>) -> Option<Selection> {
        let odds = self.price(market, outcome)?;
        Some(Selection::new(
            self.id,
            market.label(outcome),
            odds,
            MatchInfo {
                home_team: self.home_team.to_string(),
                away_team: self.away_team.to_string(),
                league: VIRTUAL_LEAGUE.to_string(),
                start_time: now.to_rfc3339(),
            },
        ))
    }
}

/// The current virtual card.
pub fn catalog() -> Vec<VirtualMatch> {
    vec![
        VirtualMatch {
            id: 224,
            home_team: "V-ROMA",
            away_team: "V-JUVENTUS",
            markets: vec![
                (Market::FullTime, vec![("1", dec!(2.10)), ("X", dec!(3.20)), ("2", dec!(3.40))]),
                (Market::FirstHalf, vec![("1", dec!(2.80)), ("X", dec!(2.10)), ("2", dec!(4.10))]),
                (Market::TotalGoals, vec![
                    ("Under 1.5", dec!(3.10)), ("Over 1.5", dec!(1.30)),
                    ("Under 2.5", dec!(1.80)), ("Over 2.5", dec!(1.90)),
                    ("Under 3.5", dec!(1.25)), ("Over 3.5", dec!(3.50)),
                ]),
                (Market::CorrectScore, vec![
                    ("1:0", dec!(7.0)), ("0:0", dec!(9.0)), ("0:1", dec!(8.5)),
                    ("2:0", dec!(11.0)), ("1:1", dec!(6.5)), ("0:2", dec!(13.0)),
                ]),
                (Market::BothTeamsToScore, vec![("Yes", dec!(1.75)), ("No", dec!(1.95))]),
            ],
        },
        VirtualMatch {
            id: 225,
            home_team: "V-VALENCIA",
            away_team: "V-VILLARREAL",
            markets: vec![
                (Market::FullTime, vec![("1", dec!(2.50)), ("X", dec!(3.10)), ("2", dec!(2.80))]),
                (Market::FirstHalf, vec![("1", dec!(3.10)), ("X", dec!(2.00)), ("2", dec!(3.40))]),
                (Market::TotalGoals, vec![
                    ("Under 1.5", dec!(2.90)), ("Over 1.5", dec!(1.35)),
                    ("Under 2.5", dec!(1.75)), ("Over 2.5", dec!(1.95)),
                    ("Under 3.5", dec!(1.20)), ("Over 3.5", dec!(4.00)),
                ]),
                (Market::CorrectScore, vec![
                    ("1:0", dec!(8.0)), ("0:0", dec!(8.5)), ("0:1", dec!(9.0)),
                    ("2:0", dec!(13.0)), ("1:1", dec!(6.0)), ("0:2", dec!(15.0)),
                ]),
                (Market::BothTeamsToScore, vec![("Yes", dec!(1.80)), ("No", dec!(1.90))]),
            ],
        },
        VirtualMatch {
            id: 226,
            home_team: "V-MAN.CITY",
            away_team: "V-MAN.UNITED",
            markets: vec![
                (Market::FullTime, vec![("1", dec!(1.85)), ("X", dec!(3.60)), ("2", dec!(3.90))]),
                (Market::FirstHalf, vec![("1", dec!(2.40)), ("X", dec!(2.30)), ("2", dec!(4.50))]),
                (Market::TotalGoals, vec![
                    ("Under 1.5", dec!(4.20)), ("Over 1.5", dec!(1.18)),
                    ("Under 2.5", dec!(2.30)), ("Over 2.5", dec!(1.55)),
                    ("Under 3.5", dec!(1.45)), ("Over 3.5", dec!(2.50)),
                ]),
                (Market::CorrectScore, vec![
                    ("1:0", dec!(9.0)), ("0:0", dec!(15.0)), ("0:1", dec!(13.0)),
                    ("2:0", dec!(9.5)), ("1:1", dec!(8.0)), ("0:2", dec!(22.0)),
                ]),
                (Market::BothTeamsToScore, vec![("Yes", dec!(1.55)), ("No", dec!(2.30))]),
            ],
        },
    ]
}

pub fn find(id: i64) -> Option<VirtualMatch> {
    catalog().into_iter().find(|m| m.id == id)
}
