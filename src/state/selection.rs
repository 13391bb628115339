use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which betslip list a selection lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Pre-match selections for the main betslip.
    Regular,
    /// Selections made while the match was live.
    Live,
    /// Previously placed selections, most recent first.
    Recent,
    /// Virtual-match selections with their own stake.
    Virtual,
}

impl ListKind {
    /// Regular or live, depending on the match status.
    pub fn for_status(is_live: bool) -> Self {
        if is_live {
            Self::Live
        } else {
            Self::Regular
        }
    }

    /// True for lists that use `virtual_stake` instead of `stake`.
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }
}

/// Display snapshot of a match, frozen when the selection is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    /// Opaque timestamp string, never parsed.
    pub start_time: String,
}

/// One leg of a bet: an outcome on a match at a locked-in price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub match_id: i64,
    /// Outcome label, e.g. "1", "X", "Full Time: 2".
    pub selection: String,
    /// Decimal (European) odds.
    pub odds: Decimal,
    pub match_info: MatchInfo,
}

impl Selection {
    pub fn new(
        match_id: i64,
        selection: impl Into<String>,
        odds: Decimal,
        match_info: MatchInfo,
    ) -> Self {
        Self {
            match_id,
            selection: selection.into(),
            odds,
            match_info,
        }
    }

    /// Identity within a list is the (match, outcome) pair.
    pub fn is(&self, match_id: i64, selection: &str) -> bool {
        self.match_id == match_id && self.selection == selection
    }

    pub fn same_key(&self, other: &Selection) -> bool {
        self.is(other.match_id, &other.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn info() -> MatchInfo {
        MatchInfo {
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            league: "Premier League".to_string(),
            start_time: "2025-12-27T20:15:00Z".to_string(),
        }
    }

    #[test]
    fn test_identity_ignores_odds() {
        let a = Selection::new(7, "1", dec!(2.10), info());
        let b = Selection::new(7, "1", dec!(2.35), info());
        let c = Selection::new(7, "X", dec!(2.10), info());

        assert!(a.same_key(&b));
        assert!(!a.same_key(&c));
        assert!(a.is(7, "1"));
        assert!(!a.is(8, "1"));
    }

    #[test]
    fn test_list_kind_for_status() {
        assert_eq!(ListKind::for_status(true), ListKind::Live);
        assert_eq!(ListKind::for_status(false), ListKind::Regular);
        assert!(ListKind::Virtual.is_virtual());
        assert!(!ListKind::Recent.is_virtual());
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let sel = Selection::new(42, "X", dec!(3.20), info());
        let json = serde_json::to_value(&sel).unwrap();

        assert_eq!(json["matchId"], 42);
        assert_eq!(json["matchInfo"]["homeTeam"], "Arsenal");
        assert_eq!(json["matchInfo"]["startTime"], "2025-12-27T20:15:00Z");
    }
}
