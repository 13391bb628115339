use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::state::{MatchInfo, Selection};

// Feed market ids under odds.sr1."3"
const MARKET_1X2: &str = "1";
const MARKET_HANDICAP: &str = "16";
const MARKET_TOTAL: &str = "18";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    pub sport_id: String,
    pub name: String,
    pub country: String,
    pub flag: Option<String>,
    pub is_popular: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
}

/// One match reshaped from the feed. Odds that the feed does not carry are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub league_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_logo: String,
    pub away_logo: String,
    pub start_time: String,
    pub status: MatchStatus,
    pub home_score: i64,
    pub away_score: i64,
    pub current_minute: String,
    pub odds1: Option<Decimal>,
    pub odds_x: Option<Decimal>,
    pub odds2: Option<Decimal>,
    pub handicap_value: Option<String>,
    pub odds_handicap1: Option<Decimal>,
    pub odds_handicap2: Option<Decimal>,
    pub total_value: Option<String>,
    pub odds_over: Option<Decimal>,
    pub odds_under: Option<Decimal>,
    /// Raw odds tree, passed through untouched.
    pub all_odds: Value,
    /// Listed in a top tournament.
    pub is_highlight: bool,
}

/// Match plus its league, as listed by `/api/matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedMatch {
    #[serde(flatten)]
    pub info: Match,
    pub league: League,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    /// Every priced outcome as `(label, odds)`.
    pub fn prices(&self) -> Vec<(String, Decimal)> {
        let mut out = Vec::new();
        for (label, odds) in [("1", self.odds1), ("X", self.odds_x), ("2", self.odds2)] {
            if let Some(o) = odds {
                out.push((label.to_string(), o));
            }
        }
        if let Some(hcp) = &self.handicap_value {
            if let Some(o) = self.odds_handicap1 {
                out.push((format!("Handicap {}: 1", hcp), o));
            }
            if let Some(o) = self.odds_handicap2 {
                out.push((format!("Handicap {}: 2", hcp), o));
            }
        }
        if let Some(total) = &self.total_value {
            if let Some(o) = self.odds_over {
                out.push((format!("Over {}", total), o));
            }
            if let Some(o) = self.odds_under {
                out.push((format!("Under {}", total), o));
            }
        }
        out
    }

    pub fn price(&self, label: &str) -> Option<Decimal> {
        self.prices()
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, o)| o)
    }

    /// Build a betslip selection with a frozen display snapshot.
    /// None if the outcome is unpriced or the id is not numeric.
    pub fn selection(&self, label: &str, league_name: &str) -> Option<Selection> {
        let match_id = self.id.parse::<i64>().ok()?;
        let odds = self.price(label)?;
        Some(Selection::new(
            match_id,
            label,
            odds,
            MatchInfo {
                home_team: self.home_team.clone(),
                away_team: self.away_team.clone(),
                league: league_name.to_string(),
                start_time: self.start_time.clone(),
            },
        ))
    }
}

impl ListedMatch {
    pub fn selection(&self, label: &str) -> Option<Selection> {
        self.info.selection(label, &self.league.name)
    }
}

/// Query filters of `/api/matches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub is_live: bool,
    pub is_highlight: bool,
    /// Tournament id; takes precedence over `is_live` for the upstream URL.
    pub league: Option<String>,
}

/// Client for the upstream odds feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn matches_url(&self, filter: &MatchFilter) -> String {
        match &filter.league {
            Some(id) => self.config.tournament_url.replace("{id}", id),
            None if filter.is_live => self.config.live_url.clone(),
            None => self.config.upcoming_url.clone(),
        }
    }

    pub async fn matches(&self, filter: &MatchFilter) -> Result<Vec<ListedMatch>, FeedError> {
        let url = self.matches_url(filter);
        let body = self.fetch_json(&url).await?;
        let matches = reshape_matches(&body, filter);
        debug!(
            count = matches.len(),
            live = filter.is_live,
            highlight = filter.is_highlight,
            "feed matches"
        );
        Ok(matches)
    }

    pub async fn get_match(&self, id: &str) -> Result<Option<ListedMatch>, FeedError> {
        let url = self.config.match_url.replace("{id}", id);
        let body = self.fetch_json(&url).await?;
        Ok(body.get("match").and_then(reshape_match))
    }

    /// Fetch any upstream JSON document as-is.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "feed returned error status");
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Reshape a feed listing. Matches without a tournament are dropped;
/// `is_live` keeps only running matches and `is_highlight` only those
/// from top tournaments.
pub fn reshape_matches(body: &Value, filter: &MatchFilter) -> Vec<ListedMatch> {
    let Some(raw) = body.get("matches").and_then(Value::as_array) else {
        return Vec::new();
    };
    raw.iter()
        .filter_map(reshape_match)
        .filter(|m| !filter.is_live || m.info.is_live())
        .filter(|m| !filter.is_highlight || m.info.is_highlight)
        .collect()
}

/// Reshape one raw feed match.
pub fn reshape_match(m: &Value) -> Option<ListedMatch> {
    let info = m.get("info_static")?;
    let tournament = info.get("tournament")?;
    let league_id = id_string(tournament.get("id")?)?;
    let dynamic = m.get("info_dynamic");

    let league = League {
        id: league_id.clone(),
        sport_id: "1".to_string(),
        name: localized(tournament.get("name")).unwrap_or_else(|| "Unknown".to_string()),
        country: localized(info.pointer("/category/name"))
            .unwrap_or_else(|| "International".to_string()),
        flag: None,
        is_popular: tournament
            .get("tags")
            .and_then(Value::as_array)
            .is_some_and(|tags| tags.iter().any(|t| t == "top")),
    };

    let is_highlight = league.is_popular;

    let status = match dynamic.and_then(|d| d.get("event_status")).and_then(Value::as_i64) {
        Some(0) | None => MatchStatus::Upcoming,
        Some(_) => MatchStatus::Live,
    };

    let odds = m.get("odds").cloned().unwrap_or(Value::Null);
    let main = odds.pointer(&format!("/sr1/3/{}/sp/_/out", MARKET_1X2));
    let (handicap_value, handicap) = first_line(&odds, MARKET_HANDICAP, "hcp=");
    let (total_value, total) = first_line(&odds, MARKET_TOTAL, "total=");

    let fixture = Match {
        id: id_string(m.get("id")?)?,
        league_id,
        home_team: localized(info.pointer("/competitor_home/name"))
            .unwrap_or_else(|| "Home Team".to_string()),
        away_team: localized(info.pointer("/competitor_away/name"))
            .unwrap_or_else(|| "Away Team".to_string()),
        home_logo: str_at(info, "/competitor_home/logo_url"),
        away_logo: str_at(info, "/competitor_away/logo_url"),
        start_time: start_time(info.get("start_time")),
        status,
        home_score: dynamic
            .and_then(|d| d.pointer("/score/home"))
            .and_then(Value::as_i64)
            .unwrap_or(0),
        away_score: dynamic
            .and_then(|d| d.pointer("/score/away"))
            .and_then(Value::as_i64)
            .unwrap_or(0),
        current_minute: dynamic
            .map(|d| str_at(d, "/clock/match_time"))
            .unwrap_or_default(),
        odds1: outcome(main, "1"),
        odds_x: outcome(main, "2"),
        odds2: outcome(main, "3"),
        handicap_value,
        odds_handicap1: outcome(handicap, "1714"),
        odds_handicap2: outcome(handicap, "1715"),
        total_value,
        odds_over: outcome(total, "12"),
        odds_under: outcome(total, "13"),
        all_odds: odds.clone(),
        is_highlight,
    };

    Some(ListedMatch {
        info: fixture,
        league,
    })
}

/// First specifier line of a market: its value (prefix stripped) and outcomes.
fn first_line<'a>(
    odds: &'a Value,
    market: &str,
    prefix: &str,
) -> (Option<String>, Option<&'a Value>) {
    let Some((key, line)) = odds
        .pointer(&format!("/sr1/3/{}/sp", market))
        .and_then(Value::as_object)
        .and_then(|sp| sp.iter().next())
    else {
        return (None, None);
    };
    (Some(key.replace(prefix, "")), line.get("out"))
}

fn outcome(out: Option<&Value>, id: &str) -> Option<Decimal> {
    out?.get(id)?.get("o").and_then(to_decimal)
}

fn to_decimal(v: &Value) -> Option<Decimal> {
    let parsed = match v {
        Value::String(s) if !s.is_empty() => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }?;
    (parsed > Decimal::ZERO).then_some(parsed)
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Names arrive either as `{ "en": "..." }` or as a plain string.
fn localized(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("en").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn str_at(v: &Value, pointer: &str) -> String {
    v.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Start time as RFC 3339. Numeric values are unix seconds or millis.
fn start_time(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ts| {
                if ts > 10_000_000_000 {
                    DateTime::<Utc>::from_timestamp_millis(ts)
                } else {
                    DateTime::<Utc>::from_timestamp(ts, 0)
                }
            })
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw_match(id: i64, event_status: i64) -> Value {
        json!({
            "id": id,
            "info_static": {
                "tournament": { "id": 663, "name": { "en": "Premier League" }, "tags": ["top"] },
                "category": { "name": { "en": "England" } },
                "competitor_home": { "name": { "en": "Arsenal" }, "logo_url": "https://img/ars.png" },
                "competitor_away": { "name": { "en": "Chelsea" } },
                "start_time": "2026-01-10T17:30:00Z"
            },
            "info_dynamic": {
                "event_status": event_status,
                "score": { "home": 1, "away": 0 },
                "clock": { "match_time": "33'" }
            },
            "odds": {
                "sr1": { "3": {
                    "1": { "sp": { "_": { "out": {
                        "1": { "o": "2.10" }, "2": { "o": 3.2 }, "3": { "o": "3.40" }
                    } } } },
                    "16": { "sp": { "hcp=-1.5": { "out": {
                        "1714": { "o": "3.75" }, "1715": { "o": "1.28" }
                    } } } },
                    "18": { "sp": { "total=2.5": { "out": {
                        "12": { "o": "1.90" }, "13": { "o": "1.95" }
                    } } } }
                } }
            }
        })
    }

    #[test]
    fn test_reshape_full_match() {
        let listed = reshape_match(&raw_match(61301159, 1)).unwrap();
        let m = &listed.info;

        assert_eq!(m.id, "61301159");
        assert_eq!(m.league_id, "663");
        assert_eq!(m.home_team, "Arsenal");
        assert_eq!(m.away_team, "Chelsea");
        assert_eq!(m.home_logo, "https://img/ars.png");
        assert_eq!(m.away_logo, "");
        assert_eq!(m.status, MatchStatus::Live);
        assert_eq!(m.home_score, 1);
        assert_eq!(m.current_minute, "33'");
        assert_eq!(m.odds1, Some(dec!(2.10)));
        assert_eq!(m.odds_x, Some(dec!(3.2)));
        assert_eq!(m.odds2, Some(dec!(3.40)));
        assert_eq!(m.handicap_value.as_deref(), Some("-1.5"));
        assert_eq!(m.odds_handicap1, Some(dec!(3.75)));
        assert_eq!(m.total_value.as_deref(), Some("2.5"));
        assert_eq!(m.odds_under, Some(dec!(1.95)));

        assert_eq!(listed.league.name, "Premier League");
        assert_eq!(listed.league.country, "England");
        assert!(listed.league.is_popular);
    }

    #[test]
    fn test_drops_matches_without_tournament() {
        let mut orphan = raw_match(2, 0);
        orphan["info_static"]
            .as_object_mut()
            .unwrap()
            .remove("tournament");
        let body = json!({ "matches": [raw_match(1, 0), orphan] });

        let matches = reshape_matches(&body, &MatchFilter::default());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].info.id, "1");
    }

    #[test]
    fn test_live_only_filter() {
        let body = json!({ "matches": [raw_match(1, 0), raw_match(2, 1)] });

        let live_only = MatchFilter {
            is_live: true,
            ..Default::default()
        };

        let live = reshape_matches(&body, &live_only);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].info.id, "2");
        assert_eq!(reshape_matches(&body, &MatchFilter::default()).len(), 2);
    }

    #[test]
    fn test_highlight_filter() {
        let mut minor = raw_match(2, 0);
        minor["info_static"]["tournament"]["tags"] = json!([]);
        let body = json!({ "matches": [raw_match(1, 0), minor] });
        let highlights = MatchFilter {
            is_highlight: true,
            ..Default::default()
        };

        let top = reshape_matches(&body, &highlights);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].info.id, "1");
        assert!(top[0].info.is_highlight);
        assert_eq!(reshape_matches(&body, &MatchFilter::default()).len(), 2);
    }

    #[test]
    fn test_missing_matches_key() {
        let all = MatchFilter::default();
        assert!(reshape_matches(&json!({}), &all).is_empty());
        assert!(reshape_matches(&json!({ "matches": null }), &all).is_empty());
    }

    #[test]
    fn test_missing_odds_are_none() {
        let mut raw = raw_match(5, 0);
        raw["odds"] = json!({});
        let m = reshape_match(&raw).unwrap().info;

        assert_eq!(m.odds1, None);
        assert_eq!(m.handicap_value, None);
        assert!(m.prices().is_empty());
    }

    #[test]
    fn test_selection_from_match() {
        let listed = reshape_match(&raw_match(77, 0)).unwrap();

        let sel = listed.selection("X").unwrap();
        assert_eq!(sel.match_id, 77);
        assert_eq!(sel.odds, dec!(3.2));
        assert_eq!(sel.match_info.league, "Premier League");
        assert_eq!(sel.match_info.start_time, "2026-01-10T17:30:00Z");

        assert_eq!(listed.info.price("Over 2.5"), Some(dec!(1.90)));
        assert_eq!(listed.info.price("Handicap -1.5: 2"), Some(dec!(1.28)));
        assert!(listed.selection("Correct Score: 1:0").is_none());
    }

    #[test]
    fn test_numeric_start_time() {
        assert_eq!(
            start_time(Some(&json!(1767987000))),
            "2026-01-09T19:30:00+00:00"
        );
        assert_eq!(
            start_time(Some(&json!(1767987000000i64))),
            "2026-01-09T19:30:00+00:00"
        );
        assert_eq!(start_time(None), "");
    }

    #[test]
    fn test_matches_url_precedence() {
        let client = FeedClient::new(FeedConfig::default()).unwrap();

        let by_league = MatchFilter {
            is_live: true,
            league: Some("626".to_string()),
            ..Default::default()
        };
        assert!(client.matches_url(&by_league).contains("tournament_id=626"));

        let live = MatchFilter {
            is_live: true,
            ..Default::default()
        };
        assert_eq!(client.matches_url(&live), client.config().live_url);
        assert_eq!(
            client.matches_url(&MatchFilter::default()),
            client.config().upcoming_url
        );
    }
}
