use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub betslip: BetslipConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the demo API listens on. `BETSLIP_BIND` overrides it.
    pub bind: String,
    /// Base URL clients use for bet submission.
    pub api_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            api_base: "http://127.0.0.1:5000".to_string(),
        }
    }
}

/// Upstream odds feed and pass-through endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub upcoming_url: String,
    pub live_url: String,
    /// Per-tournament listing; `{id}` is replaced with the tournament id.
    pub tournament_url: String,
    /// Single match; `{id}` is replaced with the match id.
    pub match_url: String,
    pub counters_url: String,
    pub virtual_offer_url: String,
    pub virtual_timing_url: String,
    /// Client geolocation lookup.
    pub location_url: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            upcoming_url: "https://betmaster.com/api/feed/sr/matches/main/upcoming?sport_id=sr%3Asport%3A1&markets_set=main_extended&market=other".to_string(),
            live_url: "https://betmaster.com/api/feed/sr/matches/sport/live?sport_id=sr%3Asport%3A1&markets_set=main_extended&market=other".to_string(),
            tournament_url: "https://betmaster.com/api/feed/sr/matches/sport/in-tournament?markets_set=main_extended&tournament_id={id}&market=other".to_string(),
            match_url: "https://betmaster.com/api/feed/sr/matches/{id}".to_string(),
            counters_url: "https://betmaster.com/api/feed/sr/matches/counters?market=other".to_string(),
            virtual_offer_url: "https://www.fortebet.ug/api/web/v1/virtual-soccer/offer".to_string(),
            virtual_timing_url: "https://zweb4ug.com/forteugvideo/api.php/timing".to_string(),
            location_url: "https://ipapi.co/json/".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BetslipConfig {
    /// Initial stake for both the main and the virtual slip.
    pub default_stake: Decimal,
    /// Maximum entries kept in the recent list.
    pub recent_capacity: usize,
    /// Per-leg timeout for bet submission.
    pub submit_timeout_secs: u64,
}

impl Default for BetslipConfig {
    fn default() -> Self {
        Self {
            default_stake: Decimal::from(1000),
            recent_capacity: 20,
            submit_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Bind address, honouring `BETSLIP_BIND`.
    pub fn bind_addr(&self) -> String {
        std::env::var("BETSLIP_BIND").unwrap_or_else(|_| self.server.bind.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.betslip.default_stake, dec!(1000));
        assert_eq!(config.betslip.recent_capacity, 20);
        assert_eq!(config.betslip.submit_timeout_secs, 10);
        assert!(config.feed.match_url.contains("{id}"));
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [general]
            log_level = "debug"

            [betslip]
            default_stake = "500"
            recent_capacity = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.betslip.default_stake, dec!(500));
        assert_eq!(config.betslip.recent_capacity, 5);
        assert_eq!(config.betslip.submit_timeout_secs, 10);
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }
}
