use anyhow::{bail, Result};
use std::time::Duration;

use betslip::api::bets::HttpBetGateway;
use betslip::api::feed::{FeedClient, MatchFilter};
use betslip::config::Config;
use betslip::format::{format_currency, Currency};
use betslip::slip::{self, display_odds, SlipTotals};
use betslip::state::{ListKind, SelectionStore};

/// Build a two-leg slip from the upcoming feed and submit it to a running
/// betslip server.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cfg = Config::load_or_default("config.toml")?;
    let currency: Currency = std::env::var("BETSLIP_CURRENCY")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or_default();

    let feed = FeedClient::new(cfg.feed.clone())?;
    let matches = feed.matches(&MatchFilter::default()).await?;
    println!("Fetched {} upcoming matches", matches.len());

    let mut store = SelectionStore::new(&cfg.betslip);
    for listed in matches.iter().take(2) {
        if let Some(sel) = listed.selection("1") {
            println!(
                "+ {} vs {} | {} @ {}",
                sel.match_info.home_team,
                sel.match_info.away_team,
                sel.selection,
                display_odds(sel.odds)
            );
            store.add_item(sel, listed.info.is_live());
        }
    }
    if store.is_empty(ListKind::Regular) {
        bail!("no priced matches in the feed");
    }

    let totals = SlipTotals::for_list(&store.snapshot(), ListKind::Regular);
    println!(
        "Legs: {} | Odds: {} | Stake: {} | Return: {}",
        totals.legs,
        display_odds(totals.combined_odds),
        format_currency(totals.stake, currency),
        format_currency(totals.potential_return, currency)
    );

    let timeout = Duration::from_secs(cfg.betslip.submit_timeout_secs);
    let gateway = HttpBetGateway::with_timeout(&cfg.server.api_base, timeout)?;
    let report = slip::submit(&mut store, ListKind::Regular, &gateway, timeout).await?;

    for bet in report.accepted() {
        println!("Placed bet {} on {} ({})", bet.id, bet.match_id, bet.selection);
    }
    match report.first_error() {
        Some(e) => println!("Submission failed: {}", e),
        None => println!("Slip submitted, recent list has {}", store.len(ListKind::Recent)),
    }
    Ok(())
}
