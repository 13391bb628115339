use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::storage::{leagues, sports};
use super::AppState;
use crate::api::bets::{BetRequest, ErrorBody, BETS_PATH};
use crate::api::feed::MatchFilter;
use crate::virtuals;

type S = Arc<AppState>;

pub fn build_router(state: S) -> Router {
    Router::new()
        .route("/api/sports", get(list_sports))
        .route("/api/leagues", get(list_leagues))
        .route("/api/matches", get(list_matches))
        .route("/api/matches/:id", get(get_match))
        .route(BETS_PATH, get(list_bets).post(create_bet))
        .route("/api/virtual/matches", get(list_virtual_matches))
        .route("/api/proxy/virtual-offer", get(virtual_offer))
        .route("/api/proxy/virtual-timing", get(virtual_timing))
        .route("/api/proxy/location", get(location))
        .route("/api/counters", get(counters))
        .with_state(state)
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
        .into_response()
}

// ── Catalogue ───────────────────────────────────────────────────────────────

async fn list_sports() -> Response {
    Json(sports()).into_response()
}

async fn list_leagues() -> Response {
    Json(leagues()).into_response()
}

// ── Matches ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchesQuery {
    is_live: Option<String>,
    is_highlight: Option<String>,
    league: Option<String>,
}

impl From<MatchesQuery> for MatchFilter {
    fn from(q: MatchesQuery) -> Self {
        Self {
            is_live: q.is_live.as_deref() == Some("true"),
            is_highlight: q.is_highlight.as_deref() == Some("true"),
            league: q.league.filter(|l| !l.is_empty()),
        }
    }
}

/// Feed failures degrade to an empty listing.
async fn list_matches(State(state): State<S>, Query(query): Query<MatchesQuery>) -> Response {
    let filter = MatchFilter::from(query);
    match state.feed.matches(&filter).await {
        Ok(matches) => Json(matches).into_response(),
        Err(e) => {
            warn!(error = %e, ?filter, "failed to load matches");
            Json(Vec::<serde_json::Value>::new()).into_response()
        }
    }
}

async fn get_match(State(state): State<S>, Path(id): Path<String>) -> Response {
    match state.feed.get_match(&id).await {
        Ok(Some(listed)) => Json(listed.info).into_response(),
        Ok(None) => error(StatusCode::NOT_FOUND, "Match not found"),
        Err(e) => {
            warn!(match_id = %id, error = %e, "failed to load match");
            error(StatusCode::NOT_FOUND, "Match not found")
        }
    }
}

// ── Bets ────────────────────────────────────────────────────────────────────

async fn create_bet(
    State(state): State<S>,
    payload: Result<Json<BetRequest>, JsonRejection>,
) -> Response {
    let Json(bet) = match payload {
        Ok(body) => body,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    match state.storage.create_bet(bet) {
        Ok(placed) => {
            info!(
                bet_id = %placed.id,
                match_id = placed.match_id,
                selection = %placed.selection,
                odds = %placed.odds,
                stake = %placed.stake,
                "bet accepted"
            );
            (StatusCode::CREATED, Json(placed)).into_response()
        }
        Err(message) => error(StatusCode::BAD_REQUEST, message),
    }
}

async fn list_bets(State(state): State<S>) -> Response {
    Json(state.storage.bets()).into_response()
}

// ── Virtual ─────────────────────────────────────────────────────────────────

async fn list_virtual_matches() -> Response {
    let card: Vec<_> = virtuals::catalog()
        .into_iter()
        .map(|m| {
            let markets: Vec<_> = m
                .markets
                .iter()
                .map(|(market, outcomes)| {
                    json!({
                        "title": market.title(),
                        "outcomes": outcomes
                            .iter()
                            .map(|(outcome, odds)| json!({
                                "selection": market.label(outcome),
                                "label": outcome,
                                "odds": odds,
                            }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            json!({
                "id": m.id,
                "homeTeam": m.home_team,
                "awayTeam": m.away_team,
                "markets": markets,
            })
        })
        .collect();
    Json(card).into_response()
}

// ── Pass-through ────────────────────────────────────────────────────────────

async fn passthrough(state: &AppState, url: &str, what: &str) -> Response {
    match state.feed.fetch_json(url).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            warn!(url, error = %e, "upstream fetch failed");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch {}", what),
            )
        }
    }
}

async fn virtual_offer(State(state): State<S>) -> Response {
    let url = state.feed.config().virtual_offer_url.clone();
    passthrough(&state, &url, "virtual offer").await
}

async fn virtual_timing(State(state): State<S>) -> Response {
    let url = state.feed.config().virtual_timing_url.clone();
    passthrough(&state, &url, "virtual timing").await
}

async fn location(State(state): State<S>) -> Response {
    let url = state.feed.config().location_url.clone();
    passthrough(&state, &url, "location").await
}

async fn counters(State(state): State<S>) -> Response {
    let url = state.feed.config().counters_url.clone();
    passthrough(&state, &url, "counters").await
}
