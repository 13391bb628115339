use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SubmitError;

pub const BETS_PATH: &str = "/api/bets";

/// Body of `POST /api/bets`. Amounts travel as 2-dp strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    pub match_id: i64,
    pub selection: String,
    pub odds: String,
    pub stake: String,
    #[serde(default = "pending")]
    pub status: String,
}

fn pending() -> String {
    "pending".to_string()
}

/// Bet record returned with 201.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBet {
    pub id: String,
    pub match_id: i64,
    pub selection: String,
    pub odds: String,
    pub stake: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `{ message }` body of a 400 or 500 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Bet-creation endpoint. One call per leg.
#[async_trait]
pub trait BetGateway: Send + Sync {
    async fn place(&self, bet: BetRequest) -> Result<PlacedBet, SubmitError>;
}

/// Gateway backed by the demo server's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBetGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpBetGateway {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{}", api_base.trim_end_matches('/'), BETS_PATH),
        }
    }

    pub fn with_timeout(api_base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", api_base.trim_end_matches('/'), BETS_PATH),
        })
    }
}

#[async_trait]
impl BetGateway for HttpBetGateway {
    async fn place(&self, bet: BetRequest) -> Result<PlacedBet, SubmitError> {
        let response = self.client.post(&self.url).json(&bet).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(response.json::<PlacedBet>().await?),
            StatusCode::BAD_REQUEST => {
                let body: ErrorBody = response.json().await?;
                Err(SubmitError::Validation(body.message))
            }
            status => Err(SubmitError::Rejected(status.as_u16())),
        }
    }
}
