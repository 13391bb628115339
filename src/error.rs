use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;

use crate::state::ListKind;

/// Failure of a single bet-submission request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// 400: the server rejected the bet body.
    #[error("bet rejected: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("failed to place bet (status {0})")]
    Rejected(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A betslip that cannot be submitted at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlipError {
    #[error("{0:?} betslip is empty")]
    EmptySlip(ListKind),

    #[error("stake must be greater than zero, got {0}")]
    InvalidStake(Decimal),
}

/// Upstream odds-feed failure.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed responded with status {0}")]
    Status(u16),
}
