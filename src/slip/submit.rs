use futures_util::future::join_all;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, warn};

use super::odds::{potential_return, wire_amount};
use super::stake::{leg_wire_stake, validate_stake};
use crate::api::bets::{BetGateway, BetRequest, PlacedBet};
use crate::error::{SlipError, SubmitError};
use crate::state::{ListKind, Selection, SelectionStore};

/// Result of one leg's request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegOutcome {
    pub match_id: i64,
    pub selection: String,
    pub result: Result<PlacedBet, SubmitError>,
}

/// Per-leg results of submitting one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub kind: ListKind,
    pub legs: Vec<LegOutcome>,
    /// Return shown to the user, from the combined odds and full stake.
    pub potential_return: Decimal,
}

impl SubmissionReport {
    /// Every leg was accepted.
    pub fn is_success(&self) -> bool {
        self.legs.iter().all(|leg| leg.result.is_ok())
    }

    pub fn accepted(&self) -> impl Iterator<Item = &PlacedBet> {
        self.legs.iter().filter_map(|leg| leg.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &LegOutcome> {
        self.legs.iter().filter(|leg| leg.result.is_err())
    }

    /// First failure, for the single user-facing notification.
    pub fn first_error(&self) -> Option<&SubmitError> {
        self.legs.iter().find_map(|leg| leg.result.as_ref().err())
    }
}

/// One single bet per leg, each carrying an even share of the stake.
pub fn build_requests(list: &[Selection], stake: Decimal) -> Vec<BetRequest> {
    let leg_stake = wire_amount(leg_wire_stake(stake, list.len()));
    list.iter()
        .map(|item| BetRequest {
            match_id: item.match_id,
            selection: item.selection.clone(),
            odds: wire_amount(item.odds),
            stake: leg_stake.clone(),
            status: "pending".to_string(),
        })
        .collect()
}

/// Submit every leg of `kind` concurrently and wait for all of them.
///
/// The list is cleared only if every leg succeeds; accepted legs are not
/// rolled back when another leg fails. Placed regular and live legs are
/// recorded in the recent list.
pub async fn submit<G>(
    store: &mut SelectionStore,
    kind: ListKind,
    gateway: &G,
    timeout: Duration,
) -> Result<SubmissionReport, SlipError>
where
    G: BetGateway + ?Sized,
{
    let snapshot = store.snapshot();
    let list = snapshot.list(kind).to_vec();
    if list.is_empty() {
        return Err(SlipError::EmptySlip(kind));
    }
    let stake = validate_stake(snapshot.stake_for(kind), list.len())?;
    let requests = build_requests(&list, stake);

    let results = join_all(requests.into_iter().map(|request| async move {
        match tokio::time::timeout(timeout, gateway.place(request)).await {
            Ok(result) => result,
            Err(_) => Err(SubmitError::Timeout(timeout)),
        }
    }))
    .await;

    let legs: Vec<LegOutcome> = list
        .iter()
        .zip(results)
        .map(|(item, result)| LegOutcome {
            match_id: item.match_id,
            selection: item.selection.clone(),
            result,
        })
        .collect();

    let report = SubmissionReport {
        kind,
        legs,
        potential_return: potential_return(&list, stake),
    };

    if report.is_success() {
        info!(
            ?kind,
            legs = report.legs.len(),
            %stake,
            potential_return = %report.potential_return,
            "betslip placed"
        );
        store.clear(kind);
        if matches!(kind, ListKind::Regular | ListKind::Live) {
            store.record_recent(&list);
        }
    } else {
        for leg in report.failures() {
            if let Err(e) = &leg.result {
                warn!(match_id = leg.match_id, selection = %leg.selection, error = %e, "leg failed");
            }
        }
        warn!(
            ?kind,
            failed = report.failures().count(),
            accepted = report.accepted().count(),
            "betslip submission failed, keeping selections"
        );
    }

    Ok(report)
}
