mod odds;
mod stake;
mod submit;

pub use odds::{combined_odds, display_odds, potential_return, wire_amount};
pub use stake::{leg_wire_stake, per_leg_stake, validate_stake};
pub use submit::{build_requests, submit, LegOutcome, SubmissionReport};

use crate::state::{ListKind, Selection, Snapshot};
use rust_decimal::Decimal;

/// True if `(match_id, selection)` appears in any of the given lists.
///
/// Odds buttons pass regular and live together so they light up no matter
/// which list their own selection would land in.
pub fn is_selected(match_id: i64, selection: &str, lists: &[&[Selection]]) -> bool {
    lists
        .iter()
        .any(|list| list.iter().any(|s| s.is(match_id, selection)))
}

/// Derived figures for one betslip tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlipTotals {
    pub kind: ListKind,
    pub legs: usize,
    pub combined_odds: Decimal,
    pub stake: Decimal,
    pub potential_return: Decimal,
}

impl SlipTotals {
    pub fn for_list(snapshot: &Snapshot, kind: ListKind) -> Self {
        let list = snapshot.list(kind);
        let stake = snapshot.stake_for(kind);
        Self {
            kind,
            legs: list.len(),
            combined_odds: combined_odds(list),
            stake,
            potential_return: potential_return(list, stake),
        }
    }

    /// Submission is possible with at least one leg and a stake that
    /// stays positive on every leg.
    pub fn can_submit(&self) -> bool {
        self.legs > 0 && validate_stake(self.stake, self.legs).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MatchInfo, SelectionStore};
    use rust_decimal_macros::dec;

    fn sel(match_id: i64, label: &str, odds: Decimal) -> Selection {
        Selection::new(
            match_id,
            label,
            odds,
            MatchInfo {
                home_team: "V-ROMA".to_string(),
                away_team: "V-JUVENTUS".to_string(),
                league: "Virtual Soccer".to_string(),
                start_time: "2026-01-10T18:00:00Z".to_string(),
            },
        )
    }

    #[test]
    fn test_is_selected_any_list() {
        let regular = vec![sel(1, "1", dec!(2.10))];
        let live = vec![sel(2, "X", dec!(3.20))];

        assert!(is_selected(1, "1", &[regular.as_slice(), live.as_slice()]));
        assert!(is_selected(2, "X", &[regular.as_slice(), live.as_slice()]));
        assert!(!is_selected(2, "X", &[regular.as_slice()]));
        assert!(!is_selected(1, "2", &[regular.as_slice(), live.as_slice()]));
        assert!(!is_selected(1, "1", &[]));
    }

    #[test]
    fn test_totals_for_regular_tab() {
        let mut store = SelectionStore::default();
        store.add_item(sel(1, "1", dec!(2.10)), false);
        store.add_item(sel(2, "X", dec!(3.20)), false);
        store.set_stake(dec!(1000));

        let totals = SlipTotals::for_list(&store.snapshot(), ListKind::Regular);
        assert_eq!(totals.legs, 2);
        assert_eq!(totals.combined_odds, dec!(6.72));
        assert_eq!(totals.potential_return, dec!(6720));
        assert!(totals.can_submit());
    }

    #[test]
    fn test_totals_use_virtual_stake() {
        let mut store = SelectionStore::default();
        store.add_virtual_item(sel(224, "Full Time: 1", dec!(2.10)));
        store.set_stake(dec!(1000));
        store.set_virtual_stake(dec!(10));

        let totals = SlipTotals::for_list(&store.snapshot(), ListKind::Virtual);
        assert_eq!(totals.stake, dec!(10));
        assert_eq!(totals.potential_return, dec!(21));
    }

    #[test]
    fn test_live_changes_do_not_move_regular_totals() {
        let mut store = SelectionStore::default();
        store.add_item(sel(1, "1", dec!(2.10)), false);
        let before = SlipTotals::for_list(&store.snapshot(), ListKind::Regular);

        store.add_item(sel(9, "2", dec!(5.00)), true);

        let after = SlipTotals::for_list(&store.snapshot(), ListKind::Regular);
        assert_eq!(before, after);
    }

    #[test]
    fn test_overlapping_virtual_and_regular_stay_independent() {
        let mut store = SelectionStore::default();
        store.add_item(sel(224, "Full Time: 1", dec!(2.10)), false);
        store.add_virtual_item(sel(224, "Full Time: 1", dec!(2.40)));
        store.add_virtual_item(sel(225, "BTTS: No", dec!(1.90)));
        let snap = store.snapshot();

        assert!(!is_selected(225, "BTTS: No", &[snap.regular.as_slice(), snap.live.as_slice()]));
        assert!(is_selected(
            225,
            "BTTS: No",
            &[snap.regular.as_slice(), snap.live.as_slice(), snap.virtuals.as_slice()]
        ));

        store.remove_item(224, "Full Time: 1", ListKind::Regular);
        let snap = store.snapshot();
        assert!(!is_selected(224, "Full Time: 1", &[snap.regular.as_slice(), snap.live.as_slice()]));
        assert!(is_selected(224, "Full Time: 1", &[snap.virtuals.as_slice()]));
        assert_eq!(combined_odds(&snap.virtuals), dec!(4.56));
    }

    #[test]
    fn test_dust_stake_cannot_submit() {
        let mut store = SelectionStore::default();
        store.add_item(sel(1, "1", dec!(2.10)), false);
        store.add_item(sel(2, "X", dec!(3.20)), false);
        store.add_item(sel(3, "2", dec!(1.50)), false);
        store.set_stake(dec!(0.01));

        let totals = SlipTotals::for_list(&store.snapshot(), ListKind::Regular);
        assert!(!totals.can_submit());

        store.set_stake(dec!(0.06));
        assert!(SlipTotals::for_list(&store.snapshot(), ListKind::Regular).can_submit());
    }

    #[test]
    fn test_empty_tab_cannot_submit() {
        let store = SelectionStore::default();
        let totals = SlipTotals::for_list(&store.snapshot(), ListKind::Live);

        assert_eq!(totals.combined_odds, Decimal::ONE);
        assert_eq!(totals.potential_return, totals.stake);
        assert!(!totals.can_submit());
    }
}
