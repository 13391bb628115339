use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use super::selection::{ListKind, Selection};
use crate::config::BetslipConfig;

/// Immutable view of every betslip list and both stakes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub regular: Vec<Selection>,
    pub live: Vec<Selection>,
    /// Most recently placed first.
    pub recent: Vec<Selection>,
    pub virtuals: Vec<Selection>,
    /// Shared by the regular, live and recent tabs.
    pub stake: Decimal,
    pub virtual_stake: Decimal,
}

impl Snapshot {
    pub fn list(&self, kind: ListKind) -> &[Selection] {
        match kind {
            ListKind::Regular => &self.regular,
            ListKind::Live => &self.live,
            ListKind::Recent => &self.recent,
            ListKind::Virtual => &self.virtuals,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Selection> {
        match kind {
            ListKind::Regular => &mut self.regular,
            ListKind::Live => &mut self.live,
            ListKind::Recent => &mut self.recent,
            ListKind::Virtual => &mut self.virtuals,
        }
    }

    /// Stake that applies to a list.
    pub fn stake_for(&self, kind: ListKind) -> Decimal {
        if kind.is_virtual() {
            self.virtual_stake
        } else {
            self.stake
        }
    }

    pub fn contains(&self, kind: ListKind, match_id: i64, selection: &str) -> bool {
        self.list(kind).iter().any(|s| s.is(match_id, selection))
    }
}

/// Single source of truth for one session's betslip.
///
/// Every mutation publishes the new [`Snapshot`] to subscribers before it
/// returns, so a read right after a write always sees the write.
/// Entries are unique per `(match_id, selection)` within a list: adding an
/// existing key replaces the entry in place.
#[derive(Debug)]
pub struct SelectionStore {
    tx: watch::Sender<Snapshot>,
    recent_capacity: usize,
}

impl SelectionStore {
    pub fn new(config: &BetslipConfig) -> Self {
        let initial = Snapshot {
            stake: config.default_stake.max(Decimal::ZERO),
            virtual_stake: config.default_stake.max(Decimal::ZERO),
            ..Default::default()
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            recent_capacity: config.recent_capacity,
        }
    }

    // =========================================================================
    // ADD / REMOVE
    // =========================================================================

    /// Add to the live list if `is_live`, else to the regular list.
    pub fn add_item(&mut self, item: Selection, is_live: bool) {
        self.upsert(ListKind::for_status(is_live), item);
    }

    pub fn add_virtual_item(&mut self, item: Selection) {
        self.upsert(ListKind::Virtual, item);
    }

    /// Remove `(match_id, selection)` from a list. Missing entries are a no-op.
    pub fn remove_item(&mut self, match_id: i64, selection: &str, kind: ListKind) {
        let removed = self.tx.send_if_modified(|state| {
            let list = state.list_mut(kind);
            let before = list.len();
            list.retain(|s| !s.is(match_id, selection));
            list.len() != before
        });
        if removed {
            debug!(match_id, selection, ?kind, "selection removed");
        }
    }

    pub fn remove_virtual_item(&mut self, match_id: i64, selection: &str) {
        self.remove_item(match_id, selection, ListKind::Virtual);
    }

    /// Add the item if its key is absent from the target list, remove it
    /// otherwise. Returns whether the item is selected afterwards.
    pub fn toggle_item(&mut self, item: Selection, is_live: bool) -> bool {
        self.toggle(ListKind::for_status(is_live), item)
    }

    pub fn toggle_virtual_item(&mut self, item: Selection) -> bool {
        self.toggle(ListKind::Virtual, item)
    }

    /// Copy a recent entry back into the regular list.
    /// Returns false if the key is not in the recent list.
    pub fn reuse_recent(&mut self, match_id: i64, selection: &str) -> bool {
        let found = self
            .tx
            .borrow()
            .recent
            .iter()
            .find(|s| s.is(match_id, selection))
            .cloned();
        match found {
            Some(item) => {
                self.upsert(ListKind::Regular, item);
                true
            }
            None => false,
        }
    }

    /// Push placed selections to the front of the recent list.
    /// Keeps batch order, drops older duplicates, trims to capacity.
    pub fn record_recent(&mut self, items: &[Selection]) {
        if items.is_empty() {
            return;
        }
        let capacity = self.recent_capacity;
        self.tx.send_modify(|state| {
            for item in items.iter().rev() {
                state.recent.retain(|s| !s.same_key(item));
                state.recent.insert(0, item.clone());
            }
            state.recent.truncate(capacity);
        });
        debug!(count = items.len(), "recorded recent selections");
    }

    // =========================================================================
    // CLEAR / STAKE
    // =========================================================================

    /// Empty a list. Stakes are untouched.
    pub fn clear(&mut self, kind: ListKind) {
        self.tx.send_if_modified(|state| {
            let list = state.list_mut(kind);
            let had_items = !list.is_empty();
            list.clear();
            had_items
        });
    }

    pub fn clear_virtual(&mut self) {
        self.clear(ListKind::Virtual);
    }

    /// Replace the main stake. Negative amounts clamp to zero.
    pub fn set_stake(&mut self, amount: Decimal) {
        let amount = amount.max(Decimal::ZERO);
        self.tx.send_modify(|state| state.stake = amount);
    }

    /// Replace the virtual stake. Negative amounts clamp to zero.
    pub fn set_virtual_stake(&mut self, amount: Decimal) {
        let amount = amount.max(Decimal::ZERO);
        self.tx.send_modify(|state| state.virtual_stake = amount);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Observe every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// True if the key is in the regular or the live list.
    pub fn is_selected(&self, match_id: i64, selection: &str) -> bool {
        let state = self.tx.borrow();
        state.contains(ListKind::Regular, match_id, selection)
            || state.contains(ListKind::Live, match_id, selection)
    }

    pub fn len(&self, kind: ListKind) -> usize {
        self.tx.borrow().list(kind).len()
    }

    pub fn is_empty(&self, kind: ListKind) -> bool {
        self.len(kind) == 0
    }

    fn upsert(&mut self, kind: ListKind, item: Selection) {
        debug!(
            match_id = item.match_id,
            selection = %item.selection,
            odds = %item.odds,
            ?kind,
            "selection added"
        );
        self.tx.send_modify(|state| {
            let list = state.list_mut(kind);
            match list.iter_mut().find(|s| s.same_key(&item)) {
                Some(existing) => *existing = item,
                None => list.push(item),
            }
        });
    }

    fn toggle(&mut self, kind: ListKind, item: Selection) -> bool {
        let present = self
            .tx
            .borrow()
            .contains(kind, item.match_id, &item.selection);
        if present {
            self.remove_item(item.match_id, &item.selection, kind);
            false
        } else {
            self.upsert(kind, item);
            true
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(&BetslipConfig::default())
    }
}
