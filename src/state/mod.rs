mod selection;
mod store;

pub use selection::{ListKind, MatchInfo, Selection};
pub use store::{SelectionStore, Snapshot};
