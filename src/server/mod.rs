mod routes;
mod storage;

pub use routes::build_router;
pub use storage::{leagues, sports, DemoStorage};

use crate::api::feed::FeedClient;
use crate::config::Config;

/// Shared state of the demo API.
pub struct AppState {
    pub feed: FeedClient,
    pub storage: DemoStorage,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            feed: FeedClient::new(config.feed.clone())?,
            storage: DemoStorage::new(),
        })
    }
}
