pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod server;
pub mod slip;
pub mod state;
pub mod virtuals;
