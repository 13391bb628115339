pub mod bets;
pub mod feed;
