pub mod aggregator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod providers;
pub mod state;
