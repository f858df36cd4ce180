pub mod actor;
pub mod auth;
pub mod config;
pub mod currency;
pub mod identity;
pub mod orderbook;
pub mod payments;
pub mod query;
pub mod rank;
pub mod server;
pub mod transport;
pub mod trend_chart;
pub mod validation;
