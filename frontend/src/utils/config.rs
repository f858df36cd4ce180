use std::time::Duration;

pub const BACKEND_URL: &str = env!("BACKEND_URL");
pub const IDENTITY_PROVIDER_URL: &str = env!("IDENTITY_PROVIDER_URL");
pub const STRIPE_PUBLISHABLE_KEY: &str = env!("STRIPE_PUBLISHABLE_KEY");

/// Reserved balance symbol of the cent-denominated funds balance.
pub const STABLECOIN_SYMBOL: &str = "USDC";

pub const ORDER_BOOK_POLL: Duration = Duration::from_secs(5);
pub const PRICE_HISTORY_POLL: Duration = Duration::from_secs(10);
pub const RANKING_STALE_TIME: Duration = Duration::from_secs(30);

pub const ORDERBOOK_LEVELS: usize = 20;
pub const PRICE_HISTORY_POINTS: u64 = 120;

// II delegations are requested for 8 hours
pub const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);
pub const SESSION_STORAGE_KEY: &str = "squad.identity";
