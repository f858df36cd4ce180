use crate::utils::{
  actor::BackendActor,
  currency::{DepositQuote, WithdrawQuote},
  payments,
  query::QueryKey,
  server::{AppError, StripeConfiguration, UserProfile},
  validation::{normalize_symbol, LimitOrder, MarketOrder}
};
use super::{queries::keys, use_actor, use_mutation, UseMutation};

/// Writes the app performs, and what each one refreshes when it succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationKind {
  PlaceOrder { symbol: String },
  CreateProfile,
  SaveProfile,
  Deposit,
  Withdraw,
  ConfigurePayments
}

impl MutationKind {
  pub fn invalidates(&self) -> Vec<QueryKey> {
    match self {
      MutationKind::PlaceOrder { symbol } => vec![
        keys::order_books(symbol),
        keys::balances(),
        keys::leaderboard(),
        keys::price_histories(symbol),
      ],
      MutationKind::CreateProfile => vec![keys::current_user_profile(), keys::coins_directory()],
      MutationKind::SaveProfile => vec![keys::current_user_profile()],
      MutationKind::Deposit | MutationKind::Withdraw => vec![keys::stablecoin_balance()],
      MutationKind::ConfigurePayments => vec![keys::stripe_configured()]
    }
  }
}

/* Orders */
#[derive(Clone)]
pub struct PlaceOrder {
  pub state: UseMutation<u64>,
  actor: BackendActor
}

impl PlaceOrder {
  pub async fn limit(&self, order: LimitOrder) -> Result<u64, AppError> {
    let symbol = normalize_symbol(&order.symbol)?;
    let kind = MutationKind::PlaceOrder { symbol: symbol.clone() };
    self.state.run(kind.invalidates(), self.actor.place_order(&symbol, order.side, order.price, order.quantity)).await
  }

  pub async fn market(&self, order: MarketOrder) -> Result<u64, AppError> {
    let symbol = normalize_symbol(&order.symbol)?;
    let kind = MutationKind::PlaceOrder { symbol: symbol.clone() };
    self.state.run(kind.invalidates(), self.actor.place_market_order(&symbol, order.side, order.amount)).await
  }
}

pub fn use_place_order() -> PlaceOrder {
  PlaceOrder { state: use_mutation(), actor: use_actor() }
}

/* Profiles */
#[derive(Clone)]
pub struct ProfileWrite {
  pub state: UseMutation<()>,
  actor: BackendActor
}

impl ProfileWrite {
  pub async fn create(&self, profile: UserProfile) -> Result<(), AppError> {
    self.state.run(MutationKind::CreateProfile.invalidates(), self.actor.create_caller_user_profile(&profile)).await
  }

  pub async fn save(&self, profile: UserProfile) -> Result<(), AppError> {
    self.state.run(MutationKind::SaveProfile.invalidates(), self.actor.save_caller_user_profile(&profile)).await
  }
}

pub fn use_profile_write() -> ProfileWrite {
  ProfileWrite { state: use_mutation(), actor: use_actor() }
}

/* Fiat ramps */
#[derive(Clone)]
pub struct FiatRamp {
  pub state: UseMutation<String>,
  actor: BackendActor
}

impl FiatRamp {
  pub async fn deposit(&self, quote: DepositQuote, cardholder_name: String) -> Result<String, AppError> {
    self.state.run(MutationKind::Deposit.invalidates(), payments::deposit(&self.actor, &quote, &cardholder_name)).await
  }

  pub async fn withdraw(&self, quote: WithdrawQuote, balance_cents: u64) -> Result<String, AppError> {
    self.state.run(MutationKind::Withdraw.invalidates(), payments::withdraw(&self.actor, &quote, balance_cents)).await
  }
}

pub fn use_fiat_ramp() -> FiatRamp {
  FiatRamp { state: use_mutation(), actor: use_actor() }
}

/* Admin */
#[derive(Clone)]
pub struct PaymentSetup {
  pub state: UseMutation<()>,
  actor: BackendActor
}

impl PaymentSetup {
  pub async fn configure(&self, config: StripeConfiguration) -> Result<(), AppError> {
    if config.secret_key.trim().is_empty() {
      return Err(AppError::InvalidInput("Secret key is required".to_string()));
    }
    self.state.run(MutationKind::ConfigurePayments.invalidates(), self.actor.set_stripe_configuration(&config)).await
  }
}

pub fn use_payment_setup() -> PaymentSetup {
  PaymentSetup { state: use_mutation(), actor: use_actor() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::rc::Rc;
  use crate::utils::{query::{run_mutation, QueryCache, QueryOptions}, transport::testing::MockTransport};
  use futures::executor::block_on;
  use serde_json::json;

  #[test]
  fn placing_an_order_invalidates_exactly_four_prefixes() {
    let keys = MutationKind::PlaceOrder { symbol: "ABC".into() }.invalidates();
    let shown = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();
    assert_eq!(shown, vec!["orderBook/ABC", "balance", "leaderboard", "priceHistory/ABC"]);
  }

  #[test]
  fn profile_and_ramp_invalidations() {
    assert_eq!(MutationKind::CreateProfile.invalidates(), vec![QueryKey::root("currentUserProfile"), QueryKey::root("coinsDirectory")]);
    assert_eq!(MutationKind::SaveProfile.invalidates(), vec![QueryKey::root("currentUserProfile")]);
    assert_eq!(MutationKind::Deposit.invalidates(), vec![QueryKey::root("balance").with("USDC")]);
    assert_eq!(MutationKind::Withdraw.invalidates(), MutationKind::Deposit.invalidates());
    assert_eq!(MutationKind::ConfigurePayments.invalidates(), vec![QueryKey::root("stripeConfigured")]);
  }

  #[test]
  fn order_refresh_leaves_other_symbols_cached() {
    let cache = QueryCache::default();
    let options = QueryOptions::default();
    let ours = keys::order_book("ABC", crate::utils::server::OrderSide::Buy, Some(20));
    let theirs = keys::order_book("XYZ", crate::utils::server::OrderSide::Buy, Some(20));
    let usdc = keys::stablecoin_balance();
    let profile = keys::current_user_profile();
    for key in [&ours, &theirs, &usdc, &profile] {
      cache.set(key.clone(), 1u64, 0);
    }

    let mock = Rc::new(MockTransport::default());
    mock.reply("placeOrder", Ok(json!(3)));
    let actor = BackendActor::new(mock);
    let kind = MutationKind::PlaceOrder { symbol: "ABC".into() };
    block_on(run_mutation(&cache, &kind.invalidates(), actor.place_order("ABC", crate::utils::server::OrderSide::Buy, 1.0, 1))).unwrap();

    assert_eq!(cache.fresh::<u64>(&ours, &options, 0), None);
    assert_eq!(cache.fresh::<u64>(&usdc, &options, 0), None);
    assert_eq!(cache.fresh::<u64>(&theirs, &options, 0), Some(1));
    assert_eq!(cache.fresh::<u64>(&profile, &options, 0), Some(1));
  }
}
