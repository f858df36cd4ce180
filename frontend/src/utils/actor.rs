use std::rc::Rc;
use candid::Principal;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::server::{
  AppError, Coin, MarketCapTrendPoint, Order, OrderSide, PricePoint, ShoppingItem,
  StripeConfiguration, StripeSessionStatus, UserProfile, UserRole
};
use super::transport::Transport;
use super::validation::normalize_symbol;

fn arg<T: Serialize>(value: T) -> Result<Value, AppError> {
  serde_json::to_value(value).map_err(|e| AppError::SerializeError(e.to_string()))
}

/// Typed client for the squad canister.
#[derive(Clone)]
pub struct BackendActor {
  transport: Rc<dyn Transport>
}

impl BackendActor {
  pub fn new(transport: Rc<dyn Transport>) -> Self {
    Self { transport }
  }

  async fn invoke<T: DeserializeOwned>(&self, method: &str, args: Vec<Value>) -> Result<T, AppError> {
    let value = self.transport.call(method, args).await?;
    serde_json::from_value(value).map_err(|e| AppError::DeserializeError(format!("{}: {}", method, e)))
  }

  /// Writes act on the caller's own account, so they need a login.
  async fn update<T: DeserializeOwned>(&self, method: &str, args: Vec<Value>) -> Result<T, AppError> {
    if !self.transport.has_identity() {
      return Err(AppError::ActorUnavailable(format!("log in before calling {}", method)));
    }
    self.invoke(method, args).await
  }

  /* Profiles & roles */
  pub async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, AppError> {
    self.invoke("getCallerUserProfile", vec![]).await
  }

  pub async fn get_user_profile(&self, user: Principal) -> Result<Option<UserProfile>, AppError> {
    self.invoke("getUserProfile", vec![arg(user)?]).await
  }

  pub async fn get_public_user_profile(&self, user: Principal) -> Result<Option<UserProfile>, AppError> {
    self.invoke("getPublicUserProfile", vec![arg(user)?]).await
  }

  pub async fn create_caller_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
    self.update("createCallerUserProfile", vec![arg(profile)?]).await
  }

  pub async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
    self.update("saveCallerUserProfile", vec![arg(profile)?]).await
  }

  pub async fn get_caller_user_role(&self) -> Result<UserRole, AppError> {
    self.invoke("getCallerUserRole", vec![]).await
  }

  pub async fn is_caller_admin(&self) -> Result<bool, AppError> {
    self.invoke("isCallerAdmin", vec![]).await
  }

  pub async fn assign_caller_user_role(&self, user: Principal, role: UserRole) -> Result<(), AppError> {
    self.update("assignCallerUserRole", vec![arg(user)?, arg(role)?]).await
  }

  /* Market data */
  pub async fn get_balance(&self, symbol: &str) -> Result<u64, AppError> {
    let symbol = normalize_symbol(symbol)?;
    self.invoke("getBalance", vec![arg(symbol)?]).await
  }

  pub async fn get_order_book(&self, symbol: &str, side: OrderSide, depth: Option<u64>) -> Result<Vec<Order>, AppError> {
    let symbol = normalize_symbol(symbol)?;
    self.invoke("getOrderBook", vec![arg(symbol)?, arg(side)?, arg(depth)?]).await
  }

  pub async fn get_price_history(&self, symbol: &str, max_points: Option<u64>) -> Result<Vec<PricePoint>, AppError> {
    let symbol = normalize_symbol(symbol)?;
    self.invoke("getPriceHistory", vec![arg(symbol)?, arg(max_points)?]).await
  }

  pub async fn get_creator_cap_ranking(&self) -> Result<Vec<(Principal, u64)>, AppError> {
    self.invoke("getCreatorCapRanking", vec![]).await
  }

  pub async fn get_creator_coins_with_market_caps(&self) -> Result<Vec<(Principal, Vec<Coin>, u64)>, AppError> {
    self.invoke("getCreatorCoinsWithMarketCaps", vec![]).await
  }

  pub async fn get_market_cap_trend(&self, user: Principal) -> Result<Vec<MarketCapTrendPoint>, AppError> {
    self.invoke("getMarketCapTrend", vec![arg(user)?]).await
  }

  /* Orders */
  pub async fn place_order(&self, symbol: &str, side: OrderSide, price: f64, quantity: u64) -> Result<u64, AppError> {
    let symbol = normalize_symbol(symbol)?;
    self.update("placeOrder", vec![arg(symbol)?, arg(side)?, arg(price)?, arg(quantity)?]).await
  }

  pub async fn place_market_order(&self, symbol: &str, side: OrderSide, amount: u64) -> Result<u64, AppError> {
    let symbol = normalize_symbol(symbol)?;
    self.update("placeMarketOrder", vec![arg(symbol)?, arg(side)?, arg(amount)?]).await
  }

  /* Payments */
  pub async fn is_stripe_configured(&self) -> Result<bool, AppError> {
    self.invoke("isStripeConfigured", vec![]).await
  }

  pub async fn set_stripe_configuration(&self, config: &StripeConfiguration) -> Result<(), AppError> {
    self.update("setStripeConfiguration", vec![arg(config)?]).await
  }

  pub async fn create_checkout_session(&self, items: &[ShoppingItem], success_url: &str, cancel_url: &str) -> Result<String, AppError> {
    self.update("createCheckoutSession", vec![arg(items)?, arg(success_url)?, arg(cancel_url)?]).await
  }

  pub async fn create_stripe_session(&self, session_id: &str, amount_cents: u64) -> Result<(), AppError> {
    self.update("createStripeSession", vec![arg(session_id)?, arg(amount_cents)?]).await
  }

  pub async fn finalize_deposit(&self, session_id: &str) -> Result<(), AppError> {
    self.update("finalizeDeposit", vec![arg(session_id)?]).await
  }

  pub async fn complete_withdrawal(&self, session_id: &str, amount_cents: u64) -> Result<(), AppError> {
    self.update("completeWithdrawal", vec![arg(session_id)?, arg(amount_cents)?]).await
  }

  pub async fn get_stripe_session_status(&self, session_id: &str) -> Result<StripeSessionStatus, AppError> {
    self.invoke("getStripeSessionStatus", vec![arg(session_id)?]).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::transport::testing::MockTransport;
  use futures::executor::block_on;
  use serde_json::json;

  fn actor() -> (Rc<MockTransport>, BackendActor) {
    let mock = Rc::new(MockTransport::default());
    (mock.clone(), BackendActor::new(mock))
  }

  #[test]
  fn order_args_are_encoded_in_order() {
    let (mock, actor) = actor();
    mock.reply("placeOrder", Ok(json!(17)));

    let id = block_on(actor.place_order("  alice ", OrderSide::Buy, 1.5, 10)).unwrap();
    assert_eq!(id, 17);
    assert_eq!(mock.methods(), vec!["placeOrder"]);
    assert_eq!(mock.last_args().unwrap(), vec![json!("alice"), json!("buy"), json!(1.5), json!(10)]);
  }

  #[test]
  fn writes_need_a_login() {
    let (mock, actor) = actor();
    mock.sign_out().reply("getBalance", Ok(json!(0)));

    let err = block_on(actor.place_order("alice", OrderSide::Buy, 1.0, 1)).unwrap_err();
    assert!(matches!(err, AppError::ActorUnavailable(_)));
    assert_eq!(err.to_string(), "Actor not available: log in before calling placeOrder");
    assert_eq!(block_on(actor.get_balance("USDC")), Ok(0));
    assert_eq!(mock.methods(), vec!["getBalance"]);
  }

  #[test]
  fn public_profile_is_looked_up_by_principal() {
    let (mock, actor) = actor();
    mock.reply("getPublicUserProfile", Ok(json!({ "username": "alice", "displayName": "Alice", "bio": "hi" })));

    let profile = block_on(actor.get_public_user_profile(Principal::anonymous())).unwrap();
    assert_eq!(profile.map(|p| p.display_name), Some("Alice".to_string()));
    assert_eq!(mock.last_args().unwrap(), vec![json!("2vxsx-fae")]);
  }

  #[test]
  fn blank_symbol_never_reaches_the_backend() {
    let (mock, actor) = actor();
    let err = block_on(actor.get_order_book("   ", OrderSide::Sell, None)).unwrap_err();
    assert_eq!(err, AppError::InvalidInput("Invalid symbol".into()));
    assert!(mock.methods().is_empty());
  }

  #[test]
  fn optional_depth_is_null() {
    let (mock, actor) = actor();
    mock.reply("getOrderBook", Ok(json!([])));
    let orders = block_on(actor.get_order_book("bob", OrderSide::Sell, None)).unwrap();
    assert!(orders.is_empty());
    assert_eq!(mock.last_args().unwrap()[2], Value::Null);
  }

  #[test]
  fn principals_travel_as_text() {
    let (mock, actor) = actor();
    mock.reply("getMarketCapTrend", Ok(json!([{ "timestamp": 1, "marketCap": 500 }])));
    let trend = block_on(actor.get_market_cap_trend(Principal::anonymous())).unwrap();
    assert_eq!(trend[0].market_cap, 500);
    assert_eq!(mock.last_args().unwrap(), vec![json!("2vxsx-fae")]);
  }

  #[test]
  fn ranking_pairs_decode() {
    let (mock, actor) = actor();
    mock.reply("getCreatorCapRanking", Ok(json!([["aaaaa-aa", 9000], ["2vxsx-fae", 10]])));
    let ranking = block_on(actor.get_creator_cap_ranking()).unwrap();
    assert_eq!(ranking, vec![(Principal::management_canister(), 9000), (Principal::anonymous(), 10)]);
  }

  #[test]
  fn missing_profile_is_none() {
    let (mock, actor) = actor();
    mock.reply("getCallerUserProfile", Ok(Value::Null));
    assert_eq!(block_on(actor.get_caller_user_profile()).unwrap(), None);
  }

  #[test]
  fn rejection_is_surfaced_unmodified() {
    let (mock, actor) = actor();
    mock.reply("createCallerUserProfile", Err(AppError::Rejected("Username already taken".into())));
    let profile = UserProfile { username: "alice".into(), display_name: "Alice".into(), bio: String::new() };
    let err = block_on(actor.create_caller_user_profile(&profile)).unwrap_err();
    assert_eq!(err.message(), "Username already taken");
  }

  #[test]
  fn unexpected_shape_is_a_decode_error() {
    let (mock, actor) = actor();
    mock.reply("getBalance", Ok(json!("lots")));
    assert!(matches!(block_on(actor.get_balance("USDC")), Err(AppError::DeserializeError(_))));
  }
  #[test]
  fn role_assignment_sends_lowercase_role() {
    let (mock, actor) = actor();
    mock.reply("assignCallerUserRole", Ok(Value::Null));
    block_on(actor.assign_caller_user_role(Principal::anonymous(), UserRole::Admin)).unwrap();
    assert_eq!(mock.last_args().unwrap(), vec![json!("2vxsx-fae"), json!("admin")]);
  }

  #[test]
  fn checkout_items_use_wire_field_names() {
    let (mock, actor) = actor();
    mock.reply("createCheckoutSession", Ok(json!("cs_test_1")));
    let items = [ShoppingItem {
      product_name: "Credits".into(),
      product_description: "Trading balance".into(),
      currency: "usd".into(),
      quantity: 1,
      price_in_cents: 2500
    }];

    let url = block_on(actor.create_checkout_session(&items, "https://app/ok", "https://app/cancel")).unwrap();
    assert_eq!(url, "cs_test_1");
    let args = mock.last_args().unwrap();
    assert_eq!(args[0][0]["priceInCents"], json!(2500));
    assert_eq!(args[0][0]["productName"], json!("Credits"));
    assert_eq!(args[2], json!("https://app/cancel"));
  }
}
