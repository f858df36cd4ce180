use std::fmt;
use candid::Principal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/* Backend records */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub username: String,
  pub display_name: String,
  pub bio: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
  pub owner: Principal,
  pub symbol: String,
  pub name: String,
  pub description: String,
  pub total_supply: u64,
  #[serde(default)]
  pub metadata: Option<String>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
  Buy,
  Sell
}

impl fmt::Display for OrderSide {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Buy => write!(f, "buy"),
      Self::Sell => write!(f, "sell"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: u64,
  pub coin_symbol: String,
  pub side: OrderSide,
  pub user: Principal,
  pub price: f64,
  pub quantity: u64,
  // nanoseconds since epoch
  pub timestamp: u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapTrendPoint {
  pub timestamp: u64,
  pub market_cap: u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
  pub timestamp: u64,
  pub price: f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Admin,
  User,
  Guest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StripeSessionStatus {
  #[serde(rename_all = "camelCase")]
  Completed { user_principal: Option<String>, response: String },
  Failed { error: String }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
  pub product_name: String,
  pub product_description: String,
  pub currency: String,
  pub quantity: u64,
  pub price_in_cents: u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeConfiguration {
  pub secret_key: String,
  pub allowed_countries: Vec<String>
}

/* Gateway envelope */
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
  pub method: &'a str,
  pub args: Vec<Value>
}

#[derive(Debug, Deserialize)]
pub enum RpcResponse {
  Ok(Value),
  Err(String)
}

// App Errors
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
  ActorUnavailable(String),
  InvalidInput(String),
  Rejected(String),
  TransportError(String),
  SerializeError(String),
  DeserializeError(String),
  WasmError(String),
  AuthorizationError(String),
  PaymentError(String),
}

impl AppError {
  /// Message shown to the user. Backend rejections pass through untouched.
  pub fn message(&self) -> String {
    match self {
      AppError::Rejected(msg) | AppError::InvalidInput(msg) | AppError::PaymentError(msg) => msg.clone(),
      other => other.to_string()
    }
  }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AppError::ActorUnavailable(msg) => write!(f, "Actor not available: {}", msg),
      AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
      AppError::Rejected(msg) => write!(f, "Call rejected: {}", msg),
      AppError::TransportError(msg) => write!(f, "Transport error: {}", msg),
      AppError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
      AppError::DeserializeError(msg) => write!(f, "Deserialize error: {}", msg),
      AppError::WasmError(msg) => write!(f, "Wasm error: {}", msg),
      AppError::AuthorizationError(msg) => write!(f, "Authorization error: {}", msg),
      AppError::PaymentError(msg) => write!(f, "Payment error: {}", msg)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_decodes_from_gateway_json() {
    let raw = r#"{
      "orderId": 7, "coinSymbol": "alice", "side": "sell",
      "user": "aaaaa-aa", "price": 1.25, "quantity": 40, "timestamp": 1700000000000000000
    }"#;
    let order: Order = serde_json::from_str(raw).unwrap();
    assert_eq!(order.side, OrderSide::Sell);
    assert_eq!(order.user, Principal::management_canister());
    assert_eq!(order.quantity, 40);
  }

  #[test]
  fn session_status_uses_variant_names() {
    let done: StripeSessionStatus = serde_json::from_str(r#"{"completed":{"userPrincipal":null,"response":"ok"}}"#).unwrap();
    assert_eq!(done, StripeSessionStatus::Completed { user_principal: None, response: "ok".into() });

    let failed: StripeSessionStatus = serde_json::from_str(r#"{"failed":{"error":"card declined"}}"#).unwrap();
    assert_eq!(failed, StripeSessionStatus::Failed { error: "card declined".into() });
  }

  #[test]
  fn rejection_message_is_passed_through() {
    let err = AppError::Rejected("Username already taken".into());
    assert_eq!(err.message(), "Username already taken");
    assert_eq!(err.to_string(), "Call rejected: Username already taken");
  }
}
