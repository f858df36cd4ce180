use rust_decimal::Decimal;

use super::currency::{dollars_to_cents, parse_amount};
use super::server::{AppError, OrderSide, UserProfile};

pub const MAX_USERNAME_LEN: usize = 20;

/// Trimmed symbol, or `Invalid symbol` when nothing is left.
pub fn normalize_symbol(symbol: &str) -> Result<String, AppError> {
  let trimmed = symbol.trim();
  if trimmed.is_empty() {
    return Err(AppError::InvalidInput("Invalid symbol".to_string()));
  }
  Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
  pub username: String,
  pub display_name: String,
  pub bio: String,
  pub name_confirmed: bool
}

impl ProfileForm {
  /// Prefilled form for editing a profile that already exists.
  pub fn from_profile(profile: &UserProfile) -> Self {
    Self {
      username: profile.username.clone(),
      display_name: profile.display_name.clone(),
      bio: profile.bio.clone(),
      name_confirmed: true
    }
  }

  pub fn is_submittable(&self) -> bool {
    self.validate().is_ok()
  }

  pub fn validate(&self) -> Result<UserProfile, AppError> {
    let username = self.username.trim();
    let display_name = self.display_name.trim();

    if username.is_empty() {
      return Err(AppError::InvalidInput("Username is required".to_string()));
    }
    if username.chars().any(char::is_whitespace) {
      return Err(AppError::InvalidInput("Username cannot contain spaces".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
      return Err(AppError::InvalidInput("Username is too long".to_string()));
    }
    if display_name.is_empty() {
      return Err(AppError::InvalidInput("Display name is required".to_string()));
    }
    if !self.name_confirmed {
      return Err(AppError::InvalidInput("Please confirm your display name is your real name".to_string()));
    }

    Ok(UserProfile {
      username: username.to_string(),
      display_name: display_name.to_string(),
      bio: self.bio.trim().to_string()
    })
  }
}

/// Copy shown when profile creation fails.
pub fn friendly_profile_error(err: &AppError) -> &'static str {
  let message = err.message();
  if message.contains("already taken") {
    "This username is already taken. Please choose a different one."
  } else if message.contains("cannot contain spaces") {
    "Username cannot contain spaces."
  } else if message.contains("too long") {
    "Username is too long. Maximum 20 characters."
  } else {
    "Failed to create profile. Please try again."
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrder {
  pub symbol: String,
  pub side: OrderSide,
  pub price: f64,
  pub quantity: u64
}

pub fn validate_limit_order(symbol: &str, side: OrderSide, price: &str, quantity: &str) -> Result<LimitOrder, AppError> {
  let symbol = normalize_symbol(symbol)?;
  let price = price.trim().parse::<f64>()
    .ok()
    .filter(|p| p.is_finite() && *p > 0.0)
    .ok_or_else(|| AppError::InvalidInput("Price must be greater than zero".to_string()))?;
  let quantity = quantity.trim().parse::<u64>()
    .ok()
    .filter(|q| *q > 0)
    .ok_or_else(|| AppError::InvalidInput("Quantity must be a whole number greater than zero".to_string()))?;

  Ok(LimitOrder { symbol, side, price, quantity })
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketOrder {
  pub symbol: String,
  pub side: OrderSide,
  // buys: stablecoin cents to spend, sells: shares to sell
  pub amount: u64
}

pub fn validate_market_order(symbol: &str, side: OrderSide, amount: &str) -> Result<MarketOrder, AppError> {
  let symbol = normalize_symbol(symbol)?;
  let amount = match side {
    OrderSide::Buy => {
      let dollars = parse_amount(amount);
      if dollars <= Decimal::ZERO { 0 } else { dollars_to_cents(dollars) }
    }
    OrderSide::Sell => amount.trim().parse::<u64>().unwrap_or(0)
  };
  if amount == 0 {
    return Err(AppError::InvalidInput("Amount must be greater than zero".to_string()));
  }

  Ok(MarketOrder { symbol, side, amount })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(username: &str, display_name: &str, confirmed: bool) -> ProfileForm {
    ProfileForm { username: username.into(), display_name: display_name.into(), bio: "  hi  ".into(), name_confirmed: confirmed }
  }

  #[test]
  fn symbols_are_trimmed() {
    assert_eq!(normalize_symbol("  alice ").unwrap(), "alice");
    assert_eq!(normalize_symbol("   "), Err(AppError::InvalidInput("Invalid symbol".into())));
  }

  #[test]
  fn valid_profile_is_trimmed() {
    let profile = form(" trader ", " Jo Smith ", true).validate().unwrap();
    assert_eq!(profile.username, "trader");
    assert_eq!(profile.display_name, "Jo Smith");
    assert_eq!(profile.bio, "hi");
  }

  #[test]
  fn existing_profile_edits_without_reconfirming() {
    let saved = UserProfile { username: "trader".into(), display_name: "Jo".into(), bio: "hi".into() };
    let mut edit = ProfileForm::from_profile(&saved);
    edit.bio = " new bio ".into();
    assert_eq!(edit.validate().unwrap(), UserProfile { bio: "new bio".into(), ..saved });
  }

  #[test]
  fn profile_rules() {
    assert!(form("", "Jo", true).validate().is_err());
    assert!(form("jo", "  ", true).validate().is_err());
    assert!(form("jo smith", "Jo", true).validate().is_err());
    assert!(form(&"x".repeat(21), "Jo", true).validate().is_err());
    assert!(form(&"x".repeat(20), "Jo", true).is_submittable());
    assert!(!form("jo", "Jo", false).is_submittable());
  }

  #[test]
  fn profile_errors_map_to_friendly_copy() {
    let taken = AppError::Rejected("Username already taken".into());
    assert_eq!(friendly_profile_error(&taken), "This username is already taken. Please choose a different one.");

    let spaces = AppError::Rejected("Username cannot contain spaces".into());
    assert_eq!(friendly_profile_error(&spaces), "Username cannot contain spaces.");

    let long = AppError::Rejected("Username too long".into());
    assert_eq!(friendly_profile_error(&long), "Username is too long. Maximum 20 characters.");

    let other = AppError::TransportError("offline".into());
    assert_eq!(friendly_profile_error(&other), "Failed to create profile. Please try again.");
  }

  #[test]
  fn limit_orders_need_positive_price_and_whole_quantity() {
    let ok = validate_limit_order(" alice", OrderSide::Buy, "1.25", "10").unwrap();
    assert_eq!(ok, LimitOrder { symbol: "alice".into(), side: OrderSide::Buy, price: 1.25, quantity: 10 });

    assert!(validate_limit_order("alice", OrderSide::Buy, "0", "10").is_err());
    assert!(validate_limit_order("alice", OrderSide::Buy, "abc", "10").is_err());
    assert!(validate_limit_order("alice", OrderSide::Sell, "1", "1.5").is_err());
    assert!(validate_limit_order("alice", OrderSide::Sell, "1", "0").is_err());
    assert!(validate_limit_order(" ", OrderSide::Sell, "1", "1").is_err());
  }

  #[test]
  fn market_buys_spend_cents() {
    let buy = validate_market_order("alice", OrderSide::Buy, "12.34").unwrap();
    assert_eq!(buy.amount, 1_234);
    assert!(validate_market_order("alice", OrderSide::Buy, "-5").is_err());
    assert!(validate_market_order("alice", OrderSide::Buy, "").is_err());
  }

  #[test]
  fn market_sells_take_share_counts() {
    let sell = validate_market_order("alice", OrderSide::Sell, "7").unwrap();
    assert_eq!(sell.amount, 7);
    assert!(validate_market_order("alice", OrderSide::Sell, "0").is_err());
  }
}
