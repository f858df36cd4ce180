use std::str::FromStr;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/* Stablecoin amounts travel as integer cents (1 USDC = 100 cents) */

pub fn format_stablecoin(cents: u64) -> String {
  format!("{}.{:02}", cents / 100, cents % 100)
}

pub fn format_stablecoin_with_unit(cents: u64) -> String {
  format!("${}", format_stablecoin(cents))
}

pub fn format_stablecoin_short(cents: u64) -> String {
  format_stablecoin_with_unit(cents)
}

/// Fixed-point rendering of the exact binary value, ties rounded away from zero.
pub fn to_fixed(value: f64, places: u32) -> String {
  match Decimal::from_f64_retain(value) {
    Some(exact) => format!("{:.*}", places as usize, exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)),
    None => format!("{:.*}", places as usize, value)
  }
}

pub fn format_price(price: f64) -> String {
  to_fixed(price, 2)
}

pub fn format_price_with_unit(price: f64) -> String {
  format!("{} USDC", format_price(price))
}

pub fn format_market_cap(market_cap: u64) -> String {
  if market_cap == 0 {
    return "$0".to_string();
  }
  let value = market_cap as f64;

  if value >= 1_000_000_000.0 {
    format!("${}B", to_fixed(value / 1_000_000_000.0, 2))
  } else if value >= 1_000_000.0 {
    format!("${}M", to_fixed(value / 1_000_000.0, 2))
  } else if value >= 1_000.0 {
    format!("${}K", to_fixed(value / 1_000.0, 2))
  } else {
    format!("${}", to_fixed(value, 2))
  }
}

pub fn format_usd(amount: Decimal) -> String {
  format!("${:.2}", round_cents(amount))
}

/// Price × quantity for an order-book row.
pub fn order_total(price: f64, quantity: u64) -> String {
  to_fixed(price * quantity as f64, 2)
}

/// Thousands separators for whole caps shown on the dashboard.
pub fn format_grouped(value: f64) -> String {
  let whole = value.round() as i64;
  let digits = whole.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (idx, ch) in digits.chars().enumerate() {
    if idx > 0 && (digits.len() - idx) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  if whole < 0 { format!("-{}", grouped) } else { grouped }
}

fn round_cents(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Blank or malformed input counts as zero, like an empty form field.
pub fn parse_amount(input: &str) -> Decimal {
  Decimal::from_str(input.trim()).unwrap_or(Decimal::ZERO)
}

pub fn dollars_to_cents(amount: Decimal) -> u64 {
  (amount * dec!(100))
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .to_u64()
    .unwrap_or(0)
}

pub fn cents_to_dollars(cents: u64) -> Decimal {
  Decimal::from(cents) / dec!(100)
}

/* Card deposits: provider fee estimate is 2.9% + $0.30, credited 1:1 */
pub const DEPOSIT_FEE_RATE: Decimal = dec!(0.029);
pub const DEPOSIT_FEE_FIXED: Decimal = dec!(0.30);
pub const MIN_DEPOSIT: Decimal = dec!(1);

/* Bank withdrawals: 1% fee with a $1 floor */
pub const WITHDRAW_FEE_RATE: Decimal = dec!(0.01);
pub const WITHDRAW_FEE_MIN: Decimal = dec!(1);
pub const MIN_WITHDRAWAL: Decimal = dec!(10);

#[derive(Debug, Clone, PartialEq)]
pub struct DepositQuote {
  pub amount: Decimal,
  pub fee: Decimal,
  pub total: Decimal,
  pub receive: Decimal
}

impl DepositQuote {
  pub fn new(amount: Decimal) -> Self {
    let fee = amount * DEPOSIT_FEE_RATE + DEPOSIT_FEE_FIXED;
    Self { amount, fee, total: amount + fee, receive: amount }
  }

  pub fn is_valid(&self) -> bool {
    self.amount >= MIN_DEPOSIT
  }

  pub fn charge_cents(&self) -> u64 {
    dollars_to_cents(self.total)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawQuote {
  pub amount: Decimal,
  pub fee: Decimal,
  pub net: Decimal
}

impl WithdrawQuote {
  pub fn new(amount: Decimal) -> Self {
    let fee = (amount * WITHDRAW_FEE_RATE).max(WITHDRAW_FEE_MIN);
    let net = (amount - fee).max(Decimal::ZERO);
    Self { amount, fee, net }
  }

  pub fn is_valid(&self, balance_cents: u64) -> bool {
    self.amount >= MIN_WITHDRAWAL && self.amount <= cents_to_dollars(balance_cents)
  }

  pub fn amount_cents(&self) -> u64 {
    dollars_to_cents(self.amount)
  }
}

/// Fraction of the balance for the 25% / 50% / 75% / MAX buttons.
pub fn quick_amount(balance_cents: u64, fraction: Decimal) -> Decimal {
  round_cents(cents_to_dollars(balance_cents) * fraction)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stablecoin_formatting() {
    assert_eq!(format_stablecoin(0), "0.00");
    assert_eq!(format_stablecoin(5), "0.05");
    assert_eq!(format_stablecoin(123_456), "1234.56");
    assert_eq!(format_stablecoin_with_unit(1_000), "$10.00");
    assert_eq!(format_stablecoin_short(99), "$0.99");
  }

  #[test]
  fn market_cap_suffixes() {
    assert_eq!(format_market_cap(0), "$0");
    assert_eq!(format_market_cap(999), "$999.00");
    assert_eq!(format_market_cap(1_500), "$1.50K");
    assert_eq!(format_market_cap(2_345_678), "$2.35M");
    assert_eq!(format_market_cap(7_000_000_000), "$7.00B");
  }

  #[test]
  fn exact_ties_round_up() {
    assert_eq!(format_market_cap(1_125), "$1.13K");
    assert_eq!(format_market_cap(2_625), "$2.63K");
    assert_eq!(format_market_cap(1_125_000), "$1.13M");
    assert_eq!(format_price(1.125), "1.13");
    assert_eq!(format_price(-1.125), "-1.13");
    assert_eq!(order_total(0.5625, 2), "1.13");
    // 1.005 is stored just below the midpoint
    assert_eq!(format_price(1.005), "1.00");
    assert_eq!(to_fixed(2.5, 0), "3");
  }

  #[test]
  fn prices_and_totals() {
    assert_eq!(format_price(1.5), "1.50");
    assert_eq!(format_price_with_unit(0.25), "0.25 USDC");
    assert_eq!(order_total(2.5, 4), "10.00");
  }

  #[test]
  fn grouping() {
    assert_eq!(format_grouped(0.0), "0");
    assert_eq!(format_grouped(999.0), "999");
    assert_eq!(format_grouped(15_000.0), "15,000");
    assert_eq!(format_grouped(1_234_567.4), "1,234,567");
  }

  #[test]
  fn amount_parsing_treats_garbage_as_zero() {
    assert_eq!(parse_amount(" 12.50 "), dec!(12.50));
    assert_eq!(parse_amount(""), Decimal::ZERO);
    assert_eq!(parse_amount("abc"), Decimal::ZERO);
  }

  #[test]
  fn cents_conversion_rounds_half_up() {
    assert_eq!(dollars_to_cents(dec!(10.005)), 1_001);
    assert_eq!(dollars_to_cents(dec!(0.01)), 1);
    assert_eq!(cents_to_dollars(1_050), dec!(10.50));
  }

  #[test]
  fn deposit_fee_breakdown() {
    let quote = DepositQuote::new(dec!(100));
    assert_eq!(quote.fee, dec!(3.200));
    assert_eq!(quote.total, dec!(103.200));
    assert_eq!(quote.receive, dec!(100));
    assert_eq!(quote.charge_cents(), 10_320);
    assert_eq!(format_usd(quote.total), "$103.20");
    assert!(quote.is_valid());
    assert!(!DepositQuote::new(dec!(0.99)).is_valid());
  }

  #[test]
  fn withdraw_fee_has_a_floor() {
    let small = WithdrawQuote::new(dec!(50));
    assert_eq!(small.fee, dec!(1));
    assert_eq!(small.net, dec!(49));

    let large = WithdrawQuote::new(dec!(200));
    assert_eq!(large.fee, dec!(2.00));
    assert_eq!(large.net, dec!(198.00));

    assert_eq!(WithdrawQuote::new(dec!(0.5)).net, Decimal::ZERO);
  }

  #[test]
  fn withdraw_limits() {
    let balance_cents = 5_000;
    assert!(WithdrawQuote::new(dec!(10)).is_valid(balance_cents));
    assert!(WithdrawQuote::new(dec!(50)).is_valid(balance_cents));
    assert!(!WithdrawQuote::new(dec!(9.99)).is_valid(balance_cents));
    assert!(!WithdrawQuote::new(dec!(50.01)).is_valid(balance_cents));
  }

  #[test]
  fn quick_fill_fractions() {
    assert_eq!(quick_amount(10_001, dec!(0.25)), dec!(25.00));
    assert_eq!(quick_amount(10_000, dec!(0.5)), dec!(50.00));
    assert_eq!(quick_amount(333, dec!(1)), dec!(3.33));
  }
}
