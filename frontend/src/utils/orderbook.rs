use std::collections::BTreeMap;
use rust_decimal::{prelude::FromPrimitive, Decimal};

use super::server::{Order, OrderSide};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
  pub price: Decimal,
  pub size: u64,
  // running size from the best price down to this level
  pub total: u64,
  pub depth: f32,
  pub order_count: usize
}

pub struct PriceLevelProcessor {
  orderbook_levels: usize
}

impl PriceLevelProcessor {
  pub fn new(orderbook_levels: usize) -> Self {
    PriceLevelProcessor { orderbook_levels }
  }

  // Same price -> one level. Orders with a non-finite price are dropped.
  fn group_levels(&self, orders: &[Order]) -> BTreeMap<Decimal, (u64, usize)> {
    let mut grouped: BTreeMap<Decimal, (u64, usize)> = BTreeMap::new();
    for order in orders {
      let Some(price) = Decimal::from_f64(order.price) else { continue };
      let level = grouped.entry(price.normalize()).or_insert((0, 0));
      level.0 += order.quantity;
      level.1 += 1;
    }
    grouped
  }

  /// Bids best-first is descending, asks best-first is ascending.
  pub fn best_first(&self, side: OrderSide, orders: &[Order]) -> Vec<(Decimal, u64, usize)> {
    let grouped = self.group_levels(orders).into_iter().map(|(price, (size, count))| (price, size, count));
    let ordered: Vec<_> = match side {
      OrderSide::Buy => grouped.rev().collect(),
      OrderSide::Sell => grouped.collect()
    };
    ordered.into_iter().take(self.orderbook_levels).collect()
  }

  pub fn add_total_volume(&self, levels: &[(Decimal, u64, usize)]) -> Vec<PriceLevel> {
    levels.iter().scan(0, |state, level| {
      *state += level.1;
      Some(PriceLevel { price: level.0, size: level.1, total: *state, depth: 0.0, order_count: level.2 })
    }).collect()
  }

  pub fn get_max_volume(&self, levels: &[PriceLevel]) -> u64 {
    levels.iter().map(|level| level.total).max().unwrap_or(0)
  }

  pub fn add_depths(&self, levels: Vec<PriceLevel>, max_vol: u64) -> Vec<PriceLevel> {
    levels.into_iter().map(|level| {
      let depth = if max_vol == 0 { 0.0 } else { (level.total as f32 / max_vol as f32) * 100.0 };
      PriceLevel { depth, ..level }
    }).collect()
  }

  /// Grouped, truncated, accumulated and depth-scaled levels for one side.
  pub fn process(&self, side: OrderSide, orders: &[Order]) -> Vec<PriceLevel> {
    let levels = self.add_total_volume(&self.best_first(side, orders));
    let max_vol = self.get_max_volume(&levels);
    self.add_depths(levels, max_vol)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookSummary {
  pub best_bid: Option<Decimal>,
  pub best_ask: Option<Decimal>,
  pub spread: Option<Decimal>
}

pub fn summarize(bids: &[PriceLevel], asks: &[PriceLevel]) -> BookSummary {
  let best_bid = bids.first().map(|level| level.price);
  let best_ask = asks.first().map(|level| level.price);
  let spread = match (best_bid, best_ask) {
    (Some(bid), Some(ask)) => Some((ask - bid).abs()),
    _ => None
  };
  BookSummary { best_bid, best_ask, spread }
}
