#![allow(non_snake_case)]

use dioxus::prelude::*;
use rust_decimal::Decimal;
use crate::utils::orderbook::PriceLevel;

#[component]
pub fn OrderBookTable(bid_lvls: Vec<PriceLevel>, ask_lvls: Vec<PriceLevel>) -> Element {
  //NOTE:`reverse`=false for Bids, true for Asks

  rsx! {
    div {
      class: "orderbook-container",
      div {
        class: "orderbook-table-container",
        TitleRow { reverse: false },
        if bid_lvls.is_empty() {
          div { class: "orderbook-empty", "No buy orders available" }
        }
        for (idx, lvl) in bid_lvls.iter().enumerate() {
          div {
            key: "bid{idx}",
            class: "orderbook-row-container",
            DepthVisualizer { depth: lvl.depth, reverse: false },
            PriceLevelRow { total: lvl.total, size: lvl.size, price: lvl.price, orders: lvl.order_count, reverse: false }
          }
        }
      },
      div {
        class: "orderbook-table-container",
        TitleRow { reverse: true },
        if ask_lvls.is_empty() {
          div { class: "orderbook-empty", "No sell orders available" }
        }
        for (idx, lvl) in ask_lvls.iter().enumerate() {
          div {
            key: "ask{idx}",
            class: "orderbook-row-container",
            DepthVisualizer { depth: lvl.depth, reverse: true },
            PriceLevelRow { total: lvl.total, size: lvl.size, price: lvl.price, orders: lvl.order_count, reverse: true }
          }
        }
      }
    }
  }
}

#[component]
fn TitleRow(reverse: bool) -> Element {
  if reverse {
    rsx! {
      div {
        class: "orderbook-titlerow",
        span { "PRICE" },
        span { "SIZE" },
        span { "TOTAL" }
      }
    }
  } else {
    rsx! {
      div {
        class: "orderbook-titlerow",
        span { "TOTAL" },
        span { "SIZE" },
        span { "PRICE" }
      }
    }
  }
}

#[component]
fn DepthVisualizer(depth: f32, reverse: bool) -> Element {
  let (background, left) = if reverse {
    ("#3d1e28", "0".to_string())
  } else {
    ("#113534", format!("{}%", 100.0 - depth))
  };

  rsx! {
    div {
      class: "depth-bar",
      width: "{depth}%",
      background_color: background,
      left
    }
  }
}

#[component]
fn PriceLevelRow(total: u64, size: u64, price: Decimal, orders: usize, reverse: bool) -> Element {
  let price = price.round_dp(2);

  rsx! {
    div {
      class: "orderbook-pricerow",
      title: "{orders} order(s)",
      if reverse {
        span { class: "price-ask", "{price}" },
        span { "{size}" },
        span { "{total}" }
      } else {
        span { "{total}" },
        span { "{size}" },
        span { class: "price-bid", "{price}" },
      }
    }
  }
}
