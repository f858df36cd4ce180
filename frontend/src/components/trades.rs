#![allow(non_snake_case)]

use dioxus::prelude::*;
use rust_decimal::Decimal;
use crate::utils::{
  currency::{format_price, order_total},
  orderbook::BookSummary,
  server::{Order, OrderSide},
  trend_chart::format_timestamp
};

/// Resting orders of one side, newest first.
#[component]
pub fn OpenOrders(side: OrderSide, orders: Vec<Order>) -> Element {
  let mut rows = orders;
  rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
  let price_class = match side {
    OrderSide::Buy => "price-bid",
    OrderSide::Sell => "price-ask"
  };

  rsx! {
    table {
      class: "trades-table",
      tbody {
        tr {
          th { scope: "col", "#Id" },
          th { scope: "col", "Price (USDC)" },
          th { scope: "col", "Quantity" },
          th { scope: "col", "Total" },
          th { scope: "col", "Placed" },
        }
        for t in rows.iter() {
          tr {
            key: "order-row{t.order_id}",
            td { "{t.order_id}" },
            td { class: price_class, {format_price(t.price)} },
            td { "{t.quantity}" },
            td { {order_total(t.price, t.quantity)} },
            td { class: "muted", {format_timestamp(t.timestamp)} },
          }
        }
      }
    }
  }
}

#[component]
pub fn Spread(summary: BookSummary) -> Element {
  rsx! {
    div {
      class: "spread-container",
      if let Some(best_bid) = summary.best_bid {
        Metric { class: "best-buy", label: "Best Buy", value: best_bid, icon: "M5 12l7-7 7 7M5 19l7-7 7 7" }
      }
      if let Some(best_ask) = summary.best_ask {
        Metric { class: "best-ask", label: "Best Ask", value: best_ask, icon: "M19 5l-7 7-7-7M19 12l-7 7-7-7" }
      }
      if let Some(spread) = summary.spread {
        Metric { class: "spread", label: "Spread", value: spread, icon: "M8 8l4-4 4 4M8 16l4 4 4-4" }
      }
    }
  }
}

#[component]
fn Metric(class: &'static str, label: &'static str, value: Decimal, icon: &'static str) -> Element {
  let value = value.round_dp(2);

  rsx! {
    span {
      class: "metric {class}",
      svg {
        class: "icon",
        view_box: "0 0 24 24",
        width: "24",
        height: "24",
        path {
          fill: "none",
          stroke: "currentcolor",
          stroke_linecap: "round",
          stroke_linejoin: "round",
          stroke_width: "2",
          d: icon
        }
      },
      div {
        class: "metric-content",
        label { "{label}" },
        span { class: "value", "{value}" }
      }
    }
  }
}
