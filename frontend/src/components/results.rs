#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::{
  components::{
    orderbook::OrderBookTable,
    plot::DepthPlotCharming,
    skeleton::SkeletonRows,
    trades::{OpenOrders, Spread}
  },
  hooks::queries::use_order_book,
  utils::{
    config::ORDERBOOK_LEVELS,
    orderbook::{summarize, PriceLevelProcessor},
    server::OrderSide
  }
};

/// Live order book of one coin: aggregated levels, spread, depth chart and resting orders.
#[component]
pub fn MarketView(symbol: ReadOnlySignal<String>) -> Element {
  let bids = use_order_book(symbol, OrderSide::Buy, None);
  let asks = use_order_book(symbol, OrderSide::Sell, None);
  let mut orders_tab = use_signal(|| OrderSide::Buy);

  let (bid_query, ask_query) = (bids.clone(), asks.clone());
  let bid_lvls = use_memo(move || {
    PriceLevelProcessor::new(ORDERBOOK_LEVELS).process(OrderSide::Buy, &bid_query.data().unwrap_or_default())
  });
  let ask_lvls = use_memo(move || {
    PriceLevelProcessor::new(ORDERBOOK_LEVELS).process(OrderSide::Sell, &ask_query.data().unwrap_or_default())
  });
  let summary = summarize(&bid_lvls.read(), &ask_lvls.read());

  if bids.is_loading() || asks.is_loading() {
    return rsx! { SkeletonRows { rows: 3 } };
  }
  if let Some(err) = bids.error().or(asks.error()) {
    return rsx! {
      div {
        class: "alert alert-error",
        "{err}"
        button { class: "button", onclick: move |_| { bids.refetch(); asks.refetch(); }, "Retry" }
      }
    };
  }

  let shown = match orders_tab() {
    OrderSide::Buy => bids.data().unwrap_or_default(),
    OrderSide::Sell => asks.data().unwrap_or_default()
  };

  rsx! {
    div {
      class: "table-container",
      div {
        class: "table-card orderbook-card",
        OrderBookTable { bid_lvls: bid_lvls(), ask_lvls: ask_lvls() }
      },
      div {
        class: "results-right-column",
        div {
          class: "table-card spread-card",
          Spread { summary }
        },
        div {
          class: "chart-card",
          DepthPlotCharming { bid_lvls, ask_lvls }
        }
      }
    },
    div {
      class: "table-card trades-card",
      div {
        class: "tabs",
        button {
          class: if orders_tab() == OrderSide::Buy { "tab active" } else { "tab" },
          onclick: move |_| orders_tab.set(OrderSide::Buy),
          "Buy Orders"
        }
        button {
          class: if orders_tab() == OrderSide::Sell { "tab active" } else { "tab" },
          onclick: move |_| orders_tab.set(OrderSide::Sell),
          "Sell Orders"
        }
      }
      if shown.is_empty() {
        div { class: "orderbook-empty", "No {orders_tab} orders available" }
      } else {
        OpenOrders { side: orders_tab(), orders: shown }
      }
    }
  }
}
