#![allow(non_snake_case)]

use dioxus::{logger::tracing::{error, info}, prelude::*};
use crate::{
  components::toast::{show_toast, ErrorToast, SuccessToast},
  hooks::mutations::use_place_order,
  utils::{
    currency::order_total,
    server::{AppError, OrderSide},
    validation::{validate_limit_order, validate_market_order}
  }
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TicketMode {
  Limit,
  Market
}

/// Buy and sell tickets for one coin, switchable between limit and market orders.
#[component]
pub fn OrderTicket(symbol: ReadOnlySignal<String>) -> Element {
  let mode = use_signal(|| TicketMode::Limit);

  rsx! {
    div {
      class: "card ticket-card",
      Tabs { mode },
      if mode() == TicketMode::Limit {
        LimitTicket { symbol, side: OrderSide::Buy }
        LimitTicket { symbol, side: OrderSide::Sell }
      } else {
        MarketTicket { symbol, side: OrderSide::Buy }
        MarketTicket { symbol, side: OrderSide::Sell }
      }
      SuccessToast { id: "order-placed-toast", content: "Order placed" }
      ErrorToast { id: "order-failed-toast", content: "Order rejected" }
    }
  }
}

#[component]
fn Tabs(mut mode: Signal<TicketMode>) -> Element {
  rsx! {
    div {
      class: "tabs",
      button {
        class: match mode() {
          TicketMode::Limit => "tab active",
          _ => "tab"
        },
        onclick: move |_evt| mode.set(TicketMode::Limit),
        "Limit"
      },
      button {
        class: match mode() {
          TicketMode::Market => "tab active",
          _ => "tab"
        },
        onclick: move |_evt| mode.set(TicketMode::Market),
        "Market"
      },
    }
  }
}

fn side_copy(side: OrderSide) -> (&'static str, &'static str) {
  match side {
    OrderSide::Buy => ("ticket-buy", "Buy"),
    OrderSide::Sell => ("ticket-sell", "Sell")
  }
}

fn report(result: &Result<u64, AppError>) {
  match result {
    Ok(order_id) => {
      info!("order {} placed", order_id);
      show_toast("order-placed-toast");
    }
    Err(e) => {
      error!("order failed: {}", e);
      show_toast("order-failed-toast");
    }
  }
}

#[component]
fn LimitTicket(symbol: ReadOnlySignal<String>, side: OrderSide) -> Element {
  let mut price = use_signal(String::new);
  let mut quantity = use_signal(String::new);
  let mut local_error: Signal<Option<String>> = use_signal(|| None);
  let place_order = use_place_order();
  let pending = place_order.state.is_pending();
  let remote_error = place_order.state.error();
  let (class, verb) = side_copy(side);
  let preview = validate_limit_order(&symbol.read(), side, &price.read(), &quantity.read())
    .ok()
    .map(|order| order_total(order.price, order.quantity));

  rsx! {
    form {
      class: "ticket {class}",
      onsubmit: move |evt| {
        evt.prevent_default();
        let order = match validate_limit_order(&symbol.read(), side, &price.read(), &quantity.read()) {
          Ok(order) => order,
          Err(e) => {
            local_error.set(Some(e.message()));
            return;
          }
        };
        local_error.set(None);
        let place_order = place_order.clone();
        spawn(async move {
          let result = place_order.limit(order).await;
          report(&result);
          if result.is_ok() {
            price.set(String::new());
            quantity.set(String::new());
          }
        });
      },
      h3 { class: "ticket-title", "{verb} limit order" }
      div {
        class: "form-group",
        label { class: "form-label", "Price (USDC)" },
        input {
          class: "form-input",
          r#type: "number",
          step: "0.01",
          placeholder: "0.00",
          value: "{price}",
          oninput: move |evt| price.set(evt.value())
        }
      }
      div {
        class: "form-group",
        label { class: "form-label", "Quantity" },
        input {
          class: "form-input",
          r#type: "number",
          step: "1",
          placeholder: "0",
          value: "{quantity}",
          oninput: move |evt| quantity.set(evt.value())
        }
      }
      if let Some(total) = preview {
        p { class: "form-hint", "Total: {total} USDC" }
      }
      if let Some(message) = local_error() {
        div { class: "alert alert-error", "{message}" }
      } else if let Some(err) = remote_error {
        div { class: "alert alert-error", {err.message()} }
      }
      button {
        r#type: "submit",
        class: "button button-primary",
        disabled: pending || price.read().is_empty() || quantity.read().is_empty(),
        if pending { "Placing..." } else { "Place {verb} Order" }
      }
    }
  }
}

#[component]
fn MarketTicket(symbol: ReadOnlySignal<String>, side: OrderSide) -> Element {
  let mut amount = use_signal(String::new);
  let mut local_error: Signal<Option<String>> = use_signal(|| None);
  let place_order = use_place_order();
  let pending = place_order.state.is_pending();
  let remote_error = place_order.state.error();
  let (class, verb) = side_copy(side);
  let amount_label = match side {
    OrderSide::Buy => "Spend (USD)",
    OrderSide::Sell => "Quantity"
  };

  rsx! {
    form {
      class: "ticket {class}",
      onsubmit: move |evt| {
        evt.prevent_default();
        let order = match validate_market_order(&symbol.read(), side, &amount.read()) {
          Ok(order) => order,
          Err(e) => {
            local_error.set(Some(e.message()));
            return;
          }
        };
        local_error.set(None);
        let place_order = place_order.clone();
        spawn(async move {
          let result = place_order.market(order).await;
          report(&result);
          if result.is_ok() {
            amount.set(String::new());
          }
        });
      },
      h3 { class: "ticket-title", "{verb} at market" }
      div {
        class: "form-group",
        label { class: "form-label", "{amount_label}" },
        input {
          class: "form-input",
          r#type: "number",
          step: if side == OrderSide::Buy { "0.01" } else { "1" },
          placeholder: "0",
          value: "{amount}",
          oninput: move |evt| amount.set(evt.value())
        }
      }
      if let Some(message) = local_error() {
        div { class: "alert alert-error", "{message}" }
      } else if let Some(err) = remote_error {
        div { class: "alert alert-error", {err.message()} }
      }
      button {
        r#type: "submit",
        class: "button button-primary",
        disabled: pending || amount.read().is_empty(),
        if pending { "Placing..." } else { "{verb} Now" }
      }
    }
  }
}
