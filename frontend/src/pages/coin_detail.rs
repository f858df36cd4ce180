use candid::Principal;
use dioxus::prelude::*;
use crate::{
  components::{
    modeselect::OrderTicket,
    plot::ECHARTS_SRC,
    price_chart::PriceHistoryChart,
    rank_badge::{BadgeVariant, RankBadge},
    results::MarketView,
    skeleton::Skeleton
  },
  hooks::queries::{use_balance, use_coin_by_symbol, use_public_profile},
  utils::currency::format_market_cap
};

/// Trading view for one coin: header, price history, order book and order tickets.
#[component]
pub fn CoinDetail(symbol: ReadOnlySignal<String>) -> Element {
  static CSS: Asset = asset!("assets/coin.css");
  let (directory, coin) = use_coin_by_symbol(symbol);
  let holding = use_balance(symbol);

  let header = if directory.is_loading() {
    rsx! { Skeleton { width: "12em", height: "2.5em" } }
  } else if let Some(entry) = coin() {
    let cap = format_market_cap(entry.creator_market_cap);
    rsx! {
      div {
        class: "coin-title",
        h1 { "{entry.coin.symbol}" }
        span { class: "coin-symbol", "Profile" }
      }
      p { class: "muted", "{entry.coin.name}" }
      if !entry.coin.description.is_empty() {
        p { class: "coin-description", "{entry.coin.description}" }
      }
      p { class: "form-hint", "Creator cap {cap} · Supply {entry.coin.total_supply}" }
      CreatorCard { creator: Some(entry.creator), creator_cap: entry.creator_market_cap }
    }
  } else {
    rsx! {
      div {
        class: "coin-title",
        h1 { "{symbol}" }
        span { class: "coin-symbol", "Profile" }
      }
      p { class: "muted", "Trade shares with this member" }
    }
  };

  rsx! {
    document::Stylesheet {href: CSS},
    document::Script { src: ECHARTS_SRC },
    div {
      class: "coin-detail",
      div {
        class: "page-header coin-header",
        div { {header} }
        div {
          class: "holding",
          span { class: "form-hint", "You hold" }
          if holding.is_loading() {
            Skeleton { width: "4em" }
          } else {
            span { class: "stat-value", {holding.data().unwrap_or(0).to_string()} }
          }
        }
      }
      div {
        class: "trade-grid",
        div {
          class: "trade-main",
          div { class: "chart-card", PriceHistoryChart { symbol } }
          MarketView { symbol }
        }
        OrderTicket { symbol }
      }
    }
  }
}

#[component]
fn CreatorCard(creator: ReadOnlySignal<Option<Principal>>, creator_cap: u64) -> Element {
  let profile = use_public_profile(creator);
  let owner = creator().map(|p| p.to_text()).unwrap_or_default();

  rsx! {
    div {
      class: "creator-card",
      RankBadge { creator_cap: creator_cap as f64, variant: BadgeVariant::Full }
      div {
        class: "creator-info",
        if profile.is_loading() {
          Skeleton { width: "8em" }
        } else if let Some(found) = profile.data().flatten() {
          strong { "{found.display_name}" }
          if !found.bio.is_empty() {
            p { class: "muted", "{found.bio}" }
          }
        } else {
          strong { "Unknown creator" }
        }
        p { class: "form-hint mono", "{owner}" }
      }
    }
  }
}
