use dioxus::prelude::*;
use crate::{
  components::{rank_badge::RankBadge, skeleton::SkeletonRows},
  hooks::queries::{filter_directory, use_coins_directory},
  utils::currency::format_market_cap,
  Route
};

/// Directory of every member's coin, searchable by symbol or name.
#[component]
pub fn Coins() -> Element {
  let directory = use_coins_directory();
  let mut search = use_signal(String::new);

  let body = if directory.is_loading() {
    rsx! { SkeletonRows { rows: 6 } }
  } else if let Some(err) = directory.error() {
    rsx! {
      div {
        class: "alert alert-error",
        "Could not load people: {err}"
        button { class: "button", onclick: move |_| directory.refetch(), "Retry" }
      }
    }
  } else {
    let all = directory.data().unwrap_or_default();
    let matches = filter_directory(&all, &search.read());
    if all.is_empty() {
      rsx! { div { class: "alert", "No profiles available yet. Be the first to create your profile!" } }
    } else if matches.is_empty() {
      rsx! { div { class: "card empty-card", p { class: "muted", "No profiles match your search." } } }
    } else {
      rsx! {
        div {
          class: "coin-grid",
          for entry in matches {
            div {
              key: "{entry.coin.symbol}",
              class: "card coin-card",
              div {
                class: "coin-card-header",
                span { class: "coin-name", "{entry.coin.name}" }
                span { class: "coin-symbol", "{entry.coin.symbol}" }
              }
              if !entry.coin.description.is_empty() {
                p { class: "muted", "{entry.coin.description}" }
              }
              div {
                class: "coin-card-meta",
                div {
                  p { class: "form-hint", "Owner" }
                  p { class: "mono truncate", "{entry.creator}" }
                }
                div {
                  p { class: "form-hint", "Creator cap" }
                  p { class: "mono", {format_market_cap(entry.creator_market_cap)} }
                }
              }
              RankBadge { creator_cap: entry.creator_market_cap as f64 }
              Link {
                class: "button button-primary",
                to: Route::CoinDetail { symbol: entry.coin.symbol.clone() },
                "View Details"
              }
            }
          }
        }
      }
    }
  };

  rsx! {
    div {
      class: "coins-page",
      div {
        class: "page-header",
        h1 { "People 👥" }
        p { class: "muted", "Browse and trade with all members" }
      }
      input {
        class: "form-input search-input",
        placeholder: "Search profiles...",
        value: "{search}",
        oninput: move |evt| search.set(evt.value())
      }
      {body}
    }
  }
}
