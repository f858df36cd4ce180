use candid::Principal;
use dioxus::prelude::*;
use crate::{
  components::{
    rank_badge::RankBadge,
    skeleton::{Skeleton, SkeletonRows},
    sparkline::MarketCapSparkline,
    trend_dialog::MarketCapTrendDialog
  },
  hooks::queries::{use_leaderboard, use_user_profile, LeaderboardEntry},
  utils::currency::format_market_cap,
  Route
};

/// Creator leaderboard ranked by the market cap of the coins each member launched.
#[component]
pub fn Activity() -> Element {
  let leaderboard = use_leaderboard();

  let body = if leaderboard.is_loading() {
    rsx! { SkeletonRows { rows: 5 } }
  } else if let Some(err) = leaderboard.error() {
    rsx! {
      div {
        class: "alert alert-error",
        "Could not load the leaderboard: {err}"
        button { class: "button", onclick: move |_| leaderboard.refetch(), "Retry" }
      }
    }
  } else {
    let entries = leaderboard.data().unwrap_or_default();
    if entries.is_empty() {
      rsx! { div { class: "alert", "No trading activity yet. Start trading to see the leaderboard!" } }
    } else {
      rsx! {
        table {
          class: "table leaderboard",
          thead {
            tr {
              th { "Rank" }
              th { "Creator" }
              th { "Tier" }
              th { "Creator Cap" }
              th { "Trend" }
              th { }
            }
          }
          tbody {
            for entry in entries {
              LeaderboardRow { key: "{entry.principal}", user: Some(entry.principal), entry }
            }
          }
        }
      }
    }
  };

  rsx! {
    div {
      class: "activity-page",
      div {
        class: "page-header",
        h1 { "Activity & Leaderboard 📊" }
        p { class: "muted", "Creators ranked by the total market cap of their coins" }
      }
      div {
        class: "card",
        h3 { class: "card-title", "🏆 Top Creators" }
        {body}
      }
    }
  }
}

#[component]
fn LeaderboardRow(entry: LeaderboardEntry, user: ReadOnlySignal<Option<Principal>>) -> Element {
  let profile = use_user_profile(user);
  let principal_text = entry.principal.to_text();
  let cap = format_market_cap(entry.creator_market_cap);
  let podium = match entry.rank {
    1 => "rank-first",
    2 => "rank-second",
    3 => "rank-third",
    _ => ""
  };

  let name = profile.data().flatten()
    .map(|p| p.display_name)
    .unwrap_or_else(|| principal_text.clone());
  let username = profile.data().flatten().map(|p| p.username);

  rsx! {
    tr {
      td { class: "rank-number {podium}", "#{entry.rank}" }
      td {
        if profile.is_loading() {
          Skeleton { width: "8em" }
        } else {
          div { class: "creator-name", "{name}" }
          if let Some(symbol) = username.clone() {
            Link { class: "coin-symbol", to: Route::CoinDetail { symbol: symbol.clone() }, "{symbol}" }
          } else {
            div { class: "mono truncate form-hint", "{principal_text}" }
          }
        }
      }
      td { RankBadge { creator_cap: entry.creator_market_cap as f64 } }
      td { class: "mono", "{cap}" }
      td { MarketCapSparkline { user } }
      td { MarketCapTrendDialog { user: entry.principal, user_name: name.clone() } }
    }
  }
}
