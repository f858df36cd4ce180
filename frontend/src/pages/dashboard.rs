use dioxus::prelude::*;
use crate::{
  components::{profile_editor::ProfileEditor, rank_badge::{BadgeVariant, RankBadge}, skeleton::Skeleton},
  hooks::{
    queries::{use_balance, use_caller_creator_cap, use_caller_profile, use_creator_cap_ranking, use_stablecoin_balance},
    use_auth
  },
  utils::{
    currency::{format_grouped, format_stablecoin},
    rank::{cap_to_next_tier, next_rank_tier, rank_progress}
  },
  Route
};

#[component]
pub fn Dashboard() -> Element {
  let profile = use_caller_profile();
  let funds = use_stablecoin_balance();
  let creator_cap = use_caller_creator_cap();
  let ranking = use_creator_cap_ranking();
  let auth = use_auth();

  if profile.is_loading() {
    return rsx! {
      div {
        class: "dashboard",
        Skeleton { width: "16em", height: "3em" }
        div {
          class: "stat-grid",
          Skeleton { height: "10em" }
          Skeleton { height: "10em" }
          Skeleton { height: "10em" }
        }
      }
    };
  }

  let title = profile.data().flatten()
    .map(|p| p.display_name.to_uppercase())
    .unwrap_or_else(|| "USER".to_string());
  let cap = creator_cap.data().unwrap_or(0) as f64;
  let progress = rank_progress(cap);
  let next = next_rank_tier(cap);
  let needed = cap_to_next_tier(cap).map(format_grouped).unwrap_or_default();
  let cap_label = format_grouped(cap);
  let standing = match (auth.principal(), ranking.data()) {
    (Some(me), Some(ranking)) => ranking.iter()
      .position(|(principal, _)| *principal == me)
      .map(|idx| format!("#{} of {} creators", idx + 1, ranking.len())),
    _ => None
  };
  let target_label = next.map(|tier| format_grouped(tier.min_creator_cap)).unwrap_or_default();
  // a user's own coin trades under their username
  let own_symbol = profile.data().flatten().map(|p| p.username).unwrap_or_default();

  rsx! {
    div {
      class: "dashboard",
      div {
        class: "page-header",
        h1 { "{title}" }
        p { class: "muted mono", "DASHBOARD" }
      }
      RankBadge { creator_cap: cap, variant: BadgeVariant::Card, show_description: true }
      if let Some(standing) = standing {
        p { class: "mono accent", "Leaderboard position: {standing}" }
      }
      if let Some(next) = next {
        div {
          class: "card",
          h3 { class: "card-title", "NEXT RANK: {next.name}" }
          div {
            class: "progress",
            div { class: "progress-bar", width: "{progress}%" }
          }
          div {
            class: "progress-labels",
            span { class: "muted mono", "Current: {cap_label} Cap" }
            span { class: "accent mono", "Target: {target_label} Cap" }
          }
          p { class: "form-hint", "{needed} market cap needed" }
        }
      }
      div {
        class: "stat-grid",
        StatCard {
          title: "Creator Market Cap",
          caption: "TOTAL CAP".to_string(),
          loading: creator_cap.is_loading(),
          value: cap_label.clone()
        }
        StatCard {
          title: "Funds Balance",
          caption: "AVAILABLE".to_string(),
          loading: funds.is_loading(),
          value: format_stablecoin(funds.data().unwrap_or(0))
        }
        OwnAssetCard { symbol: own_symbol }
      }
      ProfileEditor { }
      div {
        class: "card",
        h3 { class: "card-title", "QUICK ACTIONS" }
        div {
          class: "alert",
          "Navigate to "
          Link { to: Route::Coins {}, strong { "People" } }
          " to view assets and execute trades."
        }
        div {
          class: "alert",
          "Check "
          Link { to: Route::Activity {}, strong { "Activity" } }
          " to view creator rankings by market cap."
        }
      }
    }
  }
}

#[component]
fn StatCard(title: &'static str, caption: String, loading: bool, value: String) -> Element {
  rsx! {
    div {
      class: "card stat-card",
      div { class: "stat-title", "{title}" }
      if loading {
        Skeleton { width: "6em", height: "2em" }
      } else {
        div { class: "stat-value", "{value}" }
      }
      p { class: "stat-caption", "{caption}" }
    }
  }
}

#[component]
fn OwnAssetCard(symbol: ReadOnlySignal<String>) -> Element {
  let balance = use_balance(symbol);
  let caption = if symbol.read().is_empty() { "Loading...".to_string() } else { symbol() };

  rsx! {
    StatCard {
      title: "Your Asset",
      caption,
      loading: balance.is_loading(),
      value: balance.data().unwrap_or(0).to_string()
    }
  }
}
