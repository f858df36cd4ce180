#![allow(non_snake_case)]

use dioxus::prelude::*;
use crate::utils::rank::{rank_tier, RankTier};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeVariant {
  Compact,
  Full,
  Card
}

#[component]
pub fn RankBadge(creator_cap: f64, #[props(default = BadgeVariant::Compact)] variant: BadgeVariant, #[props(default = false)] show_description: bool) -> Element {
  let tier: &'static RankTier = rank_tier(creator_cap);

  match variant {
    BadgeVariant::Card => rsx! {
      div {
        class: "card rank-card {tier.glow_class}",
        div {
          class: "rank-card-header",
          Emblem { tier_index: tier.badge_index, color: tier.color }
          div {
            div { class: "rank-label", "Rank Status" }
            div { class: "rank-name large {tier.color}", "{tier.name}" }
          }
        }
        if show_description {
          p { class: "rank-description", "{tier.description}" }
        }
      }
    },
    BadgeVariant::Full => rsx! {
      div {
        class: "rank-full",
        Emblem { tier_index: tier.badge_index, color: tier.color }
        div {
          div { class: "rank-label", "Rank" }
          div { class: "rank-name {tier.color}", "{tier.name}" }
        }
      }
    },
    BadgeVariant::Compact => rsx! {
      span {
        class: "rank-badge {tier.color} {tier.glow_class}",
        "▲ {tier.name}"
      }
    }
  }
}

// one chevron per tier step
#[component]
fn Emblem(tier_index: usize, color: &'static str) -> Element {
  rsx! {
    svg {
      class: "rank-emblem {color}",
      view_box: "0 0 24 24",
      width: "48",
      height: "48",
      path {
        fill: "none",
        stroke: "currentcolor",
        stroke_width: "1.5",
        d: "M12 2l8 4v6c0 5-3.5 8.5-8 10-4.5-1.5-8-5-8-10V6z"
      }
      for (step, y) in chevron_rows(tier_index) {
        path {
          key: "chev{step}",
          fill: "none",
          stroke: "currentcolor",
          stroke_width: "1.5",
          stroke_linecap: "round",
          d: "M8 {y}l4-2 4 2"
        }
      }
    }
  }
}

fn chevron_rows(tier_index: usize) -> Vec<(usize, f64)> {
  (0..tier_index.min(5)).map(|step| (step, 16.0 - step as f64 * 2.0)).collect()
}
