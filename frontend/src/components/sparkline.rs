#![allow(non_snake_case)]

use dioxus::prelude::*;
use crate::{
  components::skeleton::Skeleton,
  hooks::queries::use_market_cap_trend,
  utils::trend_chart::{generate_svg_path, normalize_trend_data, scale_to_svg, trend_summary, SPARKLINE_DIMENSIONS}
};
use candid::Principal;

#[component]
pub fn MarketCapSparkline(user: ReadOnlySignal<Option<Principal>>) -> Element {
  let trend = use_market_cap_trend(user);
  let dims = SPARKLINE_DIMENSIONS;

  if trend.is_loading() {
    return rsx! { Skeleton { width: "{dims.width}px", height: "{dims.height}px" } };
  }

  let points = normalize_trend_data(&trend.data().unwrap_or_default());
  if points.is_empty() {
    return rsx! {
      div { class: "sparkline-empty", width: "{dims.width}px", height: "{dims.height}px", "No data" }
    };
  }

  let path = generate_svg_path(&scale_to_svg(&points, &dims));
  let stroke = match trend_summary(&points) {
    Some(summary) if !summary.is_positive => "var(--destructive)",
    _ => "var(--success)"
  };

  rsx! {
    svg {
      class: "sparkline",
      width: "{dims.width}",
      height: "{dims.height}",
      view_box: "0 0 {dims.width} {dims.height}",
      path {
        d: "{path}",
        fill: "none",
        stroke,
        stroke_width: "2",
        stroke_linecap: "round",
        stroke_linejoin: "round"
      }
    }
  }
}
