#![allow(non_snake_case)]

use dioxus::prelude::*;
use crate::{
  hooks::queries::use_price_history,
  utils::{
    config::PRICE_HISTORY_POINTS,
    currency::{format_price, format_price_with_unit},
    trend_chart::{generate_svg_path, normalize_price_history, scale_to_svg, trend_summary, value_bounds, PRICE_DIMENSIONS}
  }
};

#[component]
pub fn PriceHistoryChart(symbol: ReadOnlySignal<String>) -> Element {
  let history = use_price_history(symbol, Some(PRICE_HISTORY_POINTS));

  if history.is_loading() {
    return rsx! {
      div { class: "chart-placeholder pulse", "Loading price data..." }
    };
  }
  if let Some(err) = history.error() {
    return rsx! { div { class: "alert alert-error", "{err}" } };
  }

  let points = normalize_price_history(&history.data().unwrap_or_default());
  let (Some(summary), Some((min, _))) = (trend_summary(&points), value_bounds(&points)) else {
    return rsx! {
      div { class: "chart-placeholder", "No price history available yet. Place the first order to start tracking prices." }
    };
  };

  let dims = PRICE_DIMENSIONS;
  let scaled = scale_to_svg(&points, &dims);
  let path = generate_svg_path(&scaled);
  let (trend_class, stroke) = if summary.is_positive { ("up", "var(--accent)") } else { ("down", "var(--destructive)") };
  let max_price = format_price(summary.peak);
  let min_price = format_price(min);
  let current = format_price_with_unit(summary.current);
  let sample_count = points.len();
  let (x_left, x_right) = (dims.padding_left, dims.width - dims.padding_right);
  let (y_top, y_bottom) = (dims.padding_top, dims.height - dims.padding_bottom);
  let label_x = x_left - 10.0;
  let mid_x = dims.width / 2.0;
  let foot_y = dims.height - 5.0;

  rsx! {
    div {
      class: "price-chart",
      div {
        class: "price-chart-header",
        span { class: "muted", if summary.is_positive { "▲ Price Chart" } else { "▼ Price Chart" } }
        div {
          class: "price-chart-current",
          div { class: "muted small", "Current Price" }
          div { class: "price {trend_class}", "{current}" }
        }
      }
      svg {
        view_box: "0 0 {dims.width} {dims.height}",
        class: "price-chart-svg",
        line { x1: "{x_left}", y1: "{y_top}", x2: "{x_left}", y2: "{y_bottom}", stroke: "var(--border)" }
        line { x1: "{x_left}", y1: "{y_bottom}", x2: "{x_right}", y2: "{y_bottom}", stroke: "var(--border)" }
        path { d: "{path}", fill: "none", stroke, stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round" }
        for (idx, point) in scaled.into_iter().enumerate() {
          circle { key: "pp{idx}", cx: "{point.x}", cy: "{point.y}", r: "3", fill: stroke, opacity: "0.6" }
        }
        text { x: "{label_x}", y: "{y_top}", text_anchor: "end", dominant_baseline: "middle", class: "axis-label", "${max_price}" }
        text { x: "{label_x}", y: "{y_bottom}", text_anchor: "end", dominant_baseline: "middle", class: "axis-label", "${min_price}" }
        text { x: "{mid_x}", y: "{foot_y}", text_anchor: "middle", class: "axis-label", "{sample_count} price points" }
      }
    }
  }
}
