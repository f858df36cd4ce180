#![allow(non_snake_case)]

use candid::Principal;
use dioxus::prelude::*;
use crate::{
  components::skeleton::Skeleton,
  hooks::queries::use_market_cap_trend,
  utils::{
    currency::format_market_cap,
    trend_chart::{
      format_axis_value, format_timestamp, generate_svg_path, normalize_trend_data, scale_to_svg,
      trend_summary, value_bounds, y_axis_ticks, TREND_DIMENSIONS
    }
  }
};

#[component]
pub fn MarketCapTrendDialog(user: Principal, user_name: String) -> Element {
  let mut open = use_signal(|| false);

  rsx! {
    button {
      class: "button button-ghost",
      onclick: move |_| open.set(true),
      "View Trend"
    }
    if open() {
      div {
        class: "dialog-backdrop",
        onclick: move |_| open.set(false),
        div {
          class: "dialog wide",
          onclick: move |evt| evt.stop_propagation(),
          div {
            class: "dialog-header",
            h2 { "Market Cap Trend" }
            p { class: "muted", "{user_name}'s creator market cap over time" }
            button { class: "dialog-close", onclick: move |_| open.set(false), "✕" }
          }
          TrendChartContent { user: Some(user) }
        }
      }
    }
  }
}

#[component]
fn TrendChartContent(user: ReadOnlySignal<Option<Principal>>) -> Element {
  let trend = use_market_cap_trend(user);

  if trend.is_loading() {
    return rsx! {
      Skeleton { height: "300px" }
      div {
        class: "stat-grid",
        Skeleton { height: "4em" }
        Skeleton { height: "4em" }
        Skeleton { height: "4em" }
      }
    };
  }
  if let Some(err) = trend.error() {
    return rsx! { div { class: "alert alert-error", "{err}" } };
  }

  let samples = trend.data().unwrap_or_default();
  let points = normalize_trend_data(&samples);
  let (Some(summary), Some((min, range))) = (trend_summary(&points), value_bounds(&points)) else {
    return rsx! {
      div {
        class: "card dashed center",
        p { class: "muted", "No trend data available yet." }
        p { class: "muted", "Market cap history will appear after trading activity." }
      }
    };
  };

  let dims = TREND_DIMENSIONS;
  let scaled = scale_to_svg(&points, &dims);
  let path = generate_svg_path(&scaled);
  let stroke = if summary.is_positive { "var(--success)" } else { "var(--chart-2)" };
  let sign = if summary.is_positive { "+" } else { "" };
  let ticks = y_axis_ticks(&points, 5).into_iter()
    .map(|tick| (dims.y_for(tick, min, range), format_axis_value(tick)))
    .collect::<Vec<_>>();
  let markers = scaled.iter().zip(samples.iter())
    .map(|(point, sample)| (point.x, point.y, format!("{}: {}", format_timestamp(sample.timestamp), format_market_cap(sample.market_cap))))
    .collect::<Vec<_>>();
  let first_label = samples.first().map(|s| format_timestamp(s.timestamp)).unwrap_or_default();
  let last_label = samples.last().map(|s| format_timestamp(s.timestamp)).unwrap_or_default();
  let (x_left, x_right) = (dims.padding_left, dims.width - dims.padding_right);
  let (y_top, y_bottom) = (dims.padding_top, dims.height - dims.padding_bottom);
  let label_y = y_bottom + 20.0;
  let tick_x = x_left - 10.0;

  rsx! {
    div {
      class: "stat-grid",
      div { class: "stat", div { class: "stat-label", "Current" } div { class: "stat-value", {format_market_cap(summary.current as u64)} } }
      div {
        class: "stat",
        div { class: "stat-label", "Change" }
        div { class: if summary.is_positive { "stat-value up" } else { "stat-value down" }, "{sign}{summary.change_percent}%" }
      }
      div { class: "stat", div { class: "stat-label", "Peak" } div { class: "stat-value", {format_market_cap(summary.peak as u64)} } }
    }
    svg {
      class: "trend-chart",
      width: "100%",
      height: "{dims.height}",
      view_box: "0 0 {dims.width} {dims.height}",
      for (idx, (y, label)) in ticks.into_iter().enumerate() {
        g {
          key: "tick{idx}",
          line { x1: "{x_left}", y1: "{y}", x2: "{x_right}", y2: "{y}", stroke: "var(--border)", stroke_dasharray: "4 4", opacity: "0.3" }
          text { x: "{tick_x}", y: "{y}", text_anchor: "end", dominant_baseline: "middle", class: "axis-label", "{label}" }
        }
      }
      line { x1: "{x_left}", y1: "{y_bottom}", x2: "{x_right}", y2: "{y_bottom}", stroke: "var(--border)" }
      line { x1: "{x_left}", y1: "{y_top}", x2: "{x_left}", y2: "{y_bottom}", stroke: "var(--border)" }
      path { d: "{path}", fill: "none", stroke, stroke_width: "3", stroke_linecap: "round", stroke_linejoin: "round" }
      for (idx, (cx, cy, tooltip)) in markers.into_iter().enumerate() {
        circle { key: "pt{idx}", cx: "{cx}", cy: "{cy}", r: "4", fill: stroke, title { "{tooltip}" } }
      }
      text { x: "{x_left}", y: "{label_y}", text_anchor: "start", class: "axis-label", "{first_label}" }
      text { x: "{x_right}", y: "{label_y}", text_anchor: "end", class: "axis-label", "{last_label}" }
    }
  }
}
