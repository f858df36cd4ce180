#![allow(non_snake_case)]

use charming::{
  component::{Axis, Grid, Title},
  element::{AreaStyle, AxisLabel, AxisType, Color, LineStyle, SplitLine, TextStyle, Tooltip, Trigger},
  series::Line,
  Chart, WasmRenderer
};
use dioxus::{logger::tracing::warn, prelude::*};
use rust_decimal::prelude::ToPrimitive;
use crate::utils::orderbook::PriceLevel;

static CANVAS_ID_DEPTH: &str = "orderbook-depth";
pub const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// `[price, cumulative size]` pairs in ascending price order.
pub fn depth_series(levels: &[PriceLevel]) -> Vec<Vec<f64>> {
  let mut series = levels.iter()
    .filter_map(|lvl| Some(vec![lvl.price.to_f64()?, lvl.total as f64]))
    .collect::<Vec<_>>();
  series.sort_by(|a, b| a[0].total_cmp(&b[0]));
  series
}

fn depth_chart(bids: Vec<Vec<f64>>, asks: Vec<Vec<f64>>) -> Chart {
  Chart::new()
    .title(
      Title::new()
      .text("Market Depth")
      .text_style(
        TextStyle::new()
        .color("rgba(255, 255, 255, 1)")
        .font_family("monospace")
        .font_size(16)
      )
    )
    .background_color("rgba(41,52,65,1)")
    .color(vec![Color::Value("#87f7cf".to_string()), Color::Value("#fc97af".to_string())])
    .tooltip(Tooltip::new().trigger(Trigger::Axis))
    .grid(Grid::new().left("10%").contain_label(true))
    .x_axis(
      Axis::new()
      .type_(AxisType::Value)
      .scale(true)
      .axis_label(AxisLabel::new().color("#aaaaaa"))
    )
    .y_axis(
      Axis::new()
      .type_(AxisType::Value)
      .split_line(SplitLine::new().line_style(LineStyle::new().color("#737373")))
      .axis_label(AxisLabel::new().color("#aaaaaa"))
    )
    .series(Line::new().name("Bids").show_symbol(false).area_style(AreaStyle::new().opacity(0.3)).data(bids))
    .series(Line::new().name("Asks").show_symbol(false).area_style(AreaStyle::new().opacity(0.3)).data(asks))
}

#[component]
pub fn DepthPlotCharming(bid_lvls: ReadOnlySignal<Vec<PriceLevel>>, ask_lvls: ReadOnlySignal<Vec<PriceLevel>>) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, Some(280)));

  use_effect(move || {
    let chart = depth_chart(depth_series(&bid_lvls()), depth_series(&ask_lvls()));
    // echarts may still be loading on first paint, the next poll re-renders
    if let Err(e) = renderer.read_unchecked().render(CANVAS_ID_DEPTH, &chart) {
      warn!("depth chart not rendered: {:?}", e);
    }
  });

  rsx! {
    div {
      id: CANVAS_ID_DEPTH,
      class: "depth-chart",
      onmounted: move |_evt| {
        document::eval(r#"
          setTimeout(function() {
            const element = document.getElementById('orderbook-depth');
            if (!element || !window.echarts) { return; }
            var chart = echarts.getInstanceByDom(element);
            if (!chart) { return; }
            window.addEventListener('resize', function() { chart.resize(); });
          }, 350)
        "#);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn level(price: rust_decimal::Decimal, total: u64) -> PriceLevel {
    PriceLevel { price, size: 0, total, depth: 0.0, order_count: 1 }
  }

  #[test]
  fn depth_series_is_price_ascending() {
    // bids arrive best-first (descending)
    let bids = vec![level(dec!(10.5), 3), level(dec!(10), 8), level(dec!(9.25), 9)];
    assert_eq!(depth_series(&bids), vec![vec![9.25, 9.0], vec![10.0, 8.0], vec![10.5, 3.0]]);
  }

  #[test]
  fn empty_side_has_no_points() {
    assert!(depth_series(&[]).is_empty());
  }
}
