use chrono::DateTime;

use super::{
  currency::to_fixed,
  server::{MarketCapTrendPoint, PricePoint}
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
  pub x: f64,
  pub y: f64,
  // nanoseconds, kept for tooltips
  pub timestamp: u64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgPoint {
  pub x: f64,
  pub y: f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
  pub width: f64,
  pub height: f64,
  pub padding_top: f64,
  pub padding_bottom: f64,
  pub padding_left: f64,
  pub padding_right: f64
}

impl ChartDimensions {
  pub fn chart_width(&self) -> f64 {
    self.width - self.padding_left - self.padding_right
  }

  pub fn chart_height(&self) -> f64 {
    self.height - self.padding_top - self.padding_bottom
  }

  /// Vertical position of `value` on a series spanning `min..min+range`.
  pub fn y_for(&self, value: f64, min: f64, range: f64) -> f64 {
    self.padding_top + (1.0 - (value - min) / range) * self.chart_height()
  }
}

pub const TREND_DIMENSIONS: ChartDimensions = ChartDimensions {
  width: 700.0, height: 300.0, padding_top: 20.0, padding_bottom: 40.0, padding_left: 60.0, padding_right: 20.0
};

pub const SPARKLINE_DIMENSIONS: ChartDimensions = ChartDimensions {
  width: 120.0, height: 32.0, padding_top: 2.0, padding_bottom: 2.0, padding_left: 2.0, padding_right: 2.0
};

pub const PRICE_DIMENSIONS: ChartDimensions = ChartDimensions {
  width: 600.0, height: 240.0, padding_top: 16.0, padding_bottom: 32.0, padding_left: 56.0, padding_right: 16.0
};

pub fn normalize_trend_data(samples: &[MarketCapTrendPoint]) -> Vec<ChartPoint> {
  samples.iter().enumerate()
    .map(|(idx, sample)| ChartPoint { x: idx as f64, y: sample.market_cap as f64, timestamp: sample.timestamp })
    .collect()
}

/// Samples are sorted by time before indexing.
pub fn normalize_price_history(samples: &[PricePoint]) -> Vec<ChartPoint> {
  let mut sorted = samples.iter().filter(|sample| sample.price.is_finite()).cloned().collect::<Vec<_>>();
  sorted.sort_by_key(|sample| sample.timestamp);
  sorted.into_iter().enumerate()
    .map(|(idx, sample)| ChartPoint { x: idx as f64, y: sample.price, timestamp: sample.timestamp })
    .collect()
}

/// `(min, range)` of the series; a flat series gets a range of 1.
pub fn value_bounds(points: &[ChartPoint]) -> Option<(f64, f64)> {
  if points.is_empty() {
    return None;
  }
  let min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
  let max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
  let range = max - min;
  Some((min, if range == 0.0 { 1.0 } else { range }))
}

pub fn scale_to_svg(points: &[ChartPoint], dims: &ChartDimensions) -> Vec<SvgPoint> {
  let Some((min, range)) = value_bounds(points) else {
    return Vec::new();
  };
  let last = points.len().saturating_sub(1);

  points.iter().enumerate().map(|(idx, point)| {
    let x_scale = if last > 0 { idx as f64 / last as f64 } else { 0.5 };
    SvgPoint {
      x: dims.padding_left + x_scale * dims.chart_width(),
      y: dims.y_for(point.y, min, range)
    }
  }).collect()
}

pub fn generate_svg_path(points: &[SvgPoint]) -> String {
  match points {
    [] => String::new(),
    [only] => format!("M {},{} a 2,2 0 1,0 4,0 a 2,2 0 1,0 -4,0", only.x - 2.0, only.y),
    _ => points.iter().enumerate()
      .map(|(idx, p)| format!("{} {},{}", if idx == 0 { "M" } else { "L" }, p.x, p.y))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

pub fn y_axis_ticks(points: &[ChartPoint], tick_count: usize) -> Vec<f64> {
  let Some((min, range)) = value_bounds(points) else {
    return Vec::new();
  };
  match tick_count {
    0 => Vec::new(),
    1 => vec![min],
    n => (0..n).map(|i| min + range * i as f64 / (n - 1) as f64).collect()
  }
}

pub fn format_axis_value(value: f64) -> String {
  if value >= 1_000_000_000.0 {
    format!("${}B", to_fixed(value / 1_000_000_000.0, 1))
  } else if value >= 1_000_000.0 {
    format!("${}M", to_fixed(value / 1_000_000.0, 1))
  } else if value >= 1_000.0 {
    format!("${}K", to_fixed(value / 1_000.0, 1))
  } else {
    format!("${}", to_fixed(value, 0))
  }
}

/// "Jan 5, 03:07 PM" in UTC.
pub fn format_timestamp(timestamp_ns: u64) -> String {
  let secs = (timestamp_ns / 1_000_000_000) as i64;
  let nanos = (timestamp_ns % 1_000_000_000) as u32;
  match DateTime::from_timestamp(secs, nanos) {
    Some(dt) => dt.format("%b %-d, %I:%M %p").to_string(),
    None => String::from("-")
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
  pub current: f64,
  pub peak: f64,
  pub change_percent: String,
  pub is_positive: bool
}

pub fn trend_summary(points: &[ChartPoint]) -> Option<TrendSummary> {
  let first = points.first()?.y;
  let current = points.last()?.y;
  let peak = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
  let change = current - first;
  let change_percent = if first != 0.0 {
    format!("{:.2}", change / first * 100.0)
  } else {
    String::from("0.00")
  };

  Some(TrendSummary { current, peak, change_percent, is_positive: change >= 0.0 })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn series(values: &[u64]) -> Vec<ChartPoint> {
    let samples = values.iter().enumerate()
      .map(|(i, v)| MarketCapTrendPoint { timestamp: i as u64 * 1_000_000_000, market_cap: *v })
      .collect::<Vec<_>>();
    normalize_trend_data(&samples)
  }

  #[test]
  fn normalize_uses_index_as_x() {
    let points = series(&[10, 20, 15]);
    assert_eq!(points.iter().map(|p| p.x).collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
    assert_eq!(points[1].y, 20.0);
    assert_eq!(points[2].timestamp, 2_000_000_000);
  }

  #[test]
  fn price_history_is_sorted_by_time() {
    let samples = vec![
      PricePoint { timestamp: 30, price: 3.0 },
      PricePoint { timestamp: 10, price: 1.0 },
      PricePoint { timestamp: 20, price: 2.0 },
    ];
    let points = normalize_price_history(&samples);
    assert_eq!(points.iter().map(|p| p.y).collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
  }

  #[test]
  fn scaling_spans_the_chart_area() {
    let scaled = scale_to_svg(&series(&[0, 50, 100]), &TREND_DIMENSIONS);
    assert_eq!(scaled[0], SvgPoint { x: 60.0, y: 260.0 });
    assert_eq!(scaled[1], SvgPoint { x: 370.0, y: 140.0 });
    assert_eq!(scaled[2], SvgPoint { x: 680.0, y: 20.0 });
  }

  #[test]
  fn scaling_is_idempotent_and_ordered() {
    let points = series(&[5, 3, 9, 9, 1, 7]);
    let first = scale_to_svg(&points, &TREND_DIMENSIONS);
    let second = scale_to_svg(&points, &TREND_DIMENSIONS);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].x <= w[1].x));
  }

  #[test]
  fn single_sample_sits_in_the_middle() {
    let scaled = scale_to_svg(&series(&[42]), &TREND_DIMENSIONS);
    assert_eq!(scaled.len(), 1);
    assert_eq!(scaled[0].x, 60.0 + 0.5 * 620.0);
    assert_eq!(generate_svg_path(&scaled), format!("M {},260 a 2,2 0 1,0 4,0 a 2,2 0 1,0 -4,0", 370.0 - 2.0));
  }

  #[test]
  fn flat_series_stays_finite() {
    let scaled = scale_to_svg(&series(&[7, 7, 7]), &SPARKLINE_DIMENSIONS);
    assert!(scaled.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    let path = generate_svg_path(&scaled);
    assert!(!path.contains("NaN"));
    assert!(path.starts_with("M "));
  }

  #[test]
  fn empty_inputs() {
    assert!(scale_to_svg(&[], &TREND_DIMENSIONS).is_empty());
    assert_eq!(generate_svg_path(&[]), "");
    assert!(y_axis_ticks(&[], 5).is_empty());
    assert!(trend_summary(&[]).is_none());
  }

  #[test]
  fn path_joins_points() {
    let path = generate_svg_path(&[SvgPoint { x: 1.0, y: 2.0 }, SvgPoint { x: 3.5, y: 4.0 }]);
    assert_eq!(path, "M 1,2 L 3.5,4");
  }

  #[test]
  fn ticks_are_even() {
    assert_eq!(y_axis_ticks(&series(&[100, 500]), 5), vec![100.0, 200.0, 300.0, 400.0, 500.0]);
    assert_eq!(y_axis_ticks(&series(&[8]), 3), vec![8.0, 8.5, 9.0]);
  }

  #[test]
  fn axis_labels() {
    assert_eq!(format_axis_value(999.0), "$999");
    assert_eq!(format_axis_value(1_260.0), "$1.3K");
    assert_eq!(format_axis_value(1_250.0), "$1.3K");
    assert_eq!(format_axis_value(12.5), "$13");
    assert_eq!(format_axis_value(2_000_000.0), "$2.0M");
    assert_eq!(format_axis_value(3_460_000_000.0), "$3.5B");
  }

  #[test]
  fn timestamp_is_rendered_in_utc() {
    // 2024-01-05T15:07:00Z
    assert_eq!(format_timestamp(1_704_467_220_000_000_000), "Jan 5, 03:07 PM");
  }

  #[test]
  fn summary_reports_change_from_first_sample() {
    let summary = trend_summary(&series(&[200, 400, 300])).unwrap();
    assert_eq!(summary.current, 300.0);
    assert_eq!(summary.peak, 400.0);
    assert_eq!(summary.change_percent, "50.00");
    assert!(summary.is_positive);

    let from_zero = trend_summary(&series(&[0, 10])).unwrap();
    assert_eq!(from_zero.change_percent, "0.00");

    let falling = trend_summary(&series(&[10, 5])).unwrap();
    assert_eq!(falling.change_percent, "-50.00");
    assert!(!falling.is_positive);
  }
}
