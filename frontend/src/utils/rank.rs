/* Creator rank tiers, keyed on the total market cap of the coins a user launched */

#[derive(Debug, Clone, PartialEq)]
pub struct RankTier {
  pub name: &'static str,
  pub min_creator_cap: f64,
  pub color: &'static str,
  pub glow_class: &'static str,
  pub badge_index: usize,
  pub description: &'static str
}

// ascending by `min_creator_cap`
pub const RANK_TIERS: [RankTier; 6] = [
  RankTier { name: "INITIATE", min_creator_cap: 0.0, color: "text-muted-foreground", glow_class: "", badge_index: 0, description: "Building foundation" },
  RankTier { name: "OPERATOR", min_creator_cap: 5_000.0, color: "text-chart-2", glow_class: "", badge_index: 1, description: "Establishing presence" },
  RankTier { name: "SPECIALIST", min_creator_cap: 15_000.0, color: "text-chart-3", glow_class: "", badge_index: 2, description: "Proven creator" },
  RankTier { name: "ELITE", min_creator_cap: 50_000.0, color: "text-chart-4", glow_class: "rank-glow-bronze", badge_index: 3, description: "Market force" },
  RankTier { name: "MASTER", min_creator_cap: 150_000.0, color: "text-chart-5", glow_class: "rank-glow-silver", badge_index: 4, description: "Dominant creator" },
  RankTier { name: "LEGEND", min_creator_cap: 500_000.0, color: "text-primary", glow_class: "rank-glow-gold", badge_index: 5, description: "Absolute control" },
];

fn tier_index(creator_cap: f64) -> usize {
  RANK_TIERS.iter()
    .rposition(|tier| creator_cap >= tier.min_creator_cap)
    .unwrap_or(0)
}

pub fn rank_tier(creator_cap: f64) -> &'static RankTier {
  &RANK_TIERS[tier_index(creator_cap)]
}

pub fn next_rank_tier(creator_cap: f64) -> Option<&'static RankTier> {
  RANK_TIERS.get(tier_index(creator_cap) + 1)
}

/// Percentage of the way from the current tier's floor to the next one.
pub fn rank_progress(creator_cap: f64) -> f64 {
  let current = rank_tier(creator_cap);
  let Some(next) = next_rank_tier(creator_cap) else {
    return 100.0;
  };

  let tier_range = next.min_creator_cap - current.min_creator_cap;
  let progress = (creator_cap - current.min_creator_cap) / tier_range * 100.0;
  if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 100.0) }
}

pub fn cap_to_next_tier(creator_cap: f64) -> Option<f64> {
  next_rank_tier(creator_cap).map(|next| (next.min_creator_cap - creator_cap).ceil())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_highest_qualifying_tier() {
    assert_eq!(rank_tier(0.0).name, "INITIATE");
    assert_eq!(rank_tier(4_999.0).name, "INITIATE");
    assert_eq!(rank_tier(5_000.0).name, "OPERATOR");
    assert_eq!(rank_tier(49_999.99).name, "SPECIALIST");
    assert_eq!(rank_tier(150_000.0).name, "MASTER");
    assert_eq!(rank_tier(10_000_000.0).name, "LEGEND");
  }

  #[test]
  fn initiate_is_the_floor() {
    assert_eq!(rank_tier(-10.0).name, "INITIATE");
    assert_eq!(rank_tier(f64::NAN).name, "INITIATE");
  }

  #[test]
  fn lookup_is_monotonic() {
    let caps = [0.0, 1.0, 4_999.0, 5_000.0, 12_345.0, 15_000.0, 49_000.0, 50_000.0, 149_999.0, 150_000.0, 499_999.0, 500_000.0, 9e9];
    for pair in caps.windows(2) {
      assert!(rank_tier(pair[0]).badge_index <= rank_tier(pair[1]).badge_index, "{:?}", pair);
    }
  }

  #[test]
  fn next_tier_is_absent_at_the_top() {
    assert_eq!(next_rank_tier(0.0).map(|t| t.name), Some("OPERATOR"));
    assert_eq!(next_rank_tier(160_000.0).map(|t| t.name), Some("LEGEND"));
    assert!(next_rank_tier(500_000.0).is_none());
  }

  #[test]
  fn progress_stays_within_bounds() {
    assert_eq!(rank_progress(0.0), 0.0);
    assert_eq!(rank_progress(2_500.0), 50.0);
    assert_eq!(rank_progress(10_000.0), 50.0);
    assert_eq!(rank_progress(-50.0), 0.0);
    for cap in [0.0, 3.3, 5_000.0, 77_777.0, 499_999.0] {
      let p = rank_progress(cap);
      assert!((0.0..=100.0).contains(&p));
    }
  }

  #[test]
  fn progress_is_full_at_top_tier() {
    assert_eq!(rank_progress(500_000.0), 100.0);
    assert_eq!(rank_progress(2_000_000.0), 100.0);
  }

  #[test]
  fn cap_needed_rounds_up() {
    assert_eq!(cap_to_next_tier(4_000.5), Some(1_000.0));
    assert_eq!(cap_to_next_tier(600_000.0), None);
  }
}
