use serde::{Deserialize, Serialize};

/// Session-length class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Short,
    Medium,
    Long,
}

/// Inclusive upper bounds (minutes) of the short and medium tiers.
/// Anything above `medium_max` is long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBounds {
    pub short_max: u32,
    pub medium_max: u32,
}

/// Bounds used by the per-day partition in the week view.
pub const WEEK_TIERS: TierBounds = TierBounds {
    short_max: 30,
    medium_max: 60,
};

/// Bounds used by the session-length histogram.
pub const HISTOGRAM_TIERS: TierBounds = TierBounds {
    short_max: 30,
    medium_max: 90,
};

impl TierBounds {
    pub fn classify(&self, minutes: u32) -> Tier {
        if minutes <= self.short_max {
            Tier::Short
        } else if minutes <= self.medium_max {
            Tier::Medium
        } else {
            Tier::Long
        }
    }

    /// Human label such as `Medium (31-90min)`.
    pub fn label(&self, tier: Tier) -> String {
        match tier {
            Tier::Short => format!("Short (≤{}min)", self.short_max),
            Tier::Medium => format!("Medium ({}-{}min)", self.short_max + 1, self.medium_max),
            Tier::Long => format!("Long (>{}min)", self.medium_max),
        }
    }
}
