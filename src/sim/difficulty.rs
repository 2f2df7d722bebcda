//! Difficulty tiers and score-driven ramps
//!
//! Both knobs are pure linear functions of score, capped per tier.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning for one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierTuning {
    pub initial_lives: u32,
    /// Base fall speed range (pixels per tick)
    pub speed: (f32, f32),
    /// Shape size range (radius / half-extent)
    pub size: (f32, f32),
    pub base_spawn: f32,
    pub speed_slope: f32,
    pub spawn_slope: f32,
    pub spawn_cap: f32,
}

const EASY: TierTuning = TierTuning {
    initial_lives: 5,
    speed: (0.5, 2.0),
    size: (30.0, 50.0),
    base_spawn: 0.015,
    speed_slope: 0.004,
    spawn_slope: 0.00004,
    spawn_cap: 0.03,
};

const NORMAL: TierTuning = TierTuning {
    initial_lives: 4,
    speed: (1.0, 3.0),
    size: (25.0, 45.0),
    base_spawn: 0.02,
    speed_slope: 0.01,
    spawn_slope: 0.0001,
    spawn_cap: 0.04,
};

const HARD: TierTuning = TierTuning {
    initial_lives: 3,
    speed: (1.5, 4.5),
    size: (20.0, 38.0),
    base_spawn: 0.025,
    speed_slope: 0.015,
    spawn_slope: 0.00015,
    spawn_cap: 0.05,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn tuning(&self) -> &'static TierTuning {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }

    pub fn initial_lives(&self) -> u32 {
        self.tuning().initial_lives
    }

    pub fn speed_range(&self) -> Range<f32> {
        let (lo, hi) = self.tuning().speed;
        lo..hi
    }

    pub fn size_range(&self) -> Range<f32> {
        let (lo, hi) = self.tuning().size;
        lo..hi
    }

    /// Fall speed multiplier for new spawns at `score`
    pub fn speed_multiplier(&self, score: u64) -> f32 {
        1.0 + score as f32 * self.tuning().speed_slope
    }

    /// Per-tick spawn chance at `score`
    pub fn spawn_probability(&self, score: u64) -> f32 {
        let t = self.tuning();
        (t.base_spawn + score as f32 * t.spawn_slope).min(t.spawn_cap)
    }
}
