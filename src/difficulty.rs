//! Difficulty levels and their gravity delays

use serde::{Deserialize, Serialize};

/// Fall delay used for soft drop and while the auto-player is driving
pub const FAST_DROP_DELAY: f32 = 0.05;

/// Available difficulties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "One row every half second",
            Difficulty::Medium => "One row every 0.3 seconds",
            Difficulty::Hard => "One row every 0.1 seconds",
        }
    }

    /// Seconds between gravity steps
    pub fn delay(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 0.1,
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}
