//! Health value object for costed actions

use serde::{Deserialize, Serialize};

/// Default health pool for a freshly seeded player.
pub const DEFAULT_MAX_HEALTH: u32 = 5;

/// A player's remaining health. Floored at zero, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Health(u32);

impl Health {
    /// Create a full health pool.
    pub fn full(max: u32) -> Self {
        Self(max)
    }

    /// Spend one point. Saturates at zero.
    pub fn spend(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Remaining points.
    pub fn remaining(&self) -> u32 {
        self.0
    }

    /// A player at zero health may not perform costed actions.
    pub fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}
