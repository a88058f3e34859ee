use serde::{Deserialize, Serialize};

use crate::resources::{ResourceKind, ResourceTotals};

/// Terraforming progress is a percentage and saturates at 100.
const TERRAFORMING_MAX: u8 = 100;

/// Cross-run player progress: banked resources, colony level, and
/// terraforming percentage.
///
/// All mutation goes through the methods below; presentation layers get
/// clones, never references they could write through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    resources: ResourceTotals,
    level: u32,
    terraforming: u8,
    missions_completed: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            resources: ResourceTotals::default(),
            level: 1,
            terraforming: 0,
            missions_completed: 0,
        }
    }
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources(&self) -> &ResourceTotals {
        &self.resources
    }

    /// Current difficulty level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn terraforming(&self) -> u8 {
        self.terraforming
    }

    pub fn missions_completed(&self) -> u32 {
        self.missions_completed
    }

    pub fn add_resource(&mut self, kind: ResourceKind, amount: u64) {
        self.resources.add(kind, amount);
    }

    pub fn credit_resources(&mut self, earned: &ResourceTotals) {
        self.resources.credit(earned);
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    /// Raise terraforming by `percent`, saturating at 100.
    pub fn add_terraforming(&mut self, percent: u8) {
        self.terraforming = self.terraforming.saturating_add(percent).min(TERRAFORMING_MAX);
    }

    pub fn record_mission(&mut self) {
        self.missions_completed += 1;
    }
}
