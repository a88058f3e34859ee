use serde::{Deserialize, Serialize};

/// Collectible resource classes. Pickups cycle through them round-robin
/// so collection stays balanced across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Stone,
    Ice,
    Energy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Stone,
        ResourceKind::Ice,
        ResourceKind::Energy,
    ];

    /// The next kind in the round-robin cycle.
    pub fn next(self) -> Self {
        match self {
            ResourceKind::Stone => ResourceKind::Ice,
            ResourceKind::Ice => ResourceKind::Energy,
            ResourceKind::Energy => ResourceKind::Stone,
        }
    }
}

/// Per-kind resource counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub stone: u64,
    pub ice: u64,
    pub energy: u64,
}

impl ResourceTotals {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Stone => self.stone,
            ResourceKind::Ice => self.ice,
            ResourceKind::Energy => self.energy,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u64) {
        match kind {
            ResourceKind::Stone => self.stone += amount,
            ResourceKind::Ice => self.ice += amount,
            ResourceKind::Energy => self.energy += amount,
        }
    }

    /// Add every count from `other` into this total.
    pub fn credit(&mut self, other: &ResourceTotals) {
        self.stone += other.stone;
        self.ice += other.ice;
        self.energy += other.energy;
    }

    pub fn total(&self) -> u64 {
        self.stone + self.ice + self.energy
    }
}
