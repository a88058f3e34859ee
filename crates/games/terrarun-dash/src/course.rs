use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use terrarun_core::resources::ResourceKind;

use crate::config::DashConfig;

/// Redraws attempted before a too-steep placement falls back to a flat
/// jump at the previous height.
const MAX_PLACEMENT_TRIES: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Normal,
    /// Landing here completes the level.
    Goal,
}

/// An immovable platform. `x, y` address the top-left corner of the
/// walkable surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A collectible resource orb hovering above a platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: ResourceKind,
}

/// The rolling platform window and its generator state.
///
/// Platforms spawn ahead of the camera and retire behind it, so the
/// active set stays bounded no matter how long the run lasts. The RNG is
/// part of the serialized state: restoring a snapshot resumes the exact
/// same world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub platforms: Vec<Platform>,
    pub pickups: Vec<Pickup>,
    rng: ChaCha8Rng,
    next_id: u32,
    /// Round-robin cursor for the next pickup's resource kind.
    next_pickup: ResourceKind,
    /// Right edge of the furthest platform spawned so far.
    rightmost_right: f32,
    /// Surface height of the furthest platform, for reachability checks.
    prev_y: f32,
    /// Platforms placed this level, the starting platform included.
    placed: u32,
    goal_spawned: bool,
}

impl Course {
    pub fn new(seed: u64, cfg: &DashConfig, level: u32) -> Self {
        let mut course = Self {
            platforms: Vec::new(),
            pickups: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
            next_pickup: ResourceKind::Stone,
            rightmost_right: 0.0,
            prev_y: 0.0,
            placed: 0,
            goal_spawned: false,
        };
        course.spawn_start(cfg, level);
        course
    }

    /// Rebuild the platform window for a fresh attempt or the next
    /// level, continuing the existing RNG stream.
    pub fn restart_window(&mut self, cfg: &DashConfig, level: u32) {
        self.platforms.clear();
        self.pickups.clear();
        self.placed = 0;
        self.goal_spawned = false;
        self.spawn_start(cfg, level);
    }

    /// Advance the window: retire everything behind `trailing_edge`,
    /// then spawn until the world is populated `lookahead` past
    /// `leading_edge` or the level quota runs out (the goal platform
    /// closes the level).
    pub fn tick(&mut self, trailing_edge: f32, leading_edge: f32, cfg: &DashConfig, level: u32) {
        self.platforms.retain(|p| p.right() >= trailing_edge);
        self.pickups
            .retain(|p| p.x + cfg.pickup_size >= trailing_edge);

        let target = leading_edge + cfg.lookahead;
        while !self.goal_spawned && self.rightmost_right < target {
            if self.placed >= cfg.level_quota(level) {
                self.spawn_goal(cfg, level);
            } else {
                self.spawn_platform(cfg, level);
            }
        }
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn goal_spawned(&self) -> bool {
        self.goal_spawned
    }

    pub fn placed(&self) -> u32 {
        self.placed
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The starting platform, centered under the player spawn at the
    /// lowest y-level. Never carries a pickup.
    fn spawn_start(&mut self, cfg: &DashConfig, level: u32) {
        let width = cfg.platform_width(level);
        let x = cfg.player_spawn_x + cfg.player_width / 2.0 - width / 2.0;
        let y = cfg.start_platform_y();
        let id = self.alloc_id();
        self.platforms.push(Platform {
            id,
            x,
            y,
            width,
            height: cfg.platform_height,
            kind: PlatformKind::Normal,
        });
        self.rightmost_right = x + width;
        self.prev_y = y;
        self.placed = 1;
    }

    fn spawn_platform(&mut self, cfg: &DashConfig, level: u32) {
        let (min_gap, max_gap) = cfg.gap_range(level);
        let width = cfg.platform_width(level);

        let mut gap = self.rng.random_range(min_gap..=max_gap);
        let mut y = self.pick_y_level(cfg);
        let mut tries = 0;
        while tries < MAX_PLACEMENT_TRIES && self.too_steep(gap, y, cfg) {
            gap = self.rng.random_range(min_gap..=max_gap);
            y = self.pick_y_level(cfg);
            tries += 1;
        }
        if self.too_steep(gap, y, cfg) {
            // Every redraw came out steep; keep the gap and flatten.
            y = self.prev_y;
        }

        let x = self.rightmost_right + gap;
        let id = self.alloc_id();
        self.platforms.push(Platform {
            id,
            x,
            y,
            width,
            height: cfg.platform_height,
            kind: PlatformKind::Normal,
        });
        self.maybe_attach_pickup(x, y, width, cfg);
        self.rightmost_right = x + width;
        self.prev_y = y;
        self.placed += 1;
    }

    /// The level-end platform: one minimum gap ahead, full width, at the
    /// goal height. Spawning it closes the level's generation.
    fn spawn_goal(&mut self, cfg: &DashConfig, level: u32) {
        let (min_gap, _) = cfg.gap_range(level);
        let x = self.rightmost_right + min_gap;
        let id = self.alloc_id();
        self.platforms.push(Platform {
            id,
            x,
            y: cfg.goal_y,
            width: cfg.platform_max_width,
            height: cfg.platform_height,
            kind: PlatformKind::Goal,
        });
        self.rightmost_right = x + cfg.platform_max_width;
        self.prev_y = cfg.goal_y;
        self.goal_spawned = true;
    }

    fn pick_y_level(&mut self, cfg: &DashConfig) -> f32 {
        cfg.y_levels[self.rng.random_range(0..cfg.y_levels.len())]
    }

    /// A jump is rejected only when the horizontal and vertical deltas
    /// both exceed their thresholds at once.
    fn too_steep(&self, gap: f32, y: f32, cfg: &DashConfig) -> bool {
        gap > cfg.max_horizontal_reach && (y - self.prev_y).abs() > cfg.max_vertical_reach
    }

    fn maybe_attach_pickup(&mut self, x: f32, y: f32, width: f32, cfg: &DashConfig) {
        if !self.rng.random_bool(cfg.pickup_chance) {
            return;
        }
        let jitter = self.rng.random_range(-(width / 4.0)..=width / 4.0);
        let px = x + width / 2.0 - cfg.pickup_size / 2.0 + jitter;
        let py = y - cfg.pickup_height_above;
        let kind = self.next_pickup;
        self.next_pickup = kind.next();
        let id = self.alloc_id();
        self.pickups.push(Pickup {
            id,
            x: px,
            y: py,
            kind,
        });
    }
}
