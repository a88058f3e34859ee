use serde::{Deserialize, Serialize};

use terrarun_core::error::ConfigError;

/// Gravity acceleration (units/s^2, downward; world y grows downward).
pub const GRAVITY: f32 = 1000.0;
/// Primary jump impulse (units/s, applied as negative vy).
pub const JUMP_IMPULSE: f32 = 400.0;
/// Double-jump impulse. Weaker than the primary jump.
pub const DOUBLE_JUMP_IMPULSE: f32 = 350.0;
/// Base auto-run speed at level 1.
pub const RUN_SPEED: f32 = 150.0;
/// Auto-run speed gained per level.
pub const RUN_SPEED_PER_LEVEL: f32 = 20.0;
/// Horizontal speed under directional control.
pub const MOVE_SPEED: f32 = 200.0;
/// Player AABB size.
pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
/// Vertical gap between player feet and a platform top still accepted as
/// a landing.
pub const LAND_TOLERANCE: f32 = 20.0;

/// How the player's horizontal velocity is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Constant rightward speed that grows with the level.
    AutoRun,
    /// Left/right input at a fixed speed.
    Directional,
}

/// Tunable parameters for the dash simulation, loadable from TOML.
///
/// Immutable for the duration of a run; validated once by
/// [`validate`](DashConfig::validate) before the run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub double_jump_impulse: f32,
    pub control: ControlMode,
    pub run_speed: f32,
    pub run_speed_per_level: f32,
    pub move_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_spawn_x: f32,
    pub land_tolerance: f32,
    /// Clear horizontal daylight between consecutive platforms, at level 1.
    pub min_gap: f32,
    pub max_gap: f32,
    /// Fractional widening of the gap range per level past the first.
    pub gap_scale_per_level: f32,
    /// Discrete platform surface heights. The last entry is the lowest
    /// and is used for the starting platform.
    pub y_levels: Vec<f32>,
    pub platform_max_width: f32,
    pub platform_min_width: f32,
    /// Platform width lost per level past the first.
    pub platform_width_shrink: f32,
    pub platform_height: f32,
    /// Horizontal distance ahead of the camera's leading edge the
    /// generator keeps populated.
    pub lookahead: f32,
    /// Distance behind the player at which platforms and pickups retire.
    pub retire_behind: f32,
    /// World y beyond which the player counts as fallen.
    pub hazard_y: f32,
    /// Probability of attaching a pickup to a freshly spawned platform.
    pub pickup_chance: f64,
    /// Score awarded per collected pickup.
    pub pickup_score: u32,
    /// Pickup AABB edge length.
    pub pickup_size: f32,
    /// Height of a pickup above its platform surface.
    pub pickup_height_above: f32,
    pub starting_lives: u32,
    /// Platforms placed before the goal platform spawns, at level 1.
    /// Each level adds one more.
    pub platforms_per_level: u32,
    /// Surface height of the goal platform.
    pub goal_y: f32,
    /// Placements where both deltas exceed these are rejected as
    /// too-steep diagonal jumps.
    pub max_horizontal_reach: f32,
    pub max_vertical_reach: f32,
    /// World units of forward travel per score point.
    pub distance_per_point: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            double_jump_impulse: DOUBLE_JUMP_IMPULSE,
            control: ControlMode::AutoRun,
            run_speed: RUN_SPEED,
            run_speed_per_level: RUN_SPEED_PER_LEVEL,
            move_speed: MOVE_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_spawn_x: 250.0,
            land_tolerance: LAND_TOLERANCE,
            min_gap: 120.0,
            max_gap: 180.0,
            gap_scale_per_level: 0.1,
            y_levels: vec![250.0, 350.0, 450.0],
            platform_max_width: 200.0,
            platform_min_width: 100.0,
            platform_width_shrink: 15.0,
            platform_height: 30.0,
            lookahead: 400.0,
            retire_behind: 600.0,
            hazard_y: 570.0,
            pickup_chance: 0.7,
            pickup_score: 10,
            pickup_size: 20.0,
            pickup_height_above: 30.0,
            starting_lives: 3,
            platforms_per_level: 10,
            goal_y: 350.0,
            max_horizontal_reach: 150.0,
            max_vertical_reach: 150.0,
            distance_per_point: 10.0,
        }
    }
}

impl DashConfig {
    /// Load config from a TOML file. Falls back to defaults if the file
    /// is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("TERRARUN_DASH_CONFIG")
            .unwrap_or_else(|_| "config/dash.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<DashConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    DashConfig::default()
                },
            },
            Err(_) => DashConfig::default(),
        }
    }

    /// Check every parameter the tick loop depends on. Called once at
    /// run construction; a validated config guarantees the simulation
    /// never errors mid-tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("double_jump_impulse", self.double_jump_impulse),
            ("run_speed", self.run_speed),
            ("move_speed", self.move_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("min_gap", self.min_gap),
            ("platform_min_width", self.platform_min_width),
            ("platform_height", self.platform_height),
            ("lookahead", self.lookahead),
            ("retire_behind", self.retire_behind),
            ("pickup_size", self.pickup_size),
            ("distance_per_point", self.distance_per_point),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("land_tolerance", self.land_tolerance),
            ("run_speed_per_level", self.run_speed_per_level),
            ("gap_scale_per_level", self.gap_scale_per_level),
            ("platform_width_shrink", self.platform_width_shrink),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.min_gap > self.max_gap {
            return Err(ConfigError::InvertedRange {
                field: "platform gap",
                min: self.min_gap,
                max: self.max_gap,
            });
        }
        if self.platform_min_width > self.platform_max_width {
            return Err(ConfigError::InvertedRange {
                field: "platform width",
                min: self.platform_min_width,
                max: self.platform_max_width,
            });
        }
        if self.y_levels.is_empty() {
            return Err(ConfigError::Empty { field: "y_levels" });
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            return Err(ConfigError::OutOfUnitRange {
                field: "pickup_chance",
                value: self.pickup_chance as f32,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Zero {
                field: "starting_lives",
            });
        }
        if self.platforms_per_level == 0 {
            return Err(ConfigError::Zero {
                field: "platforms_per_level",
            });
        }
        Ok(())
    }

    /// Horizontal speed at the given level under the configured control
    /// mode.
    pub fn horizontal_speed(&self, level: u32) -> f32 {
        match self.control {
            ControlMode::AutoRun => {
                self.run_speed + level.saturating_sub(1) as f32 * self.run_speed_per_level
            },
            ControlMode::Directional => self.move_speed,
        }
    }

    /// Furthest clear gap the player can cross at this level, from jump
    /// airtime (primary plus double jump) at the level's horizontal
    /// speed. Generated gaps never exceed this.
    pub fn max_jump_distance(&self, level: u32) -> f32 {
        let air_time = 2.0 * (self.jump_impulse + self.double_jump_impulse) / self.gravity;
        self.horizontal_speed(level) * air_time
    }

    /// Gap range at the given level: the configured range widened per
    /// level, capped at the jump distance the player can actually cover.
    pub fn gap_range(&self, level: u32) -> (f32, f32) {
        let scale = 1.0 + level.saturating_sub(1) as f32 * self.gap_scale_per_level;
        let max = (self.max_gap * scale).min(self.max_jump_distance(level));
        let min = (self.min_gap * scale).min(max);
        (min, max)
    }

    /// Platform width at the given level. Shrinks with difficulty down
    /// to the configured minimum.
    pub fn platform_width(&self, level: u32) -> f32 {
        (self.platform_max_width - level.saturating_sub(1) as f32 * self.platform_width_shrink)
            .max(self.platform_min_width)
    }

    /// Platforms placed before the goal spawns at the given level.
    pub fn level_quota(&self, level: u32) -> u32 {
        self.platforms_per_level + level.saturating_sub(1)
    }

    /// Surface height of the starting platform (the lowest y-level).
    pub fn start_platform_y(&self) -> f32 {
        self.y_levels.last().copied().unwrap_or(450.0)
    }
}
