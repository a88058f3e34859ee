pub mod collision;
pub mod config;
pub mod course;
pub mod motion;
pub mod scoring;

use serde::{Deserialize, Serialize};

use terrarun_core::error::ConfigError;
use terrarun_core::game_trait::{GameEvent, GameMetadata, MiniGame, RunResults};
use terrarun_core::input::TickInput;
use terrarun_core::progress::PlayerProgress;
use terrarun_core::resources::ResourceTotals;
use terrarun_core::terrarun_game_boilerplate;

use config::DashConfig;
use course::{Course, Pickup, Platform, PlatformKind};
use motion::PlayerBody;

/// Run phase. Exactly one value holds at any tick boundary; ticks in any
/// non-Running phase are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Running,
    /// A life was lost but some remain; `continue_run` resumes.
    LifeLost,
    /// Out of lives. Final.
    GameOver,
    /// The goal platform was reached; `advance_level` starts the next.
    LevelComplete,
}

/// Mutable per-run bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Monotonic within a level; resets when the level restarts.
    pub score: u32,
    pub lives: u32,
    /// Pickups gathered over the whole run, all levels included.
    pub collected: ResourceTotals,
    pub level: u32,
    pub terminal: Terminal,
    /// Portion of `score` already granted for forward travel.
    distance_points: u32,
}

/// The full serializable simulation state: restoring this resumes the
/// exact trajectory, generator RNG included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub player: PlayerBody,
    pub course: Course,
    pub run: RunState,
    /// Furthest x the player has reached; the scroll never backs up.
    pub camera_x: f32,
}

impl DashState {
    fn new(cfg: &DashConfig, level: u32, seed: u64) -> Self {
        Self {
            player: PlayerBody::spawn(
                cfg.player_spawn_x,
                cfg.start_platform_y() - cfg.player_height,
            ),
            course: Course::new(seed, cfg, level),
            run: RunState {
                score: 0,
                lives: cfg.starting_lives,
                collected: ResourceTotals::default(),
                level,
                terminal: Terminal::Running,
                distance_points: 0,
            },
            camera_x: cfg.player_spawn_x,
        }
    }

    pub fn is_over(&self) -> bool {
        self.run.terminal == Terminal::GameOver
    }
}

/// Read-only view handed to the renderer each frame. Built from a
/// consistent state in one go, so a reset is never observable halfway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerBody,
    pub platforms: Vec<Platform>,
    pub pickups: Vec<Pickup>,
    pub run: RunState,
}

/// The Terra Dash run controller.
///
/// Owns all mutable run state and drives the per-tick pipeline:
/// generate, move, collide, resolve, collect, evaluate. Construction
/// validates the configuration; after that no tick can fail.
pub struct DashRun {
    config: DashConfig,
    state: DashState,
    progress: PlayerProgress,
    /// Resources banked this run: pickups plus level/salvage conversions.
    earned: ResourceTotals,
}

impl DashRun {
    pub fn new(config: DashConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = DashState::new(&config, 1, 0);
        Ok(Self {
            config,
            state,
            progress: PlayerProgress::new(),
            earned: ResourceTotals::default(),
        })
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn state(&self) -> &DashState {
        &self.state
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.state.player,
            platforms: self.state.course.platforms.clone(),
            pickups: self.state.course.pickups.clone(),
            run: self.state.run.clone(),
        }
    }

    /// Acknowledge a lost life and resume. The player returns to the
    /// spawn and the platform window regenerates (continuing the same
    /// RNG stream); the level's score starts over.
    pub fn continue_run(&mut self) {
        if self.state.run.terminal != Terminal::LifeLost {
            return;
        }
        self.respawn();
        self.state.run.terminal = Terminal::Running;
    }

    /// Move on from a completed level: difficulty up, fresh window,
    /// score reset. Rewards were banked when the level completed.
    pub fn advance_level(&mut self) {
        if self.state.run.terminal != Terminal::LevelComplete {
            return;
        }
        self.progress.advance_level();
        self.state.run.level += 1;
        self.respawn();
        self.state.run.terminal = Terminal::Running;
        tracing::debug!(level = self.state.run.level, "starting next level");
    }

    fn respawn(&mut self) {
        self.state.player = PlayerBody::spawn(
            self.config.player_spawn_x,
            self.config.start_platform_y() - self.config.player_height,
        );
        self.state.camera_x = self.config.player_spawn_x;
        let level = self.state.run.level;
        self.state.course.restart_window(&self.config, level);
        self.state.run.score = 0;
        self.state.run.distance_points = 0;
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.state.run.lives -= 1;
        if self.state.run.lives == 0 {
            // Straight to game over; LifeLost is skipped on the last life.
            let salvage = scoring::game_over_salvage(self.state.run.score);
            self.progress.credit_resources(&salvage);
            self.earned.credit(&salvage);
            self.state.run.terminal = Terminal::GameOver;
            tracing::debug!(score = self.state.run.score, "run over");
            events.push(GameEvent::GameOver {
                score: self.state.run.score,
            });
        } else {
            self.state.run.terminal = Terminal::LifeLost;
            tracing::debug!(remaining = self.state.run.lives, "life lost");
            events.push(GameEvent::LifeLost {
                remaining: self.state.run.lives,
            });
        }
    }

    fn complete_level(&mut self, events: &mut Vec<GameEvent>) {
        let rewards = scoring::level_rewards(self.state.run.score);
        self.progress.credit_resources(&rewards);
        self.progress.add_terraforming(scoring::TERRAFORMING_PER_LEVEL);
        self.progress.record_mission();
        self.earned.credit(&rewards);
        self.state.run.terminal = Terminal::LevelComplete;
        tracing::debug!(
            level = self.state.run.level,
            score = self.state.run.score,
            "level complete"
        );
        events.push(GameEvent::LevelComplete {
            level: self.state.run.level,
        });
    }

    fn collect_pickups(&mut self, events: &mut Vec<GameEvent>) {
        let size = self.config.pickup_size;
        let left = self.state.player.x;
        let right = self.state.player.right(self.config.player_width);
        let top = self.state.player.y;
        let bottom = self.state.player.bottom(self.config.player_height);

        let mut taken = Vec::new();
        self.state.course.pickups.retain(|p| {
            let hit = right > p.x && left < p.x + size && bottom > p.y && top < p.y + size;
            if hit {
                taken.push(p.kind);
            }
            !hit
        });

        for kind in taken {
            self.state.run.collected.add(kind, 1);
            self.progress.add_resource(kind, 1);
            self.earned.add(kind, 1);
            self.state.run.score += self.config.pickup_score;
            events.push(GameEvent::PickupCollected { kind });
            events.push(GameEvent::ScoreUpdate {
                score: self.state.run.score,
            });
        }
    }
}

impl MiniGame for DashRun {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Terra Dash".to_string(),
            description: "Run the scrolling ridge, clear the gaps, bank resources for the colony."
                .to_string(),
        }
    }

    fn start(&mut self, progress: &PlayerProgress, seed: u64) {
        self.progress = progress.clone();
        self.earned = ResourceTotals::default();
        self.state = DashState::new(&self.config, progress.level(), seed);
    }

    fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let input = input.sanitized();
        if self.state.run.terminal != Terminal::Running {
            return Vec::new();
        }
        let mut events = Vec::new();
        let level = self.state.run.level;

        // 1. Keep the world populated ahead of the camera.
        let trailing = self.state.camera_x - self.config.retire_behind;
        self.state
            .course
            .tick(trailing, self.state.camera_x, &self.config, level);

        // 2. Motion: drive, jump edge, gravity, integrate.
        let prev_bottom = self.state.player.bottom(self.config.player_height);
        self.state.player.step(&input, &self.config, level);

        // 3. Resolve against the platform set.
        let res = collision::resolve(
            &self.state.player,
            prev_bottom,
            &self.state.course.platforms,
            &self.config,
            Some(trailing),
        );

        let mut reached_goal = false;
        if let Some(id) = res.landed {
            if let Some(platform) = self.state.course.platform(id).copied() {
                self.state
                    .player
                    .land_on(platform.y, self.config.player_height);
                reached_goal = platform.kind == PlatformKind::Goal;
            }
        } else if res.fell {
            self.lose_life(&mut events);
            return events;
        }

        // 4. Collection and scoring.
        self.collect_pickups(&mut events);
        let travelled =
            scoring::distance_score(self.state.player.x, self.config.distance_per_point);
        if travelled > self.state.run.distance_points {
            self.state.run.score += travelled - self.state.run.distance_points;
            self.state.run.distance_points = travelled;
        }

        self.state.camera_x = self.state.camera_x.max(self.state.player.x);

        if reached_goal {
            self.complete_level(&mut events);
        }

        events
    }

    terrarun_game_boilerplate!(state_type: DashState);

    fn results(&self) -> RunResults {
        RunResults {
            score: self.state.run.score,
            level_reached: self.state.run.level,
            earned: self.earned,
        }
    }
}
