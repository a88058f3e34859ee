use serde::{Deserialize, Serialize};

use terrarun_core::input::TickInput;

use crate::config::{ControlMode, DashConfig};

/// Player motion states. The single- vs double-jump phase of a jump is
/// carried by `double_jump_available`, not a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Grounded,
    Airborne,
}

/// Which jump a press produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Primary,
    Double,
}

/// The player's kinematic state. Position is the top-left corner of the
/// bounding box; the box size lives in [`DashConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub state: PlayerState,
    pub double_jump_available: bool,
}

impl PlayerBody {
    /// Player resting on a surface, ready to run.
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            state: PlayerState::Grounded,
            double_jump_available: true,
        }
    }

    /// Advance one tick: horizontal drive, the jump edge if pressed,
    /// gravity, then position integration. Gravity applies every tick
    /// regardless of state, always before collision resolution.
    ///
    /// At most one input-attributable state transition happens per tick:
    /// `jump_pressed` is an edge and is consumed by a single
    /// `try_jump`.
    pub fn step(&mut self, input: &TickInput, cfg: &DashConfig, level: u32) -> Option<JumpKind> {
        let dt = input.dt;

        self.vx = match cfg.control {
            ControlMode::AutoRun => cfg.horizontal_speed(level),
            ControlMode::Directional => cfg.move_speed * input.move_dir(),
        };

        self.vy += cfg.gravity * dt;

        // The impulse replaces accumulated vertical velocity outright,
        // so a jump tick ends with vy exactly at the impulse.
        let jumped = if input.jump_pressed {
            self.try_jump(cfg)
        } else {
            None
        };

        self.x += self.vx * dt;
        self.y += self.vy * dt;

        jumped
    }

    /// The jump transition table. Grounded: primary jump, arming the
    /// double jump. Airborne with the double jump armed: the weaker
    /// second impulse, disarming it. Anything else is a no-op.
    pub fn try_jump(&mut self, cfg: &DashConfig) -> Option<JumpKind> {
        match self.state {
            PlayerState::Grounded => {
                self.vy = -cfg.jump_impulse;
                self.state = PlayerState::Airborne;
                self.double_jump_available = true;
                Some(JumpKind::Primary)
            },
            PlayerState::Airborne if self.double_jump_available => {
                self.vy = -cfg.double_jump_impulse;
                self.double_jump_available = false;
                Some(JumpKind::Double)
            },
            PlayerState::Airborne => None,
        }
    }

    /// Settle on a platform surface: feet flush with the top, vertical
    /// velocity cleared, double jump re-armed for the next excursion.
    pub fn land_on(&mut self, platform_top: f32, player_height: f32) {
        self.y = platform_top - player_height;
        self.vy = 0.0;
        self.state = PlayerState::Grounded;
        self.double_jump_available = true;
    }

    pub fn bottom(&self, player_height: f32) -> f32 {
        self.y + player_height
    }

    pub fn right(&self, player_width: f32) -> f32 {
        self.x + player_width
    }
}
