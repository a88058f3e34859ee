use serde::{Deserialize, Serialize};

use crate::input::TickInput;
use crate::progress::PlayerProgress;
use crate::resources::{ResourceKind, ResourceTotals};

/// Core trait that all terrarun mini-games implement.
///
/// The host owns the frame loop, input sampling, and rendering; the game
/// only advances its own simulation and reports what happened.
pub trait MiniGame: Send + Sync {
    /// Game metadata for the mission-select screen.
    fn metadata(&self) -> GameMetadata;

    /// (Re)initialize the run from cross-run progress and a world seed.
    /// Calling this again with the same arguments restores the exact
    /// initial state, so it doubles as the reset operation.
    fn start(&mut self, progress: &PlayerProgress, seed: u64);

    /// Advance the simulation by one tick. Returns the events produced
    /// during that tick, in order.
    fn tick(&mut self, input: &TickInput) -> Vec<GameEvent>;

    /// Serialize the full simulation state for suspend or replay.
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore state previously produced by `serialize_state`. Invalid
    /// bytes are ignored and the current state is kept.
    fn apply_state(&mut self, state: &[u8]);

    /// Whether the run has ended and no further ticks will change state.
    fn is_over(&self) -> bool;

    /// Final outcome of the run: score and everything banked toward the
    /// player's persistent progress.
    fn results(&self) -> RunResults;
}

/// Game metadata for the mission-select screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// Events emitted by a game during a tick (scoring, pickups, run phase
/// changes). Hosts use these for HUD updates and scene transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreUpdate { score: u32 },
    PickupCollected { kind: ResourceKind },
    LifeLost { remaining: u32 },
    LevelComplete { level: u32 },
    GameOver { score: u32 },
}

/// Outcome of a finished (or in-progress) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResults {
    pub score: u32,
    pub level_reached: u32,
    pub earned: ResourceTotals,
}

/// Generates the `MiniGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `is_over`.
///
/// Requires the implementing struct to have a `state: $StateType` field,
/// and `$StateType` to provide `fn is_over(&self) -> bool`.
#[macro_export]
macro_rules! terrarun_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn is_over(&self) -> bool {
            self.state.is_over()
        }
    };
}
