pub mod error;
pub mod game_trait;
pub mod input;
pub mod progress;
pub mod resources;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{GameEvent, MiniGame};
    use crate::input::TickInput;
    use crate::progress::PlayerProgress;
    use crate::resources::ResourceKind;

    /// Progress with a few banked resources, for tests that care about
    /// accumulation on top of a non-zero base.
    pub fn make_progress() -> PlayerProgress {
        let mut progress = PlayerProgress::new();
        progress.add_resource(ResourceKind::Stone, 100);
        progress.add_resource(ResourceKind::Ice, 100);
        progress.add_resource(ResourceKind::Energy, 100);
        progress
    }

    /// Run N game ticks with idle input, returning all accumulated events.
    pub fn run_ticks(game: &mut dyn MiniGame, n: usize, dt: f32) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.tick(&TickInput::idle(dt)));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn MiniGame, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // A generic suite every MiniGame implementation must pass. Game
    // crates call these from their own #[cfg(test)] modules with a
    // concrete instance.

    /// After start(), serialize_state() must return non-empty bytes.
    pub fn contract_start_creates_state(game: &mut dyn MiniGame) {
        game.start(&make_progress(), 42);
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after start"
        );
    }

    /// tick() with dt > 0 must advance the simulation state.
    pub fn contract_tick_advances_state(game: &mut dyn MiniGame) {
        game.start(&make_progress(), 42);
        let before = game.serialize_state();
        game.tick(&TickInput::idle(0.1));
        assert_game_state_changed(game, &before);
    }

    /// serialize_state → apply_state roundtrip must be stable: applying
    /// the game's own output and re-serializing yields identical bytes.
    pub fn contract_state_roundtrip_stable(game: &mut dyn MiniGame) {
        game.start(&make_progress(), 42);
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "State must be stable across serialize → apply roundtrips"
        );
    }

    /// start() is the reset operation: invoking it twice with identical
    /// arguments must leave the exact state a single invocation leaves.
    pub fn contract_restart_is_idempotent(game: &mut dyn MiniGame, seed: u64) {
        let progress = make_progress();
        game.start(&progress, seed);
        let once = game.serialize_state();
        game.start(&progress, seed);
        let twice = game.serialize_state();
        assert_eq!(once, twice, "start() must be idempotent");
    }

    /// Garbage bytes fed to apply_state must be ignored, not applied and
    /// not panicked on.
    pub fn contract_apply_state_rejects_garbage(game: &mut dyn MiniGame) {
        game.start(&make_progress(), 42);
        let before = game.serialize_state();
        game.apply_state(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        let after = game.serialize_state();
        assert_eq!(before, after, "garbage state must leave the game unchanged");
    }
}
