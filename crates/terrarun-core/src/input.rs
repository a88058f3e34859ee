use serde::{Deserialize, Serialize};

/// Input sample for a single simulation tick.
///
/// `jump_pressed` must be edge-triggered: true only on the tick the jump
/// key went down, never while it is held. Hosts sampling raw key state
/// can use [`EdgeTrigger`] to produce it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub jump_pressed: bool,
    pub left: bool,
    pub right: bool,
    /// Frame delta in seconds. Negative or non-finite values are clamped
    /// to zero by `sanitized`.
    pub dt: f32,
}

impl TickInput {
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn jump(dt: f32) -> Self {
        Self {
            jump_pressed: true,
            dt,
            ..Self::default()
        }
    }

    /// Clamp malformed timing to zero. The simulation never rejects
    /// input; a bad dt simply advances nothing.
    pub fn sanitized(self) -> Self {
        let dt = if self.dt.is_finite() {
            self.dt.max(0.0)
        } else {
            0.0
        };
        Self { dt, ..self }
    }

    /// Directional axis: -1 (left), 0, +1 (right).
    pub fn move_dir(&self) -> f32 {
        f32::from(i8::from(self.right) - i8::from(self.left))
    }
}

/// Converts an is-down key level into a once-per-press edge.
///
/// `sample` returns true only on the call where the key transitions from
/// released to pressed, so a held key cannot retrigger a jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, is_down: bool) -> bool {
        let fired = is_down && !self.was_down;
        self.was_down = is_down;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_dt_clamped_to_zero() {
        let input = TickInput::idle(-0.5).sanitized();
        assert_eq!(input.dt, 0.0);
    }

    #[test]
    fn nan_dt_clamped_to_zero() {
        let input = TickInput::idle(f32::NAN).sanitized();
        assert_eq!(input.dt, 0.0);
    }

    #[test]
    fn inf_dt_clamped_to_zero() {
        let input = TickInput::idle(f32::INFINITY).sanitized();
        assert_eq!(input.dt, 0.0);
    }

    #[test]
    fn valid_dt_passes_through() {
        let input = TickInput::jump(0.016).sanitized();
        assert_eq!(input.dt, 0.016);
        assert!(input.jump_pressed);
    }

    #[test]
    fn move_dir_axis() {
        let mut input = TickInput::idle(0.016);
        assert_eq!(input.move_dir(), 0.0);
        input.left = true;
        assert_eq!(input.move_dir(), -1.0);
        input.right = true;
        assert_eq!(input.move_dir(), 0.0);
        input.left = false;
        assert_eq!(input.move_dir(), 1.0);
    }

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut edge = EdgeTrigger::new();
        assert!(edge.sample(true), "first down is an edge");
        assert!(!edge.sample(true), "held key is not an edge");
        assert!(!edge.sample(false));
        assert!(edge.sample(true), "re-press is a new edge");
    }
}
