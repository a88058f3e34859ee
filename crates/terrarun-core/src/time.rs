/// Fixed timestep accumulator.
///
/// Hosts drive the simulation from a variable frame callback; this
/// converts frame deltas into a whole number of fixed ticks so game
/// logic advances at a consistent rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

/// Cap on queued steps per frame, against the spiral of death.
const MAX_STEPS_PER_FRAME: f32 = 10.0;

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed
    /// steps to run. Negative or non-finite deltas add nothing.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() {
            self.accumulator += frame_dt.max(0.0);
        }
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
