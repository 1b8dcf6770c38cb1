/// Fixed timestep accumulator.
/// Keeps counter ticks at a consistent cadence regardless of frame rate.
pub struct FixedStepper {
    /// The fixed step length in ms.
    step_ms: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedStepper {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_ms: f64) -> u32 {
        self.accumulator += frame_ms;
        // Cap catch-up after a backgrounded tab (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.step_ms * 10.0);
        let steps = (self.accumulator / self.step_ms) as u32;
        self.accumulator -= steps as f64 * self.step_ms;
        steps
    }

    /// The fixed step length in ms.
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}
