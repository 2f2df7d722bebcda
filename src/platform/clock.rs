//! Fixed timestep accumulator

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Converts variable frame deltas into whole fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
    step: f32,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            step,
            max_substeps,
        }
    }

    /// Feed a timestamp in milliseconds; returns ticks to run this frame
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => self.step,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }

    /// Feed a delta in seconds; returns ticks to run this frame
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Drop the backlog rather than carry it into the next frame
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Forget timing history (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Power-of-two step keeps the accumulator arithmetic exact
    const STEP: f32 = 1.0 / 64.0;

    #[test]
    fn test_one_tick_per_frame() {
        let mut clock = FrameClock::new(STEP, 8);
        assert_eq!(clock.advance(0.02), 1);
        assert_eq!(clock.advance(0.012), 1);
        assert_eq!(clock.advance(0.001), 0);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut clock = FrameClock::new(STEP, 8);
        assert_eq!(clock.advance(0.01), 0);
        assert_eq!(clock.advance(0.01), 1);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FrameClock::new(STEP, 4);
        assert_eq!(clock.advance(0.09), 4);
        // Backlog trimmed to a single step
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_huge_delta_clamped() {
        let mut clock = FrameClock::new(STEP, 100);
        assert_eq!(clock.advance(5.0), 6);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FrameClock::new(STEP, 8);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn test_timestamps() {
        let mut clock = FrameClock::new(STEP, 8);
        // First frame runs one tick
        assert_eq!(clock.advance_to(1000.0), 1);
        assert_eq!(clock.advance_to(1035.0), 2);
        clock.reset();
        assert_eq!(clock.advance_to(50_000.0), 1);
    }
}
