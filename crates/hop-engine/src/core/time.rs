/// Most fixed steps a single frame may run before time is dropped.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Turns variable host frame times into a whole number of fixed steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Add frame time and return how many fixed steps to run now.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        // Tolerate float drift so 1/60 frames at 1/60 dt always yield a step.
        let steps = ((self.accumulator + self.dt * 1e-4) / self.dt) as u32;
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_per_matching_frame() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        for _ in 0..120 {
            assert_eq!(ts.accumulate(1.0 / 60.0), 1);
        }
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_long_frames() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn ignores_bad_frame_times() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.accumulate(0.01), 0);
    }
}
