/*
 * Fixed Timestep Module
 *
 * Turns variable frame times into a whole number of fixed simulation ticks.
 * Leftover time is carried into the next frame, and the fraction of a tick
 * still pending is exposed as an interpolation alpha for rendering.
 */

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    /// `tick_rate` is in ticks per second and must be positive.
    pub fn new(tick_rate: f32) -> Self {
        Self {
            step: step_for(tick_rate),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn set_tick_rate(&mut self, tick_rate: f32) {
        self.step = step_for(tick_rate);
    }

    /// Adds `frame_time` and returns how many ticks are now due.
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f32() / self.step.as_secs_f32()).clamp(0.0, 1.0)
    }

    // Drop pending time, e.g. while paused
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

fn step_for(tick_rate: f32) -> Duration {
    let nanos = (1.0e9 / f64::from(tick_rate.max(f32::EPSILON))).round();
    Duration::from_nanos(nanos.max(1.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_matches_tick_rate() {
        assert_eq!(FixedTimestep::new(50.0).step(), Duration::from_millis(20));
        assert_eq!(FixedTimestep::new(60.0).step(), Duration::from_nanos(16_666_667));
    }

    #[test]
    fn advance_carries_remainder() {
        let mut timestep = FixedTimestep::new(50.0);

        assert_eq!(timestep.advance(Duration::from_millis(45)), 2);
        assert!((timestep.alpha() - 0.25).abs() < 1.0e-4);

        assert_eq!(timestep.advance(Duration::from_millis(15)), 1);
        assert!(timestep.alpha().abs() < 1.0e-4);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut timestep = FixedTimestep::new(50.0);
        for _ in 0..3 {
            assert_eq!(timestep.advance(Duration::from_millis(6)), 0);
        }
        assert_eq!(timestep.advance(Duration::from_millis(6)), 1);
    }

    #[test]
    fn reset_drops_pending_time() {
        let mut timestep = FixedTimestep::new(50.0);
        timestep.advance(Duration::from_millis(19));
        timestep.reset();
        assert_eq!(timestep.advance(Duration::from_millis(19)), 0);
    }
}
