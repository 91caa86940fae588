//! Triangular jump/duck interpolation.
//!
//! A run moves the ball linearly from its rest row to `base_y + offset` over
//! the first half of the run, then linearly back over the second half. All
//! interpolation is truncating integer arithmetic with no sub-pixel
//! accumulation; the final sample forces `base_y` exactly so truncation drift
//! can never leave the ball off its rest row.
//!
//! Sampling is a pure function of elapsed time, so the profile properties are
//! testable without sleeping; the run itself is stamped with a tokio instant
//! and advances on the runtime clock (virtual under a paused test runtime).

use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock length of one jump or duck.
pub const JUMP_DURATION: Duration = Duration::from_millis(1000);
/// Cadence between position samples, roughly 60 updates per run.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(16);

/// The there-and-back position profile of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpProfile {
    pub base_y: i32,
    pub offset: i32,
    pub duration: Duration,
}

impl JumpProfile {
    pub fn new(base_y: i32, offset: i32) -> Self {
        Self {
            base_y,
            offset,
            duration: JUMP_DURATION,
        }
    }

    /// Map elapsed time to a y coordinate on the triangular profile.
    pub fn sample(&self, elapsed: Duration) -> i32 {
        if self.is_complete(elapsed) {
            return self.base_y;
        }

        let half_ms = (self.duration.as_millis() / 2) as i64;
        let t_ms = elapsed.as_millis() as i64;

        if t_ms < half_ms {
            self.base_y + ((self.offset as i64 * t_ms) / half_ms) as i32
        } else {
            let returned = t_ms - half_ms;
            (self.base_y + self.offset) - ((self.offset as i64 * returned) / half_ms) as i32
        }
    }

    /// True once elapsed time has reached the full duration.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// A profile bound to its start instant.
#[derive(Debug, Clone, Copy)]
pub struct JumpRun {
    profile: JumpProfile,
    started: Instant,
}

impl JumpRun {
    /// Start a run now on the runtime clock.
    pub fn start(profile: JumpProfile) -> Self {
        Self {
            profile,
            started: Instant::now(),
        }
    }

    pub fn profile(&self) -> &JumpProfile {
        &self.profile
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Sample a full run on the 16 ms grid, including the forced final value.
    fn sampled_run(profile: &JumpProfile) -> Vec<i32> {
        let mut samples = Vec::new();
        let mut t = Duration::ZERO;
        while !profile.is_complete(t) {
            samples.push(profile.sample(t));
            t += SAMPLE_PERIOD;
        }
        samples.push(profile.sample(profile.duration));
        samples
    }

    #[test]
    fn run_starts_and_ends_at_base() {
        let profile = JumpProfile::new(336, -32);
        assert_eq!(profile.sample(Duration::ZERO), 336);
        assert_eq!(profile.sample(JUMP_DURATION), 336);
        assert_eq!(profile.sample(JUMP_DURATION + Duration::from_millis(500)), 336);
    }

    #[test]
    fn peak_is_reached_at_half_duration() {
        let profile = JumpProfile::new(336, -32);
        assert_eq!(profile.sample(JUMP_DURATION / 2), 304);

        let duck = JumpProfile::new(304, 32);
        assert_eq!(duck.sample(JUMP_DURATION / 2), 336);
    }

    #[test]
    fn jump_decreases_then_increases() {
        let profile = JumpProfile::new(336, -32);
        let samples = sampled_run(&profile);
        let peak = samples.iter().position(|&y| y == 304).expect("peak sampled");

        assert!(samples[..peak].windows(2).all(|w| w[1] <= w[0]));
        assert!(samples[peak..].windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn profile_is_symmetric_within_truncation() {
        let profile = JumpProfile::new(304, 32);
        let mut t = SAMPLE_PERIOD;
        while t < profile.duration / 2 {
            let rising = profile.sample(t);
            let falling = profile.sample(profile.duration - t);
            assert!(
                (rising - falling).abs() <= 1,
                "asymmetry at {:?}: {} vs {}",
                t,
                rising,
                falling
            );
            t += SAMPLE_PERIOD;
        }
    }

    proptest! {
        #[test]
        fn endpoints_equal_base_for_all_rest_rows(
            base_y in 32..=447i32,
            jump in proptest::bool::ANY,
        ) {
            let offset = if jump { -32 } else { 32 };
            let profile = JumpProfile::new(base_y, offset);
            let samples = sampled_run(&profile);

            prop_assert_eq!(*samples.first().unwrap(), base_y);
            prop_assert_eq!(*samples.last().unwrap(), base_y);
            // The excursion never overshoots the target offset.
            for y in &samples {
                prop_assert!((y - base_y).abs() <= 32);
            }
        }
    }
}
