//! Pointer velocity estimation.
//!
//! Impulse-strategy 1-D tracker: velocity is derived from the kinetic
//! energy the recent samples impart, which is robust against the jitter a
//! straight two-point difference amplifies.

/// Ring buffer capacity for recent samples.
const HISTORY_SIZE: usize = 20;

/// Samples older than this are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1-D velocity tracker over absolute positions.
///
/// Velocity is reported in logical pixels per millisecond, the unit the
/// swipe-dismiss projection horizon is expressed in.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a position at the given timestamp (milliseconds).
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Estimate velocity in px/ms from the samples inside the horizon.
    ///
    /// Returns 0.0 with fewer than two usable samples or after a
    /// stopped-pointer gap.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut cursor = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[cursor] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous.time_ms - sample.time_ms).abs() as f32;
            previous = sample;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            positions[count] = sample.position;
            times[count] = -age;

            cursor = if cursor == 0 {
                HISTORY_SIZE - 1
            } else {
                cursor - 1
            };

            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, count)
    }

    /// Drop all recorded samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse-based velocity over (position, time-in-ms) samples, oldest last.
fn impulse_velocity(positions: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let oldest = count - 1;
    let mut next_time = times[oldest];

    for i in (1..=oldest).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with unit mass, preserving sign.
#[inline]
fn energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
