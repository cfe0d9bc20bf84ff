//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Frame times are supplied by the caller, so the same loop serves a
//! wall-clock driver and a scripted headless run. The accumulator decides how
//! many fixed physics ticks each frame owes.

use tracing::warn;

/// Maximum frame time clamp to prevent spiral of death.
/// If a frame takes longer than this, we clamp and accept slowdown
/// rather than trying to catch up with dozens of simulation steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep accumulator state.
pub struct GameLoop {
    fixed_dt: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a loop that steps the simulation every `fixed_dt` seconds.
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(fixed_dt, total_sim_time)` is called zero or more times at
    /// the fixed rate. Returns how many times it ran.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }

        self.frame_count += 1;
        steps
    }

    /// Interpolation alpha between the last two simulation states, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    /// Length of one fixed step in seconds.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Changes the step length. Time already accumulated carries over.
    pub fn set_fixed_dt(&mut self, fixed_dt: f64) {
        self.fixed_dt = fixed_dt;
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation update steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
