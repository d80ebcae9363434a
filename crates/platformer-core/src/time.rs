//! Time system for the platformer simulation
//!
//! Handles variable frame time, the fixed-step accumulator, and the simulated
//! clock that deferred actions are scheduled against.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 50.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.min(self.config.max_delta_time);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }
}

/// Accumulated simulated time, advanced once per fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    elapsed: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one step of `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt as f64;
    }

    /// Seconds elapsed since the clock was created
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

/// A cancellable one-shot deadline on a [`SimClock`].
///
/// Polled every step instead of sleeping. Once it fires or is cancelled it is
/// disarmed until scheduled again.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deadline {
    at: Option<f64>,
}

impl Deadline {
    /// Arm the deadline `delay` seconds after `now`, replacing any pending one
    pub fn schedule(&mut self, now: f64, delay: f32) {
        self.at = Some(now + delay as f64);
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.at.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
