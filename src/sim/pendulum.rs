//! Damped, self-driven pendulum and the gentler sway model used by resting foliage.
//!
//! The model is a visually tuned approximation, not a rigid-body simulation:
//!
//! ```text
//! accel = -(g / L) * sin(angle) + drive(t) + micro + (-k * angle)
//! vel   = (vel + accel * dt) * damping
//! angle = clamp(angle + vel * dt, -cap, cap)
//! ```
//!
//! Damping is applied once per step, so it is coupled to the (capped) frame interval.

use std::f64::consts::TAU;

use crate::foundation::{
    core::{Point, Vec2},
    math::clamp_abs,
    rng::RandomSource,
};

/// Self-forcing sinusoid standing in for ambient air currents.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriveParams {
    /// Angular rate in radians per millisecond of clock time.
    pub rate: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Amplitude (rad/s² for pendulums, rad for sway targets).
    pub amp: f64,
}

impl DriveParams {
    /// Drive value at clock time `now_ms`.
    pub fn sample(&self, now_ms: f64) -> f64 {
        (now_ms * self.rate + self.phase).sin() * self.amp
    }
}

/// Constants shared by one pendulum's integration step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PendulumTuning {
    /// Stylized gravity (px/s²).
    pub gravity: f64,
    /// Multiplicative velocity damping per step (< 1).
    pub damping: f64,
    /// Linear spring constant pulling the angle back to rest.
    pub center_pull: f64,
    /// Hard bound on `|angle|`.
    pub angle_cap: f64,
    /// Width of the always-on jitter range.
    pub micro_span: f64,
    /// Width of the extra jitter range applied when stalled or near the cap.
    pub micro_boost_span: f64,
    /// Below this `|angular_velocity|` the pendulum counts as stalled.
    pub stall_velocity: f64,
    /// Above this `|angle|` the pendulum counts as near its cap.
    pub edge_angle: f64,
}

/// Per-class randomization ranges and spring constants for hanging ornaments.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PendulumClassConfig {
    /// Spring constant `k` of the center pull.
    pub center_pull: f64,
    /// Angle cap in radians.
    pub angle_cap: f64,
    /// Initial angle drawn from `[-span/2, span/2)`.
    pub init_angle_span: f64,
    /// Initial angular velocity drawn from `[-span/2, span/2)`.
    pub init_velocity_span: f64,
    /// Minimum drive rate (rad/ms).
    pub drive_rate_base: f64,
    /// Extra drive rate drawn from `[0, span)`.
    pub drive_rate_span: f64,
    /// Minimum drive amplitude.
    pub drive_amp_base: f64,
    /// Extra drive amplitude drawn from `[0, span)`.
    pub drive_amp_span: f64,
    /// Arm length per rendered chain link.
    pub link_spacing: f64,
    /// Lower bound on rendered chain links.
    pub min_segments: u32,
}

impl Default for PendulumClassConfig {
    fn default() -> Self {
        Self::snowflake()
    }
}

impl PendulumClassConfig {
    /// Snowflakes: long chains, stronger spring, tighter cap.
    pub fn snowflake() -> Self {
        Self {
            center_pull: 0.25,
            angle_cap: 0.30,
            init_angle_span: 0.8,
            init_velocity_span: 0.6,
            drive_rate_base: 0.0007,
            drive_rate_span: 0.0006,
            drive_amp_base: 0.18,
            drive_amp_span: 0.08,
            link_spacing: 16.0,
            min_segments: 8,
        }
    }

    /// Socks: short ropes, weak spring, wider drift.
    pub fn sock() -> Self {
        Self {
            center_pull: 0.15,
            angle_cap: 0.32,
            init_angle_span: 0.4,
            init_velocity_span: 0.0,
            drive_rate_base: 0.0009,
            drive_rate_span: 0.0007,
            drive_amp_base: 0.22,
            drive_amp_span: 0.12,
            link_spacing: 10.0,
            min_segments: 2,
        }
    }

    /// Candy figures: like socks, slightly livelier start.
    pub fn candy() -> Self {
        Self {
            center_pull: 0.15,
            angle_cap: 0.32,
            init_angle_span: 0.6,
            init_velocity_span: 0.5,
            drive_rate_base: 0.001,
            drive_rate_span: 0.0007,
            drive_amp_base: 0.2,
            drive_amp_span: 0.1,
            link_spacing: 9.0,
            min_segments: 2,
        }
    }

    /// Chain link count for an arm of `length` pixels.
    pub fn segments_for(&self, length: f64) -> u32 {
        let spacing = if self.link_spacing > 0.0 {
            self.link_spacing
        } else {
            1.0
        };
        let links = (length.max(0.0) / spacing).round();
        (links.min(f64::from(u32::MAX)) as u32).max(self.min_segments)
    }
}

/// Shortest usable arm; shorter requests are floored to this.
pub const MIN_PENDULUM_LENGTH: f64 = 1.0;

/// One hanging ornament's oscillator.
#[derive(Clone, Debug, PartialEq)]
pub struct Pendulum {
    /// Arm length in pixels.
    pub length: f64,
    /// Rendered chain link count; fixed at creation.
    pub segments: u32,
    /// Deflection from vertical in radians, `|angle| <= tuning.angle_cap`.
    pub angle: f64,
    /// Radians per second.
    pub angular_velocity: f64,
    /// Self-forcing parameters.
    pub drive: DriveParams,
    /// Integration constants.
    pub tuning: PendulumTuning,
}

impl Pendulum {
    /// Build a pendulum from explicit state. Length is floored and the angle clamped.
    pub fn new(
        length: f64,
        segments: u32,
        angle: f64,
        angular_velocity: f64,
        drive: DriveParams,
        tuning: PendulumTuning,
    ) -> Self {
        let length = if length.is_finite() {
            length.max(MIN_PENDULUM_LENGTH)
        } else {
            MIN_PENDULUM_LENGTH
        };
        Self {
            length,
            segments,
            angle: clamp_abs(angle, tuning.angle_cap),
            angular_velocity: if angular_velocity.is_finite() {
                angular_velocity
            } else {
                0.0
            },
            drive,
            tuning,
        }
    }

    /// Build a pendulum with start state and drive drawn from `rng`.
    pub fn randomized(
        class: &PendulumClassConfig,
        length: f64,
        tuning: PendulumTuning,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let angle = rng.centered(class.init_angle_span);
        let angular_velocity = rng.centered(class.init_velocity_span);
        let drive = DriveParams {
            rate: class.drive_rate_base + rng.uniform(0.0, class.drive_rate_span),
            phase: rng.uniform(0.0, TAU),
            amp: class.drive_amp_base + rng.uniform(0.0, class.drive_amp_span),
        };
        Self::new(
            length,
            class.segments_for(length),
            angle,
            angular_velocity,
            drive,
            tuning,
        )
    }

    /// Random jitter for this step; boosted when stalled or near the cap so the ornament never
    /// settles at an extreme.
    pub fn micro(&self, rng: &mut dyn RandomSource) -> f64 {
        let t = &self.tuning;
        let mut micro = rng.centered(t.micro_span);
        if self.angular_velocity.abs() < t.stall_velocity || self.angle.abs() > t.edge_angle {
            micro += rng.centered(t.micro_boost_span);
        }
        micro
    }

    /// Advance by `dt_s` seconds at clock time `now_ms`.
    pub fn step(&mut self, dt_s: f64, now_ms: f64, rng: &mut dyn RandomSource) {
        let drive = self.drive.sample(now_ms);
        let micro = self.micro(rng);
        self.integrate(dt_s, drive, micro);
    }

    /// Deterministic integration step with explicit forcing terms.
    pub fn integrate(&mut self, dt_s: f64, drive: f64, micro: f64) {
        let t = self.tuning;
        let center_pull = -t.center_pull * self.angle;
        let accel =
            -(t.gravity / self.length) * self.angle.sin() + drive + micro + center_pull;
        self.angular_velocity += accel * dt_s;
        self.angular_velocity *= t.damping;
        if !self.angular_velocity.is_finite() {
            self.angular_velocity = 0.0;
        }
        self.angle = clamp_abs(self.angle + self.angular_velocity * dt_s, t.angle_cap);
    }

    /// Position of the moving end for a pivot at `anchor`.
    pub fn bob(&self, anchor: Point) -> Point {
        anchor + Vec2::new(self.angle.sin(), self.angle.cos()) * self.length
    }
}

/// Constants of the foliage sway model.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    /// Amplitude of the slow target sinusoid (rad).
    pub amplitude: f64,
    /// Gain pulling the angle toward the target.
    pub stiffness: f64,
    /// Multiplicative velocity damping per step.
    pub damping: f64,
    /// Angle cap in radians.
    pub angle_cap: f64,
    /// Minimum target rate (rad/ms).
    pub drive_rate_base: f64,
    /// Extra target rate drawn from `[0, span)`.
    pub drive_rate_span: f64,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            stiffness: 0.55,
            damping: 0.997,
            angle_cap: 0.06,
            drive_rate_base: 0.0007,
            drive_rate_span: 0.0005,
        }
    }
}

/// Resting foliage: eases toward a slow sinusoidal target instead of swinging.
#[derive(Clone, Debug, PartialEq)]
pub struct Sway {
    /// Rotation about the anchor in radians, `|angle| <= tuning.angle_cap`.
    pub angle: f64,
    /// Radians per second.
    pub angular_velocity: f64,
    /// Target sinusoid; `amp` is the target amplitude.
    pub drive: DriveParams,
    /// Integration constants.
    pub tuning: SwayConfig,
}

impl Sway {
    /// Sway at rest with a randomized target rate and phase.
    pub fn randomized(tuning: SwayConfig, rng: &mut dyn RandomSource) -> Self {
        let drive = DriveParams {
            rate: tuning.drive_rate_base + rng.uniform(0.0, tuning.drive_rate_span),
            phase: rng.uniform(0.0, TAU),
            amp: tuning.amplitude,
        };
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            drive,
            tuning,
        }
    }

    /// Advance by `dt_s` seconds at clock time `now_ms`.
    pub fn step(&mut self, dt_s: f64, now_ms: f64) {
        let target = self.drive.sample(now_ms);
        self.integrate(dt_s, target);
    }

    /// Deterministic step toward an explicit target angle.
    pub fn integrate(&mut self, dt_s: f64, target: f64) {
        let t = self.tuning;
        let accel = (target - self.angle) * t.stiffness;
        self.angular_velocity += accel * dt_s;
        self.angular_velocity *= t.damping;
        if !self.angular_velocity.is_finite() {
            self.angular_velocity = 0.0;
        }
        self.angle = clamp_abs(self.angle + self.angular_velocity * dt_s, t.angle_cap);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/pendulum.rs"]
mod tests;
