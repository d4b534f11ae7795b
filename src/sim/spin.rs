//! Spinning carried ornament: speed chases a randomly retargeted direction and magnitude.

use crate::foundation::rng::RandomSource;

/// Tunables for the spinning ornament.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Minimum target speed (rad/s).
    pub min_speed: f64,
    /// Extra target speed drawn from `[0, span)`.
    pub speed_span: f64,
    /// Minimum phase length (ms).
    pub switch_base_ms: f64,
    /// Extra phase length drawn from `[0, span)`.
    pub switch_span_ms: f64,
    /// Gain of the speed easing (per second).
    pub gain: f64,
    /// Multiplicative drag per step.
    pub drag: f64,
    /// Target speed before the first phase switch.
    pub initial_target_speed: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_speed: 1.6,
            speed_span: 1.8,
            switch_base_ms: 1200.0,
            switch_span_ms: 1400.0,
            gain: 2.2,
            drag: 0.995,
            initial_target_speed: 0.8,
        }
    }
}

/// Rotation of the single spinning ornament: slow-fast-slow with random direction flips.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinState {
    /// Accumulated rotation in radians.
    pub angle: f64,
    /// Signed angular speed (rad/s).
    pub speed: f64,
    /// Magnitude the speed eases toward.
    pub target_speed: f64,
    /// Direction, `-1.0` or `1.0`.
    pub dir: f64,
    /// Clock time of the next phase switch.
    pub next_switch_ms: f64,
    /// Tunables.
    pub cfg: SpinConfig,
}

impl SpinState {
    /// At rest, clockwise, with a switch due immediately.
    pub fn new(cfg: SpinConfig) -> Self {
        Self {
            angle: 0.0,
            speed: 0.0,
            target_speed: cfg.initial_target_speed,
            dir: 1.0,
            next_switch_ms: 0.0,
            cfg,
        }
    }

    /// Advance by `dt_s` seconds at clock time `now_ms`.
    pub fn step(&mut self, dt_s: f64, now_ms: f64, rng: &mut dyn RandomSource) {
        let c = self.cfg;
        if now_ms > self.next_switch_ms {
            self.dir = if rng.coin() { 1.0 } else { -1.0 };
            self.target_speed = c.min_speed + rng.uniform(0.0, c.speed_span);
            self.next_switch_ms = now_ms + c.switch_base_ms + rng.uniform(0.0, c.switch_span_ms);
        }
        let desired = self.target_speed * self.dir;
        self.speed += (desired - self.speed) * c.gain * dt_s;
        self.speed *= c.drag;
        self.angle += self.speed * dt_s;
        if !self.angle.is_finite() {
            self.angle = 0.0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/spin.rs"]
mod tests;
