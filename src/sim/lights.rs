//! Twinkling light string: per-light on/off flicker, glow easing and hidden drift.

use crate::foundation::{
    core::{Point, Rgba8, Vec2},
    error::{GarlandError, GarlandResult},
    math::ease_toward,
    rng::RandomSource,
};

/// Upper bound on `lanes`.
pub const MAX_LIGHT_LANES: u32 = 64;

/// Upper bound on lights per lane, however wide the viewport.
pub const MAX_LIGHTS_PER_LANE: u32 = 512;

/// Tunables for light layout and flicker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Horizontal margin on each side of the viewport.
    pub margin: f64,
    /// Lower bound on the usable string width.
    pub min_usable_width: f64,
    /// Gap below the reference line's opaque bottom edge.
    pub line_gap: f64,
    /// Fraction of the viewport height covered by lanes.
    pub scene_height_ratio: f64,
    /// Lower bound on the covered height.
    pub min_scene_height: f64,
    /// Upper bound on the covered height.
    pub max_scene_height: f64,
    /// Number of horizontal lanes.
    pub lanes: u32,
    /// Horizontal spacing that determines lights per lane.
    pub lane_spacing: f64,
    /// Lower bound on lights per lane.
    pub min_per_lane: u32,
    /// Glow low-pass factor per tick.
    pub glow_smoothing: f64,
    /// Below this glow a light is imperceptible and may reposition.
    pub visibility_threshold: f64,
    /// Below this glow a light is not drawn at all.
    pub draw_cutoff: f64,
    /// Drift target range used while hidden.
    pub drift_span: f64,
    /// Drift target range assigned at layout time.
    pub initial_drift_span: f64,
    /// Offset low-pass factor per tick while hidden.
    pub drift_smoothing: f64,
    /// Chance of picking a new color when a light switches off.
    pub color_reroll_chance: f64,
    /// Minimum toggle interval (ms).
    pub interval_base_ms: f64,
    /// Extra toggle interval drawn from `[0, span)`.
    pub interval_span_ms: f64,
    /// Minimum delay between drift retargets (ms).
    pub move_base_ms: f64,
    /// Extra retarget delay drawn from `[0, span)`.
    pub move_span_ms: f64,
    /// Color palette.
    pub palette: Vec<Rgba8>,
    /// Outer halo radii at full glow.
    pub halo_radii: Vec2,
    /// Halo opacity at full glow.
    pub halo_opacity: f64,
    /// Inner core radii.
    pub core_radii: Vec2,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            margin: 12.0,
            min_usable_width: 200.0,
            line_gap: 10.0,
            scene_height_ratio: 0.65,
            min_scene_height: 220.0,
            max_scene_height: 520.0,
            lanes: 6,
            lane_spacing: 70.0,
            min_per_lane: 8,
            glow_smoothing: 0.12,
            visibility_threshold: 0.08,
            draw_cutoff: 0.02,
            drift_span: 16.0,
            initial_drift_span: 8.0,
            drift_smoothing: 0.04,
            color_reroll_chance: 0.25,
            interval_base_ms: 1200.0,
            interval_span_ms: 1600.0,
            move_base_ms: 600.0,
            move_span_ms: 1600.0,
            palette: vec![
                Rgba8::rgb(0xff, 0x4d, 0x4f),
                Rgba8::rgb(0x2e, 0xcc, 0x71),
                Rgba8::rgb(0xf4, 0xd0, 0x3f),
                Rgba8::rgb(0x00, 0xc3, 0xff),
                Rgba8::rgb(0xff, 0x6f, 0x61),
            ],
            halo_radii: Vec2::new(6.0, 4.5),
            halo_opacity: 0.75,
            core_radii: Vec2::new(3.6, 2.7),
        }
    }
}

impl LightConfig {
    pub(crate) fn validate(&self) -> GarlandResult<()> {
        if self.palette.is_empty() {
            return Err(GarlandError::validation("lights.palette must not be empty"));
        }
        if !(1..=MAX_LIGHT_LANES).contains(&self.lanes) {
            return Err(GarlandError::validation(format!(
                "lights.lanes must be in [1, {MAX_LIGHT_LANES}]"
            )));
        }
        if self.min_per_lane > MAX_LIGHTS_PER_LANE {
            return Err(GarlandError::validation(format!(
                "lights.min_per_lane must be <= {MAX_LIGHTS_PER_LANE}"
            )));
        }
        for (name, v) in [
            ("lights.glow_smoothing", self.glow_smoothing),
            ("lights.drift_smoothing", self.drift_smoothing),
            ("lights.color_reroll_chance", self.color_reroll_chance),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GarlandError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if !(self.lane_spacing.is_finite() && self.lane_spacing > 0.0) {
            return Err(GarlandError::validation(
                "lights.lane_spacing must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Pick a palette color.
    pub fn pick_color(&self, rng: &mut dyn RandomSource) -> Rgba8 {
        if self.palette.is_empty() {
            return Rgba8::rgb(255, 255, 255);
        }
        self.palette[rng.pick_index(self.palette.len())]
    }
}

/// One point light on the string.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    /// Scatter position, fixed per layout build.
    pub base: Point,
    /// Current drift displacement.
    pub offset: Vec2,
    /// Drift target the offset eases toward.
    pub target: Vec2,
    /// Instantaneous on/off state.
    pub on: bool,
    /// Smoothed visibility in `[0, 1]`.
    pub glow: f64,
    /// Current color.
    pub color: Rgba8,
    /// Nominal toggle interval (ms).
    pub interval_ms: f64,
    /// Clock time of the next toggle.
    pub next_switch_ms: f64,
    /// Clock time of the next drift retarget.
    pub next_move_ms: f64,
}

impl Light {
    /// Where the light is drawn.
    pub fn position(&self) -> Point {
        self.base + self.offset
    }

    /// Whether the light is bright enough to draw.
    pub fn is_drawn(&self, cfg: &LightConfig) -> bool {
        self.glow >= cfg.draw_cutoff
    }

    /// Advance one tick at clock time `now_ms`.
    pub fn step(&mut self, now_ms: f64, cfg: &LightConfig, rng: &mut dyn RandomSource) {
        if now_ms > self.next_switch_ms {
            self.on = !self.on;
            if !self.on && rng.next_f64_01() < cfg.color_reroll_chance {
                self.color = cfg.pick_color(rng);
            }
            self.next_switch_ms = now_ms + self.interval_ms * rng.uniform(0.5, 1.5);
        }

        let target_glow = if self.on { 1.0 } else { 0.0 };
        self.glow = ease_toward(self.glow, target_glow, cfg.glow_smoothing).clamp(0.0, 1.0);

        let hidden = !self.on && self.glow < cfg.visibility_threshold;
        if !hidden {
            return;
        }
        if now_ms > self.next_move_ms {
            self.target = Vec2::new(rng.centered(cfg.drift_span), rng.centered(cfg.drift_span));
            self.next_move_ms = now_ms + cfg.move_base_ms + rng.uniform(0.0, cfg.move_span_ms);
        }
        self.offset = Vec2::new(
            ease_toward(self.offset.x, self.target.x, cfg.drift_smoothing),
            ease_toward(self.offset.y, self.target.y, cfg.drift_smoothing),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/lights.rs"]
mod tests;
