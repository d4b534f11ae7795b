use std::f64::consts::TAU;

use crate::{
    foundation::core::{Point, Vec2, Viewport},
    foundation::rng::RandomSource,
    layout::anchors::{Edge, ReferenceFrame},
    sim::lights::{Light, LightConfig, MAX_LIGHT_LANES, MAX_LIGHTS_PER_LANE},
};

/// Scatter a fresh light set across the viewport in wavy horizontal lanes.
///
/// Called on every layout change; the previous set is discarded wholesale.
#[tracing::instrument(skip(reference, cfg, rng))]
pub fn build_lights(
    viewport: Viewport,
    reference: &ReferenceFrame,
    cfg: &LightConfig,
    now_ms: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Light> {
    let usable_width = (viewport.width - cfg.margin * 2.0).max(cfg.min_usable_width);
    let top = reference.edge_y(Edge::Bottom) + cfg.line_gap;
    let scene_height = (viewport.height * cfg.scene_height_ratio)
        .min(cfg.max_scene_height)
        .max(cfg.min_scene_height);

    let lanes = cfg.lanes.clamp(1, MAX_LIGHT_LANES);
    let per_lane = ((usable_width / cfg.lane_spacing).floor().max(0.0) as u32)
        .max(cfg.min_per_lane)
        .min(MAX_LIGHTS_PER_LANE);
    let mut lights = Vec::with_capacity(lanes as usize * per_lane as usize);

    for lane in 0..lanes {
        let lane_f = f64::from(lane);
        let lane_t = if lanes == 1 {
            0.5
        } else {
            lane_f / f64::from(lanes - 1)
        };
        let lane_y = top + (lane_t - 0.25) * scene_height + rng.centered(30.0);
        for i in 0..per_lane {
            let t = (f64::from(i) + rng.uniform(0.0, 0.7) + lane_f * 0.1) / f64::from(per_lane);
            let arc_amp = rng.uniform(28.0, 60.0);
            let arc = (t * TAU + lane_f * 0.8).sin() * arc_amp;
            let jitter_y = rng.centered(30.0);
            let x = cfg.margin + t * usable_width + rng.centered(26.0);
            lights.push(Light {
                base: Point::new(x, lane_y + arc + jitter_y),
                offset: Vec2::ZERO,
                target: Vec2::new(
                    rng.centered(cfg.initial_drift_span),
                    rng.centered(cfg.initial_drift_span),
                ),
                next_move_ms: now_ms + rng.uniform(200.0, 1000.0),
                color: cfg.pick_color(rng),
                on: rng.next_f64_01() > 0.35,
                glow: rng.next_f64_01(),
                interval_ms: cfg.interval_base_ms + rng.uniform(0.0, cfg.interval_span_ms),
                next_switch_ms: now_ms + rng.uniform(0.0, 1400.0),
            });
        }
    }

    tracing::debug!(count = lights.len(), usable_width, "built light layout");
    lights
}

#[cfg(test)]
#[path = "../../tests/unit/layout/lights.rs"]
mod tests;
