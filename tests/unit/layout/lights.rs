use std::f64::consts::TAU;

use super::*;
use crate::assets::bounds::OpaqueBounds;
use crate::foundation::rng::{ConstRandom, Rng64};

fn reference() -> ReferenceFrame {
    ReferenceFrame {
        origin_y: 40.0,
        width: 1000,
        height: 200,
        bounds: OpaqueBounds {
            min_x: 0,
            min_y: 10,
            max_x: 999,
            max_y: 150,
        },
    }
}

#[test]
fn count_follows_usable_width() {
    let cfg = LightConfig::default();
    let wide = build_lights(
        Viewport::new(1000.0, 800.0),
        &reference(),
        &cfg,
        0.0,
        &mut Rng64::new(1),
    );
    assert_eq!(wide.len(), 6 * 13);

    let narrow = build_lights(
        Viewport::new(100.0, 800.0),
        &reference(),
        &cfg,
        0.0,
        &mut Rng64::new(1),
    );
    assert_eq!(narrow.len(), 6 * 8);
}

#[test]
fn pinned_draws_give_exact_positions() {
    let cfg = LightConfig::default();
    let lights = build_lights(
        Viewport::new(1000.0, 800.0),
        &reference(),
        &cfg,
        100.0,
        &mut ConstRandom(0.5),
    );
    let first = &lights[0];
    let t = 0.35 / 13.0;
    let x = 12.0 + t * 976.0;
    let lane_y = 200.0 - 0.25 * 520.0;
    let y = lane_y + (t * TAU).sin() * 44.0;
    assert!((first.base.x - x).abs() < 1e-9);
    assert!((first.base.y - y).abs() < 1e-9);
    assert_eq!(first.offset, Vec2::ZERO);
    assert_eq!(first.target, Vec2::ZERO);
    assert!(first.on);
    assert_eq!(first.glow, 0.5);
    assert_eq!(first.interval_ms, 2000.0);
    assert_eq!(first.next_switch_ms, 800.0);
    assert_eq!(first.next_move_ms, 700.0);
    assert_eq!(first.color, cfg.palette[2]);
}

#[test]
fn random_layout_respects_ranges() {
    let cfg = LightConfig::default();
    let lights = build_lights(
        Viewport::new(1280.0, 720.0),
        &reference(),
        &cfg,
        0.0,
        &mut Rng64::new(99),
    );
    for l in &lights {
        assert_eq!(l.offset, Vec2::ZERO);
        assert!(l.target.x.abs() <= 4.0 && l.target.y.abs() <= 4.0);
        assert!((0.0..1.0).contains(&l.glow));
        assert!((1200.0..2800.0).contains(&l.interval_ms));
        assert!((0.0..1400.0).contains(&l.next_switch_ms));
        assert!((200.0..1000.0).contains(&l.next_move_ms));
        assert!(cfg.palette.contains(&l.color));
    }
}

#[test]
fn huge_viewport_caps_lights_per_lane() {
    let cfg = LightConfig::default();
    let lights = build_lights(
        Viewport::new(1.0e12, 800.0),
        &reference(),
        &cfg,
        0.0,
        &mut ConstRandom(0.5),
    );
    assert_eq!(lights.len(), 6 * MAX_LIGHTS_PER_LANE as usize);
    assert!(lights.iter().all(|l| l.base.x.is_finite()));
}

#[test]
fn oversized_unvalidated_config_is_clamped() {
    let cfg = LightConfig {
        lanes: u32::MAX,
        min_per_lane: u32::MAX,
        ..LightConfig::default()
    };
    let lights = build_lights(
        Viewport::new(1000.0, 800.0),
        &reference(),
        &cfg,
        0.0,
        &mut ConstRandom(0.5),
    );
    assert_eq!(
        lights.len(),
        MAX_LIGHT_LANES as usize * MAX_LIGHTS_PER_LANE as usize
    );
}
