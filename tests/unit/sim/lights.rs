use super::*;
use crate::foundation::rng::{ConstRandom, Rng64};

fn light() -> Light {
    Light {
        base: Point::new(100.0, 200.0),
        offset: Vec2::ZERO,
        target: Vec2::ZERO,
        on: false,
        glow: 0.0,
        color: Rgba8::rgb(0x00, 0xc3, 0xff),
        interval_ms: 1000.0,
        next_switch_ms: 0.0,
        next_move_ms: f64::INFINITY,
    }
}

#[test]
fn off_light_past_switch_turns_on() {
    let cfg = LightConfig::default();
    let mut rng = Rng64::new(21);
    for _ in 0..100 {
        let mut l = light();
        l.next_switch_ms = 4000.0;
        l.step(5000.0, &cfg, &mut rng);
        assert!(l.on);
        assert!(l.next_switch_ms >= 5500.0 && l.next_switch_ms <= 6500.0);
    }
}

#[test]
fn glow_converges_monotonically() {
    let cfg = LightConfig::default();
    let mut rng = Rng64::new(2);
    let mut l = light();
    l.on = true;
    l.next_switch_ms = f64::INFINITY;
    let mut prev = l.glow;
    for i in 0..100 {
        l.step(f64::from(i), &cfg, &mut rng);
        assert!(l.glow > prev && l.glow <= 1.0);
        prev = l.glow;
    }
    assert!(l.glow > 0.99);

    l.on = false;
    for i in 0..100 {
        l.step(f64::from(i), &cfg, &mut rng);
        assert!(l.glow < prev && l.glow >= 0.0);
        prev = l.glow;
    }
}

#[test]
fn visible_lights_do_not_drift() {
    let cfg = LightConfig::default();
    let mut l = light();
    l.on = true;
    l.glow = 1.0;
    l.next_switch_ms = f64::INFINITY;
    l.next_move_ms = 0.0;
    l.step(10.0, &cfg, &mut Rng64::new(4));
    assert_eq!(l.offset, Vec2::ZERO);
    assert_eq!(l.target, Vec2::ZERO);
    assert_eq!(l.next_move_ms, 0.0);
}

#[test]
fn hidden_lights_retarget_and_ease() {
    let cfg = LightConfig::default();
    let mut rng = Rng64::new(8);
    let mut l = light();
    l.next_switch_ms = f64::INFINITY;
    l.next_move_ms = 50.0;
    l.step(100.0, &cfg, &mut rng);
    assert!(l.target.x.abs() <= 8.0 && l.target.y.abs() <= 8.0);
    assert!(l.next_move_ms >= 700.0 && l.next_move_ms <= 2300.0);
    assert!((l.offset.x - l.target.x * 0.04).abs() < 1e-12);
    assert!((l.offset.y - l.target.y * 0.04).abs() < 1e-12);
}

#[test]
fn color_rerolls_on_switch_off() {
    let cfg = LightConfig::default();
    let mut l = light();
    l.on = true;
    l.glow = 1.0;
    l.step(10.0, &cfg, &mut ConstRandom(0.1));
    assert!(!l.on);
    assert_eq!(l.color, cfg.palette[0]);

    let mut l = light();
    l.on = true;
    l.step(10.0, &cfg, &mut ConstRandom(0.9));
    assert_eq!(l.color, Rgba8::rgb(0x00, 0xc3, 0xff));
}

#[test]
fn draw_cutoff() {
    let cfg = LightConfig::default();
    let mut l = light();
    l.glow = 0.019;
    assert!(!l.is_drawn(&cfg));
    l.glow = 0.02;
    assert!(l.is_drawn(&cfg));
    l.offset = Vec2::new(1.0, -2.0);
    assert_eq!(l.position(), Point::new(101.0, 198.0));
}

#[test]
fn validate_rejects_empty_palette() {
    let cfg = LightConfig {
        palette: Vec::new(),
        ..LightConfig::default()
    };
    assert!(cfg.validate().is_err());
    assert_eq!(cfg.pick_color(&mut ConstRandom(0.3)), Rgba8::rgb(255, 255, 255));
    assert!(LightConfig::default().validate().is_ok());
}

#[test]
fn validate_bounds_lane_counts() {
    for cfg in [
        LightConfig {
            lanes: 0,
            ..LightConfig::default()
        },
        LightConfig {
            lanes: MAX_LIGHT_LANES + 1,
            ..LightConfig::default()
        },
        LightConfig {
            min_per_lane: MAX_LIGHTS_PER_LANE + 1,
            ..LightConfig::default()
        },
    ] {
        assert!(cfg.validate().is_err());
    }
    let edge = LightConfig {
        lanes: MAX_LIGHT_LANES,
        min_per_lane: MAX_LIGHTS_PER_LANE,
        ..LightConfig::default()
    };
    assert!(edge.validate().is_ok());
}
