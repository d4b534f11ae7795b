use super::*;
use crate::assets::bounds::OpaqueBounds;
use crate::foundation::rng::{ConstRandom, Rng64};
use crate::scene::config::default_ornaments;

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

fn spec(name: &str) -> OrnamentSpec {
    default_ornaments()
        .into_iter()
        .find(|o| o.name == name)
        .unwrap()
}

#[test]
fn sock_builds_a_pendulum_with_class_constants() {
    let o = Ornament::build(
        &spec("sock1"),
        &PhysicsConfig::default(),
        &reference(),
        Viewport::new(1200.0, 800.0),
        &mut ConstRandom(0.5),
    )
    .unwrap();
    assert_eq!(o.class(), OrnamentClass::Sock);
    assert_eq!(o.anchor, Point::new(650.0, 190.0));
    let Motion::Pendulum(p) = &o.motion else {
        panic!("sock should swing");
    };
    assert_eq!(p.length, 20.0);
    assert_eq!(p.segments, 2);
    assert_eq!(p.angle, 0.0);
    assert_eq!(p.tuning.center_pull, 0.15);
    assert_eq!(p.tuning.angle_cap, 0.32);
    assert_eq!(o.pivot(), Point::new(650.0, 210.0));
}

#[test]
fn foliage_sways_and_fixtures_stay_put() {
    let phys = PhysicsConfig::default();
    let vp = Viewport::new(1200.0, 800.0);
    let leaves = Ornament::build(&spec("leaves1"), &phys, &reference(), vp, &mut Rng64::new(1))
        .unwrap();
    assert!(matches!(leaves.motion, Motion::Sway(_)));
    assert_eq!(leaves.pivot(), leaves.anchor);

    let mut cherry =
        Ornament::build(&spec("cherry"), &phys, &reference(), vp, &mut Rng64::new(1)).unwrap();
    assert_eq!(cherry.motion, Motion::Static);
    cherry.step(0.016, 100.0, &mut Rng64::new(2));
    assert_eq!(cherry.motion, Motion::Static);
    assert_eq!(cherry.motion.angle(), 0.0);
    assert_eq!(cherry.motion.angular_velocity(), 0.0);
}

#[test]
fn relayout_moves_anchor_only() {
    let mut rng = Rng64::new(12);
    let mut o = Ornament::build(
        &spec("snowflake2"),
        &PhysicsConfig::default(),
        &reference(),
        Viewport::new(1200.0, 800.0),
        &mut rng,
    )
    .unwrap();
    for i in 0..30 {
        o.step(0.016, f64::from(i) * 16.0, &mut rng);
    }
    let motion = o.motion.clone();
    let before = o.anchor;
    o.relayout(Viewport::new(800.0, 600.0), &reference());
    assert_eq!(o.motion, motion);
    assert!((o.anchor.x - (before.x - 200.0)).abs() < 1e-9);
    assert_eq!(o.anchor.y, before.y);
}

#[test]
fn validate_rejects_inconsistent_specs() {
    let mut s = spec("sock1");
    s.length = None;
    assert!(s.validate().is_err());

    let mut s = spec("leaves1");
    s.tether = Some(TetherKind::Rope);
    assert!(s.validate().is_err());

    let mut s = spec("snowflake2");
    if let Some(c) = s.carry.as_mut() {
        c.at_t = 2.0;
    }
    assert!(s.validate().is_err());

    let mut s = spec("candy_left");
    s.scale = 0.0;
    assert!(s.validate().is_err());

    for s in default_ornaments() {
        assert!(s.validate().is_ok(), "{}", s.name);
    }
}

#[test]
fn spec_parses_from_json() {
    let s: OrnamentSpec = serde_json::from_value(serde_json::json!({
        "name": "bell",
        "class": "candy",
        "asset": "candy",
        "x_frac": 0.1,
        "y_px": -4.0,
        "edge": "bottom",
        "length": 30.0,
        "scale": 0.5,
        "attach": "top_center",
        "tether": "rope",
        "glow": "#ffffffb3"
    }))
    .unwrap();
    assert_eq!(s.class, OrnamentClass::Candy);
    assert_eq!(s.x_px, 0.0);
    assert_eq!(s.tether, Some(TetherKind::Rope));
    assert_eq!(s.glow.map(|c| c.a), Some(179));
    assert!(s.carry.is_none());
    assert!(s.validate().is_ok());
}
