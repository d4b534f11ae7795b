use super::*;
use crate::foundation::rng::{ConstRandom, Rng64};

#[test]
fn starts_at_rest() {
    let s = SpinState::new(SpinConfig::default());
    assert_eq!(s.angle, 0.0);
    assert_eq!(s.speed, 0.0);
    assert_eq!(s.target_speed, 0.8);
    assert_eq!(s.dir, 1.0);
    assert_eq!(s.next_switch_ms, 0.0);
}

#[test]
fn phase_switch_picks_direction_and_speed() {
    let mut rng = Rng64::new(17);
    for i in 0..200 {
        let mut s = SpinState::new(SpinConfig::default());
        let now = 100.0 + f64::from(i);
        s.step(0.016, now, &mut rng);
        assert!(s.dir == 1.0 || s.dir == -1.0);
        assert!(s.target_speed >= 1.6 && s.target_speed <= 3.4);
        assert!(s.next_switch_ms > now);
        assert!(s.next_switch_ms >= now + 1200.0 && s.next_switch_ms <= now + 2600.0);
    }
}

#[test]
fn no_switch_before_deadline() {
    let mut s = SpinState::new(SpinConfig::default());
    s.step(0.016, 0.0, &mut ConstRandom(0.1));
    assert_eq!(s.dir, 1.0);
    assert_eq!(s.target_speed, 0.8);
    assert!(s.speed > 0.0);
    assert!(s.angle > 0.0);
}

#[test]
fn speed_eases_in_chosen_direction() {
    let mut cw = SpinState::new(SpinConfig::default());
    let mut r = ConstRandom(0.75);
    for i in 1..=500 {
        cw.step(0.016, f64::from(i) * 16.0, &mut r);
    }
    assert_eq!(cw.dir, 1.0);
    assert!(cw.speed > 0.0 && cw.speed < cw.target_speed);
    assert!(cw.angle > 0.0);

    let mut ccw = SpinState::new(SpinConfig::default());
    let mut r = ConstRandom(0.25);
    for i in 1..=500 {
        ccw.step(0.016, f64::from(i) * 16.0, &mut r);
    }
    assert_eq!(ccw.dir, -1.0);
    assert!(ccw.speed < 0.0);
    assert!(ccw.angle < 0.0);
}
