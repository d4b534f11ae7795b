use super::*;

#[test]
fn first_reading_yields_zero() {
    let mut c = FrameClock::default();
    assert_eq!(c.advance(1000.0), 0.0);
    assert_eq!(c.last_ms(), Some(1000.0));
}

#[test]
fn elapsed_time_is_capped() {
    let mut c = FrameClock::starting_at(100.0, DEFAULT_DT_CAP_MS);
    assert_eq!(c.advance(116.0), 16.0);
    assert_eq!(c.advance(5000.0), 32.0);
    assert_eq!(c.last_ms(), Some(5000.0));
}

#[test]
fn backwards_readings_are_absorbed() {
    let mut c = FrameClock::starting_at(500.0, 32.0);
    assert_eq!(c.advance(400.0), 0.0);
    assert_eq!(c.last_ms(), Some(500.0));
    assert_eq!(c.advance(510.0), 10.0);
    assert_eq!(c.advance(f64::NAN), 0.0);
    assert_eq!(c.last_ms(), Some(510.0));
}

#[test]
fn bad_cap_falls_back_to_default() {
    assert_eq!(FrameClock::new(f64::NAN).cap_ms(), DEFAULT_DT_CAP_MS);
    assert_eq!(FrameClock::new(-1.0).cap_ms(), DEFAULT_DT_CAP_MS);
    assert_eq!(FrameClock::new(50.0).cap_ms(), 50.0);
}
