use super::*;

#[test]
fn sag_grows_with_distance_and_angle() {
    let chain = TetherStyle::chain();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.0, 100.0);
    assert!((SagCurve::new(a, b, 0.0, &chain).sag - 8.0).abs() < 1e-12);
    assert!((SagCurve::new(a, b, 0.5, &chain).sag - 12.0).abs() < 1e-12);
    assert!((SagCurve::new(a, b, -3.0, &chain).sag - 16.0).abs() < 1e-12);

    let far = Point::new(0.0, 1000.0);
    assert_eq!(SagCurve::new(a, far, 0.0, &chain).sag, 18.0);
    assert_eq!(SagCurve::new(a, far, 0.0, &TetherStyle::rope()).sag, 16.0);
}

#[test]
fn curve_passes_through_both_ends() {
    let c = SagCurve::new(
        Point::new(10.0, 20.0),
        Point::new(50.0, 220.0),
        0.2,
        &TetherStyle::chain(),
    );
    assert_eq!(c.point_at(0.0), Point::new(10.0, 20.0));
    let end = c.point_at(1.0);
    assert!((end.x - 50.0).abs() < 1e-9 && (end.y - 220.0).abs() < 1e-9);
    let mid = c.point_at(0.5);
    assert!((mid.x - 30.0).abs() < 1e-9);
    assert!((mid.y - (120.0 + c.sag)).abs() < 1e-9);
}

#[test]
fn polyline_has_segments_plus_one_points() {
    let c = SagCurve::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 80.0),
        0.0,
        &TetherStyle::rope(),
    );
    let pts = c.polyline(8);
    assert_eq!(pts.len(), 9);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert!(pts.iter().skip(1).zip(&pts).all(|(p, q)| p.y > q.y));
    assert_eq!(c.polyline(0).len(), 2);
}

#[test]
fn config_maps_kinds_to_styles() {
    let cfg = TetherConfig::default();
    assert_eq!(*cfg.style(TetherKind::Chain), TetherStyle::chain());
    assert_eq!(cfg.style(TetherKind::Rope).thickness, 4.0);
    assert_eq!(cfg.style(TetherKind::Rope).color, Rgba8::rgb(0xc0, 0x39, 0x2b));
}
