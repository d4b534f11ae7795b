use super::*;

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
fn hanging_anchor_measures_from_bottom_edge() {
    let r = reference();
    let off = AnchorOffset::from_fraction(&r, 0.05, 0.0, -12.0, Edge::Bottom);
    assert_eq!(off.x, 50.0);
    let a = layout_anchor(Viewport::new(1200.0, 800.0), &r, &off);
    assert_eq!(a, Point::new(650.0, 178.0));
}

#[test]
fn resting_anchor_measures_from_top_edge() {
    let r = reference();
    let off = AnchorOffset::from_fraction(&r, 0.16, -1.0, 114.0, Edge::Top);
    let a = layout_anchor(Viewport::new(1000.0, 800.0), &r, &off);
    assert!((a.x - 659.0).abs() < 1e-9);
    assert_eq!(a.y, 164.0);
}

#[test]
fn layout_is_idempotent() {
    let r = reference();
    let offsets = vec![
        AnchorOffset::from_fraction(&r, -0.42, 0.0, -129.0, Edge::Bottom),
        AnchorOffset::from_fraction(&r, 0.32, 0.0, -55.0, Edge::Bottom),
        AnchorOffset::from_fraction(&r, -0.24, -3.0, 75.0, Edge::Top),
    ];
    let v = Viewport::new(1337.0, 777.0);
    let a = layout_anchors(v, &r, &offsets);
    let b = layout_anchors(v, &r, &offsets);
    assert_eq!(a, b);
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn degenerate_widths_floor_to_zero() {
    let r = reference();
    let off = AnchorOffset {
        x: 25.0,
        y: 0.0,
        edge: Edge::Bottom,
    };
    assert_eq!(layout_anchor(Viewport::new(-100.0, 10.0), &r, &off).x, 25.0);
    let raw = Viewport {
        width: f64::NAN,
        height: 10.0,
    };
    assert_eq!(layout_anchor(raw, &r, &off).x, 25.0);
}

#[test]
fn draw_origin_centers_reference() {
    let r = reference();
    assert_eq!(
        r.draw_origin(Viewport::new(1200.0, 800.0)),
        Point::new(100.0, 40.0)
    );
    assert_eq!(r.edge_y(Edge::Bottom), 190.0);
    assert_eq!(r.edge_y(Edge::Top), 50.0);
}
