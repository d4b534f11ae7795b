//! Anchor placement relative to the viewport midpoint and the reference line's opaque edges.

use crate::{
    assets::bounds::OpaqueBounds,
    foundation::core::{Point, Viewport},
};

/// Which opaque edge of the reference image an ornament attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// Hanging items: measured from the line's lowest opaque row.
    Bottom,
    /// Resting items: measured from the line's topmost opaque row.
    Top,
}

/// The reference image every anchor is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceFrame {
    /// Vertical position the reference image is drawn at.
    pub origin_y: f64,
    /// Reference image width in pixels.
    pub width: u32,
    /// Reference image height in pixels.
    pub height: u32,
    /// Opaque bounds of the reference image.
    pub bounds: OpaqueBounds,
}

impl ReferenceFrame {
    /// World-space y of the given opaque edge.
    pub fn edge_y(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Bottom => self.origin_y + f64::from(self.bounds.max_y),
            Edge::Top => self.origin_y + f64::from(self.bounds.min_y),
        }
    }

    /// Top-left corner the reference image is drawn at for a viewport.
    pub fn draw_origin(&self, viewport: Viewport) -> Point {
        Point::new(viewport.mid_x() - f64::from(self.width) * 0.5, self.origin_y)
    }
}

/// Fixed offset of one anchor from the viewport midpoint and a reference edge.
///
/// Resolved once when the ornament is created; only the absolute anchor moves afterwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorOffset {
    /// Horizontal offset in pixels from the viewport midpoint.
    pub x: f64,
    /// Vertical offset in pixels from the reference edge.
    pub y: f64,
    /// Reference edge.
    pub edge: Edge,
}

impl AnchorOffset {
    /// Resolve a horizontal offset given as a fraction of the reference width plus pixels.
    pub fn from_fraction(
        reference: &ReferenceFrame,
        x_frac: f64,
        x_px: f64,
        y: f64,
        edge: Edge,
    ) -> Self {
        Self {
            x: f64::from(reference.width) * x_frac + x_px,
            y,
            edge,
        }
    }
}

/// World-space anchor for one offset.
pub fn layout_anchor(viewport: Viewport, reference: &ReferenceFrame, offset: &AnchorOffset) -> Point {
    Point::new(
        viewport.mid_x() + offset.x,
        reference.edge_y(offset.edge) + offset.y,
    )
}

/// World-space anchors for every offset. Pure: equal inputs give bit-identical output.
pub fn layout_anchors(
    viewport: Viewport,
    reference: &ReferenceFrame,
    offsets: &[AnchorOffset],
) -> Vec<Point> {
    offsets
        .iter()
        .map(|o| layout_anchor(viewport, reference, o))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchors.rs"]
mod tests;
