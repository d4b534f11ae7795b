use crate::{assets::decode::DecodedImage, foundation::core::Vec2};

/// Alpha values at or below this are treated as transparent antialiasing fringe.
pub const OPAQUE_ALPHA_THRESHOLD: u8 = 10;

/// Bounding box of non-transparent pixels, in source-pixel coordinates.
///
/// For images with at least one opaque pixel the box is inclusive (`max_x`/`max_y` are the last
/// opaque column/row). A fully transparent image falls back to `{0, 0, width, height}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpaqueBounds {
    /// Leftmost opaque column.
    pub min_x: u32,
    /// Topmost opaque row.
    pub min_y: u32,
    /// Rightmost opaque column.
    pub max_x: u32,
    /// Bottommost opaque row.
    pub max_y: u32,
}

impl OpaqueBounds {
    /// The full image rectangle, used when nothing clears the alpha threshold.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    /// Horizontal center of the opaque region.
    pub fn center_x(&self) -> f64 {
        (f64::from(self.min_x) + f64::from(self.max_x)) * 0.5
    }

    /// Vertical center of the opaque region.
    pub fn center_y(&self) -> f64 {
        (f64::from(self.min_y) + f64::from(self.max_y)) * 0.5
    }
}

/// Scan every pixel's alpha and return the opaque bounding box. Never fails.
pub fn compute_opaque_bounds(image: &DecodedImage) -> OpaqueBounds {
    let w = image.width as usize;
    let h = image.height as usize;
    let mut found: Option<OpaqueBounds> = None;

    for (y, row) in image.rgba8.chunks_exact(w.max(1) * 4).take(h).enumerate() {
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] <= OPAQUE_ALPHA_THRESHOLD {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            found = Some(match found {
                None => OpaqueBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => OpaqueBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
    }

    found.unwrap_or_else(|| OpaqueBounds::full(image.width, image.height))
}

/// Which point of an image's opaque region sits on its pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachPoint {
    /// Center of the opaque bounds (hanging snowflakes, the spinner).
    Center,
    /// Horizontal center, top opaque edge (socks, candy).
    TopCenter,
    /// Top-left opaque corner (resting foliage and fixtures).
    TopLeft,
}

/// Offset from the draw origin of an image scaled by `scale` to its attach point.
///
/// The image is drawn at `pivot - offset` so that the attach point lands on the pivot no matter
/// how much transparent padding the source file carries.
pub fn attach_offset(
    bounds: &OpaqueBounds,
    width: u32,
    height: u32,
    scale: f64,
    attach: AttachPoint,
) -> Vec2 {
    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1));
    let draw_w = w * scale;
    let draw_h = h * scale;
    match attach {
        AttachPoint::Center => Vec2::new(
            bounds.center_x() / w * draw_w,
            bounds.center_y() / h * draw_h,
        ),
        AttachPoint::TopCenter => Vec2::new(
            bounds.center_x() / w * draw_w,
            f64::from(bounds.min_y) / h * draw_h,
        ),
        AttachPoint::TopLeft => Vec2::new(
            f64::from(bounds.min_x) / w * draw_w,
            f64::from(bounds.min_y) / h * draw_h,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bounds.rs"]
mod tests;
