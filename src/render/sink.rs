use crate::{
    assets::store::AssetKey,
    foundation::core::{Affine, Point, Rgba8, Vec2, Viewport},
    foundation::error::GarlandResult,
};

/// One primitive of a composed frame, in world (viewport) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// A prepared image. `transform` maps source pixels to world space.
    Image {
        /// Image drawn.
        asset: AssetKey,
        /// Source-pixel to world transform (translation, rotation and scale).
        transform: Affine,
        /// Optional soft glow behind the image.
        glow: Option<Rgba8>,
    },
    /// Chain links drawn as dots.
    Chain {
        /// Link centers, anchor excluded.
        points: Vec<Point>,
        /// Dot radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
        /// Optional soft glow.
        glow: Option<Rgba8>,
    },
    /// A stroked rope polyline from anchor to bob.
    Rope {
        /// Polyline vertices, anchor first.
        points: Vec<Point>,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// One light of the string: a glowing halo plus a solid core.
    Light {
        /// Light position.
        center: Point,
        /// Light color.
        color: Rgba8,
        /// Halo radii, already scaled by glow.
        halo_radii: Vec2,
        /// Halo opacity, already scaled by glow.
        halo_opacity: f64,
        /// Core radii.
        core_radii: Vec2,
    },
}

/// Consumer of composed frames.
///
/// Ordering contract: `draw` is called between `begin` and `end`, once per frame, with commands in
/// painter's order (first command at the bottom).
pub trait RenderSink {
    /// Called before every frame.
    fn begin(&mut self, viewport: Viewport) -> GarlandResult<()>;
    /// Draw one frame's commands.
    fn draw(&mut self, cmds: &[DrawCmd]) -> GarlandResult<()>;
    /// Called after every frame.
    fn end(&mut self) -> GarlandResult<()>;
}

/// Sink that records draw lists, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    viewport: Option<Viewport>,
    pub(crate) frames: Vec<Vec<DrawCmd>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport passed to the most recent `begin`, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Borrow the recorded frames in submission order.
    pub fn frames(&self) -> &[Vec<DrawCmd>] {
        &self.frames
    }
}

impl RenderSink for InMemorySink {
    fn begin(&mut self, viewport: Viewport) -> GarlandResult<()> {
        self.viewport = Some(viewport);
        Ok(())
    }

    fn draw(&mut self, cmds: &[DrawCmd]) -> GarlandResult<()> {
        self.frames.push(cmds.to_vec());
        Ok(())
    }

    fn end(&mut self) -> GarlandResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
