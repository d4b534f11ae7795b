use crate::{
    assets::bounds::AttachPoint,
    assets::store::AssetKey,
    foundation::core::{Point, Rgba8, Viewport},
    foundation::error::{GarlandError, GarlandResult},
    foundation::rng::RandomSource,
    layout::anchors::{AnchorOffset, Edge, ReferenceFrame, layout_anchor},
    scene::config::PhysicsConfig,
    scene::tether::TetherKind,
    sim::pendulum::{Pendulum, Sway},
};

/// Explicit ornament discriminant; selects physics constants and motion model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentClass {
    /// Long-chained snowflake pendulum.
    Snowflake,
    /// Short-roped sock pendulum.
    Sock,
    /// Short-roped candy figure pendulum.
    Candy,
    /// Foliage resting on the line; gentle sway.
    Foliage,
    /// Static resting item.
    Fixture,
}

impl OrnamentClass {
    /// Whether this class swings on a pendulum arm.
    pub fn is_pendulum(self) -> bool {
        matches!(
            self,
            OrnamentClass::Snowflake | OrnamentClass::Sock | OrnamentClass::Candy
        )
    }
}

/// A secondary image riding on an ornament's tether, rotated by the spin controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CarrySpec {
    /// Image drawn.
    pub asset: AssetKey,
    /// Draw scale.
    pub scale: f64,
    /// Parametric position on the tether's sag curve.
    pub at_t: f64,
}

/// Declarative placement of one ornament.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrnamentSpec {
    /// Human-readable name (logs, draw commands).
    pub name: String,
    /// Class tag.
    pub class: OrnamentClass,
    /// Image drawn.
    pub asset: AssetKey,
    /// Horizontal offset as a fraction of the reference image width.
    #[serde(default)]
    pub x_frac: f64,
    /// Additional horizontal offset in pixels.
    #[serde(default)]
    pub x_px: f64,
    /// Vertical offset in pixels from `edge`.
    #[serde(default)]
    pub y_px: f64,
    /// Reference edge.
    pub edge: Edge,
    /// Arm length; required for pendulum classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Draw scale.
    pub scale: f64,
    /// Which opaque point sits on the pivot.
    pub attach: AttachPoint,
    /// Tether drawn from anchor to bob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tether: Option<TetherKind>,
    /// Soft glow color behind the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<Rgba8>,
    /// Spinning image carried on the tether.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carry: Option<CarrySpec>,
}

impl OrnamentSpec {
    pub(crate) fn validate(&self) -> GarlandResult<()> {
        let ctx = |msg: &str| GarlandError::validation(format!("ornament '{}': {msg}", self.name));
        for v in [self.x_frac, self.x_px, self.y_px] {
            if !v.is_finite() {
                return Err(ctx("offsets must be finite"));
            }
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ctx("scale must be finite and > 0"));
        }
        if self.class.is_pendulum() {
            match self.length {
                Some(l) if l.is_finite() => {}
                _ => return Err(ctx("pendulum classes need a finite length")),
            }
        } else if self.tether.is_some() {
            return Err(ctx("only pendulum classes can have a tether"));
        }
        if let Some(c) = &self.carry {
            if self.tether.is_none() {
                return Err(ctx("carry requires a tether"));
            }
            if !(0.0..=1.0).contains(&c.at_t) {
                return Err(ctx("carry.at_t must be in [0, 1]"));
            }
            if !(c.scale.is_finite() && c.scale > 0.0) {
                return Err(ctx("carry.scale must be finite and > 0"));
            }
        }
        Ok(())
    }
}

/// Motion model driving an ornament.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// Swinging on an arm.
    Pendulum(Pendulum),
    /// Rotating gently about the anchor.
    Sway(Sway),
    /// Not moving.
    Static,
}

impl Motion {
    /// Current rotation or deflection in radians.
    pub fn angle(&self) -> f64 {
        match self {
            Motion::Pendulum(p) => p.angle,
            Motion::Sway(s) => s.angle,
            Motion::Static => 0.0,
        }
    }

    /// Current angular velocity in radians per second.
    pub fn angular_velocity(&self) -> f64 {
        match self {
            Motion::Pendulum(p) => p.angular_velocity,
            Motion::Sway(s) => s.angular_velocity,
            Motion::Static => 0.0,
        }
    }
}

/// One live ornament.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    /// Placement this ornament was built from.
    pub spec: OrnamentSpec,
    /// Offset resolved once at creation.
    pub offset: AnchorOffset,
    /// World-space pivot; only layout writes it.
    pub anchor: Point,
    /// Physics state.
    pub motion: Motion,
}

impl Ornament {
    /// Create an ornament with randomized motion parameters.
    pub fn build(
        spec: &OrnamentSpec,
        physics: &PhysicsConfig,
        reference: &ReferenceFrame,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> GarlandResult<Self> {
        spec.validate()?;
        let offset =
            AnchorOffset::from_fraction(reference, spec.x_frac, spec.x_px, spec.y_px, spec.edge);
        let motion = match spec.class {
            OrnamentClass::Snowflake | OrnamentClass::Sock | OrnamentClass::Candy => {
                let class_cfg = physics.class_config(spec.class).ok_or_else(|| {
                    GarlandError::validation(format!(
                        "ornament '{}': no physics for class {:?}",
                        spec.name, spec.class
                    ))
                })?;
                let tuning = physics.tuning(class_cfg);
                let length = spec.length.unwrap_or_default();
                Motion::Pendulum(Pendulum::randomized(class_cfg, length, tuning, rng))
            }
            OrnamentClass::Foliage => Motion::Sway(Sway::randomized(physics.foliage, rng)),
            OrnamentClass::Fixture => Motion::Static,
        };
        Ok(Self {
            spec: spec.clone(),
            offset,
            anchor: layout_anchor(viewport, reference, &offset),
            motion,
        })
    }

    /// Class tag.
    pub fn class(&self) -> OrnamentClass {
        self.spec.class
    }

    /// Recompute the anchor for a new viewport. Never touches motion state.
    pub fn relayout(&mut self, viewport: Viewport, reference: &ReferenceFrame) {
        self.anchor = layout_anchor(viewport, reference, &self.offset);
    }

    /// Advance physics by `dt_s` seconds at clock time `now_ms`.
    pub fn step(&mut self, dt_s: f64, now_ms: f64, rng: &mut dyn RandomSource) {
        match &mut self.motion {
            Motion::Pendulum(p) => p.step(dt_s, now_ms, rng),
            Motion::Sway(s) => s.step(dt_s, now_ms),
            Motion::Static => {}
        }
    }

    /// Where the image's attach point is drawn: the bob for pendulums, the anchor otherwise.
    pub fn pivot(&self) -> Point {
        match &self.motion {
            Motion::Pendulum(p) => p.bob(self.anchor),
            Motion::Sway(_) | Motion::Static => self.anchor,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
