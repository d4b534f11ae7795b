//! Chain and rope geometry between an anchor and a bob.
//!
//! The sag is a visual heuristic, not a catenary: a sine-weighted downward bulge whose amplitude
//! grows with distance (up to a cap) and with the swing angle.

use std::f64::consts::PI;

use crate::foundation::core::{Point, Rgba8, Vec2};

/// How a tether is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TetherKind {
    /// Glowing dots, one per link.
    Chain,
    /// A stroked polyline.
    Rope,
}

/// Sag and paint parameters of one tether kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TetherStyle {
    /// Upper bound on the base sag in pixels.
    pub sag_cap_px: f64,
    /// Base sag per pixel of anchor-bob distance.
    pub sag_ratio: f64,
    /// Paint color.
    pub color: Rgba8,
    /// Dot radius (chains) or stroke width (ropes).
    pub thickness: f64,
    /// Optional soft glow color.
    pub glow: Option<Rgba8>,
}

impl TetherStyle {
    /// Gold glowing chain used by the snowflakes.
    pub fn chain() -> Self {
        Self {
            sag_cap_px: 18.0,
            sag_ratio: 0.08,
            color: Rgba8::rgb(0xff, 0xd1, 0x33),
            thickness: 3.0,
            glow: Some(Rgba8::rgb(0xff, 0xb3, 0x00)),
        }
    }

    /// Red rope used by socks and candy.
    pub fn rope() -> Self {
        Self {
            sag_cap_px: 16.0,
            sag_ratio: 0.06,
            color: Rgba8::rgb(0xc0, 0x39, 0x2b),
            thickness: 4.0,
            glow: None,
        }
    }
}

/// Tether styles by kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    /// Style of [`TetherKind::Chain`].
    pub chain: TetherStyle,
    /// Style of [`TetherKind::Rope`].
    pub rope: TetherStyle,
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            chain: TetherStyle::chain(),
            rope: TetherStyle::rope(),
        }
    }
}

impl TetherConfig {
    /// Style for a kind.
    pub fn style(&self, kind: TetherKind) -> &TetherStyle {
        match kind {
            TetherKind::Chain => &self.chain,
            TetherKind::Rope => &self.rope,
        }
    }
}

/// The sagging curve from `anchor` to `bob`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SagCurve {
    /// Fixed end.
    pub anchor: Point,
    /// Moving end.
    pub bob: Point,
    /// Peak downward bulge in pixels.
    pub sag: f64,
}

impl SagCurve {
    /// `sag = min(cap, distance * ratio) * (1 + min(|angle|, 1))`.
    pub fn new(anchor: Point, bob: Point, angle: f64, style: &TetherStyle) -> Self {
        let base = (anchor.distance(bob) * style.sag_ratio).min(style.sag_cap_px);
        let sag = base * (1.0 + angle.abs().min(1.0));
        Self { anchor, bob, sag }
    }

    /// Point at parametric position `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let d = self.bob - self.anchor;
        self.anchor + d * t + Vec2::new(0.0, self.sag * (PI * t).sin())
    }

    /// `segments + 1` points from the anchor (`t = 0`) to the bob (`t = 1`).
    pub fn polyline(&self, segments: u32) -> Vec<Point> {
        let n = segments.max(1);
        (0..=n)
            .map(|i| self.point_at(f64::from(i) / f64::from(n)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tether.rs"]
mod tests;
