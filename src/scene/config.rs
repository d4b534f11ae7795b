use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    assets::bounds::AttachPoint,
    assets::store::AssetKey,
    foundation::core::Rgba8,
    foundation::error::{GarlandError, GarlandResult},
    layout::anchors::Edge,
    scene::model::{CarrySpec, OrnamentClass, OrnamentSpec},
    scene::tether::{TetherConfig, TetherKind},
    sim::clock::DEFAULT_DT_CAP_MS,
    sim::lights::LightConfig,
    sim::pendulum::{PendulumClassConfig, PendulumTuning, SwayConfig},
    sim::spin::SpinConfig,
};

/// Global physics constants plus per-class tunables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Stylized gravity (px/s²).
    pub gravity: f64,
    /// Multiplicative velocity damping per step.
    pub damping: f64,
    /// Ceiling on a single tick's elapsed time (ms).
    pub dt_cap_ms: f64,
    /// Width of the always-on jitter range.
    pub micro_span: f64,
    /// Width of the extra jitter range when stalled or near the cap.
    pub micro_boost_span: f64,
    /// Stall threshold on `|angular_velocity|`.
    pub stall_velocity: f64,
    /// Near-cap threshold on `|angle|`.
    pub edge_angle: f64,
    /// Snowflake class.
    pub snowflake: PendulumClassConfig,
    /// Sock class.
    pub sock: PendulumClassConfig,
    /// Candy class.
    pub candy: PendulumClassConfig,
    /// Foliage sway.
    pub foliage: SwayConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 45.0,
            damping: 0.99,
            dt_cap_ms: DEFAULT_DT_CAP_MS,
            micro_span: 0.006,
            micro_boost_span: 0.03,
            stall_velocity: 0.00008,
            edge_angle: 0.24,
            snowflake: PendulumClassConfig::snowflake(),
            sock: PendulumClassConfig::sock(),
            candy: PendulumClassConfig::candy(),
            foliage: SwayConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Pendulum tunables for a class, if it swings.
    pub fn class_config(&self, class: OrnamentClass) -> Option<&PendulumClassConfig> {
        match class {
            OrnamentClass::Snowflake => Some(&self.snowflake),
            OrnamentClass::Sock => Some(&self.sock),
            OrnamentClass::Candy => Some(&self.candy),
            OrnamentClass::Foliage | OrnamentClass::Fixture => None,
        }
    }

    /// Integration constants for one pendulum class.
    pub fn tuning(&self, class: &PendulumClassConfig) -> PendulumTuning {
        PendulumTuning {
            gravity: self.gravity,
            damping: self.damping,
            center_pull: class.center_pull,
            angle_cap: class.angle_cap,
            micro_span: self.micro_span,
            micro_boost_span: self.micro_boost_span,
            stall_velocity: self.stall_velocity,
            edge_angle: self.edge_angle,
        }
    }

    fn validate(&self) -> GarlandResult<()> {
        let finite = [
            ("physics.gravity", self.gravity),
            ("physics.micro_span", self.micro_span),
            ("physics.micro_boost_span", self.micro_boost_span),
            ("physics.stall_velocity", self.stall_velocity),
            ("physics.edge_angle", self.edge_angle),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(GarlandError::validation(format!("{name} must be finite")));
            }
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(GarlandError::validation("physics.damping must be in (0, 1]"));
        }
        if !(self.dt_cap_ms.is_finite() && self.dt_cap_ms > 0.0) {
            return Err(GarlandError::validation(
                "physics.dt_cap_ms must be finite and > 0",
            ));
        }
        for (name, c) in [
            ("snowflake", &self.snowflake),
            ("sock", &self.sock),
            ("candy", &self.candy),
        ] {
            if !(c.angle_cap.is_finite() && c.angle_cap >= 0.0) {
                return Err(GarlandError::validation(format!(
                    "physics.{name}.angle_cap must be finite and >= 0"
                )));
            }
        }
        if !(self.foliage.damping > 0.0 && self.foliage.damping <= 1.0) {
            return Err(GarlandError::validation(
                "physics.foliage.damping must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Placement of the reference image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical position of the reference image's top edge.
    pub origin_y: f64,
    /// Soft glow behind the reference image.
    pub line_glow: Option<Rgba8>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_y: 40.0,
            line_glow: Some(Rgba8 {
                r: 255,
                g: 208,
                b: 120,
                a: 204,
            }),
        }
    }
}

/// Complete scene description. Every section falls back to the built-in festive scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Reference image placement.
    pub layout: LayoutConfig,
    /// Pendulum and sway physics.
    pub physics: PhysicsConfig,
    /// Light string.
    pub lights: LightConfig,
    /// Spinner.
    pub spin: SpinConfig,
    /// Chain and rope styles.
    pub tethers: TetherConfig,
    /// Asset file-name overrides for directory sources.
    pub assets: BTreeMap<AssetKey, String>,
    /// Ornaments in draw order.
    pub ornaments: Vec<OrnamentSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            physics: PhysicsConfig::default(),
            lights: LightConfig::default(),
            spin: SpinConfig::default(),
            tethers: TetherConfig::default(),
            assets: BTreeMap::new(),
            ornaments: default_ornaments(),
        }
    }
}

impl SceneConfig {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GarlandResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GarlandError::serde(format!("parse scene config JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GarlandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GarlandError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> GarlandResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GarlandError::serde(format!("serialize scene config: {e}")))
    }

    /// Check every section for values the simulation cannot run with.
    pub fn validate(&self) -> GarlandResult<()> {
        if !self.layout.origin_y.is_finite() {
            return Err(GarlandError::validation("layout.origin_y must be finite"));
        }
        self.physics.validate()?;
        self.lights.validate()?;
        if !(self.spin.drag > 0.0 && self.spin.drag <= 1.0) {
            return Err(GarlandError::validation("spin.drag must be in (0, 1]"));
        }
        for o in &self.ornaments {
            o.validate()?;
        }
        Ok(())
    }
}

fn hanging(
    name: &str,
    class: OrnamentClass,
    asset: AssetKey,
    x_frac: f64,
    y_px: f64,
    length: f64,
    scale: f64,
) -> OrnamentSpec {
    let (attach, tether, glow) = match class {
        OrnamentClass::Snowflake => (
            AttachPoint::Center,
            TetherKind::Chain,
            Some(Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 230,
            }),
        ),
        OrnamentClass::Candy => (
            AttachPoint::TopCenter,
            TetherKind::Rope,
            Some(Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 179,
            }),
        ),
        _ => (AttachPoint::TopCenter, TetherKind::Rope, None),
    };
    OrnamentSpec {
        name: name.to_string(),
        class,
        asset,
        x_frac,
        x_px: 0.0,
        y_px,
        edge: Edge::Bottom,
        length: Some(length),
        scale,
        attach,
        tether: Some(tether),
        glow,
        carry: None,
    }
}

fn resting(
    name: &str,
    class: OrnamentClass,
    asset: AssetKey,
    x_frac: f64,
    x_px: f64,
    y_px: f64,
    scale: f64,
) -> OrnamentSpec {
    OrnamentSpec {
        name: name.to_string(),
        class,
        asset,
        x_frac,
        x_px,
        y_px,
        edge: Edge::Top,
        length: None,
        scale,
        attach: AttachPoint::TopLeft,
        tether: None,
        glow: None,
        carry: None,
    }
}

/// The built-in festive scene, in draw order.
pub fn default_ornaments() -> Vec<OrnamentSpec> {
    use AssetKey as A;
    use OrnamentClass as C;

    let mut snowflake2 = hanging("snowflake2", C::Snowflake, A::Snowflake2, 0.32, -55.0, 520.0, 0.8);
    snowflake2.carry = Some(CarrySpec {
        asset: A::Snowflake3,
        scale: 0.65,
        at_t: 0.5,
    });

    vec![
        hanging("sock1", C::Sock, A::Sock1, 0.05, 0.0, 20.0, 0.8),
        hanging("snowflake1", C::Snowflake, A::Snowflake1, 0.18, -12.0, 360.0, 0.8),
        snowflake2,
        resting("leaves1", C::Foliage, A::Leaves1, 0.16, -1.0, 114.0, 0.68),
        resting("leaves2", C::Foliage, A::Leaves2, -0.24, 0.0, 48.0, 0.62),
        resting("cherry", C::Fixture, A::Cherry, 0.24, -145.0, 117.0, 0.6),
        resting("cherry2", C::Fixture, A::Cherry, -0.24, -3.0, 75.0, 0.6),
        hanging("sock2_left", C::Sock, A::Sock2, -0.42, -129.0, 20.0, 0.8),
        hanging("sock2_right", C::Sock, A::Sock2, 0.40, -94.0, 20.0, 0.8),
        hanging("candy_left", C::Candy, A::Candy, -0.1, -10.0, 18.0, 0.7),
        hanging("candy_right", C::Candy, A::Candy, 0.28, -30.0, 18.0, 0.7),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
