use std::collections::BTreeMap;

use crate::{
    assets::bounds::{AttachPoint, OpaqueBounds, attach_offset},
    assets::store::{AssetKey, PreparedAssets},
    foundation::core::{Affine, Point, Rgba8, Viewport},
    foundation::error::GarlandResult,
    foundation::rng::RandomSource,
    layout::anchors::ReferenceFrame,
    layout::lights::build_lights,
    render::sink::{DrawCmd, RenderSink},
    scene::config::SceneConfig,
    scene::model::{Motion, Ornament},
    scene::tether::{SagCurve, TetherKind},
    sim::clock::FrameClock,
    sim::lights::Light,
    sim::spin::SpinState,
};

/// Pixel size and opaque bounds of one prepared image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Cached opaque bounds.
    pub bounds: OpaqueBounds,
}

/// The whole running scene.
///
/// Construction requires fully prepared assets, so a live `Overlay` is always ready to tick and
/// draw. The host drives it with [`Overlay::tick`] once per frame and
/// [`Overlay::on_viewport_change`] whenever the viewport is resized.
pub struct Overlay {
    cfg: SceneConfig,
    reference: ReferenceFrame,
    assets: BTreeMap<AssetKey, AssetInfo>,
    ornaments: Vec<Ornament>,
    lights: Vec<Light>,
    spin: SpinState,
    clock: FrameClock,
    rng: Box<dyn RandomSource>,
    viewport: Viewport,
}

impl Overlay {
    /// Build the scene: validate the config, resolve anchors, randomize motion and scatter lights.
    #[tracing::instrument(skip(cfg, assets, rng))]
    pub fn new(
        cfg: SceneConfig,
        assets: &PreparedAssets,
        viewport: Viewport,
        now_ms: f64,
        mut rng: Box<dyn RandomSource>,
    ) -> GarlandResult<Self> {
        cfg.validate()?;
        let viewport = Viewport::new(viewport.width, viewport.height);

        let mut infos = BTreeMap::new();
        for key in AssetKey::ALL {
            let p = assets.get(key)?;
            infos.insert(
                key,
                AssetInfo {
                    width: p.image.width,
                    height: p.image.height,
                    bounds: p.bounds,
                },
            );
        }

        let top = assets.get(AssetKey::TopLine)?;
        let reference = ReferenceFrame {
            origin_y: cfg.layout.origin_y,
            width: top.image.width,
            height: top.image.height,
            bounds: top.bounds,
        };

        let ornaments = cfg
            .ornaments
            .iter()
            .map(|spec| Ornament::build(spec, &cfg.physics, &reference, viewport, rng.as_mut()))
            .collect::<GarlandResult<Vec<_>>>()?;
        let lights = build_lights(viewport, &reference, &cfg.lights, now_ms, rng.as_mut());
        let spin = SpinState::new(cfg.spin);
        let clock = FrameClock::starting_at(now_ms, cfg.physics.dt_cap_ms);

        tracing::debug!(
            ornaments = ornaments.len(),
            lights = lights.len(),
            "overlay ready"
        );

        Ok(Self {
            cfg,
            reference,
            assets: infos,
            ornaments,
            lights,
            spin,
            clock,
            rng,
            viewport,
        })
    }

    /// Advance every simulator to clock time `now_ms`. Returns the (capped) elapsed milliseconds.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt_ms = self.clock.advance(now_ms);
        let dt_s = dt_ms / 1000.0;
        let rng = self.rng.as_mut();

        for o in &mut self.ornaments {
            o.step(dt_s, now_ms, rng);
        }
        for l in &mut self.lights {
            l.step(now_ms, &self.cfg.lights, rng);
        }
        self.spin.step(dt_s, now_ms, rng);

        tracing::trace!(now_ms, dt_ms, spin = self.spin.angle, "tick");
        dt_ms
    }

    /// Re-anchor ornaments and rebuild the light layout for a new viewport.
    ///
    /// Pendulum, sway and spin state are left untouched.
    pub fn on_viewport_change(&mut self, viewport: Viewport, now_ms: f64) {
        self.viewport = Viewport::new(viewport.width, viewport.height);
        for o in &mut self.ornaments {
            o.relayout(self.viewport, &self.reference);
        }
        self.lights = build_lights(
            self.viewport,
            &self.reference,
            &self.cfg.lights,
            now_ms,
            self.rng.as_mut(),
        );
        tracing::debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            lights = self.lights.len(),
            "viewport changed"
        );
    }

    /// Compose the current frame in painter's order.
    pub fn draw_list(&self) -> Vec<DrawCmd> {
        let mut out = Vec::new();

        let origin = self.reference.draw_origin(self.viewport);
        out.push(DrawCmd::Image {
            asset: AssetKey::TopLine,
            transform: Affine::translate(origin.to_vec2()),
            glow: self.cfg.layout.line_glow,
        });
        out.push(DrawCmd::Image {
            asset: AssetKey::Icicles,
            transform: Affine::translate(origin.to_vec2()),
            glow: None,
        });

        let lc = &self.cfg.lights;
        for l in self.lights.iter().filter(|l| l.is_drawn(lc)) {
            out.push(DrawCmd::Light {
                center: l.position(),
                color: l.color,
                halo_radii: lc.halo_radii * l.glow,
                halo_opacity: lc.halo_opacity * l.glow,
                core_radii: lc.core_radii,
            });
        }

        for o in &self.ornaments {
            self.compose_ornament(o, &mut out);
        }
        out
    }

    /// Draw the current frame into `sink`.
    pub fn render(&self, sink: &mut dyn RenderSink) -> GarlandResult<()> {
        sink.begin(self.viewport)?;
        sink.draw(&self.draw_list())?;
        sink.end()
    }

    fn compose_ornament(&self, o: &Ornament, out: &mut Vec<DrawCmd>) {
        let spec = &o.spec;
        let curve = match &o.motion {
            Motion::Pendulum(p) => spec.tether.map(|kind| {
                let style = self.cfg.tethers.style(kind);
                let curve = SagCurve::new(o.anchor, p.bob(o.anchor), p.angle, style);
                let points = curve.polyline(p.segments);
                out.push(match kind {
                    TetherKind::Chain => DrawCmd::Chain {
                        points: points.into_iter().skip(1).collect(),
                        radius: style.thickness,
                        color: style.color,
                        glow: style.glow,
                    },
                    TetherKind::Rope => DrawCmd::Rope {
                        points,
                        width: style.thickness,
                        color: style.color,
                    },
                });
                curve
            }),
            Motion::Sway(_) | Motion::Static => None,
        };

        let rotation = match &o.motion {
            Motion::Sway(s) => s.angle,
            Motion::Pendulum(_) | Motion::Static => 0.0,
        };
        if let Some(cmd) = self.image_cmd(
            spec.asset,
            o.pivot(),
            rotation,
            spec.scale,
            spec.attach,
            spec.glow,
        ) {
            out.push(cmd);
        }

        if let (Some(carry), Some(curve)) = (&spec.carry, curve) {
            if let Some(cmd) = self.image_cmd(
                carry.asset,
                curve.point_at(carry.at_t),
                self.spin.angle,
                carry.scale,
                AttachPoint::Center,
                spec.glow,
            ) {
                out.push(cmd);
            }
        }
    }

    fn image_cmd(
        &self,
        asset: AssetKey,
        pivot: Point,
        rotation: f64,
        scale: f64,
        attach: AttachPoint,
        glow: Option<Rgba8>,
    ) -> Option<DrawCmd> {
        let info = self.assets.get(&asset)?;
        let offset = attach_offset(&info.bounds, info.width, info.height, scale, attach);
        let transform = Affine::translate(pivot.to_vec2())
            * Affine::rotate(rotation)
            * Affine::translate(-offset)
            * Affine::scale(scale);
        Some(DrawCmd::Image {
            asset,
            transform,
            glow,
        })
    }

    /// Scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    /// Reference frame every anchor is measured against.
    pub fn reference(&self) -> &ReferenceFrame {
        &self.reference
    }

    /// Size and bounds of a prepared image.
    pub fn asset_info(&self, key: AssetKey) -> Option<AssetInfo> {
        self.assets.get(&key).copied()
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Live ornaments in draw order.
    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    /// Live ornament by configured name.
    pub fn ornament(&self, name: &str) -> Option<&Ornament> {
        self.ornaments.iter().find(|o| o.spec.name == name)
    }

    /// Current light set.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Spinner state.
    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    /// Frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/overlay.rs"]
mod tests;
