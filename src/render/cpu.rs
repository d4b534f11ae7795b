use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::{
    assets::store::{AssetKey, PreparedAssets},
    foundation::core::{Affine, Point, Rgba8, Vec2, Viewport},
    foundation::error::{GarlandError, GarlandResult},
    render::sink::{DrawCmd, RenderSink},
};

/// Rasterized frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied by alpha (always true for [`CpuSink`]).
    pub premultiplied: bool,
}

/// Settings for [`CpuSink`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSinkSettings {
    /// Background color; transparent when `None`.
    pub clear: Option<Rgba8>,
}

/// Opacity applied to a glow color when its halo is painted.
const GLOW_OPACITY: f64 = 0.35;

/// Halo margin around an image's opaque bounds, in source pixels.
const IMAGE_GLOW_PAD: f64 = 6.0;

/// Chain halo radius relative to the dot radius.
const CHAIN_GLOW_SCALE: f64 = 2.0;

/// Software rasterizer sink built on `vello_cpu`.
///
/// Output pixels are premultiplied RGBA8. Glows are approximated by a flat translucent halo painted
/// under the shape: a rounded rect around an image's opaque bounds, a wider dot under each chain
/// link.
pub struct CpuSink {
    assets: PreparedAssets,
    settings: CpuSinkSettings,
    image_cache: HashMap<AssetKey, vello_cpu::Image>,
    ctx: Option<vello_cpu::RenderContext>,
    width: u16,
    height: u16,
    last: Option<FrameRGBA>,
}

impl CpuSink {
    /// Sink drawing images from `assets`.
    pub fn new(assets: PreparedAssets, settings: CpuSinkSettings) -> Self {
        Self {
            assets,
            settings,
            image_cache: HashMap::new(),
            ctx: None,
            width: 0,
            height: 0,
            last: None,
        }
    }

    /// Borrow the most recently finished frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.last.as_ref()
    }

    /// Take ownership of the most recently finished frame.
    pub fn take_frame(&mut self) -> Option<FrameRGBA> {
        self.last.take()
    }

    fn image_paint_for(&mut self, key: AssetKey) -> GarlandResult<(vello_cpu::Image, f64, f64)> {
        let prepared = self.assets.get(key)?;
        let (w, h) = (
            f64::from(prepared.image.width),
            f64::from(prepared.image.height),
        );
        if let Some(paint) = self.image_cache.get(&key) {
            return Ok((paint.clone(), w, h));
        }

        let pixmap = pixmap_from_premul_bytes(
            &prepared.image.to_premultiplied(),
            prepared.image.width,
            prepared.image.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(key, paint.clone());
        Ok((paint, w, h))
    }
}

impl RenderSink for CpuSink {
    fn begin(&mut self, viewport: Viewport) -> GarlandResult<()> {
        let (w, h) = viewport.pixel_size();
        let width: u16 = w
            .try_into()
            .map_err(|_| GarlandError::render("viewport width exceeds u16"))?;
        let height: u16 = h
            .try_into()
            .map_err(|_| GarlandError::render("viewport height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        self.width = width;
        self.height = height;

        if let Some(c) = self.settings.clear {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(c));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        self.ctx = Some(ctx);
        Ok(())
    }

    fn draw(&mut self, cmds: &[DrawCmd]) -> GarlandResult<()> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| GarlandError::render("draw called before begin"))?;
        let result = cmds.iter().try_for_each(|cmd| self.draw_cmd(&mut ctx, cmd));
        self.ctx = Some(ctx);
        result
    }

    fn end(&mut self) -> GarlandResult<()> {
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| GarlandError::render("end called before begin"))?;
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.last = Some(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        });
        Ok(())
    }
}

impl CpuSink {
    fn draw_cmd(&mut self, ctx: &mut vello_cpu::RenderContext, cmd: &DrawCmd) -> GarlandResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match cmd {
            DrawCmd::Image {
                asset,
                transform,
                glow,
            } => {
                let (paint, w, h) = self.image_paint_for(*asset)?;
                ctx.set_transform(affine_to_cpu(*transform));
                if let Some(g) = glow {
                    let bounds = self.assets.get(*asset)?.bounds;
                    let halo = kurbo::RoundedRect::new(
                        f64::from(bounds.min_x) - IMAGE_GLOW_PAD,
                        f64::from(bounds.min_y) - IMAGE_GLOW_PAD,
                        f64::from(bounds.max_x) + 1.0 + IMAGE_GLOW_PAD,
                        f64::from(bounds.max_y) + 1.0 + IMAGE_GLOW_PAD,
                        IMAGE_GLOW_PAD,
                    );
                    ctx.set_paint(color_to_cpu(g.with_opacity(GLOW_OPACITY)));
                    ctx.fill_path(&shape_path(&halo));
                }
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            }
            DrawCmd::Chain {
                points,
                radius,
                color,
                glow,
            } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                if let Some(g) = glow {
                    ctx.set_paint(color_to_cpu(g.with_opacity(GLOW_OPACITY)));
                    let r = radius * CHAIN_GLOW_SCALE;
                    for p in points {
                        ctx.fill_path(&ellipse_path(*p, Vec2::new(r, r)));
                    }
                }
                ctx.set_paint(color_to_cpu(*color));
                let radii = Vec2::new(*radius, *radius);
                for p in points {
                    ctx.fill_path(&ellipse_path(*p, radii));
                }
            }
            DrawCmd::Rope {
                points,
                width,
                color,
            } => {
                if points.len() < 2 {
                    return Ok(());
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.stroke_path(&polyline_path(points));
            }
            DrawCmd::Light {
                center,
                color,
                halo_radii,
                halo_opacity,
                core_radii,
            } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(color.with_opacity(*halo_opacity)));
                ctx.fill_path(&ellipse_path(*center, *halo_radii));
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&ellipse_path(*center, *core_radii));
            }
        }
        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn ellipse_path(center: Point, radii: Vec2) -> vello_cpu::kurbo::BezPath {
    shape_path(&kurbo::Ellipse::new(
        center,
        (radii.x.abs(), radii.y.abs()),
        0.0,
    ))
}

fn shape_path(shape: &impl Shape) -> vello_cpu::kurbo::BezPath {
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        p.push(el);
    }
    p
}

fn polyline_path(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        out.move_to(point_to_cpu(*first));
    }
    for p in iter {
        out.line_to(point_to_cpu(*p));
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> GarlandResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GarlandError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GarlandError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(GarlandError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
