//! Pixel backend on top of a tiny-skia pixmap.
//!
//! Effects are composited through an offscreen layer the size of the surface:
//! the source is painted into the layer, blurred (or turned into a tinted
//! shadow), then drawn back through the clip mask.

use glam::DAffine2;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use super::{
    Canvas, ClipRegion, Effect, Font, Image, LineCap, LineJoin, Paint, Path, PathVerb, Shader,
    SpreadMode, Stroke, TextFormat,
};
use crate::errors::{RenderError, Result};
use crate::log::warn;
use crate::types::{Color, Px, RectPx, Size, SizePx};

/// Glyph rasterisation supplied by the platform.
pub trait TextRasterizer {
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        font: &Font,
        rect: RectPx,
        format: &TextFormat,
        color: Color,
        transform: Transform,
        clip: Option<&Mask>,
    );
}

pub struct RasterCanvas {
    pixmap: Pixmap,
    transform: DAffine2,
    clip: Option<ClipRegion>,
    clip_mask: Option<Mask>,
    anti_alias: bool,
    text: Option<Box<dyn TextRasterizer>>,
    warned_text: bool,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| RenderError::Canvas {
            reason: format!("cannot allocate a {width}x{height} pixmap"),
        })?;
        Ok(RasterCanvas {
            pixmap,
            transform: DAffine2::IDENTITY,
            clip: None,
            clip_mask: None,
            anti_alias: true,
            text: None,
            warned_text: false,
        })
    }

    pub fn with_text_rasterizer(mut self, text: Box<dyn TextRasterizer>) -> Self {
        self.text = Some(text);
        self
    }

    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(to_sk_color(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha colour of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Straight-alpha RGBA bytes, row-major
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    fn sk_transform(&self) -> Transform {
        to_sk_transform(self.transform)
    }

    fn rebuild_clip_mask(&mut self) {
        self.clip_mask = self.clip.as_ref().and_then(|region| {
            let (w, h) = (self.pixmap.width(), self.pixmap.height());
            let mut combined: Option<Mask> = None;
            for shape in region.shapes() {
                let path = to_sk_path(&shape.path)?;
                let mut mask = Mask::new(w, h)?;
                mask.fill_path(
                    &path,
                    FillRule::Winding,
                    self.anti_alias,
                    to_sk_transform(shape.transform),
                );
                combined = Some(match combined {
                    None => mask,
                    Some(mut acc) => {
                        for (a, b) in acc.data_mut().iter_mut().zip(mask.data()) {
                            *a = ((u16::from(*a) * u16::from(*b)) / 255) as u8;
                        }
                        acc
                    }
                });
            }
            combined
        });
    }

    /// Paint `draw` directly, or through a layer when an effect is attached.
    fn with_effect(&mut self, effect: Option<&Effect>, draw: impl Fn(&mut Pixmap, Option<&Mask>)) {
        let Some(effect) = effect else {
            draw(&mut self.pixmap, self.clip_mask.as_ref());
            return;
        };
        let Some(mut layer) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
            draw(&mut self.pixmap, self.clip_mask.as_ref());
            return;
        };
        draw(&mut layer, None);
        match *effect {
            Effect::Blur { sigma } => {
                box_blur(&mut layer, sigma);
                self.composite(&layer, 0, 0);
            }
            Effect::DropShadow {
                dx,
                dy,
                sigma,
                color,
                shadow_only,
            } => {
                let mut shadow = layer.clone();
                tint(&mut shadow, color);
                box_blur(&mut shadow, sigma);
                self.composite(&shadow, dx.round() as i32, dy.round() as i32);
                if !shadow_only {
                    self.composite(&layer, 0, 0);
                }
            }
        }
    }

    fn composite(&mut self, layer: &Pixmap, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> SizePx {
        Size::new(
            Px(f64::from(self.pixmap.width())),
            Px(f64::from(self.pixmap.height())),
        )
    }

    fn transform(&self) -> DAffine2 {
        self.transform
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn clip(&self) -> Option<ClipRegion> {
        self.clip.clone()
    }

    fn set_clip(&mut self, clip: Option<ClipRegion>) {
        self.clip = clip;
        self.rebuild_clip_mask();
    }

    fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    fn set_anti_alias(&mut self, on: bool) {
        self.anti_alias = on;
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(sk_path) = to_sk_path(path) else {
            return;
        };
        let ts = self.sk_transform();
        let aa = self.anti_alias;
        let pattern = match &paint.shader {
            Shader::Image(p) => to_pixmap(&p.image).map(|pm| (pm, p)),
            _ => None,
        };
        // Pad patterns paint nothing outside the image
        let decal = pattern.as_ref().and_then(|(pm, p)| {
            if p.spread != SpreadMode::Pad {
                return None;
            }
            let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, pm.width() as f32, pm.height() as f32)?;
            let bounds = tiny_skia::PathBuilder::from_rect(rect);
            let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
            mask.fill_path(&bounds, FillRule::Winding, aa, ts.pre_concat(to_sk_transform(p.transform)));
            Some(mask)
        });
        self.with_effect(paint.effect.as_ref(), |pixmap, clip| {
            let shader = match (&paint.shader, &pattern) {
                (Shader::Image(_), Some((pm, p))) => Some(tiny_skia::Pattern::new(
                    pm.as_ref(),
                    match p.spread {
                        SpreadMode::Pad => tiny_skia::SpreadMode::Pad,
                        SpreadMode::Repeat => tiny_skia::SpreadMode::Repeat,
                        SpreadMode::Reflect => tiny_skia::SpreadMode::Reflect,
                    },
                    FilterQuality::Bilinear,
                    1.0,
                    to_sk_transform(p.transform),
                )),
                (Shader::Image(_), None) => None,
                (other, _) => to_sk_shader(other),
            };
            let Some(shader) = shader else {
                return;
            };
            let sk_paint = tiny_skia::Paint {
                shader,
                anti_alias: aa,
                ..Default::default()
            };
            let combined;
            let mask = match (clip, decal.as_ref()) {
                (Some(c), Some(d)) => {
                    let mut m = c.clone();
                    for (a, b) in m.data_mut().iter_mut().zip(d.data()) {
                        *a = ((u16::from(*a) * u16::from(*b)) / 255) as u8;
                    }
                    combined = m;
                    Some(&combined)
                }
                (Some(c), None) => Some(c),
                (None, d) => d,
            };
            pixmap.fill_path(&sk_path, &sk_paint, FillRule::Winding, ts, mask);
        });
    }

    fn draw_path(&mut self, path: &Path, stroke: &Stroke) {
        let Some(sk_path) = to_sk_path(path) else {
            return;
        };
        let ts = self.sk_transform();
        let mut sk_paint = tiny_skia::Paint {
            anti_alias: self.anti_alias,
            ..Default::default()
        };
        sk_paint.set_color(to_sk_color(stroke.color));
        let dash = if stroke.dash.is_continuous() {
            None
        } else {
            tiny_skia::StrokeDash::new(
                stroke.dash.intervals.iter().map(|v| *v as f32).collect(),
                stroke.dash.phase as f32,
            )
        };
        let sk_stroke = tiny_skia::Stroke {
            width: stroke.width as f32,
            line_cap: match stroke.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match stroke.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            dash,
            ..Default::default()
        };
        self.with_effect(stroke.effect.as_ref(), |pixmap, clip| {
            pixmap.stroke_path(&sk_path, &sk_paint, &sk_stroke, ts, clip);
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &Font,
        rect: RectPx,
        format: &TextFormat,
        color: Color,
    ) {
        let ts = self.sk_transform();
        match self.text.as_mut() {
            Some(rasterizer) => rasterizer.draw_text(
                &mut self.pixmap,
                text,
                font,
                rect,
                format,
                color,
                ts,
                self.clip_mask.as_ref(),
            ),
            None => {
                if !self.warned_text {
                    warn!("no text rasterizer installed, skipping text");
                    self.warned_text = true;
                }
            }
        }
    }

    fn draw_image(&mut self, image: &Image, dest: RectPx, effect: Option<&Effect>) {
        let Some(src) = to_pixmap(image) else {
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_xywh(
            dest.x.0 as f32,
            dest.y.0 as f32,
            dest.width.0 as f32,
            dest.height.0 as f32,
        ) else {
            return;
        };
        let ts = self.sk_transform();
        let aa = self.anti_alias;
        let place = Transform::from_row(
            (dest.width.0 / f64::from(image.width())) as f32,
            0.0,
            0.0,
            (dest.height.0 / f64::from(image.height())) as f32,
            dest.x.0 as f32,
            dest.y.0 as f32,
        );
        self.with_effect(effect, |pixmap, clip| {
            let sk_paint = tiny_skia::Paint {
                shader: tiny_skia::Pattern::new(
                    src.as_ref(),
                    tiny_skia::SpreadMode::Pad,
                    FilterQuality::Bilinear,
                    1.0,
                    place,
                ),
                anti_alias: aa,
                ..Default::default()
            };
            pixmap.fill_rect(rect, &sk_paint, ts, clip);
        });
    }
}

fn to_sk_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_sk_transform(m: DAffine2) -> Transform {
    Transform::from_row(
        m.matrix2.x_axis.x as f32,
        m.matrix2.x_axis.y as f32,
        m.matrix2.y_axis.x as f32,
        m.matrix2.y_axis.y as f32,
        m.translation.x as f32,
        m.translation.y as f32,
    )
}

fn to_sk_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for verb in path.verbs() {
        match *verb {
            PathVerb::MoveTo(p) => pb.move_to(p.x.0 as f32, p.y.0 as f32),
            PathVerb::LineTo(p) => pb.line_to(p.x.0 as f32, p.y.0 as f32),
            PathVerb::CubicTo(a, b, c) => pb.cubic_to(
                a.x.0 as f32,
                a.y.0 as f32,
                b.x.0 as f32,
                b.y.0 as f32,
                c.x.0 as f32,
                c.y.0 as f32,
            ),
            PathVerb::Close => pb.close(),
        }
    }
    pb.finish()
}

fn to_sk_shader(shader: &Shader) -> Option<tiny_skia::Shader<'static>> {
    let stops = |stops: &[super::GradientStop]| -> Vec<tiny_skia::GradientStop> {
        stops
            .iter()
            .map(|s| tiny_skia::GradientStop::new(s.offset as f32, to_sk_color(s.color)))
            .collect()
    };
    let spread = |s: SpreadMode| match s {
        SpreadMode::Pad => tiny_skia::SpreadMode::Pad,
        SpreadMode::Repeat => tiny_skia::SpreadMode::Repeat,
        SpreadMode::Reflect => tiny_skia::SpreadMode::Reflect,
    };
    match shader {
        Shader::Solid(c) => Some(tiny_skia::Shader::SolidColor(to_sk_color(*c))),
        Shader::Linear(g) => tiny_skia::LinearGradient::new(
            tiny_skia::Point::from_xy(g.start.x.0 as f32, g.start.y.0 as f32),
            tiny_skia::Point::from_xy(g.end.x.0 as f32, g.end.y.0 as f32),
            stops(&g.stops),
            spread(g.spread),
            Transform::identity(),
        )
        .or_else(|| first_stop(&g.stops)),
        Shader::Radial(g) => {
            // Unit circle stretched onto the ellipse
            let local = Transform::from_row(
                g.radius_x as f32,
                0.0,
                0.0,
                g.radius_y as f32,
                g.center.x.0 as f32,
                g.center.y.0 as f32,
            );
            tiny_skia::RadialGradient::new(
                tiny_skia::Point::from_xy(0.0, 0.0),
                tiny_skia::Point::from_xy(0.0, 0.0),
                1.0,
                stops(&g.stops),
                spread(g.spread),
                local,
            )
            .or_else(|| first_stop(&g.stops))
        }
        Shader::Image(_) => None,
    }
}

/// Degenerate gradients collapse to their first colour
fn first_stop(stops: &[super::GradientStop]) -> Option<tiny_skia::Shader<'static>> {
    stops
        .first()
        .map(|s| tiny_skia::Shader::SolidColor(to_sk_color(s.color)))
}

fn to_pixmap(image: &Image) -> Option<Pixmap> {
    let mut pm = Pixmap::new(image.width(), image.height())?;
    for (dst, c) in pm.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = tiny_skia::ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply();
    }
    Some(pm)
}

/// Replace colour with `color`, keeping coverage
fn tint(layer: &mut Pixmap, color: Color) {
    for px in layer.pixels_mut() {
        let a = u16::from(px.alpha()) * u16::from(color.a) / 255;
        let pm = |ch: u8| (u16::from(ch) * a / 255) as u8;
        if let Some(p) =
            PremultipliedColorU8::from_rgba(pm(color.r), pm(color.g), pm(color.b), a as u8)
        {
            *px = p;
        }
    }
}

/// Three-pass separable box blur approximating a gaussian of `sigma`
fn box_blur(layer: &mut Pixmap, sigma: f64) {
    if sigma <= 0.0 {
        return;
    }
    let radius = ((sigma * sigma + 1.0).sqrt().round() as usize).max(1);
    let (w, h) = (layer.width() as usize, layer.height() as usize);
    let data = layer.data_mut();
    let mut scratch = vec![0u8; data.len()];
    for _ in 0..3 {
        blur_pass(data, &mut scratch, w, h, radius, true);
        blur_pass(&scratch, data, w, h, radius, false);
    }
}

fn blur_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize, horizontal: bool) {
    let (outer, inner) = if horizontal { (h, w) } else { (w, h) };
    let index = |o: usize, i: usize| {
        if horizontal {
            (o * w + i) * 4
        } else {
            (i * w + o) * 4
        }
    };
    let window = (2 * r + 1) as u32;
    for o in 0..outer {
        for ch in 0..4 {
            let mut sum: u32 = 0;
            for i in 0..=r.min(inner.saturating_sub(1)) {
                sum += u32::from(src[index(o, i) + ch]);
            }
            for i in 0..inner {
                dst[index(o, i) + ch] = (sum / window) as u8;
                if i + r + 1 < inner {
                    sum += u32::from(src[index(o, i + r + 1) + ch]);
                }
                if i >= r {
                    sum -= u32::from(src[index(o, i - r) + ch]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DashPattern, Effect};
    use crate::types::{ppx, rpx};

    #[test]
    fn fills_solid_rect() {
        let mut c = RasterCanvas::new(20, 20).unwrap();
        c.fill_rect(rpx(5.0, 5.0, 10.0, 10.0), &Paint::solid(Color::rgb(255, 0, 0)));
        assert_eq!(c.pixel(10, 10), Some(Color::rgb(255, 0, 0)));
        assert_eq!(c.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn clip_limits_painting() {
        let mut c = RasterCanvas::new(20, 20).unwrap();
        c.set_clip(Some(ClipRegion::new(
            Path::rect(rpx(0.0, 0.0, 10.0, 20.0)),
            DAffine2::IDENTITY,
        )));
        c.fill_rect(rpx(0.0, 0.0, 20.0, 20.0), &Paint::solid(Color::BLACK));
        assert_eq!(c.pixel(5, 5).map(|p| p.a), Some(255));
        assert_eq!(c.pixel(15, 5).map(|p| p.a), Some(0));
    }

    #[test]
    fn blur_spreads_coverage() {
        let mut c = RasterCanvas::new(30, 30).unwrap();
        let paint = Paint::solid(Color::BLACK).with_effect(Effect::Blur { sigma: 3.0 });
        c.fill_rect(rpx(10.0, 10.0, 10.0, 10.0), &paint);
        let outside = c.pixel(8, 15).map(|p| p.a).unwrap_or(0);
        assert!(outside > 0);
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut c = RasterCanvas::new(40, 5).unwrap();
        let stroke = Stroke {
            dash: DashPattern {
                intervals: vec![5.0, 5.0],
                phase: 0.0,
            },
            ..Stroke::solid(Color::BLACK, 2.0)
        };
        c.set_anti_alias(false);
        c.draw_line(ppx(0.0, 2.0), ppx(40.0, 2.0), &stroke);
        assert_eq!(c.pixel(2, 2).map(|p| p.a), Some(255));
        assert_eq!(c.pixel(7, 2).map(|p| p.a), Some(0));
    }

    #[test]
    fn rgba_output_has_four_bytes_per_pixel() {
        let c = RasterCanvas::new(3, 2).unwrap();
        assert_eq!(c.into_rgba().len(), 24);
    }
}
