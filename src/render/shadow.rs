//! Shadow colours, radii and paints shared by the shape renderers.

use super::defaults;
use crate::canvas::{Canvas, Effect, GradientStop, Paint, Path, RadialGradient, SpreadMode};
use crate::types::{Color, Px, RectPx};

/// A shadow that will actually be drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowPass {
    pub offset: f64,
    pub color: Color,
    pub soft: bool,
    /// Alpha of the fill casting the shadow
    pub fill_alpha: u8,
}

impl ShadowPass {
    /// Colour of a flat offset copy
    pub fn hard_color(&self) -> Color {
        hard_shadow_color(self.color, self.fill_alpha)
    }

    pub fn sigma(&self) -> f64 {
        blur_sigma(self.offset)
    }

    /// Blurred copy of the source painted at `(+offset, +offset)`
    pub fn drop_shadow(&self, shadow_only: bool) -> Effect {
        Effect::DropShadow {
            dx: self.offset,
            dy: self.offset,
            sigma: if self.soft { self.sigma() } else { 0.0 },
            color: if self.soft { self.color } else { self.hard_color() },
            shadow_only,
        }
    }
}

/// An opaque shadow colour takes half of the fill's alpha; a translucent one is
/// used as given.
pub fn hard_shadow_color(shadow: Color, fill_alpha: u8) -> Color {
    if shadow.is_opaque() {
        shadow.with_alpha(fill_alpha / 2)
    } else {
        shadow
    }
}

pub fn blur_sigma(offset: f64) -> f64 {
    (offset.abs() * defaults::SHADOW_BLUR_FACTOR).max(0.5)
}

/// Corner radius of a soft rectangle shadow
pub fn soft_shadow_radius(offset: f64, rect: RectPx) -> f64 {
    (offset.abs() * defaults::SHADOW_RADIUS_FACTOR)
        .max(defaults::SHADOW_RADIUS_MIN)
        .min(rect.width.0 / 4.0)
        .min(rect.height.0 / 4.0)
}

/// Blurred rounded rectangle behind `rect`
pub fn soft_rect_shadow(canvas: &mut dyn Canvas, rect: RectPx, pass: &ShadowPass) {
    let shadow = rect.offset(Px(pass.offset), Px(pass.offset));
    let path = Path::rounded_rect(shadow, soft_shadow_radius(pass.offset, rect));
    let paint = Paint::solid(pass.color).with_effect(Effect::Blur { sigma: pass.sigma() });
    canvas.fill_path(&path, &paint);
}

/// Radial fade for a soft circle shadow, with the rectangle it covers
pub fn soft_circle_shadow(rect: RectPx, pass: &ShadowPass) -> (RectPx, Paint) {
    let inset = defaults::CIRCLE_SHADOW_INSET;
    let area = rect
        .offset(Px(pass.offset), Px(pass.offset))
        .inflate(Px(inset), Px(inset));
    let size = rect.width.0.max(rect.height.0);
    let focus = (1.0 - 2.0 * pass.offset.abs() / size).clamp(0.0, 1.0);
    let paint = Paint::radial(RadialGradient {
        center: area.center(),
        radius_x: area.width.0 / 2.0,
        radius_y: area.height.0 / 2.0,
        stops: vec![
            GradientStop::new(0.0, pass.color),
            GradientStop::new(focus, pass.color),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ],
        spread: SpreadMode::Pad,
    });
    (area, paint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Shader;
    use crate::types::rpx;

    #[test]
    fn hard_colour_halves_fill_alpha_only_when_opaque() {
        assert_eq!(hard_shadow_color(Color::BLACK, 200), Color::rgba(0, 0, 0, 100));
        let translucent = Color::rgba(0, 0, 0, 64);
        assert_eq!(hard_shadow_color(translucent, 200), translucent);
    }

    #[test]
    fn radius_is_clamped() {
        let big = rpx(0.0, 0.0, 100.0, 100.0);
        assert_eq!(soft_shadow_radius(1.0, big), 2.0);
        assert!((soft_shadow_radius(10.0, big) - 7.0).abs() < 1e-12);
        assert_eq!(soft_shadow_radius(10.0, rpx(0.0, 0.0, 8.0, 100.0)), 2.0);
    }

    #[test]
    fn circle_shadow_focus() {
        let pass = ShadowPass {
            offset: 5.0,
            color: Color::BLACK,
            soft: true,
            fill_alpha: 255,
        };
        let (area, paint) = soft_circle_shadow(rpx(0.0, 0.0, 20.0, 20.0), &pass);
        assert_eq!(area, rpx(4.0, 4.0, 22.0, 22.0));
        let Shader::Radial(g) = paint.shader else {
            panic!("radial expected");
        };
        assert!((g.stops[1].offset - 0.5).abs() < 1e-12);
    }
}
