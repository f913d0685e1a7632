//! Immutable paint and stroke value objects handed to a [`Canvas`](super::Canvas).

use std::sync::Arc;

use glam::DAffine2;

use super::image::Image;
use crate::types::{Color, PtPx};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// 0.0 to 1.0
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        GradientStop { offset, color }
    }
}

/// What happens beyond the end of a gradient or outside a pattern image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadMode {
    /// Clamp to the edge colour; for images, nothing outside the image
    Pad,
    Repeat,
    /// Mirror on every repetition
    Reflect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: PtPx,
    pub end: PtPx,
    pub stops: Vec<GradientStop>,
    pub spread: SpreadMode,
}

/// Elliptical radial gradient
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: PtPx,
    pub radius_x: f64,
    pub radius_y: f64,
    pub stops: Vec<GradientStop>,
    pub spread: SpreadMode,
}

/// An image used as a shader; `transform` maps image pixels into user space
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePattern {
    pub image: Arc<Image>,
    pub spread: SpreadMode,
    pub transform: DAffine2,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
    Image(ImagePattern),
}

/// Post-processing applied to whatever a paint or stroke covers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Blur {
        sigma: f64,
    },
    DropShadow {
        dx: f64,
        dy: f64,
        sigma: f64,
        color: Color,
        /// Only the shadow is painted, not the source
        shadow_only: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub shader: Shader,
    pub effect: Option<Effect>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint {
            shader: Shader::Solid(color),
            effect: None,
        }
    }

    pub fn linear(gradient: LinearGradient) -> Self {
        Paint {
            shader: Shader::Linear(gradient),
            effect: None,
        }
    }

    pub fn radial(gradient: RadialGradient) -> Self {
        Paint {
            shader: Shader::Radial(gradient),
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// The flat colour of a solid paint
    pub fn solid_color(&self) -> Option<Color> {
        match self.shader {
            Shader::Solid(c) => Some(c),
            _ => None,
        }
    }

    /// Alpha used when deriving a hard shadow from this paint
    pub fn alpha(&self) -> u8 {
        match &self.shader {
            Shader::Solid(c) => c.a,
            Shader::Linear(g) => g.stops.first().map_or(255, |s| s.color.a),
            Shader::Radial(g) => g.stops.first().map_or(255, |s| s.color.a),
            Shader::Image(_) => 255,
        }
    }
}

/// Dash intervals (on, off, on, off, ...) in pixels plus start phase
#[derive(Clone, Debug, PartialEq)]
pub struct DashPattern {
    pub intervals: Vec<f64>,
    pub phase: f64,
}

impl DashPattern {
    /// A pattern with no gaps draws a continuous line
    pub fn is_continuous(&self) -> bool {
        self.intervals.iter().skip(1).step_by(2).all(|gap| *gap <= 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: DashPattern,
    pub cap: LineCap,
    pub join: LineJoin,
    pub effect: Option<Effect>,
}

impl Stroke {
    /// Continuous stroke with butt caps and miter joins
    pub fn solid(color: Color, width: f64) -> Self {
        Stroke {
            color,
            width,
            dash: DashPattern {
                intervals: vec![width, 0.0],
                phase: width,
            },
            cap: LineCap::default(),
            join: LineJoin::default(),
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_dash_detection() {
        assert!(Stroke::solid(Color::BLACK, 2.0).dash.is_continuous());
        let dashed = DashPattern {
            intervals: vec![5.0, 5.0, 1.0, 1.0],
            phase: 12.0,
        };
        assert!(!dashed.is_continuous());
    }
}
