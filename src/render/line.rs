//! Styled lines with an optional offset shadow.

use super::ChartRenderer;
use crate::canvas::{Canvas, Effect, LineCap, Stroke};
use crate::errors::Result;
use crate::log::trace;
use crate::style::{ShadowDescriptor, StrokeDescriptor, build_stroke};
use crate::types::{Px, PtPx, PtRel};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineSpec {
    pub stroke: StrokeDescriptor,
    pub shadow: ShadowDescriptor,
    pub cap: LineCap,
}

impl LineSpec {
    pub fn new(stroke: StrokeDescriptor) -> Self {
        LineSpec {
            stroke,
            ..Default::default()
        }
    }

    pub fn with_shadow(mut self, shadow: ShadowDescriptor) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

impl<C: Canvas> ChartRenderer<C> {
    pub fn draw_line_rel(&mut self, from: PtRel, to: PtRel, spec: &LineSpec) -> Result<()> {
        let from = self.space.to_absolute(from)?;
        let to = self.space.to_absolute(to)?;
        self.draw_line_abs(from, to, spec);
        Ok(())
    }

    pub fn draw_line_abs(&mut self, from: PtPx, to: PtPx, spec: &LineSpec) {
        let Some(stroke) = build_stroke(&spec.stroke) else {
            trace!("invisible line skipped");
            return;
        };
        let stroke = Stroke {
            cap: spec.cap,
            ..stroke
        };
        let shadow = self.shadow_pass(&spec.shadow, stroke.color.a);
        let canvas: &mut dyn Canvas = &mut self.canvas;
        if let Some(pass) = shadow {
            let d = Px(pass.offset);
            let shadow_stroke = if pass.soft {
                Stroke {
                    color: pass.color,
                    ..stroke.clone()
                }
                .with_effect(Effect::Blur {
                    sigma: pass.sigma(),
                })
            } else {
                Stroke {
                    color: pass.hard_color(),
                    ..stroke.clone()
                }
            };
            canvas.draw_line(from.offset(d, d), to.offset(d, d), &shadow_stroke);
        }
        canvas.draw_line(from, to, &stroke);
    }
}
