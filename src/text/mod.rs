//! Label layout: alignment, rotation, boundary truncation, row marks and
//! label images.
//!
//! This module is organized into submodules:
//! - `truncate`: shortening rotated labels that leave their boundary
//! - `marks`: box and side marks for secondary label rows
//!
//! [`ChartRenderer::layout_label`] computes where a label goes without
//! drawing anything; [`ChartRenderer::draw_label`] lays it out and draws it.

pub mod marks;
pub mod truncate;

use std::sync::Arc;

use glam::DAffine2;

pub use marks::MarkPlacement;
pub use truncate::{Truncation, truncate_to_boundary};

use crate::canvas::{Canvas, Font, Image, TextAlign, TextFormat};
use crate::errors::Result;
use crate::geometry::{points_bounds, rotation_at, transform_points};
use crate::log::{debug, trace};
use crate::render::{AntiAliasGuard, ChartRenderer, TransformGuard};
use crate::style::{StrokeDescriptor, build_stroke};
use crate::types::{Color, Point, Px, PtPx, Rect, RectPx, RectRel, Rel, Size};

/// Tolerance for treating an angle as axis-aligned
const ANGLE_EPSILON: f64 = 1e-9;

/// Which axis a label belongs to; the plot area lies on the opposite side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxisSide {
    Left,
    Right,
    #[default]
    Bottom,
    Top,
}

impl AxisSide {
    pub fn is_horizontal(self) -> bool {
        matches!(self, AxisSide::Bottom | AxisSide::Top)
    }

    /// Midpoint of the edge of `rect` facing the plot area
    pub fn pivot(self, rect: RectPx) -> PtPx {
        let c = rect.center();
        match self {
            AxisSide::Left => Point::new(rect.right(), c.y),
            AxisSide::Right => Point::new(rect.left(), c.y),
            AxisSide::Bottom => Point::new(c.x, rect.top()),
            AxisSide::Top => Point::new(c.x, rect.bottom()),
        }
    }

    /// Sign of "away from the plot area" along the axis normal
    fn outward(self) -> f64 {
        match self {
            AxisSide::Left | AxisSide::Top => -1.0,
            AxisSide::Right | AxisSide::Bottom => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LabelAlignment {
    /// Along the text line
    pub align: TextAlign,
    /// Across the text lines
    pub line_align: TextAlign,
}

impl LabelAlignment {
    pub fn new(align: TextAlign, line_align: TextAlign) -> Self {
        LabelAlignment { align, line_align }
    }

    pub fn format(self) -> TextFormat {
        TextFormat {
            align: self.align,
            line_align: self.line_align,
            clip: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LabelMarkKind {
    #[default]
    None,
    SideMark,
    LineSideMark,
    Box,
}

/// Connector drawn for labels on secondary rows
#[derive(Clone, Debug, PartialEq)]
pub struct RowMark {
    pub kind: LabelMarkKind,
    pub stroke: StrokeDescriptor,
    /// Axis line position across the axis, in relative units
    pub axis_position: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelImage {
    pub name: String,
    pub transparent_color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayoutRequest {
    pub text: String,
    pub font: Font,
    pub rect: RectRel,
    pub alignment: LabelAlignment,
    /// Degrees, clockwise
    pub angle: f64,
    pub boundary: Option<RectRel>,
    pub axis: AxisSide,
    /// Row 0 is the primary label row
    pub row_index: usize,
    pub row_mark: Option<RowMark>,
    pub truncated_left: bool,
    pub truncated_right: bool,
    pub color: Color,
    pub image: Option<LabelImage>,
}

impl LabelLayoutRequest {
    pub fn new(text: impl Into<String>, font: Font, rect: RectRel, axis: AxisSide) -> Self {
        LabelLayoutRequest {
            text: text.into(),
            font,
            rect,
            alignment: LabelAlignment::new(TextAlign::Center, TextAlign::Center),
            angle: 0.0,
            boundary: None,
            axis,
            row_index: 0,
            row_mark: None,
            truncated_left: false,
            truncated_right: false,
            color: Color::BLACK,
            image: None,
        }
    }

    pub fn with_alignment(mut self, alignment: LabelAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_boundary(mut self, boundary: RectRel) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_row(mut self, row_index: usize, mark: RowMark) -> Self {
        self.row_index = row_index;
        self.row_mark = Some(mark);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_image(mut self, image: LabelImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Where a label ends up. `text_rect` and `image_rect` are in the frame that
/// is turned by `angle` about `pivot` when drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayout {
    pub text_rect: RectPx,
    pub pivot: PtPx,
    pub angle: f64,
    pub alignment: LabelAlignment,
    pub truncated_left: bool,
    pub truncated_right: bool,
    pub image_rect: Option<RectPx>,
}

impl LabelLayout {
    /// Transform applied on top of the canvas transform while drawing
    pub fn rotation(&self) -> DAffine2 {
        rotation_at(self.angle, self.pivot)
    }
}

/// Angle folded into `(-180, 180]`
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 { a - 360.0 } else { a }
}

fn is_angle(angle: f64, target: f64) -> bool {
    (angle - target).abs() < ANGLE_EPSILON
}

/// Rectangle that lands on `rect` once turned by `angle` about `pivot`
fn unrotated(rect: RectPx, pivot: PtPx, angle: f64) -> RectPx {
    let back = transform_points(&rect.corners(), rotation_at(-angle, pivot));
    points_bounds(&back).unwrap_or(rect)
}

struct Placed {
    layout: LabelLayout,
    image: Option<Arc<Image>>,
    rect: RectPx,
}

impl<C: Canvas> ChartRenderer<C> {
    /// Compute the placement of a label. `None` for an empty label rectangle.
    pub fn layout_label(&mut self, req: &LabelLayoutRequest) -> Result<Option<LabelLayout>> {
        Ok(self.place_label(req)?.map(|placed| placed.layout))
    }

    fn place_label(&mut self, req: &LabelLayoutRequest) -> Result<Option<Placed>> {
        if req.rect.is_empty() {
            trace!("empty label rectangle skipped");
            return Ok(None);
        }
        let rect = self.space.to_absolute(req.rect)?;
        let angle = normalize_angle(req.angle);
        let axis = req.axis;
        let mut alignment = req.alignment;
        let mut pivot = axis.pivot(rect);
        let mut text_rect = rect;
        let oblique = !is_angle(angle, 0.0) && !is_angle(angle.abs(), 90.0);

        if is_angle(angle, 0.0) {
            // as given
        } else if axis.is_horizontal() {
            let text_height = self.canvas.measure_text(&req.text, &req.font, None).height.0;
            let shift = angle.to_radians().cos().abs() * text_height / 2.0;
            pivot.y += Px(axis.outward() * shift);
            let runs_forward = (axis == AxisSide::Bottom) == (angle > 0.0);
            let length = rect.height.0;
            let x = if runs_forward { pivot.x.0 } else { pivot.x.0 - length };
            text_rect = Rect::new(
                Px(x),
                pivot.y - Px(text_height / 2.0),
                Px(length),
                Px(text_height),
            );
            alignment = LabelAlignment::new(
                if runs_forward { TextAlign::Near } else { TextAlign::Far },
                TextAlign::Center,
            );
        } else if is_angle(angle.abs(), 90.0) {
            text_rect = unrotated(rect, pivot, angle);
            alignment = if angle > 0.0 {
                LabelAlignment::new(req.alignment.line_align, req.alignment.align.mirrored())
            } else {
                LabelAlignment::new(req.alignment.line_align.mirrored(), req.alignment.align)
            };
        } else {
            let shift = angle.to_radians().sin().abs() * rect.height.0 / 2.0;
            text_rect = rect.offset(Px(axis.outward() * shift), Px(0.0));
            pivot = axis.pivot(text_rect);
        }
        debug!(?axis, angle, x = pivot.x.0, y = pivot.y.0, "label pivot");

        let mut truncated_left = req.truncated_left;
        let mut truncated_right = req.truncated_right;
        let boundary = match req.boundary {
            Some(boundary) if oblique => Some(self.space.to_absolute(boundary)?),
            _ => None,
        };
        if let Some(cut) =
            boundary.and_then(|b| truncate_to_boundary(text_rect, pivot, angle, b))
        {
            text_rect = cut.rect;
            truncated_left |= cut.left;
            truncated_right |= cut.right;
        }

        let image = req.image.as_ref().and_then(|label_image| {
            self.resolver
                .load_image(&label_image.name, label_image.transparent_color)
        });
        let mut image_rect = None;
        if let Some(loaded) = &image {
            let size = self.resolver.image_size(loaded);
            let width = size.width.min(text_rect.width);
            let y = text_rect.y
                + Px(alignment
                    .line_align
                    .offset(text_rect.height.0, size.height.0));
            image_rect = Some(Rect::new(text_rect.x, y, width, size.height));
            text_rect.x += width;
            text_rect.width -= width;
        }

        Ok(Some(Placed {
            layout: LabelLayout {
                text_rect,
                pivot,
                angle,
                alignment,
                truncated_left,
                truncated_right,
                image_rect,
            },
            image,
            rect,
        }))
    }

    /// Lay out and draw a label, then its row mark
    pub fn draw_label(&mut self, req: &LabelLayoutRequest) -> Result<()> {
        let Some(placed) = self.place_label(req)? else {
            return Ok(());
        };
        let layout = &placed.layout;
        let text_aa = self.settings.anti_aliasing.text();
        {
            let canvas: &mut dyn Canvas = &mut self.canvas;
            let mut rotated = TransformGuard::new(canvas, layout.rotation());
            let mut aa = AntiAliasGuard::new(&mut *rotated, text_aa);
            if let (Some(image), Some(dest)) = (&placed.image, layout.image_rect) {
                if !dest.is_empty() {
                    aa.draw_image(image, dest, None);
                }
            }
            if !layout.text_rect.is_empty() {
                aa.draw_text(
                    &req.text,
                    &req.font,
                    layout.text_rect,
                    &layout.alignment.format(),
                    req.color,
                );
            }
        }

        let Some(mark) = req.row_mark.as_ref().filter(|_| req.row_index > 0) else {
            return Ok(());
        };
        let Some(stroke) = build_stroke(&mark.stroke) else {
            return Ok(());
        };
        let axis_position = if req.axis.is_horizontal() {
            self.space.abs_y(Rel(mark.axis_position)).0
        } else {
            self.space.abs_x(Rel(mark.axis_position)).0
        };
        let text_size = self.canvas.measure_text(
            &req.text,
            &req.font,
            Some(Size::new(placed.rect.width, placed.rect.height)),
        );
        let text_extent = if req.axis.is_horizontal() {
            text_size.width.0
        } else {
            text_size.height.0
        };
        marks::draw_row_mark(
            &mut self.canvas,
            mark.kind,
            &stroke,
            &MarkPlacement {
                rect: placed.rect,
                axis: req.axis,
                axis_position,
                text_extent,
                truncated_left: layout.truncated_left,
                truncated_right: layout.truncated_right,
            },
        );
        Ok(())
    }
}
