//! Row marks linking a secondary label row back to its axis.
//!
//! Marks are laid out in an axis frame: `a` runs along the axis, `n` across
//! it. The two side edges of a label are the ones crossing the axis; the
//! "left" one has the smaller `a`.

use super::{AxisSide, LabelMarkKind};
use crate::canvas::{Canvas, Path, Stroke};
use crate::render::defaults;
use crate::types::{Point, Px, PtPx, RectPx};

/// Where the marks of one label go
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkPlacement {
    pub rect: RectPx,
    pub axis: AxisSide,
    /// Axis line position across the axis, in pixels
    pub axis_position: f64,
    /// Extent of the text itself along the axis
    pub text_extent: f64,
    pub truncated_left: bool,
    pub truncated_right: bool,
}

impl MarkPlacement {
    fn point(&self, a: f64, n: f64) -> PtPx {
        if self.axis.is_horizontal() {
            Point::new(Px(a), Px(n))
        } else {
            Point::new(Px(n), Px(a))
        }
    }

    /// `(a0, a1)` along the axis, `(near, far)` across it
    fn spans(&self, rect: RectPx) -> ((f64, f64), (f64, f64)) {
        let (a0, a1, n0, n1) = if self.axis.is_horizontal() {
            (rect.left().0, rect.right().0, rect.top().0, rect.bottom().0)
        } else {
            (rect.top().0, rect.bottom().0, rect.left().0, rect.right().0)
        };
        let far = if (n0 - self.axis_position).abs() > (n1 - self.axis_position).abs() {
            n0
        } else {
            n1
        };
        ((a0, a1), (self.axis_position, far))
    }
}

pub fn draw_row_mark(
    canvas: &mut dyn Canvas,
    kind: LabelMarkKind,
    stroke: &Stroke,
    mark: &MarkPlacement,
) {
    match kind {
        LabelMarkKind::None => {}
        LabelMarkKind::Box => draw_box(canvas, stroke, mark),
        LabelMarkKind::SideMark => draw_side_marks(canvas, stroke, mark, false),
        LabelMarkKind::LineSideMark => draw_side_marks(canvas, stroke, mark, true),
    }
}

/// Frame from the axis line to the far edge of the label
fn draw_box(canvas: &mut dyn Canvas, stroke: &Stroke, mark: &MarkPlacement) {
    let ((a0, a1), (axis, far)) = mark.spans(mark.rect.round_edges());
    let p = |a, n| mark.point(a, n);
    canvas.draw_line(p(a0, axis), p(a1, axis), stroke);
    canvas.draw_line(p(a0, far), p(a1, far), stroke);
    if !mark.truncated_left {
        canvas.draw_line(p(a0, axis), p(a0, far), stroke);
    }
    if !mark.truncated_right {
        canvas.draw_line(p(a1, axis), p(a1, far), stroke);
    }
}

/// Ticks from the axis to the middle of the label, optionally continued
/// towards the text
fn draw_side_marks(canvas: &mut dyn Canvas, stroke: &Stroke, mark: &MarkPlacement, lines: bool) {
    let ((a0, a1), (axis, far)) = mark.spans(mark.rect);
    let mid = (axis + far) / 2.0;
    let center = (a0 + a1) / 2.0;
    let reach = (mark.text_extent / 2.0 + defaults::ROW_MARK_SPACING).min((a1 - a0) / 2.0);
    let sides = [
        (a0, center - reach, mark.truncated_left),
        (a1, center + reach, mark.truncated_right),
    ];
    for (edge, inner, truncated) in sides {
        if truncated {
            continue;
        }
        let mut points = vec![mark.point(edge, axis), mark.point(edge, mid)];
        if lines {
            points.push(mark.point(inner, mid));
        }
        canvas.draw_path(&Path::polyline(&points), stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{Command, RecordingCanvas};
    use crate::types::{Color, Size, ppx, rpx};

    fn placement(axis: AxisSide) -> MarkPlacement {
        MarkPlacement {
            rect: rpx(10.0, 110.0, 40.0, 20.0),
            axis,
            axis_position: 100.0,
            text_extent: 10.0,
            truncated_left: false,
            truncated_right: false,
        }
    }

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(Size::new(Px(200.0), Px(200.0)))
    }

    #[test]
    fn box_is_anchored_to_the_axis() {
        let mut c = canvas();
        let stroke = Stroke::solid(Color::BLACK, 1.0);
        draw_row_mark(&mut c, LabelMarkKind::Box, &stroke, &placement(AxisSide::Bottom));
        let lines: Vec<(PtPx, PtPx)> = c
            .commands()
            .filter_map(|cmd| match cmd {
                Command::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], (ppx(10.0, 100.0), ppx(50.0, 100.0)));
        assert_eq!(lines[1], (ppx(10.0, 130.0), ppx(50.0, 130.0)));
    }

    #[test]
    fn truncated_side_is_left_open() {
        let mut c = canvas();
        let stroke = Stroke::solid(Color::BLACK, 1.0);
        let mark = MarkPlacement {
            truncated_right: true,
            ..placement(AxisSide::Bottom)
        };
        draw_row_mark(&mut c, LabelMarkKind::Box, &stroke, &mark);
        assert_eq!(c.stroke_count(), 3);
        c.clear();
        draw_row_mark(&mut c, LabelMarkKind::LineSideMark, &stroke, &mark);
        assert_eq!(c.stroke_count(), 1);
    }

    #[test]
    fn line_side_mark_stops_short_of_the_text() {
        let mut c = canvas();
        let stroke = Stroke::solid(Color::BLACK, 1.0);
        draw_row_mark(&mut c, LabelMarkKind::LineSideMark, &stroke, &placement(AxisSide::Bottom));
        let Some(Command::StrokePath { path, .. }) = c.commands().next() else {
            panic!("path expected");
        };
        let points = path.points();
        assert_eq!(points[0], ppx(10.0, 100.0));
        assert_eq!(points[1], ppx(10.0, 115.0));
        assert_eq!(points[2], ppx(30.0 - 5.0 - defaults::ROW_MARK_SPACING, 115.0));
    }

    #[test]
    fn vertical_axes_swap_the_frame() {
        let mark = MarkPlacement {
            rect: rpx(20.0, 10.0, 30.0, 40.0),
            axis_position: 60.0,
            ..placement(AxisSide::Left)
        };
        let ((a0, a1), (axis, far)) = mark.spans(mark.rect);
        assert_eq!((a0, a1), (10.0, 50.0));
        assert_eq!((axis, far), (60.0, 20.0));
        assert_eq!(mark.point(a0, far), ppx(20.0, 10.0));
    }
}
