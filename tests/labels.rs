use chartpaint::canvas::{Canvas, Font, RecordingCanvas};
use chartpaint::geometry::transform_points;
use chartpaint::text::{AxisSide, LabelLayout, LabelLayoutRequest};
use chartpaint::types::{Px, RectRel, Size, rrel};
use chartpaint::ChartRenderer;

fn renderer() -> ChartRenderer<RecordingCanvas> {
    ChartRenderer::new(RecordingCanvas::new(Size::new(Px(401.0), Px(401.0)))).unwrap()
}

fn layout(rect: RectRel, axis: AxisSide, angle: f64, boundary: Option<RectRel>) -> LabelLayout {
    let mut req = LabelLayoutRequest::new("a rather long label", Font::new("sans", 10.0), rect, axis)
        .with_angle(angle);
    if let Some(boundary) = boundary {
        req = req.with_boundary(boundary);
    }
    renderer().layout_label(&req).unwrap().unwrap()
}

fn drawn_corners(l: &LabelLayout) -> Vec<(f64, f64)> {
    transform_points(&l.text_rect.corners(), l.rotation())
        .into_iter()
        .map(|p| (p.x.0, p.y.0))
        .collect()
}

#[test]
fn bottom_axis_label_cut_at_the_far_end() {
    let rect = rrel(40.0, 80.0, 10.0, 15.0);
    let boundary = rrel(0.0, 0.0, 100.0, 85.0);
    for (angle, expect_left) in [(45.0, false), (-45.0, true)] {
        let free = layout(rect, AxisSide::Bottom, angle, None);
        let cut = layout(rect, AxisSide::Bottom, angle, Some(boundary));
        assert!(cut.text_rect.width < free.text_rect.width, "angle {angle}");
        assert_eq!(cut.truncated_left, expect_left, "angle {angle}");
        assert_eq!(cut.truncated_right, !expect_left, "angle {angle}");
        assert_eq!(cut.pivot, free.pivot);
        for (_, y) in drawn_corners(&cut) {
            assert!(y <= 340.0 + 1e-6, "angle {angle}: corner at y {y}");
        }
    }
}

#[test]
fn vertical_axis_labels_cut_away_from_the_plot() {
    let cut = layout(
        rrel(5.0, 40.0, 20.0, 10.0),
        AxisSide::Left,
        45.0,
        Some(rrel(10.0, 0.0, 90.0, 100.0)),
    );
    assert!(cut.truncated_left && !cut.truncated_right);
    assert!(cut.text_rect.width.0 < 80.0);
    for (x, _) in drawn_corners(&cut) {
        assert!(x >= 40.0 - 1e-6, "corner at x {x}");
    }

    let cut = layout(
        rrel(75.0, 40.0, 20.0, 10.0),
        AxisSide::Right,
        45.0,
        Some(rrel(0.0, 0.0, 90.0, 100.0)),
    );
    assert!(cut.truncated_right && !cut.truncated_left);
    for (x, _) in drawn_corners(&cut) {
        assert!(x <= 360.0 + 1e-6, "corner at x {x}");
    }
}

#[test]
fn upside_down_labels_are_cut_too() {
    let free = layout(rrel(5.0, 40.0, 20.0, 10.0), AxisSide::Left, 180.0, None);
    let cut = layout(
        rrel(5.0, 40.0, 20.0, 10.0),
        AxisSide::Left,
        180.0,
        Some(rrel(0.0, 0.0, 40.0, 100.0)),
    );
    assert!(cut.truncated_right && !cut.truncated_left);
    assert!(cut.text_rect.width < free.text_rect.width);
    let max_x = drawn_corners(&cut)
        .into_iter()
        .map(|(x, _)| x)
        .fold(f64::MIN, f64::max);
    assert!((max_x - 160.0).abs() < 1e-6, "max x {max_x}");
}

#[test]
fn boundary_is_ignored_for_straight_angles() {
    let rect = rrel(40.0, 80.0, 10.0, 15.0);
    let tight = rrel(45.0, 85.0, 1.0, 1.0);
    for angle in [0.0, 90.0, -90.0] {
        let l = layout(rect, AxisSide::Bottom, angle, Some(tight));
        assert!(!l.truncated_left && !l.truncated_right, "angle {angle}");
    }
}

#[test]
fn drawing_leaves_the_canvas_as_found() {
    let mut r = renderer();
    let req = LabelLayoutRequest::new("tilted", Font::new("sans", 10.0), rrel(40.0, 80.0, 10.0, 15.0), AxisSide::Top)
        .with_angle(-30.0);
    r.draw_label(&req).unwrap();
    assert_eq!(r.canvas().text_count(), 1);
    assert_eq!(r.canvas().transform(), glam::DAffine2::IDENTITY);
    assert!(r.canvas().clip().is_none());
}
