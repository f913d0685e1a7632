use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use chartpaint::canvas::{Canvas, Command, Path, RecordingCanvas, RegionMetadata};
use chartpaint::geometry::star_polygon;
use chartpaint::render::{
    BarFinish, CircleSpec, MarkerDescriptor, MarkerStyle, PieEdge, PieSpec, RectangleSpec,
};
use chartpaint::style::{
    DashKind, StrokeDescriptor, StyleDescriptor, build_stroke, gradient_color,
};
use chartpaint::types::{Color, Px, Size, ppx, rpx, rrel};
use chartpaint::{ChartRenderer, RenderSettings};

fn renderer() -> ChartRenderer<RecordingCanvas> {
    ChartRenderer::new(RecordingCanvas::new(Size::new(Px(401.0), Px(301.0)))).unwrap()
}

#[test]
fn dash_patterns_scale_with_width() {
    let dash = build_stroke(&StrokeDescriptor::new(Color::BLACK, 2.0, DashKind::Dash)).unwrap();
    assert_eq!(dash.dash.intervals, vec![10.0, 10.0]);
    assert_eq!(dash.dash.phase, 20.0);
    let dot = build_stroke(&StrokeDescriptor::new(Color::BLACK, 3.0, DashKind::Dot)).unwrap();
    assert_eq!(dot.dash.intervals, vec![3.0, 3.0]);
    assert_eq!(dot.dash.phase, 6.0);
}

#[test]
fn star_points_alternate_between_radii() {
    let rect = rpx(0.0, 0.0, 40.0, 40.0);
    let center = rect.center().to_vec();
    for n in [4, 5, 6, 10] {
        let points = star_polygon(rect, n);
        assert_eq!(points.len(), 2 * n as usize);
        let dist: Vec<f64> = points.iter().map(|p| p.to_vec().distance(center)).collect();
        for pair in dist.chunks(2) {
            assert!(pair[0] > pair[1], "outer {} not above inner {}", pair[0], pair[1]);
        }
    }
}

#[test]
fn gradient_colour_is_clamped() {
    let c0 = Color::rgba(10, 20, 30, 40);
    let c1 = Color::rgba(210, 220, 230, 250);
    for t in [-0.5, 1.5, f64::NAN, f64::INFINITY] {
        assert_eq!(gradient_color(c0, c1, t), c0);
    }
    assert_eq!(gradient_color(c0, c1, 0.5), Color::rgba(110, 120, 130, 40));
    assert_eq!(gradient_color(c0, c1, 1.0), Color::rgba(210, 220, 230, 40));
}

#[test]
fn doughnut_extremes() {
    let rect = rrel(10.0, 10.0, 50.0, 50.0);
    let style = StyleDescriptor::solid(Color::rgb(0, 120, 0));
    let border = StrokeDescriptor::new(Color::BLACK, 1.0, DashKind::Solid);

    let mut plain = renderer();
    plain
        .fill_pie_rel(rect, 30.0, 100.0, &PieSpec::new(style.clone()).with_border(border.clone()))
        .unwrap();
    let mut full = renderer();
    let spec = PieSpec::new(style.clone()).with_border(border.clone()).doughnut(100.0);
    full.fill_pie_rel(rect, 30.0, 100.0, &spec).unwrap();
    assert_eq!(plain.canvas().records(), full.canvas().records());

    let mut none = renderer();
    let spec = PieSpec::new(style).with_border(border).doughnut(0.0);
    none.fill_pie_rel(rect, 30.0, 100.0, &spec).unwrap();
    assert!(none.canvas().draws().is_empty());
}

#[test]
fn invisible_borders_issue_no_stroke() {
    let style = StyleDescriptor::solid(Color::rgb(200, 10, 10));
    for border in [
        StrokeDescriptor::new(Color::BLACK, 0.0, DashKind::Solid),
        StrokeDescriptor::new(Color::BLACK, 2.0, DashKind::NotSet),
    ] {
        let mut r = renderer();
        let spec = RectangleSpec::new(style.clone()).with_border(border);
        r.fill_rectangle_rel(rrel(10.0, 10.0, 20.0, 20.0), &spec).unwrap();
        assert_eq!(r.canvas().stroke_count(), 0);
        assert_eq!(r.canvas().fill_count(), 1);
    }
}

#[test]
fn five_sector_three_d_circle() {
    let mut r = renderer();
    let spec = CircleSpec::new(StyleDescriptor::solid(Color::rgb(0, 90, 200)), 5).three_d();
    r.draw_circle_abs(rpx(50.0, 50.0, 100.0, 100.0), &spec).unwrap();

    let fills: Vec<&Command> = r.canvas().commands().filter(|c| c.is_fill()).collect();
    assert_eq!(fills.len(), 5);
    let colours: HashSet<Color> = fills
        .iter()
        .filter_map(|c| c.paint().and_then(|p| p.solid_color()))
        .collect();
    assert_eq!(colours.len(), 5);
    let sectors: HashSet<String> = fills.iter().map(|c| format!("{c:?}")).collect();
    assert_eq!(sectors.len(), 5);
}

#[test]
fn every_finish_leaves_the_fill_first() {
    for finish in [
        BarFinish::FLAT,
        BarFinish::CYLINDER,
        BarFinish::EMBOSS,
        BarFinish::LIGHT_TO_DARK,
        BarFinish::WEDGE,
    ] {
        for vertical in [true, false] {
            let mut r = renderer();
            let spec = RectangleSpec::new(StyleDescriptor::solid(Color::rgb(90, 90, 90)))
                .with_finish(finish, vertical);
            r.fill_rectangle_abs(rpx(20.0, 20.0, 40.0, 120.0), &spec).unwrap();
            let draws = r.canvas().draws();
            assert!(
                matches!(draws[0].command, Command::FillRect { .. }),
                "{} did not start with the fill",
                finish.name()
            );
            let overlays = draws.len() - 1;
            assert_eq!(overlays == 0, finish == BarFinish::FLAT, "{}", finish.name());
        }
    }
}

#[test]
fn regions_are_reported_only_when_enabled() {
    let registry: Rc<RefCell<Vec<(Path, RegionMetadata)>>> = Rc::default();
    let marker = MarkerDescriptor::new(MarkerStyle::Circle, 10.0, Color::BLACK)
        .with_region(RegionMetadata::new("series1").with_point(3));

    let mut off = renderer().with_regions(Box::new(registry.clone()));
    off.draw_marker_abs(ppx(40.0, 40.0), &marker).unwrap();
    assert!(registry.borrow().is_empty());

    let mut on = renderer()
        .with_settings(RenderSettings::default().with_process_regions(true))
        .with_regions(Box::new(registry.clone()));
    on.draw_marker_abs(ppx(40.0, 40.0), &marker).unwrap();
    let pie = PieSpec::new(StyleDescriptor::solid(Color::WHITE))
        .with_edge(PieEdge::SoftEdge)
        .with_region(RegionMetadata::new("slice"));
    on.fill_pie_abs(rpx(100.0, 100.0, 80.0, 80.0), 0.0, 45.0, &pie).unwrap();

    let regions = registry.borrow();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].1.point_index, Some(3));
    let bounds = regions[0].0.bounds().unwrap();
    assert!((bounds.center().x.0 - 40.0).abs() < 1e-9);
    assert_eq!(regions[1].1.object, "slice");
}

#[test]
fn state_is_unchanged_after_every_shape() {
    let mut r = renderer();
    let shadow = chartpaint::style::ShadowDescriptor::new(3.0, Color::BLACK);
    let style = StyleDescriptor::solid(Color::rgb(10, 200, 10));
    r.fill_rectangle_abs(
        rpx(5.0, 5.0, 30.0, 30.0),
        &RectangleSpec::new(style.clone()).with_shadow(shadow),
    )
    .unwrap();
    r.fill_pie_abs(
        rpx(50.0, 50.0, 60.0, 60.0),
        0.0,
        90.0,
        &PieSpec::new(style.clone()).with_edge(PieEdge::Concave).with_shadow(shadow),
    )
    .unwrap();
    for style in [MarkerStyle::Diamond, MarkerStyle::Star5, MarkerStyle::Cross] {
        r.draw_marker_abs(
            ppx(120.0, 120.0),
            &MarkerDescriptor::new(style, 12.0, Color::BLACK).with_shadow(shadow),
        )
        .unwrap();
    }
    let c = r.canvas();
    assert_eq!(c.transform(), glam::DAffine2::IDENTITY);
    assert!(c.clip().is_none());
    assert!(c.anti_alias());
}
