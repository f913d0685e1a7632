#![cfg(feature = "raster")]

use chartpaint::canvas::{Canvas, RasterCanvas};
use chartpaint::render::{PieEdge, PieSpec, RectangleSpec};
use chartpaint::style::StyleDescriptor;
use chartpaint::types::{Color, rpx};
use chartpaint::ChartRenderer;

#[test]
fn solid_rectangle_covers_its_pixels_only() {
    let mut r = ChartRenderer::new(RasterCanvas::new(64, 64).unwrap()).unwrap();
    let red = Color::rgb(255, 0, 0);
    r.fill_rectangle_abs(rpx(10.0, 10.0, 20.0, 20.0), &RectangleSpec::new(StyleDescriptor::solid(red)))
        .unwrap();
    let c = r.into_canvas();
    assert_eq!(c.pixel(15, 15), Some(red));
    assert_eq!(c.pixel(40, 40).map(|p| p.a), Some(0));
    assert_eq!(c.pixel(64, 64), None);
}

#[test]
fn concave_pie_releases_its_clip() {
    let mut r = ChartRenderer::new(RasterCanvas::new(64, 64).unwrap()).unwrap();
    let spec = PieSpec::new(StyleDescriptor::solid(Color::rgb(0, 0, 255))).with_edge(PieEdge::Concave);
    r.fill_pie_abs(rpx(4.0, 4.0, 56.0, 56.0), 0.0, 90.0, &spec).unwrap();
    assert!(r.canvas().clip().is_none());
    // the quarter below and right of the centre is painted
    let inside = r.canvas().pixel(44, 44).map(|p| p.a);
    assert_eq!(inside, Some(255));
    let outside = r.canvas().pixel(20, 20).map(|p| p.a);
    assert_eq!(outside, Some(0));
}
