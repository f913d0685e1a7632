//! Renders a small bar chart with a pie inset to a PNG.
//!
//! `cargo run --example bars -- out.png`

use chartpaint::canvas::RasterCanvas;
use chartpaint::render::{BarFinish, MarkerDescriptor, MarkerStyle, PieEdge, PieSpec, RectangleSpec};
use chartpaint::style::{DashKind, GradientKind, ShadowDescriptor, StrokeDescriptor, StyleDescriptor};
use chartpaint::types::{Color, prel, rrel};
use chartpaint::ChartRenderer;
use miette::IntoDiagnostic;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let out = std::env::args().nth(1).unwrap_or_else(|| "bars.png".to_string());

    let mut canvas = RasterCanvas::new(640, 400)?;
    canvas.fill(Color::WHITE);
    let mut chart = ChartRenderer::new(canvas)?;

    let shadow = ShadowDescriptor::new(3.0, Color::rgba(0, 0, 0, 80));
    let border = StrokeDescriptor::new(Color::rgb(40, 40, 40), 1.0, DashKind::Solid);
    let finishes = [
        BarFinish::FLAT,
        BarFinish::CYLINDER,
        BarFinish::EMBOSS,
        BarFinish::LIGHT_TO_DARK,
        BarFinish::WEDGE,
    ];
    for (i, finish) in finishes.into_iter().enumerate() {
        let x = 5.0 + 11.0 * i as f64;
        let height = 20.0 + 12.0 * i as f64;
        let style = StyleDescriptor::solid(Color::rgb(65, 105, 225))
            .with_gradient(GradientKind::TopBottom, Color::rgb(176, 196, 222));
        let spec = RectangleSpec::new(style)
            .with_border(border.clone())
            .with_shadow(shadow)
            .with_finish(finish, true);
        chart.fill_rectangle_rel(rrel(x, 90.0 - height, 8.0, height), &spec)?;

        let marker = MarkerDescriptor::new(MarkerStyle::Star5, 9.0, Color::rgb(220, 20, 60))
            .with_shadow(shadow);
        chart.draw_marker_rel(prel(x + 4.0, 86.0 - height), &marker)?;
    }

    let slices = [
        (0.0, 120.0, Color::rgb(46, 139, 87)),
        (120.0, 150.0, Color::rgb(255, 165, 0)),
        (270.0, 90.0, Color::rgb(106, 90, 205)),
    ];
    for (start, sweep, color) in slices {
        let spec = PieSpec::new(StyleDescriptor::solid(color))
            .with_border(border.clone())
            .with_shadow(shadow)
            .with_edge(PieEdge::Concave)
            .doughnut(45.0);
        chart.fill_pie_rel(rrel(66.0, 20.0, 28.0, 45.0), start, sweep, &spec)?;
    }

    chart.into_canvas().pixmap().save_png(&out).into_diagnostic()?;
    eprintln!("wrote {out}");
    Ok(())
}
