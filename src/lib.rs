//! Chart rendering and layout on top of a minimal canvas.
//!
//! Callers describe shapes in relative units (0 to 100 across the canvas) and
//! declarative styles; a [`ChartRenderer`] converts them to pixels, resolves
//! paints and strokes, and issues primitive calls on a [`Canvas`] backend.
//!
//! ```
//! use chartpaint::canvas::RecordingCanvas;
//! use chartpaint::render::RectangleSpec;
//! use chartpaint::style::StyleDescriptor;
//! use chartpaint::types::{Color, Px, Size, rrel};
//! use chartpaint::ChartRenderer;
//!
//! let canvas = RecordingCanvas::new(Size::new(Px(401.0), Px(301.0)));
//! let mut renderer = ChartRenderer::new(canvas)?;
//! let bar = RectangleSpec::new(StyleDescriptor::solid(Color::rgb(30, 90, 200)));
//! renderer.fill_rectangle_rel(rrel(10.0, 20.0, 5.0, 60.0), &bar)?;
//! assert_eq!(renderer.canvas().fill_count(), 1);
//! # Ok::<(), chartpaint::RenderError>(())
//! ```

pub mod canvas;
pub mod coords;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod render;
pub mod style;
pub mod text;
pub mod types;

pub use canvas::Canvas;
pub use coords::{CanvasSize, CoordinateSpace};
pub use errors::{RenderError, Result};
pub use render::{ChartRenderer, RenderSettings};
pub use style::StyleResolver;
