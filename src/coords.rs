//! Relative ↔ absolute coordinate transform.
//!
//! Logical coordinates run from 0 to 100 across the canvas. They map onto the
//! pixel grid `0..=N-1`, so the scale factor is `(N - 1) / 100`:
//!
//! ```text
//! abs = rel * (dim - 1) / 100
//! rel = abs * 100 / (dim - 1)
//! ```

use crate::errors::{RenderError, Result};
use crate::types::{Point, Px, PtPx, PtRel, Rect, RectPx, RectRel, Rel, Size, SizePx, SizeRel};

/// Pixel dimensions of the render target for one render pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        CanvasSize { width, height }
    }

    pub fn to_size(self) -> SizePx {
        Size::new(Px(f64::from(self.width)), Px(f64::from(self.height)))
    }
}

/// Stateless converter between the two coordinate domains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateSpace {
    size: CanvasSize,
    /// `width - 1`, the pixel span covered by 100 logical units
    span_x: f64,
    /// `height - 1`
    span_y: f64,
}

impl CoordinateSpace {
    /// Both dimensions must be at least 2 pixels, otherwise the span is zero.
    pub fn new(size: CanvasSize) -> Result<Self> {
        if size.width < 2 || size.height < 2 {
            return Err(RenderError::invalid_argument(
                "canvas size",
                format!("{}x{} has no drawable span", size.width, size.height),
            ));
        }
        Ok(CoordinateSpace {
            size,
            span_x: f64::from(size.width) - 1.0,
            span_y: f64::from(size.height) - 1.0,
        })
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.size
    }

    /// Convert a relative point, size or rectangle to pixels.
    pub fn to_absolute<V: ToAbsolute>(&self, value: V) -> Result<V::Output> {
        value.to_absolute(self)
    }

    /// Convert a pixel point, size or rectangle to relative units.
    pub fn to_relative<V: ToRelative>(&self, value: V) -> Result<V::Output> {
        value.to_relative(self)
    }

    /// Unchecked horizontal conversion; callers validate first.
    #[inline]
    pub(crate) fn abs_x(&self, x: Rel) -> Px {
        Px(x.0 * self.span_x / 100.0)
    }

    #[inline]
    pub(crate) fn abs_y(&self, y: Rel) -> Px {
        Px(y.0 * self.span_y / 100.0)
    }

    #[inline]
    pub(crate) fn rel_x(&self, x: Px) -> Rel {
        Rel(x.0 * 100.0 / self.span_x)
    }

    #[inline]
    pub(crate) fn rel_y(&self, y: Px) -> Rel {
        Rel(y.0 * 100.0 / self.span_y)
    }
}

/// Values that can move from the relative into the absolute domain
pub trait ToAbsolute {
    type Output;

    fn to_absolute(self, space: &CoordinateSpace) -> Result<Self::Output>;
}

/// Values that can move from the absolute into the relative domain
pub trait ToRelative {
    type Output;

    fn to_relative(self, space: &CoordinateSpace) -> Result<Self::Output>;
}

fn check_point<T: crate::types::Unit>(p: Point<T>) -> Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(RenderError::invalid_argument("point", "components must be finite"))
    }
}

fn check_size<T: crate::types::Unit>(what: &'static str, s: Size<T>) -> Result<()> {
    if !s.is_finite() {
        return Err(RenderError::invalid_argument(what, "components must be finite"));
    }
    if s.is_empty() {
        return Err(RenderError::invalid_argument(
            what,
            format!("width {} / height {} is empty", s.width.raw(), s.height.raw()),
        ));
    }
    Ok(())
}

fn check_rect<T: crate::types::Unit>(r: &Rect<T>) -> Result<()> {
    check_point(r.origin())?;
    check_size("rectangle", r.size())
}

impl ToAbsolute for PtRel {
    type Output = PtPx;

    fn to_absolute(self, space: &CoordinateSpace) -> Result<PtPx> {
        check_point(self)?;
        Ok(Point::new(space.abs_x(self.x), space.abs_y(self.y)))
    }
}

impl ToAbsolute for SizeRel {
    type Output = SizePx;

    fn to_absolute(self, space: &CoordinateSpace) -> Result<SizePx> {
        check_size("size", self)?;
        Ok(Size::new(space.abs_x(self.width), space.abs_y(self.height)))
    }
}

impl ToAbsolute for RectRel {
    type Output = RectPx;

    fn to_absolute(self, space: &CoordinateSpace) -> Result<RectPx> {
        check_rect(&self)?;
        Ok(Rect::new(
            space.abs_x(self.x),
            space.abs_y(self.y),
            space.abs_x(self.width),
            space.abs_y(self.height),
        ))
    }
}

impl ToRelative for PtPx {
    type Output = PtRel;

    fn to_relative(self, space: &CoordinateSpace) -> Result<PtRel> {
        check_point(self)?;
        Ok(Point::new(space.rel_x(self.x), space.rel_y(self.y)))
    }
}

impl ToRelative for SizePx {
    type Output = SizeRel;

    fn to_relative(self, space: &CoordinateSpace) -> Result<SizeRel> {
        check_size("size", self)?;
        Ok(Size::new(space.rel_x(self.width), space.rel_y(self.height)))
    }
}

impl ToRelative for RectPx {
    type Output = RectRel;

    fn to_relative(self, space: &CoordinateSpace) -> Result<RectRel> {
        check_rect(&self)?;
        Ok(Rect::new(
            space.rel_x(self.x),
            space.rel_y(self.y),
            space.rel_x(self.width),
            space.rel_y(self.height),
        ))
    }
}
