//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! Two coordinate domains exist and never mix:
//! - [`Rel`]: logical units, 0–100 percent of the canvas width or height
//! - [`Px`]: absolute device pixels
//!
//! The only bridge between them is [`crate::coords::CoordinateSpace`].

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::RenderError;

/// Behaviour shared by the two coordinate units.
pub trait Unit:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;

    fn from_raw(val: f64) -> Self;

    fn raw(self) -> f64;

    #[inline]
    fn is_finite(self) -> bool {
        self.raw().is_finite()
    }
}

macro_rules! unit_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
        #[repr(transparent)]
        pub struct $name(pub f64);

        impl $name {
            #[inline]
            pub fn abs(self) -> Self { $name(self.0.abs()) }

            #[inline]
            pub fn min(self, other: Self) -> Self { $name(self.0.min(other.0)) }

            #[inline]
            pub fn max(self, other: Self) -> Self { $name(self.0.max(other.0)) }

            #[inline]
            pub fn round(self) -> Self { $name(self.0.round()) }
        }

        impl Unit for $name {
            const ZERO: Self = $name(0.0);

            #[inline]
            fn from_raw(val: f64) -> Self { $name(val) }

            #[inline]
            fn raw(self) -> f64 { self.0 }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name { $name(self.0 + rhs.0) }
        }
        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name { $name(self.0 - rhs.0) }
        }
        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name { $name(self.0 * rhs) }
        }
        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name { $name(self.0 / rhs) }
        }
        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name { $name(-self.0) }
        }
        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) { self.0 += rhs.0; }
        }
        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) { self.0 -= rhs.0; }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

unit_newtype! {
    /// Logical coordinate: percent of the canvas dimension (0–100)
    Rel
}

unit_newtype! {
    /// Absolute coordinate in device pixels
    Px
}

// NOTE: Px / Px and Rel / Rel are intentionally not implemented; ratios go
// through `raw()` at the call site so a unit never leaks into a scalar silently.

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl<T: Unit> Point<T> {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(self, dx: T, dy: T) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl Point<Px> {
    /// Raw vector form for trigonometry
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Point::new(Px(v.x), Px(v.y))
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl<T: Unit> Size<T> {
    /// Empty means either dimension is zero or negative
    pub fn is_empty(self) -> bool {
        !(self.width > T::ZERO && self.height > T::ZERO)
    }

    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Axis-aligned rectangle stored as origin + size (y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Unit> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point<T>, size: Size<T>) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    /// Rectangle spanning two corner points in any order
    pub fn from_corners(a: Point<T>, b: Point<T>) -> Self {
        let (left, right) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (top, bottom) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn origin(&self) -> Point<T> {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }

    pub fn left(&self) -> T {
        self.x
    }

    pub fn top(&self) -> T {
        self.y
    }

    pub fn right(&self) -> T {
        self.x + self.width
    }

    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    pub fn center(&self) -> Point<T> {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size().is_finite()
    }

    pub fn offset(&self, dx: T, dy: T) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow (positive) or shrink (negative) every side by the given amounts
    pub fn inflate(&self, dx: T, dy: T) -> Self {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2.0,
            self.height + dy * 2.0,
        )
    }

    pub fn contains(&self, p: Point<T>) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn union(&self, other: &Rect<T>) -> Rect<T> {
        let left = if self.x < other.x { self.x } else { other.x };
        let top = if self.y < other.y { self.y } else { other.y };
        let right = if self.right() > other.right() {
            self.right()
        } else {
            other.right()
        };
        let bottom = if self.bottom() > other.bottom() {
            self.bottom()
        } else {
            other.bottom()
        };
        Rect::new(left, top, right - left, bottom - top)
    }
}

impl Rect<Px> {
    /// Snap all four edges to whole pixels, keeping right/bottom from drifting
    pub fn round_edges(&self) -> Self {
        let left = self.x.round();
        let top = self.y.round();
        Rect::new(
            left,
            top,
            self.right().round() - left,
            self.bottom().round() - top,
        )
    }

    /// The four corners clockwise from top-left
    pub fn corners(&self) -> [Point<Px>; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }
}

/// Convenient aliases
pub type PtPx = Point<Px>;
pub type PtRel = Point<Rel>;
pub type SizePx = Size<Px>;
pub type SizeRel = Size<Rel>;
pub type RectPx = Rect<Px>;
pub type RectRel = Rect<Rel>;

pub fn ppx(x: f64, y: f64) -> PtPx {
    Point::new(Px(x), Px(y))
}

pub fn rpx(x: f64, y: f64, width: f64, height: f64) -> RectPx {
    Rect::new(Px(x), Px(y), Px(width), Px(height))
}

pub fn prel(x: f64, y: f64) -> PtRel {
    Point::new(Rel(x), Rel(y))
}

pub fn rrel(x: f64, y: f64, width: f64, height: f64) -> RectRel {
    Rect::new(Rel(x), Rel(y), Rel(width), Rel(height))
}

/// 8-bit RGBA colour with straight (non-premultiplied) alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("brown", Color::rgb(165, 42, 42)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("silver", Color::rgb(192, 192, 192)),
    ("navy", Color::rgb(0, 0, 128)),
    ("steelblue", Color::rgb(70, 130, 180)),
    ("transparent", Color::TRANSPARENT),
];

impl FromStr for Color {
    type Err = RenderError;

    /// Accepts `#RRGGBB`, `#AARRGGBB` or a known colour name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let channel = |i: usize| -> Result<u8, RenderError> {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| RenderError::invalid_argument("color", format!("bad hex `{s}`")))
            };
            return match hex.len() {
                6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
                8 => Ok(Color::rgba(channel(2)?, channel(4)?, channel(6)?, channel(0)?)),
                _ => Err(RenderError::invalid_argument(
                    "color",
                    format!("expected 6 or 8 hex digits in `{s}`"),
                )),
            };
        }
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| RenderError::invalid_argument("color", format!("unknown colour `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_and_center() {
        let r = rpx(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), Px(40.0));
        assert_eq!(r.bottom(), Px(60.0));
        assert_eq!(r.center(), ppx(25.0, 40.0));
        assert!(!r.is_empty());
        assert!(rpx(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(rpx(0.0, 0.0, 5.0, -1.0).is_empty());
    }

    #[test]
    fn from_corners_normalises() {
        let r = Rect::from_corners(ppx(10.0, 5.0), ppx(2.0, 9.0));
        assert_eq!(r, rpx(2.0, 5.0, 8.0, 4.0));
    }

    #[test]
    fn round_edges_keeps_far_edges() {
        let r = rpx(0.4, 0.6, 10.3, 10.3).round_edges();
        assert_eq!(r, rpx(0.0, 1.0, 11.0, 10.0));
    }

    #[test]
    fn union_covers_both() {
        let a = rpx(0.0, 0.0, 10.0, 10.0);
        let b = rpx(5.0, -5.0, 20.0, 5.0);
        assert_eq!(a.union(&b), rpx(0.0, -5.0, 25.0, 15.0));
    }

    #[test]
    fn parse_colors() {
        assert_eq!("#ff8000".parse::<Color>().ok(), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            "#80ff8000".parse::<Color>().ok(),
            Some(Color::rgba(255, 128, 0, 128))
        );
        assert_eq!("SteelBlue".parse::<Color>().ok(), Some(Color::rgb(70, 130, 180)));
        assert!("#12".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_round_trips() {
        for c in [Color::rgb(1, 2, 3), Color::rgba(10, 20, 30, 40)] {
            assert_eq!(c.to_string().parse::<Color>().ok(), Some(c));
        }
    }
}
