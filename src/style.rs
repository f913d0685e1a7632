//! Style resolution: declarative fill/stroke descriptors to canvas paints.
//!
//! Fill precedence is image > hatch > gradient > solid. Pies check the
//! gradient before the image (see [`FillTarget::Pie`]).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use glam::DAffine2;

use crate::canvas::{
    DashPattern, GradientStop, Image, ImageLoader, ImagePattern, LinearGradient, Paint,
    RadialGradient, Shader, SpreadMode, Stroke, TextAlign,
};
use crate::errors::{RenderError, Result};
use crate::log::{trace, warn};
use crate::render::defaults;
use crate::types::{Color, Point, Px, PtPx, RectPx, SizePx};

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal { $($variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl TryFrom<u8> for $name {
            type Error = RenderError;

            fn try_from(value: u8) -> Result<Self> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(RenderError::invalid_operation($what, other)),
                }
            }
        }

        impl FromStr for $name {
            type Err = RenderError;

            fn from_str(s: &str) -> Result<Self> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($name::$variant);
                    }
                )+
                Err(RenderError::invalid_operation($what, s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}
pub(crate) use named_enum;

named_enum! {
    /// Gradient direction
    GradientKind, "gradient kind" {
        None = 0,
        LeftRight = 1,
        TopBottom = 2,
        Center = 3,
        DiagonalLeft = 4,
        DiagonalRight = 5,
        HorizontalCenter = 6,
        VerticalCenter = 7,
    }
}

named_enum! {
    /// Declared hatch pattern. Every kind other than `None` paints the same tile.
    HatchKind, "hatch kind" {
        None = 0,
        BackwardDiagonal = 1,
        Cross = 2,
        DiagonalCross = 3,
        ForwardDiagonal = 4,
        Horizontal = 5,
        Vertical = 6,
        DiagonalBrick = 7,
        LargeGrid = 8,
        Percent50 = 9,
    }
}

named_enum! {
    ImageWrapMode, "image wrap mode" {
        Tile = 0,
        TileFlipX = 1,
        TileFlipY = 2,
        TileFlipXY = 3,
        Scaled = 4,
        Unscaled = 5,
    }
}

named_enum! {
    /// Anchor of an unscaled image inside its rectangle
    ImageAlign, "image alignment" {
        TopLeft = 0,
        Top = 1,
        TopRight = 2,
        Right = 3,
        BottomRight = 4,
        Bottom = 5,
        BottomLeft = 6,
        Left = 7,
        Center = 8,
    }
}

named_enum! {
    DashKind, "dash kind" {
        NotSet = 0,
        Dash = 1,
        DashDot = 2,
        DashDotDot = 3,
        Dot = 4,
        Solid = 5,
    }
}

named_enum! {
    /// Where a border sits relative to the shape outline
    BorderAlignment, "border alignment" {
        Center = 0,
        Inset = 1,
        Outset = 2,
    }
}

impl ImageAlign {
    /// Horizontal and vertical alignment
    pub fn axes(self) -> (TextAlign, TextAlign) {
        use TextAlign::{Center, Far, Near};
        match self {
            ImageAlign::TopLeft => (Near, Near),
            ImageAlign::Top => (Center, Near),
            ImageAlign::TopRight => (Far, Near),
            ImageAlign::Right => (Far, Center),
            ImageAlign::BottomRight => (Far, Far),
            ImageAlign::Bottom => (Center, Far),
            ImageAlign::BottomLeft => (Near, Far),
            ImageAlign::Left => (Near, Center),
            ImageAlign::Center => (Center, Center),
        }
    }

    /// Top-left corner of a `size` box aligned inside `rect`
    pub fn place(self, rect: RectPx, size: SizePx) -> PtPx {
        let (h, v) = self.axes();
        Point::new(
            rect.x + Px(h.offset(rect.width.0, size.width.0)),
            rect.y + Px(v.offset(rect.height.0, size.height.0)),
        )
    }
}

/// Declarative fill
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDescriptor {
    pub primary: Option<Color>,
    pub secondary: Option<Color>,
    pub hatch: HatchKind,
    pub gradient: GradientKind,
    pub image: Option<String>,
    pub wrap: ImageWrapMode,
    pub align: ImageAlign,
    pub transparent_color: Option<Color>,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        StyleDescriptor {
            primary: None,
            secondary: None,
            hatch: HatchKind::None,
            gradient: GradientKind::None,
            image: None,
            wrap: ImageWrapMode::Tile,
            align: ImageAlign::TopLeft,
            transparent_color: None,
        }
    }
}

impl StyleDescriptor {
    pub fn solid(color: Color) -> Self {
        StyleDescriptor {
            primary: Some(color),
            ..Default::default()
        }
    }

    pub fn with_gradient(mut self, kind: GradientKind, secondary: Color) -> Self {
        self.gradient = kind;
        self.secondary = Some(secondary);
        self
    }

    pub fn with_hatch(mut self, kind: HatchKind, foreground: Option<Color>) -> Self {
        self.hatch = kind;
        if foreground.is_some() {
            self.secondary = foreground;
        }
        self
    }

    pub fn with_image(mut self, name: impl Into<String>, wrap: ImageWrapMode) -> Self {
        self.image = Some(name.into());
        self.wrap = wrap;
        self
    }

    pub fn with_align(mut self, align: ImageAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_transparent_color(mut self, color: Color) -> Self {
        self.transparent_color = Some(color);
        self
    }
}

/// Declarative stroke
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDescriptor {
    pub color: Option<Color>,
    pub width: f64,
    pub dash: DashKind,
    pub alignment: BorderAlignment,
}

impl Default for StrokeDescriptor {
    fn default() -> Self {
        StrokeDescriptor {
            color: None,
            width: 0.0,
            dash: DashKind::NotSet,
            alignment: BorderAlignment::Center,
        }
    }
}

impl StrokeDescriptor {
    pub fn new(color: Color, width: f64, dash: DashKind) -> Self {
        StrokeDescriptor {
            color: Some(color),
            width,
            dash,
            alignment: BorderAlignment::Center,
        }
    }

    pub fn with_alignment(mut self, alignment: BorderAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Offset shadow; softness comes from the render settings
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadowDescriptor {
    pub offset: f64,
    pub color: Option<Color>,
}

impl ShadowDescriptor {
    pub fn new(offset: f64, color: Color) -> Self {
        ShadowDescriptor {
            offset,
            color: Some(color),
        }
    }

    /// The shadow colour, when there is anything to draw
    pub fn visible_color(&self) -> Option<Color> {
        if self.offset == 0.0 {
            return None;
        }
        self.color.filter(|c| !c.is_transparent())
    }
}

/// Which precedence and radial sizing rules a fill follows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillTarget {
    #[default]
    Shape,
    Pie,
}

/// Channel-wise linear blend; `c0` is returned for `t` outside `0..=1` or NaN.
/// Alpha always comes from `c0`.
pub fn gradient_color(c0: Color, c1: Color, t: f64) -> Color {
    if !(0.0..=1.0).contains(&t) {
        return c0;
    }
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
    Color::rgba(mix(c0.r, c1.r), mix(c0.g, c1.g), mix(c0.b, c1.b), c0.a)
}

/// Lightness ramp around `color`: below 0.5 blends from half-white towards the
/// colour, from 0.5 on towards black, black past 1.5.
pub fn bright_gradient_color(color: Color, position: f64) -> Color {
    if position < 0.5 {
        gradient_color(Color::WHITE.with_alpha(color.a), color, 0.5 + position)
    } else if position - 0.5 < 1.0 {
        gradient_color(color, Color::BLACK.with_alpha(color.a), position - 0.5)
    } else {
        Color::BLACK.with_alpha(color.a)
    }
}

/// Start and end points of a linear gradient of the given direction.
pub fn linear_gradient_points(kind: GradientKind, rect: RectPx) -> Result<(PtPx, PtPx)> {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let c = rect.center();
    Ok(match kind {
        GradientKind::LeftRight => (Point::new(l, t), Point::new(r, t)),
        GradientKind::TopBottom => (Point::new(l, t), Point::new(l, b)),
        GradientKind::DiagonalLeft => (Point::new(l, t), Point::new(r, b)),
        GradientKind::DiagonalRight => (Point::new(r, t), Point::new(l, b)),
        GradientKind::HorizontalCenter => (Point::new(l, t), Point::new(l, c.y)),
        GradientKind::VerticalCenter => (Point::new(l, t), Point::new(c.x, t)),
        GradientKind::None | GradientKind::Center => {
            return Err(RenderError::invalid_operation(
                "gradient direction",
                kind,
            ));
        }
    })
}

/// Dash intervals for a kind, scaled by `width`. Solid and anything
/// unrecognised is a gap-less `[w, 0]`.
pub fn dash_pattern(kind: DashKind, width: f64) -> DashPattern {
    let (unit, phase): (&[f64], f64) = match kind {
        DashKind::Dash => (&[5.0, 5.0], 10.0),
        DashKind::DashDot => (&[5.0, 5.0, 1.0, 1.0], 12.0),
        DashKind::DashDotDot => (&[5.0, 5.0, 1.0, 1.0, 1.0, 1.0], 14.0),
        DashKind::Dot => (&[1.0, 1.0], 2.0),
        DashKind::Solid | DashKind::NotSet => (&[1.0, 0.0], 1.0),
    };
    DashPattern {
        intervals: unit.iter().map(|u| u * width).collect(),
        phase: phase * width,
    }
}

/// Stroke for a descriptor, or `None` when nothing should be drawn.
pub fn build_stroke(desc: &StrokeDescriptor) -> Option<Stroke> {
    if desc.width <= 0.0 || desc.dash == DashKind::NotSet {
        return None;
    }
    let color = desc.color.filter(|c| !c.is_transparent())?;
    Some(Stroke {
        dash: dash_pattern(desc.dash, desc.width),
        ..Stroke::solid(color, desc.width)
    })
}

/// The 20×20 two-diagonal lattice used for every hatch kind
pub fn hatch_tile(foreground: Color, background: Color) -> Image {
    let n = defaults::HATCH_UNIT;
    Image::from_fn(n, n, |x, y| {
        if x == y || x + y == n - 1 {
            foreground
        } else {
            background
        }
    })
}

/// Builds paints from descriptors and owns the image collaborator.
pub struct StyleResolver {
    loader: Box<dyn ImageLoader>,
    canvas: SizePx,
    keyed: HashMap<(String, Color), Arc<Image>>,
}

impl StyleResolver {
    pub fn new(loader: Box<dyn ImageLoader>, canvas: SizePx) -> Self {
        StyleResolver {
            loader,
            canvas,
            keyed: HashMap::new(),
        }
    }

    pub fn loader(&self) -> &dyn ImageLoader {
        self.loader.as_ref()
    }

    /// Load an image, with `transparent` keyed out. Keyed copies are cached
    /// per name and colour.
    pub fn load_image(&mut self, name: &str, transparent: Option<Color>) -> Option<Arc<Image>> {
        if let Some(key) = transparent {
            if let Some(hit) = self.keyed.get(&(name.to_string(), key)) {
                return Some(hit.clone());
            }
        }
        let Some(image) = self.loader.load_image(name) else {
            warn!(image = name, "image not found");
            return None;
        };
        let Some(key) = transparent else {
            return Some(image);
        };
        let keyed = Arc::new(image.with_key_color(key));
        self.keyed.insert((name.to_string(), key), keyed.clone());
        Some(keyed)
    }

    /// Size to draw `image` at on this canvas
    pub fn image_size(&self, image: &Image) -> SizePx {
        self.loader.adjusted_size(image, self.canvas)
    }

    /// Fill paint for `style` over `bounds`, or `None` when there is nothing
    /// to paint (no colour and no usable image).
    pub fn build_fill(
        &mut self,
        style: &StyleDescriptor,
        bounds: RectPx,
        target: FillTarget,
    ) -> Result<Option<Paint>> {
        let layered = match target {
            FillTarget::Pie => match self.gradient_fill(style, bounds, target)? {
                Some(paint) => Some(paint),
                None => self
                    .texture_fill(style, bounds)
                    .or_else(|| self.hatch_fill(style, bounds)),
            },
            FillTarget::Shape => match self
                .texture_fill(style, bounds)
                .or_else(|| self.hatch_fill(style, bounds))
            {
                Some(paint) => Some(paint),
                None => self.gradient_fill(style, bounds, target)?,
            },
        };
        if layered.is_some() {
            return Ok(layered);
        }
        Ok(style
            .primary
            .filter(|c| !c.is_transparent())
            .map(Paint::solid))
    }

    fn gradient_fill(
        &self,
        style: &StyleDescriptor,
        bounds: RectPx,
        target: FillTarget,
    ) -> Result<Option<Paint>> {
        let (Some(primary), Some(secondary)) = (style.primary, style.secondary) else {
            return Ok(None);
        };
        let stops = vec![
            GradientStop::new(0.0, primary),
            GradientStop::new(1.0, secondary),
        ];
        let paint = match style.gradient {
            GradientKind::None => return Ok(None),
            GradientKind::Center => {
                let side = bounds.width.0.max(bounds.height.0);
                let radius = match target {
                    FillTarget::Pie => side,
                    FillTarget::Shape => side / 2.0,
                };
                Paint::radial(RadialGradient {
                    center: bounds.center(),
                    radius_x: radius,
                    radius_y: radius,
                    stops,
                    spread: SpreadMode::Pad,
                })
            }
            kind => {
                let (start, end) = linear_gradient_points(kind, bounds)?;
                Paint::linear(LinearGradient {
                    start,
                    end,
                    stops,
                    spread: SpreadMode::Reflect,
                })
            }
        };
        Ok(Some(paint))
    }

    fn hatch_fill(&self, style: &StyleDescriptor, bounds: RectPx) -> Option<Paint> {
        if style.hatch == HatchKind::None {
            return None;
        }
        let background = style.primary.unwrap_or(Color::TRANSPARENT);
        let foreground = style.secondary.unwrap_or(Color::BLACK);
        trace!(hatch = %style.hatch, "hatch fill");
        Some(Paint {
            shader: Shader::Image(ImagePattern {
                image: Arc::new(hatch_tile(foreground, background)),
                spread: SpreadMode::Repeat,
                transform: DAffine2::from_translation(bounds.origin().to_vec()),
            }),
            effect: None,
        })
    }

    fn texture_fill(&mut self, style: &StyleDescriptor, bounds: RectPx) -> Option<Paint> {
        let name = style.image.as_deref()?;
        let image = self.load_image(name, style.transparent_color)?;
        let origin = bounds.origin().to_vec();
        let (spread, transform) = match style.wrap {
            ImageWrapMode::Tile => (SpreadMode::Repeat, DAffine2::from_translation(origin)),
            ImageWrapMode::TileFlipX | ImageWrapMode::TileFlipY | ImageWrapMode::TileFlipXY => {
                (SpreadMode::Reflect, DAffine2::from_translation(origin))
            }
            ImageWrapMode::Scaled => (
                SpreadMode::Pad,
                DAffine2::from_translation(origin)
                    * DAffine2::from_scale(glam::dvec2(
                        bounds.width.0 / f64::from(image.width()),
                        bounds.height.0 / f64::from(image.height()),
                    )),
            ),
            ImageWrapMode::Unscaled => {
                let size = self.image_size(&image);
                let at = style.align.place(bounds, size);
                (
                    SpreadMode::Pad,
                    DAffine2::from_translation(at.to_vec())
                        * DAffine2::from_scale(glam::dvec2(
                            size.width.0 / f64::from(image.width()),
                            size.height.0 / f64::from(image.height()),
                        )),
                )
            }
        };
        Some(Paint {
            shader: Shader::Image(ImagePattern {
                image,
                spread,
                transform,
            }),
            effect: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ImageMap, NoImages};
    use crate::types::{Size, ppx, rpx};

    fn resolver() -> StyleResolver {
        StyleResolver::new(Box::new(NoImages), Size::new(Px(100.0), Px(100.0)))
    }

    #[test]
    fn dash_table_scales_with_width() {
        let s = build_stroke(&StrokeDescriptor::new(Color::BLACK, 2.0, DashKind::Dash)).unwrap();
        assert_eq!(s.dash.intervals, vec![10.0, 10.0]);
        assert_eq!(s.dash.phase, 20.0);
        let s = build_stroke(&StrokeDescriptor::new(Color::BLACK, 3.0, DashKind::Dot)).unwrap();
        assert_eq!(s.dash.intervals, vec![3.0, 3.0]);
        assert_eq!(s.dash.phase, 6.0);
        let s = dash_pattern(DashKind::DashDotDot, 1.0);
        assert_eq!(s.intervals.len(), 6);
        assert_eq!(s.phase, 14.0);
    }

    #[test]
    fn suppressed_strokes() {
        assert!(build_stroke(&StrokeDescriptor::new(Color::BLACK, 0.0, DashKind::Solid)).is_none());
        assert!(build_stroke(&StrokeDescriptor::new(Color::BLACK, 2.0, DashKind::NotSet)).is_none());
        assert!(build_stroke(&StrokeDescriptor::default()).is_none());
    }

    #[test]
    fn gradient_color_clamps() {
        let (a, b) = (Color::rgba(0, 100, 200, 50), Color::rgba(100, 200, 0, 255));
        assert_eq!(gradient_color(a, b, -0.1), a);
        assert_eq!(gradient_color(a, b, 1.5), a);
        assert_eq!(gradient_color(a, b, f64::NAN), a);
        assert_eq!(gradient_color(a, b, 0.5), Color::rgba(50, 150, 100, 50));
        assert_eq!(gradient_color(a, b, 1.0), Color::rgba(100, 200, 0, 50));
    }

    #[test]
    fn bright_gradient_ends_black() {
        assert_eq!(bright_gradient_color(Color::rgb(200, 0, 0), 2.0), Color::BLACK);
        assert_eq!(bright_gradient_color(Color::rgb(200, 0, 0), 0.5), Color::rgb(200, 0, 0));
    }

    #[test]
    fn gradient_points_reject_sentinels() {
        let r = rpx(0.0, 0.0, 10.0, 20.0);
        assert!(linear_gradient_points(GradientKind::None, r).is_err());
        assert!(linear_gradient_points(GradientKind::Center, r).is_err());
        assert_eq!(
            linear_gradient_points(GradientKind::HorizontalCenter, r).unwrap(),
            (ppx(0.0, 0.0), ppx(0.0, 10.0))
        );
    }

    #[test]
    fn enum_decoding() {
        assert_eq!(GradientKind::try_from(4).unwrap(), GradientKind::DiagonalLeft);
        assert!(matches!(
            GradientKind::try_from(42),
            Err(RenderError::InvalidOperation { .. })
        ));
        assert_eq!("topbottom".parse::<GradientKind>().unwrap(), GradientKind::TopBottom);
        assert!("sideways".parse::<GradientKind>().is_err());
    }

    #[test]
    fn precedence_hatch_over_gradient() {
        let style = StyleDescriptor::solid(Color::WHITE)
            .with_gradient(GradientKind::LeftRight, Color::BLACK)
            .with_hatch(HatchKind::Cross, None);
        let paint = resolver()
            .build_fill(&style, rpx(0.0, 0.0, 10.0, 10.0), FillTarget::Shape)
            .unwrap()
            .unwrap();
        assert!(matches!(paint.shader, Shader::Image(_)));
    }

    #[test]
    fn pie_prefers_gradient_over_image() {
        let loader = ImageMap::new().with("tex", Image::filled(2, 2, Color::BLACK).unwrap());
        let mut res = StyleResolver::new(Box::new(loader), Size::new(Px(100.0), Px(100.0)));
        let style = StyleDescriptor::solid(Color::WHITE)
            .with_gradient(GradientKind::Center, Color::BLACK)
            .with_image("tex", ImageWrapMode::Tile);
        let bounds = rpx(0.0, 0.0, 40.0, 20.0);
        let pie = res.build_fill(&style, bounds, FillTarget::Pie).unwrap().unwrap();
        match pie.shader {
            Shader::Radial(g) => assert_eq!(g.radius_x, 40.0),
            other => panic!("expected radial, got {other:?}"),
        }
        let rect = res.build_fill(&style, bounds, FillTarget::Shape).unwrap().unwrap();
        assert!(matches!(rect.shader, Shader::Image(_)));
    }

    #[test]
    fn missing_secondary_degrades_to_solid() {
        let style = StyleDescriptor {
            gradient: GradientKind::TopBottom,
            ..StyleDescriptor::solid(Color::WHITE)
        };
        let paint = resolver()
            .build_fill(&style, rpx(0.0, 0.0, 10.0, 10.0), FillTarget::Shape)
            .unwrap();
        assert_eq!(paint, Some(Paint::solid(Color::WHITE)));
    }

    #[test]
    fn no_colour_no_fill() {
        let paint = resolver()
            .build_fill(&StyleDescriptor::default(), rpx(0.0, 0.0, 5.0, 5.0), FillTarget::Shape)
            .unwrap();
        assert!(paint.is_none());
    }

    #[test]
    fn hatch_tile_has_two_diagonals() {
        let tile = hatch_tile(Color::BLACK, Color::WHITE);
        assert_eq!(tile.width(), 20);
        assert_eq!(tile.pixel(3, 3), Some(Color::BLACK));
        assert_eq!(tile.pixel(0, 19), Some(Color::BLACK));
        assert_eq!(tile.pixel(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn keyed_images_are_cached() {
        let loader = ImageMap::new().with("logo", Image::filled(2, 2, Color::WHITE).unwrap());
        let mut res = StyleResolver::new(Box::new(loader), Size::new(Px(100.0), Px(100.0)));
        let a = res.load_image("logo", Some(Color::WHITE)).unwrap();
        let b = res.load_image("logo", Some(Color::WHITE)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn every_failed_load_is_reported() {
        use std::io::Write;
        use std::sync::Mutex;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut res = resolver();
            assert!(res.load_image("missing", None).is_none());
            assert!(res.load_image("missing", Some(Color::WHITE)).is_none());
            let style = StyleDescriptor::solid(Color::WHITE).with_image("missing", ImageWrapMode::Tile);
            let fill = res.build_fill(&style, rpx(0.0, 0.0, 10.0, 10.0), FillTarget::Shape).unwrap();
            assert_eq!(fill.and_then(|p| p.solid_color()), Some(Color::WHITE));
        });
        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("image not found").count(), 3);
    }

    #[test]
    fn unkeyed_images_load_as_is() {
        let loader = ImageMap::new().with("logo", Image::filled(2, 2, Color::WHITE).unwrap());
        let mut res = StyleResolver::new(Box::new(loader), Size::new(Px(100.0), Px(100.0)));
        let image = res.load_image("logo", None).unwrap();
        assert_eq!(image.pixel(0, 0), Some(Color::WHITE));
        assert!(res.load_image("other", None).is_none());
    }

    #[test]
    fn unscaled_image_is_aligned() {
        let loader = ImageMap::new().with("tex", Image::filled(4, 2, Color::BLACK).unwrap());
        let mut res = StyleResolver::new(Box::new(loader), Size::new(Px(100.0), Px(100.0)));
        let style = StyleDescriptor::solid(Color::WHITE)
            .with_image("tex", ImageWrapMode::Unscaled)
            .with_align(ImageAlign::BottomRight);
        let paint = res
            .build_fill(&style, rpx(10.0, 10.0, 20.0, 20.0), FillTarget::Shape)
            .unwrap()
            .unwrap();
        let Shader::Image(p) = paint.shader else {
            panic!("expected pattern");
        };
        assert_eq!(p.spread, SpreadMode::Pad);
        assert_eq!(p.transform.translation, glam::dvec2(26.0, 28.0));
    }
}
