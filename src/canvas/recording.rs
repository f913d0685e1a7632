//! A canvas that records calls instead of painting.
//!
//! Used as the mock surface in tests and by callers that want to replay or
//! inspect a render pass.

use std::fmt;

use glam::DAffine2;

use super::{Canvas, ClipRegion, Effect, Font, Image, Paint, Path, Stroke, TextFormat};
use crate::types::{Color, PtPx, RectPx, SizePx};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetTransform(DAffine2),
    SetClip(Option<ClipRegion>),
    SetAntiAlias(bool),
    Line {
        from: PtPx,
        to: PtPx,
        stroke: Stroke,
    },
    StrokeRect {
        rect: RectPx,
        stroke: Stroke,
    },
    FillRect {
        rect: RectPx,
        paint: Paint,
    },
    StrokeEllipse {
        rect: RectPx,
        stroke: Stroke,
    },
    FillEllipse {
        rect: RectPx,
        paint: Paint,
    },
    StrokePolygon {
        points: Vec<PtPx>,
        stroke: Stroke,
    },
    FillPolygon {
        points: Vec<PtPx>,
        paint: Paint,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
    },
    FillPath {
        path: Path,
        paint: Paint,
    },
    StrokePie {
        rect: RectPx,
        start: f64,
        sweep: f64,
        stroke: Stroke,
    },
    FillPie {
        rect: RectPx,
        start: f64,
        sweep: f64,
        paint: Paint,
    },
    Text {
        text: String,
        font: Font,
        rect: RectPx,
        format: TextFormat,
        color: Color,
    },
    Image {
        width: u32,
        height: u32,
        dest: RectPx,
        effect: Option<Effect>,
    },
}

impl Command {
    pub fn is_fill(&self) -> bool {
        self.paint().is_some()
    }

    pub fn is_stroke(&self) -> bool {
        self.stroke().is_some()
    }

    pub fn paint(&self) -> Option<&Paint> {
        match self {
            Command::FillRect { paint, .. }
            | Command::FillEllipse { paint, .. }
            | Command::FillPolygon { paint, .. }
            | Command::FillPath { paint, .. }
            | Command::FillPie { paint, .. } => Some(paint),
            _ => None,
        }
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        match self {
            Command::Line { stroke, .. }
            | Command::StrokeRect { stroke, .. }
            | Command::StrokeEllipse { stroke, .. }
            | Command::StrokePolygon { stroke, .. }
            | Command::StrokePath { stroke, .. }
            | Command::StrokePie { stroke, .. } => Some(stroke),
            _ => None,
        }
    }

    /// Whether this command paints anything (as opposed to changing state)
    pub fn is_draw(&self) -> bool {
        !matches!(
            self,
            Command::SetTransform(_) | Command::SetClip(_) | Command::SetAntiAlias(_)
        )
    }
}

/// One recorded call with the state it was issued under
#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub command: Command,
    pub transform: DAffine2,
    pub clipped: bool,
    pub anti_alias: bool,
}

#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: SizePx,
    transform: DAffine2,
    clip: Option<ClipRegion>,
    anti_alias: bool,
    log: Vec<Recorded>,
}

impl RecordingCanvas {
    pub fn new(size: SizePx) -> Self {
        RecordingCanvas {
            size,
            transform: DAffine2::IDENTITY,
            clip: None,
            anti_alias: true,
            log: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Recorded] {
        &self.log
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.log.iter().map(|r| &r.command)
    }

    /// Drawing commands only, state changes skipped
    pub fn draws(&self) -> Vec<&Recorded> {
        self.log.iter().filter(|r| r.command.is_draw()).collect()
    }

    pub fn fill_count(&self) -> usize {
        self.commands().filter(|c| c.is_fill()).count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands().filter(|c| c.is_stroke()).count()
    }

    pub fn text_count(&self) -> usize {
        self.commands()
            .filter(|c| matches!(c, Command::Text { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn push(&mut self, command: Command) {
        self.log.push(Recorded {
            command,
            transform: self.transform,
            clipped: self.clip.is_some(),
            anti_alias: self.anti_alias,
        });
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> SizePx {
        self.size
    }

    fn transform(&self) -> DAffine2 {
        self.transform
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
        self.push(Command::SetTransform(transform));
    }

    fn clip(&self) -> Option<ClipRegion> {
        self.clip.clone()
    }

    fn set_clip(&mut self, clip: Option<ClipRegion>) {
        self.clip = clip.clone();
        self.push(Command::SetClip(clip));
    }

    fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    fn set_anti_alias(&mut self, on: bool) {
        self.anti_alias = on;
        self.push(Command::SetAntiAlias(on));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.push(Command::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: &Path, stroke: &Stroke) {
        self.push(Command::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &Font,
        rect: RectPx,
        format: &TextFormat,
        color: Color,
    ) {
        self.push(Command::Text {
            text: text.to_string(),
            font: font.clone(),
            rect,
            format: *format,
            color,
        });
    }

    fn draw_image(&mut self, image: &Image, dest: RectPx, effect: Option<&Effect>) {
        self.push(Command::Image {
            width: image.width(),
            height: image.height(),
            dest,
            effect: effect.copied(),
        });
    }

    fn draw_line(&mut self, from: PtPx, to: PtPx, stroke: &Stroke) {
        self.push(Command::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn draw_rect(&mut self, rect: RectPx, stroke: &Stroke) {
        self.push(Command::StrokeRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn fill_rect(&mut self, rect: RectPx, paint: &Paint) {
        self.push(Command::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_ellipse(&mut self, rect: RectPx, stroke: &Stroke) {
        self.push(Command::StrokeEllipse {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn fill_ellipse(&mut self, rect: RectPx, paint: &Paint) {
        self.push(Command::FillEllipse {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_polygon(&mut self, points: &[PtPx], stroke: &Stroke) {
        self.push(Command::StrokePolygon {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[PtPx], paint: &Paint) {
        self.push(Command::FillPolygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn draw_pie(&mut self, rect: RectPx, start: f64, sweep: f64, stroke: &Stroke) {
        self.push(Command::StrokePie {
            rect,
            start,
            sweep,
            stroke: stroke.clone(),
        });
    }

    fn fill_pie(&mut self, rect: RectPx, start: f64, sweep: f64, paint: &Paint) {
        self.push(Command::FillPie {
            rect,
            start,
            sweep,
            paint: paint.clone(),
        });
    }
}

struct R(RectPx);

impl fmt::Display for R {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {}x{}",
            self.0.x, self.0.y, self.0.width, self.0.height
        )
    }
}

fn shader_name(paint: &Paint) -> String {
    let base = match &paint.shader {
        super::Shader::Solid(c) => c.to_string(),
        super::Shader::Linear(_) => "linear".to_string(),
        super::Shader::Radial(_) => "radial".to_string(),
        super::Shader::Image(_) => "pattern".to_string(),
    };
    match paint.effect {
        Some(Effect::Blur { .. }) => format!("{base} blur"),
        Some(Effect::DropShadow { .. }) => format!("{base} drop-shadow"),
        None => base,
    }
}

fn stroke_name(stroke: &Stroke) -> String {
    let dash = if stroke.dash.is_continuous() {
        ""
    } else {
        " dashed"
    };
    format!("{} w{}{dash}", stroke.color, stroke.width)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetTransform(m) => {
                if *m == DAffine2::IDENTITY {
                    write!(f, "transform identity")
                } else {
                    write!(f, "transform")
                }
            }
            Command::SetClip(c) => match c {
                Some(region) => write!(f, "clip {}", region.shapes().len()),
                None => write!(f, "clip none"),
            },
            Command::SetAntiAlias(on) => write!(f, "anti-alias {on}"),
            Command::Line { from, to, stroke } => write!(
                f,
                "line {},{} -> {},{} {}",
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_name(stroke)
            ),
            Command::StrokeRect { rect, stroke } => {
                write!(f, "stroke-rect {} {}", R(*rect), stroke_name(stroke))
            }
            Command::FillRect { rect, paint } => {
                write!(f, "fill-rect {} {}", R(*rect), shader_name(paint))
            }
            Command::StrokeEllipse { rect, stroke } => {
                write!(f, "stroke-ellipse {} {}", R(*rect), stroke_name(stroke))
            }
            Command::FillEllipse { rect, paint } => {
                write!(f, "fill-ellipse {} {}", R(*rect), shader_name(paint))
            }
            Command::StrokePolygon { points, stroke } => write!(
                f,
                "stroke-polygon {} {}",
                points.len(),
                stroke_name(stroke)
            ),
            Command::FillPolygon { points, paint } => {
                write!(f, "fill-polygon {} {}", points.len(), shader_name(paint))
            }
            Command::StrokePath { path, stroke } => write!(
                f,
                "stroke-path {} {}",
                path.verbs().len(),
                stroke_name(stroke)
            ),
            Command::FillPath { path, paint } => {
                write!(f, "fill-path {} {}", path.verbs().len(), shader_name(paint))
            }
            Command::StrokePie {
                rect,
                start,
                sweep,
                stroke,
            } => write!(
                f,
                "stroke-pie {} {start}+{sweep} {}",
                R(*rect),
                stroke_name(stroke)
            ),
            Command::FillPie {
                rect,
                start,
                sweep,
                paint,
            } => write!(
                f,
                "fill-pie {} {start}+{sweep} {}",
                R(*rect),
                shader_name(paint)
            ),
            Command::Text {
                text, rect, color, ..
            } => write!(f, "text {text:?} {} {color}", R(*rect)),
            Command::Image {
                width,
                height,
                dest,
                ..
            } => write!(f, "image {width}x{height} {}", R(*dest)),
        }
    }
}

/// One command per line
impl fmt::Display for RecordingCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rec in &self.log {
            writeln!(f, "{}", rec.command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Px, Size, rpx};

    #[test]
    fn counts_and_dump() {
        let mut c = RecordingCanvas::new(Size::new(Px(100.0), Px(100.0)));
        c.fill_rect(rpx(1.0, 2.0, 3.0, 4.0), &Paint::solid(Color::WHITE));
        c.draw_rect(rpx(1.0, 2.0, 3.0, 4.0), &Stroke::solid(Color::BLACK, 1.0));
        c.set_anti_alias(false);
        assert_eq!(c.fill_count(), 1);
        assert_eq!(c.stroke_count(), 1);
        insta::assert_snapshot!(c.to_string().trim_end(), @r"
        fill-rect 1,2 3x4 #ffffff
        stroke-rect 1,2 3x4 #000000 w1
        anti-alias false
        ");
        c.clear();
        assert_eq!(c.records().len(), 0);
    }

    #[test]
    fn records_state_with_each_draw() {
        let mut c = RecordingCanvas::new(Size::new(Px(10.0), Px(10.0)));
        let m = DAffine2::from_translation(glam::dvec2(3.0, 4.0));
        c.set_transform(m);
        c.fill_ellipse(rpx(0.0, 0.0, 2.0, 2.0), &Paint::solid(Color::BLACK));
        let draws = c.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].transform, m);
        assert!(!draws[0].clipped);
    }
}
