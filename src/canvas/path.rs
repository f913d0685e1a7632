//! Vector paths in absolute pixels.
//!
//! Only four verbs exist. Elliptic arcs are split into cubic segments of at
//! most 90 degrees each, so every backend can consume the same path.

use glam::{DAffine2, DVec2, dvec2};

use crate::geometry::{direction, points_bounds};
use crate::types::{PtPx, RectPx};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathVerb {
    MoveTo(PtPx),
    LineTo(PtPx),
    CubicTo(PtPx, PtPx, PtPx),
    Close,
}

/// A sequence of subpaths, built with the fluent methods below.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
    current: Option<PtPx>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn move_to(mut self, p: PtPx) -> Self {
        self.verbs.push(PathVerb::MoveTo(p));
        self.current = Some(p);
        self
    }

    /// Starts a subpath when none is open
    pub fn line_to(mut self, p: PtPx) -> Self {
        if self.current.is_none() {
            return self.move_to(p);
        }
        self.verbs.push(PathVerb::LineTo(p));
        self.current = Some(p);
        self
    }

    pub fn cubic_to(mut self, c1: PtPx, c2: PtPx, p: PtPx) -> Self {
        if self.current.is_none() {
            self = self.move_to(c1);
        }
        self.verbs.push(PathVerb::CubicTo(c1, c2, p));
        self.current = Some(p);
        self
    }

    pub fn close(mut self) -> Self {
        if self.current.is_some() {
            self.verbs.push(PathVerb::Close);
        }
        self.current = None;
        self
    }

    /// Elliptic arc on the ellipse inscribed in `rect`, from `start` sweeping
    /// `sweep` degrees (clockwise positive). Connects to the current point with
    /// a line, or opens a new subpath.
    pub fn arc(mut self, rect: RectPx, start: f64, sweep: f64) -> Self {
        let center = rect.center().to_vec();
        let radii = dvec2(rect.width.0 / 2.0, rect.height.0 / 2.0);
        let at = |deg: f64| center + direction(deg) * radii;

        self = self.line_to(PtPx::from_vec(at(start)));
        if sweep == 0.0 {
            return self;
        }

        let segments = (sweep.abs() / 90.0).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        for i in 0..segments {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
            let tangent = |deg: f64| {
                let r = deg.to_radians();
                dvec2(-r.sin(), r.cos()) * radii
            };
            let p0 = at(a0);
            let p3 = at(a1);
            let c1 = p0 + tangent(a0) * k;
            let c2 = p3 - tangent(a1) * k;
            self = self.cubic_to(
                PtPx::from_vec(c1),
                PtPx::from_vec(c2),
                PtPx::from_vec(p3),
            );
        }
        self
    }

    /// Closed polygon; fewer than two points yields an empty path.
    pub fn polygon(points: &[PtPx]) -> Self {
        Self::polyline(points).close()
    }

    pub fn polyline(points: &[PtPx]) -> Self {
        if points.len() < 2 {
            return Path::new();
        }
        points.iter().fold(Path::new(), |path, p| path.line_to(*p))
    }

    pub fn rect(rect: RectPx) -> Self {
        Self::polygon(&rect.corners())
    }

    pub fn rounded_rect(rect: RectPx, radius: f64) -> Self {
        let r = radius.min(rect.width.0 / 2.0).min(rect.height.0 / 2.0);
        if r <= 0.0 {
            return Self::rect(rect);
        }
        let (l, t, rt, b) = (rect.left().0, rect.top().0, rect.right().0, rect.bottom().0);
        let corner = |x: f64, y: f64| crate::types::rpx(x, y, 2.0 * r, 2.0 * r);
        Path::new()
            .arc(corner(l, t), 180.0, 90.0)
            .arc(corner(rt - 2.0 * r, t), 270.0, 90.0)
            .arc(corner(rt - 2.0 * r, b - 2.0 * r), 0.0, 90.0)
            .arc(corner(l, b - 2.0 * r), 90.0, 90.0)
            .close()
    }

    pub fn ellipse(rect: RectPx) -> Self {
        Path::new().arc(rect, 0.0, 360.0).close()
    }

    /// Pie sector: centre, arc, back to centre. A sweep of a full turn or more
    /// is the whole ellipse.
    pub fn pie(rect: RectPx, start: f64, sweep: f64) -> Self {
        if sweep.abs() >= 360.0 {
            return Self::ellipse(rect);
        }
        Path::new()
            .move_to(rect.center())
            .arc(rect, start, sweep)
            .close()
    }

    /// Ring sector between two concentric ellipses. The inner arc runs
    /// backwards so the hole survives non-zero winding.
    pub fn ring_sector(outer: RectPx, inner: RectPx, start: f64, sweep: f64) -> Self {
        if sweep.abs() >= 360.0 {
            return Path::new()
                .arc(outer, 0.0, 360.0)
                .close()
                .arc(inner, 360.0, -360.0)
                .close();
        }
        Path::new()
            .arc(outer, start, sweep)
            .arc(inner, start + sweep, -sweep)
            .close()
    }

    /// Every point the path touches, control points included
    pub fn points(&self) -> Vec<PtPx> {
        let mut out = Vec::with_capacity(self.verbs.len() * 3);
        for verb in &self.verbs {
            match *verb {
                PathVerb::MoveTo(p) | PathVerb::LineTo(p) => out.push(p),
                PathVerb::CubicTo(a, b, c) => out.extend([a, b, c]),
                PathVerb::Close => {}
            }
        }
        out
    }

    /// Conservative bounds (control hull)
    pub fn bounds(&self) -> Option<RectPx> {
        points_bounds(&self.points())
    }

    pub fn transformed(&self, m: DAffine2) -> Self {
        let map = |p: PtPx| PtPx::from_vec(m.transform_point2(p.to_vec()));
        let verbs = self
            .verbs
            .iter()
            .map(|verb| match *verb {
                PathVerb::MoveTo(p) => PathVerb::MoveTo(map(p)),
                PathVerb::LineTo(p) => PathVerb::LineTo(map(p)),
                PathVerb::CubicTo(a, b, c) => PathVerb::CubicTo(map(a), map(b), map(c)),
                PathVerb::Close => PathVerb::Close,
            })
            .collect();
        Path {
            verbs,
            current: self.current.map(map),
        }
    }

    /// Flatten into closed polygons (one per subpath), sampling cubics.
    pub fn to_polygons(&self) -> Vec<Vec<PtPx>> {
        const STEPS: usize = 8;
        let mut out = Vec::new();
        let mut poly: Vec<DVec2> = Vec::new();
        let mut last = DVec2::ZERO;
        let flush = |poly: &mut Vec<DVec2>, out: &mut Vec<Vec<PtPx>>| {
            if poly.len() > 2 {
                out.push(poly.iter().map(|v| PtPx::from_vec(*v)).collect());
            }
            poly.clear();
        };
        for verb in &self.verbs {
            match *verb {
                PathVerb::MoveTo(p) => {
                    flush(&mut poly, &mut out);
                    last = p.to_vec();
                    poly.push(last);
                }
                PathVerb::LineTo(p) => {
                    last = p.to_vec();
                    poly.push(last);
                }
                PathVerb::CubicTo(a, b, c) => {
                    let (p0, p1, p2, p3) = (last, a.to_vec(), b.to_vec(), c.to_vec());
                    for i in 1..=STEPS {
                        let t = i as f64 / STEPS as f64;
                        let u = 1.0 - t;
                        poly.push(
                            p0 * (u * u * u)
                                + p1 * (3.0 * u * u * t)
                                + p2 * (3.0 * u * t * t)
                                + p3 * (t * t * t),
                        );
                    }
                    last = p3;
                }
                PathVerb::Close => flush(&mut poly, &mut out),
            }
        }
        flush(&mut poly, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ppx, rpx};

    #[test]
    fn polygon_closes() {
        let p = Path::polygon(&[ppx(0.0, 0.0), ppx(10.0, 0.0), ppx(10.0, 10.0)]);
        assert_eq!(p.verbs().len(), 4);
        assert_eq!(p.verbs()[3], PathVerb::Close);
        assert!(Path::polygon(&[ppx(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn arc_splits_into_quarter_segments() {
        let p = Path::ellipse(rpx(0.0, 0.0, 20.0, 10.0));
        let cubics = p
            .verbs()
            .iter()
            .filter(|v| matches!(v, PathVerb::CubicTo(..)))
            .count();
        assert_eq!(cubics, 4);
    }

    #[test]
    fn ellipse_bounds_match_rect() {
        let b = Path::ellipse(rpx(5.0, 5.0, 20.0, 10.0)).bounds().unwrap();
        assert!((b.left().0 - 5.0).abs() < 1e-9);
        assert!((b.right().0 - 25.0).abs() < 1e-9);
        assert!((b.top().0 - 5.0).abs() < 1e-9);
        assert!((b.bottom().0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn pie_starts_at_center() {
        let p = Path::pie(rpx(0.0, 0.0, 10.0, 10.0), 0.0, 90.0);
        assert_eq!(p.verbs()[0], PathVerb::MoveTo(ppx(5.0, 5.0)));
        match p.verbs()[1] {
            PathVerb::LineTo(pt) => {
                assert!((pt.x.0 - 10.0).abs() < 1e-9 && (pt.y.0 - 5.0).abs() < 1e-9)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ring_has_two_subpaths_when_full() {
        let p = Path::ring_sector(rpx(0.0, 0.0, 20.0, 20.0), rpx(5.0, 5.0, 10.0, 10.0), 0.0, 360.0);
        let moves = p
            .verbs()
            .iter()
            .filter(|v| matches!(v, PathVerb::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(p.to_polygons().len(), 2);
    }
}
