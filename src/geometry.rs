//! Geometry helpers: rotations, marker polygons and region clipping.
//!
//! Angles are in degrees. Positive angles turn clockwise on screen because the
//! y axis points down.

use glam::{DAffine2, DVec2, dvec2};

use crate::types::{Point, Px, PtPx, Rect, RectPx, ppx};

/// Affine rotation by `degrees` around `pivot`
pub fn rotation_at(degrees: f64, pivot: PtPx) -> DAffine2 {
    let p = pivot.to_vec();
    DAffine2::from_translation(p)
        * DAffine2::from_angle(degrees.to_radians())
        * DAffine2::from_translation(-p)
}

/// Rotate a single point around `pivot`
pub fn rotate_about(point: PtPx, pivot: PtPx, degrees: f64) -> PtPx {
    PtPx::from_vec(rotation_at(degrees, pivot).transform_point2(point.to_vec()))
}

/// Apply an affine transform to every point
pub fn transform_points(points: &[PtPx], m: DAffine2) -> Vec<PtPx> {
    points
        .iter()
        .map(|p| PtPx::from_vec(m.transform_point2(p.to_vec())))
        .collect()
}

/// Translate every point by the same offset
pub fn translate_points(points: &[PtPx], dx: f64, dy: f64) -> Vec<PtPx> {
    points.iter().map(|p| p.offset(Px(dx), Px(dy))).collect()
}

/// Polygon approximation of a circle: the top-centre point rotated around the
/// centre in `360 / sectors` steps.
pub fn regular_polygon(rect: RectPx, sectors: u32) -> Vec<PtPx> {
    let center = rect.center();
    let top = Point::new(center.x, rect.top());
    let step = 360.0 / f64::from(sectors.max(1));
    (0..sectors)
        .map(|i| rotate_about(top, center, f64::from(i) * step))
        .collect()
}

/// Star outline with `corners` points: `2 * corners` vertices alternating between
/// the outer radius and half of it.
pub fn star_polygon(rect: RectPx, corners: u32) -> Vec<PtPx> {
    let count = corners * 2;
    let center = rect.center();
    let outer = Point::new(center.x, rect.top());
    let inner = Point::new(center.x, rect.top() + rect.height / 4.0);
    let step = 360.0 / f64::from(count.max(1));
    (0..count)
        .map(|i| {
            let template = if i % 2 == 0 { outer } else { inner };
            rotate_about(template, center, f64::from(i) * step)
        })
        .collect()
}

/// Diagonal cross ("x") outline: a plus sign with `ceil(size / 4)` wide arms,
/// turned 45 degrees around `center`.
pub fn cross_polygon(center: PtPx, size: f64) -> Vec<PtPx> {
    let arm = (size / 4.0).ceil() / 2.0;
    let half = size / 2.0;
    let (cx, cy) = (center.x.0, center.y.0);
    let plus = [
        ppx(cx - half, cy + arm),
        ppx(cx - half, cy - arm),
        ppx(cx - arm, cy - arm),
        ppx(cx - arm, cy - half),
        ppx(cx + arm, cy - half),
        ppx(cx + arm, cy - arm),
        ppx(cx + half, cy - arm),
        ppx(cx + half, cy + arm),
        ppx(cx + arm, cy + arm),
        ppx(cx + arm, cy + half),
        ppx(cx - arm, cy + half),
        ppx(cx - arm, cy + arm),
    ];
    transform_points(&plus, rotation_at(45.0, center))
}

/// Diamond touching the midpoints of the rectangle's edges
pub fn diamond_polygon(rect: RectPx) -> Vec<PtPx> {
    let c = rect.center();
    vec![
        Point::new(rect.left(), c.y),
        Point::new(c.x, rect.top()),
        Point::new(rect.right(), c.y),
        Point::new(c.x, rect.bottom()),
    ]
}

/// Upward triangle inscribed in the rectangle
pub fn triangle_polygon(rect: RectPx) -> Vec<PtPx> {
    vec![
        Point::new(rect.left(), rect.bottom()),
        Point::new(rect.center().x, rect.top()),
        Point::new(rect.right(), rect.bottom()),
    ]
}

/// Axis-aligned bounds of a point set
pub fn points_bounds(points: &[PtPx]) -> Option<RectPx> {
    let first = points.first()?;
    let (mut min, mut max) = (first.to_vec(), first.to_vec());
    for p in &points[1..] {
        min = min.min(p.to_vec());
        max = max.max(p.to_vec());
    }
    Some(Rect::from_corners(PtPx::from_vec(min), PtPx::from_vec(max)))
}

/// Shoelace area (absolute)
pub fn polygon_area(points: &[PtPx]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.x.0 * b.y.0 - b.x.0 * a.y.0;
    }
    (twice / 2.0).abs()
}

/// A half-plane bounded by a vertical or horizontal line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalfPlane {
    /// Points with `x <= value`
    LeftOf(f64),
    /// Points with `x >= value`
    RightOf(f64),
    /// Points with `y <= value`
    Above(f64),
    /// Points with `y >= value`
    Below(f64),
}

impl HalfPlane {
    fn signed_distance(self, p: DVec2) -> f64 {
        match self {
            HalfPlane::LeftOf(x) => x - p.x,
            HalfPlane::RightOf(x) => p.x - x,
            HalfPlane::Above(y) => y - p.y,
            HalfPlane::Below(y) => p.y - y,
        }
    }
}

/// Sutherland–Hodgman clip of a polygon against one half-plane
pub fn clip_polygon(points: &[PtPx], plane: HalfPlane) -> Vec<PtPx> {
    let mut out = Vec::with_capacity(points.len() + 2);
    if points.is_empty() {
        return out;
    }
    let mut prev = points[points.len() - 1].to_vec();
    let mut prev_d = plane.signed_distance(prev);
    for p in points {
        let cur = p.to_vec();
        let cur_d = plane.signed_distance(cur);
        if cur_d >= 0.0 {
            if prev_d < 0.0 {
                out.push(PtPx::from_vec(intersect(prev, cur, prev_d, cur_d)));
            }
            out.push(*p);
        } else if prev_d >= 0.0 {
            out.push(PtPx::from_vec(intersect(prev, cur, prev_d, cur_d)));
        }
        prev = cur;
        prev_d = cur_d;
    }
    out
}

fn intersect(a: DVec2, b: DVec2, da: f64, db: f64) -> DVec2 {
    let t = da / (da - db);
    a + (b - a) * t
}

/// Area below which a clipped remainder counts as empty
const REMAINDER_EPSILON: f64 = 1e-6;

/// Bounds of `polygon` minus `boundary`, or `None` when the polygon lies
/// entirely inside the boundary.
///
/// The outside of a rectangle is the union of four half-planes, so the bounds
/// of the difference are the union of the bounds of the four clipped pieces.
pub fn remainder_bounds(polygon: &[PtPx], boundary: RectPx) -> Option<RectPx> {
    let planes = [
        HalfPlane::LeftOf(boundary.left().0),
        HalfPlane::RightOf(boundary.right().0),
        HalfPlane::Above(boundary.top().0),
        HalfPlane::Below(boundary.bottom().0),
    ];
    planes
        .iter()
        .map(|plane| clip_polygon(polygon, *plane))
        .filter(|piece| polygon_area(piece) > REMAINDER_EPSILON)
        .filter_map(|piece| points_bounds(&piece))
        .reduce(|a, b| a.union(&b))
}

/// Unit vector pointing along `degrees` (0 = +x, clockwise positive)
pub fn direction(degrees: f64) -> DVec2 {
    let r = degrees.to_radians();
    dvec2(r.cos(), r.sin())
}
