//! Boundary-aware shortening of rotated labels.
//!
//! The label rectangle is rotated about its pivot and clipped against the
//! boundary. When part of it remains outside, the end far from the pivot is
//! pulled back along the text direction until its corners sit on the
//! boundary.

use glam::DVec2;

use crate::geometry::{direction, remainder_bounds, rotation_at, transform_points};
use crate::log::debug;
use crate::types::{Point, Px, PtPx, RectPx};

/// Smallest direction component a boundary edge can be approached along
const MIN_COMPONENT: f64 = 1e-9;

/// A shortened label rectangle, still in the unrotated text frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Truncation {
    pub rect: RectPx,
    pub left: bool,
    pub right: bool,
}

/// Length the far end has to move back along `far` so that `corner` is no
/// longer past any edge of `boundary`
fn pull_back(corner: DVec2, far: DVec2, boundary: RectPx) -> f64 {
    let excess = [
        (boundary.left().0 - corner.x, -far.x),
        (corner.x - boundary.right().0, far.x),
        (boundary.top().0 - corner.y, -far.y),
        (corner.y - boundary.bottom().0, far.y),
    ];
    excess
        .into_iter()
        .filter(|&(past, toward)| past > 0.0 && toward > MIN_COMPONENT)
        .map(|(past, toward)| past / toward)
        .fold(0.0, f64::max)
}

/// Shorten `text_rect` (unrotated, turned by `angle` about `pivot` when drawn)
/// so that it stays inside `boundary`. `None` when nothing sticks out or
/// cutting the far end would not help.
pub fn truncate_to_boundary(
    text_rect: RectPx,
    pivot: PtPx,
    angle: f64,
    boundary: RectPx,
) -> Option<Truncation> {
    let rotation = rotation_at(angle, pivot);
    let rotated = transform_points(&text_rect.corners(), rotation);
    remainder_bounds(&rotated, boundary)?;

    // The far end is the one the rectangle extends towards from the pivot.
    let outward = if text_rect.center().x >= pivot.x { 1.0 } else { -1.0 };
    let far = direction(angle) * outward;
    let end = if outward > 0.0 { text_rect.right() } else { text_rect.left() };
    let far_corners = transform_points(
        &[Point::new(end, text_rect.top()), Point::new(end, text_rect.bottom())],
        rotation,
    );
    let loss = far_corners
        .iter()
        .map(|corner| pull_back(corner.to_vec(), far, boundary))
        .fold(0.0, f64::max)
        .min(text_rect.width.0);
    if loss <= 0.0 {
        return None;
    }

    let mut rect = text_rect;
    rect.width -= Px(loss);
    if outward < 0.0 {
        rect.x += Px(loss);
    }
    let left = far.x < 0.0;
    debug!(loss, left, "label truncated at boundary");
    Some(Truncation {
        rect,
        left,
        right: !left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ppx, rpx};

    #[test]
    fn inside_boundary_is_untouched() {
        let rect = rpx(50.0, 45.0, 20.0, 10.0);
        let got = truncate_to_boundary(rect, ppx(50.0, 50.0), 45.0, rpx(0.0, 0.0, 100.0, 100.0));
        assert_eq!(got, None);
    }

    fn drawn_corners(rect: RectPx, pivot: PtPx, angle: f64) -> Vec<PtPx> {
        transform_points(&rect.corners(), rotation_at(angle, pivot))
    }

    #[test]
    fn cuts_the_far_end_going_right() {
        // runs from the pivot down-right and leaves through the bottom
        let rect = rpx(50.0, 45.0, 80.0, 10.0);
        let pivot = ppx(50.0, 50.0);
        let got = truncate_to_boundary(rect, pivot, 45.0, rpx(0.0, 0.0, 100.0, 100.0))
            .expect("overflows");
        assert!(got.right && !got.left);
        assert_eq!(got.rect.x, Px(50.0));
        let exact = 85.0 - 50.0 * std::f64::consts::SQRT_2;
        assert!((got.rect.width.0 - (80.0 - exact)).abs() < 1e-6, "{:?}", got.rect);
        let corners = drawn_corners(got.rect, pivot, 45.0);
        let max_y = corners.iter().map(|p| p.y.0).fold(f64::MIN, f64::max);
        let max_x = corners.iter().map(|p| p.x.0).fold(f64::MIN, f64::max);
        assert!((max_y - 100.0).abs() < 1e-6, "max y {max_y}");
        assert!(max_x <= 100.0 + 1e-6, "max x {max_x}");
    }

    #[test]
    fn crossing_one_edge_cuts_only_what_is_past_it() {
        // shallow angle: only the bottom edge is crossed
        let rect = rpx(50.0, 45.0, 40.0, 10.0);
        let pivot = ppx(50.0, 50.0);
        let boundary = rpx(0.0, 0.0, 200.0, 60.0);
        let got = truncate_to_boundary(rect, pivot, 30.0, boundary).expect("overflows");
        let corners = drawn_corners(got.rect, pivot, 30.0);
        let max_y = corners.iter().map(|p| p.y.0).fold(f64::MIN, f64::max);
        assert!((max_y - 60.0).abs() < 1e-6, "max y {max_y}");
    }

    #[test]
    fn near_end_overflow_is_left_alone() {
        // only the corner at the pivot end sticks out past the top
        let rect = rpx(50.0, 45.0, 20.0, 10.0);
        let got = truncate_to_boundary(rect, ppx(50.0, 50.0), 45.0, rpx(0.0, 48.0, 200.0, 200.0));
        assert_eq!(got, None);
    }

    #[test]
    fn cuts_the_far_end_going_left() {
        // ends at the pivot, so the far end is on the left
        let rect = rpx(-30.0, 45.0, 80.0, 10.0);
        let got = truncate_to_boundary(rect, ppx(50.0, 50.0), -45.0, rpx(0.0, 0.0, 100.0, 100.0))
            .expect("overflows");
        assert!(got.left && !got.right);
        assert!(got.rect.x.0 > -30.0);
        assert!((got.rect.right().0 - 50.0).abs() < 1e-9);
    }
}
