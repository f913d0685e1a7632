//! Tuning constants for fills, finishes, shadows and marks (all in pixels
//! unless stated otherwise)

use crate::types::Color;

/// Side of the square hatch tile
pub const HATCH_UNIT: u32 = 20;

/// Soft rectangle shadow corner radius: `offset * factor`, at least the minimum
pub const SHADOW_RADIUS_FACTOR: f64 = 0.7;
pub const SHADOW_RADIUS_MIN: f64 = 2.0;
/// Blur sigma of a soft shadow relative to its offset
pub const SHADOW_BLUR_FACTOR: f64 = 0.5;
/// Soft circle shadows grow by this much on every side
pub const CIRCLE_SHADOW_INSET: f64 = 1.0;

/// Cylinder finish: each band spans this share of the bar's thickness
pub const CYLINDER_BAND: f64 = 0.3;
pub const CYLINDER_LIGHT: Color = Color::rgba(255, 255, 255, 120);
pub const CYLINDER_DARK: Color = Color::rgba(0, 0, 0, 150);

/// Emboss margins by the smaller rectangle dimension
pub const EMBOSS_SMALL: f64 = 6.0;
pub const EMBOSS_MEDIUM: f64 = 15.0;
pub const EMBOSS_LIGHT: Color = Color::rgba(255, 255, 255, 100);
pub const EMBOSS_DARK: Color = Color::rgba(0, 0, 0, 80);

/// Light-to-dark finish: outer third on each edge
pub const LIGHT_TO_DARK_BAND: f64 = 1.0 / 3.0;
pub const LIGHT_TO_DARK_LIGHT: Color = Color::rgba(255, 255, 255, 120);
pub const LIGHT_TO_DARK_DARK: Color = Color::rgba(0, 0, 0, 120);

/// Wedge finish
pub const WEDGE_MAX_SIZE: f64 = 15.0;
pub const WEDGE_SHADE_LIGHT: Color = Color::rgba(0, 0, 0, 40);
pub const WEDGE_SHADE_DARK: Color = Color::rgba(0, 0, 0, 90);
pub const WEDGE_EDGE_LIGHT: Color = Color::rgba(255, 255, 255, 100);
pub const WEDGE_EDGE_DARK: Color = Color::rgba(0, 0, 0, 100);

/// 3D circle: light comes from slightly left of straight up
pub const CIRCLE_LIGHT_SKEW: f64 = 10.0;
/// Angle correction for the sector next to the bottom of a five-sector circle
pub const FIVE_SECTOR_SEAM: f64 = 0.8;
/// Sector size used when a 3D circle is asked for two sectors or fewer
pub const FINE_SECTOR_DEGREES: f64 = 1.0;

/// Concave pie: inset of the shaded sector relative to the radius
pub const CONCAVE_INSET_RATIO: f64 = 0.05;
pub const CONCAVE_DARK: Color = Color::rgba(0, 0, 0, 100);
pub const CONCAVE_LIGHT: Color = Color::rgba(255, 255, 255, 120);

/// Soft edge pie: band width relative to the radius
pub const SOFT_EDGE_RATIO: f64 = 0.15;
pub const SOFT_EDGE_COLOR: Color = Color::rgba(0, 0, 0, 80);

/// Gap between a label and the short tick of a line-side row mark
pub const ROW_MARK_SPACING: f64 = 3.0;
