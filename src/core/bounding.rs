//=========================================================================
// Bounding Volumes
//=========================================================================
//
// Closed set of intersection-only volumes and their pairwise test.
//
// Intersection matrix (symmetric, every cell is one match arm below):
//
// ```text
//            None   Point        Circle          Box
//   None     false  false        false           false
//   Point           equal        dist <= r       inside (inclusive)
//   Circle                       dist <= r1+r2   center-in / corner-in /
//                                                edge proximity
//   Box                                          corner containment
// ```
//
// Coordinate convention: y grows upwards. A box is given by its top-left
// and bottom-right corners with `top_left.y >= bottom_right.y`, so "top"
// is the numerically larger y. Hosts with a y-down screen space must flip
// before building boxes.
//
// Box vs Box only checks whether a corner of either box lies inside the
// other. Two boxes crossing like a plus sign (no corner inside either)
// are reported as NOT intersecting.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::render::{Color, Surface};

//=== BoundingKind ========================================================

/// Variant tag of a [`BoundingVolume`], used when volumes are described
/// by name (level data, debug consoles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundingKind {
    None,
    Point,
    Circle,
    Box,
}

impl FromStr for BoundingKind {
    type Err = EngineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "none" => Ok(Self::None),
            "point" => Ok(Self::Point),
            "circle" => Ok(Self::Circle),
            "box" => Ok(Self::Box),
            other => Err(EngineError::UnknownBoundingKind(other.to_string())),
        }
    }
}

impl fmt::Display for BoundingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::None => "none",
            Self::Point => "point",
            Self::Circle => "circle",
            Self::Box => "box",
        };
        f.write_str(tag)
    }
}

//=== BoundingVolume ======================================================

/// Geometric region used purely for intersection testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundingVolume {
    /// Never intersects anything.
    #[default]
    None,

    Point {
        point: Vec2,
    },

    Circle {
        center: Vec2,
        radius: f32,
    },

    /// Axis-aligned box, y-up: `top_left.y >= bottom_right.y`.
    Box {
        top_left: Vec2,
        bottom_right: Vec2,
    },
}

impl BoundingVolume {
    //--- Construction -----------------------------------------------------

    pub fn point(point: Vec2) -> Self {
        Self::Point { point }
    }

    /// # Panics
    ///
    /// Panics if `radius` is negative or NaN.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        assert!(radius >= 0.0, "Circle radius must be non-negative, got {}", radius);
        Self::Circle { center, radius }
    }

    /// Box from its top-left and bottom-right corners (y-up).
    ///
    /// # Panics
    ///
    /// Panics if the corners are inverted on either axis.
    pub fn rect(top_left: Vec2, bottom_right: Vec2) -> Self {
        assert!(
            top_left.x <= bottom_right.x && top_left.y >= bottom_right.y,
            "Box corners inverted: top_left {:?}, bottom_right {:?}",
            top_left,
            bottom_right
        );
        Self::Box { top_left, bottom_right }
    }

    /// Box spanning the component-wise min/max of two arbitrary corners.
    pub fn aabb(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::Box {
            top_left: Vec2::new(min.x, max.y),
            bottom_right: Vec2::new(max.x, min.y),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn kind(&self) -> BoundingKind {
        match self {
            Self::None => BoundingKind::None,
            Self::Point { .. } => BoundingKind::Point,
            Self::Circle { .. } => BoundingKind::Circle,
            Self::Box { .. } => BoundingKind::Box,
        }
    }

    /// Same volume moved by `offset`. `None` stays `None`.
    pub fn translated(&self, offset: Vec2) -> Self {
        match *self {
            Self::None => Self::None,
            Self::Point { point } => Self::Point { point: point + offset },
            Self::Circle { center, radius } => Self::Circle {
                center: center + offset,
                radius,
            },
            Self::Box { top_left, bottom_right } => Self::Box {
                top_left: top_left + offset,
                bottom_right: bottom_right + offset,
            },
        }
    }

    /// Symmetric intersection test; see the module table.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        use BoundingVolume as V;

        match (*self, *other) {
            (V::None, _) | (_, V::None) => false,

            (V::Point { point: a }, V::Point { point: b }) => a == b,

            (V::Point { point }, V::Circle { center, radius })
            | (V::Circle { center, radius }, V::Point { point }) => {
                point_in_circle(point, center, radius)
            }

            (V::Point { point }, V::Box { top_left, bottom_right })
            | (V::Box { top_left, bottom_right }, V::Point { point }) => {
                point_in_box(point, top_left, bottom_right)
            }

            (V::Circle { center: c1, radius: r1 }, V::Circle { center: c2, radius: r2 }) => {
                c1.distance(c2) <= r1 + r2
            }

            (V::Circle { center, radius }, V::Box { top_left, bottom_right })
            | (V::Box { top_left, bottom_right }, V::Circle { center, radius }) => {
                circle_intersects_box(center, radius, top_left, bottom_right)
            }

            (
                V::Box { top_left: tl1, bottom_right: br1 },
                V::Box { top_left: tl2, bottom_right: br2 },
            ) => {
                corners(tl1, br1).iter().any(|&c| point_in_box(c, tl2, br2))
                    || corners(tl2, br2).iter().any(|&c| point_in_box(c, tl1, br1))
            }
        }
    }

    //--- Debug Drawing ----------------------------------------------------

    /// Strokes the outline of this volume. Points and `None` draw nothing.
    pub fn stroke(&self, surface: &mut dyn Surface, color: Color) {
        match *self {
            Self::None | Self::Point { .. } => {}
            Self::Circle { center, radius } => surface.stroke_circle(center, radius, color),
            Self::Box { top_left, bottom_right } => surface.stroke_rect(
                Vec2::new(top_left.x, bottom_right.y),
                Vec2::new(bottom_right.x, top_left.y),
                color,
            ),
        }
    }
}

//=== Geometry Helpers ====================================================

fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) <= radius
}

fn point_in_box(point: Vec2, top_left: Vec2, bottom_right: Vec2) -> bool {
    point.x >= top_left.x
        && point.x <= bottom_right.x
        && point.y <= top_left.y
        && point.y >= bottom_right.y
}

fn corners(top_left: Vec2, bottom_right: Vec2) -> [Vec2; 4] {
    [
        top_left,
        Vec2::new(top_left.x, bottom_right.y),
        Vec2::new(bottom_right.x, top_left.y),
        bottom_right,
    ]
}

fn circle_intersects_box(center: Vec2, radius: f32, top_left: Vec2, bottom_right: Vec2) -> bool {
    // Center inside the box
    if point_in_box(center, top_left, bottom_right) {
        return true;
    }

    // A box corner inside the circle
    if corners(top_left, bottom_right)
        .iter()
        .any(|&corner| point_in_circle(corner, center, radius))
    {
        return true;
    }

    let (left, right) = (top_left.x, bottom_right.x);
    let (top, bottom) = (top_left.y, bottom_right.y);

    // Edge proximity, one axis at a time
    if center.y <= top && center.y >= bottom {
        (center.x < left && left - center.x <= radius)
            || (center.x > right && center.x - right <= radius)
    } else if center.x >= left && center.x <= right {
        (center.y > top && center.y - top <= radius)
            || (center.y < bottom && bottom - center.y <= radius)
    } else {
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
