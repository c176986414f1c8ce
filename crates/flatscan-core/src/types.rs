// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometry types for the Flatscan document pipeline.

/// Integer pixel coordinate in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `x + y`, smallest at the top-left of an upright shape.
    pub fn sum(&self) -> i32 {
        self.x + self.y
    }

    /// `x - y`, largest at the top-right of an upright shape.
    pub fn difference(&self) -> i32 {
        self.x - self.y
    }

    /// Floating-point `(x, y)` pair, the form the projective solver takes.
    pub fn as_f32(&self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four detected document corners in detection (contour) order.
///
/// The order carries no geometric meaning beyond tracing the boundary; run it
/// through corner ordering before warping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrilateral(pub [Point; 4]);

impl Quadrilateral {
    pub fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }
}

/// Four corners in canonical order: top-left, top-right, bottom-left,
/// bottom-right.
///
/// The warp maps index `i` of [`OrderedQuad::as_array`] onto the matching
/// corner of the output rectangle, so a mislabelled corner shears the result
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedQuad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl OrderedQuad {
    /// Corners as `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn as_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Outcome of searching one edge map for a document outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The best-scoring quadrilateral, corners in detection order.
    Found(Quadrilateral),
    /// No contour survived the area, vertex-count, and parallelogram filters.
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn quadrilateral(&self) -> Option<&Quadrilateral> {
        match self {
            Self::Found(quad) => Some(quad),
            Self::NotFound => None,
        }
    }
}

/// Pixel size of a frame or output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Real-valued width/height pair (measured lengths, fitted output size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Truncate to whole pixels, the way the output image is allocated.
    pub fn truncate(&self) -> FrameSize {
        FrameSize {
            width: self.width.max(0.0) as u32,
            height: self.height.max(0.0) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_sum_and_difference() {
        let p = Point::new(7, 3);
        assert_eq!(p.sum(), 10);
        assert_eq!(p.difference(), 4);
        assert_eq!(Point::from((2, 9)).difference(), -7);
    }

    #[test]
    fn ordered_quad_array_follows_canonical_indices() {
        let quad = OrderedQuad {
            top_left: Point::new(0, 0),
            top_right: Point::new(10, 0),
            bottom_left: Point::new(0, 5),
            bottom_right: Point::new(10, 5),
        };
        assert_eq!(
            quad.as_array(),
            [
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(0, 5),
                Point::new(10, 5)
            ]
        );
    }

    #[test]
    fn not_found_has_no_quadrilateral() {
        assert!(Detection::NotFound.quadrilateral().is_none());
        let quad = Quadrilateral::new([Point::default(); 4]);
        assert!(Detection::Found(quad).is_found());
    }

    #[test]
    fn extent_truncates_toward_zero() {
        let size = Extent::new(99.9, 0.7).truncate();
        assert_eq!(size, FrameSize::new(99, 0));
        assert!(size.is_empty());
    }
}
