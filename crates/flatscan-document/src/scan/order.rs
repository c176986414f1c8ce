// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — assign detected corners to top-left, top-right,
// bottom-left, bottom-right.

use flatscan_core::{OrderedQuad, Point, Quadrilateral};

/// Put four corners of a roughly upright convex quadrilateral into canonical
/// order.
///
/// With `sum = x + y` and `difference = x - y`:
///
/// - top-left has the smallest sum
/// - top-right has the largest difference
/// - bottom-left has the smallest difference
/// - bottom-right has the largest sum
///
/// Ties go to the point that comes first in `quad`. Input that is not a
/// simple quadrilateral still produces four corners, possibly repeated.
pub fn order_corners(quad: &Quadrilateral) -> OrderedQuad {
    let points = quad.points();

    OrderedQuad {
        top_left: first_extreme(points, Point::sum, Extreme::Min),
        top_right: first_extreme(points, Point::difference, Extreme::Max),
        bottom_left: first_extreme(points, Point::difference, Extreme::Min),
        bottom_right: first_extreme(points, Point::sum, Extreme::Max),
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// First point (in input order) at the extreme of `key`.
fn first_extreme(points: &[Point; 4], key: fn(&Point) -> i32, extreme: Extreme) -> Point {
    let mut best = points[0];
    for point in &points[1..] {
        let better = match extreme {
            Extreme::Min => key(point) < key(&best),
            Extreme::Max => key(point) > key(&best),
        };
        if better {
            best = *point;
        }
    }
    best
}
