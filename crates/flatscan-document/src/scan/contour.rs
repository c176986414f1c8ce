// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour helpers — outer border extraction, enclosed area, perimeter, and
// closed-polygon simplification.

use flatscan_core::Point;
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::{arc_length, contour_area as enclosed_area};
use imageproc::point::Point as PixelPoint;

/// Outermost borders of the foreground (non-zero) regions of `edges`.
///
/// Hole borders and anything nested inside another region are skipped.
pub fn external_contours(edges: &GrayImage) -> Vec<Vec<Point>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
        .map(|contour| {
            contour
                .points
                .into_iter()
                .map(|p| Point::new(p.x, p.y))
                .collect()
        })
        .collect()
}

/// Area enclosed by a closed contour, regardless of winding.
pub fn contour_area(points: &[Point]) -> f64 {
    enclosed_area(&to_pixels(points)).abs()
}

/// Perimeter of a closed contour.
pub fn perimeter(points: &[Point]) -> f64 {
    arc_length(&to_pixels(points), true)
}

fn to_pixels(points: &[Point]) -> Vec<PixelPoint<i32>> {
    points.iter().map(|p| PixelPoint::new(p.x, p.y)).collect()
}

/// Douglas-Peucker simplification of a closed contour.
///
/// The two mutually farthest contour points anchor the polygon; each of the
/// two arcs between them is then split at its farthest point from the chord
/// until every dropped point lies within `epsilon` of the result. Vertices
/// are returned in contour order.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let (first, second) = farthest_pair(points);
    if crate::geometry::distance(points[first], points[second]) <= epsilon {
        return vec![points[first]];
    }

    let (lo, hi) = (first.min(second), first.max(second));
    let mut keep = vec![false; n];
    keep[lo] = true;
    keep[hi] = true;

    let upper: Vec<usize> = (lo..=hi).collect();
    let lower: Vec<usize> = (hi..n).chain(0..=lo).collect();
    mark_vertices(points, &upper, epsilon, &mut keep);
    mark_vertices(points, &lower, epsilon, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

/// Approximate diameter endpoints by repeated farthest-point hops from
/// index 0.
fn farthest_pair(points: &[Point]) -> (usize, usize) {
    let farthest_from = |origin: usize| {
        let mut best = origin;
        let mut best_distance = 0.0;
        for (i, point) in points.iter().enumerate() {
            let d = crate::geometry::distance(points[origin], *point);
            if d > best_distance {
                best_distance = d;
                best = i;
            }
        }
        best
    };

    let mut a = 0;
    let mut b = farthest_from(a);
    for _ in 0..2 {
        let next = farthest_from(b);
        a = b;
        b = next;
    }
    (a, b)
}

/// Mark the vertices of one arc (`arc` lists contour indices end to end).
fn mark_vertices(points: &[Point], arc: &[usize], epsilon: f64, keep: &mut [bool]) {
    let mut stack = vec![(0usize, arc.len() - 1)];

    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let chord_start = points[arc[start]];
        let chord_end = points[arc[end]];
        let mut split = start;
        let mut split_distance = 0.0;
        for (offset, &index) in arc[start + 1..end].iter().enumerate() {
            let d = distance_to_chord(points[index], chord_start, chord_end);
            if d > split_distance {
                split_distance = d;
                split = start + 1 + offset;
            }
        }

        if split_distance > epsilon {
            keep[arc[split]] = true;
            stack.push((start, split));
            stack.push((split, end));
        }
    }
}

/// Distance from `point` to the line through `a` and `b` (or to `a` when the
/// two coincide).
fn distance_to_chord(point: Point, a: Point, b: Point) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return crate::geometry::distance(point, a);
    }
    let px = f64::from(point.x) - f64::from(a.x);
    let py = f64::from(point.y) - f64::from(a.y);
    (px * dy - py * dx).abs() / length
}
