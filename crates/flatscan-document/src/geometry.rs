// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scalar helpers shared by detection and warping: distances, tolerant
// comparison of pixel lengths, and aspect-preserving fitting.

use std::ops::Mul;

use flatscan_core::{Extent, FrameSize, Point};

/// `value * value`.
pub fn squared<T>(value: T) -> T
where
    T: Mul<Output = T> + Copy,
{
    value * value
}

/// Euclidean distance between two pixel coordinates.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    (squared(dx) + squared(dy)).sqrt()
}

/// Whether `a` and `b` differ by at most `tolerance`.
///
/// Bounds saturate at `0` and `u32::MAX` so values near either end of the
/// range never wrap.
pub fn approximately_equal(a: u32, b: u32, tolerance: u32) -> bool {
    a.saturating_sub(tolerance) <= b && a.saturating_add(tolerance) >= b
}

/// Whether two opposite pairings of `points` have matching lengths.
///
/// Compares `|p0 p1|` with `|p3 p2|` and `|p1 p3|` with `|p2 p0|`, with each
/// length truncated to whole pixels first.
pub fn is_parallelogram(points: &[Point; 4], tolerance: u32) -> bool {
    let length = |a: Point, b: Point| distance(a, b) as u32;

    approximately_equal(
        length(points[0], points[1]),
        length(points[3], points[2]),
        tolerance,
    ) && approximately_equal(
        length(points[1], points[3]),
        length(points[2], points[0]),
        tolerance,
    )
}

/// Largest size with the aspect ratio of `image` that fits inside `frame`.
///
/// The dominant axis of `image` is matched to the same axis of `frame` and the
/// other axis follows proportionally. When that overflows the frame's other
/// axis, the result is scaled back down to fit. Zero or negative image axes
/// are treated as `1` when dividing.
pub fn fit_to_frame(frame: FrameSize, image: Extent) -> Extent {
    let frame_w = frame.width as f32;
    let frame_h = frame.height as f32;

    let fitted = if image.width > image.height {
        Extent::new(frame_w, image.height / image.width.max(1.0) * frame_w)
    } else {
        Extent::new(image.width / image.height.max(1.0) * frame_h, frame_h)
    };

    if fitted.width > frame_w {
        let scale = frame_w / fitted.width;
        Extent::new(frame_w, fitted.height * scale)
    } else if fitted.height > frame_h {
        let scale = frame_h / fitted.height;
        Extent::new(fitted.width * scale, frame_h)
    } else {
        fitted
    }
}
