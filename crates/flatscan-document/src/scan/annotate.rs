// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Visual feedback — mark a detected outline on the live frame.

use flatscan_core::{AnnotationStyle, Point, Quadrilateral};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

/// Draw a filled marker on each corner of `quad` and a closed outline through
/// the corners in the order given.
///
/// Pass the detection-order quadrilateral so the outline follows the
/// boundary. Anything outside the frame is clipped.
pub fn annotate_document(frame: &mut RgbImage, quad: &Quadrilateral, style: &AnnotationStyle) {
    let color = Rgb(style.color);
    let points = quad.points();

    for point in points {
        draw_filled_circle_mut(frame, (point.x, point.y), style.circle_radius, color);
    }

    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        draw_thick_segment(frame, *start, end, style.line_thickness, color);
    }
}

/// Line segment `thickness` pixels wide, built from parallel one-pixel lines
/// offset across the segment's minor axis.
fn draw_thick_segment(frame: &mut RgbImage, start: Point, end: Point, thickness: u32, color: Rgb<u8>) {
    let steep = (end.y - start.y).abs() > (end.x - start.x).abs();
    let thickness = thickness.max(1) as i32;
    let first = -(thickness - 1) / 2;

    for offset in first..first + thickness {
        let (dx, dy) = if steep { (offset, 0) } else { (0, offset) };
        draw_line_segment_mut(
            frame,
            ((start.x + dx) as f32, (start.y + dy) as f32),
            ((end.x + dx) as f32, (end.y + dy) as f32),
            color,
        );
    }
}
