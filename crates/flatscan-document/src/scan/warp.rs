// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — size the output from the detected outline and
// resample the frame through the corner-to-rectangle homography.

use flatscan_core::error::{FlatscanError, Result};
use flatscan_core::{Extent, FrameSize, OrderedQuad};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, instrument};

use crate::geometry::{distance, fit_to_frame};

/// Fill for output pixels that map outside the source frame.
const OUTSIDE: Rgb<u8> = Rgb([0, 0, 0]);

/// Output size for rectifying `corners` out of a frame of `frame` size.
///
/// The measured top edge (top-left to top-right) and left edge (top-left to
/// bottom-left) give the aspect ratio; the result is the largest size with
/// that ratio inside the frame.
pub fn target_extent(frame: FrameSize, corners: &OrderedQuad) -> Extent {
    let detected = Extent::new(
        distance(corners.top_left, corners.top_right) as f32,
        distance(corners.top_left, corners.bottom_left) as f32,
    );
    fit_to_frame(frame, detected)
}

/// Rectify the region of `frame` bounded by `corners` into an upright image.
///
/// `corners` map onto `(0, 0)`, `(w, 0)`, `(0, h)`, `(w, h)` of the output,
/// where `(w, h)` is [`target_extent`] before truncation to whole pixels. The
/// frame itself is only read.
///
/// Returns [`FlatscanError::DegenerateGeometry`] when the output truncates to
/// zero area or the four corners admit no projective mapping (three or more
/// collinear).
#[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
pub fn warp_document(frame: &RgbImage, corners: &OrderedQuad) -> Result<RgbImage> {
    let extent = target_extent(FrameSize::new(frame.width(), frame.height()), corners);
    let size = extent.truncate();
    if size.is_empty() {
        return Err(FlatscanError::DegenerateGeometry {
            width: size.width,
            height: size.height,
        });
    }

    let source = corners.as_array().map(|p| p.as_f32());
    let destination = [
        (0.0, 0.0),
        (extent.width, 0.0),
        (0.0, extent.height),
        (extent.width, extent.height),
    ];

    let projection = Projection::from_control_points(source, destination).ok_or(
        FlatscanError::DegenerateGeometry {
            width: size.width,
            height: size.height,
        },
    )?;

    let mut output = RgbImage::new(size.width, size.height);
    warp_into(frame, &projection, Interpolation::Bilinear, OUTSIDE, &mut output);

    debug!(
        out_w = size.width,
        out_h = size.height,
        "Perspective rectification applied"
    );
    Ok(output)
}
