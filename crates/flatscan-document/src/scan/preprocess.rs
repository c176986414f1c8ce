// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge-map preprocessing — grayscale, Gaussian blur, Canny, dilation.

use flatscan_core::ScanConfig;
use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::morphology::dilate;
use tracing::{instrument, trace};

/// Reduce a colour frame to a binary edge map for contour search.
///
/// ## Pipeline
///
/// 1. Convert to grayscale (luma)
/// 2. Gaussian blur with a `blur_kernel_size` square kernel at `blur_sigma`
/// 3. Canny edge detection with `canny_low` / `canny_high` hysteresis
/// 4. Dilate with a square element of radius `dilation_radius` so that small
///    gaps close and document outlines form loops
///
/// The output has the frame's dimensions, with edge pixels at 255 and
/// everything else at 0. The input frame is only read.
#[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
pub fn preprocess(frame: &RgbImage, config: &ScanConfig) -> GrayImage {
    let gray = image::imageops::grayscale(frame);

    let kernel = gaussian_kernel(config.blur_kernel_size, config.blur_sigma);
    let blurred: GrayImage = separable_filter_equal(&gray, &kernel);
    trace!(taps = kernel.len(), sigma = config.blur_sigma, "Applied Gaussian blur");

    let edges = canny(&blurred, config.canny_low, config.canny_high);

    if config.dilation_radius == 0 {
        return edges;
    }
    dilate(&edges, Norm::LInf, config.dilation_radius)
}

/// Normalised 1-D Gaussian kernel with `size` taps.
///
/// Applied along both axes this is the `size x size` Gaussian. A zero size
/// yields the identity kernel.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0];
    }

    let radius = (size / 2) as i32;
    let denominator = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|offset| (-((offset * offset) as f32) / denominator).exp())
        .collect();

    let total: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= total;
    }
    kernel
}
