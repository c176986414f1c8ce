// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tunable constants for the scan pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{FlatscanError, Result};

/// Parameters for edge-map preprocessing and document detection.
///
/// The defaults suit a 640x480 webcam frame. `min_contour_area` is in square
/// pixels and should be scaled with the input resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Side length of the square Gaussian kernel (odd).
    pub blur_kernel_size: u32,
    /// Standard deviation of the Gaussian kernel.
    pub blur_sigma: f32,
    /// Lower Canny hysteresis threshold.
    pub canny_low: f32,
    /// Upper Canny hysteresis threshold.
    pub canny_high: f32,
    /// Chebyshev radius of the square dilation element (1 = 3x3).
    pub dilation_radius: u8,
    /// Contours enclosing less area than this are treated as noise.
    pub min_contour_area: f64,
    /// Polygon simplification tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Allowed difference between opposite side lengths, in whole pixels.
    pub parallelogram_tolerance: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 3,
            blur_sigma: 3.0,
            canny_low: 50.0,
            canny_high: 100.0,
            dilation_radius: 1,
            min_contour_area: 2_000.0,
            approx_epsilon_ratio: 0.02,
            parallelogram_tolerance: 40,
        }
    }
}

impl ScanConfig {
    /// Reject parameter combinations the image operations cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(FlatscanError::InvalidConfig(format!(
                "blur kernel size must be odd, got {}",
                self.blur_kernel_size
            )));
        }
        if !(self.blur_sigma > 0.0) {
            return Err(FlatscanError::InvalidConfig(format!(
                "blur sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        if self.canny_low > self.canny_high {
            return Err(FlatscanError::InvalidConfig(format!(
                "canny thresholds out of order: low {} > high {}",
                self.canny_low, self.canny_high
            )));
        }
        if !(self.approx_epsilon_ratio > 0.0) {
            return Err(FlatscanError::InvalidConfig(format!(
                "approximation epsilon ratio must be positive, got {}",
                self.approx_epsilon_ratio
            )));
        }
        if self.min_contour_area < 0.0 {
            return Err(FlatscanError::InvalidConfig(format!(
                "minimum contour area must not be negative, got {}",
                self.min_contour_area
            )));
        }
        Ok(())
    }
}

/// Overlay drawn on the input frame around a detected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Radius of the filled marker at each corner.
    pub circle_radius: i32,
    /// RGB colour for markers and outline.
    pub color: [u8; 3],
    /// Outline width in pixels.
    pub line_thickness: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            circle_radius: 10,
            color: [0xff, 0, 0],
            line_thickness: 2,
        }
    }
}
