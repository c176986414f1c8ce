// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-frame document scanning — preprocess, detect, order, warp, and
// optionally annotate the live frame.

use flatscan_core::error::{FlatscanError, Result};
use flatscan_core::{AnnotationStyle, Detection, OrderedQuad, Quadrilateral, ScanConfig};
use image::RgbImage;
use tracing::{debug, instrument};

use crate::scan::annotate::annotate_document;
use crate::scan::detect::detect_document;
use crate::scan::order::order_corners;
use crate::scan::preprocess::preprocess;
use crate::scan::warp::warp_document;

/// A document located and rectified in one frame.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Corners in detection order, as drawn by the annotator.
    pub detected: Quadrilateral,
    /// The same corners in canonical order, as fed to the warp.
    pub corners: OrderedQuad,
    /// Upright, aspect-corrected view of the document.
    pub rectified: RgbImage,
}

/// What one frame produced.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Found(ScanResult),
    /// No plausible document outline in this frame.
    NotFound,
}

impl ScanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NotFound => None,
        }
    }
}

/// Runs the document pipeline over individual frames.
///
/// Holds only immutable configuration: every call works on its own frame and
/// keeps nothing between frames.
///
/// ```ignore
/// let scanner = DocumentScanner::new(ScanConfig::default())?;
/// match scanner.scan_and_annotate(&mut frame)? {
///     ScanOutcome::Found(result) => show("warp", &result.rectified),
///     ScanOutcome::NotFound => {}
/// }
/// show("input", &frame);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    config: ScanConfig,
    style: AnnotationStyle,
}

impl DocumentScanner {
    // -- Construction ---------------------------------------------------------

    /// Create a scanner, rejecting configurations the pipeline cannot run.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            style: AnnotationStyle::default(),
        })
    }

    /// Replace the feedback overlay style.
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    // -- Pipeline -------------------------------------------------------------

    /// Locate the document outline in `frame` without warping.
    pub fn detect(&self, frame: &RgbImage) -> Result<Detection> {
        ensure_frame(frame)?;
        let edges = preprocess(frame, &self.config);
        Ok(detect_document(&edges, &self.config))
    }

    /// Locate and rectify the document in `frame`.
    ///
    /// Returns `Ok(ScanOutcome::NotFound)` when nothing qualifies, and an
    /// error for an empty frame ([`FlatscanError::InvalidInput`]) or an
    /// outline that cannot be rectified
    /// ([`FlatscanError::DegenerateGeometry`]). Both errors only concern
    /// this frame.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn scan(&self, frame: &RgbImage) -> Result<ScanOutcome> {
        let detected = match self.detect(frame)? {
            Detection::Found(quad) => quad,
            Detection::NotFound => return Ok(ScanOutcome::NotFound),
        };

        let corners = order_corners(&detected);
        debug!(?corners, "Corners ordered");

        let rectified = warp_document(frame, &corners)?;
        Ok(ScanOutcome::Found(ScanResult {
            detected,
            corners,
            rectified,
        }))
    }

    /// [`scan`](Self::scan), then draw the detected outline onto `frame`.
    ///
    /// The rectified image is sampled before the overlay is drawn, so it
    /// never contains the markers. The frame is left unmarked when nothing
    /// was found or the scan failed.
    pub fn scan_and_annotate(&self, frame: &mut RgbImage) -> Result<ScanOutcome> {
        let outcome = self.scan(frame)?;
        if let ScanOutcome::Found(result) = &outcome {
            annotate_document(frame, &result.detected, &self.style);
        }
        Ok(outcome)
    }
}

/// Reject frames with no pixels.
fn ensure_frame(frame: &RgbImage) -> Result<()> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(FlatscanError::InvalidInput {
            width: frame.width(),
            height: frame.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatscan_core::Point;
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    use crate::geometry::distance;

    /// White 300x220 sheet at (100, 80) on a black 640x480 frame.
    fn sheet_frame() -> RgbImage {
        let mut frame = RgbImage::new(640, 480);
        draw_filled_rect_mut(
            &mut frame,
            Rect::at(100, 80).of_size(300, 220),
            Rgb([255, 255, 255]),
        );
        frame
    }

    fn scanner() -> DocumentScanner {
        DocumentScanner::new(ScanConfig::default()).expect("default config is valid")
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ScanConfig {
            blur_kernel_size: 2,
            ..ScanConfig::default()
        };
        assert!(matches!(
            DocumentScanner::new(config),
            Err(FlatscanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn blank_frame_is_not_found() {
        let frame = RgbImage::new(320, 240);
        let outcome = scanner().scan(&frame).expect("scan");
        assert!(!outcome.is_found());
        assert_eq!(scanner().detect(&frame).expect("detect"), Detection::NotFound);
    }

    #[test]
    fn empty_frame_is_invalid_input() {
        let frame = RgbImage::new(0, 0);
        assert!(matches!(
            scanner().scan(&frame),
            Err(FlatscanError::InvalidInput { width: 0, height: 0 })
        ));
    }

    /// The recovered corners sit on the drawn sheet's corners.
    #[test]
    fn synthetic_sheet_round_trips_corners() {
        let frame = sheet_frame();
        let outcome = scanner().scan(&frame).expect("scan");
        let result = outcome.result().expect("sheet detected");

        let expected = [
            Point::new(100, 80),
            Point::new(399, 80),
            Point::new(100, 299),
            Point::new(399, 299),
        ];
        for (found, truth) in result.corners.as_array().iter().zip(expected) {
            let error = distance(*found, truth);
            assert!(error <= 3.0, "corner {found} is {error:.2}px from {truth}");
        }
    }

    /// The warp fills the frame width and keeps the sheet's aspect ratio.
    #[test]
    fn synthetic_sheet_rectifies_to_sheet_aspect() {
        let frame = sheet_frame();
        let outcome = scanner().scan(&frame).expect("scan");
        let rectified = &outcome.result().expect("sheet detected").rectified;

        let (expected_width, expected_height) = (640.0, 220.0 / 300.0 * 640.0);
        assert!((f64::from(rectified.width()) - expected_width).abs() <= 1.0);
        assert!((f64::from(rectified.height()) - expected_height).abs() <= 1.0);
        // The middle of the output is sheet, not background.
        let centre = rectified.get_pixel(rectified.width() / 2, rectified.height() / 2);
        assert_eq!(centre, &Rgb([255, 255, 255]));
    }

    #[test]
    fn repeated_scans_are_identical() {
        let frame = sheet_frame();
        let first = scanner().scan(&frame).expect("scan");
        let second = scanner().scan(&frame).expect("scan");
        let (a, b) = (first.result().expect("found"), second.result().expect("found"));
        assert_eq!(a.corners, b.corners);
        assert_eq!(a.detected, b.detected);
        assert_eq!(a.rectified, b.rectified);
    }

    #[test]
    fn annotation_is_applied_after_warp() {
        let mut frame = sheet_frame();
        let clean = scanner().scan(&frame).expect("scan");
        let annotated = scanner().scan_and_annotate(&mut frame).expect("scan");

        let clean = clean.result().expect("found");
        let annotated = annotated.result().expect("found");
        assert_eq!(clean.rectified, annotated.rectified);

        // The frame now carries the red markers at the detected corners.
        let corner = annotated.detected.points()[0];
        let pixel = frame.get_pixel(corner.x as u32, corner.y as u32);
        assert_eq!(pixel, &Rgb([255, 0, 0]));
    }

    #[test]
    fn not_found_leaves_frame_unmarked() {
        let mut frame = RgbImage::new(160, 120);
        let before = frame.clone();
        let outcome = scanner().scan_and_annotate(&mut frame).expect("scan");
        assert!(!outcome.is_found());
        assert_eq!(frame, before);
    }
}
