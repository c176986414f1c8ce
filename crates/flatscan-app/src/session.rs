// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning session — pull frames, scan them, and keep the display surfaces
// current until the source runs dry or the user closes the input surface.

use flatscan_bridge::{DisplaySurface, FrameSource};
use flatscan_core::error::Result;
use flatscan_document::{DocumentScanner, ScanOutcome};
use image::RgbImage;
use tracing::{debug, info, trace, warn};

/// Title of the surface showing the annotated camera frame.
pub const INPUT_SURFACE: &str = "input";
/// Title of the surface showing the rectified document.
pub const WARP_SURFACE: &str = "warp";

const INPUT: usize = 0;
const WARP: usize = 1;

/// Frame counts for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames read from the source.
    pub frames: usize,
    /// Frames in which a document was found and rectified.
    pub found: usize,
    /// Frames with no document outline.
    pub not_found: usize,
    /// Frames dropped because of a frame-local error.
    pub skipped: usize,
}

/// A display surface plus the image it should show on the next refresh.
struct TrackedSurface<'a> {
    surface: &'a mut dyn DisplaySurface,
    pending: Option<RgbImage>,
    open: bool,
}

impl<'a> TrackedSurface<'a> {
    fn new(surface: &'a mut dyn DisplaySurface) -> Self {
        let open = surface.is_open();
        Self {
            surface,
            pending: None,
            open,
        }
    }

    /// Re-read the open state, then show the pending image if still open.
    fn refresh(&mut self) -> Result<()> {
        let open = self.surface.is_open();
        if self.open && !open {
            info!(surface = self.surface.title(), "Surface closed");
        }
        self.open = open;

        match self.pending.take() {
            Some(image) if open => self.surface.show(&image),
            _ => Ok(()),
        }
    }
}

/// Run the scanning loop.
///
/// Each frame is scanned and annotated in place; the annotated frame goes to
/// `input` and, when a document was found, the rectified view goes to `warp`.
/// Frame-local errors are logged and the frame is skipped. Capture and
/// display failures end the session.
pub fn run(
    scanner: &DocumentScanner,
    source: &mut dyn FrameSource,
    input: &mut dyn DisplaySurface,
    warp: &mut dyn DisplaySurface,
    max_frames: Option<usize>,
) -> Result<SessionSummary> {
    let mut surfaces = [TrackedSurface::new(input), TrackedSurface::new(warp)];
    let mut summary = SessionSummary::default();
    info!(max_frames = ?max_frames, "Session started");

    while source.is_open() && surfaces[INPUT].surface.is_open() {
        if max_frames.is_some_and(|limit| summary.frames >= limit) {
            debug!(frames = summary.frames, "Frame limit reached");
            break;
        }

        let Some(mut frame) = source.read_frame()? else {
            trace!("No frame this tick");
            continue;
        };
        summary.frames += 1;

        match scanner.scan_and_annotate(&mut frame) {
            Ok(ScanOutcome::Found(result)) => {
                summary.found += 1;
                surfaces[WARP].pending = Some(result.rectified);
            }
            Ok(ScanOutcome::NotFound) => summary.not_found += 1,
            Err(e) if e.is_frame_local() => {
                warn!(frame = summary.frames, error = %e, "Skipping frame");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
        surfaces[INPUT].pending = Some(frame);

        for surface in surfaces.iter_mut() {
            surface.refresh()?;
        }
    }

    info!(
        frames = summary.frames,
        found = summary.found,
        "Session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatscan_bridge::{ImageSequenceSource, MemoryDisplay, MemorySource, SnapshotDisplay};
    use flatscan_core::error::FlatscanError;
    use flatscan_core::ScanConfig;
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    /// White 150x110 sheet on a black 320x240 frame.
    fn sheet_frame() -> RgbImage {
        let mut frame = RgbImage::new(320, 240);
        draw_filled_rect_mut(
            &mut frame,
            Rect::at(50, 40).of_size(150, 110),
            Rgb([255, 255, 255]),
        );
        frame
    }

    fn blank_frame() -> RgbImage {
        RgbImage::new(320, 240)
    }

    fn scanner() -> DocumentScanner {
        DocumentScanner::new(ScanConfig::default()).expect("default config is valid")
    }

    fn displays() -> (MemoryDisplay, MemoryDisplay) {
        (MemoryDisplay::new(INPUT_SURFACE), MemoryDisplay::new(WARP_SURFACE))
    }

    #[test]
    fn found_frames_update_both_surfaces() {
        let mut source = MemorySource::new([sheet_frame(), sheet_frame(), sheet_frame()]);
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(
            summary,
            SessionSummary {
                frames: 3,
                found: 3,
                not_found: 0,
                skipped: 0
            }
        );
        assert_eq!(input.shown().len(), 3);
        assert_eq!(warp.shown().len(), 3);
        // Annotated input, clean full-width rectification.
        assert!(input.shown().iter().all(|f| f.pixels().any(|p| *p == RED)));
        let rectified = warp.last().expect("warp shown");
        assert_eq!(rectified.width(), 320);
        assert!(!rectified.pixels().any(|p| *p == RED));
    }

    #[test]
    fn not_found_leaves_warp_untouched() {
        let mut source = MemorySource::new([sheet_frame(), blank_frame(), blank_frame()]);
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.found, 1);
        assert_eq!(summary.not_found, 2);
        assert_eq!(input.shown().len(), 3);
        assert_eq!(warp.shown().len(), 1);
        // Blank frames are shown without markers.
        assert_eq!(input.last(), Some(&blank_frame()));
    }

    #[test]
    fn frame_local_errors_are_skipped() {
        let mut source = MemorySource::new([RgbImage::new(0, 0), sheet_frame()]);
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.found, 1);
        assert_eq!(warp.shown().len(), 1);
    }

    #[test]
    fn capture_failure_ends_session() {
        let mut source = MemorySource::new([blank_frame()]);
        source.push_failure("camera unplugged");
        source.push_frame(blank_frame());
        let (mut input, mut warp) = displays();

        let result = run(&scanner(), &mut source, &mut input, &mut warp, None);

        assert!(matches!(result, Err(FlatscanError::Capture(_))));
        assert_eq!(input.shown().len(), 1);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn gaps_are_not_counted_as_frames() {
        let mut source = MemorySource::new([blank_frame()]);
        source.push_gap();
        source.push_gap();
        source.push_frame(blank_frame());
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.frames, 2);
        assert_eq!(input.shown().len(), 2);
    }

    #[test]
    fn closing_input_stops_the_loop() {
        let mut source = MemorySource::new(std::iter::repeat_with(blank_frame).take(5));
        let mut input = MemoryDisplay::new(INPUT_SURFACE).close_after(2);
        let mut warp = MemoryDisplay::new(WARP_SURFACE);

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.frames, 2);
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn closed_warp_surface_is_no_longer_updated() {
        let mut source = MemorySource::new([sheet_frame(), sheet_frame(), sheet_frame()]);
        let mut input = MemoryDisplay::new(INPUT_SURFACE);
        let mut warp = MemoryDisplay::new(WARP_SURFACE).close_after(1);

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.found, 3);
        assert_eq!(input.shown().len(), 3);
        assert_eq!(warp.shown().len(), 1);
    }

    #[test]
    fn max_frames_limits_session() {
        let mut source = MemorySource::new(std::iter::repeat_with(blank_frame).take(10));
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, Some(4)).expect("run");

        assert_eq!(summary.frames, 4);
        assert_eq!(source.remaining(), 6);
    }

    #[test]
    fn closed_source_runs_no_frames() {
        let mut source = MemorySource::default();
        let (mut input, mut warp) = displays();

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary, SessionSummary::default());
        assert!(input.shown().is_empty());
    }

    /// Frames from disk end up as snapshot files.
    #[test]
    fn image_sequence_to_snapshots() {
        let frames = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        sheet_frame().save(frames.path().join("0001.png")).expect("write");
        blank_frame().save(frames.path().join("0002.png")).expect("write");

        let mut source = ImageSequenceSource::open(frames.path()).expect("open");
        let mut input = SnapshotDisplay::new(output.path(), INPUT_SURFACE).expect("input");
        let mut warp = SnapshotDisplay::new(output.path(), WARP_SURFACE).expect("warp");

        let summary = run(&scanner(), &mut source, &mut input, &mut warp, None).expect("run");

        assert_eq!(summary.found, 1);
        assert_eq!(summary.not_found, 1);
        let last_input = image::open(input.image_path()).expect("input png").to_rgb8();
        assert_eq!(last_input, blank_frame());
        let rectified = image::open(warp.image_path()).expect("warp png").to_rgb8();
        assert_eq!(rectified.width(), 320);
    }
}
