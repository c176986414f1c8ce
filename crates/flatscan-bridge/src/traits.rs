// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backend-agnostic trait definitions for frame capture and display.

use flatscan_core::error::Result;
use image::RgbImage;

/// A stream of camera frames.
pub trait FrameSource {
    /// Whether more frames may still arrive.
    fn is_open(&self) -> bool;

    /// Grab the next frame.
    ///
    /// Returns `Ok(None)` when no frame is available this tick or the source
    /// has just run dry; check [`is_open`](Self::is_open) to tell them apart.
    fn read_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// A named place to show images, such as a window.
pub trait DisplaySurface {
    /// Title the surface was created with (e.g. "input", "warp").
    fn title(&self) -> &str;

    /// Replace the displayed image.
    fn show(&mut self, image: &RgbImage) -> Result<()>;

    /// Whether the user still has the surface open.
    fn is_open(&self) -> bool;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        (**self).read_frame()
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn show(&mut self, image: &RgbImage) -> Result<()> {
        (**self).show(image)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
