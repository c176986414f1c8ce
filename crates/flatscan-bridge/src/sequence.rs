// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image-sequence capture — replays a directory of frames (or one still image)
// as a camera stream.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use flatscan_core::error::{FlatscanError, Result};
use image::{ImageFormat, RgbImage};
use tracing::{debug, info};

use crate::traits::FrameSource;

/// Frame source backed by image files on disk.
#[derive(Debug)]
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Open `path` as a capture source.
    ///
    /// A directory yields every decodable image inside it, in file-name order.
    /// A file yields itself as a single frame. Missing paths and directories
    /// without any image files are [`FlatscanError::Capture`] errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let pending: VecDeque<PathBuf> = if path.is_dir() {
            let mut frames = Vec::new();
            for entry in std::fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() && ImageFormat::from_path(&entry_path).is_ok() {
                    frames.push(entry_path);
                }
            }
            frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            if frames.is_empty() {
                return Err(FlatscanError::Capture(format!(
                    "no image frames in {}",
                    path.display()
                )));
            }
            frames.into()
        } else if path.is_file() {
            VecDeque::from([path.to_path_buf()])
        } else {
            return Err(FlatscanError::Capture(format!(
                "no capture source at {}",
                path.display()
            )));
        };

        info!(source = %path.display(), frames = pending.len(), "Capture source opened");
        Ok(Self { pending })
    }

    /// Frames not yet read.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn is_open(&self) -> bool {
        !self.pending.is_empty()
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let frame = image::open(&path)?.to_rgb8();
        debug!(
            frame = %path.display(),
            width = frame.width(),
            height = frame.height(),
            "Frame read"
        );
        Ok(Some(frame))
    }
}
