// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapshot display — a headless "window" that keeps the latest image as a PNG.
//
// Closing is signalled by dropping a `<title>.closed` marker next to the
// snapshot, the file-system analogue of closing a window.

use std::path::{Path, PathBuf};

use flatscan_core::error::{FlatscanError, Result};
use image::{ImageFormat, RgbImage};
use tracing::{debug, warn};

use crate::traits::DisplaySurface;

/// Display surface that writes each shown image to `<dir>/<title>.png`.
#[derive(Debug)]
pub struct SnapshotDisplay {
    title: String,
    image_path: PathBuf,
    marker_path: PathBuf,
}

impl SnapshotDisplay {
    /// Create the surface, creating `dir` if needed.
    ///
    /// A close marker left over from an earlier session is removed so the
    /// surface starts open.
    pub fn new(dir: impl AsRef<Path>, title: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref();
        let title = title.into();
        std::fs::create_dir_all(dir)?;

        let image_path = dir.join(format!("{title}.png"));
        let marker_path = dir.join(format!("{title}.closed"));
        if marker_path.exists() {
            warn!(marker = %marker_path.display(), "Removing stale close marker");
            std::fs::remove_file(&marker_path)?;
        }

        Ok(Self {
            title,
            image_path,
            marker_path,
        })
    }

    /// Where the latest image is written.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// The file whose presence closes the surface.
    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }
}

impl DisplaySurface for SnapshotDisplay {
    fn title(&self) -> &str {
        &self.title
    }

    fn show(&mut self, image: &RgbImage) -> Result<()> {
        if !self.is_open() {
            return Err(FlatscanError::Display(format!(
                "surface \"{}\" is closed",
                self.title
            )));
        }
        if image.width() == 0 || image.height() == 0 {
            debug!(surface = %self.title, "Skipping empty image");
            return Ok(());
        }
        image.save_with_format(&self.image_path, ImageFormat::Png)?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        !self.marker_path.exists()
    }
}
