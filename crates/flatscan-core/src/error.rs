// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Flatscan.
//
// "No document in this frame" is not an error: it is `Detection::NotFound`.
// Everything here is recoverable per frame except the capture/display setup
// failures raised while opening collaborators.

use thiserror::Error;

/// Top-level error type for all Flatscan operations.
#[derive(Debug, Error)]
pub enum FlatscanError {
    // -- Per-frame geometry --
    #[error("invalid input frame: {width}x{height}")]
    InvalidInput { width: u32, height: u32 },

    #[error("degenerate document geometry: target {width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },

    // -- Configuration --
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    // -- Collaborators --
    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("display surface error: {0}")]
    Display(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlatscanError {
    /// Whether the error only invalidates the current frame.
    ///
    /// The control loop skips the frame and carries on for these; anything
    /// else ends the session.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::DegenerateGeometry { .. }
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FlatscanError>;
