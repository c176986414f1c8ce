// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flatscan — Capture and display bridge abstractions.
//
// Defines the traits the control loop talks to and the implementations that
// back them: on-disk image sequences and snapshot files for desktop/CI runs,
// and in-memory doubles for tests.

pub mod memory;
pub mod sequence;
pub mod snapshot;
pub mod traits;

pub use memory::{MemoryDisplay, MemorySource};
pub use sequence::ImageSequenceSource;
pub use snapshot::SnapshotDisplay;
pub use traits::{DisplaySurface, FrameSource};

use std::path::Path;

use flatscan_core::error::Result;

/// Opens the capture source named by `identifier`.
///
/// RETURNS: A boxed trait object (`dyn FrameSource`) so callers stay
/// independent of the concrete capture backend.
pub fn open_source(identifier: impl AsRef<Path>) -> Result<Box<dyn FrameSource>> {
    Ok(Box::new(ImageSequenceSource::open(identifier)?))
}
