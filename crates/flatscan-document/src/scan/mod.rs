// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — edge map, outline search, corner ordering, rectification,
// and visual feedback.

pub mod annotate;
pub mod contour;
pub mod detect;
pub mod order;
pub mod pipeline;
pub mod preprocess;
pub mod warp;

pub use annotate::annotate_document;
pub use detect::detect_document;
pub use order::order_corners;
pub use pipeline::{DocumentScanner, ScanOutcome, ScanResult};
pub use preprocess::preprocess;
pub use warp::{target_extent, warp_document};
