// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// flatscan-document — Locate a sheet of paper in a camera frame and rectify it.
//
// Provides the scalar geometry helpers and the per-frame scanning pipeline
// (edge preprocessing, outline detection, corner ordering, perspective warp,
// and on-frame annotation).

pub mod geometry;
pub mod scan;

// Re-export the primary entry points so callers can use
// `flatscan_document::DocumentScanner` etc.
pub use scan::pipeline::{DocumentScanner, ScanOutcome, ScanResult};
