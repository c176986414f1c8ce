// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document detection — pick the largest parallelogram-like quadrilateral
// among the outer contours of an edge map.

use flatscan_core::{Detection, Point, Quadrilateral, ScanConfig};
use image::GrayImage;
use tracing::{debug, instrument, trace};

use crate::geometry::is_parallelogram;
use crate::scan::contour::{contour_area, external_contours, perimeter, simplify_closed};

/// Find the most plausible document outline in `edges`.
///
/// Every outer contour is scored by enclosed area. A contour is a candidate
/// when its area reaches `min_contour_area`, it simplifies (at
/// `approx_epsilon_ratio` of its perimeter) to exactly four vertices, and
/// those vertices pass the parallelogram check. The candidate with strictly
/// the largest area wins, so on equal areas the first one found is kept.
///
/// The winning corners come back in contour order; an empty or noisy edge map
/// yields [`Detection::NotFound`].
#[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
pub fn detect_document(edges: &GrayImage, config: &ScanConfig) -> Detection {
    let contours = external_contours(edges);
    trace!(contours = contours.len(), "Outer contours extracted");

    let mut best: Option<(f64, Quadrilateral)> = None;

    for contour in &contours {
        let area = contour_area(contour);
        if area < config.min_contour_area {
            continue;
        }

        let epsilon = config.approx_epsilon_ratio * perimeter(contour);
        if !(epsilon > 0.0) {
            continue;
        }

        let Ok(corners) = <[Point; 4]>::try_from(simplify_closed(contour, epsilon)) else {
            continue;
        };

        if best.as_ref().is_some_and(|(best_area, _)| area <= *best_area) {
            continue;
        }

        if !is_parallelogram(&corners, config.parallelogram_tolerance) {
            debug!(area, ?corners, "Rejected non-parallelogram quadrilateral");
            continue;
        }

        best = Some((area, Quadrilateral::new(corners)));
    }

    match best {
        Some((area, quad)) => {
            debug!(area, corners = ?quad.points(), "Document outline found");
            Detection::Found(quad)
        }
        None => {
            debug!(contours = contours.len(), "No document outline in frame");
            Detection::NotFound
        }
    }
}
