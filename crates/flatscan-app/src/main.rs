// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flatscan — live document detection and rectification.
//
// Entry point. Initialises error reporting and logging, opens the capture
// source and the two display surfaces, then runs the scanning session.

mod session;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use flatscan_bridge::SnapshotDisplay;
use flatscan_core::ScanConfig;
use flatscan_document::DocumentScanner;
use tracing::info;
use tracing_subscriber::EnvFilter;

use session::{INPUT_SURFACE, WARP_SURFACE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Capture source: a directory of frames or a single image file
    source: PathBuf,
    /// Directory the "input" and "warp" surfaces are written to
    #[arg(short, long, default_value = "flatscan-out")]
    output: PathBuf,
    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Flatscan starting");

    let scanner = DocumentScanner::new(ScanConfig::default())?;
    let mut source = flatscan_bridge::open_source(&cli.source)?;
    let mut input = SnapshotDisplay::new(&cli.output, INPUT_SURFACE)?;
    let mut warp = SnapshotDisplay::new(&cli.output, WARP_SURFACE)?;
    info!(
        output = %cli.output.display(),
        "Surfaces ready; create {}.closed there to stop",
        INPUT_SURFACE
    );

    let summary = session::run(&scanner, &mut source, &mut input, &mut warp, cli.max_frames)?;
    info!(
        frames = summary.frames,
        found = summary.found,
        not_found = summary.not_found,
        skipped = summary.skipped,
        "Flatscan finished"
    );
    Ok(())
}
