// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory capture and display, used to drive the control loop in tests.

use std::collections::VecDeque;

use flatscan_core::error::{FlatscanError, Result};
use image::RgbImage;

use crate::traits::{DisplaySurface, FrameSource};

enum Tick {
    Frame(RgbImage),
    Gap,
    Failure(String),
}

/// Frame source replaying a scripted queue of frames.
#[derive(Default)]
pub struct MemorySource {
    ticks: VecDeque<Tick>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            ticks: frames.into_iter().map(Tick::Frame).collect(),
        }
    }

    pub fn push_frame(&mut self, frame: RgbImage) {
        self.ticks.push_back(Tick::Frame(frame));
    }

    /// Queue a tick with no frame available.
    pub fn push_gap(&mut self) {
        self.ticks.push_back(Tick::Gap);
    }

    /// Queue a capture failure.
    pub fn push_failure(&mut self, reason: impl Into<String>) {
        self.ticks.push_back(Tick::Failure(reason.into()));
    }

    /// Ticks not yet consumed.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl FrameSource for MemorySource {
    fn is_open(&self) -> bool {
        !self.ticks.is_empty()
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        match self.ticks.pop_front() {
            Some(Tick::Frame(frame)) => Ok(Some(frame)),
            Some(Tick::Gap) | None => Ok(None),
            Some(Tick::Failure(reason)) => Err(FlatscanError::Capture(reason)),
        }
    }
}

/// Display surface that records everything shown on it.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    title: String,
    shown: Vec<RgbImage>,
    open: bool,
    close_after: Option<usize>,
}

impl MemoryDisplay {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            shown: Vec::new(),
            open: true,
            close_after: None,
        }
    }

    /// Close the surface once `count` images have been shown.
    pub fn close_after(mut self, count: usize) -> Self {
        self.close_after = Some(count);
        self.open = count > 0;
        self
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Every image shown so far, oldest first.
    pub fn shown(&self) -> &[RgbImage] {
        &self.shown
    }

    pub fn last(&self) -> Option<&RgbImage> {
        self.shown.last()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn title(&self) -> &str {
        &self.title
    }

    fn show(&mut self, image: &RgbImage) -> Result<()> {
        if !self.open {
            return Err(FlatscanError::Display(format!(
                "surface \"{}\" is closed",
                self.title
            )));
        }
        self.shown.push(image.clone());
        if self.close_after.is_some_and(|limit| self.shown.len() >= limit) {
            self.open = false;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
