//! Collaborator seams around the diff core: screenshot acquisition and the
//! manual refresh gate between the two capture phases.
//!
//! Browser automation deliberately lives behind [`ScreenCapture`]; the crate
//! only ships a filesystem-backed implementation that reads screenshots some
//! other process already captured.

use crate::image::io::load_rgba_image;
use crate::image::RgbaImageU8;
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// One row of the scenario list: a human-readable label and the page
/// location a capture backend should visit. How the list is produced (CSV,
/// hardcoded, generated) is the caller's concern.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub location: String,
}

/// The two capture stages of a regression run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Baseline,
    Updated,
}

impl Phase {
    pub fn dir_name(self) -> &'static str {
        match self {
            Phase::Baseline => "baseline",
            Phase::Updated => "updated",
        }
    }
}

/// Supplies one screenshot per scenario and phase.
pub trait ScreenCapture {
    fn capture(&mut self, scenario: &Scenario, phase: Phase) -> Result<RgbaImageU8, String>;
}

/// Reads pre-captured screenshots from `<root>/<phase>/<label>.png`.
#[derive(Clone, Debug)]
pub struct DirectoryCapture {
    root: PathBuf,
}

impl DirectoryCapture {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, scenario: &Scenario, phase: Phase) -> PathBuf {
        self.root
            .join(phase.dir_name())
            .join(format!("{}.png", scenario.label))
    }
}

impl ScreenCapture for DirectoryCapture {
    fn capture(&mut self, scenario: &Scenario, phase: Phase) -> Result<RgbaImageU8, String> {
        load_rgba_image(&self.path_for(scenario, phase))
    }
}

/// Synchronization point between the baseline and updated capture phases.
///
/// The classic flow is interactive: capture everything, ask the operator to
/// refresh/deploy the site, then capture everything again.
pub trait RefreshGate {
    fn wait(&mut self) -> Result<(), String>;
}

/// Prompts on stderr and blocks until the operator presses Enter.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdinGate;

impl RefreshGate for StdinGate {
    fn wait(&mut self) -> Result<(), String> {
        eprint!("Refresh the site under test, then press Enter to continue... ");
        io::stderr()
            .flush()
            .map_err(|e| format!("Failed to flush prompt: {e}"))?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read confirmation: {e}"))?;
        Ok(())
    }
}

/// Passes straight through; for batch runs over already-captured trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopGate;

impl RefreshGate for NoopGate {
    fn wait(&mut self) -> Result<(), String> {
        Ok(())
    }
}
