//! Scenario pipeline: capture both phases, diff each pair, persist results.
//!
//! The flow mirrors the interactive regression session: all baseline
//! screenshots are captured first, the refresh gate fires once, then all
//! updated screenshots are captured and every pair is analyzed. Pairs are
//! independent, so the analysis phase can fan out across threads.

use crate::annotate::annotate;
use crate::capture::{Phase, RefreshGate, Scenario, ScreenCapture};
use crate::diff::{DiffParams, DiffResult, GridDiffer};
use crate::image::io::{save_rgba_image, write_json_file};
use crate::image::RgbaImageU8;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// Persists one scenario's annotated image and diff result. Owns the naming
/// scheme; the pipeline never touches the filesystem directly.
pub trait ResultSink: Sync {
    fn persist(
        &self,
        scenario: &Scenario,
        annotated: &RgbaImageU8,
        result: &DiffResult,
    ) -> Result<PathBuf, String>;
}

/// Writes `result_<label>.png` (and optionally `result_<label>.json`) into a
/// single output directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    root: PathBuf,
    write_reports: bool,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_reports: false,
        }
    }

    /// Also emit a JSON report next to each annotated image.
    pub fn with_reports(mut self, write_reports: bool) -> Self {
        self.write_reports = write_reports;
        self
    }
}

#[derive(Serialize)]
struct ScenarioReport<'a> {
    label: &'a str,
    location: &'a str,
    changed_cells: usize,
    result: &'a DiffResult,
}

impl ResultSink for DirectorySink {
    fn persist(
        &self,
        scenario: &Scenario,
        annotated: &RgbaImageU8,
        result: &DiffResult,
    ) -> Result<PathBuf, String> {
        let image_path = self.root.join(format!("result_{}.png", scenario.label));
        save_rgba_image(annotated, &image_path)?;
        if self.write_reports {
            let report_path = self.root.join(format!("result_{}.json", scenario.label));
            let report = ScenarioReport {
                label: &scenario.label,
                location: &scenario.location,
                changed_cells: result.changed.len(),
                result,
            };
            write_json_file(&report_path, &report)?;
        }
        Ok(image_path)
    }
}

/// Per-scenario outcome of a run. `error` is set when capture, diff, or
/// persistence failed; the run itself keeps going.
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub changed_cells: usize,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl ScenarioOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    fn failed(label: &str, error: String) -> Self {
        Self {
            label: label.to_string(),
            changed_cells: 0,
            output: None,
            error: Some(error),
        }
    }
}

struct CapturedPair {
    scenario: Scenario,
    baseline: Result<RgbaImageU8, String>,
    updated: Result<RgbaImageU8, String>,
}

/// Drives a full regression session over a scenario list.
pub struct RegressionRunner {
    differ: GridDiffer,
    highlight: [u8; 4],
    parallel: bool,
}

impl RegressionRunner {
    pub fn new(params: DiffParams) -> Self {
        Self {
            differ: GridDiffer::new(params),
            highlight: crate::annotate::HIGHLIGHT_RED,
            parallel: false,
        }
    }

    /// Overrides the highlight color drawn over changed cells.
    pub fn with_highlight(mut self, color: [u8; 4]) -> Self {
        self.highlight = color;
        self
    }

    /// Analyze scenario pairs on the rayon pool instead of sequentially.
    /// Capture stays sequential either way; backends drive one browser.
    pub fn with_parallel_analysis(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs the session: baseline captures, one gate wait, updated captures,
    /// then diff + annotate + persist per scenario.
    ///
    /// Only a gate failure aborts the run. Everything per-scenario is
    /// recorded in that scenario's outcome instead.
    pub fn run(
        &self,
        scenarios: &[Scenario],
        capture: &mut dyn ScreenCapture,
        gate: &mut dyn RefreshGate,
        sink: &dyn ResultSink,
    ) -> Result<Vec<ScenarioOutcome>, String> {
        let mut baselines = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            debug!("capturing baseline for {}", scenario.label);
            baselines.push(capture.capture(scenario, Phase::Baseline));
        }

        gate.wait()?;

        let mut pairs = Vec::with_capacity(scenarios.len());
        for (scenario, baseline) in scenarios.iter().zip(baselines) {
            debug!("capturing updated for {}", scenario.label);
            let updated = capture.capture(scenario, Phase::Updated);
            pairs.push(CapturedPair {
                scenario: scenario.clone(),
                baseline,
                updated,
            });
        }

        let outcomes = if self.parallel {
            pairs
                .par_iter()
                .map(|pair| self.analyze(pair, sink))
                .collect()
        } else {
            pairs.iter().map(|pair| self.analyze(pair, sink)).collect()
        };
        Ok(outcomes)
    }

    fn analyze(&self, pair: &CapturedPair, sink: &dyn ResultSink) -> ScenarioOutcome {
        let label = &pair.scenario.label;
        let baseline = match &pair.baseline {
            Ok(image) => image,
            Err(e) => {
                warn!("{label}: baseline capture failed: {e}");
                return ScenarioOutcome::failed(label, format!("baseline capture: {e}"));
            }
        };
        let updated = match &pair.updated {
            Ok(image) => image,
            Err(e) => {
                warn!("{label}: updated capture failed: {e}");
                return ScenarioOutcome::failed(label, format!("updated capture: {e}"));
            }
        };

        let result = match self.differ.diff(baseline, updated) {
            Ok(result) => result,
            Err(e) => {
                warn!("{label}: diff failed: {e}");
                return ScenarioOutcome::failed(label, e.to_string());
            }
        };

        let annotated = annotate(baseline, &result, self.highlight);
        match sink.persist(&pair.scenario, &annotated, &result) {
            Ok(path) => {
                info!(
                    "{label}: {} changed cells -> {}",
                    result.changed.len(),
                    path.display()
                );
                ScenarioOutcome {
                    label: label.clone(),
                    changed_cells: result.changed.len(),
                    output: Some(path),
                    error: None,
                }
            }
            Err(e) => {
                warn!("{label}: failed to persist result: {e}");
                ScenarioOutcome::failed(label, format!("persist: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::NoopGate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    struct MapCapture {
        images: HashMap<(String, Phase), RgbaImageU8>,
    }

    impl ScreenCapture for MapCapture {
        fn capture(&mut self, scenario: &Scenario, phase: Phase) -> Result<RgbaImageU8, String> {
            self.images
                .get(&(scenario.label.clone(), phase))
                .cloned()
                .ok_or_else(|| format!("no screenshot for {} {:?}", scenario.label, phase))
        }
    }

    struct MemorySink {
        persisted: Mutex<Vec<(String, usize)>>,
    }

    impl ResultSink for MemorySink {
        fn persist(
            &self,
            scenario: &Scenario,
            _annotated: &RgbaImageU8,
            result: &DiffResult,
        ) -> Result<PathBuf, String> {
            self.persisted
                .lock()
                .map_err(|e| e.to_string())?
                .push((scenario.label.clone(), result.changed.len()));
            Ok(PathBuf::from(format!("result_{}.png", scenario.label)))
        }
    }

    fn scenario(label: &str) -> Scenario {
        Scenario {
            label: label.to_string(),
            location: format!("/{label}"),
        }
    }

    #[test]
    fn one_bad_scenario_does_not_abort_the_run() {
        let mut images = HashMap::new();
        // "home" is fine; "about" has mismatched dimensions.
        let base = RgbaImageU8::from_pixel(12, 12, WHITE);
        let mut changed = base.clone();
        changed.put_pixel(1, 1, [0, 0, 0, 255]);
        images.insert(("home".to_string(), Phase::Baseline), base.clone());
        images.insert(("home".to_string(), Phase::Updated), changed);
        images.insert(("about".to_string(), Phase::Baseline), base.clone());
        images.insert(
            ("about".to_string(), Phase::Updated),
            RgbaImageU8::from_pixel(12, 13, WHITE),
        );

        let runner = RegressionRunner::new(DiffParams {
            grid: crate::grid::GridSpec {
                columns: 3,
                rows: 3,
                gap: 1,
            },
            ..Default::default()
        });
        let sink = MemorySink {
            persisted: Mutex::new(Vec::new()),
        };
        let outcomes = runner
            .run(
                &[scenario("home"), scenario("about")],
                &mut MapCapture { images },
                &mut NoopGate,
                &sink,
            )
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_failure());
        assert!(outcomes[0].changed_cells > 0);
        assert!(outcomes[1].is_failure());
        assert!(
            outcomes[1].error.as_deref().unwrap_or("").contains("differ"),
            "expected a dimension error, got {:?}",
            outcomes[1].error
        );

        let persisted = sink.persisted.lock().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].0, "home");
    }

    #[test]
    fn missing_capture_is_reported_per_scenario() {
        let runner = RegressionRunner::new(DiffParams::default());
        let sink = MemorySink {
            persisted: Mutex::new(Vec::new()),
        };
        let outcomes = runner
            .run(
                &[scenario("ghost")],
                &mut MapCapture {
                    images: HashMap::new(),
                },
                &mut NoopGate,
                &sink,
            )
            .unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_failure());
        assert!(sink.persisted.lock().unwrap().is_empty());
    }
}
