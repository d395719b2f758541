mod common;

use common::synthetic_image::{uniform_rgba, with_pixel};
use screendiff::capture::{DirectoryCapture, NoopGate, Scenario};
use screendiff::image::io::{load_rgba_image, save_rgba_image};
use screendiff::runner::{DirectorySink, RegressionRunner};
use screendiff::{DiffParams, GridSpec, HIGHLIGHT_RED};
use std::fs;
use std::path::Path;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn scenario(label: &str) -> Scenario {
    Scenario {
        label: label.to_string(),
        location: format!("/{label}"),
    }
}

fn write_screenshot(root: &Path, phase: &str, label: &str, image: &screendiff::image::RgbaImageU8) {
    let path = root.join(phase).join(format!("{label}.png"));
    save_rgba_image(image, &path).expect("write screenshot fixture");
}

#[test]
fn directory_round_trip_produces_annotated_results() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("tempdir");
    let shots = dir.path().join("screenshots");
    let out = dir.path().join("results");

    // "home" changes at a pixel covered by a whole-image cell; "about" is
    // byte-identical across phases.
    let base = uniform_rgba(16, 16, WHITE);
    write_screenshot(&shots, "baseline", "home", &base);
    write_screenshot(&shots, "updated", "home", &with_pixel(&base, 4, 4, BLACK));
    write_screenshot(&shots, "baseline", "about", &base);
    write_screenshot(&shots, "updated", "about", &base);

    let runner = RegressionRunner::new(DiffParams {
        grid: GridSpec {
            columns: 1,
            rows: 1,
            gap: 1,
        },
        ..Default::default()
    });
    let sink = DirectorySink::new(&out).with_reports(true);
    let outcomes = runner
        .run(
            &[scenario("home"), scenario("about")],
            &mut DirectoryCapture::new(&shots),
            &mut NoopGate,
            &sink,
        )
        .expect("run");

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].changed_cells, 1);
    assert_eq!(outcomes[1].changed_cells, 0);
    assert!(outcomes.iter().all(|o| !o.is_failure()));

    // Annotated image came back with the outline drawn at the cell origin.
    let annotated = load_rgba_image(&out.join("result_home.png")).expect("load result");
    assert_eq!(annotated.get_pixel(0, 0), Some(HIGHLIGHT_RED));
    assert_eq!(annotated.get_pixel(4, 4), Some(WHITE));

    // Unchanged scenario keeps its source pixels.
    let untouched = load_rgba_image(&out.join("result_about.png")).expect("load result");
    assert_eq!(untouched.get_pixel(0, 0), Some(WHITE));

    // JSON reports exist and carry the changed-cell count.
    let report = fs::read_to_string(out.join("result_home.json")).expect("report");
    assert!(report.contains("\"changed_cells\": 1"), "report: {report}");
}

#[test]
fn mismatched_scenario_fails_alone_in_a_parallel_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shots = dir.path().join("screenshots");
    let out = dir.path().join("results");

    let base = uniform_rgba(16, 16, WHITE);
    write_screenshot(&shots, "baseline", "home", &base);
    write_screenshot(&shots, "updated", "home", &base);
    write_screenshot(&shots, "baseline", "resized", &base);
    write_screenshot(&shots, "updated", "resized", &uniform_rgba(16, 20, WHITE));

    let runner =
        RegressionRunner::new(DiffParams::default()).with_parallel_analysis(true);
    let outcomes = runner
        .run(
            &[scenario("home"), scenario("resized")],
            &mut DirectoryCapture::new(&shots),
            &mut NoopGate,
            &DirectorySink::new(&out),
        )
        .expect("run");

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].is_failure());
    assert!(outcomes[1].is_failure());
    assert!(out.join("result_home.png").exists());
    assert!(!out.join("result_resized.png").exists());
}

#[test]
fn missing_screenshot_directory_fails_only_that_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shots = dir.path().join("screenshots");
    let out = dir.path().join("results");

    let base = uniform_rgba(8, 8, WHITE);
    write_screenshot(&shots, "baseline", "home", &base);
    write_screenshot(&shots, "updated", "home", &base);
    // "ghost" has no screenshots at all.

    let runner = RegressionRunner::new(DiffParams::default());
    let outcomes = runner
        .run(
            &[scenario("home"), scenario("ghost")],
            &mut DirectoryCapture::new(&shots),
            &mut NoopGate,
            &DirectorySink::new(&out),
        )
        .expect("run");

    assert!(!outcomes[0].is_failure());
    assert!(outcomes[1].is_failure());
    assert!(outcomes[1]
        .error
        .as_deref()
        .unwrap_or("")
        .contains("capture"));
}
