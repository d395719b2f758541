use screendiff::capture::{DirectoryCapture, NoopGate, RefreshGate, StdinGate};
use screendiff::config::{self, Command, DiffCliConfig};
use screendiff::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use screendiff::runner::{DirectorySink, RegressionRunner};
use screendiff::{annotate, GridDiffer};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args().next().unwrap_or_else(|| "screendiff".to_string());
    match config::parse_cli(&program, env::args().skip(1))? {
        Command::Diff(cfg) => run_diff(&cfg),
        Command::Run(path) => run_scenarios(&path),
    }
}

fn run_diff(cfg: &DiffCliConfig) -> Result<(), String> {
    let before = load_rgba_image(&cfg.before)?;
    let after = load_rgba_image(&cfg.after)?;

    let differ = GridDiffer::new(cfg.params);
    let result = differ
        .diff(&before, &after)
        .map_err(|e| e.to_string())?;

    let annotated = annotate(&before, &result, screendiff::HIGHLIGHT_RED);
    save_rgba_image(&annotated, &cfg.output)?;

    println!("Diff summary");
    println!("  image: {}x{}", result.layout.image_width, result.layout.image_height);
    println!(
        "  grid: {}x{} pixel blocks",
        result.layout.block_width, result.layout.block_height
    );
    println!("  changed cells: {}", result.changed.len());
    println!("  annotated image: {}", cfg.output.display());

    if let Some(path) = &cfg.json_out {
        write_json_file(path, &result)?;
        println!("  JSON report: {}", path.display());
    }

    Ok(())
}

fn run_scenarios(config_path: &Path) -> Result<(), String> {
    let cfg = config::load_config(config_path)?;

    let mut capture = DirectoryCapture::new(&cfg.screenshot_dir);
    let mut stdin_gate = StdinGate;
    let mut noop_gate = NoopGate;
    let gate: &mut dyn RefreshGate = if cfg.interactive {
        &mut stdin_gate
    } else {
        &mut noop_gate
    };
    let sink = DirectorySink::new(&cfg.output_dir).with_reports(cfg.write_reports);
    let runner = RegressionRunner::new(cfg.diff)
        .with_highlight(cfg.highlight)
        .with_parallel_analysis(cfg.parallel);

    let outcomes = runner.run(&cfg.scenarios, &mut capture, gate, &sink)?;

    let mut failed = 0usize;
    println!("Scenario results");
    for outcome in &outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(path), _) => println!(
                "  {}: {} changed cells -> {}",
                outcome.label,
                outcome.changed_cells,
                path.display()
            ),
            (None, Some(err)) => {
                failed += 1;
                println!("  {}: FAILED ({err})", outcome.label);
            }
            (None, None) => println!("  {}: no output", outcome.label),
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} scenarios failed", outcomes.len()));
    }
    Ok(())
}
