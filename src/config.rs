//! Runtime configuration and CLI parsing for the `screendiff` binary.

use crate::capture::Scenario;
use crate::diff::DiffParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file schema for `screendiff run`.
///
/// ```json
/// {
///   "screenshot_dir": "screenshots",
///   "output_dir": "results",
///   "diff": { "grid": { "columns": 60, "rows": 80 } },
///   "scenarios": [ { "label": "home", "location": "/" } ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Root of the screenshot tree (`baseline/` and `updated/` beneath it).
    pub screenshot_dir: PathBuf,
    /// Directory receiving annotated images and reports.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub diff: DiffParams,
    /// RGBA highlight color for changed cells.
    #[serde(default = "default_highlight")]
    pub highlight: [u8; 4],
    /// Emit a JSON report next to each annotated image.
    #[serde(default)]
    pub write_reports: bool,
    /// Pause for operator confirmation between the capture phases.
    #[serde(default)]
    pub interactive: bool,
    /// Analyze scenario pairs on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    pub scenarios: Vec<Scenario>,
}

fn default_highlight() -> [u8; 4] {
    crate::annotate::HIGHLIGHT_RED
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RunConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Options for the single-pair `screendiff diff` mode.
#[derive(Debug)]
pub struct DiffCliConfig {
    pub before: PathBuf,
    pub after: PathBuf,
    pub output: PathBuf,
    pub json_out: Option<PathBuf>,
    pub params: DiffParams,
}

/// Parsed command line.
#[derive(Debug)]
pub enum Command {
    Diff(DiffCliConfig),
    Run(PathBuf),
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  \
         {program} diff <before.png> <after.png> [-o result.png] [--json report.json]\n      \
         [--columns N] [--rows N] [--gap N] [--normalizer F] [--sensitivity F]\n  \
         {program} run <config.json>"
    )
}

/// Hand-rolled argument parsing; `args` excludes the program name.
pub fn parse_cli<I>(program: &str, mut args: I) -> Result<Command, String>
where
    I: Iterator<Item = String>,
{
    match args.next().as_deref() {
        Some("diff") => parse_diff(program, args).map(Command::Diff),
        Some("run") => {
            let path = args
                .next()
                .ok_or_else(|| format!("Missing config path\n{}", usage(program)))?;
            if let Some(extra) = args.next() {
                return Err(format!("Unexpected argument '{extra}'\n{}", usage(program)));
            }
            Ok(Command::Run(PathBuf::from(path)))
        }
        Some("-h") | Some("--help") | None => Err(usage(program)),
        Some(other) => Err(format!("Unknown command '{other}'\n{}", usage(program))),
    }
}

fn parse_diff<I>(program: &str, mut args: I) -> Result<DiffCliConfig, String>
where
    I: Iterator<Item = String>,
{
    let mut positional: Vec<String> = Vec::new();
    let mut output = PathBuf::from("result.png");
    let mut json_out = None;
    let mut params = DiffParams::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => output = PathBuf::from(required_value(program, &arg, &mut args)?),
            "--json" => json_out = Some(PathBuf::from(required_value(program, &arg, &mut args)?)),
            "--columns" => params.grid.columns = parse_number(program, &arg, &mut args)?,
            "--rows" => params.grid.rows = parse_number(program, &arg, &mut args)?,
            "--gap" => params.grid.gap = parse_number(program, &arg, &mut args)?,
            "--normalizer" => params.sampler.channel_normalizer = parse_number(program, &arg, &mut args)?,
            "--sensitivity" => params.sampler.sensitivity = parse_number(program, &arg, &mut args)?,
            "-h" | "--help" => return Err(usage(program)),
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)))
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        return Err(format!(
            "Expected exactly two images, got {}\n{}",
            positional.len(),
            usage(program)
        ));
    }
    let mut positional = positional.into_iter();
    Ok(DiffCliConfig {
        before: PathBuf::from(positional.next().unwrap_or_default()),
        after: PathBuf::from(positional.next().unwrap_or_default()),
        output,
        json_out,
        params,
    })
}

fn required_value<I>(program: &str, flag: &str, args: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| format!("Missing value for {flag}\n{}", usage(program)))
}

fn parse_number<T, I>(program: &str, flag: &str, args: &mut I) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    I: Iterator<Item = String>,
{
    let raw = required_value(program, flag, args)?;
    raw.parse()
        .map_err(|e| format!("Invalid value '{raw}' for {flag}: {e}"))
}
