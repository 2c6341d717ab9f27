use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Fixture constants
mod constants;

// Error handling
mod error;

// Timing instrumentation
mod perf;

// Series generation and frame assembly
mod data;

mod catalog;
mod config;
mod dialect;
mod generator;
mod postprocess;
mod writer;

use config::{ConfigOverrides, GeneratorConfig, WorldTimeTarget};
use constants::config::DEFAULT_LOG_FILTER;
use dialect::LineEnding;
use error::{FixtureError, Result};
use generator::FixtureGenerator;

#[derive(Parser, Debug)]
#[command(
    name = "csv-fixtures",
    about = "Generate CSV fixtures that exercise CSV importer edge cases"
)]
struct Cli {
    /// Directory to write fixtures into (defaults to the working directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON config file (defaults to ./csv-fixtures.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Line terminator for every record
    #[arg(long, value_enum)]
    line_ending: Option<LineEnding>,

    /// Where the world-time frame is written
    #[arg(long, value_enum)]
    world_time: Option<WorldTimeTarget>,

    /// Generate only these fixtures (id or file name); repeatable
    #[arg(long)]
    only: Vec<String>,

    /// Print the catalog and exit without writing
    #[arg(long)]
    list: bool,

    /// Write the generation report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// File the captured puffin frames are saved to
    #[cfg(feature = "profile-with-puffin")]
    #[arg(long, default_value = constants::config::PROFILE_FILE)]
    profile_out: PathBuf,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    #[cfg(feature = "profile-with-puffin")]
    let capture = perf::FrameCapture::start();
    #[cfg(feature = "profile-with-puffin")]
    let profile_out = cli.profile_out.clone();

    let result = run(cli);
    profiling::finish_frame!();

    #[cfg(feature = "profile-with-puffin")]
    save_profile(&capture, &profile_out);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            ExitCode::from(1)
        }
    }
}

#[cfg(feature = "profile-with-puffin")]
fn save_profile(capture: &perf::FrameCapture, path: &std::path::Path) {
    match capture.save(path) {
        Ok(()) => tracing::info!(path = %path.display(), "saved puffin profile"),
        Err(err) => tracing::warn!("could not save puffin profile: {err}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(FixtureError::FileIo)?;
    let config = GeneratorConfig::discover(cli.config.as_deref(), &cwd)?.apply_overrides(
        ConfigOverrides {
            out_dir: cli.out_dir,
            line_ending: cli.line_ending,
            world_time_target: cli.world_time,
            only: cli.only,
        },
    );
    tracing::debug!(?config, "resolved configuration");

    let generator = FixtureGenerator::new(config)?;

    if cli.list {
        for line in generator.catalog().describe_lines() {
            println!("{line}");
        }
        return Ok(());
    }

    let report = generator.run()?;

    if let Some(path) = cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&path, json).map_err(|e| FixtureError::io(&path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "csv-fixtures",
            "--out-dir",
            "testdata/csv",
            "--line-ending",
            "crlf",
            "--world-time",
            "standalone",
            "--only",
            "sincos",
            "--only",
            "dotsep.csv",
        ])
        .unwrap();

        assert_eq!(cli.out_dir, Some(PathBuf::from("testdata/csv")));
        assert_eq!(cli.line_ending, Some(LineEnding::Crlf));
        assert_eq!(cli.world_time, Some(WorldTimeTarget::Standalone));
        assert_eq!(cli.only, vec!["sincos", "dotsep.csv"]);
        assert!(!cli.list);
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = dir.path().join("report.json");
        let cli = Cli::try_parse_from([
            "csv-fixtures".into(),
            "--out-dir".into(),
            dir.path().as_os_str().to_owned(),
            "--only".into(),
            "squared".into(),
            "--report".into(),
            report.as_os_str().to_owned(),
        ])
        .unwrap();

        run(cli).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["fixtures"][0]["id"], "squared");
        assert_eq!(json["fixtures"][0]["rows"], 20);
    }

    #[test]
    fn test_list_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let out_dir = dir.path().join("x");
        let cli = Cli::try_parse_from([
            "csv-fixtures".into(),
            "--list".into(),
            "--out-dir".into(),
            out_dir.as_os_str().to_owned(),
        ])
        .unwrap();

        run(cli).unwrap();
        assert!(!out_dir.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
