#![warn(clippy::all, clippy::dbg_macro)]

use std::process::ExitCode;

use anstream::{eprintln, println};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use dapr_guard::config::{DeploymentTarget, OutputFormat, RunConfig};
use dapr_guard::report;

#[cfg(not(any(target_family = "windows", target_os = "openbsd")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Cross-file static analysis for sidecar-platform configuration.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// The project root to analyze. Defaults to the current directory.
    #[arg(default_value = ".")]
    path: Utf8PathBuf,

    /// Emit findings as JSON instead of the default human-readable report.
    #[arg(long)]
    json: bool,

    /// Exit non-zero if any error-severity finding is reported.
    #[arg(long)]
    strict: bool,

    /// In strict mode, also exit non-zero on warning-severity findings.
    #[arg(long)]
    warnings_as_errors: bool,

    /// The deployment platform whose resource ceilings X-QUOTA checks against.
    #[arg(long, value_enum, default_value_t)]
    deployment_target: DeploymentTarget,

    /// Treat this run as analyzing a production deployment (affects X-MTLS).
    #[arg(long)]
    production: bool,

    /// Control the use of color in output.
    #[arg(long, value_enum, value_name = "MODE")]
    color: Option<ColorMode>,

    /// Increase logging verbosity. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for anstream::ColorChoice {
    fn from(value: ColorMode) -> Self {
        match value {
            ColorMode::Auto => Self::Auto,
            ColorMode::Always => Self::Always,
            ColorMode::Never => Self::Never,
        }
    }
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli) -> ExitCode {
    let config = RunConfig {
        deployment_target: cli.deployment_target,
        is_production: cli.production,
        strict: cli.strict,
        warnings_as_errors: cli.warnings_as_errors,
        format: if cli.json { OutputFormat::Json } else { OutputFormat::Human },
    };

    let outcome = match dapr_guard::run(&cli.path, &config) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}: {err}", "fatal".red().bold());
            return ExitCode::from(2);
        }
    };

    match config.format {
        OutputFormat::Human => {
            report::render_human(&cli.path, &outcome.project, &outcome.graph, &outcome.findings)
        }
        OutputFormat::Json => match report::render_json(&outcome.project, &outcome.graph, &outcome.findings) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{}: failed to serialize report: {err}", "fatal".red().bold());
                return ExitCode::FAILURE;
            }
        },
    }

    let code = report::exit_code(&outcome.findings, cli.strict, cli.warnings_as_errors);
    ExitCode::from(code)
}

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let color_mode = match cli.color {
        Some(mode) => mode,
        None if std::env::var("NO_COLOR").is_ok() => ColorMode::Never,
        None => ColorMode::Auto,
    };
    anstream::ColorChoice::write_global(color_mode.into());

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_filter(cli.verbose).parse().expect("valid directive"))
        .from_env()
        .expect("failed to parse RUST_LOG");

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();

    run(&cli)
}
