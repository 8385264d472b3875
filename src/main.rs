use anyhow::{Context, Result};
use clap::Parser;
use receipt_icon_gen::{contents_json::DEFAULT_MANIFEST_NAME, generate, GeneratorConfig, Outcome};
use std::{path::PathBuf, process::ExitCode};
use tracing::Level;

#[derive(Debug, Parser)]
#[clap(
    name = "receipt-icon-gen",
    about = "Render the receipt scanner app icon and its iOS asset catalog"
)]
struct Args {
    /// Output directory (the .appiconset folder).
    #[clap(short, long, value_name = "DIR", default_value = "./AppIcon.appiconset")]
    output: PathBuf,

    /// File name of the generated manifest.
    #[clap(long, value_name = "NAME", default_value = DEFAULT_MANIFEST_NAME)]
    manifest_name: String,

    /// Log every composited layer.
    #[clap(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = GeneratorConfig::new(args.output);
    config.manifest_name = args.manifest_name;

    let report = generate(config).context("Icon generation aborted")?;

    for asset in &report.written {
        println!("✓ Generated {}", asset.path.display());
    }
    if let Some(manifest) = &report.manifest {
        println!("✓ Generated {}", manifest.display());
    }
    for failure in &report.failures {
        eprintln!("✗ {failure}");
    }

    let code = match report.outcome() {
        Outcome::Complete => {
            println!("All {} icon sizes generated", report.written.len());
            0
        }
        Outcome::Partial => {
            eprintln!(
                "Partial success: {} written, {} failed",
                report.written.len(),
                report.failures.len()
            );
            2
        }
        Outcome::Failed => {
            eprintln!("No outputs could be written");
            1
        }
    };
    Ok(ExitCode::from(code))
}
