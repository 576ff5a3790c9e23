//! exportscan — extract `// [[export]]`-marked C++ declarations.
//!
//! Collects source files, parses every marked declaration and writes the
//! resulting name → declaration mapping for binding generators:
//!
//! - `exportscan src/` — JSON on stdout
//! - `exportscan -f summary -o exports.txt src/*.cpp lib/extra.cc`

mod discover;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use exportscan_syntax::{build_registry, ScanOptions, Source};
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "exportscan",
    about = "Extract // [[export]]-marked function declarations from C++ sources"
)]
struct Cli {
    /// Source files, directories (searched recursively) or glob patterns
    #[arg(required = true)]
    paths: Vec<String>,

    /// File extensions collected from directories
    #[arg(short = 'e', long = "ext", value_delimiter = ',', default_values = ["cpp", "cc"])]
    extensions: Vec<String>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default) or summary
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    jobs: Option<NonZeroUsize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Source::new(path.to_string_lossy(), text))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Fail on a bad format before doing any work
    let renderer = render::create_renderer(&cli.format)?;

    let paths = discover::find_sources(&cli.paths, &cli.extensions)?;
    tracing::info!("scanning {} source file(s)", paths.len());
    let sources = read_sources(&paths)?;

    let options = match cli.jobs {
        Some(jobs) => ScanOptions { jobs },
        None => ScanOptions::default(),
    };
    let registry = match build_registry(&sources, &options) {
        Ok(registry) => registry,
        Err(err) => {
            for failure in &err.failures {
                tracing::error!("{}: {}", failure, failure.error);
            }
            return Err(err.into());
        }
    };
    tracing::info!("found {} export(s)", registry.len());

    let output = renderer.render(&registry)?;
    match cli.output {
        Some(path) => fs::write(&path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output),
    }

    Ok(())
}
