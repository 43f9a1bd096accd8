//! Hamlet CLI
//!
//! Converts a single file, or every matching file under a directory tree,
//! from hamlet markup to HTML.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hamlet_common::Engine;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod convert;

use convert::{Converter, Format};

/// Convert hamlet markup files to HTML.
#[derive(Parser, Debug)]
#[command(name = "hamlet")]
#[command(version, about, long_about = None)]
struct Cli {
    /// A single file, or a directory to search for source files
    src: PathBuf,

    /// Where converted files go (defaults to the source directory)
    dst: Option<PathBuf>,

    /// Extensions of the source files to look for (repeatable)
    #[arg(short, long = "ext", value_name = "EXT", value_delimiter = ',', default_value = "haml")]
    ext: Vec<String>,

    /// Extension to save converted files with
    #[arg(short, long, value_name = "EXT", default_value = "html")]
    out: String,

    /// Template engine for block and variable lines
    #[arg(long, default_value_t = Engine::Jinja, conflicts_with = "no_engine")]
    engine: Engine,

    /// Disable block and variable lines entirely
    #[arg(long)]
    no_engine: bool,

    /// Print the converted file to standard output instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Emit the parsed tree as JSON instead of HTML
    #[arg(long)]
    tree: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let engine = (!cli.no_engine).then_some(cli.engine);
    let format = if cli.tree { Format::Tree } else { Format::Html };
    let converter = Converter::new(engine, format, &cli.ext, &cli.out, cli.verbose > 0);

    let result = if cli.stdout {
        converter.print_file(&cli.src)
    } else {
        converter.run(&cli.src, cli.dst.as_deref())
    };

    match result {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
