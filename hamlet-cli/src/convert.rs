//! File and directory conversion.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use hamlet_common::{Engine, ParseOptions};
use hamlet_parser::{Parser, render};
use owo_colors::OwoColorize;
use tracing::{debug, info};

/// What each converted file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Rendered HTML.
    Html,
    /// The parsed tree as pretty-printed JSON.
    Tree,
}

/// Counts reported once a run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files written successfully.
    pub converted: usize,
    /// Files that failed to parse.
    pub failed: usize,
}

/// Converts files with one fixed set of options.
#[derive(Debug)]
pub struct Converter {
    parser: Parser,
    format: Format,
    extensions: Vec<String>,
    out_extension: String,
    verbose: bool,
}

impl Converter {
    /// Build a converter. Extensions may be given with or without a
    /// leading dot.
    #[must_use]
    pub fn new(
        engine: Option<Engine>,
        format: Format,
        extensions: &[String],
        out_extension: &str,
        verbose: bool,
    ) -> Self {
        Self {
            parser: Parser::new(ParseOptions { engine }),
            format,
            extensions: extensions.iter().map(|ext| dotted(ext)).collect(),
            out_extension: dotted(out_extension),
            verbose,
        }
    }

    /// Convert `src` (a file or directory) into `dst`, which defaults to
    /// the source's own directory.
    pub fn run(&self, src: &Path, dst: Option<&Path>) -> Result<Summary> {
        if !src.exists() {
            bail!("source path does not exist: {}", src.display());
        }

        let started = Instant::now();
        let mut summary = Summary::default();

        if src.is_file() {
            let out_dir = match dst {
                Some(dst) => dst.to_path_buf(),
                None => parent_dir(src),
            };
            let out_name = self.output_name(src).unwrap_or_else(|| {
                let stem = src.file_stem().unwrap_or_default().to_string_lossy();
                format!("{stem}{}", self.out_extension)
            });
            self.convert_file(src, &out_dir.join(out_name), &mut summary)?;
        } else {
            let dst = dst.unwrap_or(src);
            fs::create_dir_all(dst)
                .with_context(|| format!("failed to create {}", dst.display()))?;
            let skip = nested_output_dir(src, dst)?;
            self.convert_dir(src, dst, skip.as_deref(), &mut summary)?;
        }

        let elapsed = started.elapsed().as_millis();
        println!(
            "{}",
            format!(
                "Finished converting {} file(s) in {elapsed} ms.",
                summary.converted
            )
            .green()
        );
        if summary.failed > 0 {
            println!(
                "{}",
                format!("FAILED: {} file(s) failed to compile.", summary.failed).red()
            );
        }
        Ok(summary)
    }

    /// Convert a single file and print the result to standard output.
    pub fn print_file(&self, src: &Path) -> Result<Summary> {
        if !src.is_file() {
            bail!("--stdout needs a single source file, got {}", src.display());
        }
        let source = read_source(src)?;
        match self.compile(&source, src) {
            Ok(output) => {
                println!("{output}");
                Ok(Summary {
                    converted: 1,
                    failed: 0,
                })
            }
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                Ok(Summary {
                    converted: 0,
                    failed: 1,
                })
            }
        }
    }

    fn convert_dir(
        &self,
        dir: &Path,
        out_dir: &Path,
        skip: Option<&Path>,
        summary: &mut Summary,
    ) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to read directory {}", dir.display()))?;
        entries.sort_by_key(fs::DirEntry::path);

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                if skip.is_some_and(|skip| is_same_dir(&path, skip)) {
                    debug!(path = %path.display(), "skipping output directory");
                    continue;
                }
                self.convert_dir(&path, &out_dir.join(entry.file_name()), skip, summary)?;
            } else if let Some(out_name) = self.output_name(&path) {
                self.convert_file(&path, &out_dir.join(out_name), summary)?;
            }
        }
        Ok(())
    }

    fn convert_file(&self, input: &Path, output: &Path, summary: &mut Summary) -> Result<()> {
        if self.verbose {
            println!();
            println!("Input file:   {}", input.display());
            println!("Output file:  {}", output.display());
        }

        let started = Instant::now();
        let source = read_source(input)?;
        let result = self.compile(&source, input);
        let elapsed = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(html) => {
                if let Some(parent) = output.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                fs::write(output, html)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                info!(input = %input.display(), output = %output.display(), "converted");
                summary.converted += 1;
                if self.verbose {
                    println!("Conversion took {elapsed:.3} ms");
                }
            }
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                summary.failed += 1;
                if self.verbose {
                    println!("Conversion took {elapsed:.3} ms {}", "(FAILED)".red());
                }
            }
        }
        Ok(())
    }

    fn compile(&self, source: &str, path: &Path) -> Result<String> {
        let name = path.display().to_string();
        let document = self
            .parser
            .parse(source)
            .map_err(|e| e.with_source(name.clone()))?;
        let output = match self.format {
            Format::Html => render(&document).map_err(|e| e.with_source(name))?,
            Format::Tree => serde_json::to_string_pretty(&document)
                .map_err(|e| anyhow!("failed to serialize the parsed tree: {e}"))?,
        };
        Ok(output)
    }

    /// Output file name for `path`, if it has one of the source extensions.
    fn output_name(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        self.extensions.iter().find_map(|ext| {
            name.strip_suffix(ext.as_str())
                .filter(|stem| !stem.is_empty())
                .map(|stem| format!("{stem}{}", self.out_extension))
        })
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn dotted(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// The canonical output directory when it lies strictly inside the source
/// tree and must be left out of the walk.
fn nested_output_dir(src: &Path, dst: &Path) -> Result<Option<PathBuf>> {
    let src = src
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", src.display()))?;
    let dst = dst
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", dst.display()))?;
    Ok((dst != src && dst.starts_with(&src)).then_some(dst))
}

fn is_same_dir(path: &Path, canonical: &Path) -> bool {
    path.canonicalize().is_ok_and(|path| path == canonical)
}
