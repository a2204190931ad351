use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codechunk_chunker::GrammarRegistry;
use codechunk_walker::{chunk_repository, chunk_single_file};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "codechunk")]
#[command(about = "Chunk source files and repositories for indexing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a single file into one JSON document
    File {
        /// Input file
        input: PathBuf,
        /// Output JSON path
        output: PathBuf,
    },
    /// Chunk a repository tree into combined, code, non-code and error documents
    Repo {
        /// Repository root
        root: PathBuf,
        /// Combined output JSON path; code/non-code views are written
        /// alongside with `.code.json` / `.noncode.json` suffixes
        output: PathBuf,
        /// Error document JSON path
        errors: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let started = Instant::now();
    let registry = GrammarRegistry::load_defaults();

    match cli.command {
        Commands::File { input, output } => {
            let chunks = chunk_single_file(&input, &registry)
                .with_context(|| format!("chunking {}", input.display()))?;
            write_json(&output, &chunks)?;

            println!("Processed {}", input.display());
            println!("Total chunks: {}", chunks.len());
            println!("Elapsed: {:.2}s", started.elapsed().as_secs_f64());
        }
        Commands::Repo {
            root,
            output,
            errors,
        } => {
            let result = chunk_repository(&root, &registry)
                .with_context(|| format!("chunking repository {}", root.display()))?;

            let combined: Vec<_> = result.combined().collect();
            write_json(&output, &combined)?;
            write_json(&with_view_suffix(&output, "code"), &result.code_chunks)?;
            write_json(&with_view_suffix(&output, "noncode"), &result.non_code_chunks)?;
            write_json(&errors, &result.errors)?;

            println!(
                "Processed {} code chunks and {} non-code chunks",
                result.code_chunks.len(),
                result.non_code_chunks.len()
            );
            println!("Output written to: {}", output.display());
            println!("Errors written to: {} ({} entries)", errors.display(), result.errors.len());
            println!("Elapsed: {:.2}s", started.elapsed().as_secs_f64());
        }
    }

    Ok(())
}

/// Serialize to pretty JSON, creating parent directories as needed
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file =
        fs::File::create(path).with_context(|| format!("writing {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    Ok(())
}

/// Derive a filtered-view path: `chunks.json` -> `chunks.code.json`
fn with_view_suffix(path: &Path, view: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string());
    path.with_file_name(format!("{stem}.{view}.{ext}"))
}
