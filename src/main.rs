//! Amalgamator CLI - concatenate a filtered source tree into one document

use amalgamator::config::{self, AmalgamateOptions, AmalgamatorConfig};
use amalgamator::{ui, Amalgamator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "amalgamator")]
#[command(version)]
#[command(about = "Concatenate a gitignore-filtered source tree into a single text file")]
#[command(long_about = r#"
Walks the root directory, skips everything matched by the ignore file (default
.gitignore) and the built-in exclusions (.git, package-lock.json, the tool's own
files), and writes every remaining file as a record:

  Path: <relative path>
  Contents:
  <file contents>

Example usage:
  amalgamator
  amalgamator --root ../service --sort --exclude '*.min.js'
  amalgamator init
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root directory to amalgamate (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Output file; relative paths resolve against the root
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ignore file name at the root
    #[arg(long)]
    ignore_file: Option<String>,

    /// Extra gitignore-style pattern, applied after the ignore file (repeatable)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    excludes: Vec<String>,

    /// Sort directory entries by name for reproducible output
    #[arg(long)]
    sort: bool,

    /// Print a summary table after completion
    #[arg(long)]
    summary: bool,

    /// Path to the config file (defaults to <root>/amalgamator.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter amalgamator.toml at the root
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the completion line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config::default_config_path_in(&root));

    if let Some(Commands::Init { force }) = &cli.command {
        config::write_config(&config_path, &AmalgamatorConfig::starter(), *force)?;
        ui::success(&format!("Wrote {}", config_path.display()));
        return Ok(());
    }

    let mut options = AmalgamateOptions::new(&root);
    if let Some(file_config) = config::load_config(&config_path)? {
        tracing::debug!("Loaded config from {}", config_path.display());
        options = options.with_config(&file_config);
    }
    apply_cli(&mut options, &cli);
    let options = options.exclude_config_file(&config_path);

    let progress = ui::FileProgress::new();
    let summary = Amalgamator::new(options).run_with(|index, total, file| {
        progress.update(index, total, file);
    })?;
    progress.clear();

    ui::done(summary.files, &summary.output);

    for path in &summary.failed {
        ui::warn(&format!("Could not read {}", path.display()));
    }
    if cli.summary {
        println!("{}", ui::summary_table(&summary));
    }

    Ok(())
}

/// CLI flags win over the config file.
fn apply_cli(options: &mut AmalgamateOptions, cli: &Cli) {
    if let Some(output) = &cli.output {
        options.output = options.root.join(output);
    }
    if let Some(ignore_file) = &cli.ignore_file {
        options.ignore_file = ignore_file.clone();
    }
    options.extra_excludes.extend(cli.excludes.iter().cloned());
    if cli.sort {
        options.sort = true;
    }
}
