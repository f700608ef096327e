use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use docdelta_core::{run_repository, Config};
use tracing_subscriber::EnvFilter;

/// Report documentation comment changes between two git revisions.
#[derive(Debug, Parser)]
#[command(name = "docdelta", version)]
struct Cli {
    /// Repository to inspect; parent directories are searched.
    #[arg(long, default_value = ".")]
    repo: Utf8PathBuf,
    /// TOML file providing defaults for the options below.
    #[arg(long)]
    config: Option<Utf8PathBuf>,
    /// Directory prefix whose files are compared.
    #[arg(long)]
    source_dir: Option<Utf8PathBuf>,
    /// Report destination.
    #[arg(long)]
    output: Option<Utf8PathBuf>,
    /// File suffix to compare, e.g. `.ts`.
    #[arg(long)]
    extension: Option<String>,
    /// Revision holding the previous contents.
    #[arg(long)]
    base: Option<String>,
    /// Revision whose changes are listed.
    #[arg(long)]
    head: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<(Utf8PathBuf, Config)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load configuration from {path}"))?,
            None => Config::default(),
        };

        if let Some(source_dir) = self.source_dir {
            config.source_directory = source_dir;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        if let Some(base) = self.base {
            config.base_revision = base;
        }
        if let Some(head) = self.head {
            config.head_revision = head;
        }

        Ok((self.repo, config))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (repo_path, config) = Cli::parse().into_config()?;
    let output = config.output_file.clone();
    run_repository(repo_path.as_std_path(), config)
        .with_context(|| format!("failed to write report to {output}"))?;

    Ok(())
}
