// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface of `atlas`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::BuildConfig;
use crate::{inspect, pipeline};

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "atlas", version)]
#[command(about = "Build and inspect renderer data for a graph map")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge, reconcile, rank and encode the graph, then write both artifacts
    Build {
        /// Rendered map whose circles mark the nodes to keep
        svg: Option<PathBuf>,
        /// Primary graph in DOT format
        graph: Option<PathBuf>,
        /// JSON build configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory receiving the artifacts
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Decode written artifacts and print a summary
    Inspect {
        /// JSON build configuration naming the artifacts
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the artifacts
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Number of top-ranked nodes to list
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<BuildConfig> {
    match path {
        Some(path) => BuildConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(BuildConfig::default()),
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Parses arguments, installs logging and runs the chosen command.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    match cli.command {
        Commands::Build {
            svg,
            graph,
            config,
            out_dir,
        } => {
            let config = load_config(config)?.with_overrides(svg, graph, out_dir);
            let outcome = pipeline::build(&config)?;
            let (table, links) = pipeline::write_outputs(&config, &outcome)?;
            for artifact in [&table, &links] {
                info!(
                    "Wrote {} ({} bytes, blake3 {})",
                    artifact.path.display(),
                    artifact.len,
                    artifact.digest
                );
            }
            info!("All done. Please do not forget to save optimized graph.svg file:");
            info!("  svgo -i svg/graph.svg -o - | scour > dist/graph.svg");
        }
        Commands::Inspect {
            config,
            out_dir,
            top,
            json,
        } => {
            let config = load_config(config)?.with_overrides(None, None, out_dir);
            let summary = inspect::inspect(&config, top)?;
            let mut out = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &summary)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", inspect::render(&summary))?;
            }
        }
    }
    Ok(())
}
