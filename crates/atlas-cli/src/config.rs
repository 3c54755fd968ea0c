// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Build configuration loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file does not exist.
    #[error("not found")]
    NotFound,
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Inputs and outputs of one build run. Relative paths resolve against the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Rendered map with one circle per node.
    pub svg: PathBuf,
    /// Primary graph (DOT).
    pub graph: PathBuf,
    /// Graphs merged into the primary one, in order.
    pub augmentations: Vec<PathBuf>,
    /// Directory receiving both artifacts; created if absent.
    pub out_dir: PathBuf,
    /// File name of the node-id table.
    pub node_table_file: String,
    /// File name of the adjacency stream.
    pub adjacency_file: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            svg: PathBuf::from("svg/graph.svg"),
            graph: PathBuf::from("graph/reddit-graph.dot"),
            augmentations: vec![Path::new("graph").join("add").join("new-nodes.dot")],
            out_dir: PathBuf::from("dist"),
            node_table_file: "node-ids.txt".to_owned(),
            adjacency_file: "links.bin".to_owned(),
        }
    }
}

impl BuildConfig {
    /// Loads a config file; keys it omits keep their defaults.
    ///
    /// # Errors
    /// [`ConfigError::NotFound`] when `path` does not exist, `Io` for other
    /// read failures and `Serde` for invalid JSON or unknown keys.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound)
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Applies command-line values over file or default values.
    pub fn with_overrides(
        mut self,
        svg: Option<PathBuf>,
        graph: Option<PathBuf>,
        out_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(svg) = svg {
            self.svg = svg;
        }
        if let Some(graph) = graph {
            self.graph = graph;
        }
        if let Some(out_dir) = out_dir {
            self.out_dir = out_dir;
        }
        self
    }

    /// Path of the node-id table.
    pub fn node_table_path(&self) -> PathBuf {
        self.out_dir.join(&self.node_table_file)
    }

    /// Path of the adjacency stream.
    pub fn adjacency_path(&self) -> PathBuf {
        self.out_dir.join(&self.adjacency_file)
    }
}
