// file: src/config/loader.rs
// version: 2.0.0
// guid: d4e5f6a7-b8c9-4012-8456-890123def0a1

//! Kubeconfig file loading and merging

use super::{Kubeconfig, PathOptions};
use crate::{error::FedCtlError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and merges kubeconfig files following a [`PathOptions`] policy
pub struct KubeconfigLoader<'a> {
    path_options: &'a PathOptions,
}

impl<'a> KubeconfigLoader<'a> {
    pub fn new(path_options: &'a PathOptions) -> Self {
        Self { path_options }
    }

    /// Load every file in precedence order and merge them.
    ///
    /// A missing explicit file is an error. Missing files from the
    /// environment list or the global location are skipped.
    pub fn load(&self) -> Result<Kubeconfig> {
        let mut merged = Kubeconfig::default();

        for path in self.path_options.load_precedence() {
            if !path.exists() {
                if self.path_options.is_explicit_file() {
                    return Err(FedCtlError::kubeconfig(format!(
                        "explicitly specified kubeconfig {} does not exist",
                        path.display()
                    )));
                }
                debug!("Skipping missing kubeconfig {}", path.display());
                continue;
            }

            let config = Self::load_file(&path)?;
            merged.merge(config);
        }

        Ok(merged)
    }

    /// Parse a single kubeconfig file. An empty file is an empty config.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Kubeconfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FedCtlError::kubeconfig(format!(
                "Failed to read kubeconfig file {}: {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Kubeconfig::default());
        }

        debug!("Loading kubeconfig {}", path.display());
        serde_yaml::from_str(&content).map_err(|e| {
            FedCtlError::kubeconfig(format!(
                "Failed to parse kubeconfig file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
