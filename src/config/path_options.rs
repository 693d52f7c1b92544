// file: src/config/path_options.rs
// version: 1.0.0
// guid: 0a7c3e15-d94b-4f62-8b01-e5c2a6f97d3b

//! Where kubeconfig files are looked up

use crate::{error::FedCtlError, Result};
use std::path::PathBuf;

/// Environment variable holding a list of kubeconfig paths
pub const RECOMMENDED_CONFIG_PATH_ENV_VAR: &str = "KUBECONFIG";

/// Kubeconfig location policy.
///
/// An explicit file (from `--kubeconfig`) replaces everything else. Without
/// one, every path listed in `KUBECONFIG` is merged in order, and only when
/// that variable is unset or empty is `~/.kube/config` used.
#[derive(Debug, Clone)]
pub struct PathOptions {
    pub global_file: PathBuf,
    pub env_var: String,
    pub explicit_file: Option<PathBuf>,
    env_value: Option<String>,
}

impl PathOptions {
    /// Default options: `~/.kube/config` and the `KUBECONFIG` variable
    pub fn new_default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            global_file: home.join(".kube").join("config"),
            env_var: RECOMMENDED_CONFIG_PATH_ENV_VAR.to_string(),
            explicit_file: None,
            env_value: std::env::var(RECOMMENDED_CONFIG_PATH_ENV_VAR).ok(),
        }
    }

    /// Use the given file instead of the default search. `~` and `$VAR` are
    /// expanded.
    pub fn with_explicit_file(mut self, path: Option<&str>) -> Result<Self> {
        self.explicit_file = match path.filter(|p| !p.is_empty()) {
            Some(p) => {
                let expanded = shellexpand::full(p).map_err(|e| {
                    FedCtlError::config(format!("Failed to expand kubeconfig path {}: {}", p, e))
                })?;
                Some(PathBuf::from(expanded.as_ref()))
            }
            None => None,
        };
        Ok(self)
    }

    /// Override the environment value, mostly useful in tests
    pub fn with_env_value(mut self, value: Option<String>) -> Self {
        self.env_value = value;
        self
    }

    /// Override the global file location
    pub fn with_global_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_file = path.into();
        self
    }

    pub fn is_explicit_file(&self) -> bool {
        self.explicit_file.is_some()
    }

    /// Paths listed in the environment variable, empty entries dropped
    pub fn env_files(&self) -> Vec<PathBuf> {
        match self.env_value.as_deref() {
            Some(value) if !value.is_empty() => std::env::split_paths(value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Files to read, highest precedence first
    pub fn load_precedence(&self) -> Vec<PathBuf> {
        if let Some(ref explicit) = self.explicit_file {
            return vec![explicit.clone()];
        }
        let env_files = self.env_files();
        if !env_files.is_empty() {
            return env_files;
        }
        vec![self.global_file.clone()]
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self::new_default()
    }
}
