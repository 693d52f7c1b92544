// file: src/config/fed_config.rs
// version: 1.1.0
// guid: 61f8b2d7-3e0a-4c95-9d47-a2c5e8b1f06e

//! Shared federation configuration handed to every subcommand

use super::{Kubeconfig, KubeconfigLoader, PathOptions};
use crate::{error::FedCtlError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Connection details for one cluster, resolved from a kubeconfig context
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAccess {
    pub context: String,
    pub cluster_name: String,
    /// API server URL
    pub server: String,
    pub namespace: Option<String>,
    pub ca_data: Option<String>,
    /// Kubeconfig to pass to kubectl; `None` lets kubectl use its defaults
    pub kubeconfig: Option<PathBuf>,
}

/// Created once at startup and shared read-only by all subcommands.
#[derive(Debug, Clone)]
pub struct FedConfig {
    path_options: PathOptions,
}

impl FedConfig {
    pub fn new(path_options: PathOptions) -> Self {
        Self { path_options }
    }

    pub fn path_options(&self) -> &PathOptions {
        &self.path_options
    }

    /// The merged kubeconfig
    pub fn kubeconfig(&self) -> Result<Kubeconfig> {
        KubeconfigLoader::new(&self.path_options).load()
    }

    /// Access to the host cluster. An empty or missing context falls back
    /// to the kubeconfig's current context.
    pub fn host_config(&self, context: Option<&str>) -> Result<ClusterAccess> {
        let kubeconfig = self.kubeconfig()?;
        let context = match context.filter(|c| !c.is_empty()) {
            Some(c) => c.to_string(),
            None => kubeconfig
                .current_context
                .clone()
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    FedCtlError::kubeconfig(
                        "no host cluster context given and the kubeconfig has no current context",
                    )
                })?,
        };
        self.resolve(&kubeconfig, &context)
    }

    /// Access to a member cluster through the named context
    pub fn cluster_config(&self, context: &str) -> Result<ClusterAccess> {
        let kubeconfig = self.kubeconfig()?;
        self.resolve(&kubeconfig, context)
    }

    fn resolve(&self, kubeconfig: &Kubeconfig, context_name: &str) -> Result<ClusterAccess> {
        let context = kubeconfig.context(context_name).ok_or_else(|| {
            FedCtlError::kubeconfig(format!(
                "context \"{}\" does not exist in kubeconfig (known contexts: {})",
                context_name,
                kubeconfig.context_names().join(", ")
            ))
        })?;

        let cluster = kubeconfig.cluster(&context.cluster).ok_or_else(|| {
            FedCtlError::kubeconfig(format!(
                "cluster \"{}\" referenced by context \"{}\" does not exist",
                context.cluster, context_name
            ))
        })?;

        url::Url::parse(&cluster.server).map_err(|e| {
            FedCtlError::kubeconfig(format!(
                "cluster \"{}\" has invalid server \"{}\": {}",
                context.cluster, cluster.server, e
            ))
        })?;

        debug!(
            "Resolved context {} to cluster {} at {}",
            context_name, context.cluster, cluster.server
        );

        Ok(ClusterAccess {
            context: context_name.to_string(),
            cluster_name: context.cluster.clone(),
            server: cluster.server.clone(),
            namespace: context.namespace.clone(),
            ca_data: cluster.certificate_authority_data.clone(),
            kubeconfig: self.path_options.explicit_file.clone(),
        })
    }
}
