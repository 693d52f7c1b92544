// file: src/cli/commands/mod.rs
// version: 1.0.0
// guid: 0e4b7d29-a61c-4f83-95d0-2b8c7f1e6a37

//! Subcommand implementations
//!
//! Each subcommand receives the shared [`crate::config::FedConfig`] by
//! reference and writes user facing output to the writer it is given.

pub mod disable;
pub mod enable;
pub mod federate;
pub mod join;
#[cfg(test)]
pub(crate) mod testing;
pub mod unjoin;
pub mod version;

use super::args::OutputFormat;
use crate::{
    config::{DEFAULT_FEDERATED_GROUP, DEFAULT_FEDERATION_NAMESPACE, DEFAULT_FEDERATION_VERSION},
    federation::to_yaml_documents,
    utils::ValidationUtils,
    Result,
};
use clap::Args;
use serde_json::{json, Value};
use std::io::Write;

/// Host cluster selection
#[derive(Args, Debug, Clone, Default)]
pub struct HostClusterArgs {
    /// Host cluster context; defaults to the kubeconfig's current context
    #[arg(long, value_name = "CONTEXT")]
    pub host_cluster_context: Option<String>,
}

/// Where federation resources live
#[derive(Args, Debug, Clone)]
pub struct FederationArgs {
    /// Namespace of the federation control plane
    #[arg(long, default_value = DEFAULT_FEDERATION_NAMESPACE)]
    pub federation_namespace: String,

    /// API group of federated types
    #[arg(long, default_value = DEFAULT_FEDERATED_GROUP)]
    pub federated_group: String,

    /// API version of federation resources
    #[arg(long, default_value = DEFAULT_FEDERATION_VERSION)]
    pub federation_version: String,
}

impl Default for FederationArgs {
    fn default() -> Self {
        Self {
            federation_namespace: DEFAULT_FEDERATION_NAMESPACE.to_string(),
            federated_group: DEFAULT_FEDERATED_GROUP.to_string(),
            federation_version: DEFAULT_FEDERATION_VERSION.to_string(),
        }
    }
}

impl FederationArgs {
    pub fn validate(&self) -> Result<()> {
        ValidationUtils::validate_dns1123_label("federation namespace", &self.federation_namespace)?;
        ValidationUtils::validate_dns1123_subdomain("federated group", &self.federated_group)?;
        ValidationUtils::validate_dns1123_label("federation version", &self.federation_version)
    }
}

/// Print manifests instead of applying them
pub fn write_manifests(out: &mut dyn Write, format: OutputFormat, manifests: &[Value]) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            write!(out, "{}", to_yaml_documents(manifests)?)?;
        }
        OutputFormat::Json => {
            let document = match manifests {
                [single] => single.clone(),
                _ => json!({
                    "apiVersion": "v1",
                    "kind": "List",
                    "items": manifests,
                }),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
    }
    Ok(())
}
