// file: src/cli/commands/federate.rs
// version: 1.0.0
// guid: 2b7f4e90-c83d-4a16-9e52-a0d6b81f37c4

//! `kubefedctl federate`

use super::{write_manifests, FederationArgs, HostClusterArgs};
use crate::{
    cli::args::OutputFormat,
    config::FedConfig,
    error::FedCtlError,
    federation::{
        federated::{federated_resource, object_key, FederateOptions, DEFAULT_NAMESPACE},
        resolve_type, TypeDescriptor, TypeOverrides,
    },
    kubectl::{Applier, ClusterClient, Kubectl, ResourceRef},
    utils::ValidationUtils,
    Result,
};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
#[command(
    long_about = "Federate creates a federated resource from a kubernetes resource. The target \
                  resource is read from the host cluster, or from a local file with --filename.",
    after_help = "Examples:\n  \
                  # Federate the deployment web in namespace shop\n  \
                  kubefedctl federate deployment web -n shop --host-cluster-context=cluster1\n\n  \
                  # Print the federated form of a local manifest\n  \
                  kubefedctl federate deployment -f web.yaml -o yaml"
)]
pub struct FederateArgs {
    /// Type of the resource, e.g. `deployment` or `configmaps`
    #[arg(value_name = "TYPE")]
    pub target_type: String,

    /// Name of the resource; optional with --filename
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Namespace of the resource and of the federated resource
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Read the resource from this file instead of the host cluster
    #[arg(short, long, value_name = "FILE")]
    pub filename: Option<PathBuf>,

    #[command(flatten)]
    pub federation: FederationArgs,

    #[command(flatten)]
    pub host: HostClusterArgs,

    /// Print the federated resource instead of creating it
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Report what would be created without changing the host cluster
    #[arg(long)]
    pub dry_run: bool,
}

/// Read a single resource document from a YAML or JSON file
pub fn read_resource_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        FedCtlError::invalid_argument(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let resource: Value = serde_yaml::from_str(&content)?;
    if !resource.is_object() {
        return Err(FedCtlError::validation(format!(
            "{} does not contain a resource",
            path.display()
        )));
    }
    Ok(resource)
}

pub async fn run(args: FederateArgs, out: &mut dyn Write, fed_config: &FedConfig) -> Result<()> {
    let client = Kubectl::new();
    run_with_client(args, out, fed_config, &client).await
}

pub async fn run_with_client(
    args: FederateArgs,
    out: &mut dyn Write,
    fed_config: &FedConfig,
    client: &dyn ClusterClient,
) -> Result<()> {
    args.federation.validate()?;
    if let Some(ref ns) = args.namespace {
        ValidationUtils::validate_dns1123_label("namespace", ns)?;
    }

    let target = resolve_type(&args.target_type, &TypeOverrides::default())?;
    let options = FederateOptions {
        federated_group: args.federation.federated_group.clone(),
        federation_version: args.federation.federation_version.clone(),
    };
    let applier = Applier::new(client, args.dry_run);

    let resource = match args.filename {
        Some(ref path) => {
            let resource = read_resource_file(path)?;
            if let Some(ref expected) = args.name {
                let (name, _) = object_key(&resource)?;
                if &name != expected {
                    return Err(FedCtlError::invalid_argument(format!(
                        "resource in {} is named \"{}\", not \"{}\"",
                        path.display(),
                        name,
                        expected
                    )));
                }
            }
            resource
        }
        None => {
            let name = args.name.as_deref().ok_or_else(|| {
                FedCtlError::invalid_argument("NAME is required unless --filename is given")
            })?;
            ValidationUtils::validate_dns1123_subdomain("resource name", name)?;
            let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
            fetch_resource(&applier, &host, &target, name, args.namespace.as_deref()).await?
        }
    };

    let federated = federated_resource(&resource, &target, args.namespace.as_deref(), &options)?;
    debug!("Generated {}", crate::federation::describe(&federated));

    if let Some(format) = args.output {
        return write_manifests(out, format, &[federated]);
    }

    let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
    applier.apply(&host, &federated, out).await?;

    if !applier.is_dry_run() {
        info!("Federated {} in context {}", target.kind, host.context);
        writeln!(out, "{} created", crate::federation::describe(&federated))?;
    }
    Ok(())
}

async fn fetch_resource(
    applier: &Applier<'_>,
    host: &crate::config::ClusterAccess,
    target: &TypeDescriptor,
    name: &str,
    namespace: Option<&str>,
) -> Result<Value> {
    let namespace = if target.namespaced {
        Some(
            namespace
                .or(host.namespace.as_deref())
                .unwrap_or(DEFAULT_NAMESPACE),
        )
    } else {
        None
    };
    let resource = ResourceRef::new(target.qualified_name(), name, namespace);

    applier
        .get(host, &resource)
        .await?
        .ok_or_else(|| FedCtlError::not_found(format!("{} does not exist", resource)))
}
