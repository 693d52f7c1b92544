// file: src/cli/commands/disable.rs
// version: 1.1.0
// guid: c5d8a2f4-0b61-4e39-a7c2-1f94e6b30d85

//! `kubefedctl disable`

use super::HostClusterArgs;
use crate::{
    config::{FedConfig, DEFAULT_FEDERATED_GROUP, DEFAULT_FEDERATION_NAMESPACE, FEDERATION_CORE_GROUP},
    error::FedCtlError,
    federation::{lookup_type, type_config::propagation_patch},
    kubectl::{Applier, ClusterClient, Kubectl, ResourceRef},
    utils::ValidationUtils,
    Result,
};
use clap::Args;
use serde_json::Value;
use std::io::Write;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
#[command(
    long_about = "Disables propagation of a Kubernetes API type by setting propagationEnabled \
                  to false on its FederatedTypeConfig. With --delete-from-api the \
                  FederatedTypeConfig and the federated type CRD are removed as well.",
    after_help = "Examples:\n  \
                  # Disable propagation of deployments\n  \
                  kubefedctl disable deployments.apps --host-cluster-context=cluster1"
)]
pub struct DisableArgs {
    /// FederatedTypeConfig name, or a type name such as `Deployment`
    #[arg(value_name = "TYPE_CONFIG_NAME")]
    pub type_config_name: String,

    /// Also remove the FederatedTypeConfig and the federated type CRD
    #[arg(long)]
    pub delete_from_api: bool,

    /// Namespace of the federation control plane
    #[arg(long, default_value = DEFAULT_FEDERATION_NAMESPACE)]
    pub federation_namespace: String,

    /// API group of federated types, used when the type config does not name one
    #[arg(long, default_value = DEFAULT_FEDERATED_GROUP)]
    pub federated_group: String,

    #[command(flatten)]
    pub host: HostClusterArgs,

    /// Report what would change without changing the host cluster
    #[arg(long)]
    pub dry_run: bool,
}

/// Resource name of FederatedTypeConfig for kubectl
pub fn type_config_resource() -> String {
    format!("federatedtypeconfig.{}", FEDERATION_CORE_GROUP)
}

/// Type config names are `plural.group`; a bare kind or plural is resolved
fn type_config_name(input: &str) -> String {
    match lookup_type(input) {
        Some(descriptor) => descriptor.qualified_name(),
        None => input.to_string(),
    }
}

/// Name of the federated type CRD, taken from the type config when present
fn federated_crd_name(type_config: &Value, name: &str, fallback_group: &str) -> String {
    let federated_type = type_config.pointer("/spec/federatedType");
    let plural = federated_type
        .and_then(|t| t.get("pluralName"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let base = name.split('.').next().unwrap_or(name);
            format!("federated{}", base)
        });
    let group = federated_type
        .and_then(|t| t.get("group"))
        .and_then(Value::as_str)
        .unwrap_or(fallback_group);
    format!("{}.{}", plural, group)
}

pub async fn run(args: DisableArgs, out: &mut dyn Write, fed_config: &FedConfig) -> Result<()> {
    let client = Kubectl::new();
    run_with_client(args, out, fed_config, &client).await
}

pub async fn run_with_client(
    args: DisableArgs,
    out: &mut dyn Write,
    fed_config: &FedConfig,
    client: &dyn ClusterClient,
) -> Result<()> {
    let name = type_config_name(&args.type_config_name);
    ValidationUtils::validate_dns1123_subdomain("type config name", &name)?;
    ValidationUtils::validate_dns1123_label("federation namespace", &args.federation_namespace)?;
    ValidationUtils::validate_dns1123_subdomain("federated group", &args.federated_group)?;

    let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
    let applier = Applier::new(client, args.dry_run);
    let type_config_ref = ResourceRef::new(
        type_config_resource(),
        name.clone(),
        Some(args.federation_namespace.as_str()),
    );

    let type_config = applier.get(&host, &type_config_ref).await?.ok_or_else(|| {
        FedCtlError::not_found(format!(
            "FederatedTypeConfig \"{}/{}\" does not exist",
            args.federation_namespace, name
        ))
    })?;

    let enabled = type_config
        .pointer("/spec/propagationEnabled")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    if enabled {
        info!("Disabling propagation for {}", name);
        applier
            .patch(&host, &type_config_ref, &propagation_patch(false), out)
            .await?;
    } else {
        warn!("Propagation for {} is already disabled", name);
    }

    if args.delete_from_api {
        let crd_name = federated_crd_name(&type_config, &name, &args.federated_group);
        applier.delete(&host, &type_config_ref, out).await?;
        applier
            .delete(
                &host,
                &ResourceRef::new("customresourcedefinition.apiextensions.k8s.io", crd_name, None),
                out,
            )
            .await?;
    }

    if !applier.is_dry_run() {
        if args.delete_from_api {
            writeln!(out, "Disabled propagation for \"{}\" and removed it from the API", name)?;
        } else {
            writeln!(out, "Disabled propagation for \"{}\"", name)?;
        }
    }
    Ok(())
}
