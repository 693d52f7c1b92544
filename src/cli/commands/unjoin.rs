// file: src/cli/commands/unjoin.rs
// version: 1.0.0
// guid: d3b96f12-7ac4-4e08-9b5d-81f2e0c4a763

//! `kubefedctl unjoin`

use super::{join::join_names, HostClusterArgs};
use crate::{
    config::{
        ClusterAccess, FedConfig, DEFAULT_FEDERATION_NAMESPACE, DEFAULT_FEDERATION_VERSION,
        DEFAULT_REGISTRY_NAMESPACE,
    },
    error::FedCtlError,
    federation::cluster::{self, JoinNames},
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
    long_about = "Unjoin removes the registration of a Kubernetes cluster from a federation \
                  control plane. The FederatedCluster and its credentials are removed from the \
                  host cluster, then the service account and its access from the member cluster.",
    after_help = "Examples:\n  \
                  # Unjoin cluster2 from the federation hosted in cluster1\n  \
                  kubefedctl unjoin cluster2 --cluster-context=cluster2 --host-cluster-context=cluster1"
)]
pub struct UnjoinArgs {
    /// Name the cluster was registered under
    #[arg(value_name = "CLUSTER_NAME")]
    pub cluster_name: String,

    /// Context of the member cluster; defaults to the cluster name
    #[arg(long, value_name = "CONTEXT")]
    pub cluster_context: Option<String>,

    #[command(flatten)]
    pub host: HostClusterArgs,

    /// Name of the host cluster; defaults to the host cluster context
    #[arg(long)]
    pub host_cluster_name: Option<String>,

    /// Namespace of the federation control plane
    #[arg(long, default_value = DEFAULT_FEDERATION_NAMESPACE)]
    pub federation_namespace: String,

    /// API version of federation resources
    #[arg(long, default_value = DEFAULT_FEDERATION_VERSION)]
    pub federation_version: String,

    /// Also remove the cluster from the cluster registry
    #[arg(long)]
    pub remove_from_registry: bool,

    /// Namespace of the cluster registry
    #[arg(long, default_value = DEFAULT_REGISTRY_NAMESPACE)]
    pub registry_namespace: String,

    /// Keep going when the member cluster cannot be cleaned up
    #[arg(long)]
    pub force: bool,

    /// Report what would be removed without changing either cluster
    #[arg(long)]
    pub dry_run: bool,
}

fn refs(manifests: &[Value]) -> Result<Vec<ResourceRef>> {
    manifests.iter().map(ResourceRef::from_manifest).collect()
}

/// Member resources in deletion order. The federation namespace is only
/// removed when the member is not also the host.
fn member_resources(
    names: &JoinNames,
    member: &ClusterAccess,
    host: &ClusterAccess,
) -> Result<Vec<ResourceRef>> {
    let mut manifests = vec![
        cluster::cluster_role_binding(names),
        cluster::cluster_role(names),
        cluster::service_account(names),
    ];
    if member.server != host.server {
        manifests.push(cluster::namespace(&names.federation_namespace));
    }
    refs(&manifests)
}

pub async fn run(args: UnjoinArgs, out: &mut dyn Write, fed_config: &FedConfig) -> Result<()> {
    let client = Kubectl::new();
    run_with_client(args, out, fed_config, &client).await
}

pub async fn run_with_client(
    args: UnjoinArgs,
    out: &mut dyn Write,
    fed_config: &FedConfig,
    client: &dyn ClusterClient,
) -> Result<()> {
    let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
    let names = join_names(
        &args.cluster_name,
        args.host_cluster_name.as_deref(),
        &host,
        &args.federation_namespace,
    )?;
    if args.remove_from_registry {
        ValidationUtils::validate_dns1123_label("registry namespace", &args.registry_namespace)?;
    }

    let applier = Applier::new(client, args.dry_run);
    info!("Unjoining cluster {} from federation in context {}", names.cluster_name, host.context);

    let mut host_manifests = vec![
        cluster::federated_cluster(&names, &args.federation_version),
        cluster::credentials_secret(&names, "", None),
    ];
    if args.remove_from_registry {
        host_manifests.push(cluster::registry_cluster(
            &names.cluster_name,
            &args.registry_namespace,
            "",
            None,
        ));
    }
    for resource in refs(&host_manifests)? {
        applier.delete(&host, &resource, out).await?;
    }

    let cluster_context = args.cluster_context.as_deref().unwrap_or(&args.cluster_name);
    let member_cleanup = async {
        let member = fed_config.cluster_config(cluster_context)?;
        for resource in member_resources(&names, &member, &host)? {
            applier.delete(&member, &resource, out).await?;
        }
        Ok::<_, FedCtlError>(())
    };
    match member_cleanup.await {
        Ok(()) => {}
        Err(e) if args.force => {
            warn!(
                "Failed to remove federation resources from cluster context {}: {}",
                cluster_context, e
            );
        }
        Err(e) => return Err(e),
    }

    if !applier.is_dry_run() {
        writeln!(
            out,
            "Cluster \"{}\" unjoined from the federation in context \"{}\"",
            names.cluster_name, host.context
        )?;
    }
    Ok(())
}
