// file: src/cli/commands/enable.rs
// version: 1.0.0
// guid: 93c0e6b1-4f27-4a58-bd03-e8a7f15c2d96

//! `kubefedctl enable`

use super::{write_manifests, FederationArgs, HostClusterArgs};
use crate::{
    cli::args::OutputFormat,
    config::FedConfig,
    federation::{
        resolve_type,
        type_config::{federated_type_config, federated_type_crd, TypeConfigOptions},
        TypeOverrides,
    },
    kubectl::{Applier, ClusterClient, Kubectl},
    Result,
};
use clap::Args;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Clone)]
#[command(
    long_about = "Enables propagation of a Kubernetes API type. This includes creating a \
                  federated type CRD and a FederatedTypeConfig that configures propagation \
                  of the target type.",
    after_help = "Examples:\n  \
                  # Enable propagation of deployments\n  \
                  kubefedctl enable deployments.apps --host-cluster-context=cluster1\n\n  \
                  # Print the resources that would enable propagation of services\n  \
                  kubefedctl enable services -o yaml"
)]
pub struct EnableArgs {
    /// API type to enable, e.g. `deployments.apps`, `Deployment` or `services`
    #[arg(value_name = "TYPE")]
    pub target_type: String,

    /// Kind of the target type when it is not a built-in type
    #[arg(long)]
    pub target_kind: Option<String>,

    /// API version of the target type
    #[arg(long)]
    pub target_version: Option<String>,

    /// The target type is cluster scoped (only used with --target-kind)
    #[arg(long)]
    pub cluster_scoped: bool,

    #[command(flatten)]
    pub federation: FederationArgs,

    #[command(flatten)]
    pub host: HostClusterArgs,

    /// Print the resources instead of creating them
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Report what would be created without changing the host cluster
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: EnableArgs, out: &mut dyn Write, fed_config: &FedConfig) -> Result<()> {
    let client = Kubectl::new();
    run_with_client(args, out, fed_config, &client).await
}

pub async fn run_with_client(
    args: EnableArgs,
    out: &mut dyn Write,
    fed_config: &FedConfig,
    client: &dyn ClusterClient,
) -> Result<()> {
    args.federation.validate()?;

    let overrides = TypeOverrides {
        kind: args.target_kind.clone(),
        version: args.target_version.clone(),
        cluster_scoped: args.cluster_scoped,
    };
    let target = resolve_type(&args.target_type, &overrides)?;
    let options = TypeConfigOptions {
        federated_group: args.federation.federated_group.clone(),
        federation_version: args.federation.federation_version.clone(),
        federation_namespace: args.federation.federation_namespace.clone(),
    };

    let manifests = vec![
        federated_type_crd(&target, &options),
        federated_type_config(&target, &options),
    ];

    if let Some(format) = args.output {
        return write_manifests(out, format, &manifests);
    }

    let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
    info!(
        "Enabling propagation of {} in host cluster context {}",
        target.qualified_name(),
        host.context
    );

    let applier = Applier::new(client, args.dry_run);
    for manifest in &manifests {
        applier.apply(&host, manifest, out).await?;
    }

    if !applier.is_dry_run() {
        writeln!(
            out,
            "Enabled propagation of \"{}\" with FederatedTypeConfig {}/{}",
            target.kind,
            options.federation_namespace,
            target.qualified_name()
        )?;
    }
    Ok(())
}
