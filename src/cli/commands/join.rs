// file: src/cli/commands/join.rs
// version: 1.0.0
// guid: 6e0a9c35-f742-4b81-8d6e-3c5b2a17f098

//! `kubefedctl join`

use super::HostClusterArgs;
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
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
#[command(
    long_about = "Join registers a Kubernetes cluster with a federation control plane. A \
                  service account with cluster-wide access is created in the joining cluster \
                  and its token is stored in the host cluster next to a FederatedCluster.",
    after_help = "Examples:\n  \
                  # Join cluster2 to the federation hosted in cluster1\n  \
                  kubefedctl join cluster2 --cluster-context=cluster2 --host-cluster-context=cluster1"
)]
pub struct JoinArgs {
    /// Name the cluster is registered under
    #[arg(value_name = "CLUSTER_NAME")]
    pub cluster_name: String,

    /// Context of the joining cluster; defaults to the cluster name
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

    /// Also add the cluster to the cluster registry
    #[arg(long)]
    pub add_to_registry: bool,

    /// Namespace of the cluster registry
    #[arg(long, default_value = DEFAULT_REGISTRY_NAMESPACE)]
    pub registry_namespace: String,

    /// Report what would be created without changing either cluster
    #[arg(long)]
    pub dry_run: bool,
}

/// Resolve and validate the names shared by join and unjoin
pub fn join_names(
    cluster_name: &str,
    host_cluster_name: Option<&str>,
    host: &ClusterAccess,
    federation_namespace: &str,
) -> Result<JoinNames> {
    ValidationUtils::validate_dns1123_subdomain("cluster name", cluster_name)?;
    ValidationUtils::validate_dns1123_label("federation namespace", federation_namespace)?;

    let host_cluster_name = host_cluster_name.unwrap_or(&host.context);
    ValidationUtils::validate_dns1123_subdomain("host cluster name", host_cluster_name)?;

    let names = JoinNames::new(cluster_name, host_cluster_name, federation_namespace);
    ValidationUtils::validate_dns1123_subdomain("service account name", &names.service_account())?;
    Ok(names)
}

/// Base64 token and CA bundle of the member service account
async fn service_account_credentials(
    applier: &Applier<'_>,
    member: &ClusterAccess,
    names: &JoinNames,
) -> Result<(String, Option<String>)> {
    let sa_ref = ResourceRef::new(
        "serviceaccount",
        names.service_account(),
        Some(names.federation_namespace.as_str()),
    );
    let service_account = applier.get(member, &sa_ref).await?.ok_or_else(|| {
        FedCtlError::not_found(format!("{} was not created", sa_ref))
    })?;

    let secret_name = service_account
        .pointer("/secrets/0/name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FedCtlError::other(format!(
                "{} has no token secret yet; retry once the token controller has populated it",
                sa_ref
            ))
        })?;
    debug!("Service account token secret is {}", secret_name);

    let secret_ref = ResourceRef::new(
        "secret",
        secret_name,
        Some(names.federation_namespace.as_str()),
    );
    let secret = applier
        .get(member, &secret_ref)
        .await?
        .ok_or_else(|| FedCtlError::not_found(format!("{} does not exist", secret_ref)))?;

    let token = secret
        .pointer("/data/token")
        .and_then(Value::as_str)
        .ok_or_else(|| FedCtlError::other(format!("{} has no token", secret_ref)))?;
    let ca = secret
        .get("data")
        .and_then(|d| d.get("ca.crt"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok((token.to_string(), ca))
}

pub async fn run(args: JoinArgs, out: &mut dyn Write, fed_config: &FedConfig) -> Result<()> {
    let client = Kubectl::new();
    run_with_client(args, out, fed_config, &client).await
}

pub async fn run_with_client(
    args: JoinArgs,
    out: &mut dyn Write,
    fed_config: &FedConfig,
    client: &dyn ClusterClient,
) -> Result<()> {
    let host = fed_config.host_config(args.host.host_cluster_context.as_deref())?;
    let cluster_context = args.cluster_context.as_deref().unwrap_or(&args.cluster_name);
    let member = fed_config.cluster_config(cluster_context)?;
    let names = join_names(
        &args.cluster_name,
        args.host_cluster_name.as_deref(),
        &host,
        &args.federation_namespace,
    )?;
    if args.add_to_registry {
        ValidationUtils::validate_dns1123_label("registry namespace", &args.registry_namespace)?;
    }

    info!(
        "Joining cluster {} (context {}) to federation in context {}",
        names.cluster_name, member.context, host.context
    );
    let applier = Applier::new(client, args.dry_run);

    for manifest in [
        cluster::namespace(&names.federation_namespace),
        cluster::service_account(&names),
        cluster::cluster_role(&names),
        cluster::cluster_role_binding(&names),
    ] {
        applier.apply(&member, &manifest, out).await?;
    }

    let (token, ca) = if applier.is_dry_run() {
        (String::new(), member.ca_data.clone())
    } else {
        service_account_credentials(&applier, &member, &names).await?
    };

    let mut host_manifests = vec![
        cluster::namespace(&names.federation_namespace),
        cluster::credentials_secret(&names, &token, ca.as_deref()),
        cluster::federated_cluster(&names, &args.federation_version),
    ];
    if args.add_to_registry {
        host_manifests.push(cluster::namespace(&args.registry_namespace));
        host_manifests.push(cluster::registry_cluster(
            &names.cluster_name,
            &args.registry_namespace,
            &member.server,
            member.ca_data.as_deref(),
        ));
    }
    for manifest in &host_manifests {
        applier.apply(&host, manifest, out).await?;
    }

    if !applier.is_dry_run() {
        writeln!(
            out,
            "Cluster \"{}\" joined the federation in context \"{}\"",
            names.cluster_name, host.context
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{fed_config, output};
    use crate::kubectl::fake::{access, Call, FakeClient};
    use serde_json::json;

    fn args(cluster: &str) -> JoinArgs {
        JoinArgs {
            cluster_name: cluster.to_string(),
            cluster_context: None,
            host: HostClusterArgs::default(),
            host_cluster_name: None,
            federation_namespace: DEFAULT_FEDERATION_NAMESPACE.to_string(),
            federation_version: DEFAULT_FEDERATION_VERSION.to_string(),
            add_to_registry: false,
            registry_namespace: DEFAULT_REGISTRY_NAMESPACE.to_string(),
            dry_run: false,
        }
    }

    fn member_client() -> FakeClient {
        FakeClient::default()
            .with_object(
                "cluster2",
                ResourceRef::new("serviceaccount", "cluster2-cluster1", Some("federation-system")),
                json!({"secrets": [{"name": "cluster2-cluster1-token-abcde"}]}),
            )
            .with_object(
                "cluster2",
                ResourceRef::new(
                    "secret",
                    "cluster2-cluster1-token-abcde",
                    Some("federation-system"),
                ),
                json!({"data": {"token": "dG9rZW4=", "ca.crt": "Y2E="}}),
            )
    }

    fn applied(calls: &[Call], context: &str) -> Vec<String> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Apply { context: ctx, manifest } if ctx == context => {
                    Some(crate::federation::describe(manifest))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_join_names_validation() {
        let host = access("cluster1");
        assert!(join_names("cluster2", None, &host, "federation-system").is_ok());
        assert!(join_names("Cluster_2", None, &host, "federation-system").is_err());
        assert!(join_names("cluster2", Some("bad_host"), &host, "federation-system").is_err());
    }

    #[tokio::test]
    async fn test_join_creates_member_and_host_resources() -> Result<()> {
        let (_file, config) = fed_config();
        let client = member_client();
        let mut out = Vec::new();

        run_with_client(args("cluster2"), &mut out, &config, &client).await?;

        let calls = client.calls();
        assert_eq!(
            applied(&calls, "cluster2"),
            vec![
                "Namespace federation-system",
                "ServiceAccount federation-system/cluster2-cluster1",
                "ClusterRole federation-controller-manager:cluster2-cluster1",
                "ClusterRoleBinding federation-controller-manager:cluster2-cluster1",
            ]
        );
        assert_eq!(
            applied(&calls, "cluster1"),
            vec![
                "Namespace federation-system",
                "Secret federation-system/cluster2-credentials",
                "FederatedCluster federation-system/cluster2",
            ]
        );

        let secret = calls
            .iter()
            .find_map(|c| match c {
                Call::Apply { manifest, .. } if manifest["kind"] == "Secret" => Some(manifest),
                _ => None,
            })
            .unwrap();
        assert_eq!(secret["data"]["token"], "dG9rZW4=");
        assert_eq!(secret["data"]["ca.crt"], "Y2E=");
        assert!(output(out).contains("Cluster \"cluster2\" joined"));
        Ok(())
    }

    #[tokio::test]
    async fn test_join_add_to_registry() -> Result<()> {
        let (_file, config) = fed_config();
        let client = member_client();
        let mut out = Vec::new();
        let mut a = args("cluster2");
        a.add_to_registry = true;

        run_with_client(a, &mut out, &config, &client).await?;

        let host_applied = applied(&client.calls(), "cluster1");
        assert_eq!(
            host_applied.last().map(String::as_str),
            Some("Cluster kube-multicluster-public/cluster2")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_join_dry_run_reads_nothing() -> Result<()> {
        let (_file, config) = fed_config();
        let client = FakeClient::default();
        let mut out = Vec::new();
        let mut a = args("cluster2");
        a.dry_run = true;

        run_with_client(a, &mut out, &config, &client).await?;

        assert!(client.calls().is_empty());
        let text = output(out);
        assert!(text.contains("would apply ServiceAccount federation-system/cluster2-cluster1 in context cluster2"));
        assert!(text.contains("would apply FederatedCluster federation-system/cluster2 in context cluster1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_join_without_token_secret() {
        let (_file, config) = fed_config();
        let client = FakeClient::default().with_object(
            "cluster2",
            ResourceRef::new("serviceaccount", "cluster2-cluster1", Some("federation-system")),
            json!({}),
        );
        let mut out = Vec::new();

        let err = run_with_client(args("cluster2"), &mut out, &config, &client)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no token secret yet"));
    }

    #[tokio::test]
    async fn test_join_unknown_member_context() {
        let (_file, config) = fed_config();
        let mut out = Vec::new();
        let mut a = args("cluster3");
        a.cluster_context = Some("missing".to_string());

        let result = run_with_client(a, &mut out, &config, &FakeClient::default()).await;

        assert!(matches!(result, Err(FedCtlError::Kubeconfig(_))));
    }
}
