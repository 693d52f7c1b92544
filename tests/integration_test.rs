// file: tests/integration_test.rs
// version: 2.0.0
// guid: 9e3c5a17-d4b2-4f68-8a01-c7f2e6b4d953

//! Integration tests for kubefedctl

use kubefedctl::{
    cli::{execute, parse_args},
    config::{FedConfig, PathOptions},
    FedCtlError, Result,
};
use serde_json::Value;
use tempfile::TempDir;

const HOST_KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: host
clusters:
  - name: host
    cluster:
      server: https://host.example.com:6443
contexts:
  - name: host
    context:
      cluster: host
      namespace: apps
      user: admin
users:
  - name: admin
    user:
      token: secret
"#;

const MEMBER_KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: member
clusters:
  - name: member
    cluster:
      server: https://member.example.com:6443
contexts:
  - name: member
    context:
      cluster: member
      user: admin
  - name: host
    context:
      cluster: member
      user: admin
"#;

async fn write_kubeconfigs(dir: &TempDir) -> Result<String> {
    let host = dir.path().join("host.yaml");
    let member = dir.path().join("member.yaml");
    tokio::fs::write(&host, HOST_KUBECONFIG).await?;
    tokio::fs::write(&member, MEMBER_KUBECONFIG).await?;
    let joined = std::env::join_paths([&host, &member]).unwrap();
    Ok(joined.to_string_lossy().into_owned())
}

#[tokio::test]
async fn test_env_kubeconfig_list_is_merged() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env_value = write_kubeconfigs(&temp_dir).await?;

    let options = PathOptions::new_default()
        .with_env_value(Some(env_value))
        .with_global_file(temp_dir.path().join("missing"));
    let config = FedConfig::new(options);

    // First file wins for current-context and for the duplicated context
    let host = config.host_config(None)?;
    assert_eq!(host.context, "host");
    assert_eq!(host.server, "https://host.example.com:6443");
    assert_eq!(host.namespace.as_deref(), Some("apps"));

    let member = config.cluster_config("member")?;
    assert_eq!(member.server, "https://member.example.com:6443");

    Ok(())
}

#[tokio::test]
async fn test_explicit_kubeconfig_overrides_env() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env_value = write_kubeconfigs(&temp_dir).await?;
    let member = temp_dir.path().join("member.yaml");

    let options = PathOptions::new_default()
        .with_env_value(Some(env_value))
        .with_explicit_file(Some(member.to_str().unwrap()))?;
    let config = FedConfig::new(options);

    assert_eq!(config.host_config(None)?.context, "member");
    assert!(matches!(
        config.cluster_config("missing"),
        Err(FedCtlError::Kubeconfig(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_missing_explicit_kubeconfig_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let options = PathOptions::new_default()
        .with_explicit_file(Some(missing.to_str().unwrap()))
        .unwrap();
    let config = FedConfig::new(options);

    assert!(config.host_config(None).is_err());
}

#[tokio::test]
async fn test_enable_output_through_root_command() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let options = PathOptions::new_default()
        .with_env_value(None)
        .with_global_file(temp_dir.path().join("missing"));
    let config = FedConfig::new(options);

    let (cli, warnings) =
        parse_args(["kubefedctl", "enable", "Deployment", "--output", "json"]).unwrap();
    let mut out = Vec::new();
    execute(cli, &config, &mut out).await?;

    assert!(warnings.is_empty());
    let list: Value = serde_json::from_slice(&out)?;
    assert_eq!(list["kind"], "List");
    assert_eq!(list["items"][0]["kind"], "CustomResourceDefinition");
    assert_eq!(list["items"][1]["metadata"]["name"], "deployments.apps");
    assert_eq!(list["items"][1]["metadata"]["namespace"], "federation-system");

    Ok(())
}

#[tokio::test]
async fn test_dry_run_join_against_merged_config() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env_value = write_kubeconfigs(&temp_dir).await?;
    let config = FedConfig::new(PathOptions::new_default().with_env_value(Some(env_value)));

    let (cli, _) = parse_args(["kubefedctl", "join", "member", "--dry-run"]).unwrap();
    let mut out = Vec::new();
    execute(cli, &config, &mut out).await?;

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("would apply ServiceAccount federation-system/member-host in context member"));
    assert!(text.contains("would apply FederatedCluster federation-system/member in context host"));

    Ok(())
}
