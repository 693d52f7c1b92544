// file: src/kubectl/client.rs
// version: 1.1.0
// guid: 1d6e8b3a-47c0-4f95-b2d8-93a5f0c7e214

//! `kubectl` backed cluster client

use super::{ClusterClient, ResourceRef};
use crate::{config::ClusterAccess, error::FedCtlError, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Runs `kubectl` against the context of a [`ClusterAccess`].
///
/// The binary is looked up in PATH on first use, so dry runs work on
/// machines without kubectl.
#[derive(Debug, Clone, Default)]
pub struct Kubectl {
    binary: Option<PathBuf>,
}

impl Kubectl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf> {
        if let Some(ref binary) = self.binary {
            return Ok(binary.clone());
        }
        let binary = which::which("kubectl")
            .map_err(|e| FedCtlError::config(format!("kubectl not found in PATH: {}", e)))?;
        debug!("Using kubectl at {}", binary.display());
        Ok(binary)
    }

    /// Connection flags shared by every invocation
    pub fn connection_args(access: &ClusterAccess) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(ref kubeconfig) = access.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args.push("--context".to_string());
        args.push(access.context.clone());
        args
    }

    fn object_args(verb: &str, resource: &ResourceRef) -> Vec<String> {
        let mut args = vec![
            verb.to_string(),
            resource.resource.clone(),
            resource.name.clone(),
        ];
        if let Some(ref ns) = resource.namespace {
            args.push("--namespace".to_string());
            args.push(ns.clone());
        }
        args
    }

    async fn run(
        &self,
        access: &ClusterAccess,
        args: Vec<String>,
        stdin: Option<String>,
    ) -> Result<String> {
        let mut full_args = Self::connection_args(access);
        full_args.extend(args);
        let command_line = format!("kubectl {}", full_args.join(" "));
        debug!("Executing {}", command_line);

        let binary = self.resolve_binary()?;
        let mut child = Command::new(&binary)
            .args(&full_args)
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FedCtlError::Kubectl {
                command: command_line.clone(),
                exit_code: None,
                stderr: format!("Failed to execute command: {}", e),
            })?;

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes()).await?;
            }
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let err = FedCtlError::Kubectl {
                command: command_line,
                exit_code: output.status.code(),
                stderr: if stderr.is_empty() { stdout } else { stderr },
            };
            debug!("{}", err);
            return Err(err);
        }

        Ok(stdout)
    }
}

#[async_trait::async_trait]
impl ClusterClient for Kubectl {
    async fn apply(&self, access: &ClusterAccess, manifest: &Value) -> Result<()> {
        let body = serde_json::to_string(manifest)?;
        self.run(
            access,
            vec!["apply".to_string(), "-f".to_string(), "-".to_string()],
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn get(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<Option<Value>> {
        let mut args = Self::object_args("get", resource);
        args.push("--output".to_string());
        args.push("json".to_string());

        match self.run(access, args, None).await {
            Ok(stdout) => Ok(Some(serde_json::from_str(&stdout)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn patch(
        &self,
        access: &ClusterAccess,
        resource: &ResourceRef,
        patch: &Value,
    ) -> Result<()> {
        let mut args = Self::object_args("patch", resource);
        args.push("--type".to_string());
        args.push("merge".to_string());
        args.push("--patch".to_string());
        args.push(serde_json::to_string(patch)?);
        self.run(access, args, None).await?;
        Ok(())
    }

    async fn delete(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<()> {
        let mut args = Self::object_args("delete", resource);
        args.push("--ignore-not-found".to_string());
        self.run(access, args, None).await?;
        Ok(())
    }
}
