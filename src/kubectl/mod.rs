// file: src/kubectl/mod.rs
// version: 1.0.0
// guid: b5e3a071-8d64-4f2c-a9b0-6c17e4d25f83

//! Talking to clusters
//!
//! [`ClusterClient`] is the seam between the subcommands and the API server.
//! [`Kubectl`] implements it by running the `kubectl` binary.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::Kubectl;

use crate::{config::ClusterAccess, error::FedCtlError, federation::describe, Result};
use serde_json::Value;
use std::io::Write;
use tracing::info;

/// Identifies one object for get, patch and delete
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// Resource as kubectl understands it, e.g. `secret` or
    /// `federatedtypeconfig.core.federation.k8s.io`
    pub resource: String,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceRef {
    pub fn new(resource: impl Into<String>, name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            resource: resource.into(),
            name: name.into(),
            namespace: namespace.map(str::to_string),
        }
    }

    /// Reference the object a manifest describes
    pub fn from_manifest(manifest: &Value) -> Result<Self> {
        let kind = manifest
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| FedCtlError::validation("manifest has no kind"))?;
        let api_version = manifest
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let name = manifest
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .ok_or_else(|| FedCtlError::validation("manifest has no metadata.name"))?;
        let namespace = manifest.pointer("/metadata/namespace").and_then(Value::as_str);

        let resource = match api_version.rsplit_once('/') {
            Some((group, _)) => format!("{}.{}", kind.to_lowercase(), group),
            None => kind.to_lowercase(),
        };
        Ok(Self::new(resource, name, namespace))
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.namespace {
            Some(ref ns) => write!(f, "{} {}/{}", self.resource, ns, self.name),
            None => write!(f, "{} {}", self.resource, self.name),
        }
    }
}

/// Operations the subcommands need from a cluster
#[async_trait::async_trait]
pub trait ClusterClient: Send + Sync {
    /// Create or update an object
    async fn apply(&self, access: &ClusterAccess, manifest: &Value) -> Result<()>;

    /// Fetch an object, `None` when it does not exist
    async fn get(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<Option<Value>>;

    /// Apply a JSON merge patch
    async fn patch(&self, access: &ClusterAccess, resource: &ResourceRef, patch: &Value)
        -> Result<()>;

    /// Delete an object; deleting a missing object succeeds
    async fn delete(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<()>;
}

/// Runs mutations through a client, or only reports them in dry-run mode
pub struct Applier<'a> {
    client: &'a dyn ClusterClient,
    dry_run: bool,
}

impl<'a> Applier<'a> {
    pub fn new(client: &'a dyn ClusterClient, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn apply(
        &self,
        access: &ClusterAccess,
        manifest: &Value,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.dry_run {
            writeln!(out, "would apply {} in context {}", describe(manifest), access.context)?;
            return Ok(());
        }
        self.client.apply(access, manifest).await?;
        info!("Applied {} in context {}", describe(manifest), access.context);
        Ok(())
    }

    pub async fn patch(
        &self,
        access: &ClusterAccess,
        resource: &ResourceRef,
        patch: &Value,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.dry_run {
            writeln!(out, "would patch {} in context {}: {}", resource, access.context, patch)?;
            return Ok(());
        }
        self.client.patch(access, resource, patch).await?;
        info!("Patched {} in context {}", resource, access.context);
        Ok(())
    }

    pub async fn delete(
        &self,
        access: &ClusterAccess,
        resource: &ResourceRef,
        out: &mut dyn Write,
    ) -> Result<()> {
        if self.dry_run {
            writeln!(out, "would delete {} in context {}", resource, access.context)?;
            return Ok(());
        }
        self.client.delete(access, resource).await?;
        info!("Deleted {} in context {}", resource, access.context);
        Ok(())
    }

    /// Reads go to the cluster even in dry-run mode
    pub async fn get(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<Option<Value>> {
        self.client.get(access, resource).await
    }
}
