// file: src/kubectl/fake.rs
// version: 1.0.0
// guid: f09c2d84-6a1e-4b73-8e25-d4b7a3c0e961

//! Recording client for tests

use super::{ClusterClient, ResourceRef};
use crate::{config::ClusterAccess, error::FedCtlError, Result};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Apply { context: String, manifest: Value },
    Patch { context: String, resource: ResourceRef, patch: Value },
    Delete { context: String, resource: ResourceRef },
}

/// Remembers mutations and serves canned objects for `get`
#[derive(Default)]
pub struct FakeClient {
    calls: Mutex<Vec<Call>>,
    objects: HashMap<(String, ResourceRef), Value>,
    failing_contexts: HashSet<String>,
}

impl FakeClient {
    pub fn with_object(mut self, context: &str, resource: ResourceRef, object: Value) -> Self {
        self.objects.insert((context.to_string(), resource), object);
        self
    }

    /// Every call against this context fails
    pub fn failing_context(mut self, context: &str) -> Self {
        self.failing_contexts.insert(context.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, access: &ClusterAccess) -> Result<()> {
        if self.failing_contexts.contains(&access.context) {
            return Err(FedCtlError::Kubectl {
                command: format!("kubectl --context {}", access.context),
                exit_code: Some(1),
                stderr: "Unable to connect to the server".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClusterClient for FakeClient {
    async fn apply(&self, access: &ClusterAccess, manifest: &Value) -> Result<()> {
        self.check(access)?;
        self.calls.lock().unwrap().push(Call::Apply {
            context: access.context.clone(),
            manifest: manifest.clone(),
        });
        Ok(())
    }

    async fn get(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<Option<Value>> {
        self.check(access)?;
        Ok(self
            .objects
            .get(&(access.context.clone(), resource.clone()))
            .cloned())
    }

    async fn patch(
        &self,
        access: &ClusterAccess,
        resource: &ResourceRef,
        patch: &Value,
    ) -> Result<()> {
        self.check(access)?;
        self.calls.lock().unwrap().push(Call::Patch {
            context: access.context.clone(),
            resource: resource.clone(),
            patch: patch.clone(),
        });
        Ok(())
    }

    async fn delete(&self, access: &ClusterAccess, resource: &ResourceRef) -> Result<()> {
        self.check(access)?;
        self.calls.lock().unwrap().push(Call::Delete {
            context: access.context.clone(),
            resource: resource.clone(),
        });
        Ok(())
    }
}

/// A resolved context with no kubeconfig file
pub fn access(context: &str) -> ClusterAccess {
    ClusterAccess {
        context: context.to_string(),
        cluster_name: format!("{}-cluster", context),
        server: format!("https://{}.example.com:6443", context),
        namespace: None,
        ca_data: Some("Q0EK".to_string()),
        kubeconfig: None,
    }
}
