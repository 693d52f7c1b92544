// file: src/federation/types.rs
// version: 1.0.0
// guid: 7b3d9e02-f16a-4c58-b2e7-5a0c84d1f93e

//! Target API types that can be federated

use crate::{error::FedCtlError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A Kubernetes API type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub kind: String,
    /// Lower case plural resource name, e.g. `deployments`
    pub plural: String,
    /// API group, empty for the core group
    pub group: String,
    pub version: String,
    pub namespaced: bool,
}

/// Overrides for types missing from the built-in table
#[derive(Debug, Clone, Default)]
pub struct TypeOverrides {
    pub kind: Option<String>,
    pub version: Option<String>,
    pub cluster_scoped: bool,
}

// kind, plural, group, version, namespaced
const KNOWN_TYPES: &[(&str, &str, &str, &str, bool)] = &[
    ("ClusterRole", "clusterroles", "rbac.authorization.k8s.io", "v1", false),
    ("ClusterRoleBinding", "clusterrolebindings", "rbac.authorization.k8s.io", "v1", false),
    ("ConfigMap", "configmaps", "", "v1", true),
    ("CronJob", "cronjobs", "batch", "v1beta1", true),
    ("DaemonSet", "daemonsets", "apps", "v1", true),
    ("Deployment", "deployments", "apps", "v1", true),
    ("Ingress", "ingresses", "extensions", "v1beta1", true),
    ("Job", "jobs", "batch", "v1", true),
    ("Namespace", "namespaces", "", "v1", false),
    ("ReplicaSet", "replicasets", "apps", "v1", true),
    ("Role", "roles", "rbac.authorization.k8s.io", "v1", true),
    ("RoleBinding", "rolebindings", "rbac.authorization.k8s.io", "v1", true),
    ("Secret", "secrets", "", "v1", true),
    ("Service", "services", "", "v1", true),
    ("ServiceAccount", "serviceaccounts", "", "v1", true),
    ("StatefulSet", "statefulsets", "apps", "v1", true),
];

impl TypeDescriptor {
    fn from_entry(entry: &(&str, &str, &str, &str, bool)) -> Self {
        let (kind, plural, group, version, namespaced) = *entry;
        Self {
            kind: kind.to_string(),
            plural: plural.to_string(),
            group: group.to_string(),
            version: version.to_string(),
            namespaced,
        }
    }

    /// `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// `plural.group`, or just `plural` for the core group. This is also the
    /// name of the type's FederatedTypeConfig.
    pub fn qualified_name(&self) -> String {
        if self.group.is_empty() {
            self.plural.clone()
        } else {
            format!("{}.{}", self.plural, self.group)
        }
    }

    /// Kind of the generated federated type
    pub fn federated_kind(&self) -> String {
        format!("Federated{}", self.kind)
    }

    /// Plural of the generated federated type
    pub fn federated_plural(&self) -> String {
        format!("federated{}", self.plural)
    }

    /// Name of the federated type's CustomResourceDefinition
    pub fn federated_crd_name(&self, federated_group: &str) -> String {
        format!("{}.{}", self.federated_plural(), federated_group)
    }
}

/// Split `name.group` into its parts
fn split_qualified(input: &str) -> (&str, Option<&str>) {
    match input.split_once('.') {
        Some((base, group)) => (base, Some(group)),
        None => (input, None),
    }
}

/// Look up a type in the built-in table by kind, plural or singular name,
/// optionally qualified with its group (`deployments.apps`).
pub fn lookup_type(input: &str) -> Option<TypeDescriptor> {
    let (base, group) = split_qualified(input);
    let base = base.to_lowercase();

    KNOWN_TYPES
        .iter()
        .filter(|(kind, plural, _, _, _)| *plural == base || kind.to_lowercase() == base)
        .find(|(_, _, known_group, _, _)| group.map_or(true, |g| g == *known_group))
        .map(TypeDescriptor::from_entry)
}

/// Resolve a type name given on the command line
pub fn resolve_type(input: &str, overrides: &TypeOverrides) -> Result<TypeDescriptor> {
    if input.is_empty() {
        return Err(FedCtlError::invalid_argument("type name must not be empty"));
    }

    if let Some(mut descriptor) = lookup_type(input) {
        debug!("Resolved type {} to {}", input, descriptor.qualified_name());
        if let Some(ref version) = overrides.version {
            descriptor.version = version.clone();
        }
        if let Some(ref kind) = overrides.kind {
            descriptor.kind = kind.clone();
        }
        return Ok(descriptor);
    }

    match (&overrides.kind, &overrides.version) {
        (Some(kind), Some(version)) => {
            let (base, group) = split_qualified(input);
            Ok(TypeDescriptor {
                kind: kind.clone(),
                plural: base.to_lowercase(),
                group: group.unwrap_or_default().to_string(),
                version: version.clone(),
                namespaced: !overrides.cluster_scoped,
            })
        }
        _ => Err(FedCtlError::not_found(format!(
            "unknown API type \"{}\"; pass --target-kind and --target-version to describe it",
            input
        ))),
    }
}
