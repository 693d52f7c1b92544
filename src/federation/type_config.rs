// file: src/federation/type_config.rs
// version: 1.0.0
// guid: e2a05c7f-98b1-4d36-a4f0-c7d3b62e15a9

//! FederatedTypeConfig and federated type CRD generation

use super::types::TypeDescriptor;
use crate::config::FEDERATION_CORE_GROUP;
use serde_json::{json, Value};

/// Settings shared by the generated type resources
#[derive(Debug, Clone)]
pub struct TypeConfigOptions {
    pub federated_group: String,
    pub federation_version: String,
    pub federation_namespace: String,
}

/// Build the FederatedTypeConfig that enables propagation for `target`
pub fn federated_type_config(target: &TypeDescriptor, options: &TypeConfigOptions) -> Value {
    let mut target_spec = json!({
        "version": target.version,
        "kind": target.kind,
        "pluralName": target.plural,
    });
    if !target.group.is_empty() {
        target_spec["group"] = json!(target.group);
    }

    json!({
        "apiVersion": format!("{}/{}", FEDERATION_CORE_GROUP, options.federation_version),
        "kind": "FederatedTypeConfig",
        "metadata": {
            "name": target.qualified_name(),
            "namespace": options.federation_namespace,
        },
        "spec": {
            "target": target_spec,
            "namespaced": target.namespaced,
            "propagationEnabled": true,
            "federatedType": {
                "group": options.federated_group,
                "version": options.federation_version,
                "kind": target.federated_kind(),
                "pluralName": target.federated_plural(),
            },
        },
    })
}

/// Build the CustomResourceDefinition of the federated type
pub fn federated_type_crd(target: &TypeDescriptor, options: &TypeConfigOptions) -> Value {
    let federated_kind = target.federated_kind();
    let scope = if target.namespaced { "Namespaced" } else { "Cluster" };

    json!({
        "apiVersion": "apiextensions.k8s.io/v1beta1",
        "kind": "CustomResourceDefinition",
        "metadata": {
            "name": target.federated_crd_name(&options.federated_group),
        },
        "spec": {
            "group": options.federated_group,
            "version": options.federation_version,
            "scope": scope,
            "names": {
                "kind": federated_kind,
                "listKind": format!("{}List", federated_kind),
                "plural": target.federated_plural(),
                "singular": federated_kind.to_lowercase(),
            },
            "subresources": {
                "status": {},
            },
        },
    })
}

/// JSON merge patch that turns propagation on or off
pub fn propagation_patch(enabled: bool) -> Value {
    json!({ "spec": { "propagationEnabled": enabled } })
}
