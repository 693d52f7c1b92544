// file: src/federation/federated.rs
// version: 1.0.0
// guid: 4c91e7b3-0d25-4a6f-9e18-b3f6d2a07c54

//! Wrapping a plain resource into its federated form

use super::types::TypeDescriptor;
use crate::{error::FedCtlError, Result};
use serde_json::{json, Map, Value};

/// Metadata fields populated by the API server that must not be templated
const SERVER_METADATA_FIELDS: &[&str] = &[
    "name",
    "namespace",
    "creationTimestamp",
    "deletionGracePeriodSeconds",
    "deletionTimestamp",
    "generateName",
    "generation",
    "managedFields",
    "ownerReferences",
    "finalizers",
    "resourceVersion",
    "selfLink",
    "uid",
];

const LAST_APPLIED_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// Default namespace for namespaced resources without one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Settings for the generated federated resource
#[derive(Debug, Clone)]
pub struct FederateOptions {
    pub federated_group: String,
    pub federation_version: String,
}

/// Name and namespace of a resource document
pub fn object_key(resource: &Value) -> Result<(String, Option<String>)> {
    let name = resource
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| FedCtlError::validation("resource has no metadata.name"))?;
    let namespace = resource
        .pointer("/metadata/namespace")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    Ok((name.to_string(), namespace))
}

/// Check that a resource document is an instance of `target`
pub fn check_resource_type(resource: &Value, target: &TypeDescriptor) -> Result<()> {
    let kind = resource.get("kind").and_then(Value::as_str).unwrap_or_default();
    let api_version = resource
        .get("apiVersion")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if kind != target.kind {
        return Err(FedCtlError::validation(format!(
            "resource kind \"{}\" does not match type {} (kind {})",
            kind,
            target.qualified_name(),
            target.kind
        )));
    }

    let expected_group = target.group.as_str();
    let group = api_version.rsplit_once('/').map_or("", |(g, _)| g);
    if group != expected_group {
        return Err(FedCtlError::validation(format!(
            "resource apiVersion \"{}\" does not belong to group \"{}\"",
            api_version, expected_group
        )));
    }
    Ok(())
}

/// Strip server-populated and type-specific fields, leaving a template
pub fn template_from_resource(resource: &Value, target: &TypeDescriptor) -> Result<Value> {
    let mut template = match resource {
        Value::Object(map) => map.clone(),
        _ => return Err(FedCtlError::validation("resource must be a mapping")),
    };

    template.remove("apiVersion");
    template.remove("kind");
    template.remove("status");

    let mut strip_metadata = false;
    if let Some(Value::Object(metadata)) = template.get_mut("metadata") {
        for field in SERVER_METADATA_FIELDS {
            metadata.remove(*field);
        }
        if let Some(Value::Object(annotations)) = metadata.get_mut("annotations") {
            annotations.remove(LAST_APPLIED_ANNOTATION);
            if annotations.is_empty() {
                metadata.remove("annotations");
            }
        }
        strip_metadata = metadata.is_empty();
    }
    if strip_metadata {
        template.remove("metadata");
    }

    match target.kind.as_str() {
        // Allocated per cluster
        "Service" => {
            if let Some(Value::Object(spec)) = template.get_mut("spec") {
                spec.remove("clusterIP");
            }
        }
        "ServiceAccount" => {
            template.remove("secrets");
        }
        _ => {}
    }

    Ok(Value::Object(template))
}

/// Build `Federated<Kind>` for `resource`, placed in no clusters until a
/// cluster selector or cluster list is filled in.
pub fn federated_resource(
    resource: &Value,
    target: &TypeDescriptor,
    namespace_override: Option<&str>,
    options: &FederateOptions,
) -> Result<Value> {
    check_resource_type(resource, target)?;
    let (name, resource_namespace) = object_key(resource)?;
    let template = template_from_resource(resource, target)?;

    let mut metadata = Map::new();
    metadata.insert("name".to_string(), json!(name));

    let namespace = if target.kind == "Namespace" {
        Some(name.clone())
    } else if target.namespaced {
        Some(
            namespace_override
                .map(str::to_string)
                .or(resource_namespace)
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        )
    } else {
        None
    };
    if let Some(ns) = namespace {
        metadata.insert("namespace".to_string(), json!(ns));
    }

    Ok(json!({
        "apiVersion": format!("{}/{}", options.federated_group, options.federation_version),
        "kind": target.federated_kind(),
        "metadata": metadata,
        "spec": {
            "template": template,
            "placement": {
                "clusterSelector": {
                    "matchLabels": {},
                },
            },
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::federation::types::lookup_type;

    fn options() -> FederateOptions {
        FederateOptions {
            federated_group: "types.federation.k8s.io".to_string(),
            federation_version: "v1alpha1".to_string(),
        }
    }

    fn deployment() -> Value {
        json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "web",
                "namespace": "shop",
                "uid": "1234",
                "resourceVersion": "99",
                "labels": {"app": "web"},
                "annotations": {LAST_APPLIED_ANNOTATION: "{}"},
            },
            "spec": {"replicas": 3},
            "status": {"readyReplicas": 3},
        })
    }

    #[test]
    fn test_federated_deployment() -> Result<()> {
        let target = lookup_type("deployments.apps").unwrap();

        let federated = federated_resource(&deployment(), &target, None, &options())?;

        assert_eq!(federated["apiVersion"], "types.federation.k8s.io/v1alpha1");
        assert_eq!(federated["kind"], "FederatedDeployment");
        assert_eq!(federated["metadata"]["name"], "web");
        assert_eq!(federated["metadata"]["namespace"], "shop");
        assert_eq!(
            federated["spec"]["template"],
            json!({"metadata": {"labels": {"app": "web"}}, "spec": {"replicas": 3}})
        );
        assert_eq!(
            federated["spec"]["placement"]["clusterSelector"]["matchLabels"],
            json!({})
        );
        Ok(())
    }

    #[test]
    fn test_namespace_override_and_default() -> Result<()> {
        let target = lookup_type("configmaps").unwrap();
        let cm = json!({"apiVersion": "v1", "kind": "ConfigMap", "metadata": {"name": "c"}, "data": {"k": "v"}});

        let defaulted = federated_resource(&cm, &target, None, &options())?;
        let overridden = federated_resource(&cm, &target, Some("team"), &options())?;

        assert_eq!(defaulted["metadata"]["namespace"], "default");
        assert_eq!(overridden["metadata"]["namespace"], "team");
        assert!(defaulted["spec"]["template"].get("metadata").is_none());
        Ok(())
    }

    #[test]
    fn test_federated_namespace_lives_in_itself() -> Result<()> {
        let target = lookup_type("namespaces").unwrap();
        let ns = json!({"apiVersion": "v1", "kind": "Namespace", "metadata": {"name": "shop"}});

        let federated = federated_resource(&ns, &target, None, &options())?;

        assert_eq!(federated["metadata"]["namespace"], "shop");
        Ok(())
    }

    #[test]
    fn test_cluster_scoped_has_no_namespace() -> Result<()> {
        let target = lookup_type("clusterroles").unwrap();
        let role = json!({
            "apiVersion": "rbac.authorization.k8s.io/v1",
            "kind": "ClusterRole",
            "metadata": {"name": "reader"},
            "rules": [],
        });

        let federated = federated_resource(&role, &target, Some("ignored"), &options())?;

        assert!(federated["metadata"].get("namespace").is_none());
        Ok(())
    }

    #[test]
    fn test_service_cluster_ip_removed() -> Result<()> {
        let target = lookup_type("services").unwrap();
        let svc = json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "web", "namespace": "shop"},
            "spec": {"clusterIP": "10.0.0.1", "ports": [{"port": 80}]},
        });

        let template = template_from_resource(&svc, &target)?;

        assert!(template["spec"].get("clusterIP").is_none());
        assert_eq!(template["spec"]["ports"][0]["port"], 80);
        Ok(())
    }

    #[test]
    fn test_kind_mismatch() {
        let target = lookup_type("services").unwrap();
        let err = federated_resource(&deployment(), &target, None, &options()).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_group_mismatch() {
        let target = lookup_type("deployments").unwrap();
        let mut wrong = deployment();
        wrong["apiVersion"] = json!("extensions/v1beta1");
        assert!(check_resource_type(&wrong, &target).is_err());
    }
}
