// file: src/federation/cluster.rs
// version: 1.0.0
// guid: a8f2c6d1-5b39-4e07-8c64-1e9b0d7a3f25

//! Resources created when a cluster joins the federation

use crate::config::FEDERATION_CORE_GROUP;
use serde_json::{json, Value};

/// Names shared by join and unjoin for one member cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinNames {
    pub cluster_name: String,
    pub host_cluster_name: String,
    pub federation_namespace: String,
}

impl JoinNames {
    pub fn new(
        cluster_name: impl Into<String>,
        host_cluster_name: impl Into<String>,
        federation_namespace: impl Into<String>,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            host_cluster_name: host_cluster_name.into(),
            federation_namespace: federation_namespace.into(),
        }
    }

    /// Service account in the member cluster used by the control plane
    pub fn service_account(&self) -> String {
        format!("{}-{}", self.cluster_name, self.host_cluster_name)
    }

    /// Cluster role and binding granting the service account access
    pub fn cluster_role(&self) -> String {
        format!("federation-controller-manager:{}", self.service_account())
    }

    /// Secret in the host cluster holding the member credentials
    pub fn credentials_secret(&self) -> String {
        format!("{}-credentials", self.cluster_name)
    }
}

pub fn namespace(name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": { "name": name },
    })
}

pub fn service_account(names: &JoinNames) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "ServiceAccount",
        "metadata": {
            "name": names.service_account(),
            "namespace": names.federation_namespace,
        },
    })
}

pub fn cluster_role(names: &JoinNames) -> Value {
    json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRole",
        "metadata": { "name": names.cluster_role() },
        "rules": [
            {
                "apiGroups": ["*"],
                "resources": ["*"],
                "verbs": ["*"],
            },
            {
                "nonResourceURLs": ["/healthz"],
                "verbs": ["get"],
            },
        ],
    })
}

pub fn cluster_role_binding(names: &JoinNames) -> Value {
    json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRoleBinding",
        "metadata": { "name": names.cluster_role() },
        "roleRef": {
            "apiGroup": "rbac.authorization.k8s.io",
            "kind": "ClusterRole",
            "name": names.cluster_role(),
        },
        "subjects": [
            {
                "kind": "ServiceAccount",
                "name": names.service_account(),
                "namespace": names.federation_namespace,
            },
        ],
    })
}

/// Host-side Secret. Values are already base64 encoded, copied verbatim
/// from the member's service account token secret.
pub fn credentials_secret(names: &JoinNames, token: &str, ca_crt: Option<&str>) -> Value {
    let mut data = json!({ "token": token });
    if let Some(ca) = ca_crt {
        data["ca.crt"] = json!(ca);
    }
    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "type": "Opaque",
        "metadata": {
            "name": names.credentials_secret(),
            "namespace": names.federation_namespace,
        },
        "data": data,
    })
}

pub fn federated_cluster(names: &JoinNames, federation_version: &str) -> Value {
    json!({
        "apiVersion": format!("{}/{}", FEDERATION_CORE_GROUP, federation_version),
        "kind": "FederatedCluster",
        "metadata": {
            "name": names.cluster_name,
            "namespace": names.federation_namespace,
        },
        "spec": {
            "clusterRef": { "name": names.cluster_name },
            "secretRef": { "name": names.credentials_secret() },
        },
    })
}

/// Cluster registry entry pointing at the member's API server
pub fn registry_cluster(
    cluster_name: &str,
    registry_namespace: &str,
    server: &str,
    ca_bundle: Option<&str>,
) -> Value {
    let mut endpoints = json!({
        "serverEndpoints": [
            { "clientCIDR": "0.0.0.0/0", "serverAddress": server },
        ],
    });
    if let Some(ca) = ca_bundle {
        endpoints["caBundle"] = json!(ca);
    }
    json!({
        "apiVersion": "clusterregistry.k8s.io/v1alpha1",
        "kind": "Cluster",
        "metadata": {
            "name": cluster_name,
            "namespace": registry_namespace,
        },
        "spec": {
            "kubernetesApiEndpoints": endpoints,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> JoinNames {
        JoinNames::new("cluster2", "cluster1", "federation-system")
    }

    #[test]
    fn test_derived_names() {
        let n = names();
        assert_eq!(n.service_account(), "cluster2-cluster1");
        assert_eq!(n.cluster_role(), "federation-controller-manager:cluster2-cluster1");
        assert_eq!(n.credentials_secret(), "cluster2-credentials");
    }

    #[test]
    fn test_binding_targets_service_account() {
        let binding = cluster_role_binding(&names());
        assert_eq!(binding["roleRef"]["name"], names().cluster_role());
        assert_eq!(binding["subjects"][0]["name"], "cluster2-cluster1");
        assert_eq!(binding["subjects"][0]["namespace"], "federation-system");
    }

    #[test]
    fn test_credentials_secret_copies_data() {
        let secret = credentials_secret(&names(), "dG9rZW4=", Some("Y2E="));
        assert_eq!(secret["data"]["token"], "dG9rZW4=");
        assert_eq!(secret["data"]["ca.crt"], "Y2E=");

        let without_ca = credentials_secret(&names(), "dG9rZW4=", None);
        assert!(without_ca["data"].get("ca.crt").is_none());
    }

    #[test]
    fn test_federated_cluster_refs() {
        let cluster = federated_cluster(&names(), "v1alpha1");
        assert_eq!(cluster["apiVersion"], "core.federation.k8s.io/v1alpha1");
        assert_eq!(cluster["spec"]["clusterRef"]["name"], "cluster2");
        assert_eq!(cluster["spec"]["secretRef"]["name"], "cluster2-credentials");
    }

    #[test]
    fn test_registry_cluster_endpoint() {
        let cluster = registry_cluster(
            "cluster2",
            "kube-multicluster-public",
            "https://10.0.0.2:6443",
            Some("Q0EK"),
        );
        let endpoints = &cluster["spec"]["kubernetesApiEndpoints"];
        assert_eq!(endpoints["serverEndpoints"][0]["serverAddress"], "https://10.0.0.2:6443");
        assert_eq!(endpoints["caBundle"], "Q0EK");
    }
}
