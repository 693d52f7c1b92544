// file: src/config/mod.rs
// version: 1.0.0
// guid: 5d0e2b84-a3c7-4f19-8e62-b7f41c9a0d38

//! Configuration module for kubefedctl
//!
//! Handles locating and merging kubeconfig files and resolving the host and
//! member cluster connections that every subcommand shares.

pub mod fed_config;
pub mod kubeconfig;
pub mod loader;
pub mod path_options;

pub use fed_config::{ClusterAccess, FedConfig};
pub use kubeconfig::{Cluster, Context, Kubeconfig, NamedCluster, NamedContext, NamedUser};
pub use loader::KubeconfigLoader;
pub use path_options::PathOptions;

/// Namespace the federation control plane runs in
pub const DEFAULT_FEDERATION_NAMESPACE: &str = "federation-system";

/// API group of generated federated types
pub const DEFAULT_FEDERATED_GROUP: &str = "types.federation.k8s.io";

/// API version of federation resources
pub const DEFAULT_FEDERATION_VERSION: &str = "v1alpha1";

/// API group of federation core resources
pub const FEDERATION_CORE_GROUP: &str = "core.federation.k8s.io";

/// Namespace the cluster registry keeps `Cluster` objects in
pub const DEFAULT_REGISTRY_NAMESPACE: &str = "kube-multicluster-public";
