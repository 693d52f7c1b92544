// file: src/federation/mod.rs
// version: 1.0.0
// guid: 36d7b0e9-c24f-4a81-9f53-0e8a1c6b47d2

//! Federation resource generation
//!
//! Everything here is a pure transformation into `serde_json::Value`
//! manifests; applying them is the job of [`crate::kubectl`].

pub mod cluster;
pub mod federated;
pub mod type_config;
pub mod types;

pub use types::{lookup_type, resolve_type, TypeDescriptor, TypeOverrides};

use crate::Result;
use serde_json::Value;

/// Render manifests as a multi-document YAML stream
pub fn to_yaml_documents(manifests: &[Value]) -> Result<String> {
    let mut out = String::new();
    for (i, manifest) in manifests.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml::to_string(manifest)?);
    }
    Ok(out)
}

/// `kind/name` label used in log lines and dry-run output
pub fn describe(manifest: &Value) -> String {
    let kind = manifest.get("kind").and_then(Value::as_str).unwrap_or("Unknown");
    let name = manifest
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    match manifest.pointer("/metadata/namespace").and_then(Value::as_str) {
        Some(ns) => format!("{} {}/{}", kind, ns, name),
        None => format!("{} {}", kind, name),
    }
}
