// file: src/cli/commands/testing.rs
// version: 1.0.0
// guid: 7a2f5c08-e13b-4d96-8b41-95c6d0e3a2f7

//! Kubeconfig fixture shared by the subcommand tests

use crate::config::{FedConfig, PathOptions};
use std::io::Write;
use tempfile::NamedTempFile;

pub const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: cluster1
clusters:
  - name: cluster1
    cluster:
      server: https://cluster1.example.com:6443
  - name: cluster2
    cluster:
      server: https://cluster2.example.com:6443
      certificate-authority-data: Q0EK
contexts:
  - name: cluster1
    context:
      cluster: cluster1
      user: admin
  - name: cluster2
    context:
      cluster: cluster2
      user: admin
users:
  - name: admin
    user:
      token: secret
"#;

/// Keep the file alive for as long as the config is used
pub fn fed_config() -> (NamedTempFile, FedConfig) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", KUBECONFIG).unwrap();
    let options = PathOptions::new_default()
        .with_explicit_file(Some(file.path().to_str().unwrap()))
        .unwrap();
    (file, FedConfig::new(options))
}

pub fn output(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
