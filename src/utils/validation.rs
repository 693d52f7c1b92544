// file: src/utils/validation.rs
// version: 2.0.0
// guid: 9a8b7c6d-5e4f-4a2b-8c0d-9e8f7a6b5c4d

//! Kubernetes object name validation.
//!
//! Cluster names, type config names and resource names must be DNS-1123
//! subdomains. Namespaces must be DNS-1123 labels.

use crate::{error::FedCtlError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{}$", DNS1123_LABEL_FMT)).expect("label pattern is valid")
    })
}

fn subdomain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            "^{label}(\\.{label})*$",
            label = DNS1123_LABEL_FMT
        ))
        .expect("subdomain pattern is valid")
    })
}

/// Validation helpers for names passed on the command line
#[derive(Debug, Clone)]
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate a DNS-1123 label (namespaces)
    pub fn validate_dns1123_label(what: &str, value: &str) -> Result<()> {
        debug!("Validating {} {:?} as DNS-1123 label", what, value);

        if value.is_empty() {
            return Err(FedCtlError::validation(format!("{} must not be empty", what)));
        }
        if value.len() > DNS1123_LABEL_MAX_LENGTH {
            return Err(FedCtlError::validation(format!(
                "{} \"{}\" must be no more than {} characters",
                what, value, DNS1123_LABEL_MAX_LENGTH
            )));
        }
        if !label_regex().is_match(value) {
            return Err(FedCtlError::validation(format!(
                "{} \"{}\" must consist of lower case alphanumeric characters or '-', \
                 and must start and end with an alphanumeric character",
                what, value
            )));
        }
        Ok(())
    }

    /// Validate a DNS-1123 subdomain (object names)
    pub fn validate_dns1123_subdomain(what: &str, value: &str) -> Result<()> {
        debug!("Validating {} {:?} as DNS-1123 subdomain", what, value);

        if value.is_empty() {
            return Err(FedCtlError::validation(format!("{} must not be empty", what)));
        }
        if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
            return Err(FedCtlError::validation(format!(
                "{} \"{}\" must be no more than {} characters",
                what, value, DNS1123_SUBDOMAIN_MAX_LENGTH
            )));
        }
        if !subdomain_regex().is_match(value) {
            return Err(FedCtlError::validation(format!(
                "{} \"{}\" must consist of lower case alphanumeric characters, '-' or '.', \
                 and must start and end with an alphanumeric character",
                what, value
            )));
        }
        Ok(())
    }
}
