// file: src/cli/args.rs
// version: 2.0.0
// guid: f6a7b8c9-d0e1-4234-8678-012345fabcde

//! Command line argument definitions

use super::commands::{
    disable::DisableArgs, enable::EnableArgs, federate::FederateArgs, join::JoinArgs,
    unjoin::UnjoinArgs, version::VersionArgs,
};
use crate::logging::{LogFormat, LogOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const ABOUT: &str = "kubefedctl controls a Kubernetes Cluster Federation";
pub const LONG_ABOUT: &str = "kubefedctl controls a Kubernetes Cluster Federation. \
    Find more information at https://github.com/kubernetes-sigs/federation-v2.";

#[derive(Parser, Debug)]
#[command(name = "kubefedctl")]
#[command(about = ABOUT, long_about = LONG_ABOUT)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags every subcommand inherits
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the kubeconfig file to use for CLI requests
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<String>,

    /// Number for the log level verbosity
    #[arg(
        short = 'v',
        long = "v",
        global = true,
        default_value_t = 0,
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=10)
    )]
    pub verbosity: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormatArg,

    /// If non-empty, also write log files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            verbosity: self.verbosity,
            quiet: self.quiet,
            format: self.log_format.into(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enables propagation of a Kubernetes API type
    Enable(EnableArgs),

    /// Disables propagation of a Kubernetes API type
    Disable(DisableArgs),

    /// Federate creates a federated resource from a kubernetes resource
    Federate(FederateArgs),

    /// Join registers a Kubernetes cluster with a federation control plane
    Join(JoinArgs),

    /// Remove the registration of a Kubernetes cluster from a federation control plane
    Unjoin(UnjoinArgs),

    /// Print the version info
    Version(VersionArgs),
}

impl Commands {
    /// Subcommand name, used for the operation span
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Enable(_) => "enable",
            Commands::Disable(_) => "disable",
            Commands::Federate(_) => "federate",
            Commands::Join(_) => "join",
            Commands::Unjoin(_) => "unjoin",
            Commands::Version(_) => "version",
        }
    }
}

/// Log format argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Manifest output format
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}
