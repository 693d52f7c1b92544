// file: src/cli/root.rs
// version: 1.0.0
// guid: 8d27b4e1-c95a-4f30-b6d8-e1a49c07f52b

//! The `kubefedctl` root command

use super::{
    args::{Cli, Commands},
    commands::{disable, enable, federate, join, unjoin, version},
    normalize::{global_flag_names, normalize_args},
};
use crate::{config::FedConfig, logging::logger::with_async_operation_span, Result};
use clap::{CommandFactory, FromArgMatches};
use std::ffi::OsString;
use std::io::Write;
use tracing::debug;

/// The root command with all six subcommands registered
pub fn new_kubefedctl_command() -> clap::Command {
    Cli::command()
}

/// Parse a full argument list, program name first. Flag names spelled with
/// underscores are normalized before clap sees them; the returned warnings
/// are for non-global flags that were rewritten.
pub fn parse_args<I, T>(args: I) -> std::result::Result<(Cli, Vec<String>), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = new_kubefedctl_command();
    let normalized = normalize_args(args, &global_flag_names(&command));
    let matches = command.try_get_matches_from(normalized.args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    Ok((cli, normalized.warnings))
}

/// Run the parsed command line. Without a subcommand the root help is
/// written to `out`.
pub async fn execute(cli: Cli, fed_config: &FedConfig, out: &mut dyn Write) -> Result<()> {
    let command = match cli.command {
        Some(command) => command,
        None => {
            let help = new_kubefedctl_command().render_help();
            write!(out, "{}", help)?;
            return Ok(());
        }
    };

    debug!("Running subcommand {}", command.name());
    let name = command.name();
    with_async_operation_span(name, || async move {
        match command {
            Commands::Enable(args) => enable::run(args, out, fed_config).await,
            Commands::Disable(args) => disable::run(args, out, fed_config).await,
            Commands::Federate(args) => federate::run(args, out, fed_config).await,
            Commands::Join(args) => join::run(args, out, fed_config).await,
            Commands::Unjoin(args) => unjoin::run(args, out, fed_config).await,
            Commands::Version(args) => version::run(args, out),
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::fed_config;
    use std::path::PathBuf;

    #[test]
    fn test_root_registers_exactly_six_subcommands() {
        let command = new_kubefedctl_command();
        let names: Vec<&str> = command.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, vec!["enable", "disable", "federate", "join", "unjoin", "version"]);
    }

    #[tokio::test]
    async fn test_no_subcommand_prints_help() -> Result<()> {
        let (_file, config) = fed_config();
        let (cli, warnings) = parse_args(["kubefedctl"]).unwrap();
        let mut out = Vec::new();

        execute(cli, &config, &mut out).await?;

        assert!(warnings.is_empty());
        let help = String::from_utf8(out).unwrap();
        assert!(help.contains("kubefedctl controls a Kubernetes Cluster Federation"));
        assert!(help.contains("enable"));
        assert!(help.contains("unjoin"));
        Ok(())
    }

    #[test]
    fn test_global_flag_underscore_is_silent() {
        let (dashed, _) = parse_args(["kubefedctl", "--log-dir", "/tmp/logs", "version"]).unwrap();
        let (underscored, warnings) =
            parse_args(["kubefedctl", "--log_dir=/tmp/logs", "version"]).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(dashed.global.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(underscored.global.log_dir, dashed.global.log_dir);
    }

    #[test]
    fn test_subcommand_flag_underscore_warns() {
        let (cli, warnings) =
            parse_args(["kubefedctl", "enable", "services", "--dry_run"]).unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("--dry_run is DEPRECATED"));
        match cli.command {
            Some(Commands::Enable(args)) => assert!(args.dry_run),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let (cli, _) =
            parse_args(["kubefedctl", "version", "--kubeconfig", "/tmp/kc", "--v", "4"]).unwrap();
        assert_eq!(cli.global.kubeconfig.as_deref(), Some("/tmp/kc"));
        assert_eq!(cli.global.verbosity, 4);
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(parse_args(["kubefedctl", "bogus"]).is_err());
    }

    #[test]
    fn test_verbosity_out_of_range() {
        assert!(parse_args(["kubefedctl", "-v", "11"]).is_err());
    }

    #[tokio::test]
    async fn test_version_dispatch() -> Result<()> {
        let (_file, config) = fed_config();
        let (cli, _) = parse_args(["kubefedctl", "version"]).unwrap();
        let mut out = Vec::new();

        execute(cli, &config, &mut out).await?;

        assert!(String::from_utf8(out).unwrap().starts_with("kubefedctl version:"));
        Ok(())
    }
}
