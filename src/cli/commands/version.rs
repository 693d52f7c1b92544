// file: src/cli/commands/version.rs
// version: 1.0.0
// guid: 4c81e5a9-b3d0-4f62-a7e4-0d95f2c61b38

//! `kubefedctl version`

use crate::{cli::args::OutputFormat, Result};
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::io::Write;

#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Print the version info as structured output
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Build information. Git fields come from the build environment and are
/// empty when the binary was built outside a release pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    pub git_commit: String,
    pub git_tree_state: String,
    pub build_date: String,
    pub platform: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: crate::VERSION.to_string(),
            git_commit: option_env!("KUBEFEDCTL_GIT_COMMIT").unwrap_or_default().to_string(),
            git_tree_state: option_env!("KUBEFEDCTL_GIT_TREE_STATE")
                .unwrap_or_default()
                .to_string(),
            build_date: option_env!("KUBEFEDCTL_BUILD_DATE").unwrap_or_default().to_string(),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version.Info{{Version:\"{}\", GitCommit:\"{}\", GitTreeState:\"{}\", BuildDate:\"{}\", Platform:\"{}\"}}",
            self.version, self.git_commit, self.git_tree_state, self.build_date, self.platform
        )
    }
}

pub fn run(args: VersionArgs, out: &mut dyn Write) -> Result<()> {
    let info = VersionInfo::current();
    match args.output {
        None => writeln!(out, "kubefedctl version: {}", info)?,
        Some(OutputFormat::Json) => writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?,
        Some(OutputFormat::Yaml) => write!(out, "{}", serde_yaml::to_string(&info)?)?,
    }
    Ok(())
}
