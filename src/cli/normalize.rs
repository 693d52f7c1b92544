// file: src/cli/normalize.rs
// version: 1.0.0
// guid: 58c1f0a6-2e9d-4b47-b3a8-c6e02d9f71b4

//! Flag name normalization.
//!
//! Flags inherited from the global registry may be spelled with underscores
//! (`--log_dir`) and are quietly mapped to their dashed form. Any other flag
//! spelled with underscores is mapped as well but earns a deprecation warning.

use clap::Command;
use std::collections::BTreeSet;
use std::ffi::OsString;

/// How a flag name with word separators is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationPolicy {
    /// `_` and `-` are equivalent
    WordSep,
    /// `_` and `-` are equivalent, but `_` is reported
    WarnWordSep,
}

impl NormalizationPolicy {
    /// Canonical name plus an optional warning for the caller to emit
    pub fn normalize(&self, name: &str) -> (String, Option<String>) {
        let canonical = word_sep_normalize(name);
        match self {
            NormalizationPolicy::WarnWordSep if canonical != name => {
                let warning = format!(
                    "--{} is DEPRECATED and will be removed in a future version. Use --{} instead.",
                    name, canonical
                );
                (canonical, Some(warning))
            }
            _ => (canonical, None),
        }
    }
}

/// Treat `_` as `-` in a flag name
pub fn word_sep_normalize(name: &str) -> String {
    if name.contains('_') {
        name.replace('_', "-")
    } else {
        name.to_string()
    }
}

/// Long names (and aliases) of the flags marked global on `command`
pub fn global_flag_names(command: &Command) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for arg in command.get_arguments().filter(|a| a.is_global_set()) {
        if let Some(long) = arg.get_long() {
            names.insert(long.to_string());
        }
        if let Some(aliases) = arg.get_all_aliases() {
            names.extend(aliases.into_iter().map(str::to_string));
        }
    }
    names
}

/// Arguments after normalization, with any warnings that were raised
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedArgs {
    pub args: Vec<OsString>,
    pub warnings: Vec<String>,
}

/// Rewrite long flag names in `args`. The first element is the program name
/// and everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I, global_flags: &BTreeSet<String>) -> NormalizedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = NormalizedArgs::default();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough {
            normalized.args.push(arg);
            continue;
        }

        let text = match arg.to_str() {
            Some(text) => text,
            None => {
                normalized.args.push(arg);
                continue;
            }
        };

        if text == "--" {
            passthrough = true;
            normalized.args.push(arg);
            continue;
        }

        let flag = match text.strip_prefix("--") {
            Some(flag) if flag.contains('_') => flag,
            _ => {
                normalized.args.push(arg);
                continue;
            }
        };

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        let policy = if global_flags.contains(&word_sep_normalize(name)) {
            NormalizationPolicy::WordSep
        } else {
            NormalizationPolicy::WarnWordSep
        };
        let (canonical, warning) = policy.normalize(name);
        normalized.warnings.extend(warning);

        let rewritten = match value {
            Some(value) => format!("--{}={}", canonical, value),
            None => format!("--{}", canonical),
        };
        normalized.args.push(OsString::from(rewritten));
    }

    normalized
}
