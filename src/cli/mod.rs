// file: src/cli/mod.rs
// version: 2.0.0
// guid: e5f6a7b8-c9d0-1234-5678-901234efabcd

//! Command line interface for kubefedctl

pub mod args;
pub mod commands;
pub mod normalize;
pub mod root;

pub use args::{Cli, Commands, GlobalArgs};
pub use root::{execute, new_kubefedctl_command, parse_args};
