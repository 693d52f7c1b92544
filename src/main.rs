// file: src/main.rs
// version: 2.0.0
// guid: 3f9a1c7e-52b8-4d06-a1e4-c80b7d26f915

//! kubefedctl - main entry point

use kubefedctl::{
    cli::{execute, parse_args},
    config::{FedConfig, PathOptions},
    logging::init_logger,
    Result,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() {
    let (cli, warnings) = match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    if let Err(e) = init_logger(&cli.global.log_options()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    for warning in &warnings {
        warn!("{}", warning);
    }

    let command = async {
        let path_options =
            PathOptions::new_default().with_explicit_file(cli.global.kubeconfig.as_deref())?;
        let fed_config = FedConfig::new(path_options);
        let mut stdout = std::io::stdout();
        execute(cli, &fed_config, &mut stdout).await
    };

    let result: Result<()> = tokio::select! {
        result = command => result,
        _ = signal::ctrl_c() => {
            warn!("Received Ctrl+C, aborting");
            std::process::exit(130);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
