//! maglaunch binary entry point.

use clap::Parser;
use maglaunch::cli::{Cli, Command, RunOptions, cmd_params, cmd_run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Params { json } => cmd_params(json),
        Command::Run {
            params,
            shared_dir,
            home_dir,
            runner,
            dispatcher_url,
            data_url,
            dry_run,
        } => {
            cmd_run(RunOptions {
                params_file: params,
                shared_dir,
                home_dir,
                runner,
                dispatcher_url,
                data_url,
                dry_run,
            })
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
