use std::fs;
use std::io;
use std::path::Path;

use clap::Parser;
use clap_complete::{generate, Shell};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use evat_cli::cli::{build_cli_command, Cli, Commands};
use evat_cli::manifest;

mod commands;

use commands::{drivers, forecast, readiness, trend};

fn generate_completions(shell: Shell, out: Option<&Path>) -> anyhow::Result<()> {
    let mut command = build_cli_command();
    let name = command.get_name().to_string();
    match out {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            generate(shell, &mut command, name, &mut file);
            info!("Wrote completions to {}", path.display());
        }
        None => generate(shell, &mut command, name, &mut io::stdout()),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Trend(args) => trend::handle(args),
        Commands::Readiness(args) => readiness::handle(args),
        Commands::Forecast(args) => forecast::handle(args),
        Commands::Drivers(args) => drivers::handle(args),
        Commands::Completions { shell, out } => generate_completions(*shell, out.as_deref()),
    };

    if let Err(err) = result {
        error!("Command failed: {err:#}");
        std::process::exit(1);
    }
}
