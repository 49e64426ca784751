use clap::Parser;
use fastrouter::cli::{run_cli, Cli};
use fastrouter::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::default_dev()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config)?;

    let mut stdout = std::io::stdout().lock();
    run_cli(&cli, &mut stdout)
}
