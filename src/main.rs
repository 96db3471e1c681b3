use clap::Parser;
use convrouter::cli::{run_cli, Cli};
use convrouter::logging::init_logging_with_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.app_config()?;
    init_logging_with_config(&config.logging)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_cli(&cli, &config, &mut out)
}
