use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sheetpass::cli::{self, Cli};
use sheetpass::config::{Config, ConfigSource, TOKEN_ENV};

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> sheetpass::Result<(Config, ConfigSource)> {
    let path = Config::resolve_path(cli.config.as_deref());
    let (mut config, source) = Config::load_or_default(&path)?;
    config.apply_overrides(std::env::var(TOKEN_ENV).ok())?;
    Ok((config, source))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, source) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    init_tracing(&config.log_level);
    source.log();

    match cli::run(&cli, &config) {
        Ok(outcome) => {
            outcome.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
