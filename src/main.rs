//! CLI entry point for wave function collapse tile generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, GenerationRunner};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_filter()),
    )
    .init();

    let runner = GenerationRunner::new(cli);
    runner.process()?;
    Ok(())
}
