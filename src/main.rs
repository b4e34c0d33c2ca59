use anyhow::Result;
use clap::Parser;

mod cli_bin;

use cli_bin::args::Cli;
use cli_bin::commands::convert_command;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    convert_command(&cli)?;
    Ok(())
}
