use log::debug;
use simplelog::{Config as LogConfig, TermLogger, TerminalMode};
use std::fs::File;
use structopt::StructOpt;
use transit_map_overlay::cli::Cli;
use transit_map_overlay::config::{default_config_path, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::from_args();

    let config_path = default_config_path();
    let config = if config_path.exists() {
        let mut fp = File::open(&config_path)?;
        Config::load(&mut fp)?
    } else {
        Config::default()
    };

    let level_filter = cli.verbosity(config.log_level());
    TermLogger::init(level_filter, LogConfig::default(), TerminalMode::Mixed)?;
    if config_path.exists() {
        debug!("loaded configuration from {:?}", config_path);
    }

    cli.execute_subcommand(config)
}
