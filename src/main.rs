use clap::Parser;
use std::error::Error;
use subnet_divider::config::Settings;
use subnet_divider::logging::init_logging;

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let settings = Settings::from_env();
    init_logging(&settings)?;
    log::info!("#Start main()");

    let cli = cli::Cli::parse();
    cli::run(cli, &settings)
}
