//! log4rs setup for the binary.

use crate::config::Settings;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Initialise logging from the log4rs file, or a stderr logger when it is missing.
pub fn init_logging(settings: &Settings) -> Result<(), Box<dyn Error>> {
    if Path::new(&settings.log_config).exists() {
        log4rs::init_file(&settings.log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", settings.log_config))?;
        log::debug!("Logging configured from {}", settings.log_config);
    } else {
        log4rs::init_config(console_config(settings.log_level)?)?;
        log::debug!(
            "{} not found, logging to stderr at {}",
            settings.log_config,
            settings.log_level
        );
    }
    Ok(())
}

/// stderr logger at `level`, so table and file output on stdout stay clean.
pub fn console_config(level: log::LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
