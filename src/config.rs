//! Defaults and environment settings.

/// Network shown before the user enters one.
pub const DEFAULT_NETWORK: &str = "192.168.0.0";
/// Mask shown before the user enters one.
pub const DEFAULT_MASK: u8 = 16;
/// `version` written into exported JSON.
pub const EXPORT_VERSION: u32 = 2;
/// log4rs file read by the binary.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Level used when the log4rs file is missing.
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

/// Runtime settings, from `.env` and the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub network: String,
    pub mask: u8,
    pub log_config: String,
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            network: DEFAULT_NETWORK.to_string(),
            mask: DEFAULT_MASK,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read the `SUBNET_DIVIDER_*` variables.
    pub fn from_env() -> Settings {
        dotenv::dotenv().ok();
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparsable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(network) = lookup("SUBNET_DIVIDER_NETWORK") {
            settings.network = network;
        }
        if let Some(mask) = lookup("SUBNET_DIVIDER_MASK") {
            match mask.trim().parse::<u8>() {
                Ok(m) if m <= crate::models::MAX_LENGTH => settings.mask = m,
                _ => log::warn!("Ignoring SUBNET_DIVIDER_MASK={mask:?}"),
            }
        }
        if let Some(path) = lookup("SUBNET_DIVIDER_LOG_CONFIG") {
            settings.log_config = path;
        }
        if let Some(level) = lookup("SUBNET_DIVIDER_LOG_LEVEL") {
            match level.trim().parse::<log::LevelFilter>() {
                Ok(l) => settings.log_level = l,
                Err(_) => log::warn!("Ignoring SUBNET_DIVIDER_LOG_LEVEL={level:?}"),
            }
        }
        settings
    }
}
