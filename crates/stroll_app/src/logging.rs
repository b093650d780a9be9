//! Logger setup.
//!
//! Everything in the workspace logs through the `log` facade; this wires the
//! facade to stderr via `fern`.  Lines look like
//! `[DEBUG stroll_core::motion] landed at x=412.0`.

use anyhow::Context as _;
use log::LevelFilter;

use crate::builder::{parse_level, AppConfig, ConfigError};

/// Environment variable that overrides [`AppConfig::log_level`].
pub const LOG_ENV: &str = "STROLL_LOG";

/// Level to install: the environment override when set, otherwise the
/// configured one.
pub fn resolve_level(configured: &str, env: Option<&str>) -> Result<LevelFilter, ConfigError> {
    match env {
        Some(level) if !level.trim().is_empty() => parse_level(level),
        _ => parse_level(configured),
    }
}

/// Install the global logger.  Fails if the level is unknown or a logger is
/// already installed.
pub fn init(config: &AppConfig) -> anyhow::Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(&config.log_level, env.as_deref())
        .context("invalid log level")?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // winit is chatty at debug
        .level_for("winit", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")?;

    log::info!("logging at {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        assert_eq!(resolve_level("info", Some("trace")).unwrap(), LevelFilter::Trace);
        assert_eq!(resolve_level("info", None).unwrap(), LevelFilter::Info);
    }

    #[test]
    fn blank_env_is_ignored() {
        assert_eq!(resolve_level("warn", Some("  ")).unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn levels_are_case_insensitive() {
        assert_eq!(resolve_level("DEBUG", None).unwrap(), LevelFilter::Debug);
        assert!(resolve_level("verbose", None).is_err());
    }
}
