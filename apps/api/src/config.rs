use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::scene::IdleSchedule;
use crate::scoring::ResumeTrack;
use crate::session::SessionSettings;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub scan_delay: Duration,
    pub scan_track: ResumeTrack,
    pub idle_min_delay: Duration,
    pub idle_max_delay: Duration,
    pub idle_avoid_repeat: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            scan_delay: Duration::from_millis(parse_or(&lookup, "SCAN_DELAY_MS", 2_200)?),
            scan_track: match lookup("SCAN_TRACK") {
                Some(raw) => raw
                    .parse::<ResumeTrack>()
                    .map_err(|e| anyhow!(e))
                    .context("SCAN_TRACK must be full-stack, frontend or backend")?,
                None => ResumeTrack::FullStack,
            },
            idle_min_delay: Duration::from_millis(parse_or(&lookup, "IDLE_MIN_DELAY_MS", 8_000)?),
            idle_max_delay: Duration::from_millis(parse_or(&lookup, "IDLE_MAX_DELAY_MS", 16_000)?),
            idle_avoid_repeat: parse_or(&lookup, "IDLE_AVOID_REPEAT", true)?,
        };

        if config.idle_max_delay < config.idle_min_delay {
            return Err(anyhow!(
                "IDLE_MAX_DELAY_MS must not be below IDLE_MIN_DELAY_MS"
            ));
        }
        Ok(config)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            scan_delay: self.scan_delay,
            track: self.scan_track,
            idle: IdleSchedule {
                min_delay: self.idle_min_delay,
                max_delay: self.idle_max_delay,
                avoid_repeat: self.idle_avoid_repeat,
            },
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.scan_delay, Duration::from_millis(2_200));
        assert_eq!(config.scan_track, ResumeTrack::FullStack);

        let settings = config.session_settings();
        assert_eq!(settings.idle, IdleSchedule::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("SCAN_DELAY_MS", "10"),
            ("SCAN_TRACK", "backend"),
            ("IDLE_AVOID_REPEAT", "false"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.scan_delay, Duration::from_millis(10));
        assert_eq!(config.scan_track, ResumeTrack::Backend);
        assert!(!config.idle_avoid_repeat);
    }

    #[test]
    fn test_invalid_values_fail() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(config_from(&[("SCAN_TRACK", "mobile")]).is_err());
        assert!(
            config_from(&[("IDLE_MIN_DELAY_MS", "500"), ("IDLE_MAX_DELAY_MS", "100")]).is_err()
        );
    }
}
