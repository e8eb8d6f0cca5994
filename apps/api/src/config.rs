use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_path: PathBuf,
    pub chat_response_delay: Duration,
    pub chat_phase_delay: Duration,
    pub generation_delay: Duration,
    pub jd_analysis_delay: Duration,
    pub chat_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_path: std::env::var("ZCV_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/zcv-data.json")),
            chat_response_delay: delay_env("CHAT_RESPONSE_DELAY_MS", 2000)?,
            chat_phase_delay: delay_env("CHAT_PHASE_DELAY_MS", 1000)?,
            generation_delay: delay_env("GENERATION_DELAY_MS", 3000)?,
            jd_analysis_delay: delay_env("JD_ANALYSIS_DELAY_MS", 2000)?,
            chat_seed: optional_env("CHAT_SEED")?,
        })
    }

    /// Zero delays and a fixed seed: the service answers immediately and
    /// deterministically.
    #[cfg(test)]
    pub fn for_tests(data_path: PathBuf) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            data_path,
            chat_response_delay: Duration::ZERO,
            chat_phase_delay: Duration::ZERO,
            generation_delay: Duration::ZERO,
            jd_analysis_delay: Duration::ZERO,
            chat_seed: Some(7),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(optional_env(key)?.unwrap_or(default))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}

fn delay_env(key: &str, default_ms: u64) -> Result<Duration> {
    parse_env(key, default_ms).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_missing_is_none() {
        let value: Option<u64> = optional_env("ZCV_TEST_SURELY_UNSET_VARIABLE").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        std::env::set_var("ZCV_TEST_BAD_DELAY", "soon");
        let err = delay_env("ZCV_TEST_BAD_DELAY", 10).unwrap_err();
        assert!(err.to_string().contains("ZCV_TEST_BAD_DELAY"));
    }

    #[test]
    fn test_delay_default_in_millis() {
        let d = delay_env("ZCV_TEST_UNSET_DELAY", 1500).unwrap();
        assert_eq!(d, Duration::from_millis(1500));
    }
}
