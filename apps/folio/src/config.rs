use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::resume::ParserProfile;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: PathBuf,
    pub content_dir: PathBuf,
    pub experience_target: PathBuf,
    pub hero_target: PathBuf,
    pub data_out: PathBuf,
    pub profile: ParserProfile,
    pub port: u16,
    pub rust_log: String,
    pub contact_max_requests: usize,
    pub contact_window: Duration,
    pub contact_max_tracked: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resume_path: env_or("RESUME_PATH", "content/resume.md").into(),
            content_dir: env_or("CONTENT_DIR", "content").into(),
            experience_target: env_or("EXPERIENCE_TARGET", "src/components/Experience.tsx").into(),
            hero_target: env_or("HERO_TARGET", "src/components/Hero.tsx").into(),
            data_out: env_or("DATA_OUT", "src/data/resume.json").into(),
            profile: env_or("RESUME_PROFILE", "standard")
                .parse::<ParserProfile>()
                .map_err(|e: String| anyhow!(e))
                .context("RESUME_PROFILE must be 'standard' or 'extended'")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            contact_max_requests: parse_env("CONTACT_MAX_REQUESTS", 5)
                .context("CONTACT_MAX_REQUESTS must be a positive integer")?,
            contact_window: Duration::from_secs(
                parse_env("CONTACT_WINDOW_SECS", 3600)
                    .context("CONTACT_WINDOW_SECS must be a number of seconds")?,
            ),
            contact_max_tracked: parse_env("CONTACT_MAX_TRACKED", 10_000)
                .context("CONTACT_MAX_TRACKED must be a positive integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        Err(_) => Ok(default),
    }
}
