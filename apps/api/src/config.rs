use anyhow::{Context, Result};

/// Message shown when the Gemini credential is missing. Startup halts on it.
pub const MISSING_API_KEY_MESSAGE: &str =
    "API key not found. Please create a .env file with your GOOGLE_API_KEY.";

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Read once at startup and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch
    /// the process environment.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup("GOOGLE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context(MISSING_API_KEY_MESSAGE)?;

        Ok(Config {
            google_api_key,
            gemini_base_url: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
