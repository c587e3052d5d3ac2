use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which `LogStore` implementation backs the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBackend {
    File,
    Memory,
}

impl FromStr for LogBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(LogBackend::File),
            "memory" => Ok(LogBackend::Memory),
            other => bail!("LOG_BACKEND must be 'file' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub log_file_path: PathBuf,
    pub log_backend: LogBackend,
    /// Overrides the built-in role table when set.
    pub taxonomy_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_file_path: std::env::var("LOG_FILE_PATH")
                .unwrap_or_else(|_| "resume_logs.txt".to_string())
                .into(),
            log_backend: std::env::var("LOG_BACKEND")
                .unwrap_or_else(|_| "file".to_string())
                .parse()?,
            taxonomy_path: optional_env("TAXONOMY_PATH").map(PathBuf::from),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
