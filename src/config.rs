use anyhow::Result;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Which project store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Self::Memory,
            _ => Self::File,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Storage
    pub storage_backend: StorageBackend,
    pub storage_file_path: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Ledger export (disabled when no webhook URL is configured)
    pub ledger_webhook_url: Option<String>,
    pub ledger_token: Option<String>,
    pub ledger_timeout_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // Storage
        let storage_backend =
            StorageBackend::from_str(&env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".to_string()));
        let storage_file_path = env::var("STORAGE_FILE_PATH")
            .unwrap_or_else(|_| ".data/projects.json".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Ledger export
        let ledger_webhook_url = env::var("LEDGER_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.is_empty());
        let ledger_token = env::var("LEDGER_TOKEN").ok().filter(|s| !s.is_empty());
        let ledger_timeout_seconds = env::var("LEDGER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Settings {
            env,
            server_addr,
            storage_backend,
            storage_file_path,
            cors_allow_origins,
            ledger_webhook_url,
            ledger_token,
            ledger_timeout_seconds,
        })
    }
}
