//! Environment configuration.

use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::quotation::ContractorInfo;

/// Fixed name of the generated document; each generation overwrites it.
pub const OUTPUT_FILE: &str = "proposta.pdf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),
    #[error("failed to read contractor profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid contractor profile {path}: {source}")]
    ProfileFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub assets_dir: PathBuf,
    pub logo_file: String,
    pub output_dir: PathBuf,
    pub typst_bin: String,
    pub contractor_profile: PathBuf,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port_raw = var("PORT", "8080");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let allowed_origins = var(
            "ALLOWED_ORIGINS",
            "http://localhost:5173,http://localhost:3000,http://localhost:8080,http://127.0.0.1:8080",
        )
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            assets_dir: PathBuf::from(var("ASSETS_DIR", "assets")),
            logo_file: var("LOGO_FILE", "gpm_desentupidora.png"),
            output_dir: PathBuf::from(var("OUTPUT_DIR", ".")),
            typst_bin: var("TYPST_BIN", "typst"),
            contractor_profile: PathBuf::from(var("CONTRACTOR_PROFILE", "static/contractor.json")),
            allowed_origins,
        })
    }

    pub fn logo_path(&self) -> PathBuf {
        self.assets_dir.join(&self.logo_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE)
    }

    /// Contractor profile from the configured JSON file, or the built-in one
    /// when the file does not exist.
    pub fn load_contractor(&self) -> Result<ContractorInfo, ConfigError> {
        let path = &self.contractor_profile;
        if !path.exists() {
            log::info!(
                "contractor profile {} not found, using built-in profile",
                path.display()
            );
            return Ok(ContractorInfo::builtin());
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ProfileIo {
            path: path.display().to_string(),
            source,
        })?;
        let contractor = serde_json::from_str(&raw).map_err(|source| ConfigError::ProfileFormat {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("loaded contractor profile from {}", path.display());
        Ok(contractor)
    }
}
