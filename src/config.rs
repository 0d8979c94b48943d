use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::types::{AuthKey, Credentials};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Build-time default injected via build.rs
const DEFAULT_BASE_URL: &str = env!("PETFRIENDS_URL");

const FALLBACK_INVALID_EMAIL: &str = "invalid@example.com";
const FALLBACK_INVALID_PASSWORD: &str = "wrong-password";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub email: Option<String>,
    pub password: Option<String>,

    /// Credentials the service is expected to refuse.
    pub invalid_email: Option<String>,
    pub invalid_password: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&Self::path()?)
    }

    pub fn save(&self) -> Result<(), CliError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn path() -> Result<PathBuf, CliError> {
        let dirs = ProjectDirs::from("ru", "skillfactory", "petfriends")
            .ok_or_else(|| CliError::Other("Could not determine config directory".to_string()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(CliError::ConfigRead)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CliError::ConfigWrite)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(CliError::ConfigWrite)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: None,
            password: None,
            invalid_email: None,
            invalid_password: None,
        }
    }
}

/// Runtime context that combines config, environment, and CLI overrides
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    base_url_override: Option<String>,
    auth_key_override: Option<String>,
    format_override: Option<OutputFormat>,
}

impl Context {
    pub fn load() -> Result<Self, CliError> {
        Ok(Self::with_config(Config::load()?))
    }

    /// Create context with a specific config (for testing)
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            base_url_override: None,
            auth_key_override: None,
            format_override: None,
        }
    }

    pub fn override_base_url(&mut self, url: String) {
        self.base_url_override = Some(url);
    }

    pub fn override_auth_key(&mut self, key: String) {
        self.auth_key_override = Some(key);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format_override = Some(format);
    }

    /// CLI flag, then `PETFRIENDS_URL`, then the config file.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url_override {
            return url.clone();
        }
        std::env::var("PETFRIENDS_URL").unwrap_or_else(|_| self.config.base_url.clone())
    }

    pub fn auth_key(&self) -> Option<AuthKey> {
        self.auth_key_override.as_deref().map(AuthKey::new)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format_override.unwrap_or_default()
    }

    /// Valid credentials, with `PETFRIENDS_EMAIL`/`PETFRIENDS_PASSWORD`
    /// taking precedence over the config file.
    pub fn credentials(&self) -> Result<Credentials, CliError> {
        let email = std::env::var("PETFRIENDS_EMAIL")
            .ok()
            .or_else(|| self.config.email.clone());
        let password = std::env::var("PETFRIENDS_PASSWORD")
            .ok()
            .or_else(|| self.config.password.clone());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials::new(email, password)),
            _ => Err(CliError::MissingCredentials),
        }
    }

    pub fn invalid_credentials(&self) -> Credentials {
        Credentials::new(
            self.config
                .invalid_email
                .as_deref()
                .unwrap_or(FALLBACK_INVALID_EMAIL),
            self.config
                .invalid_password
                .as_deref()
                .unwrap_or(FALLBACK_INVALID_PASSWORD),
        )
    }
}
