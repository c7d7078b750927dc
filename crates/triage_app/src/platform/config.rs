//! Endpoint and transport configuration.
//!
//! Defaults are overridden by `triage.ron` in the working directory, which is
//! in turn overridden by `TRIAGE_ENV` and `TRIAGE_API_URL`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use triage_engine::SubmitSettings;
use triage_logging::{triage_info, triage_warn};

pub const CONFIG_FILENAME: &str = "triage.ron";
pub const LOCAL_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown environment {0:?} (expected \"local\" or \"hosted\")")]
    UnknownEnvironment(String),
    #[error("hosted environment selected but no hosted_url configured")]
    MissingHostedUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum Environment {
    #[default]
    Local,
    Hosted,
}

impl Environment {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "hosted" => Ok(Environment::Hosted),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub hosted_url: Option<String>,
    pub analyze_path: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: u64,
    /// Mirror log output to the terminal as well as `./triage.log`.
    pub log_to_terminal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let transport = SubmitSettings::default();
        Self {
            environment: Environment::Local,
            hosted_url: None,
            analyze_path: "/analisar".to_string(),
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.as_secs(),
            max_upload_bytes: transport.max_upload_bytes,
            log_to_terminal: false,
        }
    }
}

impl AppConfig {
    /// Loads `triage.ron` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        triage_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup("TRIAGE_ENV") {
            self.environment = Environment::parse(&raw)?;
        }
        if let Some(url) = lookup("TRIAGE_API_URL").filter(|url| !url.trim().is_empty()) {
            self.hosted_url = Some(url);
        }
        Ok(self)
    }

    pub fn endpoint(&self) -> Result<String, ConfigError> {
        let base = match self.environment {
            Environment::Local => LOCAL_BASE_URL,
            Environment::Hosted => self
                .hosted_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::MissingHostedUrl)?,
        };
        Ok(join_url(base, &self.analyze_path))
    }

    pub fn submit_settings(&self) -> Result<SubmitSettings, ConfigError> {
        let endpoint = self.endpoint()?;
        if self.request_timeout_secs == 0 {
            triage_warn!("request_timeout_secs is 0; requests will time out immediately");
        }
        Ok(SubmitSettings {
            endpoint,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_upload_bytes: self.max_upload_bytes,
            ..SubmitSettings::default()
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
