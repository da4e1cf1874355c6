//! Analyzer configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AnalyzerError, Result};

/// Storage service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bucket domain, optionally with a port
    pub domain: String,

    /// URL scheme used to reach the bucket domain (http or https)
    pub protocol: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            domain: "localhost".to_string(),
            protocol: "https".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with inspection requests
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("qiniu-video-analyzer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Name of the inspection operation appended as the query string
    pub fop: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            fop: "avinfo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub analyzer: ExtractConfig,
    pub logging: LoggingConfig,
}

impl AnalyzerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.service.domain.trim().is_empty() {
            return Err(AnalyzerError::Config("service.domain must not be empty".to_string()));
        }

        if self.service.protocol != "http" && self.service.protocol != "https" {
            return Err(AnalyzerError::Config(format!(
                "service.protocol must be http or https, got {:?}",
                self.service.protocol
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(AnalyzerError::Config("http.timeout_secs must be greater than zero".to_string()));
        }

        if self.analyzer.fop.is_empty() {
            return Err(AnalyzerError::Config("analyzer.fop must not be empty".to_string()));
        }

        Ok(())
    }
}
