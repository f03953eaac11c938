use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    Random,
    Cancer,
    NonCancer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub classifier: ClassifierKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
            allowed_origins: Vec::new(),
            classifier: ClassifierKind::Random,
        }
    }
}

impl ServerConfig {
    /// `.env`, then the YAML file named by `PREDICT_CONFIG`, then `HOST`/`PORT`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match env::var("PREDICT_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(env::var("HOST").ok(), env::var("PORT").ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a struct.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_server() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "localhost:3000");
        assert_eq!(config.classifier, ClassifierKind::Random);
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = ServerConfig::from_yaml("port: 8080\nclassifier: non-cancer\n").unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.classifier, ClassifierKind::NonCancer);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ServerConfig::from_yaml("  \n").unwrap(), ServerConfig::default());
    }

    #[test]
    fn unknown_classifier_is_rejected() {
        assert!(matches!(
            ServerConfig::from_yaml("classifier: resnet\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn env_overrides_win() {
        let mut config = ServerConfig::from_yaml("host: 127.0.0.1\nport: 8080\n").unwrap();
        config
            .apply_overrides(Some("0.0.0.0".into()), Some("9000".into()))
            .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn blank_host_override_is_ignored() {
        let mut config = ServerConfig::default();
        config.apply_overrides(Some(" ".into()), None).unwrap();
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(None, Some("http".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServerConfig::from_file("/nonexistent/predict.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/predict.yaml"));
    }
}
