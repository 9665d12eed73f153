//! Configuration module

use std::env;
use std::path::PathBuf;

/// Default model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "best_model.json";

/// Default feature list artifact, relative to the working directory
pub const DEFAULT_FEATURES_PATH: &str = "features.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: [u8; 4],

    /// Server port
    pub port: u16,

    /// Serialized pipeline model
    pub model_path: PathBuf,

    /// Serialized feature name list
    pub features_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: [0, 0, 0, 0],
            port: 8501,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            features_path: PathBuf::from(DEFAULT_FEATURES_PATH),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| parse_ipv4(&h))
                .unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            features_path: env::var("FEATURES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.features_path),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_ipv4(raw: &str) -> Option<[u8; 4]> {
    raw.trim()
        .parse::<std::net::Ipv4Addr>()
        .ok()
        .map(|ip| ip.octets())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_working_directory() {
        let config = Config::default();
        assert_eq!(config.model_path, PathBuf::from("best_model.json"));
        assert_eq!(config.features_path, PathBuf::from("features.json"));
        assert_eq!(config.port, 8501);
        assert!(!config.is_production());
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse_ipv4("127.0.0.1"), Some([127, 0, 0, 1]));
        assert_eq!(parse_ipv4(" 10.0.0.2 "), Some([10, 0, 0, 2]));
        assert_eq!(parse_ipv4("localhost"), None);
    }
}
