// src/core/config.rs
use std::env;
use std::time::Duration;
use log::LevelFilter;

// Configuration for the password service
#[derive(Debug, Clone)]
pub struct Config {
    // Backend collaborator
    pub backend_url: String,
    pub backend_api_key: String,

    // Session
    // Fallback lifetime when the backend omits expires_in
    pub session_duration: Duration,

    // Password Generation
    pub default_password_length: usize,

    // Web Interface
    pub web_port: u16,
    pub web_address: String,

    // Logging
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Backend collaborator
            backend_url: "http://localhost:54321".to_string(),
            backend_api_key: String::new(),

            // Session
            session_duration: Duration::from_secs(60 * 60), // 1 hour

            // Password Generation
            default_password_length: 16,

            // Web Interface
            web_port: 5000,
            web_address: "127.0.0.1".to_string(),

            // Logging
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Config::default();

        // Backend collaborator
        if let Ok(url) = env::var("BACKEND_URL") {
            config.backend_url = url;
        }

        if let Ok(key) = env::var("BACKEND_API_KEY") {
            config.backend_api_key = key;
        }

        // Session
        if let Ok(val) = env::var("SESSION_DURATION_MINUTES") {
            if let Ok(duration) = val.parse::<u64>() {
                config.session_duration = Duration::from_secs(duration * 60);
            }
        }

        // Password Generation
        if let Ok(val) = env::var("DEFAULT_PASSWORD_LENGTH") {
            if let Ok(length) = val.parse() {
                config.default_password_length = length;
            }
        }

        // Web Interface
        if let Ok(val) = env::var("WEB_PORT") {
            if let Ok(port) = val.parse() {
                config.web_port = port;
            }
        }

        if let Ok(address) = env::var("WEB_ADDRESS") {
            config.web_address = address;
        }

        // Logging
        if let Ok(level) = env::var("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => {}
            }
        }

        config
    }

    // Trailing slashes in BACKEND_URL would double up when joined with
    // endpoint paths
    pub fn backend_base(&self) -> String {
        self.backend_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.default_password_length, 16);
        assert_eq!(config.session_duration, Duration::from_secs(3600));
    }

    #[test]
    fn backend_base_strips_trailing_slash() {
        let config = Config {
            backend_url: "https://project.example.co/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.backend_base(), "https://project.example.co");
    }
}
