use std::{path::PathBuf, time::Duration};

use tracing::info;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Problems with the environment that stop the client from starting.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BACKEND_URL is not set. Add it to your environment or .env file and try again.")]
    MissingBackendUrl,
    #[error("BACKEND_URL must start with http:// or https://, got {0}")]
    InvalidBackendUrl(String),
    #[error("HABBOFUTBOL_TIMEOUT_SECS must be a whole number of seconds, got {0}")]
    InvalidTimeout(String),
}

/// Everything the client reads from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST backend.
    pub backend_url: String,
    /// Base path the front-end is served under. Prefixes the home route.
    pub basename: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Load the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load the .env file only in the development environment (bypassed with the --release flag)
        #[cfg(debug_assertions)]
        dotenv::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;
        info!("Loaded config for backend {}", config.backend_url);
        Ok(config)
    }

    /// Build the config from any key-value lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = var("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBackendUrl)?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }

        let basename = var("BASENAME")
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let session_file = var("HABBOFUTBOL_SESSION_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        let request_timeout = match var("HABBOFUTBOL_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            backend_url,
            basename,
            session_file,
            request_timeout,
        })
    }

    /// The route a logged out user is sent to.
    pub fn home_route(&self) -> String {
        format!("{}/", self.basename)
    }
}

/// The per-user directory the client keeps its files in, if the platform has one.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("habbofutbol"))
}

fn default_session_file() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".habbofutbol-session.json"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_backend_url_is_reported() {
        assert_eq!(
            Config::from_vars(vars(&[])),
            Err(ConfigError::MissingBackendUrl)
        );
        assert_eq!(
            Config::from_vars(vars(&[("BACKEND_URL", "   ")])),
            Err(ConfigError::MissingBackendUrl)
        );
    }

    #[test]
    fn defaults_are_applied() {
        let config = Config::from_vars(vars(&[("BACKEND_URL", "https://api.test/api/")])).unwrap();

        assert_eq!(config.backend_url, "https://api.test/api");
        assert_eq!(config.basename, "");
        assert_eq!(config.home_route(), "/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.session_file.ends_with("session.json"));
    }

    #[test]
    fn basename_prefixes_home_route() {
        let config = Config::from_vars(vars(&[
            ("BACKEND_URL", "http://localhost:3001"),
            ("BASENAME", "/habbofutbol/"),
            ("HABBOFUTBOL_SESSION_FILE", "/tmp/s.json"),
            ("HABBOFUTBOL_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.home_route(), "/habbofutbol/");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            Config::from_vars(vars(&[("BACKEND_URL", "localhost:3001")])),
            Err(ConfigError::InvalidBackendUrl("localhost:3001".to_string()))
        );
        assert_eq!(
            Config::from_vars(vars(&[
                ("BACKEND_URL", "http://localhost:3001"),
                ("HABBOFUTBOL_TIMEOUT_SECS", "pronto"),
            ])),
            Err(ConfigError::InvalidTimeout("pronto".to_string()))
        );
    }
}
