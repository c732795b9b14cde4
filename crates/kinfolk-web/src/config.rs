use serde::{Deserialize, Serialize};

const DEFAULT_DB: &str = "kinfolk.db";
const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// SQLite database written by `kin ingest`
    pub db_path: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("KINFOLK_DB").ok(),
            std::env::var("KINFOLK_PORT").ok(),
        )
    }

    fn from_vars(db_path: Option<String>, port: Option<String>) -> Self {
        let port = port.and_then(|p| match p.parse() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::warn!(value = %p, "Ignoring unparseable KINFOLK_PORT");
                None
            }
        });

        Self {
            db_path: db_path.unwrap_or_else(|| DEFAULT_DB.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(None, None);
        assert_eq!(config.db_path, "kinfolk.db");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_vars(Some("family.db".into()), Some("9000".into()));
        assert_eq!(config.db_path, "family.db");
        assert_eq!(config.port, 9000);

        let config = ServerConfig::from_vars(None, Some("http".into()));
        assert_eq!(config.port, 8080);
    }
}
