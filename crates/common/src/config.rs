use serde::{Deserialize, Serialize};

/// Chroma client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Chroma server base URL
    pub base_url: String,

    /// Default number of results for similarity queries
    pub default_n_results: i32,

    /// Default dimensionality for the consistent-hash embedding function
    pub embedding_dim: usize,

    /// Log level
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            default_n_results: 10,
            embedding_dim: 384,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Self {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self {
            base_url: std::env::var("CHROMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            default_n_results: std::env::var("CHROMA_DEFAULT_N_RESULTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            embedding_dim: std::env::var("CHROMA_EMBEDDING_DIM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(384),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.default_n_results, 10);
        assert_eq!(config.embedding_dim, 384);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_url, config.base_url);
        assert_eq!(back.default_n_results, config.default_n_results);
    }
}
