use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound on `n` accepted by the recommendations endpoint
    pub max_recommendations: usize,
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("books.csv"),
            port: 8000,
            cors_allowed_origins: Vec::new(),
            max_recommendations: 10,
            suggestion_limit: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            catalog_path: env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            max_recommendations: env::var("MAX_RECOMMENDATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v >= 1)
                .unwrap_or(defaults.max_recommendations),
            suggestion_limit: env::var("SUGGESTION_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.suggestion_limit),
        }
    }
}
