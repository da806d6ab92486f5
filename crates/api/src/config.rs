use pcbuild_core::builder::{validate_suggestion_limit, DEFAULT_SUGGESTION_LIMIT};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Suggestions per category when a request does not name one (default: `6`).
    pub default_suggestion_limit: usize,
    /// Upper bound on pooled database connections (default: `20`).
    pub database_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `DEFAULT_SUGGESTION_LIMIT` | `6`                     |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                    |
    ///
    /// `DATABASE_URL` is read separately at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_suggestion_limit: usize = std::env::var("DEFAULT_SUGGESTION_LIMIT")
            .map(|v| v.parse().expect("DEFAULT_SUGGESTION_LIMIT must be a valid usize"))
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT);
        if let Err(err) = validate_suggestion_limit(default_suggestion_limit) {
            panic!("Invalid DEFAULT_SUGGESTION_LIMIT: {err}");
        }

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_suggestion_limit,
            database_max_connections,
        }
    }
}
