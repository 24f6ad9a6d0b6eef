use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Sustained request rate allowed per client IP (default: `10`/s).
    pub rate_limit_per_second: u64,
    /// Burst size allowed per client IP (default: `50`).
    pub rate_limit_burst: u32,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Admin account seeded at startup when credentials are configured.
    pub admin_bootstrap: Option<AdminBootstrap>,
}

/// Startup admin account, from `ADMIN_EMAIL` / `ADMIN_PASSWORD` / `ADMIN_NAME`.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `RATE_LIMIT_PER_SECOND` | `10`                       |
    /// | `RATE_LIMIT_BURST`      | `50`                       |
    /// | `ADMIN_EMAIL`           | -- (bootstrap skipped)     |
    /// | `ADMIN_PASSWORD`        | -- (bootstrap skipped)     |
    /// | `ADMIN_NAME`            | `Administrateur`           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rate_limit_per_second: u64 = std::env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("RATE_LIMIT_PER_SECOND must be a valid u64");

        let rate_limit_burst: u32 = std::env::var("RATE_LIMIT_BURST")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("RATE_LIMIT_BURST must be a valid u32");

        let jwt = JwtConfig::from_env();

        let admin_bootstrap = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD"))
        {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    email,
                    password,
                    name: std::env::var("ADMIN_NAME")
                        .unwrap_or_else(|_| "Administrateur".into()),
                })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            rate_limit_per_second,
            rate_limit_burst,
            jwt,
            admin_bootstrap,
        }
    }
}
