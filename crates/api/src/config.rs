use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the web client, used to build password reset links.
    pub frontend_url: String,
    /// Directory profile photos are written to and served from under `/uploads`.
    pub upload_dir: PathBuf,
    /// Interval of the casting call expiry sweep in seconds (default: `60`).
    pub expiry_sweep_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Media host credentials for signed direct uploads. `None` disables signing.
    pub media: Option<MediaConfig>,
}

/// Credentials for signing direct browser uploads to the media host.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `FRONTEND_URL`         | `http://localhost:8080`    |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `EXPIRY_SWEEP_SECS`    | `60`                       |
    ///
    /// JWT settings come from [`JwtConfig::from_env`], media credentials from
    /// [`MediaConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let expiry_sweep_secs = parse_sweep_secs(
            &std::env::var("EXPIRY_SWEEP_SECS").unwrap_or_else(|_| "60".into()),
        )
        .expect("EXPIRY_SWEEP_SECS must be a positive integer");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            frontend_url,
            upload_dir,
            expiry_sweep_secs,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
        }
    }
}

/// Sweep interval in whole seconds; zero is rejected.
fn parse_sweep_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

impl MediaConfig {
    /// Read `MEDIA_CLOUD_NAME`, `MEDIA_API_KEY` and `MEDIA_API_SECRET`.
    ///
    /// Returns `None` unless all three are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Some(Self {
            cloud_name: read("MEDIA_CLOUD_NAME")?,
            api_key: read("MEDIA_API_KEY")?,
            api_secret: read("MEDIA_API_SECRET")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_interval_must_be_positive() {
        assert_eq!(parse_sweep_secs("60"), Some(60));
        assert_eq!(parse_sweep_secs(" 5 "), Some(5));
        assert_eq!(parse_sweep_secs("0"), None);
        assert_eq!(parse_sweep_secs("-1"), None);
        assert_eq!(parse_sweep_secs("soon"), None);
    }
}
