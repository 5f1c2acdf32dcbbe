use axum::http::HeaderValue;
use vidgen_events::Channels;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Which origins the CORS layer admits.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials.
    Any,
    /// An explicit allow-list; credentials are allowed.
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// database and Redis credentials, which are assembled from their parts
/// when no URL is given. User names and passwords are percent-encoded
/// into the assembled URL.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`, must be non-zero).
    pub request_timeout_secs: u64,
    pub database_url: String,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    pub redis_url: String,
    /// Event bus channel names.
    pub channels: Channels,
    /// Interval between WebSocket pings in seconds (default: `30`).
    pub ws_heartbeat_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `8080`                          |
    /// | `CORS_ORIGINS`         | `*`                             |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `DATABASE_URL`         | built from `DB_*`               |
    /// | `DB_MAX_CONNECTIONS`   | `20`                            |
    /// | `REDIS_URL`            | built from `REDIS_*`            |
    /// | `NEW_JOB_CHANNEL`      | `video_jobs`                    |
    /// | `STATUS_CHANNEL`       | `job_updates`                   |
    /// | `WS_HEARTBEAT_SECS`    | `30`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = var("HOST", "0.0.0.0");
        let port = parse("PORT", &var("PORT", "8080"), "u16")?;
        let cors_origins = parse_cors_origins(&var("CORS_ORIGINS", "*"))?;
        let request_timeout_secs = parse_positive(
            "REQUEST_TIMEOUT_SECS",
            &var("REQUEST_TIMEOUT_SECS", "30"),
        )?;

        let database_url = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                urlencoding::encode(&var("DB_USER", "postgres")),
                urlencoding::encode(&var("DB_PASSWORD", "")),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "vidgen"),
            ),
        };
        let db_max_connections = parse(
            "DB_MAX_CONNECTIONS",
            &var("DB_MAX_CONNECTIONS", "20"),
            "u32",
        )?;

        let redis_url = match lookup("REDIS_URL").filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => {
                let auth = lookup("REDIS_PASSWORD")
                    .filter(|p| !p.is_empty())
                    .map(|p| format!(":{}@", urlencoding::encode(&p)))
                    .unwrap_or_default();
                format!(
                    "redis://{auth}{}:{}/",
                    var("REDIS_HOST", "localhost"),
                    var("REDIS_PORT", "6379"),
                )
            }
        };

        let channels = Channels {
            new_job: var("NEW_JOB_CHANNEL", vidgen_events::bus::DEFAULT_NEW_JOB_CHANNEL),
            status: var("STATUS_CHANNEL", vidgen_events::bus::DEFAULT_STATUS_CHANNEL),
        };

        let ws_heartbeat_secs =
            parse("WS_HEARTBEAT_SECS", &var("WS_HEARTBEAT_SECS", "30"), "u64")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            redis_url,
            channels,
            ws_heartbeat_secs,
        })
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    })
}

/// Like [`parse`], but zero is rejected too.
fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match parse::<u64>(name, value, "positive integer") {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            expected: "positive integer",
            value: value.to_string(),
        }),
        other => other,
    }
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                expected: "origin header value",
                value: o.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}
