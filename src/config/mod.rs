use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub cookie_secure: bool,
    pub jwt_expiry_hours: u64,
    #[serde(skip)]
    pub jwt_secret: JwtSecret,
    pub superadmin: Option<SuperAdminSeed>,
}

/// Credentials for the SuperAdmin account created at startup when absent.
#[derive(Clone, Serialize, Deserialize)]
pub struct SuperAdminSeed {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for SuperAdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperAdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HMAC signing secret. Never printed.
#[derive(Clone, Default)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("JwtSecret(<unset>)")
        } else {
            f.write_str("JwtSecret(<redacted>)")
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env::var("CARAVANE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        parse_env("API_ENABLE_REQUEST_LOGGING", &mut self.api.enable_request_logging);
        parse_env("API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);

        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = v;
            }
        }
        parse_env("DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        parse_env("DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);

        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        parse_env("SECURITY_COOKIE_SECURE", &mut self.security.cookie_secure);
        parse_env("SECURITY_JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours);
        if let Ok(v) = env::var("JWT_SECRET_KEY") {
            self.security.jwt_secret = JwtSecret::new(v);
        }
        if let (Ok(email), Ok(password)) = (env::var("SUPERADMIN_EMAIL"), env::var("SUPERADMIN_PASSWORD")) {
            if !email.trim().is_empty() && !password.is_empty() {
                self.security.superadmin = Some(SuperAdminSeed {
                    email: email.trim().to_lowercase(),
                    password,
                });
            }
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite:app.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 8000,
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string()],
                cookie_secure: false,
                jwt_expiry_hours: 24,
                jwt_secret: JwtSecret::default(),
                superadmin: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite:app.db".to_string(),
                max_connections: 10,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 8000,
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                cors_origins: vec![],
                cookie_secure: true,
                jwt_expiry_hours: 24,
                jwt_secret: JwtSecret::default(),
                superadmin: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite:app.db".to_string(),
                max_connections: 10,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 8000,
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                cors_origins: vec![],
                cookie_secure: true,
                jwt_expiry_hours: 24,
                jwt_secret: JwtSecret::default(),
                superadmin: None,
            },
        }
    }

    /// Configuration used by tests: in-memory database, fixed secret.
    pub fn for_tests(secret: &str) -> Self {
        let mut config = Self::development();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config.security.jwt_secret = JwtSecret::new(secret);
        config
    }
}

/// Overwrite `slot` when `key` is set and parses; unparsable values keep the preset.
fn parse_env<T: std::str::FromStr>(key: &str, slot: &mut T) {
    if let Some(value) = env::var(key).ok().and_then(|v| v.trim().parse().ok()) {
        *slot = value;
    }
}
