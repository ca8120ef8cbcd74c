use std::env;

use auth::Algorithm;
use auth::AuthSettings;
use auth::PasswordScheme;
use auth::PasswordSettings;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    /// Bootstrap admin account, created at startup when absent.
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Without one, users are kept in memory.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

#[derive(Clone, Deserialize)]
pub struct PasswordConfig {
    #[serde(default)]
    pub scheme: PasswordScheme,
    pub salt: String,
    pub iterations: u32,
}

#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// Environment variables such as `JWT__SECRET` override `jwt.secret`.
fn environment() -> Environment {
    Environment::default().separator("__")
}

fn lifetime(
    key: &str,
    amount: i64,
    to_duration: fn(i64) -> Option<chrono::Duration>,
) -> Result<chrono::Duration, ConfigError> {
    if amount <= 0 {
        return Err(ConfigError::Message(format!(
            "{} must be positive, got {}",
            key, amount
        )));
    }

    to_duration(amount)
        .ok_or_else(|| ConfigError::Message(format!("{} is out of range: {}", key, amount)))
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_minutes() -> i64 {
    auth::settings::DEFAULT_ACCESS_TTL_MINUTES
}

fn default_refresh_token_days() -> i64 {
    auth::settings::DEFAULT_REFRESH_TTL_DAYS
}

// Secrets stay out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .finish()
    }
}

impl std::fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("scheme", &self.scheme)
            .field("salt", &"<redacted>")
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_with(&run_mode, environment())
    }

    fn load_with(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Authentication settings derived from the `jwt` and `password` sections.
    ///
    /// # Errors
    /// * `Message` - A token lifetime is not positive or out of range
    pub fn auth_settings(&self) -> Result<AuthSettings, ConfigError> {
        let access_ttl = lifetime(
            "jwt.access_token_minutes",
            self.jwt.access_token_minutes,
            chrono::Duration::try_minutes,
        )?;
        let refresh_ttl = lifetime(
            "jwt.refresh_token_days",
            self.jwt.refresh_token_days,
            chrono::Duration::try_days,
        )?;

        Ok(AuthSettings::new(
            TokenSettings::new(self.jwt.secret.as_bytes().to_vec())
                .with_algorithm(self.jwt.algorithm)
                .with_access_ttl(access_ttl)
                .with_refresh_ttl(refresh_ttl),
            PasswordSettings::new(self.password.salt.as_bytes().to_vec(), self.password.iterations)
                .with_scheme(self.password.scheme),
        ))
    }
}
