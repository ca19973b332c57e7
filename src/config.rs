use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {0} is invalid: {1}")]
    Invalid(&'static str, String),
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db: DbConfig,
    pub identity: IdentityConfig,
    pub mail: MailConfig,
    /// Base URL of the web client; invitation links point at `<client_url>/register`.
    pub client_url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    /// PEM encoded RSA public key of the identity provider.
    pub public_key_pem: String,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub endpoint: String,
    pub sender: String,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let parsed = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid(key, raw)),
                None => Ok(default),
            }
        };

        let port = parsed("PORT", 8080)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid("PORT", port.to_string()))?;
        let max_connections = parsed("DB_MAX_CONNECTIONS", 10)?;
        let max_connections = u32::try_from(max_connections)
            .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS", max_connections.to_string()))?;

        // PEMs usually arrive through single-line env files with escaped newlines
        let public_key_pem = required("IDENTITY_PUBLIC_KEY")?.replace("\\n", "\n");

        Ok(EnvConfig {
            port,
            db: DbConfig {
                url: required("DATABASE_URL")?,
                max_connections,
                acquire_timeout: Duration::from_secs(parsed("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            },
            identity: IdentityConfig { public_key_pem },
            mail: MailConfig {
                api_key: required("MAIL_API_KEY")?,
                endpoint: lookup("MAIL_ENDPOINT").unwrap_or_else(|| DEFAULT_MAIL_ENDPOINT.to_string()),
                sender: required("MAIL_SENDER")?,
            },
            client_url: required("CLIENT_URL")?.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS", 15)?),
        })
    }
}
