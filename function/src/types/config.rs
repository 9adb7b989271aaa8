//! Function configuration resolved from `S3_HTTP_*` environment variables

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::LogLevel;

/// Prefix shared by every function setting
pub const ENV_PREFIX: &str = "S3_HTTP_";

/// Object served when the request carries no query string
pub const DEFAULT_PAGE: &str = "index.html";

/// Signing region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Directory OpenFaaS mounts function secrets into
pub const DEFAULT_SECRETS_PATH: &str = "/var/openfaas/secrets";

/// Secret file holding the access key id
pub const ACCESS_KEY_ID_SECRET: &str = "website-access-key-id";

/// Secret file holding the secret access key
pub const SECRET_ACCESS_KEY_SECRET: &str = "website-secret-access-key";

/// Result type for configuration resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving the configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("required key {0} missing value")]
    Missing(String),

    /// A boolean variable could not be parsed
    #[error("invalid boolean value {value:?} for {key}")]
    InvalidBool {
        /// Full variable name
        key: String,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Source of raw configuration values
pub trait ConfigSource: Send + Sync {
    /// Returns the value of `key`, or `None` when it is not set
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads configuration from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Where the static storage credentials come from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Two mounted secret files, one value each
    FromFiles {
        /// File containing the access key id
        access_key_id_path: PathBuf,
        /// File containing the secret access key
        secret_access_key_path: PathBuf,
    },
    /// Values supplied directly through configuration
    FromEnv {
        /// Access key id
        access_key_id: String,
        /// Secret access key
        secret_access_key: String,
    },
}

impl CredentialSource {
    /// File-based credentials using the fixed secret names inside `secrets_path`
    #[must_use]
    pub fn secret_files(secrets_path: &Path) -> Self {
        Self::FromFiles {
            access_key_id_path: secrets_path.join(ACCESS_KEY_ID_SECRET),
            secret_access_key_path: secrets_path.join(SECRET_ACCESS_KEY_SECRET),
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromFiles {
                access_key_id_path,
                secret_access_key_path,
            } => f
                .debug_struct("FromFiles")
                .field("access_key_id_path", access_key_id_path)
                .field("secret_access_key_path", secret_access_key_path)
                .finish(),
            Self::FromEnv { .. } => f
                .debug_struct("FromEnv")
                .field("access_key_id", &"<redacted>")
                .field("secret_access_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Configuration for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// `S3_HTTP_DEBUG`, accepted for compatibility and otherwise unused
    pub debug: bool,
    /// `S3_HTTP_LOG_LEVEL`
    pub log_level: LogLevel,
    /// `S3_HTTP_ENDPOINT`, as `host[:port]`
    pub endpoint: String,
    /// `S3_HTTP_BUCKET_NAME`
    pub bucket_name: String,
    /// `S3_HTTP_USE_SSL`
    pub use_ssl: bool,
    /// `S3_HTTP_DEFAULT_PAGE`; empty when explicitly set to an empty string
    pub default_page: String,
    /// `S3_HTTP_REGION`
    pub region: String,
    /// Credential source selected from the available settings
    pub credential_source: CredentialSource,
}

impl Configuration {
    /// Resolves the configuration from an arbitrary source
    ///
    /// Credentials are read from `S3_HTTP_ACCESS_KEY_ID` and
    /// `S3_HTTP_SECRET_ACCESS_KEY` when either is present, and from the mounted
    /// secret files otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a required variable is not set
    /// Returns `ConfigError::InvalidBool` if a boolean variable cannot be parsed
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        let vars = Vars { source };

        let debug = vars.boolean("DEBUG", false)?;
        let log_level = vars
            .get("LOG_LEVEL")
            .map_or_else(LogLevel::default, |level| LogLevel::parse_or_default(&level));
        let endpoint = vars.required("ENDPOINT")?;
        let bucket_name = vars.required("BUCKET_NAME")?;
        let use_ssl = vars.boolean("USE_SSL", true)?;
        let default_page = vars
            .get("DEFAULT_PAGE")
            .unwrap_or_else(|| DEFAULT_PAGE.to_string());
        let region = vars
            .get("REGION")
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let credential_source =
            if vars.get("ACCESS_KEY_ID").is_some() || vars.get("SECRET_ACCESS_KEY").is_some() {
                CredentialSource::FromEnv {
                    access_key_id: vars.required("ACCESS_KEY_ID")?,
                    secret_access_key: vars.required("SECRET_ACCESS_KEY")?,
                }
            } else {
                let secrets_path = vars
                    .get("SECRETS_PATH")
                    .filter(|path| !path.is_empty())
                    .map_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH), PathBuf::from);
                CredentialSource::secret_files(&secrets_path)
            };

        Ok(Self {
            debug,
            log_level,
            endpoint,
            bucket_name,
            use_ssl,
            default_page,
            region,
            credential_source,
        })
    }
}

/// Prefixed lookups against a configuration source
struct Vars<'a, S: ?Sized> {
    source: &'a S,
}

impl<S: ConfigSource + ?Sized> Vars<'_, S> {
    fn key(name: &str) -> String {
        format!("{ENV_PREFIX}{name}")
    }

    fn get(&self, name: &str) -> Option<String> {
        self.source.var(&Self::key(name))
    }

    fn required(&self, name: &str) -> ConfigResult<String> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::Missing(Self::key(name)))
    }

    fn boolean(&self, name: &str, default: bool) -> ConfigResult<bool> {
        self.get(name).map_or(Ok(default), |value| {
            parse_bool(&value).ok_or(ConfigError::InvalidBool {
                key: Self::key(name),
                value,
            })
        })
    }
}

/// Parses the boolean spellings accepted by the function's deployment tooling
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
