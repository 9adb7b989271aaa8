mod config;
mod error;
mod log_level;

pub use config::{
    ConfigError, ConfigResult, ConfigSource, Configuration, CredentialSource, ProcessEnv,
    ACCESS_KEY_ID_SECRET, DEFAULT_PAGE, DEFAULT_REGION, DEFAULT_SECRETS_PATH, ENV_PREFIX,
    SECRET_ACCESS_KEY_SECRET,
};
pub use error::HandlerError;
pub use log_level::{InvocationLog, LogLevel};
