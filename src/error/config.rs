use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// The watch configuration snapshot could not be read at the start of a cycle.
///
/// The poller falls back to the last good snapshot, or an empty one, when this occurs.
#[derive(Error, Debug)]
#[error("Failed to read watch configuration: {0}")]
pub struct ConfigReadError(#[from] pub sea_orm::DbErr);
