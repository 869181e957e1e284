//! Domain error types.

use crate::domain::profile::ProfileFieldError;

/// Top-level error type for muhurta.
///
/// The evaluator itself is total and never produces one of these; errors
/// come from configuration, profile storage, and the profile-generation
/// API collaborators.
#[derive(Debug, thiserror::Error)]
pub enum MuhurtaError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid argument --{flag}: {reason}")]
    InvalidArgument { flag: String, reason: String },

    #[error("profile parse error in {file}: {reason}")]
    ProfileParse { file: String, reason: String },

    #[error(transparent)]
    ProfileInvalid(#[from] ProfileFieldError),

    #[error("api request failed: {reason}")]
    ApiRequest { reason: String },

    #[error("api returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("api response invalid: {reason}")]
    ApiResponse { reason: String },

    #[error("log write error: {reason}")]
    LogWrite { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MuhurtaError> for std::process::ExitCode {
    fn from(err: &MuhurtaError) -> Self {
        let code: u8 = match err {
            MuhurtaError::Io(_) | MuhurtaError::LogWrite { .. } => 1,
            MuhurtaError::ConfigParse { .. }
            | MuhurtaError::ConfigMissing { .. }
            | MuhurtaError::ConfigInvalid { .. }
            | MuhurtaError::InvalidArgument { .. } => 2,
            MuhurtaError::ProfileParse { .. } | MuhurtaError::ProfileInvalid(_) => 3,
            MuhurtaError::ApiRequest { .. }
            | MuhurtaError::ApiStatus { .. }
            | MuhurtaError::ApiResponse { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
