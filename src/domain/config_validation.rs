//! Configuration validation.
//!
//! Validates config fields before a command runs, so failures surface as
//! one clear error instead of surprising defaults mid-run.

use crate::domain::error::MuhurtaError;
use crate::ports::config_port::ConfigPort;

pub fn validate_advisor_config(config: &dyn ConfigPort) -> Result<(), MuhurtaError> {
    validate_interval(config)?;
    validate_neutral_advice(config)?;
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), MuhurtaError> {
    let value = config.get_int("advisor", "interval_secs", 60);
    if value < 1 {
        return Err(MuhurtaError::ConfigInvalid {
            section: "advisor".to_string(),
            key: "interval_secs".to_string(),
            reason: "interval_secs must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_neutral_advice(config: &dyn ConfigPort) -> Result<(), MuhurtaError> {
    if let Some(advice) = config.get_string("advisor", "neutral_advice") {
        if advice.trim().is_empty() {
            return Err(MuhurtaError::ConfigInvalid {
                section: "advisor".to_string(),
                key: "neutral_advice".to_string(),
                reason: "neutral_advice must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_api_config(config: &dyn ConfigPort) -> Result<(), MuhurtaError> {
    let timeout = config.get_int("api", "timeout_secs", 60);
    if timeout < 1 {
        return Err(MuhurtaError::ConfigInvalid {
            section: "api".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// All four birth fields are required for a profile fetch; the API prompt
/// interpolates them verbatim.
pub fn validate_birth_config(config: &dyn ConfigPort) -> Result<(), MuhurtaError> {
    for key in ["name", "dob", "time", "location"] {
        match config.get_string("birth", key) {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(MuhurtaError::ConfigMissing {
                    section: "birth".to_string(),
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}
