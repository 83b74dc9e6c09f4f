use crate::config::{ConfigError, PolicyError};
use crate::telemetry::TelemetryError;
use crate::workflows::escalation::EscalationError;
use crate::workflows::form::FixtureError;
use crate::workflows::profile::ProfileError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Policy(PolicyError),
    Profile(ProfileError),
    Form(FixtureError),
    Telemetry(TelemetryError),
    Escalation(EscalationError),
    Io(std::io::Error),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Policy(err) => write!(f, "policy error: {}", err),
            AppError::Profile(err) => write!(f, "profile error: {}", err),
            AppError::Form(err) => write!(f, "form fixture error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Escalation(err) => write!(f, "escalation error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Policy(err) => Some(err),
            AppError::Profile(err) => Some(err),
            AppError::Form(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Escalation(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<PolicyError> for AppError {
    fn from(value: PolicyError) -> Self {
        Self::Policy(value)
    }
}

impl From<ProfileError> for AppError {
    fn from(value: ProfileError) -> Self {
        Self::Profile(value)
    }
}

impl From<FixtureError> for AppError {
    fn from(value: FixtureError) -> Self {
        Self::Form(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<EscalationError> for AppError {
    fn from(value: EscalationError) -> Self {
        Self::Escalation(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
