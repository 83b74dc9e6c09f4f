mod policy;

pub use policy::{AssistPolicy, PolicyError};

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

const DEFAULT_PROFILE_PATH: &str = "profile.json";
const DEFAULT_CONTROL_TIMEOUT_MS: u64 = 2_000;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub assist: AssistConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let profile_path = env::var("ASSIST_PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROFILE_PATH));
        let policy_path = non_empty_var("ASSIST_POLICY_PATH").map(PathBuf::from);
        let resume_path = non_empty_var("ASSIST_RESUME_PATH").map(PathBuf::from);

        let auto_submit = match non_empty_var("ASSIST_AUTO_SUBMIT") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "ASSIST_AUTO_SUBMIT",
                value: raw,
            })?,
            None => false,
        };

        let control_timeout_ms = parse_millis("ASSIST_CONTROL_TIMEOUT_MS")?
            .unwrap_or(DEFAULT_CONTROL_TIMEOUT_MS);
        let missing_value_timeout =
            parse_millis("ASSIST_MISSING_VALUE_TIMEOUT_MS")?.map(Duration::from_millis);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            assist: AssistConfig {
                profile_path,
                policy_path,
                resume_path,
                auto_submit,
                control_timeout: Duration::from_millis(control_timeout_ms),
                missing_value_timeout,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Inputs the flow controller needs to run a fill: where the profile and
/// policy live, the résumé to upload, and the interaction dials.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub profile_path: PathBuf,
    pub policy_path: Option<PathBuf>,
    pub resume_path: Option<PathBuf>,
    /// Explicit opt-in to submit without asking the human.
    pub auto_submit: bool,
    /// Upper bound on any single page interaction.
    pub control_timeout: Duration,
    /// How long to wait for a human-supplied field value; `None` waits forever.
    pub missing_value_timeout: Option<Duration>,
}

impl AssistConfig {
    pub fn load_policy(&self) -> Result<AssistPolicy, PolicyError> {
        match &self.policy_path {
            Some(path) => AssistPolicy::from_path(path),
            None => Ok(AssistPolicy::default()),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout { key: &'static str, value: String },
    InvalidFlag { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout { key, value } => {
                write!(f, "{key} must be a whole number of milliseconds, found '{value}'")
            }
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be true/false, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_millis(key: &'static str) -> Result<Option<u64>, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidTimeout { key, value: raw }),
        None => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ASSIST_PROFILE_PATH");
        env::remove_var("ASSIST_POLICY_PATH");
        env::remove_var("ASSIST_RESUME_PATH");
        env::remove_var("ASSIST_AUTO_SUBMIT");
        env::remove_var("ASSIST_CONTROL_TIMEOUT_MS");
        env::remove_var("ASSIST_MISSING_VALUE_TIMEOUT_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.assist.profile_path, PathBuf::from("profile.json"));
        assert!(config.assist.policy_path.is_none());
        assert!(config.assist.resume_path.is_none());
        assert!(!config.assist.auto_submit);
        assert_eq!(config.assist.control_timeout, Duration::from_millis(2_000));
        assert!(config.assist.missing_value_timeout.is_none());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn auto_submit_requires_a_recognizable_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ASSIST_AUTO_SUBMIT", "yes");
        assert!(AppConfig::load().expect("flag parses").assist.auto_submit);

        env::set_var("ASSIST_AUTO_SUBMIT", "sometimes");
        match AppConfig::load() {
            Err(ConfigError::InvalidFlag { key, .. }) => assert_eq!(key, "ASSIST_AUTO_SUBMIT"),
            other => panic!("expected invalid flag, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ASSIST_CONTROL_TIMEOUT_MS", "soon");
        match AppConfig::load() {
            Err(ConfigError::InvalidTimeout { key, value }) => {
                assert_eq!(key, "ASSIST_CONTROL_TIMEOUT_MS");
                assert_eq!(value, "soon");
            }
            other => panic!("expected invalid timeout, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn missing_value_timeout_is_opt_in() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ASSIST_MISSING_VALUE_TIMEOUT_MS", "90000");
        let config = AppConfig::load().expect("timeout parses");
        assert_eq!(
            config.assist.missing_value_timeout,
            Some(Duration::from_secs(90))
        );
        reset_env();
    }

    #[test]
    fn missing_policy_path_yields_default_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads");
        let policy = config.assist.load_policy().expect("default policy");
        assert_eq!(policy, AssistPolicy::default());
    }
}
