//! Access gateway configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Which access gateway to run
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Log grants only
    #[default]
    Log,
    /// Run an external program per grant
    Command,
}

/// Access gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub kind: GatewayKind,

    /// Program to run for `command` gateways
    #[serde(default = "default_program")]
    pub program: String,

    /// Argument template; `{identity}` is substituted.
    /// Comma-separated when set from the environment.
    #[serde(default = "default_args", deserialize_with = "string_or_list")]
    pub args: Vec<String>,

    /// Handed to the program in `password_env`
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Environment variable the program reads its password from
    #[serde(default = "default_password_env")]
    pub password_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind == GatewayKind::Command && self.program.trim().is_empty() {
            return Err(ValidationError::MissingGatewayProgram);
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.args.iter().any(|arg| arg.contains("{password}")) {
            return Err(ValidationError::PasswordInArguments);
        }
        if self.password.is_some() && self.password_env.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__PASSWORD_ENV"));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::default(),
            program: default_program(),
            args: default_args(),
            password: None,
            password_env: default_password_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_program() -> String {
    "mcrcon".to_string()
}

fn default_args() -> Vec<String> {
    vec!["whitelist add {identity}".to_string()]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_password_env() -> String {
    "MCRCON_PASS".to_string()
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Args {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Args::deserialize(deserializer)? {
        Args::List(list) => list,
        Args::Joined(joined) => joined
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.kind, GatewayKind::Log);
        assert_eq!(config.program, "mcrcon");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_without_program_rejected() {
        let config = GatewayConfig {
            kind: GatewayKind::Command,
            program: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingGatewayProgram));
    }

    #[test]
    fn test_log_gateway_ignores_program() {
        let config = GatewayConfig {
            program: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_bounds() {
        for secs in [0, 301] {
            let config = GatewayConfig {
                timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn test_password_template_rejected() {
        let config = GatewayConfig {
            args: vec!["-p".to_string(), "{password}".to_string()],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::PasswordInArguments));
    }

    #[test]
    fn test_password_requires_env_name() {
        let config = GatewayConfig {
            password: Some(SecretString::new("hunter2".to_string())),
            password_env: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY__PASSWORD_ENV"))
        );
        assert_eq!(GatewayConfig::default().password_env, "MCRCON_PASS");
    }

    #[test]
    fn test_args_accept_comma_separated_string() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"args": "-H, 127.0.0.1, whitelist add {identity}"}"#).unwrap();
        assert_eq!(config.args, vec!["-H", "127.0.0.1", "whitelist add {identity}"]);
    }
}
