//! Command access gateway - grants access by running an external program.
//!
//! The argument template is expanded per call and passed straight to the
//! program; no shell is involved, so identities are never interpreted.
//! A password goes to the child through its environment, never its argv.
//!
//! # Example
//!
//! ```ignore
//! let gateway = CommandAccessGateway::new("mcrcon")
//!     .with_args(["-H", "127.0.0.1", "whitelist add {identity}"])
//!     .with_password("MCRCON_PASS", SecretString::new("rcon-secret".into()))
//!     .with_timeout(Duration::from_secs(10));
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::domain::foundation::Identity;
use crate::ports::{AccessGateway, GatewayError};

/// Replaced by the identity being granted.
pub const IDENTITY_PLACEHOLDER: &str = "{identity}";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway backed by an external program.
pub struct CommandAccessGateway {
    /// Program to run, looked up on PATH if not absolute.
    program: String,

    /// Argument template.
    args: Vec<String>,

    /// Environment variable name and value handed to the child; never logged.
    password: Option<(String, SecretString)>,

    timeout: Duration,
}

impl CommandAccessGateway {
    /// Create a gateway running `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the argument template.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Pass `password` to the program in the environment variable `var`.
    pub fn with_password(mut self, var: impl Into<String>, password: SecretString) -> Self {
        self.password = Some((var.into(), password));
        self
    }

    /// Set how long a single grant may run before it is killed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn expand_args(&self, identity: &Identity) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(IDENTITY_PLACEHOLDER, identity.as_str()))
            .collect()
    }
}

impl std::fmt::Debug for CommandAccessGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandAccessGateway")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("password", &self.password.as_ref().map(|(var, _)| format!("{}=[REDACTED]", var)))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl AccessGateway for CommandAccessGateway {
    async fn grant(&self, identity: &Identity) -> Result<(), GatewayError> {
        if self.program.trim().is_empty() {
            return Err(GatewayError::NotConfigured("no program set".to_string()));
        }
        let mut command = Command::new(&self.program);
        command.args(self.expand_args(identity));
        if let Some((var, password)) = &self.password {
            command.env(var, password.expose_secret());
        }

        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| GatewayError::CommandFailed(format!("failed to start {}: {}", self.program, e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GatewayError::TimedOut(self.timeout))?
            .map_err(|e| GatewayError::CommandFailed(format!("{} did not complete: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(identity = %identity, program = %self.program, stdout = %stdout.trim(), "Grant command finished");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GatewayError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
