//! Deployment target configuration read from the environment

use std::fmt;

use zeroize::Zeroizing;

use super::{DEFAULT_LIST_PATH, DEFAULT_USER, ENV_HOST, ENV_LIST_PATH, ENV_PASSWORD, ENV_USER};
use crate::error::{Error, Result};

/// Connection settings for the remote session runner
#[derive(Clone)]
pub struct DeployConfig {
    /// Remote host, trimmed and never empty
    pub host: String,
    /// Login user
    pub user: String,
    /// Password sent at the prompt; empty means none configured
    pub password: Zeroizing<String>,
    /// Remote directory passed to `ls -la`
    pub list_path: String,
}

impl DeployConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function
    ///
    /// `DEPLOY_HOST` is required and may not be blank. `DEPLOY_USER` and
    /// `DEPLOY_LIST_PATH` are trimmed and fall back to their defaults when
    /// blank. `DEPLOY_PASSWORD` is taken verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingEnvVar {
                key: ENV_HOST.to_string(),
            })?;

        let user = trimmed_or(lookup(ENV_USER), DEFAULT_USER);
        let list_path = trimmed_or(lookup(ENV_LIST_PATH), DEFAULT_LIST_PATH);
        let password = Zeroizing::new(lookup(ENV_PASSWORD).unwrap_or_default());

        Ok(Self {
            host,
            user,
            password,
            list_path,
        })
    }

    /// `user@host` as passed to ssh
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Whether a password was configured
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.has_password() { "<redacted>" } else { "<unset>" };
        f.debug_struct("DeployConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &password)
            .field("list_path", &self.list_path)
            .finish()
    }
}

fn trimmed_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
