//! Configuration for opskit
//!
//! The remote session runner is configured entirely from environment
//! variables; see [`DeployConfig`]. The project serializer has no runtime
//! configuration beyond its fixed ignore rules (`crate::dump::IgnoreRules`).

pub mod deploy;

pub use deploy::DeployConfig;

/// Environment variable holding the SSH host (required)
pub const ENV_HOST: &str = "DEPLOY_HOST";
/// Environment variable holding the SSH user
pub const ENV_USER: &str = "DEPLOY_USER";
/// Environment variable holding the SSH password
pub const ENV_PASSWORD: &str = "DEPLOY_PASSWORD";
/// Environment variable holding the remote path to list
pub const ENV_LIST_PATH: &str = "DEPLOY_LIST_PATH";
/// Environment variable enabling debug logging in the binaries
pub const ENV_DEBUG: &str = "OPSKIT_DEBUG";

/// Default SSH user
pub const DEFAULT_USER: &str = "root";
/// Default remote path to list
pub const DEFAULT_LIST_PATH: &str = "/opt";
