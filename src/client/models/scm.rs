//! Git repository authentication models
//!
//! A job's source repository is reached through exactly one authentication
//! scheme, either an SSH private key or HTTP credentials. The wire shape is
//! an object with one of the keys `sshAuth`/`httpAuth` set; the server may
//! emit the unused key as an explicit null, so (de)serialization goes
//! through a two-field wire struct rather than an externally tagged enum.

use serde::{Deserialize, Serialize};

/// SSH-key authentication for a git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshAuthConfig {
    /// Remote URL, e.g. `git@host:project/repo.git`
    pub url: String,

    /// Private key content
    #[serde(default)]
    pub key: String,

    /// Optional passphrase for the private key
    #[serde(default)]
    pub key_password: String,
}

/// HTTP credential authentication for a git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpAuthConfig {
    /// Remote URL, e.g. `https://host/project/repo.git`
    pub url: String,

    /// Optional user, empty for anonymous access
    #[serde(default)]
    pub user: String,

    /// Optional password, empty for anonymous access
    #[serde(default)]
    pub password: String,
}

/// Git authentication configuration: exactly one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GitConfigWire", into = "GitConfigWire")]
pub enum GitConfig {
    Ssh(SshAuthConfig),
    Http(HttpAuthConfig),
}

impl GitConfig {
    /// Validity as enforced by the server: a non-empty url for both
    /// schemes, plus a non-empty key for SSH.
    pub fn is_valid(&self) -> bool {
        match self {
            GitConfig::Ssh(conf) => !conf.url.is_empty() && !conf.key.is_empty(),
            GitConfig::Http(conf) => !conf.url.is_empty(),
        }
    }

    /// The remote URL of the configured scheme
    pub fn url(&self) -> &str {
        match self {
            GitConfig::Ssh(conf) => &conf.url,
            GitConfig::Http(conf) => &conf.url,
        }
    }

    /// Short scheme label for display
    pub fn scheme(&self) -> &'static str {
        match self {
            GitConfig::Ssh(_) => "ssh",
            GitConfig::Http(_) => "http",
        }
    }
}

/// Wire shape of [`GitConfig`]: both keys present, one of them null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitConfigWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ssh_auth: Option<SshAuthConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    http_auth: Option<HttpAuthConfig>,
}

impl TryFrom<GitConfigWire> for GitConfig {
    type Error = String;

    fn try_from(wire: GitConfigWire) -> Result<Self, Self::Error> {
        match (wire.ssh_auth, wire.http_auth) {
            (Some(ssh), None) => Ok(GitConfig::Ssh(ssh)),
            (None, Some(http)) => Ok(GitConfig::Http(http)),
            (None, None) => Err("gitConfig carries no authentication scheme".to_string()),
            (Some(_), Some(_)) => {
                Err("gitConfig carries more than one authentication scheme".to_string())
            }
        }
    }
}

impl From<GitConfig> for GitConfigWire {
    fn from(config: GitConfig) -> Self {
        match config {
            GitConfig::Ssh(ssh) => GitConfigWire {
                ssh_auth: Some(ssh),
                http_auth: None,
            },
            GitConfig::Http(http) => GitConfigWire {
                ssh_auth: None,
                http_auth: Some(http),
            },
        }
    }
}
