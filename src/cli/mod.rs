//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::{GitConfig, HttpAuthConfig, SshAuthConfig};
use crate::error::{Error, Result};

pub mod completions;
pub mod context;
pub mod job;
pub mod login;
pub mod logout;
pub mod registry;
pub mod repo;
pub mod status;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Forgeop CLI - companion for the Forge CI server
#[derive(Parser, Debug)]
#[command(name = "forgeop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "FORGEOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "FORGEOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override server base URL
    #[arg(long, global = true, env = "FORGEOP_SERVER", hide_env = true)]
    pub server: Option<String>,

    /// Override session token
    #[arg(long, global = true, env = "FORGEOP_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FORGEOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the server and store the session token
    Login {
        /// User identifier (prompted when omitted)
        identifier: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "FORGEOP_PASSWORD", hide_env = true)]
        password: Option<String>,

        /// Re-authenticate even when a session is already stored
        #[arg(long)]
        force: bool,
    },

    /// Drop the stored session token
    Logout,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Manage jobs
    #[command(subcommand)]
    Job(JobCommands),

    /// Manage docker registries
    #[command(subcommand)]
    Registry(RegistryCommands),

    /// Check git repository access
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Job management subcommands
#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// Create a new job
    #[command(after_help = "EXAMPLES:\n  \
        forgeop job create \"my job\" --ssh-url git@host:repo.git --key-file ~/.ssh/id_ed25519\n  \
        forgeop job create \"my job\" --http-url https://host/repo.git --user alice --password s3cret")]
    Create {
        /// Display name of the job
        name: String,

        #[command(flatten)]
        auth: GitAuthArgs,
    },

    /// List all jobs
    List,
}

/// Docker registry subcommands
#[derive(Subcommand, Debug)]
pub enum RegistryCommands {
    /// List all docker registries
    List,

    /// Show a single docker registry
    Get {
        /// Registry ID
        id: String,
    },

    /// Create a new docker registry
    Create {
        /// Registry display name
        #[arg(long)]
        name: String,

        /// Registry URL
        #[arg(long)]
        url: String,

        /// User for registry authentication
        #[arg(long, default_value = "")]
        user: String,

        /// Password for registry authentication
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Update a docker registry
    #[command(after_help = "Only the fields passed as flags are changed; the rest keep the \
        values currently stored on the server. When the registry changed server-side since it \
        was loaded, the update is refused and the server's current version is shown.")]
    Update {
        /// Registry ID
        id: String,

        /// New registry display name
        #[arg(long)]
        name: Option<String>,

        /// New registry URL
        #[arg(long)]
        url: Option<String>,

        /// New user for registry authentication
        #[arg(long)]
        user: Option<String>,

        /// New password for registry authentication
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete a docker registry
    Delete {
        /// Registry ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Check connectivity of a registry configuration
    Test {
        /// Registry URL
        #[arg(long)]
        url: String,

        /// User for registry authentication
        #[arg(long, default_value = "")]
        user: String,

        /// Password for registry authentication
        #[arg(long, default_value = "")]
        password: String,
    },
}

/// Git repository subcommands
#[derive(Subcommand, Debug)]
pub enum RepoCommands {
    /// Validate a git remote + credentials pair
    Test {
        #[command(flatten)]
        auth: GitAuthArgs,
    },
}

/// Git authentication scheme flags, one scheme at a time
#[derive(Debug, Clone, Args)]
pub struct GitAuthArgs {
    /// Git remote URL for the SSH scheme (e.g. git@host:repo.git)
    #[arg(long, conflicts_with_all = ["http_url", "user", "password"])]
    pub ssh_url: Option<String>,

    /// Path to the SSH private key file
    #[arg(long, requires = "ssh_url")]
    pub key_file: Option<PathBuf>,

    /// Passphrase of the SSH private key
    #[arg(long, requires = "ssh_url")]
    pub key_password: Option<String>,

    /// Git remote URL for the HTTP scheme
    #[arg(long, conflicts_with = "ssh_url")]
    pub http_url: Option<String>,

    /// User for the HTTP scheme
    #[arg(long, requires = "http_url")]
    pub user: Option<String>,

    /// Password for the HTTP scheme
    #[arg(long, requires = "http_url")]
    pub password: Option<String>,
}

impl GitAuthArgs {
    /// Build the one-of git configuration from the scheme flags.
    ///
    /// Exactly one of `--ssh-url`/`--http-url` must be given; the SSH
    /// scheme additionally needs the private key file.
    pub fn into_git_config(self) -> Result<GitConfig> {
        match (self.ssh_url, self.http_url) {
            (Some(url), None) => {
                let key_file = self.key_file.ok_or_else(|| {
                    Error::Other("The SSH scheme requires --key-file".to_string())
                })?;
                let key = std::fs::read_to_string(&key_file).map_err(|e| {
                    Error::Other(format!(
                        "Failed to read key file {}: {}",
                        key_file.display(),
                        e
                    ))
                })?;
                Ok(GitConfig::Ssh(SshAuthConfig {
                    url,
                    key,
                    key_password: self.key_password.unwrap_or_default(),
                }))
            }
            (None, Some(url)) => Ok(GitConfig::Http(HttpAuthConfig {
                url,
                user: self.user.unwrap_or_default(),
                password: self.password.unwrap_or_default(),
            })),
            _ => Err(Error::Other(
                "Select exactly one git auth scheme: --ssh-url or --http-url".to_string(),
            )),
        }
    }
}

/// Global CLI options passed to all command handlers.
///
/// Precedence for server and token: CLI flag > environment variable >
/// config file.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.forgeop/config.yaml)
    pub config: Option<String>,

    /// Server base URL override
    pub server: Option<String>,

    /// Session token override
    pub token: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            server: cli.server.clone(),
            token: cli.token.clone(),
        }
    }

    /// Get config path as `Option<&str>`
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

/// The message to interpolate into a scoped failure line: the server's
/// `msg` when the error carries one, the error display otherwise.
pub fn server_message(err: &Error) -> String {
    match err {
        Error::Api(api_err) if !api_err.message().is_empty() => api_err.message().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_git_auth_args_require_one_scheme() {
        let args = GitAuthArgs {
            ssh_url: None,
            key_file: None,
            key_password: None,
            http_url: None,
            user: None,
            password: None,
        };
        assert!(args.into_git_config().is_err());
    }

    #[test]
    fn test_git_auth_args_http_scheme() {
        let args = GitAuthArgs {
            ssh_url: None,
            key_file: None,
            key_password: None,
            http_url: Some("https://host/repo.git".to_string()),
            user: Some("some-user".to_string()),
            password: None,
        };

        match args.into_git_config().unwrap() {
            GitConfig::Http(http) => {
                assert_eq!(http.url, "https://host/repo.git");
                assert_eq!(http.user, "some-user");
                assert_eq!(http.password, "");
            }
            _ => panic!("Expected GitConfig::Http"),
        }
    }

    #[test]
    fn test_git_auth_args_ssh_scheme_reads_key_file() {
        let temp = tempfile::tempdir().unwrap();
        let key_path = temp.path().join("id_test");
        std::fs::write(&key_path, "some-private-key").unwrap();

        let args = GitAuthArgs {
            ssh_url: Some("git@host:repo.git".to_string()),
            key_file: Some(key_path),
            key_password: Some("some-password".to_string()),
            http_url: None,
            user: None,
            password: None,
        };

        match args.into_git_config().unwrap() {
            GitConfig::Ssh(ssh) => {
                assert_eq!(ssh.key, "some-private-key");
                assert_eq!(ssh.key_password, "some-password");
            }
            _ => panic!("Expected GitConfig::Ssh"),
        }
    }

    #[test]
    fn test_git_auth_args_ssh_scheme_requires_key_file() {
        let args = GitAuthArgs {
            ssh_url: Some("git@host:repo.git".to_string()),
            key_file: None,
            key_password: None,
            http_url: None,
            user: None,
            password: None,
        };
        assert!(args.into_git_config().is_err());
    }

    #[test]
    fn test_server_message_prefers_msg_field() {
        let err: Error = ApiError::BadRequest("some error".to_string()).into();
        assert_eq!(server_message(&err), "some error");

        let err: Error = ApiError::Unauthorized.into();
        assert!(server_message(&err).contains("forgeop login"));
    }
}
