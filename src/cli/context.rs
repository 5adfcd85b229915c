//! Command execution context
//!
//! Gate and shared state for commands that talk to the server: loading the
//! config, resolving server URL and session token, and building the API
//! client. A missing token fails here, before any network call, with a
//! pointer to `forgeop login`.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::ForgeClient;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Context for authenticated command execution
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// API client carrying the session token
    pub client: ForgeClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Server and token may come from the config file or from the CLI/env
    /// overrides; when both overrides are present the config file is not
    /// required to exist.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound))
                if opts.server.is_some() && opts.token.is_some() =>
            {
                Config::default()
            }
            Err(err) => return Err(err),
        };

        let server = match &opts.server {
            Some(server) => server.clone(),
            None => config.require_server()?.to_string(),
        };
        let token = match &opts.token {
            Some(token) => token.clone(),
            None => config.require_token()?.to_string(),
        };

        let client = ForgeClient::new(server, Some(token))?;

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(config: Option<String>, server: Option<String>, token: Option<String>) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Table,
            config,
            server,
            token,
        }
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, String) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().to_string();
        (temp, path)
    }

    #[test]
    fn test_context_from_config_file() {
        let (_temp, path) = write_config("server: http://forge.local\ntoken: stored-token\n");

        let ctx = CommandContext::new(&opts(Some(path), None, None)).unwrap();
        assert_eq!(ctx.config.token.as_deref(), Some("stored-token"));
    }

    #[test]
    fn test_context_fails_without_token() {
        let (_temp, path) = write_config("server: http://forge.local\n");

        match CommandContext::new(&opts(Some(path), None, None)) {
            Err(Error::Config(ConfigError::MissingToken)) => (),
            other => panic!("Expected ConfigError::MissingToken, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_context_fails_without_server() {
        let (_temp, path) = write_config("token: stored-token\n");

        match CommandContext::new(&opts(Some(path), None, None)) {
            Err(Error::Config(ConfigError::MissingServer)) => (),
            other => panic!("Expected ConfigError::MissingServer, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_overrides_work_without_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp
            .path()
            .join("does-not-exist.yaml")
            .to_string_lossy()
            .to_string();

        let ctx = CommandContext::new(&opts(
            Some(missing),
            Some("http://forge.local".to_string()),
            Some("override-token".to_string()),
        ));
        assert!(ctx.is_ok());
    }
}
