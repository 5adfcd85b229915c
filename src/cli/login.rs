//! Login command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::models::Credentials;
use crate::client::{ForgeApi, ForgeClient};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the login command.
///
/// When a session token is already stored the command returns without
/// calling the server, unless `--force` is given; `forgeop logout` drops
/// the session explicitly.
pub async fn run(
    opts: &GlobalOptions,
    identifier: Option<String>,
    password: Option<String>,
    force: bool,
) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    if config.is_authenticated() && !force {
        println!(
            "Already logged in. Run {} first, or pass {} to re-authenticate.",
            "forgeop logout".cyan(),
            "--force".cyan()
        );
        return Ok(());
    }

    let server = match &opts.server {
        Some(server) => server.clone(),
        None => config
            .server
            .clone()
            .ok_or(ConfigError::MissingServer)?,
    };

    let identifier = match identifier {
        Some(identifier) => identifier,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Identifier")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    println!("{}", "Authenticating...".cyan());
    let client = ForgeClient::new(server.clone(), None)?;
    let token = match client
        .authenticate(&Credentials {
            id: identifier,
            password,
        })
        .await
    {
        Ok(token) => token,
        Err(Error::Api(err)) if err.is_client_error() => {
            return Err(Error::Other(
                "Authentication error. Please check your credentials and try again.".to_string(),
            ));
        }
        Err(_) => {
            return Err(Error::Other(
                "Unknown error, please retry later.".to_string(),
            ));
        }
    };

    config.server = Some(server);
    config.token = Some(token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("{}", "✓ Authentication successful!".green());
    println!("Session saved to: {}", config_path.display());
    println!("\n{}", "Try running:".bold());
    println!("  {} - List jobs", "forgeop job list".cyan());
    println!("  {} - List docker registries", "forgeop registry list".cyan());

    Ok(())
}
