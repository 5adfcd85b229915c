//! Docker registry command implementations
//!
//! `update` follows the optimistic-concurrency protocol: the registry is
//! loaded first, the flags are overlaid, and only the fields that actually
//! differ are submitted together with the stamp of the loaded version. A
//! 409 means someone else saved in between; the server's current version
//! is rendered and nothing is retried.

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, server_message};
use crate::client::ForgeApi;
use crate::client::models::{DockerRegistry, RegistryUpdate};
use crate::error::{ApiError, Error, Result};
use crate::output::{json, table};

/// Registry for table display
#[derive(Tabled)]
struct RegistryDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "USER")]
    user: String,
}

impl From<&DockerRegistry> for RegistryDisplay {
    fn from(registry: &DockerRegistry) -> Self {
        Self {
            id: registry.id.clone().unwrap_or_else(|| "-".to_string()),
            name: registry.name.clone(),
            url: registry.url.clone(),
            user: registry.user.clone(),
        }
    }
}

fn print_registries(format: OutputFormat, registries: &[DockerRegistry]) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let display: Vec<RegistryDisplay> =
                registries.iter().map(RegistryDisplay::from).collect();
            println!("{}", table::format_table(&display));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(registries)?);
        }
    }
    Ok(())
}

/// Run the registry list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let registries = ctx.client.list_registries().await?;
    print_registries(ctx.format, &registries)
}

/// Run the registry get command
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let registry = ctx.client.get_registry(id).await?;
    print_registries(ctx.format, std::slice::from_ref(&registry))
}

/// Run the registry create command
pub async fn create(
    opts: &GlobalOptions,
    name: String,
    url: String,
    user: String,
    password: String,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let registry = DockerRegistry {
        id: None,
        name,
        url,
        user,
        password,
        last_modification_time: None,
    };
    if !registry.is_valid_for_creation() {
        return Err(Error::Other(
            "A registry needs a non-empty name and url".to_string(),
        ));
    }

    match ctx.client.create_registry(&registry).await {
        Ok(created) => {
            println!(
                "{} Registry created: {} ({})",
                "✓".green(),
                created.name.bold(),
                created.id.as_deref().unwrap_or("-")
            );
            Ok(())
        }
        Err(err) => Err(Error::Other(format!(
            "An error has happened during creation : {}",
            server_message(&err)
        ))),
    }
}

/// Run the registry update command
pub async fn update(
    opts: &GlobalOptions,
    id: &str,
    name: Option<String>,
    url: Option<String>,
    user: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let loaded = ctx.client.get_registry(id).await?;

    let mut form = loaded.clone();
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(url) = url {
        form.url = url;
    }
    if let Some(user) = user {
        form.user = user;
    }
    if let Some(password) = password {
        form.password = password;
    }

    let update = RegistryUpdate::from_form(&form, &loaded);
    if update.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    match ctx.client.update_registry(id, &update).await {
        Ok(saved) => {
            println!("{} Registry saved: {}", "✓".green(), saved.name.bold());
            Ok(())
        }
        Err(Error::Api(ApiError::Conflict(body))) => {
            // someone saved in between; show the server's current version
            match serde_json::from_str::<DockerRegistry>(&body) {
                Ok(current) => print_registries(ctx.format, std::slice::from_ref(&current))?,
                Err(err) => log::warn!("Conflict response could not be parsed: {}", err),
            }
            Err(Error::Other(
                "An error has happened during the saving : there is a conflict ! the registry has been reloaded"
                    .to_string(),
            ))
        }
        Err(err) => Err(Error::Other(format!(
            "An error has happened during the saving : {}",
            server_message(&err)
        ))),
    }
}

/// Run the registry delete command
pub async fn delete(opts: &GlobalOptions, id: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete registry {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_registry(id).await?;
    println!("{} Registry deleted", "✓".green());
    Ok(())
}

/// Run the registry test command
pub async fn test(
    opts: &GlobalOptions,
    url: String,
    user: String,
    password: String,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let registry = DockerRegistry {
        id: None,
        name: String::new(),
        url,
        user,
        password,
        last_modification_time: None,
    };

    match ctx.client.test_registry(&registry).await {
        Ok(()) => {
            println!("{} The test is successful", "✓".green());
            Ok(())
        }
        Err(err) => Err(Error::Other(format!(
            "An error has happened during test : {}",
            server_message(&err)
        ))),
    }
}
