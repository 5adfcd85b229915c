//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Forgeop Configuration Status".bold());

    let config_result = Config::load_at(opts.config_ref());

    match config_result {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            // Server status
            match opts.server.as_deref().or(config.server.as_deref()) {
                Some(server) => println!("{} Server: {}", "✓".green(), server.cyan()),
                None => {
                    println!("{} Server not configured", "✗".red());
                    println!("  → Run 'forgeop login --server <URL>' to configure");
                }
            }

            // Session status. The token is opaque, so there is no expiry to
            // show; a rejected call is the only way to learn it is stale.
            if opts.token.is_some() {
                println!("{} Session token provided via flag/environment", "✓".green());
            } else if config.is_authenticated() {
                println!("{} Session token stored", "✓".green());
            } else {
                println!("{} Not logged in", "✗".red());
                println!("  → Run 'forgeop login' to authenticate");
            }

            if let Some(ref format) = config.preferences.format {
                println!("{} Default output format: {}", "○".dimmed(), format);
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "forgeop login".cyan()
            );
            println!();
        }
    }

    Ok(())
}
