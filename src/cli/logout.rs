//! Logout command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the logout command: drop the stored session token. Purely local,
/// the server keeps no session state to invalidate.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("Not logged in.");
            return Ok(());
        }
    };

    if !config.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    config.token = None;
    config.save_at(opts.config_ref())?;

    println!("{} Logged out", "✓".green());
    Ok(())
}
