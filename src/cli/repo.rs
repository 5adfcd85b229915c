//! Git repository command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GitAuthArgs, GlobalOptions, server_message};
use crate::client::ForgeApi;
use crate::error::{Error, Result};

/// Run the repo test command: ask the server to validate a git remote and
/// its credentials before they are used in a job.
pub async fn test(opts: &GlobalOptions, auth: GitAuthArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let config = auth.into_git_config()?;

    match ctx.client.test_repository(&config).await {
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
