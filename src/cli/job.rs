//! Job command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, GitAuthArgs, GlobalOptions, OutputFormat, server_message};
use crate::client::ForgeApi;
use crate::client::models::Job;
use crate::error::{Error, Result};
use crate::output::{json, table};

/// Job for table display
#[derive(Tabled)]
struct JobDisplay {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SCHEME")]
    scheme: String,
    #[tabled(rename = "REPOSITORY")]
    repository: String,
}

impl From<&Job> for JobDisplay {
    fn from(job: &Job) -> Self {
        Self {
            name: job.name.clone(),
            scheme: job.git_config.scheme().to_string(),
            repository: job.git_config.url().to_string(),
        }
    }
}

/// Run the job create command
pub async fn create(opts: &GlobalOptions, name: String, auth: GitAuthArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let job = Job {
        id: None,
        name,
        git_config: auth.into_git_config()?,
    };
    // same rule the server enforces, checked before any network call
    if !job.is_valid() {
        return Err(Error::Other(
            "A job needs a non-empty name, a repository URL and (for SSH) a private key"
                .to_string(),
        ));
    }

    match ctx.client.create_job(&job).await {
        Ok(created) => {
            println!("{} Job created: {}", "✓".green(), created.name.bold());
            Ok(())
        }
        Err(err) => Err(Error::Other(format!(
            "An error has happened during the creation : {}",
            server_message(&err)
        ))),
    }
}

/// Run the job list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let jobs = match ctx.client.list_jobs().await {
        Ok(jobs) => jobs,
        Err(err) => {
            return Err(Error::Other(format!(
                "An error has happened when fetching the jobs : {}",
                server_message(&err)
            )));
        }
    };

    match ctx.format {
        OutputFormat::Table => {
            let display_jobs: Vec<JobDisplay> = jobs.iter().map(JobDisplay::from).collect();
            println!("{}", table::format_table(&display_jobs));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&jobs)?);
        }
    }

    Ok(())
}
