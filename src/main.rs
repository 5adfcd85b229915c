//! Forgeop CLI - companion for the Forge CI server

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::{Cli, Commands, GlobalOptions, JobCommands, RegistryCommands, RepoCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login {
            identifier,
            password,
            force,
        } => cli::login::run(&opts, identifier, password, force).await,
        Commands::Logout => cli::logout::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("forgeop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Job(job_cmd) => match job_cmd {
            JobCommands::Create { name, auth } => cli::job::create(&opts, name, auth).await,
            JobCommands::List => cli::job::list(&opts).await,
        },
        Commands::Registry(registry_cmd) => match registry_cmd {
            RegistryCommands::List => cli::registry::list(&opts).await,
            RegistryCommands::Get { id } => cli::registry::get(&opts, &id).await,
            RegistryCommands::Create {
                name,
                url,
                user,
                password,
            } => cli::registry::create(&opts, name, url, user, password).await,
            RegistryCommands::Update {
                id,
                name,
                url,
                user,
                password,
            } => cli::registry::update(&opts, &id, name, url, user, password).await,
            RegistryCommands::Delete { id, yes } => cli::registry::delete(&opts, &id, yes).await,
            RegistryCommands::Test {
                url,
                user,
                password,
            } => cli::registry::test(&opts, url, user, password).await,
        },
        Commands::Repo(repo_cmd) => match repo_cmd {
            RepoCommands::Test { auth } => cli::repo::test(&opts, auth).await,
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
