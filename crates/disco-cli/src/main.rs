mod house_ads;
mod links;
mod lookup;
mod prefs;
mod render;
mod terminal_clipboard;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::prefs::{PremiumCommands, TutorialCommands};

#[derive(Debug, Parser)]
#[command(name = "disco")]
#[command(about = "Find current discount codes for any store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up discount codes for a store domain
    Lookup {
        /// Store domain or hostname (e.g., nike.com)
        domain: String,
        /// Skip the minimum loading time and ads for this lookup
        #[arg(long)]
        premium: bool,
        /// Copy the Nth code (1-based) once results arrive
        #[arg(long, value_name = "N")]
        copy: Option<usize>,
    },
    /// Open a disco://showcodes?domain=... link
    Open {
        /// The deep link to open
        link: String,
    },
    /// Hand a shared page URL to Disco and look up its store
    Share {
        /// URL of the shared page
        url: String,
        /// Only print the deep link; do not run the lookup
        #[arg(long)]
        link_only: bool,
    },
    /// Show or change the onboarding flag
    Tutorial {
        #[command(subcommand)]
        command: TutorialCommands,
    },
    /// Show or change the premium entitlement
    Premium {
        #[command(subcommand)]
        command: PremiumCommands,
    },
    /// Copy a code to the terminal clipboard
    Copy {
        /// The code to copy
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = disco_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = disco_core::PreferencesStore::new(&config.prefs_path);
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Lookup {
            domain,
            premium,
            copy,
        }) => lookup::run_lookup(&config, &store, &domain, premium, copy).await?,
        Some(Commands::Open { link }) => links::run_open(&config, &store, &link).await?,
        Some(Commands::Share { url, link_only }) => {
            links::run_share(&config, &store, &url, link_only).await?;
        }
        Some(Commands::Tutorial { command }) => prefs::run_tutorial(&store, &command)?,
        Some(Commands::Premium { command }) => prefs::run_premium(&store, &command)?,
        Some(Commands::Copy { code }) => lookup::run_copy(&code)?,
        None => run_home(&config, &store).await?,
    }

    Ok(())
}

/// The no-argument entry point: onboarding on first launch, then either the
/// lookup handed over by a share, or the greeting.
async fn run_home(
    config: &disco_core::AppConfig,
    store: &disco_core::PreferencesStore,
) -> anyhow::Result<()> {
    if store.should_show_tutorial()? {
        println!("{}", render::TUTORIAL);
        store.mark_tutorial_seen()?;
    }

    if let Some(domain) = store.take_last_queried_domain()? {
        tracing::info!(domain = %domain, "resuming shared lookup");
        return lookup::run_lookup(config, store, &domain, false, None).await;
    }

    println!("{}", render::greeting());
    Ok(())
}

#[cfg(test)]
mod tests;
