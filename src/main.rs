use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;

use commands::{
    BackupCommand, ConfigCommand, ExportCommand, ImportCommand, ShowCommand, StatusCommand,
    SyncCommand, UserCommand,
};
use igreja_admin::admin::{ContentModel, SyncCoordinator};
use igreja_admin::api::ApiClient;
use igreja_admin::config::Config;
use igreja_admin::site::{FileSiteContent, SiteContent};
use igreja_admin::storage::{ContentStore, LocalCache};

#[derive(Parser)]
#[command(name = "igreja-admin")]
#[command(version)]
#[command(about = "Administration CLI for the church site content", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show content totals and server status
    Status(StatusCommand),

    /// Show a section of the content document
    Show(ShowCommand),

    /// Publish edited content to the site
    Sync(SyncCommand),

    /// Export the content document to a JSON file
    Export(ExportCommand),

    /// Import a content document from a JSON file
    Import(ImportCommand),

    /// Manage server backups
    Backup(BackupCommand),

    /// Manage panel user accounts
    User(UserCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn build_store(config: &Config) -> ContentStore {
    let cache = LocalCache::new(config.cache_dir.clone());
    let api = ApiClient::new(config.api_base_url.clone());
    ContentStore::new(cache, api)
}

fn build_site(config: &Config) -> Arc<dyn SiteContent> {
    Arc::new(FileSiteContent::new(config.site_data_path.clone()))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;

    match cli.command {
        Some(Commands::Status(cmd)) => {
            let site = build_site(&config);
            let store = build_store(&config);
            let model = ContentModel::new(store.clone(), site.clone());
            let coordinator = SyncCoordinator::new(store, site);
            let api = ApiClient::new(config.api_base_url.clone());
            cmd.run(model, coordinator, &api).await?;
        }
        Some(Commands::Show(cmd)) => {
            let model = ContentModel::new(build_store(&config), build_site(&config));
            cmd.run(model).await?;
        }
        Some(Commands::Sync(cmd)) => {
            let site = build_site(&config);
            let store = build_store(&config);
            let model = ContentModel::new(store.clone(), site.clone());
            let coordinator = SyncCoordinator::new(store, site);
            let api = ApiClient::new(config.api_base_url.clone());
            cmd.run(model, coordinator, &api, &config).await?;
        }
        Some(Commands::Export(cmd)) => {
            let model = ContentModel::new(build_store(&config), build_site(&config));
            cmd.run(model).await?;
        }
        Some(Commands::Import(cmd)) => {
            let model = ContentModel::new(build_store(&config), build_site(&config));
            cmd.run(model).await?;
        }
        Some(Commands::Backup(cmd)) => {
            let model = ContentModel::new(build_store(&config), build_site(&config));
            let api = ApiClient::new(config.api_base_url.clone());
            cmd.run(model, &api).await?;
        }
        Some(Commands::User(cmd)) => {
            let api = ApiClient::new(config.api_base_url.clone());
            cmd.run(&api).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli.config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
