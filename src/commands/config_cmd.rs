use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use igreja_admin::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a config file with the default values
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Init => {
                let path = Config::init(config_path)?;
                println!("Created config file {}", path.display());
                Ok(())
            }

            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("api_base_url:   {}", config.api_base_url);
                        println!("login_url:      {}", config.login_url);
                        println!("cache_dir:      {}", config.cache_dir.display());
                        println!("site_data_path: {}", config.site_data_path.display());
                        println!("panel_port:     {}", config.panel_port);
                    }
                }
                Ok(())
            }
        }
    }
}
