//! Server backup commands.

use clap::{Args, Subcommand};
use std::io::{self, Write};

use igreja_admin::admin::render::{format_backup_date, format_file_size};
use igreja_admin::admin::ContentModel;
use igreja_admin::api::ApiClient;

/// Manage server backups
#[derive(Args)]
pub struct BackupCommand {
    #[command(subcommand)]
    command: BackupSubcommand,
}

#[derive(Subcommand)]
enum BackupSubcommand {
    /// Create a backup of the current server data
    Create,

    /// List backups available on the server
    List,

    /// Restore a backup, replacing the current server data
    Restore {
        /// Backup file name, as shown by list
        filename: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl BackupCommand {
    pub async fn run(
        &self,
        mut model: ContentModel,
        api: &ApiClient,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            BackupSubcommand::Create => {
                match api.trigger_backup().await? {
                    Some(filename) => println!("Backup criado com sucesso: {}", filename),
                    None => println!("Backup criado com sucesso!"),
                }
                Ok(())
            }

            BackupSubcommand::List => {
                let backups = api.list_backups().await?;

                if backups.is_empty() {
                    println!("Nenhum backup encontrado");
                    return Ok(());
                }

                println!("{:<44}  {:<18}  TAMANHO", "ARQUIVO", "DATA");
                println!("{}", "-".repeat(76));
                for backup in &backups {
                    println!(
                        "{:<44}  {:<18}  {}",
                        backup.filename,
                        format_backup_date(backup.date),
                        format_file_size(backup.size)
                    );
                }
                println!("\nTotal: {} backup(s)", backups.len());
                Ok(())
            }

            BackupSubcommand::Restore { filename, force } => {
                // Confirm unless --force is used
                if !force {
                    print!(
                        "Restaurar o backup {}? Todos os dados atuais serão substituídos. [y/N] ",
                        filename
                    );
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Restauração cancelada.");
                        return Ok(());
                    }
                }

                api.restore_backup(filename).await?;
                println!("Backup restaurado com sucesso!");

                // Pull the restored data back down and republish it
                match model.load_all().await {
                    Ok(source) => println!("Dados recarregados de: {}", source),
                    Err(e) => eprintln!("Erro ao recarregar os dados: {}", e),
                }
                Ok(())
            }
        }
    }
}
