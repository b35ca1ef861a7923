//! Publishing commands for the edited content.

use clap::{Args, Subcommand};

use igreja_admin::admin::{ContentModel, SyncCoordinator, SYNC_INTERVAL};
use igreja_admin::api::ApiClient;
use igreja_admin::config::Config;
use igreja_admin::storage::SaveOutcome;

/// Publish edited content to the site
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Show sync configuration and server status
    Status,
}

impl SyncCommand {
    pub async fn run(
        &self,
        mut model: ContentModel,
        coordinator: SyncCoordinator,
        api: &ApiClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            None => self.sync(&mut model, &coordinator).await,
            Some(SyncSubcommand::Status) => {
                self.status(&mut model, &coordinator, api, config).await
            }
        }
    }

    async fn sync(
        &self,
        model: &mut ContentModel,
        coordinator: &SyncCoordinator,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let source = model.load().await?;
        println!("Dados carregados de: {}", source);
        println!();

        if !coordinator.has_pending_changes(model.document()) {
            println!("Nenhuma alteração pendente.");
            return Ok(());
        }

        println!("Publicando alterações...");
        match coordinator.sync_now(model.document()).await? {
            SaveOutcome::Synced => {
                println!("✓ site atualizado");
                println!("✓ dados enviados ao servidor");
            }
            SaveOutcome::LocalOnly => {
                println!("✓ site atualizado");
                println!("✗ servidor indisponível, dados salvos apenas localmente");
            }
        }

        Ok(())
    }

    async fn status(
        &self,
        model: &mut ContentModel,
        coordinator: &SyncCoordinator,
        api: &ApiClient,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("Sincronização");
        println!("=============");
        println!();
        println!("Servidor:  {}", config.api_base_url);
        println!("Intervalo: {} minutos", SYNC_INTERVAL.as_secs() / 60);

        let source = model.load().await?;
        println!("Fonte:     {}", source);

        let pending = coordinator.has_pending_changes(model.document());
        println!("Pendente:  {}", if pending { "sim" } else { "não" });
        println!();

        print!("Status do servidor: ");
        match api.check_auth().await {
            Ok(status) if status.authenticated => println!("✓ conectado e autenticado"),
            Ok(_) => println!("✓ conectado, sessão não autenticada"),
            Err(_) => println!("✗ inacessível"),
        }

        Ok(())
    }
}
