//! Export and import of the whole content document.

use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use igreja_admin::admin::sync::{export_filename, export_snapshot, parse_import};
use igreja_admin::admin::ContentModel;
use igreja_admin::storage::SaveOutcome;

/// Export the content document to a JSON file
#[derive(Args)]
pub struct ExportCommand {
    /// Output path, a dated file in the current directory by default
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub async fn run(&self, mut model: ContentModel) -> Result<(), Box<dyn std::error::Error>> {
        let source = model.load().await?;
        let snapshot = export_snapshot(model.document())?;

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_filename()));
        fs::write(&path, snapshot)?;

        println!("Dados carregados de: {}", source);
        println!("Exportado para {}", path.display());
        Ok(())
    }
}

/// Import a content document from a JSON file
#[derive(Args)]
pub struct ImportCommand {
    /// Path to the exported file
    path: PathBuf,

    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl ImportCommand {
    pub async fn run(&self, mut model: ContentModel) -> Result<(), Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(&self.path)?;
        let document = match parse_import(&raw) {
            Ok(document) => document,
            Err(_) => return Err("Arquivo de backup inválido!".into()),
        };

        println!("{}", document);
        println!();

        // Confirm unless --force is used
        if !self.force {
            print!("Substituir todos os dados atuais? [y/N] ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Importação cancelada.");
                return Ok(());
            }
        }

        match model.replace_document(document).await? {
            SaveOutcome::Synced => println!("✓ dados importados e enviados ao servidor"),
            SaveOutcome::LocalOnly => {
                println!("✓ dados importados");
                println!("✗ servidor indisponível, dados salvos apenas localmente");
            }
        }

        Ok(())
    }
}
