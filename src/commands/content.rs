//! Content inspection commands.

use clap::{Args, ValueEnum};

use igreja_admin::admin::render::icon_label;
use igreja_admin::admin::{ContentModel, SyncCoordinator};
use igreja_admin::api::ApiClient;
use igreja_admin::models::{EntityKind, RosterCategory, SiteDocument};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Show content totals and server status
#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run(
        &self,
        mut model: ContentModel,
        coordinator: SyncCoordinator,
        api: &ApiClient,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let source = model.load().await?;
        let counts = model.counts();

        println!("Conteúdo do Site");
        println!("================");
        println!();
        println!("Fonte dos dados: {}", source);
        println!();
        println!("Eventos destacados: {}", counts.featured_events);
        println!("Eventos da agenda:  {}", counts.agenda_events);
        println!("Cultos:             {}", counts.services);
        println!("Entradas de escala: {}", counts.roster_entries);
        println!("Redes sociais:      {}", counts.social_links);
        println!();

        let pending = coordinator.has_pending_changes(model.document());
        println!(
            "Alterações pendentes: {}",
            if pending { "sim" } else { "não" }
        );
        println!();

        print!("Servidor: ");
        match api.check_auth().await {
            Ok(status) if status.authenticated => match status.username {
                Some(username) => println!("✓ autenticado como {}", username),
                None => println!("✓ autenticado"),
            },
            Ok(_) => println!("✓ acessível, sessão não autenticada"),
            Err(_) => println!("✗ inacessível"),
        }

        Ok(())
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum Section {
    #[default]
    All,
    Site,
    Events,
    Agenda,
    Services,
    Rosters,
    Social,
    Contact,
    Financial,
    Layout,
}

/// Show a section of the content document
#[derive(Args)]
pub struct ShowCommand {
    /// Section of the document
    #[arg(value_enum, default_value = "all")]
    section: Section,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ShowCommand {
    pub async fn run(&self, mut model: ContentModel) -> Result<(), Box<dyn std::error::Error>> {
        model.load().await?;
        let document = model.document();

        if let OutputFormat::Json = self.format {
            let value = match self.section {
                Section::All => serde_json::to_value(document)?,
                Section::Site => serde_json::to_value(&document.site)?,
                Section::Events => serde_json::to_value(&document.featured_events)?,
                Section::Agenda => serde_json::to_value(&document.agenda_events)?,
                Section::Services => serde_json::to_value(&document.services)?,
                Section::Rosters => serde_json::to_value(&document.rosters)?,
                Section::Social => serde_json::to_value(&document.social_links)?,
                Section::Contact => serde_json::to_value(&document.contact)?,
                Section::Financial => serde_json::to_value(&document.financial)?,
                Section::Layout => serde_json::to_value(&document.layout)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        match self.section {
            Section::All => {
                print_site(document);
                println!();
                print_events(document);
                println!();
                print_agenda(document);
                println!();
                print_services(document);
                println!();
                print_rosters(document);
                println!();
                print_social(document);
                println!();
                print_contact(document);
                println!();
                print_financial(document);
                println!();
                print_layout(document);
            }
            Section::Site => print_site(document),
            Section::Events => print_events(document),
            Section::Agenda => print_agenda(document),
            Section::Services => print_services(document),
            Section::Rosters => print_rosters(document),
            Section::Social => print_social(document),
            Section::Contact => print_contact(document),
            Section::Financial => print_financial(document),
            Section::Layout => print_layout(document),
        }

        Ok(())
    }
}

fn print_site(document: &SiteDocument) {
    println!("Site");
    println!("----");
    println!("Nome:       {}", document.site.name);
    println!("Descrição:  {}", document.site.description);
    println!(
        "Versículo:  \"{}\" ({})",
        document.site.verse.text, document.site.verse.reference
    );
    println!("Ano:        {}", document.current_year);
}

fn print_events(document: &SiteDocument) {
    println!("Eventos Destacados");
    println!("------------------");
    if document.featured_events.is_empty() {
        println!("{}", EntityKind::FeaturedEvent.empty_message());
        return;
    }
    println!("{:<4}  {:<32}  {:<24}  ÍCONE", "ID", "NOME", "HORÁRIO");
    println!("{}", "-".repeat(76));
    for (id, event) in document.featured_events.iter().enumerate() {
        println!(
            "{:<4}  {:<32}  {:<24}  {}",
            id,
            event.name,
            event.time,
            icon_label(&event.icon)
        );
    }
    println!("\nTotal: {} evento(s)", document.featured_events.len());
}

fn print_agenda(document: &SiteDocument) {
    println!("Agenda");
    println!("------");
    if document.agenda_events.is_empty() {
        println!("{}", EntityKind::AgendaEvent.empty_message());
        return;
    }
    println!("{:<4}  {:<4}  {:<8}  {:<28}  LOCAL", "ID", "DIA", "HORÁRIO", "TÍTULO");
    println!("{}", "-".repeat(76));
    for (id, event) in document.agenda_events.iter().enumerate() {
        println!(
            "{:<4}  {:<4}  {:<8}  {:<28}  {}",
            id, event.weekday, event.time, event.title, event.location
        );
    }
    println!("\nTotal: {} evento(s)", document.agenda_events.len());
}

fn print_services(document: &SiteDocument) {
    println!("Cultos");
    println!("------");
    if document.services.is_empty() {
        println!("{}", EntityKind::Service.empty_message());
        return;
    }
    println!("{:<4}  {:<32}  HORÁRIO", "ID", "NOME");
    println!("{}", "-".repeat(60));
    for (id, service) in document.services.iter().enumerate() {
        println!("{:<4}  {:<32}  {}", id, service.name, service.time);
    }
    println!("\nTotal: {} culto(s)", document.services.len());
}

fn print_rosters(document: &SiteDocument) {
    println!("Escalas");
    println!("-------");
    for category in RosterCategory::ALL {
        let entries = document.rosters.category(category);
        println!();
        println!("{}", category.label());
        if entries.is_empty() {
            println!("  {}", EntityKind::Roster(category).empty_message());
            continue;
        }
        for (id, entry) in entries.iter().enumerate() {
            println!("  {:<4}  {:<36}  {}", id, entry.date, entry.team);
        }
    }
    println!("\nTotal: {} entrada(s)", document.rosters.total());
}

fn print_social(document: &SiteDocument) {
    println!("Redes Sociais");
    println!("-------------");
    if document.social_links.is_empty() {
        println!("{}", EntityKind::SocialLink.empty_message());
        return;
    }
    println!("{:<4}  {:<16}  URL", "ID", "NOME");
    println!("{}", "-".repeat(60));
    for (id, link) in document.social_links.iter().enumerate() {
        println!("{:<4}  {:<16}  {}", id, link.name, link.url);
    }
    println!("\nTotal: {} rede(s)", document.social_links.len());
}

fn print_contact(document: &SiteDocument) {
    println!("Contato");
    println!("-------");
    println!("Endereço: {}", document.contact.address);
    println!("Telefone: {}", document.contact.phone);
    println!("E-mail:   {}", document.contact.email);
}

fn print_financial(document: &SiteDocument) {
    println!("Dados Financeiros");
    println!("-----------------");
    println!("Banco:   {}", document.financial.bank.name);
    println!("Agência: {}", document.financial.bank.branch);
    println!("Conta:   {}", document.financial.bank.account);
    println!("Titular: {}", document.financial.bank.holder);
    println!("CNPJ:    {}", document.financial.bank.tax_id);
    println!(
        "PIX:     {} ({})",
        document.financial.pix.key, document.financial.pix.kind
    );
}

fn print_layout(document: &SiteDocument) {
    println!("Layout");
    println!("------");
    println!("Colunas: {}", document.layout.column_count);
    for (label, visible) in [
        ("Coluna 1", document.layout.column1_visible),
        ("Coluna 2", document.layout.column2_visible),
        ("Coluna 3", document.layout.column3_visible),
    ] {
        println!(
            "{}: {}",
            label,
            if visible { "visível" } else { "oculta" }
        );
    }
}
