//! HTML fragments for the administration panel.
//!
//! Pages are assembled as plain strings, no template engine. Every value
//! taken from the document or from the API goes through [`escape_html`]
//! before it lands in markup.

use chrono::{DateTime, Local};

use super::forms::ModalState;
use super::Notice;
use crate::api::{BackupInfo, UserAccount};
use crate::models::{ContentCounts, EntityKind, SiteDocument};

/// Icons offered in the entity forms, with the names shown for them.
pub const ICONS: &[(&str, &str)] = &[
    ("fas fa-bible", "Bíblia"),
    ("fas fa-users", "Pessoas"),
    ("fas fa-church", "Igreja"),
    ("fas fa-praying-hands", "Oração"),
    ("fas fa-music", "Música"),
    ("fas fa-cross", "Cruz"),
    ("fas fa-map-marker-alt", "Localização"),
    ("fas fa-home", "Casa"),
    ("fas fa-building", "Prédio"),
    ("fab fa-facebook-f", "Facebook"),
    ("fab fa-instagram", "Instagram"),
    ("fab fa-youtube", "YouTube"),
    ("fab fa-whatsapp", "WhatsApp"),
    ("fab fa-spotify", "Spotify"),
    ("fab fa-twitter", "Twitter"),
];

/// Weekday abbreviations offered for agenda events.
pub const WEEKDAYS: &[&str] = &["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SAB"];

const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Início"),
    ("/events", "Eventos"),
    ("/agenda", "Agenda"),
    ("/services", "Cultos"),
    ("/rosters", "Escalas"),
    ("/social", "Redes Sociais"),
    ("/settings", "Configurações"),
    ("/backups", "Backups"),
    ("/users", "Usuários"),
];

/// Escapes a value for HTML text and attribute positions.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Display name of a Font Awesome icon class. Classes outside the
/// curated list come back unchanged.
pub fn icon_label(icon: &str) -> &str {
    ICONS
        .iter()
        .find(|(class, _)| *class == icon)
        .map(|(_, name)| *name)
        .unwrap_or(icon)
}

/// Human readable file size with one decimal past 1 KB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// Backup timestamps arrive as unix seconds.
pub fn format_backup_date(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(date) => date
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Panel page that lists a collection.
pub fn section_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::FeaturedEvent => "/events",
        EntityKind::AgendaEvent => "/agenda",
        EntityKind::Service => "/services",
        EntityKind::Roster(_) => "/rosters",
        EntityKind::SocialLink => "/social",
    }
}

// Truncation works on characters, not bytes. Content is Portuguese and
// slicing a multibyte accent in half would panic.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let short: String = text.chars().take(limit).collect();
        format!("{}...", short)
    } else {
        text.to_string()
    }
}

fn icon_cell(icon: &str) -> String {
    format!(
        "<i class=\"{}\"></i> {}",
        escape_html(icon),
        escape_html(icon_label(icon))
    )
}

fn actions_cell(kind: EntityKind, id: usize) -> String {
    format!(
        "<td class=\"actions\">\
         <a class=\"btn-icon edit\" href=\"/content/{0}/{1}/edit\" title=\"Editar\">\
         <i class=\"fas fa-pencil-alt\"></i></a>\
         <form method=\"post\" action=\"/content/{0}/{1}/delete\" \
         onsubmit=\"return confirm('Tem certeza que deseja excluir este item?')\">\
         <button class=\"btn-icon delete\" type=\"submit\" title=\"Excluir\">\
         <i class=\"fas fa-trash-alt\"></i></button>\
         </form></td>",
        kind.slug(),
        id
    )
}

/// Table body rows for one collection.
///
/// An empty collection renders a single placeholder row spanning the
/// whole table.
pub fn render_collection(document: &SiteDocument, kind: EntityKind) -> String {
    let mut rows = String::new();

    match kind {
        EntityKind::FeaturedEvent => {
            for (id, event) in document.featured_events.iter().enumerate() {
                rows.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n",
                    escape_html(&event.name),
                    escape_html(&event.time),
                    icon_cell(&event.icon),
                    actions_cell(kind, id),
                ));
            }
        }
        EntityKind::AgendaEvent => {
            for (id, event) in document.agenda_events.iter().enumerate() {
                rows.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n",
                    escape_html(&event.weekday),
                    escape_html(&event.time),
                    escape_html(&event.title),
                    escape_html(&truncate(&event.description, 50)),
                    escape_html(&event.location),
                    actions_cell(kind, id),
                ));
            }
        }
        EntityKind::Service => {
            for (id, service) in document.services.iter().enumerate() {
                rows.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td>{}</tr>\n",
                    escape_html(&service.name),
                    escape_html(&service.time),
                    actions_cell(kind, id),
                ));
            }
        }
        EntityKind::Roster(category) => {
            for (id, entry) in document.rosters.category(category).iter().enumerate() {
                rows.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td>{}</tr>\n",
                    escape_html(&entry.date),
                    escape_html(&entry.team),
                    actions_cell(kind, id),
                ));
            }
        }
        EntityKind::SocialLink => {
            for (id, link) in document.social_links.iter().enumerate() {
                let url = escape_html(&link.url);
                rows.push_str(&format!(
                    "<tr><td>{}</td><td><a href=\"{}\" target=\"_blank\">{}</a></td><td>{}</td>{}</tr>\n",
                    escape_html(&link.name),
                    url,
                    url,
                    icon_cell(&link.icon),
                    actions_cell(kind, id),
                ));
            }
        }
    }

    if rows.is_empty() {
        rows = format!(
            "<tr><td colspan=\"{}\" class=\"no-data\">{}</td></tr>\n",
            kind.table_width(),
            kind.empty_message()
        );
    }

    rows
}

/// Complete table for a collection, headers included.
pub fn render_table(document: &SiteDocument, kind: EntityKind) -> String {
    let headers: &[&str] = match kind {
        EntityKind::FeaturedEvent => &["Nome", "Horário", "Ícone", "Ações"],
        EntityKind::AgendaEvent => &["Dia", "Horário", "Título", "Descrição", "Local", "Ações"],
        EntityKind::Service => &["Nome", "Horário", "Ações"],
        EntityKind::Roster(_) => &["Data", "Equipe", "Ações"],
        EntityKind::SocialLink => &["Nome", "URL", "Ícone", "Ações"],
    };

    let mut html = String::from("<table class=\"admin-table\">\n<thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    html.push_str(&render_collection(document, kind));
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Section page for a collection: heading, add button, table.
pub fn render_section(document: &SiteDocument, kind: EntityKind, heading: &str) -> String {
    let mut html = format!(
        "<section class=\"admin-section\">\n<h2>{}</h2>\n",
        escape_html(heading)
    );
    html.push_str(&format!(
        "<a class=\"btn-primary\" href=\"/content/{}/new\"><i class=\"fas fa-plus\"></i> Adicionar</a>\n",
        kind.slug()
    ));
    html.push_str(&render_table(document, kind));
    html.push_str("</section>\n");
    html
}

/// Fragments that change together after a mutation.
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    pub collection: String,
    pub counts: ContentCounts,
}

/// Re-renders a collection together with the dashboard counters, so one
/// mutation refreshes everything that shows the entry count.
pub fn refresh_view(document: &SiteDocument, kind: EntityKind) -> ViewUpdate {
    ViewUpdate {
        collection: render_collection(document, kind),
        counts: document.counts(),
    }
}

/// Dashboard with collection totals and the global actions.
pub fn render_dashboard(document: &SiteDocument, pending: bool) -> String {
    let counts = document.counts();
    let cards = [
        ("Eventos destacados", counts.featured_events, "fas fa-star"),
        ("Eventos da agenda", counts.agenda_events, "fas fa-calendar-alt"),
        ("Cultos", counts.services, "fas fa-church"),
        ("Entradas de escala", counts.roster_entries, "fas fa-list"),
        ("Redes sociais", counts.social_links, "fas fa-share-alt"),
    ];

    let mut html = String::from("<section class=\"admin-dashboard\">\n<h2>Visão Geral</h2>\n");
    if pending {
        html.push_str(
            "<div class=\"admin-message admin-warning-message\">\
             Há alterações ainda não publicadas no site</div>\n",
        );
    }
    html.push_str("<div class=\"admin-cards\">\n");
    for (label, value, icon) in cards {
        html.push_str(&format!(
            "<div class=\"admin-card\"><i class=\"{}\"></i>\
             <span class=\"admin-card-value\">{}</span>\
             <span class=\"admin-card-label\">{}</span></div>\n",
            icon, value, label
        ));
    }
    html.push_str("</div>\n<div class=\"admin-actions\">\n");
    html.push_str(
        "<form method=\"post\" action=\"/save-all\">\
         <button class=\"btn-primary\" type=\"submit\">\
         <i class=\"fas fa-save\"></i> Salvar Tudo</button></form>\n",
    );
    html.push_str(
        "<form method=\"post\" action=\"/backup-now\">\
         <button class=\"btn-secondary\" type=\"submit\">\
         <i class=\"fas fa-database\"></i> Criar Backup</button></form>\n",
    );
    html.push_str(
        "<a class=\"btn-secondary\" href=\"/export\">\
         <i class=\"fas fa-download\"></i> Exportar Dados</a>\n",
    );
    html.push_str(
        "<a class=\"btn-secondary\" href=\"/import\">\
         <i class=\"fas fa-upload\"></i> Importar Dados</a>\n",
    );
    html.push_str("</div>\n</section>\n");
    html
}

fn text_input(html: &mut String, name: &str, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"form-group\"><label for=\"{0}\">{1}</label>\
         <input type=\"text\" id=\"{0}\" name=\"{0}\" value=\"{2}\"></div>\n",
        name,
        label,
        escape_html(value)
    ));
}

fn textarea(html: &mut String, name: &str, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"form-group\"><label for=\"{0}\">{1}</label>\
         <textarea id=\"{0}\" name=\"{0}\" rows=\"3\">{2}</textarea></div>\n",
        name,
        label,
        escape_html(value)
    ));
}

fn select(html: &mut String, name: &str, label: &str, options: &[(&str, &str)], value: &str) {
    html.push_str(&format!(
        "<div class=\"form-group\"><label for=\"{0}\">{1}</label>\
         <select id=\"{0}\" name=\"{0}\">\n",
        name, label
    ));
    for (option, text) in options {
        let selected = if *option == value { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(option),
            selected,
            escape_html(text)
        ));
    }
    html.push_str("</select></div>\n");
}

fn icon_select(html: &mut String, value: &str) {
    select(html, "icon", "Ícone", ICONS, value);
}

/// The add/edit dialog for an entity, typed values and validation error
/// included.
pub fn render_entity_form(state: &ModalState) -> String {
    let values = &state.values;
    let mut html = String::from("<div class=\"admin-modal\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&state.title())));
    if let Some(error) = &state.error {
        html.push_str(&format!(
            "<div class=\"admin-message admin-error-message\">{}</div>\n",
            escape_html(&error.to_string())
        ));
    }
    html.push_str(&format!(
        "<form method=\"post\" action=\"/content/{}/submit\">\n",
        state.kind.slug()
    ));

    match state.kind {
        EntityKind::FeaturedEvent => {
            text_input(&mut html, "name", "Nome", values.get("name"));
            text_input(&mut html, "time", "Horário", values.get("time"));
            icon_select(&mut html, values.get("icon"));
        }
        EntityKind::AgendaEvent => {
            let weekdays: Vec<(&str, &str)> =
                WEEKDAYS.iter().map(|day| (*day, *day)).collect();
            select(&mut html, "weekday", "Dia", &weekdays, values.get("weekday"));
            text_input(&mut html, "time", "Horário", values.get("time"));
            text_input(&mut html, "title", "Título", values.get("title"));
            textarea(&mut html, "description", "Descrição", values.get("description"));
            text_input(&mut html, "location", "Local", values.get("location"));
            icon_select(&mut html, values.get("icon"));
        }
        EntityKind::Service => {
            text_input(&mut html, "name", "Nome", values.get("name"));
            text_input(&mut html, "time", "Horário", values.get("time"));
        }
        EntityKind::Roster(_) => {
            text_input(&mut html, "date", "Data", values.get("date"));
            text_input(&mut html, "team", "Equipe", values.get("team"));
        }
        EntityKind::SocialLink => {
            text_input(&mut html, "name", "Nome", values.get("name"));
            text_input(&mut html, "url", "URL", values.get("url"));
            icon_select(&mut html, values.get("icon"));
        }
    }

    html.push_str(&format!(
        "<div class=\"admin-modal-footer\">\
         <button type=\"submit\" class=\"btn-primary\">Salvar</button>\
         <a class=\"btn-secondary\" href=\"{}\">Cancelar</a></div>\n",
        section_path(state.kind)
    ));
    html.push_str("</form>\n</div>\n");
    html
}

/// Settings page with one form per document section.
pub fn render_settings(document: &SiteDocument) -> String {
    let mut html = String::from("<section class=\"admin-section\">\n<h2>Configurações</h2>\n");

    html.push_str("<h3>Informações do Site</h3>\n<form method=\"post\" action=\"/settings/site\">\n");
    text_input(&mut html, "name", "Nome", &document.site.name);
    textarea(&mut html, "description", "Descrição", &document.site.description);
    text_input(&mut html, "verse_text", "Versículo", &document.site.verse.text);
    text_input(
        &mut html,
        "verse_reference",
        "Referência",
        &document.site.verse.reference,
    );
    html.push_str("<button type=\"submit\" class=\"btn-primary\">Salvar</button>\n</form>\n");

    html.push_str("<h3>Contato</h3>\n<form method=\"post\" action=\"/settings/contact\">\n");
    text_input(&mut html, "address", "Endereço", &document.contact.address);
    text_input(&mut html, "phone", "Telefone", &document.contact.phone);
    text_input(&mut html, "email", "E-mail", &document.contact.email);
    html.push_str("<button type=\"submit\" class=\"btn-primary\">Salvar</button>\n</form>\n");

    html.push_str("<h3>Dados Financeiros</h3>\n<form method=\"post\" action=\"/settings/financial\">\n");
    text_input(&mut html, "bank_name", "Banco", &document.financial.bank.name);
    text_input(&mut html, "bank_branch", "Agência", &document.financial.bank.branch);
    text_input(&mut html, "bank_account", "Conta", &document.financial.bank.account);
    text_input(&mut html, "bank_holder", "Titular", &document.financial.bank.holder);
    text_input(&mut html, "bank_tax_id", "CNPJ", &document.financial.bank.tax_id);
    text_input(&mut html, "pix_kind", "Tipo de Chave PIX", &document.financial.pix.kind);
    text_input(&mut html, "pix_key", "Chave PIX", &document.financial.pix.key);
    html.push_str("<button type=\"submit\" class=\"btn-primary\">Salvar</button>\n</form>\n");

    html.push_str("<h3>Layout</h3>\n<form method=\"post\" action=\"/settings/layout\">\n");
    let columns = document.layout.column_count.to_string();
    select(
        &mut html,
        "column_count",
        "Número de colunas",
        &[("1", "1"), ("2", "2"), ("3", "3")],
        &columns,
    );
    for (name, label, visible) in [
        ("column1_visible", "Coluna 1 visível", document.layout.column1_visible),
        ("column2_visible", "Coluna 2 visível", document.layout.column2_visible),
        ("column3_visible", "Coluna 3 visível", document.layout.column3_visible),
    ] {
        let checked = if visible { " checked" } else { "" };
        html.push_str(&format!(
            "<div class=\"form-group form-check\">\
             <input type=\"checkbox\" id=\"{0}\" name=\"{0}\"{1}>\
             <label for=\"{0}\">{2}</label></div>\n",
            name, checked, label
        ));
    }
    html.push_str("<button type=\"submit\" class=\"btn-primary\">Salvar</button>\n</form>\n");

    html.push_str("</section>\n");
    html
}

/// Backup listing with a restore action per entry.
pub fn render_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return String::from("<p class=\"no-data\">Nenhum backup encontrado</p>\n");
    }

    let mut html = String::from("<ul class=\"admin-backup-list\">\n");
    for backup in backups {
        let filename = escape_html(&backup.filename);
        html.push_str(&format!(
            "<li class=\"admin-backup-item\">\
             <span class=\"backup-name\">{0}</span>\
             <span class=\"backup-date\">{1}</span>\
             <span class=\"backup-size\">{2}</span>\
             <form method=\"post\" action=\"/backups/restore\" \
             onsubmit=\"return confirm('Tem certeza que deseja restaurar o backup {0}? \
Esta ação irá substituir todos os dados atuais.')\">\
             <input type=\"hidden\" name=\"filename\" value=\"{0}\">\
             <button type=\"submit\" class=\"btn-secondary\">\
             <i class=\"fas fa-undo-alt\"></i> Restaurar</button>\
             </form></li>\n",
            filename,
            format_backup_date(backup.date),
            format_file_size(backup.size),
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn user_created_label(created: Option<&str>) -> String {
    let Some(raw) = created else {
        return "N/A".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// User accounts table with a delete action per row.
pub fn render_users_table(users: &[UserAccount]) -> String {
    let mut html = String::from(
        "<table class=\"admin-table\">\n<thead><tr>\
         <th>Usuário</th><th>Nome</th><th>Função</th><th>Criado em</th><th>Ações</th>\
         </tr></thead>\n<tbody>\n",
    );

    if users.is_empty() {
        html.push_str(
            "<tr><td colspan=\"5\" class=\"no-data\">Nenhum usuário encontrado</td></tr>\n",
        );
    }
    for user in users {
        let username = escape_html(&user.username);
        html.push_str(&format!(
            "<tr><td>{0}</td><td>{1}</td><td>{2}</td><td>{3}</td>\
             <td class=\"actions\">\
             <form method=\"post\" action=\"/users/delete\" \
             onsubmit=\"return confirm('Tem certeza que deseja excluir o usuário &quot;{0}&quot;? \
Esta ação não pode ser desfeita.')\">\
             <input type=\"hidden\" name=\"username\" value=\"{0}\">\
             <button class=\"btn-icon delete\" type=\"submit\" title=\"Excluir\">\
             <i class=\"fas fa-trash-alt\"></i></button>\
             </form></td></tr>\n",
            username,
            escape_html(&user.name),
            escape_html(user.role_label()),
            escape_html(&user_created_label(user.created.as_deref())),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Form that creates or overwrites a user account.
pub fn render_user_form() -> String {
    let mut html = String::from("<h3>Adicionar Usuário</h3>\n<form method=\"post\" action=\"/users\">\n");
    text_input(&mut html, "username", "Usuário", "");
    text_input(&mut html, "name", "Nome", "");
    select(
        &mut html,
        "role",
        "Função",
        &[
            ("admin", "Administrador"),
            ("editor", "Editor"),
            ("viewer", "Visualizador"),
        ],
        "editor",
    );
    html.push_str(
        "<div class=\"form-group\"><label for=\"password\">Senha</label>\
         <input type=\"password\" id=\"password\" name=\"password\" value=\"\"></div>\n",
    );
    html.push_str("<button type=\"submit\" class=\"btn-primary\">Salvar</button>\n</form>\n");
    html
}

/// Import page: a snapshot is pasted in and confirmed on the next page.
pub fn render_import_form() -> String {
    let mut html = String::from("<section class=\"admin-section\">\n<h2>Importar Dados</h2>\n");
    html.push_str("<form method=\"post\" action=\"/import\">\n");
    textarea(&mut html, "payload", "Conteúdo do backup (JSON)", "");
    html.push_str(
        "<button type=\"submit\" class=\"btn-primary\">Importar</button>\n</form>\n</section>\n",
    );
    html
}

/// Confirmation step before an imported snapshot replaces the document.
pub fn render_import_confirm(document: &SiteDocument) -> String {
    let mut html = String::from("<section class=\"admin-section\">\n<h2>Confirmar Importação</h2>\n");
    html.push_str(
        "<div class=\"admin-message admin-warning-message\">\
         Todos os dados atuais serão substituídos</div>\n",
    );
    html.push_str(&format!("<p>{}</p>\n", escape_html(&document.to_string())));
    html.push_str(
        "<form method=\"post\" action=\"/import/confirm\">\
         <button type=\"submit\" class=\"btn-primary\">Confirmar</button>\
         <a class=\"btn-secondary\" href=\"/\">Cancelar</a></form>\n</section>\n",
    );
    html
}

/// Full page shell around a body fragment.
pub fn render_page(
    title: &str,
    username: Option<&str>,
    notice: Option<&Notice>,
    body: &str,
) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!(
        "<title>{} - Painel Administrativo</title>\n",
        escape_html(title)
    ));
    html.push_str("</head>\n<body>\n<header class=\"admin-header\">\n<h1>Painel Administrativo</h1>\n");
    if let Some(username) = username {
        html.push_str(&format!(
            "<span class=\"admin-user\">Olá, {}</span>\n",
            escape_html(username)
        ));
    }
    html.push_str("</header>\n<nav class=\"admin-nav\">\n");
    for (href, label) in NAV_LINKS {
        html.push_str(&format!("<a href=\"{}\">{}</a>\n", href, label));
    }
    html.push_str("</nav>\n<main class=\"admin-content\">\n");
    if let Some(notice) = notice {
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            notice.css_class(),
            escape_html(notice.message())
        ));
    }
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::forms::{FormRecord, ModalController};
    use crate::models::RosterCategory;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_icon_label_known_and_unknown() {
        assert_eq!(icon_label("fas fa-bible"), "Bíblia");
        assert_eq!(icon_label("fab fa-whatsapp"), "WhatsApp");
        assert_eq!(icon_label("fas fa-rocket"), "fas fa-rocket");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
    }

    #[test]
    fn test_truncate_character_safe() {
        let short = "ã".repeat(50);
        assert_eq!(truncate(&short, 50), short);

        let long = "ã".repeat(60);
        let cut = truncate(&long, 50);
        assert_eq!(cut.chars().count(), 53);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_render_collection_escapes_values() {
        let mut document = SiteDocument::sample_default();
        document.featured_events[0].name = "<script>alert(1)</script>".to_string();

        let rows = render_collection(&document, EntityKind::FeaturedEvent);

        assert!(rows.contains("&lt;script&gt;"));
        assert!(!rows.contains("<script>"));
    }

    #[test]
    fn test_render_collection_empty_placeholder() {
        let document = SiteDocument::default();

        let featured = render_collection(&document, EntityKind::FeaturedEvent);
        assert!(featured.contains("colspan=\"4\""));
        assert!(featured.contains("Nenhum evento destacado cadastrado"));

        let sound = render_collection(&document, EntityKind::Roster(RosterCategory::Sound));
        assert!(sound.contains("colspan=\"3\""));
        assert!(sound.contains("Nenhuma escala de sonoplastia cadastrada"));
    }

    #[test]
    fn test_render_collection_links_actions() {
        let document = SiteDocument::sample_default();

        let rows = render_collection(&document, EntityKind::Service);

        assert!(rows.contains("href=\"/content/service/0/edit\""));
        assert!(rows.contains("action=\"/content/service/0/delete\""));
        assert!(rows.contains("Tem certeza que deseja excluir este item?"));
    }

    #[test]
    fn test_agenda_description_truncated() {
        let mut document = SiteDocument::default();
        document.agenda_events.push(
            crate::models::AgendaEvent::new("QUA", "19h30", "Estudo")
                .with_description(&"x".repeat(60)),
        );

        let rows = render_collection(&document, EntityKind::AgendaEvent);

        assert!(rows.contains(&format!("{}...", "x".repeat(50))));
        assert!(!rows.contains(&"x".repeat(51)));
    }

    #[test]
    fn test_render_table_headers() {
        let document = SiteDocument::sample_default();

        let table = render_table(&document, EntityKind::FeaturedEvent);
        assert!(table.contains("<th>Nome</th>"));
        assert!(table.contains("<th>Ícone</th>"));

        let agenda = render_table(&document, EntityKind::AgendaEvent);
        assert!(agenda.contains("<th>Descrição</th>"));
        assert!(agenda.contains("<th>Local</th>"));
    }

    #[test]
    fn test_refresh_view_counts() {
        let document = SiteDocument::sample_default();

        let update = refresh_view(&document, EntityKind::SocialLink);

        assert_eq!(update.counts.social_links, 2);
        assert!(update.collection.contains("target=\"_blank\""));
    }

    #[test]
    fn test_render_entity_form_keeps_values_and_error() {
        let mut controller = ModalController::new();
        controller.open_add(EntityKind::FeaturedEvent);
        controller.submit(FormRecord::new().with("name", "Conferência"));

        let state = controller.state().unwrap();
        let form = render_entity_form(state);

        assert!(form.contains("Adicionar Evento"));
        assert!(form.contains("value=\"Conferência\""));
        assert!(form.contains("Preencha todos os campos obrigatórios"));
        assert!(form.contains("action=\"/content/featured-event/submit\""));
    }

    #[test]
    fn test_render_entity_form_marks_selected_icon() {
        let mut controller = ModalController::new();
        controller.open_edit(
            EntityKind::SocialLink,
            0,
            FormRecord::new().with("icon", "fab fa-instagram"),
        );

        let form = render_entity_form(controller.state().unwrap());

        assert!(form.contains("value=\"fab fa-instagram\" selected"));
        assert!(form.contains("Editar Rede Social"));
    }

    #[test]
    fn test_render_settings_carries_current_values() {
        let document = SiteDocument::sample_default();

        let settings = render_settings(&document);

        assert!(settings.contains("Igreja Presbiteriana de Macaé"));
        assert!(settings.contains("action=\"/settings/financial\""));
        assert!(settings.contains("Chave PIX"));
        assert!(settings.contains("value=\"3\" selected"));
    }

    #[test]
    fn test_render_backup_list() {
        let backups = vec![BackupInfo {
            filename: "backup-2025-06-01.json".to_string(),
            date: 1_748_800_000,
            size: 2048,
        }];

        let html = render_backup_list(&backups);

        assert!(html.contains("backup-2025-06-01.json"));
        assert!(html.contains("2.0 KB"));
        assert!(html.contains("Restaurar"));
        assert!(html.contains("Tem certeza que deseja restaurar o backup"));

        assert!(render_backup_list(&[]).contains("Nenhum backup encontrado"));
    }

    #[test]
    fn test_render_users_table() {
        let users = vec![UserAccount {
            username: "maria".to_string(),
            name: "Maria Souza".to_string(),
            role: "editor".to_string(),
            created: None,
        }];

        let html = render_users_table(&users);

        assert!(html.contains("maria"));
        assert!(html.contains("Editor"));
        assert!(html.contains("N/A"));
        assert!(html.contains("Esta ação não pode ser desfeita."));

        assert!(render_users_table(&[]).contains("Nenhum usuário encontrado"));
    }

    #[test]
    fn test_render_page_shell() {
        let notice = Notice::Success("Dados salvos com sucesso!".to_string());

        let page = render_page("Início", Some("admin"), Some(&notice), "<p>corpo</p>");

        assert!(page.contains("<title>Início - Painel Administrativo</title>"));
        assert!(page.contains("Olá, admin"));
        assert!(page.contains("admin-success-message"));
        assert!(page.contains("Dados salvos com sucesso!"));
        assert!(page.contains("<p>corpo</p>"));
        assert!(page.contains("href=\"/rosters\""));
    }
}
