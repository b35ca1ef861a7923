//! Igreja Admin Panel
//!
//! Server-rendered administration panel for the church site content.
//! Every page requires an authenticated session on the content API;
//! unauthenticated visitors are sent to the login page.
//!
//! # Configuration
//!
//! Read from the config file and environment, see `Config`:
//! - `IGREJA_ADMIN_PANEL_PORT`: port to listen on (default: 8090)
//! - `IGREJA_ADMIN_API_URL`: base URL of the content API
//! - `IGREJA_ADMIN_LOGIN_URL`: login page for unauthenticated visitors
//!
//! # Routes
//!
//! - `GET /health`: health check (no auth required)
//! - `GET /`: dashboard with totals and global actions
//! - `GET /events`, `/agenda`, `/services`, `/rosters`, `/social`:
//!   collection pages with add/edit/delete actions
//! - `GET /settings`, `/backups`, `/users`: section, backup and account
//!   management pages
//! - `GET /export`, `GET/POST /import`: whole-document snapshots

use axum::{
    extract::{Form, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use igreja_admin::admin::forms::commit_message;
use igreja_admin::admin::render;
use igreja_admin::admin::sync::{export_filename, export_snapshot, parse_import};
use igreja_admin::admin::{
    ContentModel, FormRecord, ModalController, ModalMode, ModelError, Notice, SubmitOutcome,
    SyncCoordinator, SYNC_INTERVAL,
};
use igreja_admin::api::{ApiClient, ApiError, UserRole, UserUpsert};
use igreja_admin::config::Config;
use igreja_admin::models::{
    BankAccount, Contact, EntityKind, Financial, Layout, PixKey, RosterCategory, SiteDocument,
    SiteInfo, Verse,
};
use igreja_admin::site::{FileSiteContent, SiteContent};
use igreja_admin::storage::{ContentStore, LocalCache, SaveOutcome};

const LOCAL_ONLY_WARNING: &str =
    "Erro ao salvar dados no servidor. Dados foram salvos localmente.";

// ============================================================================
// State
// ============================================================================

/// Everything the administrator is working on, behind one lock.
struct Session {
    model: ContentModel,
    modal: ModalController,
    notice: Option<Notice>,
    pending_import: Option<SiteDocument>,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    coordinator: Arc<SyncCoordinator>,
    api: ApiClient,
    login_url: String,
}

// ============================================================================
// Authentication
// ============================================================================

/// Session details added to request extensions after auth
#[derive(Debug, Clone)]
struct PanelUser {
    username: Option<String>,
}

/// Authentication middleware: every panel page needs a live session on
/// the content API.
async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.api.check_auth().await {
        Ok(status) if status.authenticated => {
            request.extensions_mut().insert(PanelUser {
                username: status.username,
            });
            next.run(request).await
        }
        Ok(_) => Redirect::to(&state.login_url).into_response(),
        Err(e) => {
            tracing::warn!("authentication check failed: {}", e);
            Redirect::to(&state.login_url).into_response()
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let mut session = state.session.lock().await;
    let pending = state
        .coordinator
        .has_pending_changes(session.model.document());
    let body = render::render_dashboard(session.model.document(), pending);
    let notice = session.notice.take();
    Html(render::render_page(
        "Início",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn collection_page(
    state: &AppState,
    user: &PanelUser,
    kind: EntityKind,
    title: &str,
) -> Html<String> {
    let mut session = state.session.lock().await;
    let body = render::render_section(session.model.document(), kind, title);
    let notice = session.notice.take();
    Html(render::render_page(
        title,
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn events_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    collection_page(&state, &user, EntityKind::FeaturedEvent, "Eventos Destacados").await
}

async fn agenda_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    collection_page(&state, &user, EntityKind::AgendaEvent, "Agenda").await
}

async fn services_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    collection_page(&state, &user, EntityKind::Service, "Cultos").await
}

async fn rosters_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let mut session = state.session.lock().await;
    let mut body = String::new();
    for category in RosterCategory::ALL {
        body.push_str(&render::render_section(
            session.model.document(),
            EntityKind::Roster(category),
            category.label(),
        ));
    }
    let notice = session.notice.take();
    Html(render::render_page(
        "Escalas",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn social_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    collection_page(&state, &user, EntityKind::SocialLink, "Redes Sociais").await
}

async fn settings_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let mut session = state.session.lock().await;
    let body = render::render_settings(session.model.document());
    let notice = session.notice.take();
    Html(render::render_page(
        "Configurações",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn backups_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let mut body = String::from("<section class=\"admin-section\">\n<h2>Backups</h2>\n");
    body.push_str(
        "<form method=\"post\" action=\"/backup-now\">\
         <button class=\"btn-primary\" type=\"submit\">\
         <i class=\"fas fa-database\"></i> Criar Backup</button></form>\n",
    );
    match state.api.list_backups().await {
        Ok(backups) => body.push_str(&render::render_backup_list(&backups)),
        Err(e) => {
            tracing::warn!("failed to list backups: {}", e);
            body.push_str(
                "<div class=\"admin-message admin-error-message\">Erro ao carregar backups</div>\n",
            );
        }
    }
    body.push_str("</section>\n");

    let mut session = state.session.lock().await;
    let notice = session.notice.take();
    Html(render::render_page(
        "Backups",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn users_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let mut body = String::from("<section class=\"admin-section\">\n<h2>Usuários</h2>\n");
    match state.api.list_users().await {
        Ok(users) => body.push_str(&render::render_users_table(&users)),
        Err(e) => {
            tracing::warn!("failed to list users: {}", e);
            body.push_str(
                "<div class=\"admin-message admin-error-message\">Erro ao carregar usuários</div>\n",
            );
        }
    }
    body.push_str(&render::render_user_form());
    body.push_str("</section>\n");

    let mut session = state.session.lock().await;
    let notice = session.notice.take();
    Html(render::render_page(
        "Usuários",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

// ============================================================================
// Entity forms
// ============================================================================

async fn entity_new(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
    Path(kind): Path<String>,
) -> Response {
    let Some(kind) = EntityKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, "unknown section").into_response();
    };

    let mut session = state.session.lock().await;
    session.modal.open_add(kind);
    let (title, body) = match session.modal.state() {
        Some(modal) => (modal.title(), render::render_entity_form(modal)),
        None => (String::new(), String::new()),
    };
    Html(render::render_page(
        &title,
        user.username.as_deref(),
        None,
        &body,
    ))
    .into_response()
}

async fn entity_edit(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
    Path((kind, id)): Path<(String, usize)>,
) -> Response {
    let Some(kind) = EntityKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, "unknown section").into_response();
    };

    let mut session = state.session.lock().await;
    match session.model.entity_record(kind, id) {
        Some(record) => {
            session.modal.open_edit(kind, id, record);
            let (title, body) = match session.modal.state() {
                Some(modal) => (modal.title(), render::render_entity_form(modal)),
                None => (String::new(), String::new()),
            };
            Html(render::render_page(
                &title,
                user.username.as_deref(),
                None,
                &body,
            ))
            .into_response()
        }
        None => {
            session.notice = Some(Notice::Error("Item não encontrado!".to_string()));
            Redirect::to(render::section_path(kind)).into_response()
        }
    }
}

async fn entity_submit(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
    Path(kind): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(kind) = EntityKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, "unknown section").into_response();
    };

    let record: FormRecord = form.into_iter().collect();
    let mut session = state.session.lock().await;

    match session.modal.submit(record) {
        SubmitOutcome::Commit { kind, mode, record } => {
            let message = commit_message(kind, mode);
            let result = match mode {
                ModalMode::Add => session.model.add(kind, &record).await,
                ModalMode::Edit { id } => session.model.update(kind, id, &record).await,
            };
            session.notice = Some(match result {
                Ok(SaveOutcome::Synced) => Notice::Success(message),
                Ok(SaveOutcome::LocalOnly) => Notice::Warning(LOCAL_ONLY_WARNING.to_string()),
                Err(ModelError::NotFound { .. }) => {
                    Notice::Error("Item não encontrado!".to_string())
                }
                Err(e) => Notice::Error(format!("Erro ao salvar dados: {}", e)),
            });
            Redirect::to(render::section_path(kind)).into_response()
        }
        SubmitOutcome::Invalid(_) => {
            // The modal kept the typed values and the validation error
            let (title, body) = match session.modal.state() {
                Some(modal) => (modal.title(), render::render_entity_form(modal)),
                None => (String::new(), String::new()),
            };
            Html(render::render_page(
                &title,
                user.username.as_deref(),
                None,
                &body,
            ))
            .into_response()
        }
        SubmitOutcome::Ignored => Redirect::to(render::section_path(kind)).into_response(),
    }
}

async fn entity_delete(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, usize)>,
) -> Response {
    let Some(kind) = EntityKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, "unknown section").into_response();
    };

    let mut session = state.session.lock().await;
    match session.model.delete(kind, id).await {
        Ok(SaveOutcome::Synced) => {}
        Ok(SaveOutcome::LocalOnly) => {
            session.notice = Some(Notice::Warning(LOCAL_ONLY_WARNING.to_string()));
        }
        Err(e) => {
            session.notice = Some(Notice::Error(format!("Erro ao salvar dados: {}", e)));
        }
    }
    Redirect::to(render::section_path(kind)).into_response()
}

// ============================================================================
// Settings
// ============================================================================

fn field(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

fn save_notice(result: Result<SaveOutcome, ModelError>) -> Notice {
    match result {
        Ok(SaveOutcome::Synced) => Notice::Success("Dados salvos com sucesso!".to_string()),
        Ok(SaveOutcome::LocalOnly) => Notice::Warning(LOCAL_ONLY_WARNING.to_string()),
        Err(e) => Notice::Error(format!("Erro ao salvar dados: {}", e)),
    }
}

async fn save_site(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let info = SiteInfo {
        name: field(&form, "name"),
        description: field(&form, "description"),
        verse: Verse {
            text: field(&form, "verse_text"),
            reference: field(&form, "verse_reference"),
        },
    };

    let mut session = state.session.lock().await;
    let result = session.model.set_site_info(info).await;
    session.notice = Some(save_notice(result));
    Redirect::to("/settings").into_response()
}

async fn save_contact(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let contact = Contact {
        address: field(&form, "address"),
        phone: field(&form, "phone"),
        email: field(&form, "email"),
    };

    let mut session = state.session.lock().await;
    let result = session.model.set_contact(contact).await;
    session.notice = Some(save_notice(result));
    Redirect::to("/settings").into_response()
}

async fn save_financial(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let financial = Financial {
        bank: BankAccount {
            name: field(&form, "bank_name"),
            branch: field(&form, "bank_branch"),
            account: field(&form, "bank_account"),
            holder: field(&form, "bank_holder"),
            tax_id: field(&form, "bank_tax_id"),
        },
        pix: PixKey {
            kind: field(&form, "pix_kind"),
            key: field(&form, "pix_key"),
        },
    };

    let mut session = state.session.lock().await;
    let result = session.model.set_financial(financial).await;
    session.notice = Some(save_notice(result));
    Redirect::to("/settings").into_response()
}

async fn save_layout(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    // Unchecked boxes are absent from the form body
    let layout = Layout {
        column_count: form
            .get("column_count")
            .and_then(|value| value.parse().ok())
            .unwrap_or(3),
        column1_visible: form.contains_key("column1_visible"),
        column2_visible: form.contains_key("column2_visible"),
        column3_visible: form.contains_key("column3_visible"),
    };

    let mut session = state.session.lock().await;
    let result = session.model.set_layout(layout).await;
    session.notice = Some(save_notice(result));
    Redirect::to("/settings").into_response()
}

// ============================================================================
// Global actions
// ============================================================================

async fn save_all(State(state): State<AppState>) -> Response {
    let mut session = state.session.lock().await;
    let result = state.coordinator.sync_now(session.model.document()).await;
    session.notice = Some(match result {
        Ok(SaveOutcome::Synced) => {
            Notice::Success("Todas as alterações foram salvas com sucesso!".to_string())
        }
        Ok(SaveOutcome::LocalOnly) => Notice::Warning(LOCAL_ONLY_WARNING.to_string()),
        Err(e) => Notice::Error(format!("Erro ao salvar dados: {}", e)),
    });
    Redirect::to("/").into_response()
}

async fn backup_now(State(state): State<AppState>) -> Response {
    let notice = match state.api.trigger_backup().await {
        Ok(Some(filename)) => Notice::Success(format!("Backup criado com sucesso: {}", filename)),
        Ok(None) => Notice::Success("Backup criado com sucesso!".to_string()),
        Err(ApiError::Rejected(message)) => Notice::Error(message),
        Err(e) => {
            tracing::warn!("backup failed: {}", e);
            Notice::Error("Erro ao criar backup".to_string())
        }
    };

    let mut session = state.session.lock().await;
    session.notice = Some(notice);
    Redirect::to("/backups").into_response()
}

async fn restore_backup(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let filename = field(&form, "filename");

    let mut session = state.session.lock().await;
    let notice = match state.api.restore_backup(&filename).await {
        Ok(()) => {
            // Pull the restored document back into the panel
            match session.model.load_all().await {
                Ok(_) => Notice::Success("Backup restaurado com sucesso!".to_string()),
                Err(e) => {
                    tracing::error!("reload after restore failed: {}", e);
                    Notice::Warning(
                        "Backup restaurado com sucesso! Erro ao recarregar os dados.".to_string(),
                    )
                }
            }
        }
        Err(ApiError::Rejected(message)) => Notice::Error(message),
        Err(e) => {
            tracing::warn!("restore failed: {}", e);
            Notice::Error("Erro ao restaurar backup".to_string())
        }
    };
    session.notice = Some(notice);
    Redirect::to("/backups").into_response()
}

// ============================================================================
// Snapshots
// ============================================================================

async fn export_document(State(state): State<AppState>) -> Response {
    let session = state.session.lock().await;
    match export_snapshot(session.model.document()) {
        Ok(snapshot) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export_filename()),
                ),
            ],
            snapshot,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

async fn import_page(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
) -> Html<String> {
    let body = render::render_import_form();
    let mut session = state.session.lock().await;
    let notice = session.notice.take();
    Html(render::render_page(
        "Importar Dados",
        user.username.as_deref(),
        notice.as_ref(),
        &body,
    ))
}

async fn import_submit(
    State(state): State<AppState>,
    Extension(user): Extension<PanelUser>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let payload = field(&form, "payload");

    let mut session = state.session.lock().await;
    match parse_import(&payload) {
        Ok(document) => {
            let body = render::render_import_confirm(&document);
            session.pending_import = Some(document);
            Html(render::render_page(
                "Confirmar Importação",
                user.username.as_deref(),
                None,
                &body,
            ))
            .into_response()
        }
        Err(e) => {
            tracing::warn!("import rejected: {}", e);
            session.notice = Some(Notice::Error("Arquivo de backup inválido!".to_string()));
            Redirect::to("/import").into_response()
        }
    }
}

async fn import_confirm(State(state): State<AppState>) -> Response {
    let mut session = state.session.lock().await;
    match session.pending_import.take() {
        Some(document) => {
            let result = session.model.replace_document(document).await;
            session.notice = Some(match result {
                Ok(SaveOutcome::Synced) => {
                    Notice::Success("Backup restaurado com sucesso!".to_string())
                }
                Ok(SaveOutcome::LocalOnly) => Notice::Warning(LOCAL_ONLY_WARNING.to_string()),
                Err(e) => Notice::Error(format!("Erro ao salvar dados: {}", e)),
            });
            Redirect::to("/").into_response()
        }
        None => Redirect::to("/import").into_response(),
    }
}

// ============================================================================
// Users
// ============================================================================

async fn save_user(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let username = field(&form, "username").trim().to_string();
    let name = field(&form, "name").trim().to_string();

    if username.is_empty() || name.is_empty() {
        let mut session = state.session.lock().await;
        session.notice = Some(Notice::Error(
            "Preencha todos os campos obrigatórios: username, name".to_string(),
        ));
        return Redirect::to("/users").into_response();
    }

    let password = field(&form, "password");
    let user = UserUpsert {
        username,
        name,
        role: UserRole::parse(&field(&form, "role")).unwrap_or_default(),
        password: if password.is_empty() {
            None
        } else {
            Some(password)
        },
    };

    let notice = match state.api.save_user(&user).await {
        Ok(Some(message)) => Notice::Success(message),
        Ok(None) => Notice::Success("Usuário salvo com sucesso!".to_string()),
        Err(ApiError::Rejected(message)) => Notice::Error(message),
        Err(e) => {
            tracing::warn!("failed to save user: {}", e);
            Notice::Error("Erro ao salvar usuário".to_string())
        }
    };

    let mut session = state.session.lock().await;
    session.notice = Some(notice);
    Redirect::to("/users").into_response()
}

async fn delete_user(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let username = field(&form, "username");

    let notice = match state.api.delete_user(&username).await {
        Ok(Some(message)) => Notice::Success(message),
        Ok(None) => Notice::Success("Usuário excluído com sucesso!".to_string()),
        Err(ApiError::Rejected(message)) => Notice::Error(message),
        Err(e) => {
            tracing::warn!("failed to delete user: {}", e);
            Notice::Error("Erro ao excluir usuário".to_string())
        }
    };

    let mut session = state.session.lock().await;
    session.notice = Some(notice);
    Redirect::to("/users").into_response()
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "igreja_admin=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Content API: {}", config.api_base_url);
    tracing::info!("Cache directory: {}", config.cache_dir.display());
    tracing::info!("Site data file: {}", config.site_data_path.display());

    let api = ApiClient::new(config.api_base_url.clone());
    let cache = LocalCache::new(config.cache_dir.clone());
    let store = ContentStore::new(cache, api.clone());
    let site: Arc<dyn SiteContent> = Arc::new(FileSiteContent::new(config.site_data_path.clone()));

    // Load the document before accepting requests
    let mut model = ContentModel::new(store.clone(), site.clone());
    match model.load_all().await {
        Ok(source) => tracing::info!("Content loaded from {}", source),
        Err(e) => {
            tracing::error!("Failed to load content: {}", e);
            std::process::exit(1);
        }
    }

    let state = AppState {
        session: Arc::new(Mutex::new(Session {
            model,
            modal: ModalController::new(),
            notice: None,
            pending_import: None,
        })),
        coordinator: Arc::new(SyncCoordinator::new(store, site)),
        api,
        login_url: config.login_url.clone(),
    };

    // Publish pending edits on a timer, the way the save button does
    let sync_state = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SYNC_INTERVAL);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let session = sync_state.session.lock().await;
            let document = session.model.document();
            if sync_state.coordinator.has_pending_changes(document) {
                match sync_state.coordinator.sync_now(document).await {
                    Ok(SaveOutcome::Synced) => tracing::info!("periodic sync completed"),
                    Ok(SaveOutcome::LocalOnly) => {
                        tracing::warn!("periodic sync saved locally only")
                    }
                    Err(e) => tracing::error!("periodic sync failed: {}", e),
                }
            }
        }
    });

    // Build router
    // Public routes (no auth)
    let public_routes = Router::new().route("/health", get(health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/", get(dashboard))
        .route("/events", get(events_page))
        .route("/agenda", get(agenda_page))
        .route("/services", get(services_page))
        .route("/rosters", get(rosters_page))
        .route("/social", get(social_page))
        .route("/settings", get(settings_page))
        .route("/backups", get(backups_page))
        .route("/content/{kind}/new", get(entity_new))
        .route("/content/{kind}/{id}/edit", get(entity_edit))
        .route("/content/{kind}/submit", post(entity_submit))
        .route("/content/{kind}/{id}/delete", post(entity_delete))
        .route("/settings/site", post(save_site))
        .route("/settings/contact", post(save_contact))
        .route("/settings/financial", post(save_financial))
        .route("/settings/layout", post(save_layout))
        .route("/save-all", post(save_all))
        .route("/backup-now", post(backup_now))
        .route("/backups/restore", post(restore_backup))
        .route("/export", get(export_document))
        .route("/import", get(import_page).post(import_submit))
        .route("/import/confirm", post(import_confirm))
        .route("/users", get(users_page).post(save_user))
        .route("/users/delete", post(delete_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.panel_port));
    tracing::info!("Starting admin panel on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
