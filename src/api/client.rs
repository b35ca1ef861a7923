use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::SiteDocument;

/// Errors that can occur while talking to the site API.
#[derive(Debug)]
pub enum ApiError {
    /// Network or protocol failure
    RequestError(String),
    /// Server answered with success = false
    Rejected(String),
    /// Response body did not have the expected shape
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "Request error: {}", e),
            ApiError::Rejected(message) => write!(f, "{}", message),
            ApiError::InvalidResponse(e) => write!(f, "Invalid response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result of the authentication check.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// One server-side backup of the content document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    /// Creation time in unix seconds
    pub date: i64,
    /// File size in bytes
    pub size: u64,
}

/// Access level of a panel account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Editor,
    Viewer,
}

impl UserRole {
    pub fn parse(value: &str) -> Option<UserRole> {
        match value {
            "admin" => Some(UserRole::Admin),
            "editor" => Some(UserRole::Editor),
            "viewer" => Some(UserRole::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }

    /// Portuguese display name
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Editor => "Editor",
            UserRole::Viewer => "Visualizador",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A panel account as reported by the users endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAccount {
    pub username: String,
    pub name: String,
    pub role: String,
    pub created: Option<String>,
}

impl Default for UserAccount {
    fn default() -> Self {
        UserAccount {
            username: String::new(),
            name: String::new(),
            role: UserRole::default().as_str().to_string(),
            created: None,
        }
    }
}

impl UserAccount {
    /// Role translated for display; unknown roles are shown as-is.
    pub fn role_label(&self) -> &str {
        UserRole::parse(&self.role)
            .map(|role| role.label())
            .unwrap_or(&self.role)
    }
}

/// Payload for creating or updating an account.
///
/// A missing password keeps the current one on the server.
#[derive(Debug, Clone, Serialize)]
pub struct UserUpsert {
    pub username: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl StatusResponse {
    fn rejection(self, fallback: &str) -> ApiError {
        ApiError::Rejected(
            self.error
                .or(self.message)
                .unwrap_or_else(|| fallback.to_string()),
        )
    }
}

#[derive(Deserialize)]
struct DataResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct BackupCreateResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "backupFile")]
    backup_file: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct BackupListResponse {
    #[serde(default)]
    backups: Vec<BackupInfo>,
}

#[derive(Deserialize)]
struct UsersResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    users: Vec<UserAccount>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the site API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Checks whether the current session is authenticated.
    pub async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        let response = self
            .http
            .get(self.endpoint("auth"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        response
            .json::<AuthStatus>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetches the content document from the server.
    ///
    /// Returns `None` when the server has nothing stored yet. Fields of
    /// the wrong shape are dropped rather than failing the fetch.
    pub async fn fetch_document(&self) -> Result<Option<SiteDocument>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("data"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: DataResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        match body.data {
            Some(data) if body.success => Ok(Some(SiteDocument::from_value_lenient(&data))),
            _ => Ok(None),
        }
    }

    /// Pushes the content document to the server.
    pub async fn push_document(&self, document: &SiteDocument) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("data"))
            .json(document)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(())
        } else {
            Err(body.rejection("Erro ao salvar dados no servidor"))
        }
    }

    /// Asks the server to back up the stored document.
    ///
    /// Returns the backup file name when the server reports one.
    pub async fn trigger_backup(&self) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .put(self.endpoint("data"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: BackupCreateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(body.backup_file)
        } else {
            Err(ApiError::Rejected(
                body.message
                    .unwrap_or_else(|| "Erro ao criar backup".to_string()),
            ))
        }
    }

    /// Lists the backups stored on the server.
    pub async fn list_backups(&self) -> Result<Vec<BackupInfo>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("backup"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: BackupListResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        Ok(body.backups)
    }

    /// Restores a backup, replacing the stored document.
    pub async fn restore_backup(&self, filename: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("backup"))
            .json(&serde_json::json!({ "filename": filename }))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(())
        } else {
            Err(body.rejection("Erro ao restaurar backup"))
        }
    }

    /// Lists panel accounts.
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("users"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: UsersResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(body.users)
        } else {
            Err(ApiError::Rejected(
                body.error
                    .unwrap_or_else(|| "Erro ao carregar usuários".to_string()),
            ))
        }
    }

    /// Creates or updates a panel account. Returns the server's own
    /// confirmation message when it sends one.
    pub async fn save_user(&self, user: &UserUpsert) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .post(self.endpoint("users"))
            .json(user)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(body.message)
        } else {
            Err(body.rejection("Erro ao salvar usuário"))
        }
    }

    /// Removes a panel account. Returns the server's own confirmation
    /// message when it sends one.
    pub async fn delete_user(&self, username: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .delete(self.endpoint("users"))
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if body.success {
            Ok(body.message)
        } else {
            Err(body.rejection("Erro ao excluir usuário"))
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ApiClient::new("http://localhost:8080/api");
        assert_eq!(client.endpoint("data"), "http://localhost:8080/api/data");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.endpoint("auth"), "http://localhost:8080/api/auth");
    }

    #[test]
    fn test_user_role_parse() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("editor"), Some(UserRole::Editor));
        assert_eq!(UserRole::parse("viewer"), Some(UserRole::Viewer));
        assert_eq!(UserRole::parse("pastor"), None);
    }

    #[test]
    fn test_user_role_labels() {
        assert_eq!(UserRole::Admin.label(), "Administrador");
        assert_eq!(UserRole::Editor.label(), "Editor");
        assert_eq!(UserRole::Viewer.label(), "Visualizador");
    }

    #[test]
    fn test_default_role_is_editor() {
        assert_eq!(UserRole::default(), UserRole::Editor);
    }

    #[test]
    fn test_role_label_falls_back_to_raw_value() {
        let account = UserAccount {
            username: "ana".to_string(),
            name: "Ana".to_string(),
            role: "moderador".to_string(),
            created: None,
        };
        assert_eq!(account.role_label(), "moderador");
    }

    #[test]
    fn test_auth_status_tolerates_missing_username() {
        let status: AuthStatus = serde_json::from_value(json!({ "authenticated": true })).unwrap();
        assert!(status.authenticated);
        assert_eq!(status.username, None);
    }

    #[test]
    fn test_user_upsert_omits_missing_password() {
        let payload = serde_json::to_value(UserUpsert {
            username: "ana".to_string(),
            name: "Ana Souza".to_string(),
            role: UserRole::Editor,
            password: None,
        })
        .unwrap();

        assert_eq!(payload["role"], "editor");
        assert!(payload.get("password").is_none());
    }
}
