use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::service::error::ApiError;
use crate::storage::note::{Note, NoteDraft, User};
use crate::storage::session::{Session, SessionStore};

pub const DEFAULT_API_URL: &str = "https://notes-app-backend-tnt0.onrender.com";

/// The flag a toggle request flips. Soft delete and restore are the same
/// action: the server inverts whatever the flag currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Pinned,
    Archived,
    Deleted,
}

/// Thin authenticated wrapper around the NotesKeeper REST backend. All
/// durable note state lives on the server; this client relays requests and
/// hands the responses back to the caller unchanged.
pub struct NoteApi {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl NoteApi {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            session,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::MissingToken)?;
        Ok(self
            .http
            .request(method, self.endpoint(path))
            .bearer_auth(token))
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let payload = RegisterRequest {
            username,
            email,
            password,
        };
        let response = self
            .http
            .post(self.endpoint("/api/user/register"))
            .json(&payload)
            .send()
            .await?;
        let body: MessageResponse = check(response).await?.json().await?;
        Ok(body
            .message
            .unwrap_or_else(|| "Registration successful".to_string()))
    }

    /// Logs in and persists the returned token and user for later runs.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        let payload = LoginRequest { email, password };
        let response = self
            .http
            .post(self.endpoint("/api/user/login"))
            .json(&payload)
            .send()
            .await?;
        let body: LoginResponse = check(response).await?.json().await?;
        info!(username = %body.user.username, "logged in");
        let user = body.user.clone();
        if let Err(err) = self.session.save(Session {
            token: body.token,
            user: body.user,
        }) {
            // The in-memory session still holds the token, so this run works.
            warn!(%err, "failed to persist session");
        }
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            warn!(%err, "failed to clear session");
        }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.authed(Method::GET, "/api/notes/get")?.send().await?;
        let body: ListResponse = check(response).await?.json().await?;
        debug!(count = body.data.len(), "fetched notes");
        Ok(body.data)
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let response = self
            .authed(Method::POST, "/api/notes/create")?
            .json(draft)
            .send()
            .await?;
        let body: CreateResponse = check(response).await?.json().await?;
        Ok(body.note)
    }

    pub async fn edit_note(&self, id: &str, draft: &NoteDraft) -> Result<Note, ApiError> {
        let response = self
            .authed(Method::PUT, &format!("/api/notes/edit/{id}"))?
            .json(draft)
            .send()
            .await?;
        let body: EditResponse = check(response).await?.json().await?;
        Ok(body.data)
    }

    pub async fn toggle(&self, id: &str, action: ToggleAction) -> Result<(), ApiError> {
        let response = self
            .authed(Method::PUT, &format!("/api/notes/toggle/{id}"))?
            .json(&ToggleRequest { action })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn delete_permanently(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .authed(Method::DELETE, &format!("/api/notes/delete/{id}"))?
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turns a non-success status into an error carrying the body's `message`
/// field when there is one, else the raw body text.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or(text);
    Err(ApiError::Server { status, message })
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ToggleRequest {
    action: ToggleAction,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<Note>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(rename = "Note")]
    note: Note,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    data: Note,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_request_matches_the_wire_shape() {
        let value = serde_json::to_value(ToggleRequest {
            action: ToggleAction::Pinned,
        })
        .expect("serialize");
        assert_eq!(value, serde_json::json!({"action": "pinned"}));

        let value = serde_json::to_value(ToggleRequest {
            action: ToggleAction::Deleted,
        })
        .expect("serialize");
        assert_eq!(value, serde_json::json!({"action": "deleted"}));
    }

    #[test]
    fn list_response_unwraps_the_data_envelope() {
        let body: ListResponse = serde_json::from_str(
            r#"{"data":[{"_id":"1","title":"A","description":"x","tags":[]}]}"#,
        )
        .expect("parse");
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].id, "1");
    }

    #[test]
    fn create_response_unwraps_the_capitalized_note_key() {
        let body: CreateResponse = serde_json::from_str(
            r#"{"message":"created","Note":{"_id":"9","title":"T","description":"","tags":["a"]}}"#,
        )
        .expect("parse");
        assert_eq!(body.note.id, "9");
        assert_eq!(body.note.tags, vec!["a"]);
    }

    #[test]
    fn login_response_carries_token_and_user() {
        let body: LoginResponse = serde_json::from_str(
            r#"{"token":"jwt","user":{"_id":"u1","username":"ada","email":"a@b.c"}}"#,
        )
        .expect("parse");
        assert_eq!(body.token, "jwt");
        assert_eq!(body.user.username, "ada");
    }

    #[test]
    fn message_response_tolerates_a_missing_message() {
        let body: MessageResponse = serde_json::from_str("{}").expect("parse");
        assert!(body.message.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let api = NoteApi::new(
            "http://localhost:5000/",
            SessionStore::from_dir(dir.path()),
        );
        assert_eq!(api.endpoint("/api/notes/get"), "http://localhost:5000/api/notes/get");
    }
}
