//! Remote-backed repositories over the booking REST API. The API exposes
//! rooms, bookings, and the auth endpoint only; user administration always
//! runs against the local fixtures.
//!
//! Requests carry `Authorization: Bearer <token>` from the current session.
//! List responses are enveloped as `{ "data": [...] }`, writes return
//! `{ "data": <entity> }`, failures return `{ "message": ... }`. A missing
//! token blocks the request before anything is sent. No retries.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use simaru_core::repository::{BookingRepository, RepoError, RoomRepository};
use simaru_core::session::Session;
use simaru_domain::{AuthUser, Booking, BookingDraft, Room, RoomDraft};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    user: AuthUser,
}

fn transport(err: reqwest::Error) -> RepoError {
    RepoError::Transport(err.to_string())
}

pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
    session: RwLock<Session>,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RepoError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(RemoteStore {
            http,
            base_url: base_url.into(),
            session: RwLock::new(Session::logged_out()),
        })
    }

    pub fn set_session(&self, session: Session) {
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// The token check happens before the request is built, per the error
    /// taxonomy: no session means nothing goes on the wire.
    fn bearer(&self) -> Result<String, RepoError> {
        self.session()
            .token()
            .map(str::to_owned)
            .ok_or_else(|| RepoError::Unauthorized("session token missing".to_string()))
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, RepoError> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        response.json::<T>().await.map_err(transport)
    }

    async fn request_ok(&self, builder: reqwest::RequestBuilder) -> Result<(), RepoError> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.api_error(status.as_u16(), response).await);
        }
        Ok(())
    }

    async fn api_error(&self, status: u16, response: reqwest::Response) -> RepoError {
        let message = match response.text().await {
            Ok(raw) => serde_json::from_str::<ApiMessage>(&raw)
                .map(|m| m.message)
                .ok()
                .or_else(|| (!raw.is_empty()).then_some(raw))
                .unwrap_or_else(|| format!("request failed with status {status}")),
            Err(_) => format!("request failed with status {status}"),
        };
        tracing::warn!(status, %message, "api request failed");
        RepoError::Api { status, message }
    }

    /// POST credentials to `/api/auth/login`; on success the store adopts
    /// the new session and returns it for persistence.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, RepoError> {
        let body = serde_json::json!({ "email": email.trim(), "password": password });
        let response: LoginResponse = self
            .request_json(self.http.post(self.url("auth/login")).json(&body))
            .await?;
        let session = Session::logged_in(response.access_token, response.user);
        self.set_session(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl RoomRepository for RemoteStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Vec<Room>> = self
            .request_json(self.http.get(self.url("rooms")).bearer_auth(token))
            .await?;
        Ok(envelope.data)
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Room> = self
            .request_json(self.http.post(self.url("rooms")).bearer_auth(token).json(draft))
            .await?;
        Ok(envelope.data)
    }

    async fn update_room(&self, id: u64, draft: &RoomDraft) -> Result<Room, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Room> = self
            .request_json(
                self.http
                    .put(self.url(&format!("rooms/{id}")))
                    .bearer_auth(token)
                    .json(draft),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn delete_room(&self, id: u64) -> Result<(), RepoError> {
        let token = self.bearer()?;
        self.request_ok(
            self.http
                .delete(self.url(&format!("rooms/{id}")))
                .bearer_auth(token),
        )
        .await
    }
}

#[async_trait]
impl BookingRepository for RemoteStore {
    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Vec<Booking>> = self
            .request_json(self.http.get(self.url("bookings")).bearer_auth(token))
            .await?;
        Ok(envelope.data)
    }

    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Booking> = self
            .request_json(
                self.http
                    .post(self.url("bookings"))
                    .bearer_auth(token)
                    .json(draft),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn update_booking(&self, id: u64, draft: &BookingDraft) -> Result<Booking, RepoError> {
        let token = self.bearer()?;
        let envelope: Envelope<Booking> = self
            .request_json(
                self.http
                    .put(self.url(&format!("bookings/{id}")))
                    .bearer_auth(token)
                    .json(draft),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn delete_booking(&self, id: u64) -> Result<(), RepoError> {
        let token = self.bearer()?;
        self.request_ok(
            self.http
                .delete(self.url(&format!("bookings/{id}")))
                .bearer_auth(token),
        )
        .await
    }
}
