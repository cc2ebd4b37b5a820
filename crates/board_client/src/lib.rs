//! Typed HTTP client for the activity sign-up API.
//!
//! Three calls, mirroring the backend surface: fetch the full roster,
//! sign a participant up, unregister a participant. The client never
//! retries and never interprets capacity locally; the server's response
//! is the only authority.

use reqwest::{Client, StatusCode};
use shared::{
    protocol::{ActionOutcome, ErrorDetail},
    Roster,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("server url must be an http(s) origin")]
    UnsupportedBaseUrl,
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail provided"))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl ClientError {
    /// Server-provided failure text, when the server sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

#[derive(Clone)]
pub struct ActivityClient {
    http: Client,
    base_url: Url,
}

impl ActivityClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedBaseUrl);
        }
        Ok(Self { http, base_url })
    }

    /// `GET /activities`: the full roster, replacing whatever the caller
    /// held before. A non-2xx status is an error like any other.
    pub async fn fetch_activities(&self) -> Result<Roster, ClientError> {
        let url = self.endpoint(&["activities"], None)?;
        debug!(%url, "fetching roster");
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Self::rejection(status, res).await);
        }
        Ok(res.json().await?)
    }

    /// `POST /activities/{activity}/signup?email={email}`. Returns the
    /// server's confirmation message on success.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<String, ClientError> {
        self.post_registration(activity, "signup", email).await
    }

    /// `POST /activities/{activity}/unregister?email={email}`. Same
    /// contract as signup.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<String, ClientError> {
        self.post_registration(activity, "unregister", email).await
    }

    async fn post_registration(
        &self,
        activity: &str,
        action: &str,
        email: &str,
    ) -> Result<String, ClientError> {
        let url = self.endpoint(&["activities", activity, action], Some(email))?;
        debug!(%url, action, "posting registration change");
        let res = self.http.post(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Self::rejection(status, res).await);
        }
        let outcome: ActionOutcome = res.json().await?;
        Ok(outcome.message)
    }

    /// Builds `{base}/{segments...}?email=...`, percent-encoding each path
    /// segment and the query value. Activity names carry spaces, so string
    /// formatting is not an option here.
    fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::UnsupportedBaseUrl)?
            .pop_if_empty()
            .extend(segments);
        if let Some(email) = email {
            url.query_pairs_mut().append_pair("email", email);
        }
        Ok(url)
    }

    async fn rejection(status: StatusCode, res: reqwest::Response) -> ClientError {
        let detail = res
            .json::<ErrorDetail>()
            .await
            .ok()
            .and_then(|body| body.detail);
        ClientError::Api { status, detail }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
