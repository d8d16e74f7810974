//! Reqwest-backed users service adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use pagination::{PageEnvelope, PageNumber};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use super::dto::{UserDto, into_domain_page};
use crate::domain::ports::{UsersGateway, UsersGatewayError, UsersPage};
use crate::domain::{UserDetails, UserId};

const DEFAULT_USER_AGENT: &str = "users-console/0.1";
const API_KEY_HEADER: &str = "x-api-key";

/// Outbound identity sent with every request.
#[derive(Debug, Clone)]
pub struct HttpGatewayIdentity {
    /// HTTP user-agent sent to the service.
    pub user_agent: String,
    /// Optional API key sent as `x-api-key`.
    pub api_key: Option<String>,
}

impl Default for HttpGatewayIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_key: None,
        }
    }
}

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpGatewayBuildError {
    /// The base URL cannot have path segments appended.
    #[error("base URL '{url}' cannot carry a path")]
    UnsupportedBaseUrl {
        /// Offending URL.
        url: String,
    },
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Users service adapter speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestUsersGateway {
    client: Client,
    base_url: Url,
    identity: HttpGatewayIdentity,
}

impl ReqwestUsersGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let gateway = ReqwestUsersGateway::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpGatewayBuildError> {
        Self::with_identity(base_url, timeout, HttpGatewayIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry a path or the reqwest
    /// client cannot be constructed.
    pub fn with_identity(
        base_url: Url,
        timeout: Duration,
        identity: HttpGatewayIdentity,
    ) -> Result<Self, HttpGatewayBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(HttpGatewayBuildError::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(identity.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url,
            identity,
        })
    }

    fn users_url(&self, id: Option<UserId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        match self.identity.api_key.as_deref() {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, UsersGatewayError> {
        let response = self
            .authorised(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

#[async_trait]
impl UsersGateway for ReqwestUsersGateway {
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, UsersGatewayError> {
        let request = self
            .client
            .get(self.users_url(None))
            .query(&[("page", page.get())]);
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_page(body.as_ref())
    }

    async fn update_user(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<(), UsersGatewayError> {
        let request = self.client.put(self.users_url(Some(id))).json(details);
        self.send(request).await.map(drop)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UsersGatewayError> {
        let request = self.client.delete(self.users_url(Some(id)));
        self.send(request).await.map(drop)
    }
}

fn parse_page(body: &[u8]) -> Result<UsersPage, UsersGatewayError> {
    let decoded: PageEnvelope<UserDto> = serde_json::from_slice(body).map_err(|error| {
        UsersGatewayError::decode(format!("invalid users page payload: {error}"))
    })?;
    into_domain_page(decoded).map_err(UsersGatewayError::decode)
}

fn map_transport_error(error: reqwest::Error) -> UsersGatewayError {
    if error.is_timeout() {
        UsersGatewayError::timeout(error.to_string())
    } else {
        UsersGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UsersGatewayError {
    let body_preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UsersGatewayError::timeout(format!("status {}", status.as_u16()))
        }
        _ => UsersGatewayError::status(status.as_u16(), body_preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
