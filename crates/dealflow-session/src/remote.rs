//! Client for a remote identity API.
//!
//! Speaks the identity API protocol:
//!
//! - `POST {base}/api/login` with `{username, password}`: `200` carries a
//!   [`Principal`]; `400`/`401`/`403`/`404` mean "not a match"
//! - `POST {base}/api/register` with a [`RegisterRequest`]: any `2xx` is
//!   success, anything else carries `{"error": ..}` or `{"message": ..}`
//!
//! Every request is bounded by the configured timeout. Transport failures
//! surface as [`LookupError`] so the credential chain can log and move on.

use std::time::Duration;

use async_trait::async_trait;
use dealflow_config::SessionConfig;
use dealflow_models::{LoginRequest, Principal, RegisterRequest};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::authority::{RegistrationOutcome, Registrar};
use crate::credentials::CredentialProvider;
use crate::error::LookupError;

const GENERIC_REJECTION: &str = "Something went wrong";

#[derive(Debug, Clone)]
pub struct RemoteIdentityClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    error: Option<String>,
    message: Option<String>,
}

impl RemoteIdentityClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// `None` when no remote identity API is configured.
    pub fn from_config(config: &SessionConfig) -> Result<Option<Self>, LookupError> {
        config
            .remote_auth_url
            .as_deref()
            .map(|url| Self::new(url, config.remote_timeout))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_transport(&self, e: reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Transport(e.to_string())
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, LookupError> {
        let send = self.http.post(self.endpoint(path)).json(body).send();

        tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
            .map_err(|e| self.map_transport(e))
    }

    #[instrument(skip(self, password), fields(base_url = %self.base_url))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, LookupError> {
        let response = self
            .post("/api/login", &LoginRequest::new(username, password))
            .await?;

        match response.status() {
            status if status.is_success() => {
                let principal = response
                    .json::<Principal>()
                    .await
                    .map_err(|e| LookupError::Decode(e.to_string()))?;
                Ok(Some(principal))
            }
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND => {
                debug!(status = %response.status().as_u16(), "Remote identity API rejected credentials");
                Ok(None)
            }
            status => Err(LookupError::UnexpectedStatus(status.as_u16())),
        }
    }

    #[instrument(skip(self, request), fields(base_url = %self.base_url, username = %request.username))]
    pub async fn register_account(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegistrationOutcome, LookupError> {
        let response = self.post("/api/register", request).await?;

        if response.status().is_success() {
            return Ok(RegistrationOutcome::Registered);
        }

        let status = response.status().as_u16();
        let reason = response
            .json::<RejectionBody>()
            .await
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());

        debug!(status = %status, reason = %reason, "Remote identity API rejected registration");
        Ok(RegistrationOutcome::Rejected(reason))
    }
}

#[async_trait]
impl CredentialProvider for RemoteIdentityClient {
    fn label(&self) -> &str {
        "remote"
    }

    async fn verify(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<Option<Principal>, LookupError> {
        self.login(username, secret).await
    }
}

#[async_trait]
impl Registrar for RemoteIdentityClient {
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegistrationOutcome, LookupError> {
        self.register_account(request).await
    }
}
