//! HTTP client for the auth backend endpoints.

use crate::{AuthError, AuthResult, BackendConfig};

/// Client for the backend's token exchange and session probe endpoints.
#[derive(Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Trade a one-time access token for a durable session token.
    ///
    /// The response body is the session token, treated as an opaque string.
    /// A non-2xx response fails with [`AuthError::Exchange`]; callers do not
    /// catch this locally, it propagates to the bootstrap.
    pub async fn fetch_jwt(&self, user_id: &str, access_token: &str) -> AuthResult<String> {
        let mut url = self.config.endpoint_url("/JWT")?;
        url.query_pairs_mut()
            .append_pair("userId", user_id)
            .append_pair("accessToken", access_token);

        tracing::debug!(user_id = %user_id, "Exchanging access token for a session token");

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Token exchange rejected by backend");
            return Err(AuthError::Exchange { status });
        }

        Ok(response.text().await?)
    }

    /// Probe whether the backend still accepts the stored session token.
    ///
    /// Issues an authenticated GET against the current-user endpoint; only
    /// the status matters, the body is ignored.
    pub async fn probe_session(&self, jwt: &str) -> AuthResult<bool> {
        let url = self.config.endpoint_url("/api/user")?;

        tracing::debug!("Probing session validity against the backend");

        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", jwt))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let ok = response.status().is_success();
        if !ok {
            tracing::warn!(status = %response.status(), "Session probe rejected the stored token");
        }
        Ok(ok)
    }
}
