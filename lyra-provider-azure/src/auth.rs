//! Token credentials for the Azure Resource Manager API

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use lyra_core::error::{ApiError, ApiResult};

/// Scope requested for management-plane tokens
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// A bearer token with its expiry
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

/// Source of bearer tokens for ARM requests
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn token(&self) -> ApiResult<AccessToken>;
}

/// Credential wrapping a pre-issued token
///
/// Useful for tests and for tokens minted out of band
/// (`az account get-access-token`).
#[derive(Debug, Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self) -> ApiResult<AccessToken> {
        Ok(AccessToken {
            token: self.token.clone(),
            expires_on: Utc::now() + Duration::hours(1),
        })
    }
}

/// Service-principal credential using the OAuth2 client-credentials flow
pub struct ClientSecretCredential {
    http: reqwest::Client,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    authority: String,
    cached: Mutex<Option<AccessToken>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl ClientSecretCredential {
    pub const DEFAULT_AUTHORITY: &'static str = "https://login.microsoftonline.com";

    /// Tokens are refreshed this long before their reported expiry
    const EXPIRY_MARGIN_SECS: i64 = 120;

    pub fn new(
        http: reqwest::Client,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authority: Self::DEFAULT_AUTHORITY.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// Point the credential at a different authority (sovereign clouds, stubs)
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into().trim_end_matches('/').to_string();
        self
    }

    fn cached_token(&self) -> Option<AccessToken> {
        let guard = self.cached.lock().ok()?;
        let token = guard.as_ref()?;
        let margin = Duration::seconds(Self::EXPIRY_MARGIN_SECS);
        (token.expires_on - margin > Utc::now()).then(|| token.clone())
    }

    async fn request_token(&self) -> ApiResult<AccessToken> {
        let url = format!("{}/{}/oauth2/v2.0/token", self.authority, self.tenant_id);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", MANAGEMENT_SCOPE),
        ];

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("malformed token response: {e}")))?;

        Ok(AccessToken {
            token: token.access_token,
            expires_on: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn token(&self) -> ApiResult<AccessToken> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let token = self.request_token().await?;
        tracing::debug!(expires_on = %token.expires_on, "acquired management token");
        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some(token.clone());
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_credential_returns_its_token() {
        let credential = StaticTokenCredential::new("sekrit");
        let token = credential.token().await.unwrap();
        assert_eq!(token.token, "sekrit");
        assert!(token.expires_on > Utc::now());
    }

    fn client_secret_credential() -> ClientSecretCredential {
        ClientSecretCredential::new(reqwest::Client::new(), "tenant", "client", "secret")
    }

    #[test]
    fn cache_misses_when_empty() {
        let credential = client_secret_credential();
        assert!(credential.cached_token().is_none());
    }

    #[test]
    fn cache_hits_while_token_is_fresh() {
        let credential = client_secret_credential();
        *credential.cached.lock().unwrap() = Some(AccessToken {
            token: "fresh".to_string(),
            expires_on: Utc::now() + Duration::minutes(30),
        });

        let token = credential.cached_token().unwrap();
        assert_eq!(token.token, "fresh");
    }

    #[test]
    fn cache_misses_inside_the_expiry_margin() {
        let credential = client_secret_credential();
        *credential.cached.lock().unwrap() = Some(AccessToken {
            token: "stale".to_string(),
            expires_on: Utc::now() + Duration::seconds(30),
        });

        assert!(credential.cached_token().is_none());
    }

    #[test]
    fn authority_trailing_slash_is_trimmed() {
        let credential = client_secret_credential().with_authority("https://example.test/");
        assert_eq!(credential.authority, "https://example.test");
    }
}
