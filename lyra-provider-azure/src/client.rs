//! ARM REST client for media services accounts

use std::future::Future;
use std::sync::Arc;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use lyra_core::client::{
    BoxFuture, DeleteOutcome, MediaServicesApi, ServiceDescription, ServiceParams,
};
use lyra_core::error::{ApiError, ApiResult};

use crate::auth::TokenCredential;
use crate::wire::{CloudError, MediaService};

/// API version of the Media Services management surface this client speaks
pub const API_VERSION: &str = "2018-07-01";

/// Default ARM endpoint (public cloud)
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// Settings for the ARM client
#[derive(Debug, Clone)]
pub struct ArmClientConfig {
    pub subscription_id: String,
    pub endpoint: String,
}

impl ArmClientConfig {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different ARM endpoint (sovereign clouds, stubs)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

/// [`MediaServicesApi`] implementation over the ARM REST surface
///
/// The cancellation token is the caller's stop signal: a cancelled call
/// returns [`ApiError::Cancelled`] and commits nothing locally.
pub struct ArmMediaServicesClient {
    http: reqwest::Client,
    config: ArmClientConfig,
    credential: Arc<dyn TokenCredential>,
    cancel: CancellationToken,
}

impl ArmMediaServicesClient {
    pub fn new(
        http: reqwest::Client,
        config: ArmClientConfig,
        credential: Arc<dyn TokenCredential>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            http,
            config,
            credential,
            cancel,
        }
    }

    fn account_url(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Media/mediaservices/{}?api-version={}",
            self.config.endpoint, self.config.subscription_id, resource_group, name, API_VERSION
        )
    }

    /// Run a call unless the caller cancels first
    async fn guarded<T>(&self, fut: impl Future<Output = ApiResult<T>>) -> ApiResult<T> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(ApiError::Cancelled),
            result = fut => result,
        }
    }

    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        match response.json::<CloudError>().await {
            Ok(body) => ApiError::Api {
                status,
                code: body.error.code,
                message: body.error.message,
            },
            Err(_) => ApiError::Api {
                status,
                code: String::new(),
                message: "unrecognized error body".to_string(),
            },
        }
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

impl MediaServicesApi for ArmMediaServicesClient {
    fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        params: ServiceParams,
    ) -> BoxFuture<'_, ApiResult<ServiceDescription>> {
        let url = self.account_url(resource_group, name);
        let body = MediaService::from_params(&params);

        Box::pin(async move {
            self.guarded(async {
                tracing::debug!(%url, "PUT media services account");
                let token = self.credential.token().await?;
                let response = self
                    .http
                    .put(&url)
                    .bearer_auth(&token.token)
                    .json(&body)
                    .send()
                    .await
                    .map_err(transport)?;

                if !response.status().is_success() {
                    return Err(Self::error_from_response(response).await);
                }

                let service: MediaService = response.json().await.map_err(transport)?;
                service.into_description().ok_or_else(|| {
                    ApiError::UnexpectedResponse("upsert response carries no resource ID".into())
                })
            })
            .await
        })
    }

    fn get(
        &self,
        resource_group: &str,
        name: &str,
    ) -> BoxFuture<'_, ApiResult<Option<ServiceDescription>>> {
        let url = self.account_url(resource_group, name);

        Box::pin(async move {
            self.guarded(async {
                tracing::debug!(%url, "GET media services account");
                let token = self.credential.token().await?;
                let response = self
                    .http
                    .get(&url)
                    .bearer_auth(&token.token)
                    .send()
                    .await
                    .map_err(transport)?;

                if response.status() == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if !response.status().is_success() {
                    return Err(Self::error_from_response(response).await);
                }

                let service: MediaService = response.json().await.map_err(transport)?;
                match service.into_description() {
                    Some(description) => Ok(Some(description)),
                    None => Err(ApiError::UnexpectedResponse(
                        "get response carries no resource ID".into(),
                    )),
                }
            })
            .await
        })
    }

    fn delete(
        &self,
        resource_group: &str,
        name: &str,
    ) -> BoxFuture<'_, ApiResult<DeleteOutcome>> {
        let url = self.account_url(resource_group, name);

        Box::pin(async move {
            self.guarded(async {
                tracing::debug!(%url, "DELETE media services account");
                let token = self.credential.token().await?;
                let response = self
                    .http
                    .delete(&url)
                    .bearer_auth(&token.token)
                    .send()
                    .await
                    .map_err(transport)?;

                if response.status() == StatusCode::NOT_FOUND {
                    return Ok(DeleteOutcome::AlreadyAbsent);
                }
                if !response.status().is_success() {
                    return Err(Self::error_from_response(response).await);
                }

                Ok(DeleteOutcome::Deleted)
            })
            .await
        })
    }
}
