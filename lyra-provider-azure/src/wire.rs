//! Wire types for the ARM Media Services REST surface
//!
//! JSON shapes for api-version 2018-07-01. Field names follow the ARM
//! camelCase convention; the storage-account role travels as `type` with the
//! values `Primary` and `Secondary`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lyra_core::client::{
    ServiceDescription, ServiceParams, StorageAccountEntry, StorageAccountKind,
};

/// Upsert request body and GET/PUT response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<MediaServiceProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaServiceProperties {
    #[serde(rename = "storageAccounts", default)]
    pub storage_accounts: Vec<WireStorageAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStorageAccount {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WireStorageAccountType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireStorageAccountType {
    Primary,
    Secondary,
}

impl From<StorageAccountKind> for WireStorageAccountType {
    fn from(kind: StorageAccountKind) -> Self {
        match kind {
            StorageAccountKind::Primary => Self::Primary,
            StorageAccountKind::Secondary => Self::Secondary,
        }
    }
}

impl From<&StorageAccountEntry> for WireStorageAccount {
    fn from(entry: &StorageAccountEntry) -> Self {
        Self {
            id: entry.id.clone(),
            kind: entry.kind.into(),
        }
    }
}

impl MediaService {
    /// Build the upsert body from validated seam params
    pub fn from_params(params: &ServiceParams) -> Self {
        Self {
            id: None,
            name: None,
            location: Some(params.location.clone()),
            tags: params.tags.clone(),
            properties: Some(MediaServiceProperties {
                storage_accounts: params.storage_accounts.iter().map(Into::into).collect(),
            }),
        }
    }

    /// Convert a response body into the seam's description
    ///
    /// Returns `None` when the body carries no resource ID, which a
    /// well-formed ARM response always has.
    pub fn into_description(self) -> Option<ServiceDescription> {
        let id = self.id?;
        Some(ServiceDescription {
            id,
            name: self.name.unwrap_or_default(),
            location: self.location,
            tags: self.tags,
        })
    }
}

/// ARM error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct CloudError {
    pub error: CloudErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
