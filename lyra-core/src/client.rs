//! Remote management API seam
//!
//! The reconciler talks to Azure through this trait; the concrete ARM REST
//! client lives in the provider crate, and tests substitute a mock.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::error::ApiResult;

/// Return type for async seam operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Role of a storage account attached to a media services account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAccountKind {
    Primary,
    Secondary,
}

/// One storage account entry in the upsert payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountEntry {
    pub id: String,
    pub kind: StorageAccountKind,
}

/// Payload for the upsert call, already validated and normalized
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceParams {
    pub location: String,
    pub tags: HashMap<String, String>,
    pub storage_accounts: Vec<StorageAccountEntry>,
}

/// What the remote API reports about an account
///
/// Storage accounts are deliberately absent here; reads do not refresh them.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescription {
    /// Remote-assigned resource ID
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub tags: HashMap<String, String>,
}

/// Result of a delete call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The remote reported the account as already gone
    AlreadyAbsent,
}

/// Management-API verbs for media services accounts
///
/// One blocking round trip per call. Implementations map a 404 response to
/// `Ok(None)` / `Ok(AlreadyAbsent)` rather than an error.
pub trait MediaServicesApi: Send + Sync {
    /// Create-if-absent-else-update, returning the remote state
    fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        params: ServiceParams,
    ) -> BoxFuture<'_, ApiResult<ServiceDescription>>;

    /// Fetch the account by name; `None` if it does not exist
    fn get(
        &self,
        resource_group: &str,
        name: &str,
    ) -> BoxFuture<'_, ApiResult<Option<ServiceDescription>>>;

    /// Delete the account by name
    fn delete(
        &self,
        resource_group: &str,
        name: &str,
    ) -> BoxFuture<'_, ApiResult<DeleteOutcome>>;
}
