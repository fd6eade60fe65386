//! Resource Reconciler - drives a remote media services account toward a
//! desired state and mirrors the observed state back
//!
//! Three idempotent verbs, one remote round trip each. Validation always
//! runs before the network; a 404 on read or delete is control flow, not an
//! error. Retry and backoff belong to the caller.

use crate::account::{MediaServicesAccount, ObservedAccount};
use crate::client::{DeleteOutcome, MediaServicesApi, ServiceParams};
use crate::error::ReconcileError;
use crate::location::normalize_location;
use crate::resource_id;
use crate::validation;

/// Outcome of a read: the remote account, or proof that it is gone
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(ObservedAccount),
    /// The remote reported 404; the caller should drop its local record
    Absent,
}

/// Reconciler for media services accounts
///
/// Stateless apart from the injected client; each call is a pure function of
/// its inputs plus one network round trip.
pub struct Reconciler<C> {
    client: C,
}

impl<C: MediaServicesApi> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Idempotent upsert; returns the remote-assigned resource ID
    pub async fn create_or_update(
        &self,
        desired: &MediaServicesAccount,
    ) -> Result<String, ReconcileError> {
        validation::validate_account_name(&desired.name)?;
        let storage_accounts = validation::expand_storage_accounts(&desired.storage_accounts)?;

        let params = ServiceParams {
            location: normalize_location(&desired.location),
            tags: desired.tags.clone(),
            storage_accounts,
        };

        let service = self
            .client
            .create_or_update(&desired.resource_group, &desired.name, params)
            .await
            .map_err(|e| {
                ReconcileError::remote(
                    format!("error creating media services account {:?}", desired.name),
                    e,
                )
            })?;

        Ok(service.id)
    }

    /// Refresh observed state from the remote API
    pub async fn read(&self, id: &str) -> Result<ReadOutcome, ReconcileError> {
        let account = resource_id::parse_account_id(id)?;

        let service = self
            .client
            .get(&account.resource_group, &account.name)
            .await
            .map_err(|e| {
                ReconcileError::remote(
                    format!("error reading media services account {:?}", account.name),
                    e,
                )
            })?;

        match service {
            Some(service) => Ok(ReadOutcome::Found(ObservedAccount {
                id: service.id,
                name: service.name,
                location: service.location.as_deref().map(normalize_location),
                tags: service.tags,
            })),
            None => {
                tracing::info!(id, "media services account not found, dropping local record");
                Ok(ReadOutcome::Absent)
            }
        }
    }

    /// Delete the remote account; succeeds if it is already gone
    pub async fn delete(&self, id: &str) -> Result<(), ReconcileError> {
        let account = resource_id::parse_account_id(id)?;

        match self
            .client
            .delete(&account.resource_group, &account.name)
            .await
        {
            Ok(DeleteOutcome::Deleted | DeleteOutcome::AlreadyAbsent) => Ok(()),
            Err(e) => Err(ReconcileError::remote(
                format!("error deleting media services account {:?}", account.name),
                e,
            )),
        }
    }
}
