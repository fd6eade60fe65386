//! Account - desired and observed state of a media services account

use std::collections::HashMap;

/// Desired state of a media services account
#[derive(Debug, Clone, PartialEq)]
pub struct MediaServicesAccount {
    /// Account name; immutable after creation
    pub name: String,
    /// Azure region, free-form; normalized before hitting the wire
    pub location: String,
    /// Resource group that contains the account
    pub resource_group: String,
    pub tags: HashMap<String, String>,
    /// Attached storage accounts; at most one may be primary
    pub storage_accounts: Vec<StorageBinding>,
}

impl MediaServicesAccount {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        resource_group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            resource_group: resource_group.into(),
            tags: HashMap::new(),
            storage_accounts: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_storage_account(mut self, binding: StorageBinding) -> Self {
        self.storage_accounts.push(binding);
        self
    }
}

/// A storage account attached to a media services account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageBinding {
    /// Full resource ID of the storage account
    pub id: String,
    /// Whether this is the authoritative storage account
    pub is_primary: bool,
}

impl StorageBinding {
    pub fn primary(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_primary: true,
        }
    }

    pub fn secondary(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_primary: false,
        }
    }
}

/// State observed from the remote API on read
///
/// Storage bindings are not refreshed on read, so drift in bindings made
/// outside this tool is invisible here.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedAccount {
    /// Remote-assigned resource ID
    pub id: String,
    pub name: String,
    /// Normalized location, when the remote reports one
    pub location: Option<String>,
    pub tags: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_tags_and_bindings() {
        let account = MediaServicesAccount::new("ams-2", "UK West", "media-rg")
            .with_tag("environment", "staging")
            .with_storage_account(StorageBinding::primary("sa1"))
            .with_storage_account(StorageBinding::secondary("sa2"));

        assert_eq!(account.tags.get("environment"), Some(&"staging".to_string()));
        assert_eq!(account.storage_accounts.len(), 2);
        assert!(account.storage_accounts[0].is_primary);
        assert!(!account.storage_accounts[1].is_primary);
    }
}
