//! Local validation of desired state
//!
//! Everything here is a pure function of its input and runs before any
//! network call is issued.

use std::sync::OnceLock;

use regex::Regex;

use crate::account::StorageBinding;
use crate::client::{StorageAccountEntry, StorageAccountKind};
use crate::error::ValidationError;

/// Pattern for valid media services account names
pub const NAME_PATTERN: &str = "^[-a-z0-9]{3,50}$";

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("NAME_PATTERN is a valid regex"))
}

/// Check an account name against the naming rule
pub fn validate_account_name(name: &str) -> Result<(), ValidationError> {
    if name_regex().is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "name",
            format!(
                "media services account name {name:?} must be 3 - 50 characters long \
                 and contain only lowercase letters, numbers and hyphens"
            ),
        ))
    }
}

/// Expand storage bindings into wire entries, enforcing the one-primary rule
///
/// Every binding that is not primary maps to [`StorageAccountKind::Secondary`];
/// input order is preserved.
pub fn expand_storage_accounts(
    bindings: &[StorageBinding],
) -> Result<Vec<StorageAccountEntry>, ValidationError> {
    let mut entries = Vec::with_capacity(bindings.len());
    let mut primary: Option<&str> = None;

    for binding in bindings {
        let kind = if binding.is_primary {
            if let Some(existing) = primary {
                return Err(ValidationError::new(
                    "storage_account",
                    format!(
                        "multiple primary storage accounts: {existing:?} and {:?}",
                        binding.id
                    ),
                ));
            }
            primary = Some(&binding.id);
            StorageAccountKind::Primary
        } else {
            StorageAccountKind::Secondary
        };

        entries.push(StorageAccountEntry {
            id: binding.id.clone(),
            kind,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_the_pattern() {
        let longest = "a".repeat(50);
        for name in ["ams", "ams-2", "a-0-b", longest.as_str()] {
            assert!(validate_account_name(name).is_ok(), "{name:?}");
        }
    }

    #[test]
    fn rejects_names_outside_the_pattern() {
        let too_long = "a".repeat(51);
        for name in ["ab", too_long.as_str(), "Ams-2", "ams_2", "ams 2", ""] {
            assert!(validate_account_name(name).is_err(), "{name:?}");
        }
    }

    #[test]
    fn name_error_names_the_offending_value() {
        let err = validate_account_name("AMS").unwrap_err();
        assert_eq!(err.path, "name");
        assert!(err.message.contains("AMS"));
    }

    #[test]
    fn empty_binding_set_expands_to_nothing() {
        assert_eq!(expand_storage_accounts(&[]).unwrap(), vec![]);
    }

    #[test]
    fn single_primary_with_secondaries_maps_roles() {
        let bindings = [
            StorageBinding::primary("sa1"),
            StorageBinding::secondary("sa2"),
            StorageBinding::secondary("sa3"),
        ];

        let entries = expand_storage_accounts(&bindings).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, StorageAccountKind::Primary);
        assert_eq!(entries[1].kind, StorageAccountKind::Secondary);
        assert_eq!(entries[2].kind, StorageAccountKind::Secondary);
        // Input order is preserved
        assert_eq!(entries[0].id, "sa1");
        assert_eq!(entries[2].id, "sa3");
    }

    #[test]
    fn all_secondary_bindings_are_valid() {
        let bindings = [
            StorageBinding::secondary("sa1"),
            StorageBinding::secondary("sa2"),
        ];
        assert!(expand_storage_accounts(&bindings).is_ok());
    }

    #[test]
    fn second_primary_is_rejected() {
        let bindings = [
            StorageBinding::primary("sa1"),
            StorageBinding::primary("sa2"),
        ];

        let err = expand_storage_accounts(&bindings).unwrap_err();
        assert!(err.message.contains("multiple primary storage accounts"));
        assert!(err.message.contains("sa1"));
        assert!(err.message.contains("sa2"));
    }
}
