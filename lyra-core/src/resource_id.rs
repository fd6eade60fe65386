//! Parsing of Azure resource ID strings
//!
//! IDs have the shape
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}/...`
//! with key/value segment pairs. Key segments are matched case-insensitively
//! because Azure emits both `resourceGroups` and `resourcegroups`.

use crate::error::ValidationError;

/// A parsed ARM resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    pub provider_namespace: String,
    /// Remaining (type, name) segment pairs under the provider, in order
    pub path: Vec<(String, String)>,
}

impl ResourceId {
    /// Parse a resource ID string into its components
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let malformed =
            |why: &str| ValidationError::new("id", format!("malformed resource ID {raw:?}: {why}"));

        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| malformed("must start with '/'"))?;

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("empty path segment"));
        }
        if segments.len() % 2 != 0 {
            return Err(malformed("expected key/value segment pairs"));
        }

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut provider_namespace = None;
        let mut path = Vec::new();

        for pair in segments.chunks(2) {
            let (key, value) = (pair[0], pair[1]);
            match key.to_ascii_lowercase().as_str() {
                "subscriptions" => subscription_id = Some(value),
                "resourcegroups" => resource_group = Some(value),
                "providers" => provider_namespace = Some(value),
                _ => path.push((key.to_string(), value.to_string())),
            }
        }

        Ok(Self {
            subscription_id: subscription_id
                .ok_or_else(|| malformed("missing subscriptions segment"))?
                .to_string(),
            resource_group: resource_group
                .ok_or_else(|| malformed("missing resourceGroups segment"))?
                .to_string(),
            provider_namespace: provider_namespace
                .ok_or_else(|| malformed("missing providers segment"))?
                .to_string(),
            path,
        })
    }

    /// Look up the value under a type segment, e.g. `mediaservices`
    pub fn path_value(&self, key: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Identity of a media services account extracted from a resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId {
    pub resource_group: String,
    pub name: String,
}

/// Parse a full resource ID and extract the media services account identity
pub fn parse_account_id(raw: &str) -> Result<AccountId, ValidationError> {
    let id = ResourceId::parse(raw)?;
    let name = id.path_value("mediaservices").ok_or_else(|| {
        ValidationError::new(
            "id",
            format!("resource ID {raw:?} has no mediaservices segment"),
        )
    })?;

    Ok(AccountId {
        resource_group: id.resource_group.clone(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT_ID: &str = "/subscriptions/7060bca0-7a3c-44bd-b54c-4bb1e9facfac\
        /resourceGroups/media-rg/providers/Microsoft.Media/mediaservices/ams-2";

    #[test]
    fn parses_account_id() {
        let parsed = parse_account_id(ACCOUNT_ID).unwrap();
        assert_eq!(parsed.resource_group, "media-rg");
        assert_eq!(parsed.name, "ams-2");
    }

    #[test]
    fn key_segments_match_case_insensitively() {
        // Azure emits lowercase "resourcegroups" in some IDs
        let id = "/subscriptions/7060bca0-7a3c-44bd-b54c-4bb1e9facfac\
            /resourcegroups/media-rg/providers/Microsoft.Storage/storageAccounts/mediasa1";
        let parsed = ResourceId::parse(id).unwrap();
        assert_eq!(parsed.resource_group, "media-rg");
        assert_eq!(parsed.path_value("storageaccounts"), Some("mediasa1"));
    }

    #[test]
    fn value_case_is_preserved() {
        let parsed = ResourceId::parse(ACCOUNT_ID).unwrap();
        assert_eq!(parsed.provider_namespace, "Microsoft.Media");
    }

    #[test]
    fn rejects_missing_leading_slash() {
        let err = ResourceId::parse("subscriptions/abc/resourceGroups/rg").unwrap_err();
        assert!(err.message.contains("malformed resource ID"));
    }

    #[test]
    fn rejects_odd_segment_count() {
        let err = ResourceId::parse("/subscriptions/abc/resourceGroups").unwrap_err();
        assert!(err.message.contains("key/value"));
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(ResourceId::parse("/subscriptions//resourceGroups/rg").is_err());
        assert!(ResourceId::parse(
            "/subscriptions/abc/resourceGroups/rg/providers/Microsoft.Media/mediaservices/a/"
        )
        .is_err());
    }

    #[test]
    fn error_carries_original_string() {
        let err = parse_account_id("not-an-id").unwrap_err();
        assert!(err.message.contains("not-an-id"));
    }

    #[test]
    fn rejects_id_without_mediaservices_segment() {
        let id = "/subscriptions/abc/resourceGroups/rg\
            /providers/Microsoft.Storage/storageAccounts/sa1";
        let err = parse_account_id(id).unwrap_err();
        assert!(err.message.contains("mediaservices"));
    }
}
