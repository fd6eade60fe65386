//! Location normalization helpers

/// Normalize an Azure location string: lowercase with whitespace removed
/// (e.g. "UK West" -> "ukwest"). Azure treats the display and programmatic
/// forms as the same region.
pub fn normalize_location(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_form_collapses_to_programmatic_form() {
        assert_eq!(normalize_location("UK West"), "ukwest");
        assert_eq!(normalize_location("West US 2"), "westus2");
    }

    #[test]
    fn programmatic_form_is_unchanged() {
        assert_eq!(normalize_location("westus"), "westus");
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        assert_eq!(normalize_location("  North Europe "), "northeurope");
    }
}
