//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"u501_purchase_return--detail"`) and `data-page-category` with one
//! of the constants below.

/// Index / navigation page.
pub const PAGE_CAT_LIST: &str = "list";

/// Document entry form.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("u501_purchase_return--detail"));
        assert!(!is_valid_page_id("u501_purchase_return"));
        assert!(!is_valid_page_id("--detail"));
    }
}
