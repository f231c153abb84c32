pub mod document_summary;
pub mod formset;
pub mod money;
pub mod reference;
pub mod serde_helpers;
