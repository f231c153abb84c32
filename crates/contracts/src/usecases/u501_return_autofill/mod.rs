//! u501: автозаполнение документа возврата по документу-основанию

pub mod document_kind;
pub mod form;
pub mod line_item;
pub mod totals;

pub use document_kind::{DocumentKind, FailureNotice};
pub use form::{FetchOutcome, FetchTicket, HeaderField, ReturnForm, SelectionChange};
pub use line_item::LineItemRow;
pub use totals::DocumentTotals;
