pub mod api_utils;
pub mod formset_events;
pub mod page_frame;
pub mod page_standard;
pub mod reference_field;
