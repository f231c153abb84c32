//! UseCase u501: автозаполнение документа возврата по документу-основанию

pub mod model;
pub mod view;
pub mod view_model;

pub use view::{ReturnFormPage, ReturnFormView};
pub use view_model::ReturnFormVm;
