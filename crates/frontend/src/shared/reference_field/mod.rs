//! Ссылочное поле формы
//!
//! Обычный `<select>`, привязанный к типу через `SelectableReference`:
//!
//! ```ignore
//! view! {
//!     <ReferenceSelect
//!         id="id_warehouse".to_string()
//!         name="warehouse".to_string()
//!         options=warehouses
//!         selected=selected_warehouse
//!         on_change=Callback::new(move |id: Option<String>| { /* ... */ })
//!     />
//! }
//! ```

pub mod component;
pub mod traits;

pub use component::ReferenceSelect;
pub use traits::{option_pairs, SelectableReference};
