//! Общие типы документов-оснований

pub mod aggregate_id;
pub mod aggregate_root;
pub mod entity_metadata;

pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
