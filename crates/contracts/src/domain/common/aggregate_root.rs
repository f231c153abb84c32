use super::{AggregateId, EntityMetadata};

/// Документ-основание, по которому оформляется возврат
pub trait AggregateRoot {
    type Id: AggregateId;

    fn id(&self) -> Self::Id;

    /// Номер документа (например, "PI-000123")
    fn code(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "purchase_invoice")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI
    fn element_name() -> &'static str;

    /// Полное имя, оно же имя таблицы: "a001_purchase_invoice"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Префикс маршрутов API: "/api/a001/purchase-invoice"
    fn api_path() -> String {
        format!(
            "/api/{}/{}",
            Self::aggregate_index(),
            Self::collection_name().replace('_', "-")
        )
    }
}
