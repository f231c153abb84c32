use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use contracts::domain::a001_purchase_invoice::aggregate::{PurchaseInvoice, PurchaseInvoiceId};
use contracts::domain::common::EntityMetadata;
use contracts::shared::reference::RefValue;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_purchase_invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub invoice_no: String,
    pub date: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub lines_json: Option<String>,
    pub discount: f64,
    pub tax: f64,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for PurchaseInvoice {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&m.date, "%Y-%m-%d")
            .with_context(|| format!("invoice {}: bad date '{}'", m.id, m.date))?;
        Ok(PurchaseInvoice {
            id: PurchaseInvoiceId(m.id),
            invoice_no: m.invoice_no,
            date,
            supplier: RefValue::new(m.supplier_id, m.supplier_name),
            warehouse: RefValue::new(m.warehouse_id, m.warehouse_name),
            lines_json: m.lines_json,
            discount: m.discount,
            tax: m.tax,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                is_posted: m.is_posted,
                version: m.version,
            },
        })
    }
}

/// Строка списка для выбора накладной в шапке возврата
#[derive(Debug, Clone)]
pub struct PurchaseInvoiceListRow {
    pub id: i64,
    pub invoice_no: String,
    pub date: String,
    pub supplier_name: String,
}

pub async fn get_by_id(id: i64) -> Result<Option<PurchaseInvoice>> {
    let db = get_connection()?;
    match Entity::find_by_id(id).one(db).await? {
        Some(m) => Ok(Some(m.try_into()?)),
        None => Ok(None),
    }
}

/// Список накладных, новые сверху; `search` ищет по номеру и поставщику
pub async fn list(search: Option<&str>, limit: u64) -> Result<Vec<PurchaseInvoiceListRow>> {
    let db = get_connection()?;
    let mut query = Entity::find();
    if let Some(s) = search.map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Column::InvoiceNo.contains(s))
                .add(Column::SupplierName.contains(s)),
        );
    }
    let rows = query
        .order_by_desc(Column::Date)
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|m| PurchaseInvoiceListRow {
            id: m.id,
            invoice_no: m.invoice_no,
            date: m.date,
            supplier_name: m.supplier_name,
        })
        .collect())
}

pub async fn count() -> Result<u64> {
    let db = get_connection()?;
    Ok(Entity::find().count(db).await?)
}

/// Upsert накладной по ID
/// Возвращает true если запись была создана (insert), false если обновлена (update)
pub async fn upsert(doc: &PurchaseInvoice) -> Result<bool> {
    let db = get_connection()?;
    let existing = Entity::find_by_id(doc.id.0).one(db).await?;

    let mut active_model = ActiveModel {
        id: Set(doc.id.0),
        invoice_no: Set(doc.invoice_no.clone()),
        date: Set(doc.date.format("%Y-%m-%d").to_string()),
        supplier_id: Set(doc.supplier.id.clone()),
        supplier_name: Set(doc.supplier.text.clone()),
        warehouse_id: Set(doc.warehouse.id.clone()),
        warehouse_name: Set(doc.warehouse.text.clone()),
        lines_json: Set(doc.lines_json.clone()),
        discount: Set(doc.discount),
        tax: Set(doc.tax),
        is_posted: Set(doc.metadata.is_posted),
        updated_at: Set(Some(Utc::now())),
        ..Default::default()
    };

    match existing {
        Some(prev) => {
            active_model.version = Set(prev.version + 1);
            Entity::update(active_model).exec(db).await?;
            Ok(false)
        }
        None => {
            active_model.created_at = Set(Some(Utc::now()));
            active_model.version = Set(1);
            Entity::insert(active_model).exec(db).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(date: &str) -> Model {
        Model {
            id: 10,
            invoice_no: "PI-10".into(),
            date: date.into(),
            supplier_id: "3".into(),
            supplier_name: "Acme".into(),
            warehouse_id: "1".into(),
            warehouse_name: "Main".into(),
            lines_json: None,
            discount: 0.0,
            tax: 0.0,
            is_posted: true,
            created_at: None,
            updated_at: None,
            version: 2,
        }
    }

    #[test]
    fn test_model_converts_to_aggregate() {
        let inv: PurchaseInvoice = model("2025-01-31").try_into().unwrap();
        assert_eq!(inv.id, PurchaseInvoiceId(10));
        assert_eq!(inv.supplier, RefValue::new("3", "Acme"));
        assert!(inv.metadata.is_posted);
        assert_eq!(inv.metadata.version, 2);
    }

    #[test]
    fn test_bad_date_is_error() {
        let res: Result<PurchaseInvoice> = model("31.01.2025").try_into();
        assert!(res.is_err());
    }
}
