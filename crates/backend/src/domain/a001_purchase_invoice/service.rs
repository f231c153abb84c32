use super::repository;
use crate::shared::errors::ServiceError;
use contracts::domain::a001_purchase_invoice::aggregate::{PurchaseInvoice, PurchaseInvoiceId};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::document_summary::{DocumentSummary, InvoiceOption};

/// Разобрать ID из пути запроса
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    PurchaseInvoiceId::from_string(raw)
        .map(|id| id.value())
        .map_err(ServiceError::InvalidId)
}

pub async fn get_by_id(id: i64) -> Result<PurchaseInvoice, ServiceError> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))
}

pub async fn list_options(
    search: Option<&str>,
    limit: usize,
) -> Result<Vec<InvoiceOption>, ServiceError> {
    let rows = repository::list(search, limit.clamp(1, 500) as u64).await?;
    Ok(rows
        .into_iter()
        .map(|r| InvoiceOption {
            id: r.id.to_string(),
            invoice_no: r.invoice_no,
            date: r.date,
            counterparty: r.supplier_name,
        })
        .collect())
}

fn validate(doc: &PurchaseInvoice) -> Result<(), ServiceError> {
    if doc.invoice_no.trim().is_empty() {
        return Err(ServiceError::Invalid("invoice_no is required".into()));
    }
    if doc.supplier.is_empty() {
        return Err(ServiceError::Invalid("supplier is required".into()));
    }
    let lines = doc
        .try_parse_lines()
        .map_err(|e| ServiceError::Invalid(format!("lines_json: {}", e)))?;
    if lines.iter().any(|l| l.quantity < 0.0 || l.purchase_price < 0.0) {
        return Err(ServiceError::Invalid("negative quantity or price".into()));
    }
    Ok(())
}

/// Сохранить накладную; true если создана новая
pub async fn upsert(mut doc: PurchaseInvoice) -> Result<bool, ServiceError> {
    validate(&doc)?;
    doc.metadata_mut().touch();
    let created = repository::upsert(&doc).await?;
    tracing::info!(
        "{} {} {}",
        PurchaseInvoice::element_name(),
        doc.code(),
        if created { "created" } else { "updated" }
    );
    Ok(created)
}

/// Сводка по проведённым приходным ордерам накладной
pub async fn grn_summary(id: i64) -> Result<DocumentSummary, ServiceError> {
    let doc = get_by_id(id).await?;
    Ok(doc.grn_return_summary()?)
}

/// Сводка по строкам накладной с её итогами
pub async fn invoice_summary(id: i64) -> Result<DocumentSummary, ServiceError> {
    let doc = get_by_id(id).await?;
    Ok(doc.invoice_return_summary()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_purchase_invoice::aggregate::PurchaseInvoiceLine;
    use contracts::shared::reference::RefValue;

    fn doc(invoice_no: &str, price: f64) -> PurchaseInvoice {
        PurchaseInvoice::new(
            1,
            invoice_no.into(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            RefValue::new("3", "Acme"),
            RefValue::new("1", "Main"),
            vec![PurchaseInvoiceLine {
                invoice_item_id: 1,
                grn_item_id: None,
                product_id: 7,
                product_label: "Aspirin".into(),
                batch_number: String::new(),
                expiry_date: None,
                purchase_price: price,
                sale_price: 0.0,
                quantity: 2.0,
                bonus: 0.0,
                received_qty: None,
                returned_qty: 0.0,
            }],
        )
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ServiceError::InvalidId(_))));
    }

    #[test]
    fn test_validate() {
        assert!(validate(&doc("PI-1", 10.0)).is_ok());
        assert!(matches!(validate(&doc(" ", 10.0)), Err(ServiceError::Invalid(_))));
        assert!(matches!(validate(&doc("PI-1", -1.0)), Err(ServiceError::Invalid(_))));

        let mut broken = doc("PI-1", 10.0);
        broken.lines_json = Some("{not json".into());
        assert!(matches!(validate(&broken), Err(ServiceError::Invalid(_))));
    }
}
