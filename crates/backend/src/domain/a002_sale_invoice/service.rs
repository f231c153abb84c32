use super::repository;
use crate::shared::errors::ServiceError;
use contracts::domain::a002_sale_invoice::aggregate::{SaleInvoice, SaleInvoiceId};
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::document_summary::{DocumentSummary, InvoiceOption};

pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    SaleInvoiceId::from_string(raw)
        .map(|id| id.value())
        .map_err(ServiceError::InvalidId)
}

pub async fn get_by_id(id: i64) -> Result<SaleInvoice, ServiceError> {
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
            counterparty: r.customer_name,
        })
        .collect())
}

fn validate(doc: &SaleInvoice) -> Result<(), ServiceError> {
    if doc.invoice_no.trim().is_empty() {
        return Err(ServiceError::Invalid("invoice_no is required".into()));
    }
    if doc.customer.is_empty() {
        return Err(ServiceError::Invalid("customer is required".into()));
    }
    doc.try_parse_lines()
        .map_err(|e| ServiceError::Invalid(format!("lines_json: {}", e)))?;
    Ok(())
}

pub async fn upsert(mut doc: SaleInvoice) -> Result<bool, ServiceError> {
    validate(&doc)?;
    doc.metadata_mut().touch();
    let created = repository::upsert(&doc).await?;
    tracing::info!(
        "{} {} {}",
        SaleInvoice::element_name(),
        doc.code(),
        if created { "created" } else { "updated" }
    );
    Ok(created)
}

/// Сводка для возврата от покупателя
pub async fn return_summary(id: i64) -> Result<DocumentSummary, ServiceError> {
    let doc = get_by_id(id).await?;
    Ok(doc.return_summary()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::shared::reference::RefValue;

    #[test]
    fn test_validate_requires_customer() {
        let mut doc = SaleInvoice::new(
            5,
            "SI-5".into(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            RefValue::new("9", "Pharmacy 9"),
            RefValue::new("1", "Main"),
            vec![],
        );
        assert!(validate(&doc).is_ok());
        doc.customer = RefValue::default();
        assert!(matches!(validate(&doc), Err(ServiceError::Invalid(_))));
    }
}
