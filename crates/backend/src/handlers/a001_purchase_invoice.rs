use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a001_purchase_invoice::aggregate::PurchaseInvoice;
use contracts::shared::document_summary::{DocumentSummary, InvoiceListQuery, InvoiceOption};
use serde_json::json;

use super::log_status;
use crate::domain::a001_purchase_invoice::service;

/// GET /api/a001/purchase-invoice?search=&limit=
pub async fn list(
    Query(query): Query<InvoiceListQuery>,
) -> Result<Json<Vec<InvoiceOption>>, axum::http::StatusCode> {
    let limit = query.limit.unwrap_or(100);
    service::list_options(query.search.as_deref(), limit)
        .await
        .map(Json)
        .map_err(|e| log_status("Failed to list purchase invoices", e))
}

/// GET /api/a001/purchase-invoice/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<PurchaseInvoice>, axum::http::StatusCode> {
    let id = service::parse_id(&id).map_err(|e| log_status("Bad purchase invoice id", e))?;
    service::get_by_id(id)
        .await
        .map(Json)
        .map_err(|e| log_status(&format!("Failed to get purchase invoice {}", id), e))
}

/// POST /api/a001/purchase-invoice
pub async fn upsert(
    Json(doc): Json<PurchaseInvoice>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    tracing::debug!("Received purchase invoice upsert: id={}", doc.id.0);
    let id = doc.id.0;
    match service::upsert(doc).await {
        Ok(created) => Ok(Json(json!({"id": id, "created": created}))),
        Err(e) => {
            let message = e.to_string();
            let status = log_status("Failed to save purchase invoice", e);
            Err((status, Json(json!({"error": message}))))
        }
    }
}

/// GET /api/a001/purchase-invoice/grn-data/:id/
pub async fn grn_data(
    Path(id): Path<String>,
) -> Result<Json<DocumentSummary>, axum::http::StatusCode> {
    let id = service::parse_id(&id).map_err(|e| log_status("Bad purchase invoice id", e))?;
    service::grn_summary(id)
        .await
        .map(Json)
        .map_err(|e| log_status(&format!("Failed to build GRN summary for {}", id), e))
}

/// GET /api/a001/purchase-invoice/invoice-data/:id/
pub async fn invoice_data(
    Path(id): Path<String>,
) -> Result<Json<DocumentSummary>, axum::http::StatusCode> {
    let id = service::parse_id(&id).map_err(|e| log_status("Bad purchase invoice id", e))?;
    service::invoice_summary(id)
        .await
        .map(Json)
        .map_err(|e| log_status(&format!("Failed to build invoice summary for {}", id), e))
}
