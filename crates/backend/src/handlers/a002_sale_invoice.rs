use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a002_sale_invoice::aggregate::SaleInvoice;
use contracts::shared::document_summary::{DocumentSummary, InvoiceListQuery, InvoiceOption};
use serde_json::json;

use super::log_status;
use crate::domain::a002_sale_invoice::service;

/// GET /api/a002/sale-invoice?search=&limit=
pub async fn list(
    Query(query): Query<InvoiceListQuery>,
) -> Result<Json<Vec<InvoiceOption>>, axum::http::StatusCode> {
    service::list_options(query.search.as_deref(), query.limit.unwrap_or(100))
        .await
        .map(Json)
        .map_err(|e| log_status("Failed to list sale invoices", e))
}

/// GET /api/a002/sale-invoice/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<SaleInvoice>, axum::http::StatusCode> {
    let id = service::parse_id(&id).map_err(|e| log_status("Bad sale invoice id", e))?;
    service::get_by_id(id)
        .await
        .map(Json)
        .map_err(|e| log_status(&format!("Failed to get sale invoice {}", id), e))
}

/// POST /api/a002/sale-invoice
pub async fn upsert(
    Json(doc): Json<SaleInvoice>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let id = doc.id.0;
    match service::upsert(doc).await {
        Ok(created) => Ok(Json(json!({"id": id, "created": created}))),
        Err(e) => {
            let message = e.to_string();
            let status = log_status("Failed to save sale invoice", e);
            Err((status, Json(json!({"error": message}))))
        }
    }
}

/// GET /api/a002/sale-invoice/invoice-data/:id/
pub async fn invoice_data(
    Path(id): Path<String>,
) -> Result<Json<DocumentSummary>, axum::http::StatusCode> {
    let id = service::parse_id(&id).map_err(|e| log_status("Bad sale invoice id", e))?;
    service::return_summary(id)
        .await
        .map(Json)
        .map_err(|e| log_status(&format!("Failed to build sale invoice summary for {}", id), e))
}
