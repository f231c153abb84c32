pub mod a001_purchase_invoice;
pub mod a002_sale_invoice;

use crate::shared::errors::ServiceError;
use axum::http::StatusCode;

/// Залогировать ошибку сервиса и вернуть соответствующий HTTP-статус
pub(crate) fn log_status(context: &str, e: ServiceError) -> StatusCode {
    let status = e.status();
    if status.is_server_error() {
        tracing::error!("{}: {}", context, e);
    } else {
        tracing::warn!("{}: {}", context, e);
    }
    status
}
