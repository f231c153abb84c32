use axum::{routing::get, Router};
use contracts::domain::a001_purchase_invoice::aggregate::PurchaseInvoice;
use contracts::domain::a002_sale_invoice::aggregate::SaleInvoice;
use contracts::domain::common::AggregateRoot;

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let a001 = PurchaseInvoice::api_path();
    let a002 = SaleInvoice::api_path();

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Purchase invoice handlers
        .route(
            &a001,
            get(handlers::a001_purchase_invoice::list).post(handlers::a001_purchase_invoice::upsert),
        )
        .route(
            &format!("{}/:id", a001),
            get(handlers::a001_purchase_invoice::get_by_id),
        )
        .route(
            &format!("{}/grn-data/:id/", a001),
            get(handlers::a001_purchase_invoice::grn_data),
        )
        .route(
            &format!("{}/invoice-data/:id/", a001),
            get(handlers::a001_purchase_invoice::invoice_data),
        )
        // A002 Sale invoice handlers
        .route(
            &a002,
            get(handlers::a002_sale_invoice::list).post(handlers::a002_sale_invoice::upsert),
        )
        .route(
            &format!("{}/:id", a002),
            get(handlers::a002_sale_invoice::get_by_id),
        )
        .route(
            &format!("{}/invoice-data/:id/", a002),
            get(handlers::a002_sale_invoice::invoice_data),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_purchase_invoice::repository;
    use crate::shared::data::db::initialize_database;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use contracts::domain::a001_purchase_invoice::aggregate::PurchaseInvoiceLine;
    use contracts::shared::reference::RefValue;
    use tower::ServiceExt;

    async fn call(router: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
            None => Body::empty(),
        };
        let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn invoice(id: i64) -> PurchaseInvoice {
        PurchaseInvoice::new(
            id,
            format!("PI-{}", id),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            RefValue::new("3", "Acme"),
            RefValue::new("1", "Main"),
            vec![PurchaseInvoiceLine {
                invoice_item_id: 1,
                grn_item_id: Some(41),
                product_id: 5,
                product_label: "Paracetamol".into(),
                batch_number: "B-1".into(),
                expiry_date: None,
                purchase_price: 10.5,
                sale_price: 14.0,
                quantity: 3.0,
                bonus: 0.0,
                received_qty: Some(3.0),
                returned_qty: 0.0,
            }],
        )
    }

    // Один тест на процесс: соединение с БД глобальное
    #[tokio::test]
    async fn test_summary_routes() {
        let db_file = std::env::temp_dir().join(format!("returns-routes-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&db_file);
        initialize_database(&db_file).await.unwrap();
        let router = configure_routes();
        let a001 = PurchaseInvoice::api_path();
        let a002 = SaleInvoice::api_path();

        let (status, _) = call(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let doc = serde_json::to_value(invoice(10)).unwrap();
        let (status, body) = call(&router, "POST", &a001, Some(doc)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["created"], serde_json::json!(true));

        let (status, body) = call(&router, "GET", &format!("{}/grn-data/10/", a001), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["supplier"]["text"], serde_json::json!("Acme"));
        assert_eq!(body["items"][0]["grn_item_id"], serde_json::json!("41"));
        assert_eq!(body["items"][0]["purchase_price"], serde_json::json!("10.50"));

        let (status, body) = call(&router, "GET", &format!("{}/invoice-data/10/", a001), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["invoice"]["total_amount"], serde_json::json!("31.50"));

        let (status, _) = call(&router, "GET", &format!("{}/grn-data/999/", a001), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&router, "GET", &format!("{}/grn-data/abc/", a001), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&router, "GET", &format!("{}/invoice-data/999/", a002), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&router, "GET", &format!("{}/invoice-data/x/", a002), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // битые строки в БД: 500, а не пустой список
        let mut broken = invoice(11);
        broken.lines_json = Some("{broken".into());
        repository::upsert(&broken).await.unwrap();
        let (status, _) = call(&router, "GET", &format!("{}/grn-data/11/", a001), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let _ = std::fs::remove_file(&db_file);
    }
}
