use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a001_purchase_invoice::aggregate::{PurchaseInvoice, PurchaseInvoiceLine};
use contracts::domain::a002_sale_invoice::aggregate::{SaleInvoice, SaleInvoiceLine};
use contracts::shared::reference::RefValue;

use crate::domain::{a001_purchase_invoice, a002_sale_invoice};
use crate::shared::config::Config;

/// Заполнить пустые таблицы демонстрационными накладными (если включено в конфиге)
pub async fn seed_demo_documents(config: &Config) -> Result<()> {
    if !config.seed.demo_documents {
        return Ok(());
    }

    if a001_purchase_invoice::repository::count().await? == 0 {
        let docs = demo_purchase_invoices();
        tracing::info!("Seeding {} demo purchase invoices", docs.len());
        for doc in &docs {
            a001_purchase_invoice::repository::upsert(doc).await?;
        }
    }

    if a002_sale_invoice::repository::count().await? == 0 {
        let docs = demo_sale_invoices();
        tracing::info!("Seeding {} demo sale invoices", docs.len());
        for doc in &docs {
            a002_sale_invoice::repository::upsert(doc).await?;
        }
    }

    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn purchase_line(
    invoice_item_id: i64,
    grn_item_id: Option<i64>,
    product: (i64, &str),
    batch: &str,
    price: (f64, f64),
    quantity: f64,
    received: Option<f64>,
    returned: f64,
) -> PurchaseInvoiceLine {
    PurchaseInvoiceLine {
        invoice_item_id,
        grn_item_id,
        product_id: product.0,
        product_label: product.1.to_string(),
        batch_number: batch.to_string(),
        expiry_date: Some(date(2027, 6, 30)),
        purchase_price: price.0,
        sale_price: price.1,
        quantity,
        bonus: 0.0,
        received_qty: received,
        returned_qty: returned,
    }
}

pub fn demo_purchase_invoices() -> Vec<PurchaseInvoice> {
    let acme = RefValue::new("3", "Acme Pharma");
    let medline = RefValue::new("4", "Medline Distribution");
    let main = RefValue::new("1", "Main warehouse");

    let mut first = PurchaseInvoice::new(
        1001,
        "PI-1001".into(),
        date(2025, 1, 31),
        acme,
        main.clone(),
        vec![
            purchase_line(1, Some(11), (7, "Aspirin 500mg"), "A-17", (10.5, 14.0), 3.0, Some(3.0), 0.0),
            purchase_line(2, Some(12), (8, "Ibuprofen 200mg"), "I-02", (5.0, 7.25), 2.0, Some(2.0), 1.0),
        ],
    );
    first.tax = 2.5;

    let mut second = PurchaseInvoice::new(
        1002,
        "PI-1002".into(),
        date(2025, 2, 14),
        medline,
        main,
        vec![
            purchase_line(3, Some(13), (9, "Bandage 10cm"), "B-88", (1.2, 2.0), 50.0, Some(48.0), 0.0),
            purchase_line(4, None, (10, "Saline 0.9% 500ml"), "S-05", (3.4, 5.1), 20.0, None, 0.0),
            purchase_line(5, Some(14), (11, "Gloves M"), "G-31", (0.35, 0.6), 100.0, Some(100.0), 100.0),
        ],
    );
    second.discount = 10.0;

    vec![first, second]
}

fn sale_line(
    invoice_item_id: i64,
    product: (i64, &str),
    batch: &str,
    rate: f64,
    quantity: f64,
    bonus: f64,
    returned: f64,
) -> SaleInvoiceLine {
    SaleInvoiceLine {
        invoice_item_id,
        product_id: product.0,
        product_label: product.1.to_string(),
        batch_number: batch.to_string(),
        expiry_date: Some(date(2027, 6, 30)),
        rate,
        quantity,
        bonus,
        returned_qty: returned,
    }
}

pub fn demo_sale_invoices() -> Vec<SaleInvoice> {
    let main = RefValue::new("1", "Main warehouse");
    vec![
        SaleInvoice::new(
            2001,
            "SI-2001".into(),
            date(2025, 3, 3),
            RefValue::new("21", "City Pharmacy"),
            main.clone(),
            vec![
                sale_line(1, (7, "Aspirin 500mg"), "A-17", 10.5, 3.0, 0.0, 0.0),
                sale_line(2, (8, "Ibuprofen 200mg"), "I-02", 5.0, 1.0, 0.0, 0.0),
            ],
        ),
        SaleInvoice::new(
            2002,
            "SI-2002".into(),
            date(2025, 3, 10),
            RefValue::new("22", "Riverside Clinic"),
            main,
            vec![
                sale_line(3, (9, "Bandage 10cm"), "B-88", 2.0, 10.0, 2.0, 4.0),
                sale_line(4, (11, "Gloves M"), "G-31", 0.6, 40.0, 0.0, 0.0),
            ],
        ),
    ]
}
