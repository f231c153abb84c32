use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::document_summary::{DocumentSummary, InvoiceHeader, SummaryItem};
use crate::shared::money::{format2, round2};
use crate::shared::reference::RefValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ID приходной накладной (закупки)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseInvoiceId(pub i64);

impl AggregateId for PurchaseInvoiceId {
    fn value(&self) -> i64 {
        self.0
    }
    fn from_value(value: i64) -> Self {
        Self(value)
    }
}

/// Строка приходной накладной вместе с данными оприходования и возвратов
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseInvoiceLine {
    pub invoice_item_id: i64,

    /// Строка проведённого приходного ордера (GRN); `None`, пока приход не проведён
    #[serde(default)]
    pub grn_item_id: Option<i64>,

    pub product_id: i64,
    pub product_label: String,

    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    pub purchase_price: f64,
    #[serde(default)]
    pub sale_price: f64,

    /// Заказано
    pub quantity: f64,
    /// Бонусное количество
    #[serde(default)]
    pub bonus: f64,

    /// Оприходовано по проведённым ордерам; `None`, если ордеров нет
    #[serde(default)]
    pub received_qty: Option<f64>,

    /// Уже возвращено по действующим возвратам
    #[serde(default)]
    pub returned_qty: f64,
}

impl PurchaseInvoiceLine {
    /// Остаток к возврату по проведённому приходу
    pub fn grn_returnable(&self) -> f64 {
        let received = self.received_qty.unwrap_or(0.0);
        (received - self.returned_qty).max(0.0)
    }

    /// Остаток к возврату по накладной: без ордера считаем, что пришло
    /// заказанное плюс бонус
    pub fn invoice_returnable(&self) -> f64 {
        let received = self
            .received_qty
            .unwrap_or(self.quantity + self.bonus);
        (received - self.returned_qty).max(0.0)
    }

    fn summary_item(&self, returnable: f64) -> SummaryItem {
        SummaryItem {
            grn_item_id: None,
            invoice_item_id: None,
            product_id: self.product_id.to_string(),
            product_label: Some(self.product_label.clone()),
            batch_number: Some(self.batch_number.trim().to_string()),
            expiry_date: Some(
                self.expiry_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            default_qty: Some(returnable),
            max_return_qty: Some(returnable),
            rate: None,
            purchase_price: Some(self.purchase_price),
            sale_price: Some(self.sale_price),
        }
    }
}

/// Приходная накладная (агрегат a001)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub id: PurchaseInvoiceId,

    /// Номер накладной (напр. "PI-000123")
    pub invoice_no: String,

    pub date: NaiveDate,

    pub supplier: RefValue,
    pub warehouse: RefValue,

    /// JSON-массив строк накладной
    pub lines_json: Option<String>,

    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub tax: f64,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl PurchaseInvoice {
    pub fn new(
        id: i64,
        invoice_no: String,
        date: NaiveDate,
        supplier: RefValue,
        warehouse: RefValue,
        lines: Vec<PurchaseInvoiceLine>,
    ) -> Self {
        let lines_json = if lines.is_empty() {
            None
        } else {
            serde_json::to_string(&lines).ok()
        };

        Self {
            id: PurchaseInvoiceId(id),
            invoice_no,
            date,
            supplier,
            warehouse,
            lines_json,
            discount: 0.0,
            tax: 0.0,
            metadata: EntityMetadata::new(),
        }
    }

    /// Десериализовать lines_json в вектор строк
    pub fn try_parse_lines(&self) -> anyhow::Result<Vec<PurchaseInvoiceLine>> {
        match self.lines_json.as_deref() {
            Some(s) => Ok(serde_json::from_str(s)?),
            None => Ok(Vec::new()),
        }
    }

    fn lines_total(lines: &[PurchaseInvoiceLine]) -> f64 {
        round2(
            lines
                .iter()
                .map(|l| round2(l.quantity * l.purchase_price))
                .sum(),
        )
    }

    /// Сводка для возврата поставщику по строкам проведённых приходных ордеров
    ///
    /// Битый `lines_json` даёт ошибку, а не пустой список строк.
    pub fn grn_return_summary(&self) -> anyhow::Result<DocumentSummary> {
        let items = self
            .try_parse_lines()?
            .iter()
            .filter_map(|line| {
                let grn_item_id = line.grn_item_id?;
                let remain = line.grn_returnable();
                if remain <= 0.0 {
                    return None;
                }
                let mut item = line.summary_item(remain);
                item.grn_item_id = Some(grn_item_id.to_string());
                Some(item)
            })
            .collect();

        Ok(DocumentSummary {
            supplier: Some(self.supplier.clone()),
            customer: None,
            warehouse: Some(self.warehouse.clone()),
            invoice: Some(InvoiceHeader {
                id: Some(self.id.as_string()),
                invoice_no: self.invoice_no.clone(),
                date: self.date.format("%Y-%m-%d").to_string(),
                ..Default::default()
            }),
            items,
        })
    }

    /// Сводка для возврата поставщику по строкам накладной (с итогами накладной)
    pub fn invoice_return_summary(&self) -> anyhow::Result<DocumentSummary> {
        let lines = self.try_parse_lines()?;
        let total = Self::lines_total(&lines);
        let items = lines
            .iter()
            .filter_map(|line| {
                let returnable = line.invoice_returnable();
                if returnable <= 0.0 {
                    return None;
                }
                let mut item = line.summary_item(returnable);
                item.invoice_item_id = Some(line.invoice_item_id.to_string());
                Some(item)
            })
            .collect();

        Ok(DocumentSummary {
            supplier: Some(self.supplier.clone()),
            customer: None,
            warehouse: Some(self.warehouse.clone()),
            invoice: Some(InvoiceHeader {
                id: Some(self.id.as_string()),
                invoice_no: self.invoice_no.clone(),
                date: self.date.format("%Y-%m-%d").to_string(),
                total_amount: Some(format2(total)),
                discount: Some(format2(self.discount)),
                tax: Some(format2(self.tax)),
                grand_total: Some(format2(total - self.discount + self.tax)),
            }),
            items,
        })
    }
}

impl AggregateRoot for PurchaseInvoice {
    type Id = PurchaseInvoiceId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn code(&self) -> &str {
        &self.invoice_no
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "purchase_invoice"
    }

    fn element_name() -> &'static str {
        "Приходная накладная"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, grn: Option<i64>, received: Option<f64>, returned: f64) -> PurchaseInvoiceLine {
        PurchaseInvoiceLine {
            invoice_item_id: id,
            grn_item_id: grn,
            product_id: 100 + id,
            product_label: format!("Product {}", id),
            batch_number: " B-1 ".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            purchase_price: 10.5,
            sale_price: 14.0,
            quantity: 5.0,
            bonus: 1.0,
            received_qty: received,
            returned_qty: returned,
        }
    }

    fn invoice(lines: Vec<PurchaseInvoiceLine>) -> PurchaseInvoice {
        PurchaseInvoice::new(
            10,
            "PI-10".to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            RefValue::new("3", "Acme Pharma"),
            RefValue::new("1", "Main"),
            lines,
        )
    }

    #[test]
    fn test_grn_summary_skips_unposted_and_exhausted_lines() {
        let inv = invoice(vec![
            line(1, Some(41), Some(6.0), 2.0),
            line(2, None, None, 0.0),
            line(3, Some(43), Some(3.0), 3.0),
        ]);
        let s = inv.grn_return_summary().unwrap();
        assert_eq!(s.items.len(), 1);
        let item = &s.items[0];
        assert_eq!(item.grn_item_id.as_deref(), Some("41"));
        assert_eq!(item.default_qty, Some(4.0));
        assert_eq!(item.max_return_qty, Some(4.0));
        assert_eq!(item.batch_number.as_deref(), Some("B-1"));
        assert_eq!(item.expiry_date.as_deref(), Some("2026-05-01"));
        assert_eq!(s.counterparty().unwrap().text, "Acme Pharma");
        assert_eq!(s.document_date(), Some("2025-01-31"));
        assert!(s.customer.is_none());
    }

    #[test]
    fn test_invoice_summary_assumes_full_receipt_without_grn() {
        let inv = invoice(vec![line(2, None, None, 1.0)]);
        let s = inv.invoice_return_summary().unwrap();
        assert_eq!(s.items.len(), 1);
        // 5 заказано + 1 бонус - 1 возвращено
        assert_eq!(s.items[0].quantity(), 5.0);
        assert_eq!(s.items[0].invoice_item_id.as_deref(), Some("2"));
        let header = s.invoice.unwrap();
        assert_eq!(header.total_amount.as_deref(), Some("52.50"));
        assert_eq!(header.grand_total.as_deref(), Some("52.50"));
    }

    #[test]
    fn test_returnable_never_negative() {
        let l = line(1, Some(1), Some(2.0), 5.0);
        assert_eq!(l.grn_returnable(), 0.0);
        assert_eq!(l.invoice_returnable(), 0.0);
    }

    #[test]
    fn test_summary_json_uses_supplier_key() {
        let inv = invoice(vec![line(1, Some(41), Some(1.0), 0.0)]);
        let json = serde_json::to_value(inv.grn_return_summary().unwrap()).unwrap();
        assert!(json.get("supplier").is_some());
        assert!(json.get("customer").is_none());
        assert_eq!(json["items"][0]["purchase_price"], serde_json::json!("10.50"));
        assert_eq!(json["items"][0]["sale_price"], serde_json::json!("14.00"));
    }

    #[test]
    fn test_corrupt_lines_fail_summary() {
        let mut inv = invoice(vec![line(1, Some(41), Some(1.0), 0.0)]);
        inv.lines_json = Some("{broken".to_string());
        assert!(inv.grn_return_summary().is_err());
        assert!(inv.invoice_return_summary().is_err());
    }

    #[test]
    fn test_api_path() {
        assert_eq!(PurchaseInvoice::full_name(), "a001_purchase_invoice");
        assert_eq!(PurchaseInvoice::api_path(), "/api/a001/purchase-invoice");
    }
}
