//! JSON-сводка документа-основания для автозаполнения формы возврата
//!
//! Форма ответа `GET <base>/<id>/`:
//! ```json
//! {
//!   "supplier": {"id": 3, "text": "Acme"},      // или "customer"
//!   "warehouse": {"id": 1, "text": "Main"},
//!   "invoice": {"id": 10, "invoice_no": "PI-10", "date": "2025-01-31"},
//!   "items": [{"product_id": 5, "default_qty": 3, "purchase_price": "10.50"}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::reference::RefValue;
use super::serde_helpers::{
    deserialize_id, deserialize_id_option, deserialize_number_option, serialize_money_option,
};

/// Сводка документа-основания
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Поставщик (возврат поставщику)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<RefValue>,

    /// Покупатель (возврат от покупателя)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<RefValue>,

    #[serde(default)]
    pub warehouse: Option<RefValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceHeader>,

    #[serde(default)]
    pub items: Vec<SummaryItem>,
}

impl DocumentSummary {
    /// Контрагент документа: поставщик либо покупатель
    pub fn counterparty(&self) -> Option<&RefValue> {
        self.supplier.as_ref().or(self.customer.as_ref())
    }

    /// Дата документа-основания, если сервер её прислал
    pub fn document_date(&self) -> Option<&str> {
        self.invoice
            .as_ref()
            .map(|inv| inv.date.as_str())
            .filter(|d| !d.is_empty())
    }
}

/// Шапка документа-основания
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceHeader {
    #[serde(default, deserialize_with = "deserialize_id_option")]
    pub id: Option<String>,
    #[serde(default)]
    pub invoice_no: String,
    /// YYYY-MM-DD
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<String>,
}

/// Строка сводки: то, что можно вернуть по строке документа-основания
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryItem {
    /// Строка приходного ордера (только для возврата поставщику)
    #[serde(
        default,
        deserialize_with = "deserialize_id_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub grn_item_id: Option<String>,

    /// Строка накладной (возврат поставщику по накладной и возврат от покупателя)
    #[serde(
        default,
        deserialize_with = "deserialize_id_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_item_id: Option<String>,

    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,

    /// YYYY-MM-DD или пустая строка
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_number_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_qty: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_number_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_return_qty: Option<f64>,

    /// Цена продажи по накладной (возврат от покупателя)
    #[serde(
        default,
        deserialize_with = "deserialize_number_option",
        serialize_with = "serialize_money_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate: Option<f64>,

    /// Закупочная цена (возврат поставщику)
    #[serde(
        default,
        deserialize_with = "deserialize_number_option",
        serialize_with = "serialize_money_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_number_option",
        serialize_with = "serialize_money_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<f64>,
}

impl SummaryItem {
    /// Количество к возврату по умолчанию: `default_qty`, затем `max_return_qty`, затем 0
    pub fn quantity(&self) -> f64 {
        self.default_qty
            .or(self.max_return_qty)
            .filter(|q| q.is_finite())
            .unwrap_or(0.0)
    }

    /// Ссылка на товар для поля выбора
    pub fn product(&self) -> RefValue {
        RefValue::new(
            self.product_id.clone(),
            self.product_label.clone().unwrap_or_default(),
        )
    }

    /// Идентификатор строки-основания (строка прихода приоритетнее строки накладной)
    pub fn source_item_id(&self) -> Option<&str> {
        self.grn_item_id
            .as_deref()
            .or(self.invoice_item_id.as_deref())
    }
}

/// Элемент списка документов-оснований для выбора в шапке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub invoice_no: String,
    pub date: String,
    /// Наименование контрагента
    pub counterparty: String,
}

/// Параметры запроса списка документов-оснований
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_payload_with_string_prices() {
        let json = r#"{
            "invoice": {"id": 10, "invoice_no": "PI-10", "date": "2025-01-31",
                        "total_amount": "120.00", "discount": "0", "tax": "0", "grand_total": "120.00"},
            "supplier": {"id": 3, "text": "Acme Pharma"},
            "warehouse": {"id": 1, "text": "Main"},
            "items": [{
                "grn_item_id": 41, "product_id": 5, "product_label": "Paracetamol",
                "batch_number": "B-1", "expiry_date": "2026-05-01",
                "purchase_price": "10.50", "sale_price": "14.00",
                "max_return_qty": 3, "default_qty": 3
            }]
        }"#;
        let s: DocumentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.counterparty().unwrap().text, "Acme Pharma");
        assert_eq!(s.document_date(), Some("2025-01-31"));
        let item = &s.items[0];
        assert_eq!(item.purchase_price, Some(10.5));
        assert_eq!(item.quantity(), 3.0);
        assert_eq!(item.source_item_id(), Some("41"));
        assert_eq!(item.product(), RefValue::new("5", "Paracetamol"));
    }

    #[test]
    fn test_sale_payload_with_numeric_rate() {
        let json = r#"{
            "customer": {"id": "8", "text": "City Clinic"},
            "warehouse": {"id": 2, "text": "Branch"},
            "items": [
                {"product_id": 1, "default_qty": 3, "rate": 10.5},
                {"product_id": 2, "max_return_qty": 1, "rate": "5"}
            ]
        }"#;
        let s: DocumentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.counterparty().unwrap().id, "8");
        assert!(s.document_date().is_none());
        assert_eq!(s.items[1].quantity(), 1.0);
        assert_eq!(s.items[1].rate, Some(5.0));
    }

    #[test]
    fn test_missing_quantities_default_to_zero() {
        let item: SummaryItem = serde_json::from_str(r#"{"product_id": 1}"#).unwrap();
        assert_eq!(item.quantity(), 0.0);
        assert!(item.source_item_id().is_none());
    }

    #[test]
    fn test_blank_price_is_none() {
        let item: SummaryItem =
            serde_json::from_str(r#"{"product_id": 1, "purchase_price": ""}"#).unwrap();
        assert_eq!(item.purchase_price, None);
    }

    #[test]
    fn test_lenient_fields_do_not_fail_payload() {
        let json = r#"{
            "supplier": {"id": 3, "text": "Acme"},
            "warehouse": {"id": null},
            "items": [{"product_id": 5, "default_qty": 2, "purchase_price": "1,200.00"}]
        }"#;
        let s: DocumentSummary = serde_json::from_str(json).unwrap();
        assert!(s.warehouse.as_ref().unwrap().is_empty());
        assert_eq!(s.items[0].purchase_price, Some(1200.0));
    }

    #[test]
    fn test_prices_serialize_as_strings() {
        let item = SummaryItem {
            product_id: "5".into(),
            rate: Some(10.5),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["rate"], serde_json::json!("10.50"));
        assert!(json.get("purchase_price").is_none());
    }
}
