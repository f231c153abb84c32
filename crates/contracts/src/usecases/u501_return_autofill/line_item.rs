use super::document_kind::DocumentKind;
use crate::shared::document_summary::SummaryItem;
use crate::shared::formset::FormRowData;
use crate::shared::money::{format2, line_amount, to_num};
use crate::shared::reference::RefValue;

/// Строка документа возврата. Значения хранятся текстом полей ввода.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemRow {
    pub kind: DocumentKind,
    pub product: Option<RefValue>,
    /// Строка-основание (строка прихода или накладной)
    pub source_item: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub quantity: String,
    pub price: String,
    /// Только для возврата поставщику
    pub sale_price: String,
    pub amount: String,
}

/// Количество как в поле ввода: целое без дробной части
pub fn format_qty(qty: f64) -> String {
    if !qty.is_finite() {
        return "0".to_string();
    }
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        qty.to_string()
    }
}

impl LineItemRow {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Заполнить строку из строки сводки (все поля перезаписываются)
    pub fn fill_from(&mut self, kind: DocumentKind, item: &SummaryItem) {
        let qty = item.quantity();
        let price = match kind {
            DocumentKind::PurchaseReturn => item.purchase_price.or(item.rate),
            DocumentKind::SaleReturn => item.rate.or(item.purchase_price),
        }
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);

        *self = Self {
            kind,
            product: Some(item.product()),
            source_item: item.source_item_id().unwrap_or_default().to_string(),
            batch_number: item.batch_number.clone().unwrap_or_default(),
            expiry_date: item.expiry_date.clone().unwrap_or_default(),
            quantity: format_qty(qty),
            price: format2(price),
            sale_price: if kind.has_sale_price() {
                format2(item.sale_price.unwrap_or(0.0))
            } else {
                String::new()
            },
            amount: format2(line_amount(qty, price)),
        };
    }

    pub fn quantity_value(&self) -> f64 {
        to_num(&self.quantity)
    }

    pub fn price_value(&self) -> f64 {
        to_num(&self.price)
    }

    pub fn amount_value(&self) -> f64 {
        to_num(&self.amount)
    }

    /// Пересчитать сумму строки из количества и цены
    pub fn recalc_amount(&mut self) {
        self.amount = format2(line_amount(self.quantity_value(), self.price_value()));
    }

    /// Записать значение поля по имени. Возвращает `false` для незнакомого поля.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "quantity" => self.quantity = value,
            "amount" => self.amount = value,
            "batch_number" => self.batch_number = value,
            "expiry_date" => self.expiry_date = value,
            "sale_price" if self.kind.has_sale_price() => self.sale_price = value,
            "product" => {
                self.product = if value.is_empty() {
                    None
                } else {
                    Some(RefValue::new(value, String::new()))
                }
            }
            f if f == self.kind.price_field() => self.price = value,
            f if f == self.kind.source_item_field() => self.source_item = value,
            _ => return false,
        }
        true
    }
}

impl FormRowData for LineItemRow {
    fn post_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (
                self.kind.source_item_field(),
                self.source_item.clone(),
            ),
            (
                "product",
                self.product
                    .as_ref()
                    .map(|p| p.id.clone())
                    .unwrap_or_default(),
            ),
            ("batch_number", self.batch_number.clone()),
            ("expiry_date", self.expiry_date.clone()),
            ("quantity", self.quantity.clone()),
            (self.kind.price_field(), self.price.clone()),
        ];
        if self.kind.has_sale_price() {
            fields.push(("sale_price", self.sale_price.clone()));
        }
        fields.push(("amount", self.amount.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> SummaryItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_fill_sale_row() {
        let mut row = LineItemRow::default();
        row.fill_from(
            DocumentKind::SaleReturn,
            &item(r#"{"product_id": 1, "invoice_item_id": 9, "default_qty": 3, "rate": 10.5}"#),
        );
        assert_eq!(row.quantity, "3");
        assert_eq!(row.price, "10.50");
        assert_eq!(row.amount, "31.50");
        assert_eq!(row.source_item, "9");
        assert_eq!(row.sale_price, "");
        assert_eq!(row.product.as_ref().unwrap().label(), "#1");
    }

    #[test]
    fn test_fill_purchase_row() {
        let mut row = LineItemRow::default();
        row.fill_from(
            DocumentKind::PurchaseReturn,
            &item(
                r#"{"grn_item_id": 41, "product_id": 5, "product_label": "Paracetamol",
                    "batch_number": "B-1", "expiry_date": "2026-05-01",
                    "purchase_price": "2.25", "sale_price": "3", "max_return_qty": 4}"#,
            ),
        );
        assert_eq!(row.quantity, "4");
        assert_eq!(row.price, "2.25");
        assert_eq!(row.sale_price, "3.00");
        assert_eq!(row.amount, "9.00");
        assert_eq!(row.batch_number, "B-1");
        assert_eq!(row.expiry_date, "2026-05-01");
    }

    #[test]
    fn test_fill_overwrites_previous_values() {
        let mut row = LineItemRow::new(DocumentKind::SaleReturn);
        row.batch_number = "OLD".to_string();
        row.fill_from(DocumentKind::SaleReturn, &item(r#"{"product_id": 2}"#));
        assert_eq!(row.batch_number, "");
        assert_eq!(row.quantity, "0");
        assert_eq!(row.amount, "0.00");
    }

    #[test]
    fn test_recalc_amount() {
        let mut row = LineItemRow::new(DocumentKind::PurchaseReturn);
        row.quantity = "2".to_string();
        row.price = "1,000.125".to_string();
        row.recalc_amount();
        assert_eq!(row.amount, "2000.25");

        row.quantity = "abc".to_string();
        row.recalc_amount();
        assert_eq!(row.amount, "0.00");
    }

    #[test]
    fn test_set_field_respects_kind() {
        let mut row = LineItemRow::new(DocumentKind::SaleReturn);
        assert!(row.set_field("rate", "4".to_string()));
        assert_eq!(row.price, "4");
        assert!(!row.set_field("purchase_price", "5".to_string()));
        assert!(!row.set_field("sale_price", "5".to_string()));
        assert!(!row.set_field("unknown", "1".to_string()));
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty(3.0), "3");
        assert_eq!(format_qty(2.5), "2.5");
        assert_eq!(format_qty(f64::NAN), "0");
    }
}
