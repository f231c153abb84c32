use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::document_summary::{DocumentSummary, InvoiceHeader, SummaryItem};
use crate::shared::reference::RefValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ID расходной накладной (продажи)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleInvoiceId(pub i64);

impl AggregateId for SaleInvoiceId {
    fn value(&self) -> i64 {
        self.0
    }
    fn from_value(value: i64) -> Self {
        Self(value)
    }
}

/// Строка расходной накладной
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleInvoiceLine {
    pub invoice_item_id: i64,
    pub product_id: i64,
    pub product_label: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Цена продажи
    pub rate: f64,
    pub quantity: f64,
    #[serde(default)]
    pub bonus: f64,
    /// Уже возвращено покупателем по действующим возвратам
    #[serde(default)]
    pub returned_qty: f64,
}

impl SaleInvoiceLine {
    /// Отгружено (пока нет учёта доставки: заказано плюс бонус)
    pub fn delivered_qty(&self) -> f64 {
        self.quantity + self.bonus
    }

    pub fn returnable(&self) -> f64 {
        (self.delivered_qty() - self.returned_qty).max(0.0)
    }
}

/// Расходная накладная (агрегат a002)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInvoice {
    pub id: SaleInvoiceId,
    pub invoice_no: String,
    pub date: NaiveDate,
    pub customer: RefValue,
    pub warehouse: RefValue,
    /// JSON-массив строк накладной
    pub lines_json: Option<String>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl SaleInvoice {
    pub fn new(
        id: i64,
        invoice_no: String,
        date: NaiveDate,
        customer: RefValue,
        warehouse: RefValue,
        lines: Vec<SaleInvoiceLine>,
    ) -> Self {
        let lines_json = if lines.is_empty() {
            None
        } else {
            serde_json::to_string(&lines).ok()
        };
        Self {
            id: SaleInvoiceId(id),
            invoice_no,
            date,
            customer,
            warehouse,
            lines_json,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn try_parse_lines(&self) -> anyhow::Result<Vec<SaleInvoiceLine>> {
        match self.lines_json.as_deref() {
            Some(s) => Ok(serde_json::from_str(s)?),
            None => Ok(Vec::new()),
        }
    }

    /// Сводка для возврата от покупателя
    pub fn return_summary(&self) -> anyhow::Result<DocumentSummary> {
        let items = self
            .try_parse_lines()?
            .iter()
            .filter(|line| line.returnable() > 0.0)
            .map(|line| {
                let returnable = line.returnable();
                SummaryItem {
                    invoice_item_id: Some(line.invoice_item_id.to_string()),
                    product_id: line.product_id.to_string(),
                    product_label: Some(line.product_label.clone()),
                    batch_number: Some(line.batch_number.trim().to_string()),
                    expiry_date: Some(
                        line.expiry_date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                    ),
                    default_qty: Some(returnable),
                    max_return_qty: Some(returnable),
                    rate: Some(line.rate),
                    ..Default::default()
                }
            })
            .collect();

        Ok(DocumentSummary {
            supplier: None,
            customer: Some(self.customer.clone()),
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
}

impl AggregateRoot for SaleInvoice {
    type Id = SaleInvoiceId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "sale_invoice"
    }

    fn element_name() -> &'static str {
        "Расходная накладная"
    }
}
