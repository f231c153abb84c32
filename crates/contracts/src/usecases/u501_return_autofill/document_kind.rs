use serde::{Deserialize, Serialize};

/// Как сообщать пользователю об ошибке загрузки сводки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureNotice {
    /// Запись в консоль и блокирующий alert
    ConsoleAndAlert,
    /// Только запись в консоль
    ConsoleOnly,
}

/// Вид документа возврата, который заполняется по документу-основанию
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Возврат поставщику по приходной накладной
    #[default]
    PurchaseReturn,
    /// Возврат от покупателя по расходной накладной
    SaleReturn,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::PurchaseReturn, DocumentKind::SaleReturn];

    /// Префикс формсета строк
    pub fn formset_prefix(&self) -> &'static str {
        "items"
    }

    /// Поле шапки для контрагента
    pub fn counterparty_field(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "supplier",
            DocumentKind::SaleReturn => "customer",
        }
    }

    /// Поле цены в строке
    pub fn price_field(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "purchase_price",
            DocumentKind::SaleReturn => "rate",
        }
    }

    /// Поле ссылки на строку-основание
    pub fn source_item_field(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "grn_item",
            DocumentKind::SaleReturn => "invoice_item",
        }
    }

    /// Есть ли в строке цена продажи
    pub fn has_sale_price(&self) -> bool {
        matches!(self, DocumentKind::PurchaseReturn)
    }

    /// Базовый путь JSON-сводки документа-основания (без id)
    pub fn summary_base(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "/api/a001/purchase-invoice/grn-data",
            DocumentKind::SaleReturn => "/api/a002/sale-invoice/invoice-data",
        }
    }

    /// `<base>/<documentId>/`
    pub fn summary_path(&self, document_id: &str) -> String {
        build_summary_path(self.summary_base(), document_id)
    }

    /// Список документов-оснований для выбора в шапке
    pub fn options_path(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "/api/a001/purchase-invoice",
            DocumentKind::SaleReturn => "/api/a002/sale-invoice",
        }
    }

    pub fn failure_notice(&self) -> FailureNotice {
        match self {
            DocumentKind::PurchaseReturn => FailureNotice::ConsoleAndAlert,
            DocumentKind::SaleReturn => FailureNotice::ConsoleOnly,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "Не удалось загрузить строки прихода по выбранной накладной.",
            DocumentKind::SaleReturn => "Не удалось загрузить строки выбранной накладной.",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "Возврат поставщику",
            DocumentKind::SaleReturn => "Возврат от покупателя",
        }
    }

    pub fn counterparty_label(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "Поставщик",
            DocumentKind::SaleReturn => "Покупатель",
        }
    }

    /// Маршрут страницы новой формы
    pub fn route(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseReturn => "/purchase-returns/new",
            DocumentKind::SaleReturn => "/sale-returns/new",
        }
    }
}

/// Склеить базовый путь и id: лишний завершающий `/` базы отбрасывается
pub fn build_summary_path(base: &str, document_id: &str) -> String {
    format!("{}/{}/", base.trim_end_matches('/'), document_id.trim())
}
