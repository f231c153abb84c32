//! Состояние формы возврата и правила автозаполнения
//!
//! Форма не знает о DOM: представление пересылает сюда типизированные
//! события (`FieldId` + значение), а отрисовывает то, что лежит в состоянии.

use super::document_kind::DocumentKind;
use super::line_item::LineItemRow;
use super::totals::DocumentTotals;
use crate::shared::document_summary::DocumentSummary;
use crate::shared::formset::{FieldId, Formset};
use crate::shared::money::{format2, to_num};
use crate::shared::reference::RefValue;

/// Поля шапки, которые редактирует пользователь
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Date,
    Discount,
    OtherCharges,
    Tax,
}

impl HeaderField {
    pub fn dom_id(&self) -> &'static str {
        match self {
            HeaderField::Date => "id_date",
            HeaderField::Discount => "id_discount",
            HeaderField::OtherCharges => "id_other_charges",
            HeaderField::Tax => "id_tax_amount",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        match id {
            "id_date" => Some(HeaderField::Date),
            "id_discount" => Some(HeaderField::Discount),
            "id_other_charges" => Some(HeaderField::OtherCharges),
            "id_tax_amount" => Some(HeaderField::Tax),
            _ => None,
        }
    }
}

/// Реакция на смену документа-основания в шапке
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// Нужно загрузить сводку
    Fetch(FetchTicket),
    /// Выбор очищен: строки сняты, итоги обнулены
    Cleared,
}

/// Квитанция запроса: ответ применяется, только если выбор с тех пор не менялся
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub document_id: String,
}

/// Итог применения ответа
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Форма заполнена; `rows` это число живых строк после сверки
    Applied { rows: usize },
    /// Ответ на устаревший выбор отброшен
    Stale,
    /// Ошибка загрузки, форма не изменилась
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnForm {
    pub kind: DocumentKind,
    /// Выбранный документ-основание
    pub invoice: Option<String>,
    pub counterparty: Option<RefValue>,
    pub warehouse: Option<RefValue>,
    pub date: String,
    pub items: Formset<LineItemRow>,
    pub discount: String,
    pub other_charges: String,
    pub tax: String,
    /// Зеркало итога строк в поле шапки
    pub total_amount: String,
    pub grand_total: String,
    generation: u64,
}

impl ReturnForm {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            invoice: None,
            counterparty: None,
            warehouse: None,
            date: String::new(),
            items: Formset::new(kind.formset_prefix()),
            discount: String::new(),
            other_charges: String::new(),
            tax: String::new(),
            total_amount: format2(0.0),
            grand_total: format2(0.0),
            generation: 0,
        }
    }

    /// Пользователь выбрал документ-основание (или очистил выбор).
    ///
    /// Любая смена выбора делает ответы на прежние запросы устаревшими.
    pub fn select_invoice(&mut self, value: Option<String>) -> SelectionChange {
        self.generation += 1;
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self.invoice = value.clone();

        match value {
            Some(document_id) => SelectionChange::Fetch(FetchTicket {
                generation: self.generation,
                document_id,
            }),
            None => {
                self.items.clear();
                self.recalc_totals();
                SelectionChange::Cleared
            }
        }
    }

    /// Повторить загрузку текущего выбора (кнопка «Загрузить строки»)
    pub fn reload(&mut self) -> Option<FetchTicket> {
        let document_id = self.invoice.clone()?;
        self.generation += 1;
        Some(FetchTicket {
            generation: self.generation,
            document_id,
        })
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Применить результат запроса сводки
    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<DocumentSummary, String>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(summary) => FetchOutcome::Applied {
                rows: self.apply_summary(&summary),
            },
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Заполнить шапку и строки по сводке; возвращает число живых строк
    pub fn apply_summary(&mut self, summary: &DocumentSummary) -> usize {
        if let Some(cp) = summary.counterparty() {
            self.counterparty = Some(cp.clone());
        }
        if let Some(wh) = &summary.warehouse {
            self.warehouse = Some(wh.clone());
        }
        if let Some(date) = summary.document_date() {
            self.date = date.to_string();
        }

        let live = self.items.reconcile(summary.items.len());
        for (index, item) in live.iter().zip(summary.items.iter()) {
            if let Some(row) = self.items.row_mut(*index) {
                row.data.fill_from(self.kind, item);
            }
        }

        self.recalc_totals();
        live.len()
    }

    /// Типизированное событие ввода в строке.
    ///
    /// Количество и цена пересчитывают сумму строки и итоги, ручная правка
    /// суммы: только итоги. Чужой префикс или несуществующая строка: no-op.
    pub fn on_input(&mut self, id: &FieldId, value: String) -> bool {
        if id.prefix != self.items.prefix() {
            return false;
        }
        let kind = self.kind;
        let Some(row) = self.items.row_mut(id.index) else {
            return false;
        };

        if id.is("DELETE") {
            let deleted = value == "on" || value == "true";
            let changed = self.items.set_deleted(id.index, deleted);
            if changed {
                self.recalc_totals();
            }
            return changed;
        }

        if !row.data.set_field(&id.field, value) {
            return false;
        }

        if id.is("quantity") || id.is(kind.price_field()) {
            row.data.recalc_amount();
            self.recalc_totals();
        } else if id.is("amount") {
            self.recalc_totals();
        }
        true
    }

    pub fn on_header_input(&mut self, field: HeaderField, value: String) {
        match field {
            HeaderField::Date => {
                self.date = value;
                return;
            }
            HeaderField::Discount => self.discount = value,
            HeaderField::OtherCharges => self.other_charges = value,
            HeaderField::Tax => self.tax = value,
        }
        self.recalc_totals();
    }

    pub fn add_row(&mut self) -> usize {
        let index = self.items.add_row();
        if let Some(row) = self.items.row_mut(index) {
            row.data.kind = self.kind;
        }
        self.recalc_totals();
        index
    }

    pub fn remove_row(&mut self, index: usize) -> bool {
        let removed = self.items.remove_row(index);
        if removed {
            self.recalc_totals();
        }
        removed
    }

    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            self.items.live_rows().map(|(_, r)| r.amount_value()),
            to_num(&self.discount),
            to_num(&self.other_charges),
            to_num(&self.tax),
        )
    }

    /// Пересчитать итоги и отразить их в полях шапки
    pub fn recalc_totals(&mut self) -> DocumentTotals {
        let totals = self.totals();
        self.total_amount = format2(totals.items_total);
        self.grand_total = format2(totals.grand_total);
        totals
    }

    /// Все пары имя/значение формы для отправки
    pub fn post_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("invoice".to_string(), self.invoice.clone().unwrap_or_default()),
            (
                self.kind.counterparty_field().to_string(),
                self.counterparty
                    .as_ref()
                    .map(|c| c.id.clone())
                    .unwrap_or_default(),
            ),
            (
                "warehouse".to_string(),
                self.warehouse
                    .as_ref()
                    .map(|w| w.id.clone())
                    .unwrap_or_default(),
            ),
            ("date".to_string(), self.date.clone()),
            ("total_amount".to_string(), self.total_amount.clone()),
            ("discount".to_string(), self.discount.clone()),
            ("other_charges".to_string(), self.other_charges.clone()),
            ("tax_amount".to_string(), self.tax.clone()),
            ("grand_total".to_string(), self.grand_total.clone()),
        ];
        pairs.extend(self.items.post_pairs());
        pairs
    }
}
