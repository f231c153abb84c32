//! ViewModel формы возврата
//!
//! Всё состояние формы лежит в одном `RwSignal<ReturnForm>`; правила
//! заполнения и пересчёта живут в `contracts`, здесь только загрузка,
//! сообщения об ошибках и пересылка событий.

use super::model;
use crate::shared::formset_events::FormEvent;
use contracts::shared::document_summary::{InvoiceListQuery, InvoiceOption};
use contracts::usecases::u501_return_autofill::{
    DocumentKind, FailureNotice, FetchOutcome, FetchTicket, HeaderField, ReturnForm,
    SelectionChange,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ReturnFormVm {
    pub kind: DocumentKind,
    pub form: RwSignal<ReturnForm>,
    /// Варианты для выбора документа-основания
    pub invoice_options: RwSignal<Vec<InvoiceOption>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ReturnFormVm {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            form: RwSignal::new(ReturnForm::new(kind)),
            invoice_options: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Загрузить список документов-оснований
    pub fn load_options(&self) {
        let this = *self;
        spawn_local(async move {
            match model::fetch_invoice_options(this.kind, &InvoiceListQuery::default()).await {
                Ok(options) => this.invoice_options.set(options),
                Err(e) => log::warn!("Invoice options for {:?} not loaded: {}", this.kind, e),
            }
        });
    }

    /// Смена значения в шапке: пустое значение очищает строки без запроса
    pub fn select_invoice(&self, value: Option<String>) {
        let mut change = SelectionChange::Cleared;
        self.form.update(|f| change = f.select_invoice(value));
        self.error.set(None);
        match change {
            SelectionChange::Fetch(ticket) => self.fetch(ticket),
            SelectionChange::Cleared => self.loading.set(false),
        }
    }

    /// Повторная загрузка текущего выбора
    pub fn reload(&self) {
        let mut ticket = None;
        self.form.update(|f| ticket = f.reload());
        if let Some(ticket) = ticket {
            self.fetch(ticket);
        }
    }

    fn fetch(&self, ticket: FetchTicket) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let result = model::fetch_summary(this.kind, &ticket.document_id).await;

            let mut outcome = FetchOutcome::Stale;
            this.form.update(|f| outcome = f.finish_fetch(&ticket, result));

            match outcome {
                FetchOutcome::Applied { rows } => {
                    log::debug!("Document {} applied: {} rows", ticket.document_id, rows);
                    this.loading.set(false);
                }
                FetchOutcome::Failed(e) => {
                    this.loading.set(false);
                    this.report_failure(&e);
                }
                FetchOutcome::Stale => {
                    log::debug!("Stale response for document {} dropped", ticket.document_id);
                }
            }
        });
    }

    /// Одна запись в консоль и, для возврата поставщику, один alert
    fn report_failure(&self, e: &str) {
        let message = self.kind.failure_message();
        log::error!("{} {}", message, e);
        self.error.set(Some(message.to_string()));

        if self.kind.failure_notice() == FailureNotice::ConsoleAndAlert {
            if let Some(w) = web_sys::window() {
                let _ = w.alert_with_message(message);
            }
        }
    }

    /// Делегированное событие ввода из формы
    pub fn on_form_event(&self, event: FormEvent) {
        match event {
            FormEvent::Row(field, value) => {
                self.form.update(|f| {
                    f.on_input(&field, value);
                });
            }
            FormEvent::Other { id, value } => {
                if let Some(field) = HeaderField::from_dom_id(&id) {
                    self.form.update(|f| f.on_header_input(field, value));
                }
            }
        }
    }

    /// Отправить форму; после успешного ответа переходим туда, куда перенаправил хост
    pub fn submit(&self) {
        let this = *self;
        let pairs = this.form.with_untracked(|f| f.post_pairs());
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match model::submit_form(&pairs).await {
                Ok(url) => {
                    log::info!("Return form submitted, {} fields", pairs.len());
                    if let Some(w) = web_sys::window() {
                        let _ = w.location().set_href(&url);
                    }
                }
                Err(e) => {
                    log::error!("Return form not saved: {}", e);
                    this.error.set(Some(format!("Не удалось сохранить: {}", e)));
                }
            }
            this.saving.set(false);
        });
    }

    pub fn add_row(&self) {
        self.form.update(|f| {
            f.add_row();
        });
    }

    pub fn remove_row(&self, index: usize) {
        self.form.update(|f| {
            f.remove_row(index);
        });
    }
}
