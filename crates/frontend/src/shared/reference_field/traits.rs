use contracts::shared::document_summary::InvoiceOption;
use contracts::shared::reference::RefValue;

/// Значение, которое можно выбрать в ссылочном поле
pub trait SelectableReference {
    fn id(&self) -> String;
    fn label(&self) -> String;
}

impl SelectableReference for RefValue {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        RefValue::label(self)
    }
}

impl SelectableReference for InvoiceOption {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        if self.counterparty.is_empty() {
            format!("{} от {}", self.invoice_no, self.date)
        } else {
            format!("{} от {} ({})", self.invoice_no, self.date, self.counterparty)
        }
    }
}

/// Пары (id, текст) для `<option>`.
///
/// Выбранное значение, которого ещё нет в списке, добавляется в начало:
/// так поле можно заполнить программно до загрузки вариантов.
pub fn option_pairs<T: SelectableReference>(
    options: &[T],
    selected: Option<&T>,
) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> =
        options.iter().map(|o| (o.id(), o.label())).collect();
    if let Some(sel) = selected {
        let id = sel.id();
        if !id.is_empty() && !pairs.iter().any(|(existing, _)| *existing == id) {
            pairs.insert(0, (id, sel.label()));
        }
    }
    pairs
}
