//! Типизированная привязка событий ввода формы
//!
//! Один делегированный обработчик `input` на контейнере строк: id цели
//! события разбирается в `FieldId`, значение читается из элемента.
//! Цели без id или не являющиеся полями ввода молча игнорируются.

use contracts::shared::formset::FieldId;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement};

/// Событие ввода, разобранное по id поля
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Поле строки формсета
    Row(FieldId, String),
    /// Любое другое поле формы (шапка); `id` как в DOM
    Other { id: String, value: String },
}

/// Классифицировать пару (DOM id, значение)
pub fn classify(dom_id: &str, value: String) -> Option<FormEvent> {
    if dom_id.is_empty() {
        return None;
    }
    Some(match FieldId::parse(dom_id) {
        Some(field) => FormEvent::Row(field, value),
        None => FormEvent::Other {
            id: dom_id.to_string(),
            value,
        },
    })
}

/// Значение чекбокса в терминах отправки формы
pub fn checkbox_value(checked: bool) -> String {
    if checked { "on" } else { "" }.to_string()
}

/// Разобрать событие DOM: (id, значение) цели, если это поле ввода
pub fn read_event(ev: &Event) -> Option<FormEvent> {
    let target = ev.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        let value = if input.type_() == "checkbox" {
            checkbox_value(input.checked())
        } else {
            input.value()
        };
        return classify(&input.id(), value);
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return classify(&select.id(), select.value());
    }
    None
}

/// Переслать событие `on:input` (любого типа DOM-события) разобранным
pub fn forward<E: JsCast>(ev: &E, handler: impl FnOnce(FormEvent)) {
    if let Some(form_event) = read_event(ev.unchecked_ref::<Event>()) {
        handler(form_event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_field() {
        assert_eq!(
            classify("id_items-2-quantity", "5".into()),
            Some(FormEvent::Row(FieldId::new("items", 2, "quantity"), "5".into()))
        );
    }

    #[test]
    fn test_header_and_management_fields_are_other() {
        assert_eq!(
            classify("id_discount", "1".into()),
            Some(FormEvent::Other {
                id: "id_discount".into(),
                value: "1".into()
            })
        );
        assert!(matches!(
            classify("id_items-TOTAL_FORMS", "3".into()),
            Some(FormEvent::Other { .. })
        ));
    }

    #[test]
    fn test_target_without_id_ignored() {
        assert_eq!(classify("", "x".into()), None);
    }

    #[test]
    fn test_checkbox_value() {
        assert_eq!(checkbox_value(true), "on");
        assert_eq!(checkbox_value(false), "");
    }
}
