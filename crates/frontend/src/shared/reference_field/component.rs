use super::traits::{option_pairs, SelectableReference};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Выпадающий список ссылочного поля.
///
/// Значение задаётся сигналом `selected` (в том числе значением, которого
/// нет в `options`), изменение пользователем приходит в `on_change`
/// как `Some(id)` или `None` для пустого варианта.
#[component]
pub fn ReferenceSelect<T>(
    /// DOM id, например `id_invoice`
    id: String,
    /// Имя поля формы
    name: String,
    options: Signal<Vec<T>>,
    selected: Signal<Option<T>>,
    /// Текст пустого варианта
    #[prop(optional)]
    placeholder: Option<&'static str>,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] on_change: Option<Callback<Option<String>>>,
) -> impl IntoView
where
    T: SelectableReference + Clone + Send + Sync + 'static,
{
    let placeholder = placeholder.unwrap_or("---------");

    let pairs = Memo::new(move |_| {
        options.with(|opts| selected.with(|sel| option_pairs(opts, sel.as_ref())))
    });
    let current_id = move || selected.with(|s| s.as_ref().map(|v| v.id()).unwrap_or_default());

    let handle_change = move |ev: leptos::ev::Event| {
        let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };
        let value = select.value();
        if let Some(cb) = on_change {
            cb.run(if value.is_empty() { None } else { Some(value) });
        }
    };

    view! {
        <select
            id=id
            name=name
            class="reference-select"
            disabled=disabled
            prop:value=current_id
            on:change=handle_change
        >
            <option value="">{placeholder}</option>
            {move || {
                let current = current_id();
                pairs
                    .get()
                    .into_iter()
                    .map(|(value, text)| {
                        let is_selected = value == current;
                        view! { <option value=value selected=is_selected>{text}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
