use super::view_model::ReturnFormVm;
use crate::shared::api_utils::query_param;
use crate::shared::formset_events::forward;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::reference_field::ReferenceSelect;
use contracts::shared::document_summary::InvoiceOption;
use contracts::shared::formset::{FieldId, RowOrigin};
use contracts::shared::reference::RefValue;
use contracts::usecases::u501_return_autofill::{DocumentKind, HeaderField, LineItemRow};
use leptos::prelude::*;
use thaw::*;

/// Страница новой формы возврата.
///
/// `?invoice=<id>` в адресе сразу загружает строки этого документа.
#[component]
pub fn ReturnFormPage(kind: DocumentKind) -> impl IntoView {
    let vm = ReturnFormVm::new(kind);
    vm.load_options();

    if let Some(invoice) = query_param("invoice") {
        vm.select_invoice(Some(invoice));
    }

    let page_id = match kind {
        DocumentKind::PurchaseReturn => "u501_purchase_return--detail",
        DocumentKind::SaleReturn => "u501_sale_return--detail",
    };

    let has_invoice = Signal::derive(move || vm.form.with(|f| f.invoice.is_some()));

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h2 class="page__title">{kind.title()}</h2>
                <div class="page__header-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.reload()
                        disabled=Signal::derive(move || !has_invoice.get() || vm.loading.get())
                    >
                        "Загрузить строки"
                    </Button>
                </div>
            </div>
            <div class="page__content">
                {move || vm.loading.get().then(|| view! {
                    <div class="loading-box">"Загрузка..."</div>
                })}
                {move || vm.error.get().map(|e| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                <ReturnFormView vm=vm />
            </div>
        </PageFrame>
    }
}

/// Выбранный документ-основание: из списка или заглушка `#id`
fn selected_invoice(options: &[InvoiceOption], id: Option<&str>) -> Option<InvoiceOption> {
    let id = id?;
    options.iter().find(|o| o.id == id).cloned().or_else(|| {
        Some(InvoiceOption {
            id: id.to_string(),
            invoice_no: format!("#{}", id),
            date: String::new(),
            counterparty: String::new(),
        })
    })
}

/// Форма документа возврата: шапка, строки, итоги, управляющие поля
#[component]
pub fn ReturnFormView(vm: ReturnFormVm) -> impl IntoView {
    let kind = vm.kind;
    let form = vm.form;

    let invoice_options = Signal::derive(move || vm.invoice_options.get());
    let invoice_selected = Signal::derive(move || {
        let id = form.with(|f| f.invoice.clone());
        vm.invoice_options
            .with(|opts| selected_invoice(opts, id.as_deref()))
    });
    let on_invoice_change = Callback::new(move |value: Option<String>| vm.select_invoice(value));

    let no_refs = Signal::derive(Vec::<RefValue>::new);
    let counterparty = Signal::derive(move || form.with(|f| f.counterparty.clone()));
    let warehouse = Signal::derive(move || form.with(|f| f.warehouse.clone()));
    let on_counterparty_change = Callback::new(move |id: Option<String>| {
        form.update(|f| f.counterparty = id.map(|id| RefValue::new(id, String::new())));
    });
    let on_warehouse_change = Callback::new(move |id: Option<String>| {
        form.update(|f| f.warehouse = id.map(|id| RefValue::new(id, String::new())));
    });

    let header_value = move |field: HeaderField| {
        move || {
            form.with(|f| match field {
                HeaderField::Date => f.date.clone(),
                HeaderField::Discount => f.discount.clone(),
                HeaderField::OtherCharges => f.other_charges.clone(),
                HeaderField::Tax => f.tax.clone(),
            })
        }
    };
    let total_colspan = if kind.has_sale_price() { "6" } else { "5" };
    let row_count = Memo::new(move |_| form.with(|f| f.items.rows().len()));

    view! {
        <form
            method="post"
            class="return-form"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.submit();
            }
        >
            <fieldset class="return-form__header" on:input=move |ev| forward(&ev, |e| vm.on_form_event(e))>
                <div class="form-row">
                    <label for="id_invoice">"Документ-основание"</label>
                    <ReferenceSelect
                        id="id_invoice".to_string()
                        name="invoice".to_string()
                        options=invoice_options
                        selected=invoice_selected
                        on_change=on_invoice_change
                    />
                </div>
                <div class="form-row">
                    <label for=format!("id_{}", kind.counterparty_field())>
                        {kind.counterparty_label()}
                    </label>
                    <ReferenceSelect
                        id=format!("id_{}", kind.counterparty_field())
                        name=kind.counterparty_field().to_string()
                        options=no_refs
                        selected=counterparty
                        on_change=on_counterparty_change
                    />
                </div>
                <div class="form-row">
                    <label for="id_warehouse">"Склад"</label>
                    <ReferenceSelect
                        id="id_warehouse".to_string()
                        name="warehouse".to_string()
                        options=no_refs
                        selected=warehouse
                        on_change=on_warehouse_change
                    />
                </div>
                <div class="form-row">
                    <label for="id_date">"Дата"</label>
                    <input
                        type="date"
                        id=HeaderField::Date.dom_id()
                        name="date"
                        prop:value=header_value(HeaderField::Date)
                    />
                </div>
            </fieldset>

            <ManagementInputs vm=vm />

            <table class="formset-table">
                <thead>
                    <tr>
                        <th>"Товар"</th>
                        <th>"Серия"</th>
                        <th>"Годен до"</th>
                        <th>"Кол-во"</th>
                        <th>"Цена"</th>
                        {kind.has_sale_price().then(|| view! { <th>"Цена продажи"</th> })}
                        <th>"Сумма"</th>
                        <th>"Удалить?"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody on:input=move |ev| forward(&ev, |e| vm.on_form_event(e))>
                    <For
                        each=move || 0..row_count.get()
                        key=|index| *index
                        children=move |index| view! { <LineRow vm=vm index=index /> }
                    />
                </tbody>
                <tfoot>
                    <tr class="formset-table__add-row">
                        <td colspan="9">
                            <a
                                href="#"
                                class="add-row"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    vm.add_row();
                                }
                            >
                                "Добавить строку"
                            </a>
                        </td>
                    </tr>
                    <tr class="formset-table__totals">
                        <td colspan=total_colspan>"Итого по строкам"</td>
                        <td class="items-total">{move || form.with(|f| f.total_amount.clone())}</td>
                        <td colspan="2"></td>
                    </tr>
                </tfoot>
            </table>

            <fieldset class="return-form__totals" on:input=move |ev| forward(&ev, |e| vm.on_form_event(e))>
                <div class="form-row">
                    <label for="id_total_amount">"Сумма строк"</label>
                    <input
                        type="text"
                        id="id_total_amount"
                        name="total_amount"
                        readonly=true
                        prop:value=move || form.with(|f| f.total_amount.clone())
                    />
                </div>
                <div class="form-row">
                    <label for="id_discount">"Скидка"</label>
                    <input
                        type="text"
                        id=HeaderField::Discount.dom_id()
                        name="discount"
                        prop:value=header_value(HeaderField::Discount)
                    />
                </div>
                <div class="form-row">
                    <label for="id_other_charges">"Прочие расходы"</label>
                    <input
                        type="text"
                        id=HeaderField::OtherCharges.dom_id()
                        name="other_charges"
                        prop:value=header_value(HeaderField::OtherCharges)
                    />
                </div>
                <div class="form-row">
                    <label for="id_tax_amount">"Налог"</label>
                    <input
                        type="text"
                        id=HeaderField::Tax.dom_id()
                        name="tax_amount"
                        prop:value=header_value(HeaderField::Tax)
                    />
                </div>
                <div class="form-row">
                    <label for="id_grand_total">"Итого"</label>
                    <input
                        type="text"
                        id="id_grand_total"
                        name="grand_total"
                        readonly=true
                        prop:value=move || form.with(|f| f.grand_total.clone())
                    />
                </div>
            </fieldset>

            <div class="return-form__actions">
                <button
                    type="submit"
                    class="button button--primary"
                    disabled=move || vm.saving.get()
                >
                    "Сохранить"
                </button>
            </div>
        </form>
    }
}

/// Скрытые поля управляющей формы формсета
#[component]
fn ManagementInputs(vm: ReturnFormVm) -> impl IntoView {
    let form = vm.form;
    move || {
        form.with(|f| f.items.management().post_pairs())
            .into_iter()
            .map(|(name, value)| {
                view! { <input type="hidden" id=format!("id_{}", name) name=name value=value /> }
            })
            .collect_view()
    }
}

/// Строка формсета; значения читаются из состояния формы по индексу
#[component]
fn LineRow(vm: ReturnFormVm, index: usize) -> impl IntoView {
    let kind = vm.kind;
    let form = vm.form;
    let prefix = kind.formset_prefix();

    let dom_id = move |field: &str| FieldId::new(prefix, index, field).to_string();
    let html_name = move |field: &str| FieldId::new(prefix, index, field).html_name();

    let value = move |get: fn(&LineItemRow) -> String| {
        move || {
            form.with(|f| f.items.row(index).map(|r| get(&r.data)).unwrap_or_default())
        }
    };
    let is_initial = move || {
        form.with(|f| {
            f.items
                .row(index)
                .is_some_and(|r| r.origin == RowOrigin::Initial)
        })
    };
    let is_deleted = move || form.with(|f| f.items.row(index).is_some_and(|r| r.deleted));
    let product_id = value(|r| r.product.as_ref().map(|p| p.id.clone()).unwrap_or_default());
    let product_label = value(|r| r.product.as_ref().map(|p| p.text.clone()).unwrap_or_default());

    let source_field = kind.source_item_field();
    let price_field = kind.price_field();

    view! {
        <tr class=move || if is_deleted() { "formset-row formset-row--deleted" } else { "formset-row" }>
            <td>
                <input
                    type="hidden"
                    id=dom_id(source_field)
                    name=html_name(source_field)
                    prop:value=value(|r| r.source_item.clone())
                />
                <input
                    type="text"
                    class="formset-row__product-id"
                    placeholder="ID товара"
                    id=dom_id("product")
                    name=html_name("product")
                    prop:value=product_id
                />
                <span class="formset-row__product">{product_label}</span>
            </td>
            <td>
                <input
                    type="text"
                    id=dom_id("batch_number")
                    name=html_name("batch_number")
                    prop:value=value(|r| r.batch_number.clone())
                />
            </td>
            <td>
                <input
                    type="date"
                    id=dom_id("expiry_date")
                    name=html_name("expiry_date")
                    prop:value=value(|r| r.expiry_date.clone())
                />
            </td>
            <td>
                <input
                    type="number"
                    step="any"
                    id=dom_id("quantity")
                    name=html_name("quantity")
                    prop:value=value(|r| r.quantity.clone())
                />
            </td>
            <td>
                <input
                    type="number"
                    step="0.01"
                    id=dom_id(price_field)
                    name=html_name(price_field)
                    prop:value=value(|r| r.price.clone())
                />
            </td>
            {kind.has_sale_price().then(|| view! {
                <td>
                    <input
                        type="number"
                        step="0.01"
                        id=dom_id("sale_price")
                        name=html_name("sale_price")
                        prop:value=value(|r| r.sale_price.clone())
                    />
                </td>
            })}
            <td>
                <input
                    type="number"
                    step="0.01"
                    id=dom_id("amount")
                    name=html_name("amount")
                    prop:value=value(|r| r.amount.clone())
                />
            </td>
            <td>
                {move || is_initial().then(|| view! {
                    <input
                        type="checkbox"
                        id=dom_id("DELETE")
                        name=html_name("DELETE")
                        prop:checked=is_deleted
                    />
                })}
            </td>
            <td>
                <a
                    href="#"
                    class="inline-deletelink"
                    on:click=move |ev| {
                        ev.prevent_default();
                        vm.remove_row(index);
                    }
                >
                    "Удалить"
                </a>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_invoice_falls_back_to_placeholder() {
        let options = vec![InvoiceOption {
            id: "10".into(),
            invoice_no: "PI-10".into(),
            date: "2025-01-31".into(),
            counterparty: "Acme".into(),
        }];
        assert_eq!(
            selected_invoice(&options, Some("10")).map(|o| o.invoice_no),
            Some("PI-10".to_string())
        );
        assert_eq!(
            selected_invoice(&options, Some("11")).map(|o| o.invoice_no),
            Some("#11".to_string())
        );
        assert_eq!(selected_invoice(&options, None), None);
    }
}
