use crate::shared::api_utils::{get_json, post_form};
use contracts::shared::document_summary::{DocumentSummary, InvoiceListQuery, InvoiceOption};
use contracts::usecases::u501_return_autofill::DocumentKind;

/// GET `<base>/<documentId>/`: сводка документа-основания
pub async fn fetch_summary(kind: DocumentKind, document_id: &str) -> Result<DocumentSummary, String> {
    get_json(&kind.summary_path(document_id)).await
}

/// Документы-основания для выбора в шапке
pub async fn fetch_invoice_options(
    kind: DocumentKind,
    query: &InvoiceListQuery,
) -> Result<Vec<InvoiceOption>, String> {
    get_json(&options_url(kind, query)?).await
}

/// Отправить форму возврата хосту (туда же, куда ушла бы обычная форма)
pub async fn submit_form(pairs: &[(String, String)]) -> Result<String, String> {
    let href = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .ok_or_else(|| "No window location".to_string())?;
    post_form(&href, pairs).await
}

fn options_url(kind: DocumentKind, query: &InvoiceListQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| e.to_string())?;
    if qs.is_empty() {
        Ok(kind.options_path().to_string())
    } else {
        Ok(format!("{}?{}", kind.options_path(), qs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_url() {
        let url = options_url(DocumentKind::SaleReturn, &InvoiceListQuery::default()).unwrap();
        assert_eq!(url, "/api/a002/sale-invoice");

        let query = InvoiceListQuery {
            search: Some("PI".into()),
            limit: Some(20),
        };
        let url = options_url(DocumentKind::PurchaseReturn, &query).unwrap();
        assert_eq!(url, "/api/a001/purchase-invoice?search=PI&limit=20");
    }
}
