use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::usecases::u501_return_autofill::ReturnFormPage;
use contracts::usecases::u501_return_autofill::DocumentKind;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

/// Стартовая страница: ссылки на формы возвратов
#[component]
fn IndexPage() -> impl IntoView {
    view! {
        <PageFrame page_id="u501_return_autofill--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2 class="page__title">"Возвраты"</h2>
            </div>
            <div class="page__content">
                <ul class="nav-list">
                    {DocumentKind::ALL
                        .iter()
                        .map(|kind| view! {
                            <li><A href=kind.route()>{kind.title()}</A></li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </PageFrame>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes fallback=|| view! { <p class="not-found">"Страница не найдена"</p> }>
                    <Route path=path!("/") view=IndexPage />
                    <Route
                        path=path!("/purchase-returns/new")
                        view=|| view! { <ReturnFormPage kind=DocumentKind::PurchaseReturn /> }
                    />
                    <Route
                        path=path!("/sale-returns/new")
                        view=|| view! { <ReturnFormPage kind=DocumentKind::SaleReturn /> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
