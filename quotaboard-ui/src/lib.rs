use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use quotaboard_common::Catalog;
use wasm_bindgen::prelude::wasm_bindgen;

mod api;
mod components;
pub mod hooks;
mod pages;
pub mod utils;

use hooks::ClusterScope;
use pages::ResourceQuotaList;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(Catalog::english());
    provide_context(ClusterScope::new("main"));

    view! {
        <Stylesheet id="leptos" href="/pkg/quotaboard-ui.css"/>
        <Title text="Quotaboard - Resource Quotas"/>
        <Meta name="description" content="Kubernetes resource quota dashboard"/>

        <Router>
            <nav class="navbar">
                <div class="navbar-brand">
                    <h1>"Quotaboard"</h1>
                </div>
                <div class="navbar-menu">
                    <A href="/resourcequotas" class="navbar-item">"Resource Quotas"</A>
                </div>
            </nav>

            <main class="container">
                <Routes>
                    <Route path="/" view=ResourceQuotaList/>
                    <Route path="/resourcequotas" view=ResourceQuotaList/>
                </Routes>
            </main>
        </Router>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
