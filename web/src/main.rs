use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::core::config::ExportSettings;
use ui::views::Generator;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Generator {},
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
}

fn main() {
    init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Power Profile web");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(ExportSettings::default);

    rsx! {
        document::Style { "{ui::THEME_CSS}" }
        Router::<Route> {}
    }
}

#[component]
fn WebShell() -> Element {
    rsx! {
        AppHeader {}
        Outlet::<Route> {}
    }
}
