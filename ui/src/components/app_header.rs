use dioxus::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Brand bar shown above every page.
#[component]
pub fn AppHeader() -> Element {
    rsx! {
        header { id: "app-header", class: "app-header",
            div { class: "app-header__inner",
                div { class: "app-header__brand",
                    span { class: "app-header__spark", aria_hidden: "true" }
                    span { class: "app-header__mark", "Power Profile" }
                    span { class: "app-header__subtitle", "Character card generator" }
                }
                span { class: "app-header__version", "v{VERSION}" }
            }
        }
    }
}
