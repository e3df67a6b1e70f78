use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::attributes::AttributeRecord;
use crate::editor::EditorPanel;
use crate::export::ExportPanel;
use crate::profile::{ProfileCard, ProfileSurface};

/// The single page: editor on the left, live card and export on the right.
#[component]
pub fn Generator() -> Element {
    let record = use_signal(AttributeRecord::new);
    let mut card = use_signal(|| None::<Rc<MountedData>>);
    let surface = use_memo(move || ProfileSurface::from_record(&record.read()));

    rsx! {
        section { class: "page page-generator",
            div { class: "page-generator__editor",
                EditorPanel { record }
            }
            div { class: "page-generator__preview",
                ProfileCard {
                    surface: surface(),
                    on_mounted: move |mounted| card.set(Some(mounted)),
                }
                ExportPanel { record, card }
            }
        }
    }
}
