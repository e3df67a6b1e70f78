use dioxus::prelude::*;

use crate::core::attributes::{AttributeRecord, AvatarImage};

/// File input that turns the chosen image into an embedded data URL.
/// Unreadable or non-image files leave the current avatar untouched.
#[component]
pub fn AvatarPicker(mut record: Signal<AttributeRecord>) -> Element {
    let has_avatar = record.read().avatar.is_some();

    rsx! {
        div { class: "editor__avatar",
            label { class: "editor__field",
                span { "Avatar" }
                input {
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |evt: FormEvent| async move {
                        let Some(engine) = evt.files() else {
                            return;
                        };
                        let Some(name) = engine.files().into_iter().next() else {
                            return;
                        };
                        let Some(bytes) = engine.read_file(&name).await else {
                            tracing::warn!(file = %name, "avatar could not be read");
                            return;
                        };
                        match AvatarImage::from_file_bytes(&bytes) {
                            Some(image) => {
                                tracing::debug!(file = %name, mime = image.mime(), "avatar loaded");
                                record.write().avatar = Some(image);
                            }
                            None => tracing::warn!(file = %name, "avatar is not a supported image"),
                        }
                    },
                }
            }
            if has_avatar {
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| record.write().avatar = None,
                    "Remove avatar"
                }
            }
        }
    }
}
