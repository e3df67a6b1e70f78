//! The form that owns every write to the [`AttributeRecord`].

mod avatar;

use dioxus::prelude::*;

use crate::core::attributes::{AttributeRecord, SkillSlot, StatKind};
use crate::profile::fonts::available_families;

use avatar::AvatarPicker;

#[component]
pub fn EditorPanel(mut record: Signal<AttributeRecord>) -> Element {
    rsx! {
        section { class: "editor",
            h2 { class: "editor__title", "Profile" }

            AvatarPicker { record }

            TextField {
                label: "Nickname",
                value: record.read().nickname.clone(),
                placeholder: "Hero name",
                on_input: move |value| record.write().nickname = value,
            }
            TextField {
                label: "Likes",
                value: record.read().likes.clone(),
                placeholder: "",
                on_input: move |value| record.write().likes = value,
            }
            TextField {
                label: "Dislikes",
                value: record.read().dislikes.clone(),
                placeholder: "",
                on_input: move |value| record.write().dislikes = value,
            }

            StatsFieldset { record }
            SkillsFieldset { record }

            label { class: "editor__field",
                span { "Bio" }
                textarea {
                    rows: "5",
                    value: "{record.read().bio}",
                    oninput: move |evt| record.write().bio = evt.value(),
                }
            }

            FontPicker { record }

            TextField {
                label: "Footer",
                value: record.read().footer_text.clone(),
                placeholder: "Power Profile • auto-generated",
                on_input: move |value| record.write().footer_text = value,
            }
        }
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: String,
    placeholder: &'static str,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "editor__field",
            span { "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

#[component]
fn StatsFieldset(mut record: Signal<AttributeRecord>) -> Element {
    let stats = record.read().stats;

    rsx! {
        fieldset { class: "editor__stats",
            legend { "Stats (0–100)" }
            for kind in StatKind::ALL {
                label { key: "{kind.label()}", class: "editor__stat",
                    span { "{kind.label()}" }
                    input {
                        r#type: "number",
                        min: "0",
                        max: "100",
                        step: "1",
                        value: "{stats.get(kind)}",
                        oninput: move |evt| {
                            let stored = record.write().stats.set_from_input(kind, &evt.value());
                            tracing::trace!(stat = kind.label(), stored, "stat updated");
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn SkillsFieldset(mut record: Signal<AttributeRecord>) -> Element {
    rsx! {
        fieldset { class: "editor__skills",
            legend { "Skills" }
            for slot in SkillSlot::ALL {
                label { key: "{slot.label()}", class: "editor__field",
                    span {
                        class: if slot.is_emphasized() { "editor__skill-label editor__skill-label--special" } else { "editor__skill-label" },
                        "{slot.label()}"
                    }
                    textarea {
                        rows: "2",
                        placeholder: slot.input_placeholder(),
                        value: "{record.read().skills.get(slot)}",
                        oninput: move |evt| record.write().skills.set(slot, evt.value()),
                    }
                }
            }
        }
    }
}

#[component]
fn FontPicker(mut record: Signal<AttributeRecord>) -> Element {
    let families = use_hook(available_families);

    rsx! {
        label { class: "editor__field",
            span { "Font" }
            input {
                r#type: "text",
                list: "font-families",
                placeholder: "system-ui",
                value: "{record.read().font_name}",
                oninput: move |evt| record.write().font_name = evt.value(),
            }
            datalist { id: "font-families",
                for family in families.iter() {
                    option { key: "{family}", value: "{family}" }
                }
            }
        }
    }
}
