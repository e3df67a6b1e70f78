use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::attributes::AttributeRecord;
use crate::core::config::ExportSettings;
use crate::core::error::ExportError;
use crate::export::pipeline::ExportPipeline;
use crate::export::raster::PlatformRasterizer;
use crate::export::sink::PlatformSink;
use crate::profile::ProfileSurface;

type PlatformPipeline = ExportPipeline<PlatformRasterizer, PlatformSink>;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[component]
pub fn ExportPanel(
    record: Signal<AttributeRecord>,
    card: Signal<Option<Rc<MountedData>>>,
) -> Element {
    let settings = try_use_context::<ExportSettings>().unwrap_or_default();
    let pipeline: Rc<PlatformPipeline> = use_hook(move || {
        Rc::new(ExportPipeline::new(
            settings,
            PlatformRasterizer::default(),
            PlatformSink::default(),
        ))
    });

    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-panel__status".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-panel__status export-panel__status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__status export-panel__status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let png_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing PNG"));

            let pipeline = Rc::clone(&pipeline);
            let (surface, nickname) = {
                let record = record.read();
                (ProfileSurface::from_record(&record), record.nickname.clone())
            };
            let target = card.read().clone();

            spawn(async move {
                match pipeline.export(target.as_ref(), &surface, &nickname).await {
                    Ok(Some(image)) => status_signal.set(ExportStatus::Done(match image.saved_to {
                        Some(path) => format!("PNG saved to {path}"),
                        None => format!("{} download started", image.filename),
                    })),
                    Ok(None) => status_signal.set(ExportStatus::Idle),
                    Err(ExportError::InFlight) => {}
                    Err(err) => status_signal.set(ExportStatus::Error(err.user_message())),
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        section { class: "export-panel",
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: busy(),
                onclick: png_handler,
                if busy() { "Exporting…" } else { "Export PNG" }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
