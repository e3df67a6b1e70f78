//! Handing the finished file to the user.

use crate::core::error::ExportError;
use crate::export::pipeline::DownloadSink;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ExportDirSink as PlatformSink;
#[cfg(target_arch = "wasm32")]
pub use web::AnchorDownload as PlatformSink;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ExportDirSink;
#[cfg(target_arch = "wasm32")]
pub use web::AnchorDownload;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    /// Writes into a directory, by default `<data dir>/exports`.
    #[derive(Debug, Clone, Default)]
    pub struct ExportDirSink {
        dir: Option<PathBuf>,
    }

    impl ExportDirSink {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self {
                dir: Some(dir.into()),
            }
        }

        pub fn export_dir(&self) -> Result<PathBuf, ExportError> {
            if let Some(dir) = &self.dir {
                return Ok(dir.clone());
            }
            let dirs = directories::ProjectDirs::from("com", "PowerProfile", "PowerProfile")
                .ok_or_else(|| ExportError::Delivery("unable to determine export directory".into()))?;
            Ok(dirs.data_dir().join("exports"))
        }
    }

    impl DownloadSink for ExportDirSink {
        async fn deliver(&self, filename: &str, mime: &str, bytes: &[u8]) -> Result<Option<String>, ExportError> {
            let _ = mime;
            let dir = self.export_dir()?;
            fs::create_dir_all(&dir).map_err(|err| ExportError::Delivery(err.to_string()))?;
            let path = dir.join(filename);
            let mut file =
                fs::File::create(&path).map_err(|err| ExportError::Delivery(err.to_string()))?;
            file.write_all(bytes)
                .map_err(|err| ExportError::Delivery(err.to_string()))?;
            Ok(Some(path.to_string_lossy().to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use futures::executor::block_on;

        use super::*;

        #[test]
        fn writes_file_and_reports_path() {
            let dir = std::env::temp_dir().join(format!("powercard-sink-{}", std::process::id()));
            let sink = ExportDirSink::new(&dir);
            let saved = block_on(sink.deliver("Aria.png", "image/png", b"png-bytes"))
                .expect("delivered")
                .expect("path reported");
            assert!(saved.ends_with("Aria.png"));
            assert_eq!(fs::read(dir.join("Aria.png")).expect("file exists"), b"png-bytes");
            fs::remove_dir_all(&dir).ok();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

    use super::*;

    /// Clicks a transient `<a download>` pointing at an object URL.
    ///
    /// The browser starts the download after the click handler returns, so
    /// the anchor and its URL are only released one task later.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct AnchorDownload;

    impl DownloadSink for AnchorDownload {
        async fn deliver(&self, filename: &str, mime: &str, bytes: &[u8]) -> Result<Option<String>, ExportError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| ExportError::Platform("document unavailable".into()))?;
            let url = ObjectUrl::for_bytes(bytes, mime)?;
            let anchor = attach_anchor(&document, &url.0, filename)?;

            anchor.click();
            tracing::debug!(%filename, size = bytes.len(), "download started");
            gloo_timers::future::TimeoutFuture::new(0).await;

            anchor.remove();
            drop(url);
            Ok(None)
        }
    }

    /// Blob URL revoked when dropped, including on early returns.
    struct ObjectUrl(String);

    impl ObjectUrl {
        fn for_bytes(bytes: &[u8], mime: &str) -> Result<Self, ExportError> {
            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
            let opts = BlobPropertyBag::new();
            opts.set_type(mime);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
                .map_err(|_| ExportError::Delivery("failed to create blob".into()))?;
            Url::create_object_url_with_blob(&blob)
                .map(Self)
                .map_err(|_| ExportError::Delivery("unable to create download".into()))
        }
    }

    impl Drop for ObjectUrl {
        fn drop(&mut self) {
            if Url::revoke_object_url(&self.0).is_err() {
                tracing::debug!("object URL already released");
            }
        }
    }

    fn attach_anchor(document: &Document, url: &str, filename: &str) -> Result<HtmlAnchorElement, ExportError> {
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Delivery("unable to create anchor".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Delivery("anchor cast failed".into()))?;
        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.set_hidden(true);

        document
            .body()
            .ok_or_else(|| ExportError::Platform("missing body".into()))?
            .append_child(&anchor)
            .map_err(|_| ExportError::Delivery("unable to attach anchor".into()))?;
        Ok(anchor)
    }
}
