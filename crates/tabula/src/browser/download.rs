//! File download through a temporary anchor element.

use tabula_core::{FileSaver, SaveError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Saves files by asking the browser to download them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFileSaver;

impl BrowserFileSaver {
    /// Create a saver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn download(content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(SaveError::NotAvailable)?;
        let body = document.body().ok_or(SaveError::NotAvailable)?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(content));
        let options = BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob =
            Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(rejected)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(rejected)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(rejected)?
            .dyn_into()
            .map_err(|_| SaveError::Rejected("anchor is not an HtmlAnchorElement".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);

        let clicked = body.append_child(&anchor).map(|_| anchor.click());
        // The anchor and URL are released even when the click failed.
        let _ = body.remove_child(&anchor);
        let _ = Url::revoke_object_url(&url);
        clicked.map_err(rejected)
    }
}

impl FileSaver for BrowserFileSaver {
    fn save(&self, content: &[u8], filename: &str, mime_type: &str) -> Result<(), SaveError> {
        Self::download(content, filename, mime_type)
    }
}

fn rejected(err: JsValue) -> SaveError {
    SaveError::Rejected(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
