//! Browser file downloads.
//!
//! Wraps a byte payload in a `Blob`, points a temporary anchor at it and
//! clicks it, then releases the object URL.

use chrono::NaiveDateTime;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::types::{AppError, AppResult};

/// `products_<YYYYMMDD>_<HHmmss>.xlsx` for the given local time.
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("products_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Offers `bytes` to the user as a file named `file_name`.
pub fn save_bytes(bytes: &[u8], file_name: &str, mime: &str) -> AppResult<()> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| AppError::Browser(format!("Failed to create blob: {:?}", e)))?;

    download_blob(&blob, file_name)
}

fn download_blob(blob: &Blob, file_name: &str) -> AppResult<()> {
    let window = web_sys::window().ok_or_else(|| AppError::Browser("No window object".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Browser("No document object".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| AppError::Browser("No body element".to_string()))?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| AppError::Browser(format!("Failed to create object URL: {:?}", e)))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| AppError::Browser(format!("Failed to create anchor: {:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| AppError::Browser(format!("Failed to cast to anchor: {:?}", e)))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor)
        .map_err(|e| AppError::Browser(format!("Failed to append anchor: {:?}", e)))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| AppError::Browser(format!("Failed to remove anchor: {:?}", e)))?;

    Url::revoke_object_url(&url)
        .map_err(|e| AppError::Browser(format!("Failed to revoke URL: {:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_file_name() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 3, 7)
            .unwrap();
        assert_eq!(export_file_name(now), "products_20240105_090307.xlsx");
    }
}
