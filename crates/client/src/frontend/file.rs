//! Reading files picked through an `<input type="file">`.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use crate::encoding::{EncodedImage, ImageError};

/// The first file chosen in the input that fired `ev`, if any.
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// Read the file's bytes and encode them with the browser-reported MIME type.
pub async fn encode_browser_file(file: &File) -> Result<EncodedImage, ImageError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ImageError::Browser(format!("{e:?}")))?;

    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(EncodedImage::from_bytes(&file.type_(), &bytes))
}
