use site_core::ModelLoadError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch `url` as bytes, reporting `(loaded, total)` as chunks arrive.
///
/// Resolves once, with the body or a typed failure. Progress events without
/// a known total are dropped.
pub async fn fetch_bytes(
    url: &str,
    mut on_progress: impl FnMut(f64, f64) + 'static,
) -> Result<Vec<u8>, ModelLoadError> {
    let xhr = web::XmlHttpRequest::new().map_err(js_err)?;
    xhr.open_with_async("GET", url, true).map_err(js_err)?;
    xhr.set_response_type(web::XmlHttpRequestResponseType::Arraybuffer);

    let progress = Closure::wrap(Box::new(move |ev: web::ProgressEvent| {
        if ev.length_computable() {
            on_progress(ev.loaded(), ev.total());
        }
    }) as Box<dyn FnMut(web::ProgressEvent)>);
    xhr.set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let done = js_sys::Promise::new(&mut |resolve, reject| {
        xhr.set_onload(Some(&resolve));
        xhr.set_onerror(Some(&reject));
        xhr.set_onabort(Some(&reject));
    });
    xhr.send().map_err(js_err)?;
    let outcome = JsFuture::from(done).await;

    // Detach before `progress` is dropped at the end of scope.
    xhr.set_onprogress(None);
    outcome.map_err(|_| ModelLoadError::Network(format!("request for {:?} failed", url)))?;

    let status = xhr.status().map_err(js_err)?;
    // Status 0 is what file:// responses report.
    if status != 0 && !(200..300).contains(&status) {
        return Err(ModelLoadError::Status(status));
    }
    let body = xhr.response().map_err(js_err)?;
    let buf = body
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|_| ModelLoadError::Network("response is not an ArrayBuffer".to_string()))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

fn js_err(e: JsValue) -> ModelLoadError {
    ModelLoadError::Network(format!("{:?}", e))
}
