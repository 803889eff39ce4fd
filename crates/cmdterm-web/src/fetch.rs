#![forbid(unsafe_code)]

//! `fetch`-backed [`CommandTransport`].

use cmdterm_core::{CommandRequest, CommandResponse, CommandTransport, ConsoleError, Result};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn network_error(err: gloo_net::Error) -> ConsoleError {
    ConsoleError::Network(err.to_string())
}

fn js_error(context: &str, value: &JsValue) -> ConsoleError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    ConsoleError::Network(format!("{context}: {detail}"))
}

/// Posts each command as `multipart/form-data`. The browser picks the
/// boundary, so no content-type header is set here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl CommandTransport for FetchTransport {
    async fn send(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let form = FormData::new().map_err(|err| js_error("failed to create form data", &err))?;
        for (name, value) in request.form_fields() {
            form.append_with_str(name, value)
                .map_err(|err| js_error("failed to encode form field", &err))?;
        }

        let response = Request::post(&request.endpoint)
            .body(form)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        CommandResponse::from_http(status, &body)
    }
}
