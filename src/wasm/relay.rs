use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::EmailConfig;
use crate::relay::{request_body, EmailParams, EmailRelay, RelayError};

/// Posts contact messages to EmailJS with `fetch`.
pub struct EmailJsRelay {
    config: EmailConfig,
}

impl EmailJsRelay {
    pub fn new(config: EmailConfig) -> Self {
        if config.is_placeholder() {
            log::warn!("EmailJS identifiers are placeholders; sends will be rejected");
        }
        Self { config }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn unexpected(err: JsValue) -> RelayError {
    RelayError::Unexpected(describe(&err))
}

// `fetch` rejects only when no response arrived.
fn transport(err: JsValue) -> RelayError {
    RelayError::Transport(describe(&err))
}

impl EmailRelay for EmailJsRelay {
    async fn send(&self, params: &EmailParams) -> Result<(), RelayError> {
        let body = request_body(&self.config, params)?;

        let headers = Headers::new().map_err(unexpected)?;
        headers.set("Content-Type", "application/json").map_err(unexpected)?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(&self.config.endpoint, &init).map_err(unexpected)?;

        let window = web_sys::window().ok_or_else(|| RelayError::Unexpected("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(unexpected)?;

        if response.ok() {
            log::info!("contact message relayed");
            return Ok(());
        }
        let status = response.status();
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()).unwrap_or_default(),
            Err(_) => String::new(),
        };
        log::warn!("relay answered {status}: {body}");
        Err(RelayError::Rejected { status, body })
    }
}
