#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: module start, manual mount, diagnostics.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use cmdterm_core::{Console, ConsoleConfig, ConsoleError, Result, SubmitOutcome, run_exchange};
use js_sys::Array;
use tracing::{debug, error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::dom::DomView;
use crate::fetch::FetchTransport;
use crate::host::{CMDTERM_JS_API_VERSION, CONFIG_SCRIPT_ID, parse_embedded_config};
use crate::logging::{console_error, install_panic_hook, install_tracing};

/// A console bound to the page. Dropping it would detach the submit
/// listener, so it lives in [`MOUNTED`] for the lifetime of the page.
struct MountedConsole {
    console: Rc<RefCell<Console<DomView>>>,
    _on_submit: Closure<dyn FnMut(web_sys::Event)>,
}

thread_local! {
    static MOUNTED: RefCell<Option<MountedConsole>> = const { RefCell::new(None) };
}

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn to_js_error(err: ConsoleError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ConsoleError::Config("no document available".into()))
}

fn report_startup_error(err: &ConsoleError) {
    error!(error = %err, "command console failed to mount");
    console_error(&format!("cmdterm: {err}"));
}

/// Run `f` once the document has finished parsing.
fn when_dom_ready(document: &Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        console_error(&format!(
            "cmdterm: failed to wait for DOMContentLoaded: {}",
            js_detail(&err)
        ));
    }
}

fn embedded_config(document: &Document) -> Result<ConsoleConfig> {
    let text = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|element| element.text_content());
    parse_embedded_config(text.as_deref())
}

fn config_from_js(options: &JsValue) -> Result<ConsoleConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(ConsoleConfig::default());
    }
    let json = js_sys::JSON::stringify(options).map_err(|err| {
        ConsoleError::Config(format!("options not serializable: {}", js_detail(&err)))
    })?;
    ConsoleConfig::from_json(&String::from(json))
}

fn mount(config: ConsoleConfig) -> Result<()> {
    config.validate()?;
    if MOUNTED.with(|mounted| mounted.borrow().is_some()) {
        return Err(ConsoleError::Config("console already mounted".into()));
    }

    let document = document()?;
    let view = DomView::resolve(&document, &config)?;
    let form = view.form().clone();
    let console = Rc::new(RefCell::new(Console::new(config, view)));

    let handler_console = Rc::clone(&console);
    let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        let outcome = handler_console.borrow_mut().submit_from_view();
        if let SubmitOutcome::Dispatch(ticket) = outcome {
            let console = Rc::clone(&handler_console);
            spawn_local(async move {
                let completed = run_exchange(&console, &FetchTransport, ticket).await;
                debug!(completed, "exchange chain settled");
            });
        }
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(|err| {
            ConsoleError::Config(format!("failed to bind submit listener: {}", js_detail(&err)))
        })?;

    info!(
        form = %console.borrow().config().form_id,
        endpoint = %console.borrow().config().endpoint,
        "command console mounted"
    );
    MOUNTED.with(|mounted| {
        *mounted.borrow_mut() = Some(MountedConsole {
            console,
            _on_submit: on_submit,
        });
    });
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    install_panic_hook();
    install_tracing();

    let document = match document() {
        Ok(document) => document,
        Err(err) => {
            report_startup_error(&err);
            return;
        }
    };
    let config_source = document.clone();
    when_dom_ready(&document, move || {
        let result = embedded_config(&config_source).and_then(|config| {
            if config.autostart {
                mount(config)
            } else {
                debug!("autostart disabled; waiting for mountConsole");
                Ok(())
            }
        });
        if let Err(err) = result {
            report_startup_error(&err);
        }
    });
}

/// Mount the console with `options` (same keys as the embedded config).
/// `undefined`/`null` means defaults.
#[wasm_bindgen(js_name = mountConsole)]
pub fn mount_console(options: JsValue) -> std::result::Result<(), JsValue> {
    let result = config_from_js(&options).and_then(mount);
    if let Err(err) = &result {
        report_startup_error(err);
    }
    result.map_err(to_js_error)
}

/// Drain JSONL lifecycle diagnostics from the mounted console.
#[wasm_bindgen(js_name = drainConsoleDiagnostics)]
pub fn drain_console_diagnostics() -> Array {
    let arr = Array::new();
    MOUNTED.with(|mounted| {
        if let Some(mounted) = mounted.borrow().as_ref() {
            for line in mounted.console.borrow_mut().take_diagnostics() {
                arr.push(&JsValue::from_str(&line));
            }
        }
    });
    arr
}

#[wasm_bindgen(js_name = consoleApiVersion)]
#[must_use]
pub fn console_api_version() -> String {
    CMDTERM_JS_API_VERSION.to_owned()
}
