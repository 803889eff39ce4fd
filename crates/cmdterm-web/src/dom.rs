#![forbid(unsafe_code)]

//! [`ConsoleView`] over the page's form, input, and output elements.

use cmdterm_core::{ConsoleConfig, ConsoleError, ConsoleView, Result};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlInputElement};

fn lookup<T: JsCast>(
    document: &Document,
    role: &'static str,
    id: &str,
    expected: &'static str,
) -> Result<T> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| ConsoleError::MissingElement {
            role,
            id: id.to_owned(),
        })?;
    element
        .dyn_into::<T>()
        .map_err(|_| ConsoleError::ElementType {
            id: id.to_owned(),
            expected,
        })
}

/// The three DOM handles the console drives.
pub struct DomView {
    form: HtmlFormElement,
    input: HtmlInputElement,
    output: HtmlElement,
}

impl DomView {
    /// Look up the configured elements. Any missing or mistyped element is a
    /// startup error.
    pub fn resolve(document: &Document, config: &ConsoleConfig) -> Result<Self> {
        Ok(Self {
            form: lookup(document, "form", &config.form_id, "HTMLFormElement")?,
            input: lookup(document, "input", &config.input_id, "HTMLInputElement")?,
            output: lookup(document, "output", &config.output_id, "HTMLElement")?,
        })
    }

    #[must_use]
    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    #[must_use]
    pub fn output(&self) -> &HtmlElement {
        &self.output
    }
}

impl ConsoleView for DomView {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn append_markup(&mut self, markup: &str) {
        if let Err(err) = self.output.insert_adjacent_html("beforeend", markup) {
            warn!(error = ?err, "failed to append console markup");
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.output.set_scroll_top(self.output.scroll_height());
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn set_busy(&mut self, busy: bool) {
        self.input.set_disabled(busy);
        let state = if busy { "true" } else { "false" };
        if let Err(err) = self.form.set_attribute("aria-busy", state) {
            warn!(error = ?err, "failed to mark console form busy");
        }
        if !busy {
            if let Err(err) = self.input.focus() {
                warn!(error = ?err, "failed to refocus console input");
            }
        }
    }
}
