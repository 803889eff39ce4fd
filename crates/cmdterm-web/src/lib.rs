#![forbid(unsafe_code)]

//! Browser frontend for the cmdterm command console.
//!
//! On module start the console waits for the document to finish loading,
//! binds `#cmd-form`, `#cmd`, and `#terminal-output`, and from then on posts
//! each submitted command to `/command` as multipart form data, appending
//! the echo and the server's reply to the output container.
//!
//! Defaults can be overridden with an embedded JSON document:
//!
//! ```html
//! <script type="application/json" id="cmdterm-config">
//!   { "endpoint": "/api/command", "policy": "concurrent" }
//! </script>
//! ```
//!
//! Setting `"autostart": false` there leaves mounting to the host, which
//! then calls `mountConsole(options)` itself.

pub mod host;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomView;
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
#[cfg(target_arch = "wasm32")]
pub use wasm::{console_api_version, drain_console_diagnostics, mount_console};
