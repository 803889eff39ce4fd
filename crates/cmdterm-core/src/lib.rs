#![forbid(unsafe_code)]

//! `cmdterm-core` is the host-independent half of the command console.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment reads the input field,
//!   performs the network call, and reports results back.
//! - **Single-threaded**: state is owned by [`Console`] and mutated only
//!   between suspension points.
//! - **No JS types**: everything here builds and tests natively. The
//!   `cmdterm-web` crate wraps it with DOM bindings and a `fetch` transport.
//!
//! One exchange looks like this:
//!
//! ```
//! use cmdterm_core::{CommandResponse, Console, ConsoleConfig, MemoryView, SubmitOutcome};
//!
//! let mut console = Console::new(ConsoleConfig::default(), MemoryView::with_input("echo hi"));
//! let SubmitOutcome::Dispatch(ticket) = console.submit_from_view() else {
//!     unreachable!("non-empty command dispatches");
//! };
//! assert_eq!(ticket.request.command.as_str(), "echo hi");
//!
//! let response = CommandResponse::from_json(r#"{"output":"hi"}"#).unwrap();
//! console.complete(ticket.id, Ok(response));
//!
//! let texts: Vec<&str> = console.log().iter().map(|e| e.text.as_str()).collect();
//! assert_eq!(texts, ["> echo hi", "hi"]);
//! ```

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod log;
pub mod markup;
pub mod response;
pub mod transport;
pub mod view;

pub use command::{Command, CommandRequest};
pub use config::{ConsoleConfig, ExchangePolicy, MarkupPolicy};
pub use console::{Console, SubmitOutcome, Ticket};
pub use error::{ConsoleError, Result};
pub use log::{EntryKind, LogEntry, OutputLog};
pub use response::CommandResponse;
pub use transport::{CommandTransport, run_exchange};
pub use view::{ConsoleView, MemoryView};

/// Path the console posts commands to.
pub const DEFAULT_ENDPOINT: &str = "/command";
/// Multipart form field carrying the command text.
pub const DEFAULT_FIELD: &str = "cmd";
/// Element id of the submission form.
pub const DEFAULT_FORM_ID: &str = "cmd-form";
/// Element id of the text input.
pub const DEFAULT_INPUT_ID: &str = "cmd";
/// Element id of the scrolling output container.
pub const DEFAULT_OUTPUT_ID: &str = "terminal-output";
