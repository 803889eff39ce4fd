//! Transport seam and the async exchange driver.

use std::cell::RefCell;
use std::future::Future;

use crate::command::CommandRequest;
use crate::console::{Console, Ticket};
use crate::error::Result;
use crate::response::CommandResponse;
use crate::view::ConsoleView;

/// Sends one command request and yields the decoded response.
///
/// Implementations run on a single-threaded executor; the returned future
/// need not be `Send`.
pub trait CommandTransport {
    fn send(&self, request: &CommandRequest) -> impl Future<Output = Result<CommandResponse>>;
}

/// Drive `ticket` through `transport` and report the result to `console`.
///
/// Under the serialized policy a completion can release the next queued
/// ticket; those are sent in turn until the queue is empty. The console is
/// only borrowed between awaits, so other submit events may run while a
/// request is pending.
///
/// Returns the number of exchanges completed.
pub async fn run_exchange<V, T>(
    console: &RefCell<Console<V>>,
    transport: &T,
    ticket: Ticket,
) -> usize
where
    V: ConsoleView,
    T: CommandTransport,
{
    let mut completed = 0;
    let mut next = Some(ticket);
    while let Some(ticket) = next.take() {
        let result = transport.send(&ticket.request).await;
        next = console.borrow_mut().complete(ticket.id, result);
        completed += 1;
    }
    completed
}
