//! Submission/completion state machine.
//!
//! [`Console`] never performs I/O. A submission produces a [`Ticket`] the
//! host sends through its transport; the host then reports the result with
//! [`Console::complete`]. Under [`ExchangePolicy::Serialized`] completing a
//! ticket may release the next queued one, which the host sends in turn
//! (see [`crate::transport::run_exchange`]).

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::command::{Command, CommandRequest};
use crate::config::{ConsoleConfig, ExchangePolicy};
use crate::error::Result;
use crate::log::{EntryKind, OutputLog};
use crate::markup::render_entry;
use crate::response::CommandResponse;
use crate::view::ConsoleView;

/// Bounded queue limit for host-drained diagnostics.
const MAX_DIAGNOSTICS: usize = 1024;

fn push_bounded<T>(queue: &mut Vec<T>, item: T, limit: usize) {
    if queue.len() >= limit {
        let overflow = queue.len() - limit + 1;
        queue.drain(..overflow);
    }
    queue.push(item);
}

/// One exchange waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Monotonic, starting at 1, in submission order.
    pub id: u64,
    pub request: CommandRequest,
}

/// Result of handling one submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input: nothing echoed, nothing sent.
    Ignored,
    /// Echoed; the host must send this ticket now.
    Dispatch(Ticket),
    /// Echoed; held until the in-flight exchange completes.
    Queued { id: u64 },
}

#[derive(Debug, Serialize)]
struct DiagnosticRecord<'a> {
    event: &'a str,
    ticket: Option<u64>,
    in_flight: usize,
    queued: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

/// Command console controller state.
pub struct Console<V> {
    config: ConsoleConfig,
    view: V,
    log: OutputLog,
    next_ticket: u64,
    in_flight: BTreeSet<u64>,
    queue: VecDeque<Ticket>,
    /// Latest submission that has not completed yet. Its text stays in the
    /// input until the reply arrives.
    pending_input: Option<(u64, Command)>,
    /// JSONL lifecycle records, drained by the host.
    diagnostics: Vec<String>,
}

impl<V: ConsoleView> Console<V> {
    #[must_use]
    pub fn new(config: ConsoleConfig, view: V) -> Self {
        Self {
            config,
            view,
            log: OutputLog::new(),
            next_ticket: 1,
            in_flight: BTreeSet::new(),
            queue: VecDeque::new(),
            pending_input: None,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    /// Exchanges sent but not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Exchanges echoed but not yet sent.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.queue.is_empty()
    }

    /// Handle a submit event using the view's current input value.
    ///
    /// Under the serialized policy, resubmitting the text of the command
    /// still awaiting its reply is ignored: the input is only cleared once
    /// the reply arrives, so a second submit would otherwise send it again.
    pub fn submit_from_view(&mut self) -> SubmitOutcome {
        let raw = self.view.input_value();
        if let Some(id) = self.resubmitted_ticket(&raw) {
            debug!(ticket = id, "pending command resubmitted; ignored");
            self.record("submit_duplicate", Some(id), None);
            return SubmitOutcome::Ignored;
        }
        self.submit(&raw)
    }

    /// Handle a submit event for `raw` input.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let Some(command) = Command::parse(raw) else {
            trace!("blank submission ignored");
            self.record("submit_ignored", None, None);
            return SubmitOutcome::Ignored;
        };

        let id = self.next_ticket;
        self.next_ticket += 1;

        let echo = format!("{}{}", self.config.echo_prefix, command);
        self.append(id, EntryKind::Echo, echo);
        self.pending_input = Some((id, command.clone()));

        let ticket = Ticket {
            id,
            request: CommandRequest::new(&self.config.endpoint, &self.config.field, command),
        };

        match self.config.policy {
            ExchangePolicy::Concurrent => SubmitOutcome::Dispatch(self.dispatch(ticket)),
            ExchangePolicy::Serialized if self.in_flight.is_empty() => {
                self.view.set_busy(true);
                SubmitOutcome::Dispatch(self.dispatch(ticket))
            }
            ExchangePolicy::Serialized => {
                debug!(
                    ticket = id,
                    ahead = self.in_flight.len() + self.queue.len(),
                    "command queued"
                );
                self.queue.push_back(ticket);
                self.record("queued", Some(id), None);
                SubmitOutcome::Queued { id }
            }
        }
    }

    /// Apply the transport result for ticket `id`.
    ///
    /// Returns the next ticket the host must send, if completing this one
    /// released it from the queue.
    pub fn complete(&mut self, id: u64, result: Result<CommandResponse>) -> Option<Ticket> {
        if !self.in_flight.remove(&id) {
            warn!(ticket = id, "completion for unknown ticket ignored");
            self.record("stale_completion", Some(id), None);
            return None;
        }
        if self.pending_input.as_ref().is_some_and(|(pending, _)| *pending == id) {
            self.pending_input = None;
        }

        match result {
            Ok(response) => {
                let text = response.output_or(&self.config.missing_output).to_owned();
                self.append(id, EntryKind::Reply, text);
                self.view.clear_input();
                self.record("reply", Some(id), None);
            }
            Err(err) => {
                warn!(ticket = id, error = %err, "command exchange failed");
                let message = err.to_string();
                self.append(id, EntryKind::Error, format!("error: {message}"));
                self.record("error", Some(id), Some(message.as_str()));
            }
        }

        if self.config.policy != ExchangePolicy::Serialized {
            return None;
        }
        match self.queue.pop_front() {
            Some(next) => Some(self.dispatch(next)),
            None => {
                self.view.set_busy(false);
                None
            }
        }
    }

    /// Drain buffered JSONL diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    fn resubmitted_ticket(&self, raw: &str) -> Option<u64> {
        if self.config.policy != ExchangePolicy::Serialized {
            return None;
        }
        let (id, pending) = self.pending_input.as_ref()?;
        let command = Command::parse(raw)?;
        (command == *pending).then_some(*id)
    }

    fn dispatch(&mut self, ticket: Ticket) -> Ticket {
        debug!(
            ticket = ticket.id,
            endpoint = %ticket.request.endpoint,
            "dispatching command"
        );
        self.in_flight.insert(ticket.id);
        self.record("dispatch", Some(ticket.id), None);
        ticket
    }

    fn append(&mut self, ticket: u64, kind: EntryKind, text: String) {
        let entry = self.log.push(ticket, kind, text);
        let markup = render_entry(entry, self.config.markup);
        self.view.append_markup(&markup);
        self.view.scroll_to_bottom();
    }

    fn record(&mut self, event: &str, ticket: Option<u64>, detail: Option<&str>) {
        let row = DiagnosticRecord {
            event,
            ticket,
            in_flight: self.in_flight.len(),
            queued: self.queue.len(),
            detail,
        };
        if let Ok(line) = serde_json::to_string(&row) {
            push_bounded(&mut self.diagnostics, line, MAX_DIAGNOSTICS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, SubmitOutcome, Ticket, push_bounded};
    use crate::config::{ConsoleConfig, ExchangePolicy};
    use crate::error::ConsoleError;
    use crate::log::EntryKind;
    use crate::response::CommandResponse;
    use crate::view::MemoryView;
    use pretty_assertions::assert_eq;

    fn console(policy: ExchangePolicy) -> Console<MemoryView> {
        let config = ConsoleConfig {
            policy,
            ..ConsoleConfig::default()
        };
        Console::new(config, MemoryView::new())
    }

    fn dispatched(outcome: SubmitOutcome) -> Ticket {
        match outcome {
            SubmitOutcome::Dispatch(ticket) => ticket,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    fn texts(console: &Console<MemoryView>) -> Vec<String> {
        console.log().iter().map(|e| e.text.clone()).collect()
    }

    #[test]
    fn blank_input_has_no_side_effects() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("   \t ");
        assert_eq!(c.submit_from_view(), SubmitOutcome::Ignored);
        assert!(c.log().is_empty());
        assert!(c.view().fragments().is_empty());
        assert!(!c.view().is_busy());
        assert_eq!(c.view().input(), "   \t ");
        assert!(c.is_idle());
    }

    #[test]
    fn submit_echoes_before_completion() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("  echo hello ");
        let ticket = dispatched(c.submit_from_view());
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.request.command.as_str(), "echo hello");
        assert_eq!(texts(&c), ["> echo hello"]);
        assert_eq!(c.in_flight(), 1);
        assert!(c.view().is_busy());
    }

    #[test]
    fn successful_exchange_appends_reply_clears_input_and_scrolls() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("echo hello");
        let ticket = dispatched(c.submit_from_view());

        let next = c.complete(ticket.id, Ok(CommandResponse::with_output("hello")));
        assert_eq!(next, None);
        assert_eq!(texts(&c), ["> echo hello", "hello"]);
        assert_eq!(c.view().input(), "");
        assert_eq!(c.view().scroll_top(), c.view().scroll_height());
        assert!(!c.view().is_busy());
        assert!(c.is_idle());
    }

    #[test]
    fn missing_output_renders_placeholder() {
        let mut c = console(ExchangePolicy::Serialized);
        let ticket = dispatched(c.submit("/import"));
        c.complete(ticket.id, Ok(CommandResponse::default()));
        assert_eq!(texts(&c), ["> /import", "(no output)"]);
    }

    #[test]
    fn failed_exchange_appends_error_and_keeps_input() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("/new bob");
        let ticket = dispatched(c.submit_from_view());

        c.complete(ticket.id, Err(ConsoleError::Network("connection refused".into())));
        assert_eq!(
            texts(&c),
            ["> /new bob", "error: network failure: connection refused"]
        );
        assert_eq!(c.log().last().map(|e| e.kind), Some(EntryKind::Error));
        assert_eq!(c.view().input(), "/new bob");
        assert!(!c.view().is_busy());
    }

    #[test]
    fn serialized_resubmit_of_pending_input_is_ignored() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("/new alice");
        let ticket = dispatched(c.submit_from_view());

        c.view_mut().set_input(" /new alice ");
        assert_eq!(c.submit_from_view(), SubmitOutcome::Ignored);
        assert_eq!(texts(&c), ["> /new alice"]);
        assert_eq!((c.in_flight(), c.queued()), (1, 0));

        c.view_mut().set_input("/list");
        assert_eq!(c.submit_from_view(), SubmitOutcome::Queued { id: 2 });

        let next = c.complete(ticket.id, Ok(CommandResponse::with_output("ok")));
        assert_eq!(next.map(|t| t.id), Some(2));
        assert!(c.take_diagnostics().iter().any(|l| l.contains("submit_duplicate")));
    }

    #[test]
    fn failed_command_can_be_resubmitted_for_retry() {
        let mut c = console(ExchangePolicy::Serialized);
        c.view_mut().set_input("/new bob");
        let ticket = dispatched(c.submit_from_view());
        c.complete(ticket.id, Err(ConsoleError::Network("offline".into())));

        let retry = dispatched(c.submit_from_view());
        assert_eq!(retry.id, 2);
        assert_eq!(retry.request.command.as_str(), "/new bob");
    }

    #[test]
    fn concurrent_policy_sends_repeated_input_again() {
        let mut c = console(ExchangePolicy::Concurrent);
        c.view_mut().set_input("ls");
        dispatched(c.submit_from_view());
        dispatched(c.submit_from_view());
        assert_eq!(c.in_flight(), 2);
    }

    #[test]
    fn concurrent_replies_follow_arrival_order() {
        let mut c = console(ExchangePolicy::Concurrent);
        let first = dispatched(c.submit("one"));
        let second = dispatched(c.submit("two"));
        assert_eq!(c.in_flight(), 2);
        assert!(!c.view().is_busy());
        assert_eq!(texts(&c), ["> one", "> two"]);

        assert_eq!(c.complete(second.id, Ok(CommandResponse::with_output("2"))), None);
        assert_eq!(c.complete(first.id, Ok(CommandResponse::with_output("1"))), None);
        assert_eq!(texts(&c), ["> one", "> two", "2", "1"]);
    }

    #[test]
    fn serialized_submissions_queue_and_release_in_order() {
        let mut c = console(ExchangePolicy::Serialized);
        let first = dispatched(c.submit("one"));
        assert_eq!(c.submit("two"), SubmitOutcome::Queued { id: 2 });
        assert_eq!(c.submit("three"), SubmitOutcome::Queued { id: 3 });
        assert_eq!(texts(&c), ["> one", "> two", "> three"]);
        assert_eq!((c.in_flight(), c.queued()), (1, 2));

        let second = c
            .complete(first.id, Ok(CommandResponse::with_output("1")))
            .expect("second released");
        assert_eq!(second.id, 2);
        assert!(c.view().is_busy());

        let third = c
            .complete(second.id, Err(ConsoleError::Status { status: 500 }))
            .expect("third released");
        assert_eq!(c.complete(third.id, Ok(CommandResponse::with_output("3"))), None);

        assert_eq!(
            texts(&c),
            [
                "> one",
                "> two",
                "> three",
                "1",
                "error: server responded with HTTP 500",
                "3"
            ]
        );
        assert!(c.is_idle());
        assert!(!c.view().is_busy());
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut c = console(ExchangePolicy::Concurrent);
        let ticket = dispatched(c.submit("ls"));
        c.complete(ticket.id, Ok(CommandResponse::with_output("a")));
        c.complete(ticket.id, Ok(CommandResponse::with_output("b")));
        c.complete(99, Ok(CommandResponse::with_output("c")));
        assert_eq!(texts(&c), ["> ls", "a"]);
    }

    #[test]
    fn echo_prefix_is_configurable() {
        let config = ConsoleConfig {
            echo_prefix: "$ ".into(),
            ..ConsoleConfig::default()
        };
        let mut c = Console::new(config, MemoryView::new());
        c.submit("whoami");
        assert_eq!(texts(&c), ["$ whoami"]);
        assert_eq!(
            c.view().fragments()[0],
            "<div class=\"cmdterm-echo\">$ whoami</div>"
        );
    }

    #[test]
    fn diagnostics_are_jsonl_and_drained() {
        let mut c = console(ExchangePolicy::Serialized);
        c.submit(" ");
        let ticket = dispatched(c.submit("ls"));
        c.submit("pwd");
        c.complete(ticket.id, Err(ConsoleError::Network("offline".into())));

        let lines = c.take_diagnostics();
        let events: Vec<String> = lines
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).expect("jsonl line");
                value["event"].as_str().expect("event field").to_owned()
            })
            .collect();
        assert_eq!(
            events,
            ["submit_ignored", "dispatch", "queued", "error", "dispatch"]
        );
        assert!(lines[3].contains("\"detail\":\"network failure: offline\""));
        assert!(c.take_diagnostics().is_empty());
    }

    #[test]
    fn push_bounded_drops_oldest() {
        let mut q = vec![1, 2, 3];
        push_bounded(&mut q, 4, 3);
        assert_eq!(q, [2, 3, 4]);
    }
}
