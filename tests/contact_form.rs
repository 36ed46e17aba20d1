use std::cell::{Cell, RefCell};

use futures::executor::block_on;
use pretty_assertions::assert_eq;

use inkfolio_wasm::form::{ContactForm, Field, Phase, Submission};
use inkfolio_wasm::notify::Severity;
use inkfolio_wasm::relay::{EmailParams, EmailRelay, RelayError};

/// Relay that records what it was asked to send.
struct Recorder {
    calls: Cell<usize>,
    sent: RefCell<Vec<EmailParams>>,
    outcome: Result<(), RelayError>,
}

impl Recorder {
    fn answering(outcome: Result<(), RelayError>) -> Self {
        Self { calls: Cell::new(0), sent: RefCell::new(Vec::new()), outcome }
    }
}

impl EmailRelay for Recorder {
    async fn send(&self, params: &EmailParams) -> Result<(), RelayError> {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push(params.clone());
        self.outcome.clone()
    }
}

fn filled(name: &str, email: &str, message: &str) -> ContactForm {
    let mut form = ContactForm::new();
    form.change(Field::Name, name);
    form.change(Field::Email, email);
    form.change(Field::Message, message);
    form
}

fn ada() -> ContactForm {
    filled("Ada Lovelace", "ada@example.com", "Analytical engines are fascinating machines.")
}

#[test]
fn invalid_triple_is_rejected_without_a_network_call() {
    let relay = Recorder::answering(Ok(()));
    let mut form = filled("", "x", "too short");

    let toast = block_on(form.submit(&relay)).unwrap();

    assert_eq!(relay.calls.get(), 0);
    assert_eq!(toast.title, "Validation Error");
    assert_eq!(toast.description, "Please fix the errors in the form");
    assert_eq!(toast.severity, Severity::Destructive);
    assert_eq!(form.error(Field::Name), "Name is required");
    assert_eq!(form.error(Field::Email), "Please enter a valid email address");
    assert_eq!(form.error(Field::Message), "Message must be at least 10 characters");
    assert!(Field::ALL.iter().all(|f| form.is_touched(*f)));
    assert_eq!(form.phase(), Phase::Invalid);
    assert!(!form.is_submitting());
}

#[test]
fn one_bad_field_marks_every_field_touched() {
    let relay = Recorder::answering(Ok(()));
    let mut form = filled("Ada", "ada@example.com", "short");

    block_on(form.submit(&relay));

    assert_eq!(relay.calls.get(), 0);
    assert_eq!(form.visible_error(Field::Name), None);
    assert_eq!(form.visible_error(Field::Email), None);
    assert_eq!(form.visible_error(Field::Message), Some("Message must be at least 10 characters"));
    assert!(Field::ALL.iter().all(|f| form.is_touched(*f)));
}

#[test]
fn valid_submission_sends_once_and_resets() {
    let relay = Recorder::answering(Ok(()));
    let mut form = ada();
    assert!(!form.is_submitting());

    let toast = block_on(form.submit(&relay)).unwrap();

    assert_eq!(relay.calls.get(), 1);
    assert_eq!(
        relay.sent.borrow()[0],
        EmailParams {
            from_name: "Ada Lovelace".into(),
            from_email: "ada@example.com".into(),
            message: "Analytical engines are fascinating machines.".into(),
        }
    );
    assert_eq!(toast.title, "Success!");
    assert_eq!(toast.description, "Your message has been sent successfully");
    assert_eq!(toast.severity, Severity::Success);
    for field in Field::ALL {
        assert_eq!(form.value(field), "");
        assert_eq!(form.error(field), "");
        assert!(!form.is_touched(field));
    }
    assert!(!form.is_submitting());
    assert_eq!(form.phase(), Phase::SubmittedSuccess);
}

#[test]
fn submitting_flag_spans_exactly_the_relay_call() {
    let mut form = ada();
    assert!(!form.is_submitting());

    let Submission::Ready(params) = form.begin_submit() else {
        panic!("valid form should be ready to send");
    };
    assert!(form.is_submitting());
    assert_eq!(params.from_name, "Ada Lovelace");

    // A second submit while the first is in flight is ignored.
    assert_eq!(form.begin_submit(), Submission::Busy);
    let relay = Recorder::answering(Ok(()));
    assert_eq!(block_on(form.submit(&relay)), None);
    assert_eq!(relay.calls.get(), 0);

    form.finish_submit(Ok(()));
    assert!(!form.is_submitting());
}

#[test]
fn rejected_send_keeps_the_values() {
    let relay = Recorder::answering(Err(RelayError::Rejected { status: 400, body: "bad template".into() }));
    let mut form = ada();

    let toast = block_on(form.submit(&relay)).unwrap();

    assert_eq!(relay.calls.get(), 1);
    assert_eq!(toast.title, "Error");
    assert_eq!(toast.description, "Failed to send message. Please try again.");
    assert_eq!(toast.severity, Severity::Destructive);
    assert_eq!(form.value(Field::Name), "Ada Lovelace");
    assert_eq!(form.value(Field::Message), "Analytical engines are fascinating machines.");
    assert_eq!(form.phase(), Phase::SubmittedError);
    assert!(!form.is_submitting());
}

#[test]
fn unreachable_relay_reads_as_a_failed_send() {
    let relay = Recorder::answering(Err(RelayError::Transport("TypeError: Failed to fetch".into())));
    let mut form = ada();

    let toast = block_on(form.submit(&relay)).unwrap();

    assert_eq!(relay.calls.get(), 1);
    assert_eq!(toast.title, "Error");
    assert_eq!(toast.description, "Failed to send message. Please try again.");
    assert_eq!(toast.severity, Severity::Destructive);
    assert_eq!(form.value(Field::Name), "Ada Lovelace");
    assert_eq!(form.phase(), Phase::SubmittedError);
    assert!(!form.is_submitting());
}

#[test]
fn local_fault_is_reported_as_unexpected() {
    let relay = Recorder::answering(Err(RelayError::Unexpected("no window".into())));
    let mut form = ada();

    let toast = block_on(form.submit(&relay)).unwrap();

    assert_eq!(toast.description, "An unexpected error occurred. Please try again.");
    assert_eq!(toast.severity, Severity::Destructive);
    assert_eq!(form.value(Field::Email), "ada@example.com");
    assert!(!form.is_submitting());
}

#[test]
fn retry_after_failure_sends_again() {
    let failing = Recorder::answering(Err(RelayError::Transport("offline".into())));
    let working = Recorder::answering(Ok(()));
    let mut form = ada();

    block_on(form.submit(&failing));
    let toast = block_on(form.submit(&working)).unwrap();

    assert_eq!(failing.calls.get(), 1);
    assert_eq!(working.calls.get(), 1);
    assert_eq!(toast.severity, Severity::Success);
}

#[test]
fn editing_after_an_outcome_returns_to_idle() {
    let relay = Recorder::answering(Ok(()));
    let mut form = filled("", "", "");
    block_on(form.submit(&relay));
    assert_eq!(form.phase(), Phase::Invalid);

    form.change(Field::Name, "Ada");
    assert_eq!(form.phase(), Phase::Idle);
    assert_eq!(form.visible_error(Field::Name), None);
}
