//! Contact form: field rules, touched/error bookkeeping and the submit flow.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::notify::{Severity, ToastRequest};
use crate::relay::{EmailParams, EmailRelay, RelayError};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Form control name, also used for element ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Error text for `value`, or an empty string if it passes.
    pub fn validate(&self, value: &str) -> &'static str {
        match self {
            Field::Name => validate_name(value),
            Field::Email => validate_email(value),
            Field::Message => validate_message(value),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_name(value: &str) -> &'static str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Name is required"
    } else if trimmed.encode_utf16().count() < 2 {
        "Name must be at least 2 characters"
    } else {
        ""
    }
}

pub fn validate_email(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "Email is required"
    } else if !EMAIL_PATTERN.is_match(value) {
        "Please enter a valid email address"
    } else {
        ""
    }
}

pub fn validate_message(value: &str) -> &'static str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Message is required"
    } else if trimmed.encode_utf16().count() < 10 {
        "Message must be at least 10 characters"
    } else {
        ""
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Invalid,
    Submitting,
    SubmittedSuccess,
    SubmittedError,
}

/// What the caller should do after asking to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; show this notification, nothing is sent.
    Rejected(ToastRequest),
    /// Send these values, then report back with [`ContactForm::finish_submit`].
    Ready(EmailParams),
    /// A submission is already in flight.
    Busy,
}

pub fn validation_toast() -> ToastRequest {
    ToastRequest::new("Validation Error", "Please fix the errors in the form", Severity::Destructive)
}

pub fn success_toast() -> ToastRequest {
    ToastRequest::new("Success!", "Your message has been sent successfully", Severity::Success)
}

pub fn failure_toast(error: &RelayError) -> ToastRequest {
    let description = match error {
        RelayError::Rejected { .. } | RelayError::Transport(_) => "Failed to send message. Please try again.",
        RelayError::Unexpected(_) => "An unexpected error occurred. Please try again.",
    };
    ToastRequest::new("Error", description, Severity::Destructive)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    values: [String; 3],
    errors: [String; 3],
    touched: [bool; 3],
    phase: Phase,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            errors: Default::default(),
            touched: [false; 3],
            phase: Phase::Idle,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Recorded error; empty when the field passed or was never checked.
    pub fn error(&self, field: Field) -> &str {
        &self.errors[field.index()]
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    /// Error to show inline: only once the field has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        let error = self.error(field);
        (self.is_touched(field) && !error.is_empty()).then_some(error)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    fn settle(&mut self) {
        if matches!(self.phase, Phase::Invalid | Phase::SubmittedSuccess | Phase::SubmittedError) {
            self.phase = Phase::Idle;
        }
    }

    /// Keystroke. Touched fields are re-checked as they change.
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.settle();
        let i = field.index();
        self.values[i] = value.into();
        if self.touched[i] {
            self.errors[i] = field.validate(&self.values[i]).to_string();
        }
    }

    pub fn blur(&mut self, field: Field) {
        if self.is_submitting() {
            return;
        }
        self.settle();
        let i = field.index();
        self.touched[i] = true;
        self.errors[i] = field.validate(&self.values[i]).to_string();
    }

    /// Validate everything and either reject or enter the submitting phase.
    pub fn begin_submit(&mut self) -> Submission {
        if self.is_submitting() {
            return Submission::Busy;
        }
        self.phase = Phase::Validating;
        for field in Field::ALL {
            let i = field.index();
            self.errors[i] = field.validate(&self.values[i]).to_string();
            self.touched[i] = true;
        }
        if self.errors.iter().any(|e| !e.is_empty()) {
            self.phase = Phase::Invalid;
            log::debug!("contact form rejected: {:?}", self.errors);
            return Submission::Rejected(validation_toast());
        }
        self.phase = Phase::Submitting;
        Submission::Ready(EmailParams {
            from_name: self.values[Field::Name.index()].clone(),
            from_email: self.values[Field::Email.index()].clone(),
            message: self.values[Field::Message.index()].clone(),
        })
    }

    /// Record the relay outcome. Success clears the form; failure keeps it.
    pub fn finish_submit(&mut self, outcome: Result<(), RelayError>) -> ToastRequest {
        match outcome {
            Ok(()) => {
                *self = Self::new();
                self.phase = Phase::SubmittedSuccess;
                log::info!("contact message sent");
                success_toast()
            }
            Err(error) => {
                self.phase = Phase::SubmittedError;
                log::warn!("contact message failed: {error}");
                failure_toast(&error)
            }
        }
    }

    /// Full submit: validate, call the relay once, record the outcome.
    /// Returns the notification to raise, or `None` if already submitting.
    pub async fn submit<R: EmailRelay>(&mut self, relay: &R) -> Option<ToastRequest> {
        match self.begin_submit() {
            Submission::Busy => None,
            Submission::Rejected(toast) => Some(toast),
            Submission::Ready(params) => {
                let outcome = relay.send(&params).await;
                Some(self.finish_submit(outcome))
            }
        }
    }
}
