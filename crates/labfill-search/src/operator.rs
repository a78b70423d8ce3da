//! The operator interaction boundary.
//!
//! The engine never talks to a UI directly. It reports notices and asks the
//! one yes/no question it has ("continue with the next field?") through
//! [`Operator`]. Answering blocks the round until the operator decides.

use std::collections::VecDeque;

/// Question asked after a round finds nothing.
pub const CONTINUE_PROMPT: &str = "Continue searching by the next field?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Whoever drives autofill: a terminal, a GUI, or a test script.
pub trait Operator {
    /// Show an info, warning or error notice.
    fn notify(&mut self, notice: &Notice);

    /// Ask a yes/no question and wait for the answer.
    fn confirm_continue(&mut self, prompt: &str) -> bool;
}

/// Operator with scripted answers that records everything it is shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingOperator {
    answers: VecDeque<bool>,
    default_answer: bool,
    notices: Vec<Notice>,
    prompts: Vec<String>,
}

impl RecordingOperator {
    /// Declines every continue prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers prompts in order, then falls back to declining.
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answer used once scripted answers run out.
    #[must_use]
    pub fn answering(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn notices_of(&self, severity: Severity) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.severity == severity)
    }
}

impl Operator for RecordingOperator {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn confirm_continue(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }
}
