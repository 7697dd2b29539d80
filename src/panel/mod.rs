//! Generic tool panel: one view-state machine shared by the four tools.
//!
//! ```text
//! Idle -> Submitting -> Succeeded | RejectedInput | Failed
//! ```
//!
//! `reset` returns to `Idle` from anywhere. Every accepted submission hands
//! out a [`Ticket`]; only the most recent ticket may complete the panel, so a
//! slow response can never overwrite a newer one.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, Tool, ToolRequest, UploadFile};

pub mod envelope;
pub mod kinds;

pub use envelope::{Envelope, EnvelopeError};
pub use kinds::{Analyzer, Explainer, Optimizer, Scanner, ToolKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Submitting,
    Succeeded(T),
    RejectedInput { message: String },
    Failed { message: String },
}

/// Boolean projection of [`ViewState`], as a template would bind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFlags {
    pub loading: bool,
    pub response_received: bool,
    pub invalid_input: bool,
    pub failed: bool,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    tool: Tool,
    request: ToolRequest,
}

impl Ticket {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn request(&self) -> &ToolRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission or a reset happened; the outcome was dropped.
    Stale,
}

#[derive(Debug)]
pub struct Panel<K: ToolKind> {
    input: String,
    selected_file: Option<UploadFile>,
    state: ViewState<K::Output>,
    expanded: BTreeSet<String>,
    generation: u64,
    kind: PhantomData<K>,
}

impl<K: ToolKind> Default for Panel<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ToolKind> Panel<K> {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            selected_file: None,
            state: ViewState::Idle,
            expanded: BTreeSet::new(),
            generation: 0,
            kind: PhantomData,
        }
    }

    pub fn tool(&self) -> Tool {
        K::TOOL
    }

    pub fn title(&self) -> &'static str {
        K::TITLE
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn select_file(&mut self, file: UploadFile) {
        self.selected_file = Some(file);
    }

    pub fn selected_file(&self) -> Option<&UploadFile> {
        self.selected_file.as_ref()
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected_file.as_ref().map(UploadFile::name)
    }

    /// Starts a text submission. Whitespace-only input is ignored.
    pub fn submit_text(&mut self) -> Option<Ticket> {
        if self.input.trim().is_empty() {
            debug!(tool = %K::TOOL, "ignoring empty source text");
            return None;
        }

        let request = ToolRequest::Text(self.input.clone());
        Some(self.begin(request))
    }

    /// Starts a file submission. Without a selected file nothing happens.
    pub fn submit_file(&mut self) -> Option<Ticket> {
        let Some(file) = self.selected_file.clone() else {
            debug!(tool = %K::TOOL, "ignoring upload without a selected file");
            return None;
        };

        Some(self.begin(ToolRequest::File(file)))
    }

    fn begin(&mut self, request: ToolRequest) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Submitting;
        self.expanded.clear();

        debug!(
            tool = %K::TOOL,
            generation = self.generation,
            request = %request.describe(),
            "submitting"
        );

        Ticket {
            generation: self.generation,
            tool: K::TOOL,
            request,
        }
    }

    pub fn complete(&mut self, ticket: &Ticket, outcome: Result<Value, ApiError>) -> Completion {
        if ticket.generation != self.generation || !matches!(self.state, ViewState::Submitting) {
            debug!(
                tool = %K::TOOL,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return Completion::Stale;
        }

        self.state = match outcome {
            Ok(body) => match envelope::decode::<K::Output>(K::TOOL, body) {
                Ok(Envelope::Accepted(result)) => {
                    self.expanded.clear();
                    ViewState::Succeeded(result)
                }
                Ok(Envelope::Rejected(message)) => {
                    debug!(tool = %K::TOOL, %message, "backend rejected input");
                    ViewState::RejectedInput { message }
                }
                Err(error) => {
                    warn!(tool = %K::TOOL, %error, "malformed backend response");
                    ViewState::Failed {
                        message: error.to_string(),
                    }
                }
            },
            Err(error) => {
                warn!(tool = %K::TOOL, %error, "request failed");
                ViewState::Failed {
                    message: error.to_string(),
                }
            }
        };

        Completion::Applied
    }

    /// Back to `Idle`: clears input, selected file, result and sections.
    /// Any request still in flight is dropped when it lands.
    pub fn reset(&mut self) {
        self.input.clear();
        self.selected_file = None;
        self.state = ViewState::Idle;
        self.expanded.clear();
        self.generation += 1;
    }

    pub fn toggle_section(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn expanded_sections(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    /// Collapsible sections of the current result; empty unless succeeded.
    pub fn section_keys(&self) -> Vec<String> {
        self.result().map(K::section_keys).unwrap_or_default()
    }

    pub fn state(&self) -> &ViewState<K::Output> {
        &self.state
    }

    pub fn result(&self) -> Option<&K::Output> {
        match &self.state {
            ViewState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.state, ViewState::Submitting)
    }

    pub fn response_received(&self) -> bool {
        matches!(self.state, ViewState::Succeeded(_))
    }

    pub fn invalid_input(&self) -> bool {
        matches!(self.state, ViewState::RejectedInput { .. })
    }

    pub fn rejection(&self) -> Option<&str> {
        match &self.state {
            ViewState::RejectedInput { message } => Some(message),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn flags(&self) -> ViewFlags {
        ViewFlags {
            loading: self.loading(),
            response_received: self.response_received(),
            invalid_input: self.invalid_input(),
            failed: self.failure().is_some(),
        }
    }
}

/// Issues the ticket's request and feeds the outcome back into the panel.
pub async fn drive<K: ToolKind>(
    client: &ApiClient,
    panel: &mut Panel<K>,
    ticket: Ticket,
) -> Completion {
    let outcome = client.submit(ticket.tool(), ticket.request()).await;
    let completion = panel.complete(&ticket, outcome);

    debug!(
        tool = %ticket.tool(),
        generation = ticket.generation(),
        ?completion,
        "response handled"
    );

    completion
}
