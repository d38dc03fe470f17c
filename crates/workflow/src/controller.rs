//! Workflow controller — owns the session state and every command on it.
//!
//! One controller per session. It holds the active mode, the live inputs,
//! the result on screen, an optional selected hook and the in-memory view of
//! history. Commands mutate that state; the only suspension point is the
//! gateway call inside [`WorkflowController::generate`].
//!
//! Overlapping generations are resolved by sequence number. Each request is
//! issued as a [`GenerationTicket`]; only the most recently issued ticket may
//! change what is shown. Mode changes, transfers and history restores retire
//! the outstanding ticket, so a late response can never overwrite the screen
//! the user moved to.

use std::sync::Arc;

use hookstudio_core::error::{GenerationFailure, ValidationError};
use hookstudio_core::history::HistoryEntry;
use hookstudio_core::studio::{GenerationResult, InputSnapshot, Mode, ParsedItem};
use hookstudio_history::HistoryStore;
use tracing::{debug, info, warn};

use crate::gateway::GenerationGateway;
use crate::parser::{self, Rendering};
use crate::transfer::{self, NextStep};

/// One issued generation request.
///
/// Carries a frozen copy of the mode and inputs at issue time, so edits made
/// while the request is in flight do not leak into its history entry.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    seq: u64,
    mode: Mode,
    input: InputSnapshot,
}

impl GenerationTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Send this ticket's request through `gateway`.
    pub async fn run(&self, gateway: &GenerationGateway) -> Result<String, GenerationFailure> {
        gateway.generate(self.mode, &self.input).await
    }
}

/// What happened to a finished ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome is now the current result
    Applied,
    /// A newer request or a navigation superseded this one
    Discarded,
}

pub struct WorkflowController {
    mode: Mode,
    input: InputSnapshot,
    result: Option<GenerationResult>,
    selected_item: Option<usize>,
    history: Vec<HistoryEntry>,
    history_store: HistoryStore,
    gateway: Arc<GenerationGateway>,
    issued: u64,
    pending: Option<u64>,
}

impl WorkflowController {
    /// Start a session in hooks mode with default inputs and the persisted
    /// history loaded.
    pub fn new(gateway: Arc<GenerationGateway>, history_store: HistoryStore) -> Self {
        let history = history_store.load();
        debug!(entries = history.len(), "History loaded");
        Self {
            mode: Mode::default(),
            input: InputSnapshot::default(),
            result: None,
            selected_item: None,
            history,
            history_store,
            gateway,
            issued: 0,
            pending: None,
        }
    }

    // --- Read state ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.selected_item
    }

    pub fn gateway(&self) -> Arc<GenerationGateway> {
        self.gateway.clone()
    }

    /// Every history entry, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History entries produced in the active mode, newest first.
    pub fn history_for_mode(&self) -> Vec<&HistoryEntry> {
        self.history.iter().filter(|e| e.mode == self.mode).collect()
    }

    /// True while the most recently issued request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Selectable items in the current result. Empty unless the active mode
    /// is hooks and the result contains a numbered list.
    pub fn parsed_items(&self) -> Vec<ParsedItem> {
        self.result
            .as_ref()
            .map(|r| parser::parse(self.mode, &r.content))
            .unwrap_or_default()
    }

    /// How the current result should be displayed, if there is one.
    pub fn rendering(&self) -> Option<Rendering<'_>> {
        self.result
            .as_ref()
            .map(|r| parser::classify(self.mode, &r.content))
    }

    /// Follow-ups on offer. Only a finished result has any.
    pub fn next_steps(&self) -> &'static [NextStep] {
        match &self.result {
            Some(r) if r.is_done() => transfer::next_steps(self.mode),
            _ => &[],
        }
    }

    // --- Commands ---

    /// Switch the active mode. Inputs are kept; the result is cleared.
    pub fn change_mode(&mut self, mode: Mode) {
        debug!(from = %self.mode, to = %mode, "Mode changed");
        self.mode = mode;
        self.reset_result();
    }

    /// Edit the live inputs in place.
    pub fn update_input(&mut self, edit: impl FnOnce(&mut InputSnapshot)) {
        edit(&mut self.input);
    }

    /// Replace the live inputs wholesale.
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    /// Drop all accumulated additional context.
    pub fn clear_additional_info(&mut self) {
        self.input.additional_info = None;
    }

    /// Validate the inputs and issue a ticket for a new request.
    ///
    /// Publishes the interim placeholder when nothing is on screen yet; an
    /// existing result stays visible until the new one lands.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, ValidationError> {
        self.input.validate()?;

        self.issued += 1;
        self.pending = Some(self.issued);
        if self.result.is_none() {
            self.result = Some(GenerationResult::placeholder());
        }

        debug!(seq = self.issued, mode = %self.mode, "Generation issued");
        Ok(GenerationTicket {
            seq: self.issued,
            mode: self.mode,
            input: self.input.clone(),
        })
    }

    /// Apply the outcome of `ticket`.
    ///
    /// Only the latest issued ticket has any effect. A superseded ticket is
    /// dropped before it can touch the result or history.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<String, GenerationFailure>,
    ) -> Completion {
        if self.pending != Some(ticket.seq) {
            debug!(seq = ticket.seq, latest = self.issued, "Discarding stale generation");
            return Completion::Discarded;
        }

        let next = match outcome {
            Ok(content) => {
                let title = ticket.mode.title();
                let entry = HistoryEntry::record(ticket.mode, title, content.clone(), &ticket.input);
                self.history = self.history_store.append(entry);
                GenerationResult::done(title, content)
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "Generation failed");
                GenerationResult::failed()
            }
        };

        info!(seq = ticket.seq, mode = %ticket.mode, status = ?next.status, "Generation finished");
        self.pending = None;
        self.selected_item = None;
        self.result = Some(next);
        Completion::Applied
    }

    /// Generate content for the active mode and inputs.
    pub async fn generate(&mut self) -> Result<Completion, ValidationError> {
        let ticket = self.begin_generation()?;
        let gateway = self.gateway.clone();
        let outcome = ticket.run(&gateway).await;
        Ok(self.complete_generation(ticket, outcome))
    }

    /// A fresh generation with the same mode and inputs.
    pub async fn generate_variation(&mut self) -> Result<Completion, ValidationError> {
        self.generate().await
    }

    /// Show a stored entry as the current result. Inputs are not restored.
    pub fn select_history_entry(&mut self, entry: &HistoryEntry) {
        self.pending = None;
        self.selected_item = None;
        self.result = Some(GenerationResult::done(&entry.title, &entry.content));
    }

    /// Mark one parsed item as the hook to carry forward.
    pub fn select_item(&mut self, index: usize) -> Result<ParsedItem, ValidationError> {
        let mut items = self.parsed_items();
        if index >= items.len() {
            return Err(ValidationError::ItemOutOfRange {
                index,
                len: items.len(),
            });
        }
        self.selected_item = Some(index);
        Ok(items.swap_remove(index))
    }

    /// The selected item, if it still exists in the current result.
    pub fn selected(&self) -> Option<ParsedItem> {
        let index = self.selected_item?;
        self.parsed_items().into_iter().nth(index)
    }

    pub fn clear_selection(&mut self) {
        self.selected_item = None;
    }

    /// Carry the current result into `target` through the next-step table.
    pub fn transfer_context(&mut self, target: Mode) -> Result<(), ValidationError> {
        if !transfer::allows(self.mode, target) {
            return Err(ValidationError::NotTransferable {
                from: self.mode.to_string(),
                to: target.to_string(),
            });
        }
        let result = match &self.result {
            Some(r) if r.is_done() => r,
            _ => return Err(ValidationError::NoResult),
        };

        let items = parser::parse(self.mode, &result.content);
        let context = transfer::context_for(self.mode, &result.content, &items, self.selected_item);
        self.carry_context(target, &context)
    }

    /// Switch to `target` and append `context` to the additional info under
    /// a header naming the current mode.
    pub fn carry_context(&mut self, target: Mode, context: &str) -> Result<(), ValidationError> {
        if target == self.mode {
            return Err(ValidationError::NotTransferable {
                from: self.mode.to_string(),
                to: target.to_string(),
            });
        }

        let block = transfer::context_block(self.mode.title(), context);
        info!(from = %self.mode, to = %target, chars = context.len(), "Context transferred");
        self.input.append_context(&block);
        self.mode = target;
        self.reset_result();
        Ok(())
    }

    /// Remove all persisted history.
    pub fn clear_history(&mut self) {
        self.history_store.clear();
        self.history.clear();
    }

    fn reset_result(&mut self) {
        self.result = None;
        self.selected_item = None;
        self.pending = None;
    }
}
