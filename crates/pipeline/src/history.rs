//! The in-memory execution history.
//!
//! [`ExecutionHistory`] is the state container the session owns: an
//! append-only list of [`PipelineExecution`] records, newest first, plus the
//! identifier of the record currently being viewed. Records are never removed;
//! they are only updated in place by identifier.

use crate::{ExecutionId, HistoryError, PipelineExecution, ReasoningStep};

/// Newest-first list of execution records plus the active selection.
#[derive(Debug, Clone, Default)]
pub struct ExecutionHistory {
    executions: Vec<PipelineExecution>,
    active: Option<ExecutionId>,
}

impl ExecutionHistory {
    /// An empty history with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from existing records, given newest first. The first
    /// record becomes active.
    ///
    /// Fails on the first identifier that appears twice.
    pub fn with_records(records: Vec<PipelineExecution>) -> Result<Self, HistoryError> {
        let mut history = Self::new();
        for execution in records.into_iter().rev() {
            history.push_front(execution)?;
        }
        Ok(history)
    }

    /// Inserts `execution` at the head and makes it the active record.
    pub fn push_front(&mut self, execution: PipelineExecution) -> Result<ExecutionId, HistoryError> {
        let id = execution.id();
        if self.get(id).is_some() {
            return Err(HistoryError::DuplicateExecution { id });
        }
        self.executions.insert(0, execution);
        self.active = Some(id);
        Ok(id)
    }

    /// Looks a record up by identifier.
    pub fn get(&self, id: ExecutionId) -> Option<&PipelineExecution> {
        self.executions.iter().find(|e| e.id() == id)
    }

    /// Applies `f` to the record with identifier `id`.
    pub fn update<F>(&mut self, id: ExecutionId, f: F) -> Result<(), HistoryError>
    where
        F: FnOnce(&mut PipelineExecution) -> Result<(), HistoryError>,
    {
        let execution = self
            .executions
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(HistoryError::UnknownExecution { id })?;
        f(execution)
    }

    /// Marks the record completed with the model's steps and conclusion.
    pub fn complete(
        &mut self,
        id: ExecutionId,
        reasoning_steps: Vec<ReasoningStep>,
        final_conclusion: impl Into<String>,
    ) -> Result<(), HistoryError> {
        let final_conclusion = final_conclusion.into();
        self.update(id, move |e| e.complete(reasoning_steps, final_conclusion))
    }

    /// Marks the record failed with a fixed conclusion text.
    pub fn fail(&mut self, id: ExecutionId, final_conclusion: impl Into<String>) -> Result<(), HistoryError> {
        let final_conclusion = final_conclusion.into();
        self.update(id, move |e| e.fail(final_conclusion))
    }

    /// Records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &PipelineExecution> {
        self.executions.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// `true` before the first submission.
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// Identifier of the record being viewed, if any.
    pub fn active_id(&self) -> Option<ExecutionId> {
        self.active
    }

    pub fn active(&self) -> Option<&PipelineExecution> {
        self.active.and_then(|id| self.get(id))
    }

    /// Makes `id` the active record.
    pub fn select(&mut self, id: ExecutionId) -> Result<(), HistoryError> {
        if self.get(id).is_none() {
            return Err(HistoryError::UnknownExecution { id });
        }
        self.active = Some(id);
        Ok(())
    }

    /// Clears the selection (the "new pipeline" view).
    pub fn clear_selection(&mut self) {
        self.active = None;
    }
}
