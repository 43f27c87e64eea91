//! The execution record: one per user submission.
//!
//! A [`PipelineExecution`] is born `Running` with no steps and no conclusion,
//! and moves exactly once to either `Completed` or `Failed`. The fields are
//! private so that the only way to change a record is through [`complete`] and
//! [`fail`], which enforce that rule.
//!
//! [`complete`]: PipelineExecution::complete
//! [`fail`]: PipelineExecution::fail

use serde::{Deserialize, Serialize};

use crate::{ExecutionId, HistoryError, PipelineDefinition, ReasoningStep, Timestamp};

/// Lifecycle state of an execution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// The execute-pipeline call has been issued and has not resolved.
    Running,
    /// The model returned steps and a conclusion.
    Completed,
    /// Some call in the submission failed.
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One user submission and whatever the model produced for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
    id: ExecutionId,
    prompt: String,
    pipeline_definition: PipelineDefinition,
    reasoning_steps: Vec<ReasoningStep>,
    final_conclusion: String,
    timestamp: Timestamp,
    status: ExecutionStatus,
}

impl PipelineExecution {
    /// Creates a fresh `Running` record with a new identifier and the current
    /// time.
    pub fn start(prompt: impl Into<String>, pipeline_definition: PipelineDefinition) -> Self {
        Self {
            id: ExecutionId::new_random(),
            prompt: prompt.into(),
            pipeline_definition,
            reasoning_steps: Vec::new(),
            final_conclusion: String::new(),
            timestamp: Timestamp::now(),
            status: ExecutionStatus::Running,
        }
    }

    /// Rebuilds an already-completed record (e.g. sample history).
    pub fn completed(
        id: ExecutionId,
        prompt: impl Into<String>,
        pipeline_definition: PipelineDefinition,
        reasoning_steps: Vec<ReasoningStep>,
        final_conclusion: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            pipeline_definition,
            reasoning_steps,
            final_conclusion: final_conclusion.into(),
            timestamp,
            status: ExecutionStatus::Completed,
        }
    }

    /// Identifier assigned when the record was started.
    pub fn id(&self) -> ExecutionId {
        self.id
    }

    /// The prompt the user submitted.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The generated definition, exactly as the model wrote it.
    pub fn pipeline_definition(&self) -> &PipelineDefinition {
        &self.pipeline_definition
    }

    /// Steps in the order the model reported them. Empty while running.
    pub fn reasoning_steps(&self) -> &[ReasoningStep] {
        &self.reasoning_steps
    }

    /// Empty while running; the fallback text once failed.
    pub fn final_conclusion(&self) -> &str {
        &self.final_conclusion
    }

    /// When the record was created.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Moves a running record to `Completed`, replacing its steps and
    /// conclusion.
    pub fn complete(
        &mut self,
        reasoning_steps: Vec<ReasoningStep>,
        final_conclusion: impl Into<String>,
    ) -> Result<(), HistoryError> {
        self.ensure_running(ExecutionStatus::Completed)?;
        self.reasoning_steps = reasoning_steps;
        self.final_conclusion = final_conclusion.into();
        self.status = ExecutionStatus::Completed;
        Ok(())
    }

    /// Moves a running record to `Failed` with the given conclusion text.
    ///
    /// Steps stay empty.
    pub fn fail(&mut self, final_conclusion: impl Into<String>) -> Result<(), HistoryError> {
        self.ensure_running(ExecutionStatus::Failed)?;
        self.final_conclusion = final_conclusion.into();
        self.status = ExecutionStatus::Failed;
        Ok(())
    }

    fn ensure_running(&self, to: ExecutionStatus) -> Result<(), HistoryError> {
        if self.status == ExecutionStatus::Running {
            Ok(())
        } else {
            Err(HistoryError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u32) -> ReasoningStep {
        ReasoningStep {
            step: n,
            title: format!("Step {n}"),
            thought: "thinking".into(),
            observation: "seen".into(),
            tool: None,
            tool_input: None,
        }
    }

    #[test]
    fn new_record_is_running_and_empty() {
        let exec = PipelineExecution::start("Write a haiku", PipelineDefinition::new("{}"));
        assert_eq!(exec.status(), ExecutionStatus::Running);
        assert!(exec.reasoning_steps().is_empty());
        assert!(exec.final_conclusion().is_empty());
    }

    #[test]
    fn complete_replaces_steps_and_conclusion() {
        let mut exec = PipelineExecution::start("p", PipelineDefinition::new("{}"));
        exec.complete(vec![step(1), step(2)], "done").unwrap();
        assert_eq!(exec.status(), ExecutionStatus::Completed);
        assert_eq!(exec.reasoning_steps().len(), 2);
        assert_eq!(exec.final_conclusion(), "done");
    }

    #[test]
    fn terminal_states_never_transition_again() {
        let mut exec = PipelineExecution::start("p", PipelineDefinition::new("{}"));
        exec.fail("nope").unwrap();

        let err = exec.complete(vec![step(1)], "late").unwrap_err();
        assert!(matches!(
            err,
            HistoryError::InvalidTransition {
                from: ExecutionStatus::Failed,
                to: ExecutionStatus::Completed,
                ..
            }
        ));
        assert!(exec.fail("again").is_err());
        assert_eq!(exec.status(), ExecutionStatus::Failed);
        assert_eq!(exec.final_conclusion(), "nope");
        assert!(exec.reasoning_steps().is_empty());
    }

    #[test]
    fn serializes_with_original_field_names() {
        let exec = PipelineExecution::start("p", PipelineDefinition::new("{\"steps\":[]}"));
        let json = serde_json::to_value(&exec).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["pipelineDefinition"], "{\"steps\":[]}");
        assert!(json["reasoningSteps"].as_array().unwrap().is_empty());
        assert_eq!(json["finalConclusion"], "");
    }
}
