//! The reasoning session: execution history plus the submission orchestrator.
//!
//! A submission is two dependent flow calls:
//!
//! 1. reject blank prompts and concurrent submissions;
//! 2. generate-pipeline;
//! 3. create a `running` record at the head of history and make it active;
//! 4. execute-pipeline with the original prompt and the definition, unchanged;
//! 5. on success, complete the record in place;
//! 6. on failure, mark the record failed (if it exists) and raise one error
//!    notification.
//!
//! A generate failure leaves no record behind: the record is only created once
//! there is a definition to store on it.
//!
//! The history lock is never held across a flow call, so readers see the
//! `running` record while execute-pipeline is outstanding.
//!
//! Steps 2 to 6 run on a spawned task that owns the in-flight guard, so a
//! caller that stops waiting cannot strand a record in `running`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pipeline::{ExecutionHistory, ExecutionId, ExecutionStatus, PipelineExecution};
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, instrument, warn, Instrument};

use crate::notifications::{Notification, FAILED_CONCLUSION};
use crate::prompts::{
    AnalyzeErrorsInput, ChainSummary, ExecutePipelineInput, GeneratePipelineInput,
    ReasoningAnalysis, SummarizeChainInput,
};
use crate::{ExecutionFailure, ReasoningFlows, SessionError, SubmissionError};

const NOTIFICATION_CAPACITY: usize = 64;

/// Owns the execution history and drives submissions through the flows.
pub struct ReasoningSession {
    core: Arc<SessionCore>,
    in_flight: Arc<AtomicBool>,
}

/// State shared between the session handle and its submission tasks.
struct SessionCore {
    flows: Arc<dyn ReasoningFlows>,
    history: RwLock<ExecutionHistory>,
    notifications: broadcast::Sender<Notification>,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReasoningSession {
    /// Starts a session with an empty history.
    pub fn new(flows: Arc<dyn ReasoningFlows>) -> Self {
        Self::with_history(flows, ExecutionHistory::new())
    }

    /// Starts a session over existing records.
    pub fn with_history(flows: Arc<dyn ReasoningFlows>, history: ExecutionHistory) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            core: Arc::new(SessionCore {
                flows,
                history: RwLock::new(history),
                notifications,
            }),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Receives every notification emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.core.notifications.subscribe()
    }

    /// `true` while a submission is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generates a pipeline for `prompt`, executes it, and records the result.
    ///
    /// Returns the identifier of the completed record. The two flow calls run
    /// on a spawned task: dropping the returned future stops the wait, not
    /// the submission, which still ends with the record completed or failed.
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    pub async fn submit(&self, prompt: &str) -> Result<ExecutionId, SubmissionError> {
        if prompt.trim().is_empty() {
            return Err(SubmissionError::EmptyPrompt);
        }
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Submission rejected: another submission is in flight");
            return Err(SubmissionError::AlreadyInFlight);
        };

        let core = Arc::clone(&self.core);
        let prompt = prompt.to_string();
        let task = tokio::spawn(
            async move {
                let outcome = core.run_submission(&prompt).await;
                drop(guard);
                outcome
            }
            .in_current_span(),
        );

        task.await.unwrap_or_else(|err| {
            error!(error = %err, "Submission task did not finish");
            Err(SubmissionError::Interrupted)
        })
    }

    /// Snapshot of every record, newest first.
    pub async fn executions(&self) -> Vec<PipelineExecution> {
        self.core.history.read().await.iter().cloned().collect()
    }

    /// Snapshot of one record.
    pub async fn execution(&self, id: ExecutionId) -> Option<PipelineExecution> {
        self.core.history.read().await.get(id).cloned()
    }

    /// Snapshot of the record currently being viewed.
    pub async fn active(&self) -> Option<PipelineExecution> {
        self.core.history.read().await.active().cloned()
    }

    /// Makes `id` the record being viewed.
    pub async fn select(&self, id: ExecutionId) -> Result<(), SessionError> {
        self.core.history
            .write()
            .await
            .select(id)
            .map_err(|_| SessionError::UnknownExecution { id })
    }

    /// Switches to the "new pipeline" view.
    pub async fn clear_selection(&self) {
        self.core.history.write().await.clear_selection();
    }

    /// Summarizes a completed record's reasoning chain.
    #[instrument(skip(self), fields(execution_id = %id))]
    pub async fn summarize(&self, id: ExecutionId) -> Result<ChainSummary, SessionError> {
        let execution = self.completed_execution(id).await?;
        let input = SummarizeChainInput {
            reasoning_steps: execution.reasoning_steps().iter().map(step_line).collect(),
            final_conclusion: execution.final_conclusion().to_string(),
        };
        Ok(self.core.flows.summarize_chain(input).await?)
    }

    /// Asks the model to review a completed record's reasoning for errors.
    #[instrument(skip(self), fields(execution_id = %id))]
    pub async fn analyze(&self, id: ExecutionId) -> Result<ReasoningAnalysis, SessionError> {
        let execution = self.completed_execution(id).await?;
        let input = AnalyzeErrorsInput {
            reasoning_steps: serde_json::to_string_pretty(execution.reasoning_steps())?,
        };
        Ok(self.core.flows.analyze_errors(input).await?)
    }

    async fn completed_execution(&self, id: ExecutionId) -> Result<PipelineExecution, SessionError> {
        let execution = self
            .execution(id)
            .await
            .ok_or(SessionError::UnknownExecution { id })?;
        match execution.status() {
            ExecutionStatus::Completed => Ok(execution),
            status => Err(SessionError::NotCompleted { id, status }),
        }
    }
}

impl SessionCore {
    async fn run_submission(&self, prompt: &str) -> Result<ExecutionId, SubmissionError> {
        let generated = match self
            .flows
            .generate_pipeline(GeneratePipelineInput {
                prompt: prompt.to_string(),
            })
            .await
        {
            Ok(generated) => generated,
            Err(err) => {
                error!(flow = err.flow(), error = %err, "Pipeline generation failed");
                self.notify(Notification::submission_failed());
                return Err(SubmissionError::Generation(err));
            }
        };

        let execution = PipelineExecution::start(prompt, generated.pipeline_definition.clone());
        let id = self
            .history
            .write()
            .await
            .push_front(execution)
            .map_err(SubmissionError::Recording)?;
        info!(execution_id = %id.short(), "Execution started");
        self.notify(Notification::ExecutionStarted { id });

        let outcome = match self
            .flows
            .execute_pipeline(ExecutePipelineInput {
                prompt: prompt.to_string(),
                pipeline_definition: generated.pipeline_definition,
            })
            .await
        {
            Ok(executed) => self
                .history
                .write()
                .await
                .complete(id, executed.reasoning_steps, executed.final_conclusion)
                .map_err(ExecutionFailure::from),
            Err(err) => Err(ExecutionFailure::from(err)),
        };

        match outcome {
            Ok(()) => {
                info!(execution_id = %id.short(), "Execution completed");
                self.notify(Notification::ExecutionCompleted { id });
                Ok(id)
            }
            Err(reason) => {
                error!(execution_id = %id.short(), error = %reason, "Execution failed");
                self.mark_failed(id).await;
                self.notify(Notification::submission_failed());
                Err(SubmissionError::Execution { id, reason })
            }
        }
    }

    async fn mark_failed(&self, id: ExecutionId) {
        match self.history.write().await.fail(id, FAILED_CONCLUSION) {
            Ok(()) => self.notify(Notification::ExecutionFailed { id }),
            Err(err) => warn!(execution_id = %id.short(), error = %err, "Could not mark execution failed"),
        }
    }

    fn notify(&self, notification: Notification) {
        // No subscribers is fine.
        let _ = self.notifications.send(notification);
    }
}

/// One summary line per step: label, title, thought, tool usage, observation.
fn step_line(step: &pipeline::ReasoningStep) -> String {
    let mut line = format!("Step {} ({}): {}", step.step, step.title, step.thought);
    if let Some((tool, input)) = step.tool_usage() {
        line.push_str(&format!(" [used {tool} with \"{input}\"]"));
    }
    line.push_str(" Observation: ");
    line.push_str(&step.observation);
    line
}
