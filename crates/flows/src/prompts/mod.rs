//! The four prompt wrappers.
//!
//! | Flow | Input | Output |
//! |------|-------|--------|
//! | [`GeneratePipeline`] | prompt | pipeline definition text |
//! | [`ExecutePipeline`] | prompt, pipeline definition | reasoning steps, conclusion |
//! | [`SummarizeChain`] | step lines, conclusion | summary |
//! | [`AnalyzeErrors`] | steps as text | errors, suggestions |

mod analyze_errors;
mod execute_pipeline;
mod generate_pipeline;
mod summarize_chain;

pub use analyze_errors::{AnalyzeErrors, AnalyzeErrorsInput, ReasoningAnalysis};
pub use execute_pipeline::{ExecutePipeline, ExecutePipelineInput, ExecutePipelineOutput};
pub use generate_pipeline::{GeneratePipeline, GeneratePipelineInput, GeneratePipelineOutput};
pub use summarize_chain::{ChainSummary, SummarizeChain, SummarizeChainInput};
