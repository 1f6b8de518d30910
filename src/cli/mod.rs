//! Command-line surface: argument parsing, settings resolution and the
//! tagging workflow they drive.

pub mod args;
pub mod orchestration;

pub use args::{Args, Settings};
pub use orchestration::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
