//! Command-line facing workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_task, Task, TaskArgs, TaskOutcome};
