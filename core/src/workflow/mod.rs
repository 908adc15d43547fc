//! Point-by-point logging workflow.

pub mod controller;

pub use controller::{Recenter, StepOutcome, WorkflowController};
