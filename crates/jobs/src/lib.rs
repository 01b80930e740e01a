//! Job runner: wraps one backend invocation as a unit of work.
//!
//! A [`JobRequest`] names the task kind and carries its validated input;
//! [`JobRunner::run`] dispatches it to the matching capability, wiring the
//! backend's progress callbacks through a [`ProgressReporter`] that
//! enforces monotone percentages and never blocks on delivery.

pub mod reporter;
pub mod request;
pub mod runner;

pub use reporter::ProgressReporter;
pub use request::{JobOutput, JobRequest};
pub use runner::JobRunner;
