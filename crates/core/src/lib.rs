//! Oqim domain types shared across the gateway.
//!
//! This crate is I/O-free: job kinds and lifecycle types, the error
//! taxonomy, progress event types, and upload validation rules live here
//! so the backend client, job runner, and HTTP layer all agree on them.

pub mod error;
pub mod progress;
pub mod types;
pub mod upload;

pub use error::CoreError;
pub use progress::ProgressEvent;
pub use types::{Job, JobKind, JobStatus};
pub use upload::{FileCategory, UploadedAsset};
