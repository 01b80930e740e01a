//! Processing backend capabilities.
//!
//! The gateway never runs media algorithms in-process. Each algorithm
//! (speech recognition, synthesis, document analysis, steganography, text
//! generation) is an opaque capability behind an async trait, with one
//! production implementation: [`RemoteServices`], an HTTP client against
//! per-capability service URLs.

pub mod capability;
pub mod error;
pub mod remote;

pub use capability::{
    CapabilitySet, DocumentAnalyzer, ImageCipher, ProgressFn, SpeechSynthesizer, TextGenerator,
    TextToolkit, Transcriber, Transcript,
};
pub use error::BackendError;
pub use remote::{RemoteConfig, RemoteServices};
