use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use oqim_backends::ProgressFn;
use oqim_core::{JobKind, ProgressEvent};

/// Progress sink for one job.
///
/// Wraps an unbounded channel to the progress forwarder, so reporting is a
/// synchronous, non-blocking send that backends may call from anywhere in
/// their execution. Percentages are clamped to 100 and forced
/// non-decreasing across all clones of the reporter.
#[derive(Clone)]
pub struct ProgressReporter {
    kind: JobKind,
    /// Connection id of the submitting client; `None` broadcasts.
    target: Option<String>,
    tx: mpsc::UnboundedSender<ProgressEvent>,
    /// Highest percentage reported so far, shared across clones.
    last: Arc<AtomicU8>,
}

impl ProgressReporter {
    pub fn new(
        kind: JobKind,
        target: Option<String>,
        tx: mpsc::UnboundedSender<ProgressEvent>,
    ) -> Self {
        Self {
            kind,
            target,
            tx,
            last: Arc::new(AtomicU8::new(0)),
        }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Publish a progress update.
    ///
    /// `percent` is clamped to [0,100]; a value below an earlier report is
    /// raised to the running maximum so subscribers always observe a
    /// non-decreasing sequence. A closed channel means no subscriber is
    /// left; that is not an error.
    pub fn report(&self, percent: u8, message: &str) {
        let clamped = percent.min(100);
        let prev = self.last.fetch_max(clamped, Ordering::AcqRel);
        let effective = clamped.max(prev);

        let mut event = ProgressEvent::new(self.kind, effective, message);
        if let Some(target) = &self.target {
            event = event.with_target(target.clone());
        }
        let _ = self.tx.send(event);
    }

    /// Final success report: always 100.
    pub fn finish(&self) {
        self.report(100, "Completed");
    }

    /// Adapt this reporter into the callback shape the capability traits
    /// take.
    pub fn callback(&self) -> ProgressFn {
        let reporter = self.clone();
        Arc::new(move |percent, message| reporter.report(percent, message))
    }
}
