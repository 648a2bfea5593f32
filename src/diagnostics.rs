//! Non-fatal decode diagnostics
//!
//! Decoders never fail on odd input. What they recover from locally is
//! reported through an injectable [`DiagnosticSink`] so hosts can capture it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::scancode::VendorTable;

/// Something a decoder recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A vendor code with no translation; emitted as [`crate::keycode::UNMAPPED`]
    UnmappedCode { table: VendorTable, raw: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedCode { table, raw } => {
                write!(f, "unmapped {} code 0x{:02X}", table.as_str(), raw)
            }
        }
    }
}

/// Receiver for decoder diagnostics
///
/// Called on the report-delivery thread, once per occurrence.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Shared sink handle
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Default sink: logs every diagnostic as a warning
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}

/// Sink that keeps everything it receives in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drain recorded diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.report(Diagnostic::UnmappedCode { table: VendorTable::Razer, raw: 0x0E });
        sink.report(Diagnostic::UnmappedCode { table: VendorTable::DrunkDeer, raw: 59 });

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.take(),
            vec![
                Diagnostic::UnmappedCode { table: VendorTable::Razer, raw: 0x0E },
                Diagnostic::UnmappedCode { table: VendorTable::DrunkDeer, raw: 59 },
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::UnmappedCode { table: VendorTable::Razer, raw: 0x0E };
        assert_eq!(d.to_string(), "unmapped razer code 0x0E");
    }
}
