use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::core::signal::{ReadyOutcome, RenderStatus};

/// How a render ended, as recorded in a [`RenderTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    Rendered,
    Empty,
    Failed,
}

impl TraceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceStatus::Rendered => "rendered",
            TraceStatus::Empty => "empty",
            TraceStatus::Failed => "failed",
        }
    }
}

impl From<&ReadyOutcome> for TraceStatus {
    fn from(outcome: &ReadyOutcome) -> Self {
        match outcome {
            Ok(RenderStatus::Rendered) => TraceStatus::Rendered,
            Ok(RenderStatus::Empty) => TraceStatus::Empty,
            Err(_) => TraceStatus::Failed,
        }
    }
}

impl std::fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the render trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTrace {
    pub timestamp: u64,
    pub render_id: String,
    pub mime_type: String,
    pub mode: String,
    pub trusted: bool,
    pub status: TraceStatus,
    pub error: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl RenderTrace {
    /// Seconds since the unix epoch, zero if the clock is before it.
    pub fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Trait for recording render traces.
pub trait Telemetry: Send + Sync {
    fn record(&self, entry: RenderTrace);
    fn flush(&self);
}

/// Simple in-memory collector for traces.
#[derive(Default)]
pub struct MemoryTelemetry {
    traces: Mutex<Vec<RenderTrace>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_traces(&self) -> Vec<RenderTrace> {
        self.traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, entry: RenderTrace) {
        log::debug!(
            "render trace: {} {} -> {}",
            entry.render_id,
            entry.mime_type,
            entry.status
        );
        self.traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn flush(&self) {
        // No-op for memory collector
    }
}
