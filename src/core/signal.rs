use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use serde::Serialize;

use crate::core::error::RenderError;

/// How a render finished when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    /// The engine drew the content.
    Rendered,
    /// There was nothing to render, the engine was never called.
    Empty,
}

/// What every awaiter of a readiness signal observes.
pub type ReadyOutcome = Result<RenderStatus, RenderError>;

/// A one-shot, multi-observer completion signal.
///
/// The signal starts unresolved and transitions to resolved exactly once.
/// Clones share the same underlying state, so any clone may resolve it and all
/// [`Ready`] futures observe the same outcome.
#[derive(Clone)]
pub struct ReadySignal {
    sender: Arc<Mutex<Option<oneshot::Sender<ReadyOutcome>>>>,
    receiver: Shared<oneshot::Receiver<ReadyOutcome>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
            receiver: receiver.shared(),
        }
    }

    /// Resolves the signal.
    ///
    /// Returns `true` if this call resolved it. Any later call is a no-op and
    /// returns `false`.
    pub fn resolve(&self, outcome: ReadyOutcome) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            // We hold a receiver ourselves, so the send cannot fail.
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Returns a future that completes when the signal resolves.
    pub fn ready(&self) -> Ready {
        Ready {
            inner: self.receiver.clone(),
        }
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadySignal")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// A future observing a [`ReadySignal`].
///
/// Yields [`RenderError::Abandoned`] if every handle to the signal is dropped
/// before it resolves.
#[derive(Clone)]
pub struct Ready {
    inner: Shared<oneshot::Receiver<ReadyOutcome>>,
}

impl Future for Ready {
    type Output = ReadyOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner
            .poll_unpin(cx)
            .map(|received| received.unwrap_or(Err(RenderError::Abandoned)))
    }
}
