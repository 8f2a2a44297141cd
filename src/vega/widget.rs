use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::core::bundle::MimeValue;
use crate::core::error::RenderError;
use crate::core::model::MimeModel;
use crate::core::signal::{Ready, ReadyOutcome, ReadySignal, RenderStatus};
use crate::core::telemetry::{RenderTrace, Telemetry, TraceStatus};
use crate::render::{RenderRequest, RenderedWidget};
use crate::vega::engine::{ChartEngine, EmbedMode, EmbedSpec};
use crate::vega::spec::validate_chart_spec;

/// Lifecycle of a [`ChartWidget`].
///
/// `Idle -> Rendering -> Ready`, with `Disposed` reachable from anywhere.
/// A model without an entry for the widget's mime type, or with an entry that
/// fails validation, goes from `Idle` straight to `Ready` without an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Rendering,
    Ready,
    Disposed,
}

/// The widget's hold on its model.
#[derive(Debug)]
enum ModelSlot {
    Live(Arc<MimeModel>),
    Released,
}

/// A widget rendering Vega or Vega-Lite data through a [`ChartEngine`].
///
/// Nothing happens until the host calls [`on_after_attach`](Self::on_after_attach).
/// The widget then reads its entry from the model, spawns the engine call on
/// the current tokio runtime and returns. The spawned completion resolves the
/// readiness signal, whether or not the widget was disposed in the meantime.
pub struct ChartWidget {
    id: Uuid,
    mime_type: String,
    mode: EmbedMode,
    model: ModelSlot,
    state: Arc<Mutex<WidgetState>>,
    ready: ReadySignal,
    engine: Arc<dyn ChartEngine>,
    telemetry: Option<Arc<dyn Telemetry>>,
}

impl ChartWidget {
    /// Creates a widget for a request whose mime type is one of the two chart types.
    pub fn new(
        request: &RenderRequest,
        engine: Arc<dyn ChartEngine>,
        telemetry: Option<Arc<dyn Telemetry>>,
    ) -> Result<Self, RenderError> {
        let mode = EmbedMode::from_mime_type(&request.mime_type)
            .ok_or_else(|| RenderError::UnsupportedMimeType(request.mime_type.clone()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            mime_type: request.mime_type.clone(),
            mode,
            model: ModelSlot::Live(Arc::clone(&request.model)),
            state: Arc::new(Mutex::new(WidgetState::Idle)),
            ready: ReadySignal::new(),
            engine,
            telemetry,
        })
    }

    pub fn mode(&self) -> EmbedMode {
        self.mode
    }

    pub fn state(&self) -> WidgetState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The model this widget renders, `None` once disposed.
    pub fn model(&self) -> Option<&Arc<MimeModel>> {
        match &self.model {
            ModelSlot::Live(model) => Some(model),
            ModelSlot::Released => None,
        }
    }

    pub fn ready(&self) -> Ready {
        self.ready.ready()
    }

    /// Starts rendering. Only the first attach of a live widget does anything.
    ///
    /// A missing entry resolves readiness with [`RenderStatus::Empty`] and an
    /// invalid one with [`RenderError::InvalidSpec`]. Both finish before this
    /// returns, moving the widget from `Idle` to `Ready` without `Rendering`.
    ///
    /// Fails with [`RenderError::NoRuntime`] outside a tokio runtime, before
    /// the model is read, in which case the widget stays idle and can be
    /// attached again later.
    pub fn on_after_attach(&mut self) -> Result<(), RenderError> {
        let current = self.state();
        if current != WidgetState::Idle {
            log::debug!("Widget {} attached while {:?}, ignoring", self.id, current);
            return Ok(());
        }
        let ModelSlot::Live(model) = &self.model else {
            return Ok(());
        };
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| RenderError::NoRuntime)?;

        let trusted = model.trusted();
        if !trusted {
            log::warn!(
                "Widget {} renders {} from an untrusted model, output is not sanitized",
                self.id,
                self.mime_type
            );
        }

        let Some(value) = model.data().get(&self.mime_type).cloned() else {
            log::debug!("Widget {}: no {} entry, nothing to render", self.id, self.mime_type);
            self.completion(trusted).finish(Ok(RenderStatus::Empty));
            return Ok(());
        };

        let validation = validate_chart_spec(self.mode, &value);
        validation.log_summary(&self.mime_type);
        let spec = match value {
            MimeValue::Object(spec) if validation.is_safe() => spec,
            _ => {
                let reason = validation
                    .error_summary()
                    .unwrap_or_else(|| "specification must be a JSON object".to_string());
                self.completion(trusted)
                    .finish(Err(RenderError::InvalidSpec(reason)));
                return Ok(());
            }
        };

        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = WidgetState::Rendering;
        log::debug!("Widget {} rendering {}", self.id, self.mode.as_str());

        let engine = Arc::clone(&self.engine);
        let completion = self.completion(trusted);
        let embed = EmbedSpec {
            mode: self.mode,
            spec,
        };
        handle.spawn(async move {
            let outcome = engine
                .embed(embed)
                .await
                .map(|()| RenderStatus::Rendered)
                .map_err(RenderError::from);
            completion.finish(outcome);
        });

        Ok(())
    }

    /// Releases the model. Repeated calls are no-ops.
    ///
    /// An in-flight render is not cancelled, its completion still resolves the
    /// readiness signal. A widget disposed before it ever rendered resolves it
    /// with [`RenderError::Disposed`].
    pub fn dispose(&mut self) {
        let previous = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = *state;
            *state = WidgetState::Disposed;
            previous
        };
        if previous == WidgetState::Disposed {
            return;
        }

        self.model = ModelSlot::Released;
        if previous == WidgetState::Idle {
            self.ready.resolve(Err(RenderError::Disposed));
        }
        log::debug!("Widget {} disposed while {:?}", self.id, previous);
    }

    pub fn is_disposed(&self) -> bool {
        self.state() == WidgetState::Disposed
    }

    fn completion(&self, trusted: bool) -> Completion {
        Completion {
            id: self.id,
            mime_type: self.mime_type.clone(),
            mode: self.mode,
            trusted,
            state: Arc::clone(&self.state),
            ready: self.ready.clone(),
            telemetry: self.telemetry.clone(),
        }
    }
}

impl std::fmt::Debug for ChartWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartWidget")
            .field("id", &self.id)
            .field("mime_type", &self.mime_type)
            .field("mode", &self.mode)
            .field("state", &self.state())
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

impl RenderedWidget for ChartWidget {
    fn id(&self) -> Uuid {
        self.id
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn ready(&self) -> Ready {
        ChartWidget::ready(self)
    }

    fn on_after_attach(&mut self) -> Result<(), RenderError> {
        ChartWidget::on_after_attach(self)
    }

    fn dispose(&mut self) {
        ChartWidget::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        ChartWidget::is_disposed(self)
    }
}

/// Everything the end of a render needs. Holds no reference to the model.
struct Completion {
    id: Uuid,
    mime_type: String,
    mode: EmbedMode,
    trusted: bool,
    state: Arc<Mutex<WidgetState>>,
    ready: ReadySignal,
    telemetry: Option<Arc<dyn Telemetry>>,
}

impl Completion {
    fn finish(self, outcome: ReadyOutcome) {
        let disposed = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == WidgetState::Disposed {
                true
            } else {
                *state = WidgetState::Ready;
                false
            }
        };
        if disposed {
            log::warn!("Widget {} finished rendering after disposal", self.id);
        }

        if let Err(RenderError::Engine(err)) = &outcome {
            log::error!("Widget {} engine failure: {}", self.id, err);
        }

        if let Some(telemetry) = &self.telemetry {
            let mut metadata = HashMap::new();
            if disposed {
                metadata.insert("disposed".to_string(), "true".to_string());
            }
            telemetry.record(RenderTrace {
                timestamp: RenderTrace::now(),
                render_id: self.id.to_string(),
                mime_type: self.mime_type.clone(),
                mode: self.mode.as_str().to_string(),
                trusted: self.trusted,
                status: TraceStatus::from(&outcome),
                error: outcome.as_ref().err().map(ToString::to_string),
                metadata,
            });
        }

        self.ready.resolve(outcome);
    }
}
