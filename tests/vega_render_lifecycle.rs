//! Integration tests for the chart widget lifecycle and the renderer registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::FutureExt;
use rendermime::prelude::*;
use serde_json::json;

/// An engine whose completion is held back until the test releases it.
#[derive(Default)]
struct GatedEngine {
    gate: Mutex<Option<oneshot::Receiver<Result<(), EngineError>>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<EmbedSpec>>,
}

impl GatedEngine {
    fn gated() -> (Arc<Self>, oneshot::Sender<Result<(), EngineError>>) {
        let (tx, rx) = oneshot::channel();
        let engine = Self {
            gate: Mutex::new(Some(rx)),
            ..Self::default()
        };
        (Arc::new(engine), tx)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn wait_for_call(&self) {
        while self.calls() == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[rendermime::async_trait]
impl ChartEngine for GatedEngine {
    async fn embed(&self, spec: EmbedSpec) -> Result<(), EngineError> {
        self.seen.lock().unwrap().push(spec);
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or(Err(EngineError::Unavailable("gate dropped".to_string()))),
            None => Ok(()),
        }
    }
}

fn chart_model(mime_type: &str, spec: MimeValue, trusted: bool) -> Arc<MimeModel> {
    let mut data = MimeObject::new();
    data.insert(mime_type.to_string(), spec);
    Arc::new(MimeModel::new(
        MimeModelOptions::new().with_data(data).trusted(trusted),
    ))
}

fn bar_chart() -> MimeValue {
    json!({
        "data": {"values": [{"a": "A", "b": 28}, {"a": "B", "b": 55}]},
        "mark": "bar",
        "encoding": {
            "x": {"field": "a", "type": "ordinal"},
            "y": {"field": "b", "type": "quantitative"}
        }
    })
}

#[tokio::test]
async fn test_two_observers_resolve_after_single_completion() {
    let (engine, release) = GatedEngine::gated();
    let renderer = VegaRenderer::new(engine.clone());
    let model = chart_model(VEGALITE_MIME_TYPE, bar_chart(), true);
    let mut widget = renderer
        .render_chart(&RenderRequest::new(VEGALITE_MIME_TYPE, model))
        .unwrap();

    // Readiness is observable before rendering starts
    let first = widget.ready();
    let second = widget.ready();
    assert_eq!(widget.state(), WidgetState::Idle);

    widget.on_after_attach().unwrap();
    engine.wait_for_call().await;
    assert_eq!(widget.state(), WidgetState::Rendering);
    assert!(first.clone().now_or_never().is_none());

    release.send(Ok(())).unwrap();
    let (a, b) = tokio::join!(first, second);
    assert_eq!(a, Ok(RenderStatus::Rendered));
    assert_eq!(b, Ok(RenderStatus::Rendered));
    assert_eq!(widget.state(), WidgetState::Ready);
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn test_engine_receives_tagged_spec() {
    let engine = Arc::new(GatedEngine::default());
    let renderer = VegaRenderer::new(engine.clone());
    let spec = json!({"marks": [{"type": "rect"}], "width": 400});
    let mut widget = renderer
        .render(&RenderRequest::new(
            VEGA_MIME_TYPE,
            chart_model(VEGA_MIME_TYPE, spec.clone(), true),
        ))
        .unwrap();

    widget.on_after_attach().unwrap();
    assert_eq!(widget.ready().await, Ok(RenderStatus::Rendered));

    let seen = engine.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].mode, EmbedMode::Vega);
    assert_eq!(MimeValue::Object(seen[0].spec.clone()), spec);
}

#[tokio::test]
async fn test_engine_failure_resolves_with_error() {
    let (engine, release) = GatedEngine::gated();
    let telemetry = Arc::new(MemoryTelemetry::new());
    let renderer = VegaRenderer::new(engine.clone()).with_telemetry(telemetry.clone());
    let mut widget = renderer
        .render_chart(&RenderRequest::new(
            VEGALITE_MIME_TYPE,
            chart_model(VEGALITE_MIME_TYPE, bar_chart(), false),
        ))
        .unwrap();

    widget.on_after_attach().unwrap();
    engine.wait_for_call().await;
    release
        .send(Err(EngineError::Rejected("unknown mark".to_string())))
        .unwrap();

    let outcome = widget.ready().await;
    assert_eq!(
        outcome,
        Err(RenderError::Engine(EngineError::Rejected(
            "unknown mark".to_string()
        )))
    );
    assert_eq!(widget.state(), WidgetState::Ready);

    let traces = telemetry.get_traces();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].status, TraceStatus::Failed);
    assert_eq!(traces[0].mode, "vega-lite");
    assert!(!traces[0].trusted);
    assert!(traces[0].error.as_deref().unwrap().contains("unknown mark"));
}

#[tokio::test]
async fn test_dispose_while_rendering() {
    let (engine, release) = GatedEngine::gated();
    let telemetry = Arc::new(MemoryTelemetry::new());
    let renderer = VegaRenderer::new(engine.clone()).with_telemetry(telemetry.clone());
    let mut widget = renderer
        .render_chart(&RenderRequest::new(
            VEGALITE_MIME_TYPE,
            chart_model(VEGALITE_MIME_TYPE, bar_chart(), true),
        ))
        .unwrap();
    let ready = widget.ready();

    widget.on_after_attach().unwrap();
    engine.wait_for_call().await;

    widget.dispose();
    assert!(widget.is_disposed());
    assert!(widget.model().is_none());
    assert!(ready.clone().now_or_never().is_none());

    // The in-flight render still completes and resolves readiness
    release.send(Ok(())).unwrap();
    assert_eq!(ready.await, Ok(RenderStatus::Rendered));
    assert_eq!(widget.state(), WidgetState::Disposed);
    assert_eq!(
        telemetry.get_traces()[0].metadata.get("disposed").map(String::as_str),
        Some("true")
    );

    widget.dispose();
    assert_eq!(widget.state(), WidgetState::Disposed);
}

#[tokio::test]
async fn test_missing_entry_never_reaches_engine() {
    let engine = Arc::new(GatedEngine::default());
    let renderer = VegaRenderer::new(engine.clone());
    let model = chart_model("text/plain", json!("no chart"), true);
    let mut widget = renderer
        .render(&RenderRequest::new(VEGALITE_MIME_TYPE, model))
        .unwrap();

    widget.on_after_attach().unwrap();
    assert_eq!(widget.ready().await, Ok(RenderStatus::Empty));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_invalid_spec_never_reaches_engine() {
    let engine = Arc::new(GatedEngine::default());
    let renderer = VegaRenderer::new(engine.clone());
    let model = chart_model(VEGA_MIME_TYPE, json!(42), true);
    let mut widget = renderer
        .render(&RenderRequest::new(VEGA_MIME_TYPE, model))
        .unwrap();

    widget.on_after_attach().unwrap();
    assert!(matches!(
        widget.ready().await,
        Err(RenderError::InvalidSpec(_))
    ));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_render_never_mutates_model() {
    let renderer = VegaRenderer::default();
    let model = chart_model(VEGALITE_MIME_TYPE, bar_chart(), true);
    let before = (*model).clone();

    let mut widget = renderer
        .render(&RenderRequest::new(VEGALITE_MIME_TYPE, Arc::clone(&model)))
        .unwrap();
    widget.on_after_attach().unwrap();
    widget.ready().await.unwrap();
    widget.dispose();

    assert_eq!(*model, before);
    assert_eq!(Arc::strong_count(&model), 1);
}

#[tokio::test]
async fn test_registry_gates_untrusted_charts() {
    let mut registry = RendererRegistry::new();
    registry
        .register_all(extensions(Arc::new(VegaRenderer::default())))
        .unwrap();
    assert_eq!(registry.mime_types(), vec![VEGA_MIME_TYPE, VEGALITE_MIME_TYPE]);

    let untrusted = chart_model(VEGALITE_MIME_TYPE, bar_chart(), false);
    assert!(registry
        .create_widget(untrusted.clone(), TrustPolicy::Ensure)
        .unwrap()
        .is_none());

    let mut widget = registry
        .create_widget(untrusted, TrustPolicy::Any)
        .unwrap()
        .expect("host accepted untrusted charts");
    assert_eq!(widget.mime_type(), VEGALITE_MIME_TYPE);
    widget.on_after_attach().unwrap();
    assert_eq!(widget.ready().await, Ok(RenderStatus::Rendered));

    let trusted = chart_model(VEGA_MIME_TYPE, json!({"marks": []}), true);
    let widget = registry
        .create_widget(trusted, TrustPolicy::Ensure)
        .unwrap()
        .expect("trusted chart");
    assert_eq!(widget.mime_type(), VEGA_MIME_TYPE);
}

#[test]
fn test_registry_file_associations() {
    let mut registry = RendererRegistry::new();
    registry
        .register_all(extensions(Arc::new(VegaRenderer::default())))
        .unwrap();

    let lite = registry.default_factory_for(".vl.json").unwrap();
    assert_eq!(lite.mime_type, VEGALITE_MIME_TYPE);
    assert_eq!(lite.data_type, DataType::Json);
    assert!(lite.widget_factory.as_ref().unwrap().read_only);

    assert_eq!(
        registry.default_factory_for(".vg").map(|d| d.mime_type.as_str()),
        Some(VEGA_MIME_TYPE)
    );
    // Plain json files are openable but never defaulted to a chart
    assert!(registry.default_factory_for("json").is_none());
}
