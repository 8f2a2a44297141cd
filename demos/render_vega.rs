//! A complete example showing how a host renders chart outputs with rendermime.
//!
//! This example demonstrates:
//! - Building mime models from raw JSON envelopes
//! - Registering the Vega extensions in a host-owned registry
//! - Plugging in a custom chart engine
//! - Attaching widgets and awaiting their readiness
//! - How untrusted outputs are gated

use rendermime::prelude::*;
use rendermime::async_trait;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Step 1: A chart engine
// ============================================================================

/// Stands in for a real drawing backend: prints what it was asked to draw.
struct PrintingEngine;

#[async_trait]
impl ChartEngine for PrintingEngine {
    async fn embed(&self, spec: EmbedSpec) -> Result<(), EngineError> {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let mark = spec
            .spec
            .get("mark")
            .and_then(MimeValue::as_str)
            .ok_or_else(|| EngineError::Rejected("only single-mark charts are drawn".into()))?;
        println!("[PrintingEngine] drew a {} chart ({} mode)", mark, spec.mode.as_str());
        Ok(())
    }
}

// ============================================================================
// Step 2: Outputs, as a notebook host would receive them
// ============================================================================

fn outputs() -> Vec<MimeValue> {
    vec![
        json!({
            "data": {
                "text/plain": "<VegaLite 1 object>",
                VEGALITE_MIME_TYPE: {
                    "data": {"values": [{"a": "A", "b": 28}, {"a": "B", "b": 55}]},
                    "mark": "bar",
                    "encoding": {
                        "x": {"field": "a", "type": "ordinal"},
                        "y": {"field": "b", "type": "quantitative"}
                    }
                }
            },
            "metadata": {"execution_count": 1},
            "trusted": true
        }),
        json!({
            "data": {
                VEGALITE_MIME_TYPE: {"layer": [{"mark": "line"}, {"mark": "point"}]}
            },
            "trusted": true
        }),
        json!({
            "data": {VEGA_MIME_TYPE: {"marks": []}},
            "trusted": false
        }),
    ]
}

// ============================================================================
// Main: Register, render, await
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rendermime Vega Example ===\n");

    let telemetry = Arc::new(MemoryTelemetry::new());
    let renderer = VegaRenderer::new(Arc::new(PrintingEngine)).with_telemetry(telemetry.clone());

    let mut registry = RendererRegistry::new();
    registry.register_all(extensions(Arc::new(renderer)))?;

    for (index, output) in outputs().into_iter().enumerate() {
        println!("\n--- Output {} ---", index + 1);
        let model = Arc::new(MimeModel::from_json(output)?);

        let Some(mut widget) = registry.create_widget(model, TrustPolicy::Ensure)? else {
            println!("No renderer for this output (untrusted charts are not rendered)");
            continue;
        };

        widget.on_after_attach()?;
        match widget.ready().await {
            Ok(status) => println!("Widget {} ready: {:?}", widget.id(), status),
            Err(err) => println!("Widget {} failed: {}", widget.id(), err),
        }
        widget.dispose();
    }

    println!("\nRender traces:");
    for trace in telemetry.get_traces() {
        println!("  {}: {} {}", trace.mime_type, trace.mode, trace.status);
    }

    println!("\n=== Done ===");
    Ok(())
}
