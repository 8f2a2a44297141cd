//! Pre-flight checks on chart specifications.
//!
//! The mime model never validates its values, so this is where a renderer
//! rejects payloads it cannot hand to the engine.

use crate::core::bundle::MimeValue;
use crate::core::validation::ValidationResult;
use crate::vega::engine::EmbedMode;

/// Top-level keys that make a Vega-Lite spec a composition rather than a single view.
const VEGALITE_COMPOSITION_KEYS: &[&str] =
    &["layer", "concat", "hconcat", "vconcat", "facet", "repeat", "spec"];

pub fn validate_chart_spec(mode: EmbedMode, spec: &MimeValue) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(object) = spec.as_object() else {
        result.add_error(format!(
            "{} specification must be a JSON object, got {}",
            mode.as_str(),
            json_kind(spec)
        ));
        return result;
    };

    if let Some(schema) = object.get("$schema").and_then(MimeValue::as_str) {
        let names_lite = schema.contains("vega-lite");
        match mode {
            EmbedMode::Vega if names_lite => {
                result.add_warning(format!("$schema {schema} names Vega-Lite, rendering as Vega"));
            }
            EmbedMode::VegaLite if !names_lite && schema.contains("vega") => {
                result.add_warning(format!("$schema {schema} names Vega, rendering as Vega-Lite"));
            }
            _ => {}
        }
    }

    match mode {
        EmbedMode::Vega => {
            if !object.contains_key("marks") {
                result.add_warning("Vega specification has no marks");
            }
        }
        EmbedMode::VegaLite => {
            let composed = VEGALITE_COMPOSITION_KEYS
                .iter()
                .any(|key| object.contains_key(*key));
            if !object.contains_key("mark") && !composed {
                result.add_warning("Vega-Lite specification has no mark and no composition");
            }
        }
    }

    result
}

fn json_kind(value: &MimeValue) -> &'static str {
    match value {
        MimeValue::Null => "null",
        MimeValue::Bool(_) => "a boolean",
        MimeValue::Number(_) => "a number",
        MimeValue::String(_) => "a string",
        MimeValue::Array(_) => "an array",
        MimeValue::Object(_) => "an object",
    }
}
