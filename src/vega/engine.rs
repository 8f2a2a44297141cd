//! The seam between chart widgets and the external chart engine.

use async_trait::async_trait;
use serde::Serialize;

use crate::core::bundle::MimeObject;
use crate::core::error::EngineError;

/// The MIME type for Vega.
///
/// The version of this follows the major version of Vega.
pub const VEGA_MIME_TYPE: &str = "application/vnd.vega.v2+json";

/// The MIME type for Vega-Lite.
///
/// The version of this follows the major version of Vega-Lite.
pub const VEGALITE_MIME_TYPE: &str = "application/vnd.vegalite.v1+json";

/// Which chart-specification dialect the engine should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmbedMode {
    #[serde(rename = "vega")]
    Vega,
    #[serde(rename = "vega-lite")]
    VegaLite,
}

impl EmbedMode {
    /// Maps one of the two accepted mime types to its mode.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            VEGA_MIME_TYPE => Some(Self::Vega),
            VEGALITE_MIME_TYPE => Some(Self::VegaLite),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vega => "vega",
            Self::VegaLite => "vega-lite",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Vega => VEGA_MIME_TYPE,
            Self::VegaLite => VEGALITE_MIME_TYPE,
        }
    }
}

/// What a widget hands to the engine: a chart specification tagged with its mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedSpec {
    pub mode: EmbedMode,
    pub spec: MimeObject,
}

/// An external engine that draws chart specifications.
///
/// The returned future is the engine's completion callback: widgets spawn it
/// and resolve their readiness signal with whatever it reports.
#[async_trait]
pub trait ChartEngine: Send + Sync + 'static {
    async fn embed(&self, spec: EmbedSpec) -> Result<(), EngineError>;
}

/// Headless engine that accepts every specification without drawing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

#[async_trait]
impl ChartEngine for NullEngine {
    async fn embed(&self, spec: EmbedSpec) -> Result<(), EngineError> {
        log::debug!(
            "NullEngine accepted {} spec with {} top-level keys",
            spec.mode.as_str(),
            spec.spec.len()
        );
        Ok(())
    }
}
