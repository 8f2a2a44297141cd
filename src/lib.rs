//! # rendermime
//!
//! Mime bundle models and a pluggable renderer contract for document viewers
//! that display rich cell outputs.
//!
//! ## Features
//!
//! - **Mime models**: a [`MimeModel`] holds an output's `data` and `metadata`
//!   [`Bundle`]s plus a trust flag that cannot change after construction
//! - **Renderer contract**: [`MimeRenderer`] and [`RenderedWidget`], with a
//!   one-shot [`ReadySignal`] every widget resolves exactly once
//! - **Host registry**: [`RendererRegistry`] picks a renderer for a model by
//!   mime type, priority and trust
//! - **Vega charts**: [`VegaRenderer`] hands Vega/Vega-Lite specifications to
//!   an external [`ChartEngine`] (feature `vega`, on by default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rendermime::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Arc::new(MimeModel::from_json(json!({
//!     "data": { VEGALITE_MIME_TYPE: { "mark": "point" } },
//!     "trusted": true
//! }))?);
//!
//! let mut registry = RendererRegistry::new();
//! registry.register_all(extensions(Arc::new(VegaRenderer::default())))?;
//!
//! if let Some(mut widget) = registry.create_widget(model, TrustPolicy::Ensure)? {
//!     widget.on_after_attach()?;
//!     widget.ready().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`core`](crate::core): bundles, models, the readiness signal, errors, telemetry
//! - [`render`]: the renderer contract and the registry
//! - [`vega`]: the chart renderer
//! - [`prelude`]: commonly used types (import with `use rendermime::prelude::*`)

// ============================================================================
// Modules
// ============================================================================

pub mod core;
pub mod render;

#[cfg(feature = "vega")]
pub mod vega;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

// Core types
pub use crate::core::bundle::{Bundle, MimeObject, MimeValue};
pub use crate::core::error::{EngineError, ModelError, RegistryError, RenderError};
pub use crate::core::model::{MimeModel, MimeModelOptions};
pub use crate::core::signal::{Ready, ReadyOutcome, ReadySignal, RenderStatus};
pub use crate::core::telemetry::{MemoryTelemetry, RenderTrace, Telemetry, TraceStatus};
pub use crate::core::validation::{ValidationIssue, ValidationResult};

// Renderer contract
pub use crate::render::registry::{
    DataType, ExtensionDescriptor, RendererRegistry, TrustPolicy, WidgetFactoryOptions,
};
pub use crate::render::{MimeRenderer, RenderRequest, RenderedWidget};

// Vega
#[cfg(feature = "vega")]
pub use crate::vega::engine::{
    ChartEngine, EmbedMode, EmbedSpec, NullEngine, VEGA_MIME_TYPE, VEGALITE_MIME_TYPE,
};
#[cfg(feature = "vega")]
pub use crate::vega::renderer::{extensions, VegaRenderer};
#[cfg(feature = "vega")]
pub use crate::vega::spec::validate_chart_spec;
#[cfg(feature = "vega")]
pub use crate::vega::widget::{ChartWidget, WidgetState};

// ============================================================================
// Prelude Modules - Convenient Bulk Imports
// ============================================================================

/// The main prelude: everything a host needs to build models and render them.
///
/// # Example
/// ```rust
/// use rendermime::prelude::*;
/// ```
pub mod prelude {
    pub use super::core_prelude::*;

    #[cfg(feature = "vega")]
    pub use super::vega_prelude::*;
}

/// Prelude for the renderer-independent core and renderer contract.
///
/// # Example
/// ```rust
/// use rendermime::core_prelude::*;
/// ```
pub mod core_prelude {
    pub use super::{
        Bundle, DataType, EngineError, ExtensionDescriptor, MemoryTelemetry, MimeModel,
        MimeModelOptions, MimeObject, MimeRenderer, MimeValue, ModelError, Ready, ReadyOutcome,
        ReadySignal, RegistryError, RenderError, RenderRequest, RenderStatus, RenderTrace,
        RenderedWidget, RendererRegistry, Telemetry, TraceStatus, TrustPolicy,
        WidgetFactoryOptions,
    };
}

/// Prelude for the Vega chart renderer.
///
/// # Example
/// ```rust
/// use rendermime::vega_prelude::*;
/// ```
#[cfg(feature = "vega")]
pub mod vega_prelude {
    pub use super::{
        extensions, ChartEngine, ChartWidget, EmbedMode, EmbedSpec, NullEngine, VegaRenderer,
        WidgetState, VEGALITE_MIME_TYPE, VEGA_MIME_TYPE,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use async_trait::async_trait;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
