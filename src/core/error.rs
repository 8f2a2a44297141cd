use thiserror::Error;

/// Errors surfaced by renderers and their widgets.
///
/// Cloneable so that one failure can be observed by every awaiter of a
/// readiness signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Mime type not accepted by this renderer: {0}")]
    UnsupportedMimeType(String),

    #[error("Chart engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid chart specification: {0}")]
    InvalidSpec(String),

    #[error("Widget was disposed before rendering started")]
    Disposed,

    #[error("Readiness signal was dropped before it resolved")]
    Abandoned,

    #[error("No async runtime available to drive rendering")]
    NoRuntime,
}

/// Failures reported by an external rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Specification rejected: {0}")]
    Rejected(String),

    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid mime model payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Extension descriptor has an empty mime type")]
    EmptyMimeType,

    #[error("Renderer does not accept the mime type it is registered for: {mime_type}")]
    UnsupportedMimeType { mime_type: String },
}
