//! The renderer-independent core: bundles, mime models and the readiness
//! signal, plus the error, telemetry and validation types shared by renderers.

pub mod bundle;
pub mod error;
pub mod model;
pub mod signal;
pub mod telemetry;
pub mod validation;
