//! Vega and Vega-Lite chart rendering.
//!
//! - [`VegaRenderer`](renderer::VegaRenderer) accepts exactly the two chart mime types
//! - [`ChartWidget`](widget::ChartWidget) hands one chart specification to a
//!   [`ChartEngine`](engine::ChartEngine) and reports readiness
//! - [`extensions`](renderer::extensions) builds the descriptors a host registers

pub mod engine;
pub mod renderer;
pub mod spec;
pub mod widget;
