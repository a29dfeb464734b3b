//! Stage-by-stage traces of combinator pipelines.
//!
//! A [`Viz`](visualize::Viz) wraps each application in a pipeline and records the plan
//! it ran under: operation, resolved shape, chosen strategy, and the size of the
//! container on either side. Traces render to JSON or to a standalone HTML page, both as
//! in-memory strings.
pub mod visualize;

pub use visualize::{serialize_html, serialize_json, Viz, VizAction, VizError};
