//! Umbrella crate for the `binary-contours` workspace.
//!
//! Re-exports the image model, the tracer, the polygon reducer, the
//! renderer, the vertex-stream encoder and the one-call pipeline. Most
//! callers only need [`run_u8`] (or its float variants) with a
//! [`PipelineConfig`].

pub use bc_core::*;
pub use bc_pipeline::*;
pub use bc_raster::{clamp_level, render_contours, select_indices};
pub use bc_simplify::simplify_closed;
pub use bc_stream::{VertexRecord, encode, flatten};
pub use bc_trace::{
    BorderKind, Contour, ContourSet, HierarchyNode, trace_f32, trace_f64, trace_u8,
};
