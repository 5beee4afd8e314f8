//! Contour extraction from binary images via border following.
//!
//! The tracer walks the image in raster order and follows every outer border
//! and hole border it meets, labeling visited pixels in a zero-padded working
//! grid so each border is traced exactly once. Discovery order is therefore
//! deterministic for identical input.
//!
//! Unlike edge-map vectorization, the input here is region data: any non-zero
//! sample is foreground, and the result is a containment forest. A contour's
//! parent is the border immediately enclosing it; holes alternate with outer
//! borders as depth increases.
//!
//! Contours keep every boundary pixel at unit resolution. Reduction to
//! sparser polygons is a separate stage (`bc-simplify`).

mod follow;
mod set;

pub use follow::{trace_f32, trace_f64, trace_u8};
pub use set::{BorderKind, Contour, ContourSet, HierarchyNode};
