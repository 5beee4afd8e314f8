//! The one-call contour pipeline.
//!
//! One invocation takes one binary image to completion: trace the contour
//! forest, reduce every polygon, render the depth-selected subset into a
//! fresh image of the same dimensions, and flatten all simplified vertices
//! into records. No state survives the call; two invocations share nothing
//! mutable.
//!
//! Validation happens before any work: image dimensions at view
//! construction and trace time, the tolerance sign here. The depth selector
//! is never an error source; its magnitude is clamped against the traced
//! forest, so every finite `level` produces a defined rendering.

use core::fmt;

use bc_core::{Image, ImageView};
use bc_raster::render_contours;
use bc_simplify::simplify_closed;
use bc_stream::{VertexRecord, encode};
use bc_trace::{ContourSet, trace_f32, trace_f64, trace_u8};

/// Per-call parameters. Defaults match the host object's attribute
/// defaults: draw the two outermost levels, reduce with tolerance 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub level: i32,
    pub epsilon: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            level: -2,
            epsilon: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Image(bc_core::Error),
    /// The tolerance was negative (or NaN); the reduction's behavior would
    /// be undefined, so the call is rejected outright.
    InvalidEpsilon { epsilon: f32 },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(e) => write!(f, "invalid input image: {e}"),
            Self::InvalidEpsilon { epsilon } => {
                write!(f, "epsilon must be non-negative, got {epsilon}")
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::InvalidEpsilon { .. } => None,
        }
    }
}

impl From<bc_core::Error> for PipelineError {
    fn from(e: bc_core::Error) -> Self {
        Self::Image(e)
    }
}

/// Everything one invocation produces. The caller owns all of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Simplified contours with the traced hierarchy.
    pub contours: ContourSet,
    /// Depth-selected stroke rendering, same dimensions as the input.
    pub rendered: Image<u8>,
    /// All simplified vertices, flattened in contour order.
    pub records: Vec<VertexRecord>,
}

/// Runs the pipeline on an 8-bit image.
pub fn run_u8(
    img: &ImageView<'_, u8>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    validate_epsilon(config.epsilon)?;
    let set = trace_u8(img)?;
    Ok(finish(set, img.width(), img.height(), config))
}

/// Runs the pipeline on an f32 image (non-zero samples are foreground).
pub fn run_f32(
    img: &ImageView<'_, f32>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    validate_epsilon(config.epsilon)?;
    let set = trace_f32(img)?;
    Ok(finish(set, img.width(), img.height(), config))
}

/// Runs the pipeline on an f64 image (non-zero samples are foreground).
pub fn run_f64(
    img: &ImageView<'_, f64>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    validate_epsilon(config.epsilon)?;
    let set = trace_f64(img)?;
    Ok(finish(set, img.width(), img.height(), config))
}

fn validate_epsilon(epsilon: f32) -> Result<(), PipelineError> {
    // `!(>= 0)` also rejects NaN.
    if !(epsilon >= 0.0) {
        return Err(PipelineError::InvalidEpsilon { epsilon });
    }
    Ok(())
}

fn finish(
    traced: ContourSet,
    width: usize,
    height: usize,
    config: &PipelineConfig,
) -> PipelineOutput {
    let contours = traced
        .contours
        .into_iter()
        .map(|mut c| {
            c.points = simplify_closed(&c.points, config.epsilon);
            c
        })
        .collect();

    let simplified = ContourSet {
        contours,
        hierarchy: traced.hierarchy,
    };

    let rendered = render_contours(&simplified, config.level, width, height);
    let records = encode(&simplified);

    PipelineOutput {
        contours: simplified,
        rendered,
        records,
    }
}
