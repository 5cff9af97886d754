//! The six-stage pipeline: latch definitions, the shared bypass
//! ladder, and the per-stage logic that drives them.

pub mod bypass;
pub mod latches;
pub mod stages;

pub use latches::PipelineState;
