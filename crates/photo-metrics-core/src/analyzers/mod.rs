//! Per-aspect analyzers over the shared pixel buffers.
//!
//! Each analyzer is a pure function from buffers and its config section to
//! its report section. They are independent of each other, with one
//! exception: lighting consumes the band percentages the exposure analyzer
//! computed, so [`crate::engine::analyze_image`] runs exposure first.

pub mod color;
pub mod composition;
pub mod exposure;
pub mod gradient;
pub mod lighting;
pub mod quality;

pub use exposure::{ExposureBands, ExposureOutcome, Histogram};
pub use gradient::GradientField;
