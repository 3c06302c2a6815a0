//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the analysis core and external
//! adapters such as filesystem loaders and report writers.

mod image_source;
mod progress;
mod result_output;

pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
