//! Test support utilities for photo-metrics.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the photo-metrics analysis pipeline.
//!
//! # Example
//!
//! ```
//! use photo_metrics_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // Create synthetic test images
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let flat = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![sharp, flat]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
