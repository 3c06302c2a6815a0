//! Photo Metrics Adapters - External adapters for photo-metrics.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - In-memory and base64 image loading

pub mod bytes;
pub mod fs;

pub use bytes::{load_base64, load_bytes};
pub use fs::{load_path, FsImageSource};
