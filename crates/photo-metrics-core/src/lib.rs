//! Photo Metrics Core - image technical analysis
//!
//! This crate contains the domain types, the per-aspect analyzers (exposure,
//! quality, lighting, composition, color), and the engine entry point that
//! assembles a full [`TechnicalReport`] from a decoded image.

pub mod analyzers;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

pub use config::AnalysisConfig;
pub use domain::{AnalysisRecord, BasicInfo, ImageInfo, SharpnessLevel, TechnicalReport};
pub use engine::analyze_image;
pub use error::EngineError;
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};
