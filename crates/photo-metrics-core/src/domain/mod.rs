//! Core domain types for photo technical analysis.

mod image_info;
mod report;

pub use image_info::ImageInfo;
pub use report::{
    AnalysisRecord, BasicInfo, ColorReport, ColorTemperature, CompositionReport, DominantColor,
    ExposureReport, GridCell, LightDirection, LightingReport, Offset, Point, QualityReport,
    SharpnessLevel, TechnicalReport,
};
