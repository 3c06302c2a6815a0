//! Engine error kinds.

/// Errors the analysis engine can surface to a caller.
///
/// Loader failures abort an analysis immediately; the aggregator never emits
/// a partial report. Zero-variance or uniform images are defined edge cases
/// in every analyzer and do not produce errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The input could not be decoded as a supported image format.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded image has a zero or degenerate dimension.
    #[error("degenerate image dimensions: {width}x{height}")]
    Size {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },

    /// A numeric failure inside an analyzer.
    ///
    /// Analyzers guard their arithmetic, so this covers only conditions that
    /// cannot be expressed as a defined edge case.
    #[error("analysis failed: {0}")]
    Analysis(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_error_message() {
        let err = EngineError::Size {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "degenerate image dimensions: 0x4");
    }

    #[test]
    fn test_analysis_error_message() {
        let err = EngineError::Analysis("empty luminance field".into());
        assert!(err.to_string().contains("empty luminance field"));
    }
}
