//! In-memory adapter for loading images from raw or base64-encoded bytes.
//!
//! Mobile and service front-ends hand images over as encoded byte payloads
//! rather than filesystem paths; these loaders decode them into the same
//! [`ImageInfo`] the filesystem adapter produces.

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use photo_metrics_core::{EngineError, ImageInfo};
use tracing::debug;

/// Decodes an image from encoded bytes (JPEG, PNG).
///
/// # Errors
///
/// Returns [`EngineError::Decode`] when the bytes are not a decodable image
/// and [`EngineError::Size`] when the decoded frame has a zero dimension.
pub fn load_bytes(source: impl Into<String>, bytes: &[u8]) -> Result<ImageInfo, EngineError> {
    let image = image::load_from_memory(bytes)?;
    let info = ImageInfo::new(source, image);
    if info.width == 0 || info.height == 0 {
        return Err(EngineError::Size {
            width: info.width,
            height: info.height,
        });
    }
    debug!(
        source = %info.source,
        width = info.width,
        height = info.height,
        "decoded image from memory"
    );
    Ok(info)
}

/// Decodes an image from a base64 payload, with or without a data-URL prefix.
///
/// # Errors
///
/// Returns an error when the payload is not valid base64 or the decoded
/// bytes are not a decodable image.
pub fn load_base64(source: impl Into<String>, payload: &str) -> Result<ImageInfo> {
    let encoded = strip_data_url_prefix(payload.trim());
    let bytes = STANDARD
        .decode(encoded)
        .context("payload is not valid base64")?;
    Ok(load_bytes(source, &bytes)?)
}

/// Drops a `data:image/...;base64,` prefix if one is present.
fn strip_data_url_prefix(payload: &str) -> &str {
    if payload.starts_with("data:") {
        payload
            .split_once(',')
            .map_or(payload, |(_, encoded)| encoded)
    } else {
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:image/png;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(strip_data_url_prefix("AAAA"), "AAAA");
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = load_bytes("garbage", &[0u8, 1, 2, 3]);
        assert!(matches!(err, Err(EngineError::Decode(_))));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        assert!(load_base64("bad", "not-base64!!!").is_err());
    }
}
