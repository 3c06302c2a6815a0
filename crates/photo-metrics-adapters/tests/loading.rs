//! Integration tests for the filesystem and in-memory loaders.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage};
use photo_metrics_adapters::{load_base64, load_bytes, FsImageSource};
use photo_metrics_core::{EngineError, ImageSource};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([230u8, 180, 120])
        } else {
            Rgb([40u8, 60, 90])
        }
    });
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

#[test]
fn test_load_bytes_roundtrip() {
    let bytes = png_bytes(32, 24);
    let info = load_bytes("memory.png", &bytes).expect("decode");
    assert_eq!(info.source, "memory.png");
    assert_eq!(info.width, 32);
    assert_eq!(info.height, 24);
    assert_eq!(info.channels, 3);
}

#[test]
fn test_load_bytes_rejects_empty_payload() {
    let err = load_bytes("empty", &[]);
    assert!(matches!(err, Err(EngineError::Decode(_))));
}

#[test]
fn test_load_base64_roundtrip() {
    let bytes = png_bytes(16, 16);
    let payload = STANDARD.encode(&bytes);
    let info = load_base64("payload.png", &payload).expect("decode");
    assert_eq!(info.width, 16);
}

#[test]
fn test_load_base64_with_data_url_prefix() {
    let bytes = png_bytes(8, 8);
    let payload = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
    let info = load_base64("payload.png", &payload).expect("decode");
    assert_eq!(info.height, 8);
}

#[test]
fn test_fs_source_scans_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.png"), png_bytes(10, 10)).expect("write a");
    std::fs::write(dir.path().join("b.png"), png_bytes(12, 12)).expect("write b");
    std::fs::write(dir.path().join("notes.txt"), b"not an image").expect("write txt");

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    let images: Vec<_> = source.images().collect();
    assert_eq!(images.len(), 2);
    for image in images {
        let info = image.expect("load");
        assert!(info.width >= 10);
    }
}

#[test]
fn test_fs_source_skips_subdirectories_unless_recursive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).expect("mkdir");
    std::fs::write(nested.join("deep.png"), png_bytes(6, 6)).expect("write deep");

    let flat = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(0));

    let recursive = FsImageSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(1));
}

#[test]
fn test_fs_source_reports_undecodable_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("fake.png"), b"definitely not a png").expect("write");

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    let images: Vec<_> = source.images().collect();
    assert_eq!(images.len(), 1);
    assert!(images[0].is_err());
}
