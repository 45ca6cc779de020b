// SPDX-License-Identifier: MPL-2.0
//! Metadata stripping for the `strip-metadata` pre-commit tool.
//!
//! Every supported file is decoded and re-encoded from pixels, which drops
//! EXIF, XMP, and GPS blocks wholesale and recompresses the result. The
//! original file is only replaced after the new bytes are fully written
//! (`<file>.tmp` then rename), so a failed run never leaves a half-written
//! image behind.

use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::codecs::png::{CompressionType, FilterType, PngEncoder};
use image_rs::codecs::webp::WebPEncoder;
use image_rs::DynamicImage;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// JPEG re-encode quality used when the caller does not override it.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Extensions the tool processes. GIFs are deliberately absent: animated
/// frames do not survive a plain decode/re-encode round trip.
const STRIPPABLE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Size accounting for one processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOutcome {
    pub original_bytes: u64,
    pub stripped_bytes: u64,
}

impl StripOutcome {
    /// Size change as a percentage of the original. Negative when the
    /// re-encoded file ended up larger.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let original = self.original_bytes as f64;
        let stripped = self.stripped_bytes as f64;
        (original - stripped) / original * 100.0
    }
}

/// Checks whether the tool handles this path, by extension.
pub fn is_strippable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| STRIPPABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn encode(decoded: &DynamicImage, extension: &str, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match extension {
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel; flatten before encoding.
            let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, jpeg_quality))?;
        }
        "png" => {
            decoded.write_with_encoder(PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Best,
                FilterType::Adaptive,
            ))?;
        }
        "webp" => {
            // The webp encoder only accepts RGB8/RGBA8 buffers.
            let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buffer))?;
        }
        other => {
            return Err(Error::Image(format!("unsupported extension: {other}")));
        }
    }
    Ok(buffer)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Strips metadata from one file in place.
///
/// Reads the file, re-encodes it without metadata, writes `<file>.tmp`, and
/// renames it over the original. Returns the before/after sizes.
pub fn strip_file(path: &Path, jpeg_quality: u8) -> Result<StripOutcome> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| Error::Image(format!("no file extension: {}", path.display())))?;

    let original_bytes = fs::metadata(path)?.len();
    let decoded = image_rs::load_from_memory(&fs::read(path)?)?;
    let encoded = encode(&decoded, &extension, jpeg_quality)?;
    let stripped_bytes = encoded.len() as u64;

    let tmp = temp_path(path);
    fs::write(&tmp, &encoded)?;
    fs::rename(&tmp, path)?;

    Ok(StripOutcome {
        original_bytes,
        stripped_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    /// A small JPEG with a synthetic EXIF APP1 segment spliced in after SOI.
    fn jpeg_with_exif() -> Vec<u8> {
        let pixels: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(8, 8, |x, y| Rgb([x as u8 * 16, y as u8 * 16, 128]));
        let mut plain = Vec::new();
        DynamicImage::ImageRgb8(pixels)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut plain, 90))
            .expect("failed to encode fixture jpeg");
        assert_eq!(&plain[..2], &[0xFF, 0xD8], "fixture must start with SOI");

        let payload: Vec<u8> = b"Exif\0\0fake-tiff-data".to_vec();
        let segment_len = (payload.len() + 2) as u16;

        let mut with_exif = vec![0xFF, 0xD8, 0xFF, 0xE1];
        with_exif.extend_from_slice(&segment_len.to_be_bytes());
        with_exif.extend_from_slice(&payload);
        with_exif.extend_from_slice(&plain[2..]);
        with_exif
    }

    fn contains_exif_marker(bytes: &[u8]) -> bool {
        bytes.windows(4).any(|window| window == b"Exif")
    }

    #[test]
    fn is_strippable_matches_the_tool_extensions() {
        assert!(is_strippable(Path::new("a.jpg")));
        assert!(is_strippable(Path::new("a.JPEG")));
        assert!(is_strippable(Path::new("a.png")));
        assert!(is_strippable(Path::new("a.webp")));
        assert!(!is_strippable(Path::new("a.gif")));
        assert!(!is_strippable(Path::new("a.txt")));
        assert!(!is_strippable(Path::new("noextension")));
    }

    #[test]
    fn strip_file_removes_exif_segment_from_jpeg() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("photo.jpg");
        let original = jpeg_with_exif();
        assert!(contains_exif_marker(&original));
        fs::write(&path, &original).expect("failed to write fixture");

        let outcome = strip_file(&path, DEFAULT_JPEG_QUALITY).expect("strip should succeed");

        let stripped = fs::read(&path).expect("failed to read stripped file");
        assert!(!contains_exif_marker(&stripped));
        assert_eq!(outcome.original_bytes, original.len() as u64);
        assert_eq!(outcome.stripped_bytes, stripped.len() as u64);
        // The result must still be a decodable image.
        image_rs::load_from_memory(&stripped).expect("stripped jpeg should decode");
    }

    #[test]
    fn strip_file_replaces_png_in_place_without_leaving_tmp() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("photo.png");
        let pixels: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(4, 4, |_, _| Rgb([1, 2, 3]));
        DynamicImage::ImageRgb8(pixels)
            .save(&path)
            .expect("failed to write fixture png");

        strip_file(&path, DEFAULT_JPEG_QUALITY).expect("strip should succeed");

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
        image_rs::load_from_memory(&fs::read(&path).expect("read failed"))
            .expect("stripped png should decode");
    }

    #[test]
    fn strip_file_fails_on_non_image_bytes() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"definitely not a jpeg").expect("failed to write fixture");

        let result = strip_file(&path, DEFAULT_JPEG_QUALITY);
        assert!(result.is_err());
        // The original must be left untouched on failure.
        assert_eq!(
            fs::read(&path).expect("read failed"),
            b"definitely not a jpeg"
        );
    }

    #[test]
    fn reduction_percent_handles_growth_and_zero() {
        let smaller = StripOutcome {
            original_bytes: 200,
            stripped_bytes: 150,
        };
        assert_eq!(smaller.reduction_percent(), 25.0);

        let larger = StripOutcome {
            original_bytes: 100,
            stripped_bytes: 110,
        };
        assert!(larger.reduction_percent() < 0.0);

        let empty = StripOutcome {
            original_bytes: 0,
            stripped_bytes: 0,
        };
        assert_eq!(empty.reduction_percent(), 0.0);
    }
}
