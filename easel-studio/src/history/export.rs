//! PNG export of history entries

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use super::{Artifact, HistoryEntry};
use crate::constants::{EXPORT_FILE_EXT, EXPORT_FILE_PREFIX};

/// Errors that can occur while exporting an entry
#[derive(Debug, Error)]
pub enum ExportError {
    /// The image could not be encoded
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    /// The encoded bytes could not be written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Encode an artifact as PNG bytes
pub fn encode_png(artifact: &Artifact) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    artifact
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Download file name for the entry at a 1-based newest-first position
///
/// e.g. position 1 → `generated_image_1.png`
pub fn export_file_name(position: usize) -> String {
    format!("{EXPORT_FILE_PREFIX}{position}.{EXPORT_FILE_EXT}")
}

/// Encode `entry` and write it into `dir` under its download file name
///
/// Creates `dir` if needed and returns the written path.
pub fn write_export(
    dir: &Path,
    position: usize,
    entry: &HistoryEntry,
) -> Result<PathBuf, ExportError> {
    let bytes = entry.export_png()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(position));
    fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryCache;
    use image::{DynamicImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn gradient() -> Artifact {
        let image = RgbaImage::from_fn(5, 3, |x, y| Rgba([(x * 40) as u8, (y * 80) as u8, 7, 255]));
        Artifact::new(DynamicImage::ImageRgba8(image))
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&gradient()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_png_deterministic() {
        let artifact = gradient();
        assert_eq!(encode_png(&artifact).unwrap(), encode_png(&artifact).unwrap());
    }

    #[test]
    fn test_encoded_png_decodes_to_same_pixels() {
        let artifact = gradient();
        let bytes = encode_png(&artifact).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.to_rgba8(), artifact.image().to_rgba8());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(1), "generated_image_1.png");
        assert_eq!(export_file_name(12), "generated_image_12.png");
    }

    #[test]
    fn test_write_export() {
        let dir = TempDir::new().unwrap();
        let mut cache = HistoryCache::unbounded();
        cache.append("a gradient", gradient()).unwrap();
        let entry = cache.get(1).unwrap();

        let path = write_export(&dir.path().join("downloads"), 1, entry).unwrap();

        assert_eq!(path.file_name().unwrap(), "generated_image_1.png");
        assert_eq!(fs::read(&path).unwrap(), entry.export_png().unwrap());
    }
}
