use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// An image file staged for submission.
///
/// Loading decodes the file once, which both proves it is a real image
/// and picks up the dimensions shown in the input screen preview.
#[derive(Debug, Clone)]
pub struct AttachedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl AttachedImage {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
        let format = image::guess_format(&bytes)
            .with_context(|| format!("{} is not a recognized image", path.display()))?;
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .with_context(|| format!("could not decode {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime: format.to_mime_type(),
            width: decoded.width(),
            height: decoded.height(),
            bytes,
        })
    }

    /// One-line summary for the input screen preview.
    pub fn preview(&self) -> String {
        format!(
            "{} ({}x{}, {})",
            self.file_name,
            self.width,
            self.height,
            human_size(self.bytes.len())
        )
    }
}

fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_a_png_with_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(3, 2).save(&path).unwrap();

        let attached = AttachedImage::load(&path).unwrap();
        assert_eq!(attached.file_name, "tiny.png");
        assert_eq!(attached.mime, "image/png");
        assert_eq!((attached.width, attached.height), (3, 2));
        assert!(!attached.bytes.is_empty());
    }

    #[test]
    fn load_rejects_a_non_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some text").unwrap();

        assert!(AttachedImage::load(&path).is_err());
    }

    #[test]
    fn load_rejects_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AttachedImage::load(&dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn preview_includes_name_and_dimensions() {
        let attached = AttachedImage {
            path: PathBuf::from("cat.png"),
            file_name: "cat.png".to_string(),
            mime: "image/png",
            bytes: vec![0; 2048],
            width: 320,
            height: 240,
        };
        assert_eq!(attached.preview(), "cat.png (320x240, 2.0 KB)");
    }
}
