//! Image files to inline data URLs.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// MIME type used when nothing better is known.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// A `data:<mime>;base64,<payload>` URL, usable directly as an image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
        Self(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read selected file: {0}")]
    Browser(String),
}

/// Guess an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        _ => FALLBACK_MIME,
    }
}

/// Read a file and encode it; the only suspension point of image selection.
#[cfg(not(target_arch = "wasm32"))]
pub async fn encode_file(path: &Path) -> Result<EncodedImage, ImageError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "encoded image");
    Ok(EncodedImage::from_bytes(mime_for_path(path), &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_become_a_data_url() {
        let image = EncodedImage::from_bytes("image/png", b"hello");
        assert_eq!(image.as_str(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn blank_mime_falls_back() {
        let image = EncodedImage::from_bytes("  ", &[]);
        assert_eq!(image.as_str(), "data:application/octet-stream;base64,");
    }

    #[test]
    fn mime_guess_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("icon.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("README")), FALLBACK_MIME);
    }

    #[tokio::test]
    async fn encode_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let image = encode_file(&path).await.unwrap();
        assert_eq!(image.as_str(), "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn encode_file_reports_missing_files() {
        let err = encode_file(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Read { .. }));
    }
}
