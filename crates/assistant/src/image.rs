use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AssistError, Result};

/// Image sent to the assistant, base64 encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: String,
}

impl ImageInput {
    /// Encode raw bytes; `mime_type` must be an `image/*` type
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self> {
        if !mime_type.starts_with("image/") {
            return Err(AssistError::InvalidImage(format!(
                "'{}' is not an image type",
                mime_type
            )));
        }
        if bytes.is_empty() {
            return Err(AssistError::InvalidImage("file is empty".to_string()));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Read an image file, guessing its MIME type from the extension
    pub async fn load(path: &Path) -> Result<Self> {
        let mime = mime_guess::from_path(path).first().ok_or_else(|| {
            AssistError::InvalidImage(format!("unknown file type: {}", path.display()))
        })?;
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(&bytes, mime.essence_str())
    }

    /// Parse a `data:<mime>;base64,<data>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = || AssistError::InvalidImage("not a base64 data URL".to_string());
        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (mime_type, data) = rest.split_once(";base64,").ok_or_else(invalid)?;
        if !mime_type.starts_with("image/") {
            return Err(AssistError::InvalidImage(format!(
                "'{}' is not an image type",
                mime_type
            )));
        }
        STANDARD
            .decode(data)
            .map_err(|e| AssistError::InvalidImage(e.to_string()))?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes() {
        let image = ImageInput::from_bytes(b"abc", "image/png").unwrap();
        assert_eq!(image.data, "YWJj");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(matches!(
            ImageInput::from_bytes(b"abc", "text/plain"),
            Err(AssistError::InvalidImage(_))
        ));
        assert!(matches!(
            ImageInput::from_bytes(b"", "image/png"),
            Err(AssistError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_from_data_url() {
        let image = ImageInput::from_data_url("data:image/jpeg;base64,YWJj").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "YWJj");

        assert!(ImageInput::from_data_url("https://x.test/a.png").is_err());
        assert!(ImageInput::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn test_load_guesses_mime_type() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mockup.jpg");
        tokio::fs::write(&path, b"\xff\xd8\xff").await.unwrap();

        let image = ImageInput::load(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");

        let unknown = dir.path().join("mockup.unknownext");
        tokio::fs::write(&unknown, b"x").await.unwrap();
        assert!(ImageInput::load(&unknown).await.is_err());
    }
}
