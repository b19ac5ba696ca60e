use std::path::Path;

use base64::{
    engine::general_purpose::STANDARD,
    Engine as _,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use crate::core::LibrisError;

/// Extensions offered by the image picker. This is only a filter hint; the
/// encoder accepts any bytes it is handed with an `image/*` type.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A self-contained `data:<mime>;base64,<payload>` string.
///
/// Only produced by [`EncodedImage::encode`] or a successful
/// [`EncodedImage::parse`], so a value of this type is always something an
/// image source can display without a separate fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn encode(mime: &str, bytes: &[u8]) -> Result<Self, LibrisError> {
        if !is_image_mime(mime) {
            return Err(LibrisError::UnsupportedImageType(mime.to_string()));
        }

        let payload = STANDARD.encode(bytes);
        Ok(Self(format!("{DATA_PREFIX}{mime}{BASE64_MARKER}{payload}")))
    }

    pub fn parse(value: &str) -> Result<Self, LibrisError> {
        let (mime, payload) = split_data_url(value)?;
        if !is_image_mime(mime) {
            return Err(LibrisError::UnsupportedImageType(mime.to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| LibrisError::InvalidImagePayload(e.to_string()))?;

        Ok(Self(value.to_string()))
    }

    pub fn mime(&self) -> &str {
        split_data_url(&self.0).map(|(mime, _)| mime).unwrap_or_default()
    }

    pub fn decode(&self) -> Result<(String, Vec<u8>), LibrisError> {
        let (mime, payload) = split_data_url(&self.0)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| LibrisError::InvalidImagePayload(e.to_string()))?;
        Ok((mime.to_string(), bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size of the encoded string, not of the decoded image.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EncodedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EncodedImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        EncodedImage::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<EncodedImage>` that uses `""` for the empty case.
pub mod empty_as_none {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };

    use super::EncodedImage;

    pub fn serialize<S: Serializer>(
        value: &Option<EncodedImage>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(image) => serializer.serialize_str(image.as_str()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<EncodedImage>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if value.is_empty() {
            return Ok(None);
        }
        EncodedImage::parse(&value).map(Some).map_err(serde::de::Error::custom)
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub async fn read_encoded(path: &Path) -> Result<EncodedImage, LibrisError> {
    let bytes = tokio::fs::read(path).await?;
    EncodedImage::encode(mime_for_path(path), &bytes)
}

fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/") && mime.len() > "image/".len()
}

fn split_data_url(value: &str) -> Result<(&str, &str), LibrisError> {
    let rest = value
        .strip_prefix(DATA_PREFIX)
        .ok_or_else(|| LibrisError::InvalidImagePayload("missing data: prefix".to_string()))?;
    rest.split_once(BASE64_MARKER)
        .ok_or_else(|| LibrisError::InvalidImagePayload("missing ;base64, marker".to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encodes_bytes_as_data_url() {
        let image = EncodedImage::encode("image/png", b"hello").unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(image.mime(), "image/png");
    }

    #[test]
    fn decode_returns_original_bytes() {
        let bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];
        let image = EncodedImage::encode("image/png", &bytes).unwrap();
        let (mime, decoded) = image.decode().unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn rejects_non_image_types() {
        let result = EncodedImage::encode("application/octet-stream", b"abc");
        assert!(matches!(result, Err(LibrisError::UnsupportedImageType(_))));

        let result = EncodedImage::encode("image/", b"abc");
        assert!(matches!(result, Err(LibrisError::UnsupportedImageType(_))));
    }

    #[test]
    fn parse_rejects_paths_and_bad_payloads() {
        assert!(EncodedImage::parse("/home/me/cover.png").is_err());
        assert!(EncodedImage::parse("data:image/png,rawdata").is_err());
        assert!(EncodedImage::parse("data:image/png;base64,@@@").is_err());
        assert!(EncodedImage::parse("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(EncodedImage::parse("data:image/jpeg;base64,aGVsbG8=").is_ok());
    }

    #[test]
    fn mime_follows_extension_case_insensitively() {
        assert_eq!(mime_for_path(&PathBuf::from("cover.PNG")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("a/b/cover.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(&PathBuf::from("cover.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(&PathBuf::from("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(&PathBuf::from("no_extension")), "application/octet-stream");
    }

    #[test]
    fn optional_image_serializes_as_empty_string() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Holder {
            #[serde(with = "empty_as_none")]
            image: Option<EncodedImage>,
        }

        let empty = serde_json::to_string(&Holder { image: None }).unwrap();
        assert_eq!(empty, r#"{"image":""}"#);
        let back: Holder = serde_json::from_str(&empty).unwrap();
        assert_eq!(back, Holder { image: None });

        let back: Holder = serde_json::from_str(r#"{"image":null}"#).unwrap();
        assert_eq!(back, Holder { image: None });

        assert!(serde_json::from_str::<Holder>(r#"{"image":"cover.png"}"#).is_err());
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let image = read_encoded(&path).await.unwrap();
        assert_eq!(image.as_str(), "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_encoded(&dir.path().join("gone.png")).await;
        assert!(matches!(result, Err(LibrisError::Io(_))));
    }
}
