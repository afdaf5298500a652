//! Path encoding for image URLs

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::path::{Path, PathBuf};

use crate::errors::{GalleryError, GalleryResult};

/// URL-safe alphabet, padded on encode, padding optional on decode
const PATH_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode an absolute path for use as a single URL segment
pub fn encode_path(path: &Path) -> String {
    PATH_ENGINE.encode(path_bytes(path))
}

/// Reverse of [`encode_path`]
pub fn decode_path(encoded: &str) -> GalleryResult<PathBuf> {
    let bytes = PATH_ENGINE
        .decode(encoded.trim())
        .map_err(|e| GalleryError::invalid_request("path", format!("invalid base64: {}", e)))?;
    if bytes.is_empty() {
        return Err(GalleryError::invalid_request("path", "empty path"));
    }
    path_from_bytes(bytes)
}

/// Decode a base64 JSON document, as carried in the `data` query parameter
pub fn decode_json<T: serde::de::DeserializeOwned>(field: &str, encoded: &str) -> GalleryResult<T> {
    let bytes = PATH_ENGINE
        .decode(encoded.trim())
        .map_err(|e| GalleryError::invalid_request(field, format!("invalid base64: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| GalleryError::invalid_request(field, format!("invalid JSON: {}", e)))
}

/// Counterpart of [`decode_json`]
pub fn encode_json<T: serde::Serialize>(value: &T) -> GalleryResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| GalleryError::invalid_request("data", e.to_string()))?;
    Ok(PATH_ENGINE.encode(json))
}

pub fn image_url(path: &Path) -> String {
    format!("/image/{}", encode_path(path))
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> GalleryResult<PathBuf> {
    use std::os::unix::ffi::OsStringExt;
    Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> GalleryResult<PathBuf> {
    String::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| GalleryError::invalid_request("path", "path is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_path_is_url_safe() {
        // Bytes chosen so standard base64 would produce '+' and '/'
        let path = Path::new("/photos/\u{00fb}\u{00ff}?>.jpg");
        let encoded = encode_path(path);

        assert!(!encoded.contains('+') && !encoded.contains('/'));
        assert_eq!(decode_path(&encoded).unwrap(), path);
    }

    #[test]
    fn test_missing_padding_is_accepted() {
        let encoded = encode_path(Path::new("/a.jpg"));
        let unpadded = encoded.trim_end_matches('=');
        assert_eq!(decode_path(unpadded).unwrap(), PathBuf::from("/a.jpg"));
    }

    #[test]
    fn test_garbage_is_invalid_request() {
        assert!(matches!(
            decode_path("not base64!"),
            Err(GalleryError::InvalidRequest { .. })
        ));
        assert!(matches!(decode_path(""), Err(GalleryError::InvalidRequest { .. })));
    }

    #[test]
    fn test_json_payload() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Payload {
            folder: String,
        }

        let encoded = encode_json(&Payload { folder: "/x".into() }).unwrap();
        let decoded: Payload = decode_json("data", &encoded).unwrap();
        assert_eq!(decoded.folder, "/x");

        let bad: GalleryResult<Payload> = decode_json("data", &PATH_ENGINE.encode(b"{oops"));
        assert!(matches!(bad, Err(GalleryError::InvalidRequest { .. })));
    }
}
