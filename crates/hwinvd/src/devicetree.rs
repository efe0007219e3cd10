//! Devicetree compatible string extraction.
//!
//! The `compatible` attribute is a NUL-separated list ordered from most
//! generic to most specific; the last entry names the device family.

use std::fs;
use std::path::Path;

/// The most specific compatible string, `None` when the blob is absent.
pub fn family(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    last_compatible(&bytes)
}

/// Last non-empty NUL-delimited segment of the blob.
fn last_compatible(bytes: &[u8]) -> Option<String> {
    bytes
        .split(|b| *b == 0)
        .filter_map(|segment| {
            let text = String::from_utf8_lossy(segment);
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment_wins() {
        assert_eq!(last_compatible(b"foo\x00bar\x00").as_deref(), Some("bar"));
    }

    #[test]
    fn test_trailing_empty_segments_ignored() {
        assert_eq!(
            last_compatible(b"qcom,sm8350\x00qcom,sm8350-mtp\x00\x00").as_deref(),
            Some("qcom,sm8350-mtp")
        );
    }

    #[test]
    fn test_empty_blob() {
        assert_eq!(last_compatible(b""), None);
        assert_eq!(last_compatible(b"\x00\x00"), None);
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(family(Path::new("/nonexistent/compatible")), None);
    }
}
