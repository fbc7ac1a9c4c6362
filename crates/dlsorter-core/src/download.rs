//! Download descriptor and filename derivation.

use serde::{Deserialize, Serialize};

/// A download-created event as reported by the external download service.
///
/// Read-only to the engine; the field names mirror the browser event shape so
/// JSON-line event streams deserialize directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub id: i64,
    pub url: String,
    /// Page that initiated the download; may be empty.
    #[serde(default)]
    pub referrer: String,
    /// Full destination path as chosen by the service. Separators may be
    /// `/` or `\` depending on the originating platform.
    pub filename: String,
    /// True when the download was issued by this tool itself. Such events
    /// are ignored to prevent redirect loops.
    #[serde(default, rename = "byExtensionId")]
    pub by_extension: bool,
}

impl Download {
    /// The bare filename: last segment of `filename`, split on `\` when the
    /// path contains one, otherwise on `/`.
    pub fn bare_filename(&self) -> &str {
        let sep = if self.filename.contains('\\') { '\\' } else { '/' };
        self.filename.rsplit(sep).next().unwrap_or(self.filename.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn download(filename: &str) -> Download {
        Download {
            id: 1,
            url: "http://example.com/f".to_string(),
            referrer: String::new(),
            filename: filename.to_string(),
            by_extension: false,
        }
    }

    #[test]
    fn bare_filename_unix_path() {
        assert_eq!(download("/home/user/Downloads/a.zip").bare_filename(), "a.zip");
    }

    #[test]
    fn bare_filename_windows_path() {
        assert_eq!(download("C:\\tmp\\a.zip").bare_filename(), "a.zip");
    }

    #[test]
    fn bare_filename_no_separator() {
        assert_eq!(download("a.zip").bare_filename(), "a.zip");
    }

    #[test]
    fn bare_filename_mixed_prefers_backslash() {
        // A single backslash marks the path as Windows-style even when
        // forward slashes are present too.
        assert_eq!(download("C:\\tmp/dir\\b.pdf").bare_filename(), "b.pdf");
    }

    #[test]
    fn deserializes_event_line() {
        let json = r#"{"id":7,"url":"http://x/a.zip","referrer":"http://x/","filename":"C:\\tmp\\a.zip","byExtensionId":true}"#;
        let d: Download = serde_json::from_str(json).unwrap();
        assert_eq!(d.id, 7);
        assert!(d.by_extension);
        assert_eq!(d.bare_filename(), "a.zip");
    }

    #[test]
    fn missing_optional_fields_default() {
        let d: Download =
            serde_json::from_str(r#"{"id":1,"url":"http://x/a","filename":"a"}"#).unwrap();
        assert_eq!(d.referrer, "");
        assert!(!d.by_extension);
    }
}
