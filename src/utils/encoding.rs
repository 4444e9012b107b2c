//! Text decoding with a UTF-8 fast path and charset-detection fallback.
//!
//! Help files and C sources in older trees occasionally carry Latin-1
//! author names or stray bytes in comments. Those files are decoded with
//! the detected legacy encoding instead of failing the whole run.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

use crate::error::{HelpgenError, Result};

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Detect the encoding label of `bytes`.
///
/// BOM markers win, then strict UTF-8, then chardetng on a leading sample.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Decode raw bytes into a `String`, replacing undecodable sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if used != UTF_8 || had_errors {
        tracing::debug!(encoding = used.name(), had_errors, "decoded with fallback encoding");
    }
    decoded.into_owned()
}

/// Read a whole file as text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| HelpgenError::io(path, e))?;
    Ok(decode_text(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_text_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("[topic]\nCopyright \u{00a9} 2025\n".as_bytes()).unwrap();
        file.flush().unwrap();

        let content = read_text(file.path()).unwrap();
        assert_eq!(content, "[topic]\nCopyright \u{00a9} 2025\n");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let content = decode_text(&[0xef, 0xbb, 0xbf, b'[', b'a', b']']);
        assert_eq!(content, "[a]");
    }

    #[test]
    fn test_latin1_falls_back_instead_of_failing() {
        // "Jos\xe9" is not valid UTF-8
        let content = decode_text(b"/* Jos\xe9 */\nint x;\n");
        assert!(content.starts_with("/* Jos"));
        assert!(content.ends_with("int x;\n"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_text(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, HelpgenError::Io { .. }));
    }
}
