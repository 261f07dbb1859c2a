//! gzip compression of the backup document.
//!
//! Decompression reads in chunks and stops once the output exceeds the
//! configured bound, so a crafted artifact cannot exhaust memory.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::errors::{BackupError, Result};

/// Compress `text` into a gzip stream.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip stream back into text, refusing output larger
/// than `max_len` bytes.
pub fn decompress(data: &[u8], max_len: usize) -> Result<String> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = decoder
            .read(&mut buffer)
            .map_err(|e| BackupError::InvalidPayload(format!("gzip: {e}")))?;
        if read == 0 {
            break;
        }
        if out.len() + read > max_len {
            return Err(BackupError::InvalidPayload(format!(
                "document exceeds the {max_len}-byte limit"
            )));
        }
        out.extend_from_slice(&buffer[..read]);
    }

    String::from_utf8(out)
        .map_err(|e| BackupError::InvalidPayload(format!("document is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024 * 1024;

    #[test]
    fn roundtrip_preserves_text() {
        for text in ["", "[\n{}\n]", "ünïcödé ✓ 🔐", "x".repeat(100_000).as_str()] {
            let packed = compress(text).unwrap();
            assert_eq!(decompress(&packed, LIMIT).unwrap(), text);
        }
    }

    #[test]
    fn output_is_a_gzip_stream() {
        let packed = compress("hello").unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn repetitive_text_shrinks() {
        let text = "{\"id\":\"abc\"},\n".repeat(1000);
        assert!(compress(&text).unwrap().len() < text.len() / 10);
    }

    #[test]
    fn garbage_is_a_payload_error() {
        assert!(matches!(
            decompress(b"definitely not gzip", LIMIT),
            Err(BackupError::InvalidPayload(_))
        ));
    }

    #[test]
    fn truncated_stream_is_a_payload_error() {
        let packed = compress(&"abc".repeat(1000)).unwrap();
        let cut = &packed[..packed.len() / 2];
        assert!(matches!(
            decompress(cut, LIMIT),
            Err(BackupError::InvalidPayload(_))
        ));
    }

    #[test]
    fn oversized_output_is_refused() {
        let packed = compress(&"a".repeat(10_000)).unwrap();
        assert!(matches!(
            decompress(&packed, 1_000),
            Err(BackupError::InvalidPayload(_))
        ));
    }

    #[test]
    fn non_utf8_content_is_rejected() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xff, 0xfe, 0xfd]).unwrap();
        let packed = encoder.finish().unwrap();
        assert!(matches!(
            decompress(&packed, LIMIT),
            Err(BackupError::InvalidPayload(_))
        ));
    }
}
