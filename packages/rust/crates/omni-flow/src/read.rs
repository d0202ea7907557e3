//! Safe text reading for catalog files.
//!
//! Size limit first, then binary detection, then UTF-8 with lossy fallback.

use std::fs;
use std::io::Read;
use std::path::Path;

use memchr::memchr;

use crate::error::ReadError;

/// Default size limit for a single markdown file (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Bytes scanned for NUL when detecting binary content.
const BINARY_PROBE_LEN: usize = 8192;

/// Read a text file with size and binary checks.
///
/// # Errors
///
/// - [`ReadError::NotFound`] if the path does not exist
/// - [`ReadError::NotAFile`] if it is a directory or other non-file
/// - [`ReadError::TooLarge`] above `max_bytes`
/// - [`ReadError::BinaryFile`] when a NUL byte appears early in the file
pub fn read_text(path: &Path, max_bytes: u64) -> Result<String, ReadError> {
    let metadata = fs::metadata(path).map_err(|_| ReadError::NotFound(path.to_path_buf()))?;

    if !metadata.is_file() {
        return Err(ReadError::NotAFile(path.to_path_buf()));
    }
    if metadata.len() > max_bytes {
        return Err(ReadError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer)?;

    decode_text(buffer)
}

/// Quick binary detection: NUL byte within the first 8 KiB.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_PROBE_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a `String`, replacing invalid UTF-8 with U+FFFD.
///
/// # Errors
///
/// Returns [`ReadError::BinaryFile`] when binary content is detected.
pub fn decode_text(buffer: Vec<u8>) -> Result<String, ReadError> {
    if is_binary(&buffer) {
        return Err(ReadError::BinaryFile);
    }

    match String::from_utf8(buffer) {
        Ok(s) => Ok(s),
        Err(e) => Ok(String::from_utf8_lossy(&e.into_bytes()).into_owned()),
    }
}
