//! SHA-256 content hashing, in the lowercase hex form the feed uses.

use crate::error::{Result, ScanError};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of in-memory bytes
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Lowercase hex SHA-256 of a file's contents, read in fixed-size chunks.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ScanError::io(path, e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // sha256("abc")
    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    // sha256("")
    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_hash_bytes_known_vectors() {
        assert_eq!(hash_bytes(b"abc"), ABC);
        assert_eq!(hash_bytes(b""), EMPTY);
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x.sys");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(hash_file(&path).unwrap(), ABC);

        let empty = temp_dir.path().join("empty.sys");
        std::fs::write(&empty, b"").unwrap();
        assert_eq!(hash_file(&empty).unwrap(), EMPTY);
    }

    #[test]
    fn test_hash_spans_multiple_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.sys");
        let data: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();
        assert_eq!(hash_file(&path).unwrap(), hash_bytes(&data));
    }

    #[test]
    fn test_identical_content_same_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.sys");
        let b = temp_dir.path().join("renamed.bin");
        std::fs::write(&a, b"MZ\x90\x00driver").unwrap();
        std::fs::write(&b, b"MZ\x90\x00driver").unwrap();
        assert_eq!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = hash_file(&temp_dir.path().join("missing.sys")).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
