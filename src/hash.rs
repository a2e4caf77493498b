// src/hash.rs

//! SHA-256 digests for packaged files

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Hash everything a reader yields, returning lowercase hex
pub fn sha256_reader<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hash a file's contents
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    sha256_reader(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        let mut input: &[u8] = b"hello world";
        assert_eq!(
            sha256_reader(&mut input).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_file_matches_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("libtcod.a");
        std::fs::write(&path, b"!<arch>\n").unwrap();

        let mut bytes: &[u8] = b"!<arch>\n";
        assert_eq!(sha256_file(&path).unwrap(), sha256_reader(&mut bytes).unwrap());
    }
}
