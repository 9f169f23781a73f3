//! Streaming content hashing (SHA-256 or BLAKE3)

use crate::types::{FileDigest, DIGEST_LEN};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Bytes read per chunk. Memory use per file never exceeds this buffer.
pub const CHUNK_SIZE: usize = 4096;

/// Supported content hash algorithms
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256, interoperable with `sha256sum` and friends
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(format!(
                "Unknown hash algorithm: {} (must be 'sha256' or 'blake3')",
                other
            )),
        }
    }
}

/// Incremental digest state for one input
enum Accumulator {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Accumulator::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Accumulator::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Accumulator::Sha256(h) => h.update(chunk),
            Accumulator::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize(self) -> FileDigest {
        let mut out = [0u8; DIGEST_LEN];
        match self {
            Accumulator::Sha256(h) => out.copy_from_slice(&h.finalize()),
            Accumulator::Blake3(h) => out.copy_from_slice(h.finalize().as_bytes()),
        }
        FileDigest::from_bytes(out)
    }
}

/// Hash everything a reader yields, `CHUNK_SIZE` bytes at a time.
pub fn digest_reader<R: Read>(algorithm: HashAlgorithm, mut reader: R) -> io::Result<FileDigest> {
    let mut acc = Accumulator::new(algorithm);
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        acc.update(&buf[..n]);
    }
    Ok(acc.finalize())
}

/// Hash a file's content by streaming it from disk.
pub fn digest_file(algorithm: HashAlgorithm, path: &Path) -> io::Result<FileDigest> {
    let file = File::open(path)?;
    digest_reader(algorithm, file)
}

/// Hash an in-memory buffer in one shot.
pub fn digest_bytes(algorithm: HashAlgorithm, content: &[u8]) -> FileDigest {
    let mut acc = Accumulator::new(algorithm);
    acc.update(content);
    acc.finalize()
}
