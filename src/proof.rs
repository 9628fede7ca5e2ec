//! Photo proof storage for the daily challenge and photo tasks.

use crate::core::config::EcoConfig;
use crate::utils::persistence::write_atomic;
use sha2::{Digest, Sha256};
use std::io;
use std::path::PathBuf;

/// Where a proof landed and the SHA-256 of its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofReceipt {
    pub path: PathBuf,
    pub digest: String,
}

/// Writes `{username}_{id}.png` files under the upload directory.
#[derive(Debug, Clone)]
pub struct ProofStore {
    dir: PathBuf,
}

impl ProofStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open(config: &EcoConfig) -> io::Result<Self> {
        Ok(Self::new(config.upload_dir()?))
    }

    pub fn path_for(&self, username: &str, id: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.png", file_safe(username), file_safe(id)))
    }

    /// Store a proof, replacing any previous upload for the same id.
    pub fn store(&self, username: &str, id: &str, bytes: &[u8]) -> io::Result<ProofReceipt> {
        if bytes.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "proof upload is empty",
            ));
        }
        let path = self.path_for(username, id);
        write_atomic(&path, bytes)?;

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = format!("{:x}", hasher.finalize());

        log::info!(
            "[REWARD] proof {} stored ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(ProofReceipt { path, digest })
    }
}

/// Keep file names inside the upload directory.
fn file_safe(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .replace("..", "_")
}
