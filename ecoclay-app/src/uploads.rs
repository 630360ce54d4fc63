//! # Uploads
//! The file-upload collaborator: takes file bytes, stores them locally, and
//! hands back a locally-resolvable URI that event records keep verbatim in
//! `organizer_photos`. No network is involved: the original prototype used
//! object URLs; here the bytes land content-addressed in a directory. A failed
//! upload surfaces to the caller and nothing is stored against the event.

use std::path::{Path, PathBuf};

use xxhash_rust::xxh3::xxh3_64;

pub struct PhotoLibrary {
    dir: PathBuf,
}

impl PhotoLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Stores the bytes under a content-addressed name (keeping the original
    /// extension) and returns a `file://` URI for the stored copy. Uploading
    /// identical bytes twice yields the same URI.
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let stored_name = format!("{:016x}.{extension}", xxh3_64(bytes));
        let path = self.dir.join(&stored_name);

        if !path.exists() {
            std::fs::write(&path, bytes)?;
        }
        Ok(format!("file://{}", path.display()))
    }
}
