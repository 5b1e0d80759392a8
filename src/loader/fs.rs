use std::io::Read;
use std::path::{Path, PathBuf};

use crate::foundation::error::{AnimapperError, AnimapperResult};
use crate::loader::{Progress, ResourceLoader, ResourceRequest};

const CHUNK: usize = 64 * 1024;

/// Loads locators as filesystem paths, relative ones resolved against a root directory.
///
/// The root is a base directory, not a sandbox.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
    chunk_size: usize,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            chunk_size: CHUNK,
        }
    }

    /// Override the read chunk size (progress is reported once per chunk).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative locators are joined onto the root; absolute ones are used as given.
    fn resolve_path(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ResourceLoader for FsLoader {
    fn fetch(
        &self,
        request: &ResourceRequest,
        progress: &mut dyn FnMut(Progress),
    ) -> AnimapperResult<Vec<u8>> {
        let locator = request.locator.as_str();
        let path = self.resolve_path(locator);
        let mut f = std::fs::File::open(&path)
            .map_err(|e| AnimapperError::resource_load(locator, format!("open: {e}")))?;
        let total = f.metadata().ok().map(|m| m.len());

        let mut out = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let n = f
                .read(&mut buf)
                .map_err(|e| AnimapperError::resource_load(locator, format!("read: {e}")))?;
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
            progress(Progress {
                loaded: out.len() as u64,
                total,
            });
        }
        tracing::debug!(locator, bytes = out.len(), "fetched from disk");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/fs.rs"]
mod tests;
