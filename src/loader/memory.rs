use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::foundation::error::{AnimapperError, AnimapperResult};
use crate::loader::{Progress, ResourceLoader, ResourceRequest};

#[derive(Clone, Debug)]
enum Entry {
    Ok(Vec<u8>),
    Status(u16),
}

/// In-memory loader. Records every request it serves, in order.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    entries: BTreeMap<String, Entry>,
    chunk_size: Option<usize>,
    requests: RefCell<Vec<ResourceRequest>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(locator.into(), Entry::Ok(body.into()));
        self
    }

    /// Serve `locator` with a non-success status.
    pub fn with_status(mut self, locator: impl Into<String>, status: u16) -> Self {
        self.entries.insert(locator.into(), Entry::Status(status));
        self
    }

    /// Report progress in chunks of `chunk_size` bytes with a known total.
    pub fn with_progress_chunks(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size.max(1));
        self
    }

    /// Requests served so far.
    pub fn requests(&self) -> Vec<ResourceRequest> {
        self.requests.borrow().clone()
    }
}

impl ResourceLoader for MemoryLoader {
    fn fetch(
        &self,
        request: &ResourceRequest,
        progress: &mut dyn FnMut(Progress),
    ) -> AnimapperResult<Vec<u8>> {
        self.requests.borrow_mut().push(request.clone());
        match self.entries.get(&request.locator) {
            None => Err(AnimapperError::resource_load(&request.locator, "status 404")),
            Some(Entry::Status(s)) => Err(AnimapperError::resource_load(
                &request.locator,
                format!("status {s}"),
            )),
            Some(Entry::Ok(body)) => {
                if let Some(chunk) = self.chunk_size {
                    let total = body.len() as u64;
                    let mut loaded = 0usize;
                    while loaded < body.len() {
                        loaded = (loaded + chunk).min(body.len());
                        progress(Progress {
                            loaded: loaded as u64,
                            total: Some(total),
                        });
                    }
                }
                Ok(body.clone())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/memory.rs"]
mod tests;
