//! Resource acquisition.
//!
//! Loaders are synchronous per call; the page decides whether a fetch runs inline (blocking) or
//! on a later queue turn (non-blocking).

mod fs;
mod memory;

use crate::foundation::core::GRAPHIC_MIME;
use crate::foundation::error::AnimapperResult;

pub use fs::FsLoader;
pub use memory::MemoryLoader;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Vector graphic; the response is always treated as `image/svg+xml`.
    Graphic,
    /// UTF-8 JSON side-file.
    Data,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRequest {
    pub locator: String,
    pub kind: ResourceKind,
}

impl ResourceRequest {
    pub fn graphic(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            kind: ResourceKind::Graphic,
        }
    }

    pub fn data(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            kind: ResourceKind::Data,
        }
    }

    /// MIME type the response is forced to, if any.
    pub fn mime_override(&self) -> Option<&'static str> {
        match self.kind {
            ResourceKind::Graphic => Some(GRAPHIC_MIME),
            ResourceKind::Data => None,
        }
    }
}

/// Byte-level progress of one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub loaded: u64,
    /// `None` when the transport cannot tell the total length.
    pub total: Option<u64>,
}

/// Read-only fetch by locator.
///
/// A non-success outcome must be reported as [`crate::AnimapperError::ResourceLoad`].
pub trait ResourceLoader {
    fn fetch(
        &self,
        request: &ResourceRequest,
        progress: &mut dyn FnMut(Progress),
    ) -> AnimapperResult<Vec<u8>>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for Box<L> {
    fn fetch(
        &self,
        request: &ResourceRequest,
        progress: &mut dyn FnMut(Progress),
    ) -> AnimapperResult<Vec<u8>> {
        (**self).fetch(request, progress)
    }
}
