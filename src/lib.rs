//! Animapper enhances an annotated SVG with accessibility, click wiring and frame animations.
//!
//! Element ids carry the annotations: ids containing `_interactive` become focusable buttons
//! that report clicks, ids containing `_animated` cycle the visibility of their children every
//! 80 ms. A JSON side-file supplies per-element records (a `title` becomes the tooltip), keyed by
//! the element id with editor escapes removed or by the id's first `_`-separated segment.
//!
//! The browser side is modelled headlessly:
//!
//! - Build a [`Page`] over a host document and a [`ResourceLoader`]
//! - [`Page::attach`] an [`Animapper`] pointing at a mount node
//! - Drive the page: [`Page::run_until_idle`], [`Page::advance`], [`Page::click`]
#![forbid(unsafe_code)]

mod foundation;

pub mod controller;
pub mod data;
pub mod delegate;
pub mod document;
pub mod host;
pub mod loader;
pub mod render;

pub use crate::foundation::core::{
    ANIMATED_MARKER, EDITOR_ESCAPE_ARTIFACT, FRAME_INTERVAL, INTERACTIVE_MARKER, Millis,
};
pub use crate::foundation::error::{AnimapperError, AnimapperResult};

pub use crate::controller::{
    Animapper, AnimapperConfig, ClickCallback, ClickEvent, FetchMode, FocusPolicy, LoadState,
    ScanScope,
};
pub use crate::data::{DataRecord, DataRecords, resolve};
pub use crate::delegate::{AnimatedDelegate, AnimationState, InteractiveDelegate};
pub use crate::document::{Document, NodeId};
pub use crate::host::{Page, Scheduler, WidgetId};
pub use crate::loader::{FsLoader, MemoryLoader, Progress, ResourceKind, ResourceLoader, ResourceRequest};
