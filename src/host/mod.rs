//! Headless host runtime: page document, fetch queue, timers and input dispatch.

mod page;
mod scheduler;

use std::collections::VecDeque;

use crate::document::Document;
use crate::loader::ResourceLoader;

pub use page::{Page, WidgetId};
pub use scheduler::{IntervalHandle, Scheduler, TimerId};

/// Which acquisition a queued turn performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FetchStep {
    Graphic,
    Data,
}

/// One pending fetch turn on the page queue.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Turn {
    pub(crate) widget: WidgetId,
    pub(crate) step: FetchStep,
}

/// Everything a controller may touch while its pipeline runs.
pub(crate) struct Host {
    pub(crate) document: Document,
    pub(crate) loader: Box<dyn ResourceLoader>,
    pub(crate) scheduler: Scheduler,
    pub(crate) queue: VecDeque<Turn>,
}
