use std::collections::{BTreeMap, VecDeque};

use crate::controller::Animapper;
use crate::document::{Document, NodeId};
use crate::foundation::core::Millis;
use crate::foundation::error::{AnimapperError, AnimapperResult};
use crate::host::{Host, Scheduler};
use crate::loader::ResourceLoader;

/// Handle to a controller attached to a [`Page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct WidgetId(pub(crate) u32);

/// Single-threaded host for one document and any number of widgets.
///
/// Work only happens when the caller drives it: [`Page::run_next`] / [`Page::run_until_idle`]
/// process queued fetch turns, [`Page::advance`] moves the clock and fires animation ticks, and
/// [`Page::click`] dispatches input.
pub struct Page {
    host: Host,
    widgets: BTreeMap<WidgetId, Animapper>,
    next_widget: u32,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("now", &self.host.scheduler.now())
            .field("queued", &self.host.queue.len())
            .field("widgets", &self.widgets)
            .finish()
    }
}

impl Page {
    pub fn new(document: Document, loader: impl ResourceLoader + 'static) -> Self {
        Self {
            host: Host {
                document,
                loader: Box::new(loader),
                scheduler: Scheduler::new(),
                queue: VecDeque::new(),
            },
            widgets: BTreeMap::new(),
            next_widget: 0,
        }
    }

    /// Parse `markup` as the page document.
    pub fn from_markup(markup: &str, loader: impl ResourceLoader + 'static) -> AnimapperResult<Self> {
        Ok(Self::new(Document::parse_str(markup)?, loader))
    }

    pub fn document(&self) -> &Document {
        &self.host.document
    }

    /// Mutable access to the page document. Do not touch a mount point while its widget loads.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.host.document
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.host.scheduler
    }

    pub fn now(&self) -> Millis {
        self.host.scheduler.now()
    }

    /// Number of fetch turns waiting to run.
    pub fn pending_turns(&self) -> usize {
        self.host.queue.len()
    }

    /// Attach a controller and start its initialization.
    ///
    /// In blocking mode the whole pipeline runs here and a data or graphic parse failure is
    /// returned; the widget stays attached in [`crate::LoadState::Failed`] under the newest id,
    /// `self.widget_ids().last()`, so it can still be inspected or detached. Fetch failures are
    /// logged, never returned.
    pub fn attach(&mut self, mut widget: Animapper) -> AnimapperResult<WidgetId> {
        widget.config().validate()?;
        self.host.document.ensure_element(widget.mount())?;

        let id = WidgetId(self.next_widget);
        self.next_widget += 1;
        let result = widget.initialize(id, &mut self.host);
        self.widgets.insert(id, widget);
        result.map(|()| id)
    }

    /// Detach a widget, stopping its animations. Its mounted graphic stays in the document.
    ///
    /// Queued turns for the widget are skipped when they come up.
    pub fn detach(&mut self, id: WidgetId) -> Option<Animapper> {
        let mut widget = self.widgets.remove(&id)?;
        widget.dispose();
        Some(widget)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Animapper> {
        self.widgets.get(&id)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Animapper> {
        self.widgets.get_mut(&id)
    }

    pub fn widget_ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.keys().copied()
    }

    /// Run one queued fetch turn. Returns `Ok(false)` when the queue is empty.
    pub fn run_next(&mut self) -> AnimapperResult<bool> {
        let Some(turn) = self.host.queue.pop_front() else {
            return Ok(false);
        };
        match self.widgets.get_mut(&turn.widget) {
            Some(widget) => widget.resume(turn.step, &mut self.host)?,
            None => {
                tracing::debug!(widget = turn.widget.0, step = ?turn.step, "skipping turn for detached widget")
            }
        }
        Ok(true)
    }

    /// Run queued turns until none are left. Stops at the first hard failure.
    pub fn run_until_idle(&mut self) -> AnimapperResult<usize> {
        let mut turns = 0;
        while self.run_next()? {
            turns += 1;
        }
        Ok(turns)
    }

    /// Move the clock forward by `ms`, firing due animation ticks in order. Returns the tick count.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.host.scheduler.now().saturating_add(Millis(ms));
        let mut ticks = 0;
        while let Some(timer) = self.host.scheduler.pop_due(deadline) {
            let anim = self
                .widgets
                .values_mut()
                .find_map(|w| w.animation_for_timer_mut(timer));
            match anim {
                Some(anim) => {
                    anim.render(&mut self.host.document);
                    ticks += 1;
                }
                None => tracing::trace!(timer = ?timer, "tick without an owner"),
            }
        }
        self.host.scheduler.settle(deadline);
        ticks
    }

    /// Dispatch a click on `target`.
    ///
    /// The click bubbles: every interactive ancestor-or-self of `target` notifies its widget's
    /// callback, innermost first. Returns the number of callbacks invoked.
    pub fn click(&mut self, target: NodeId) -> AnimapperResult<usize> {
        self.host.document.ensure_element(target)?;
        let mut path = vec![target];
        let mut cur = target;
        while let Some(parent) = self.host.document.parent(cur) {
            path.push(parent);
            cur = parent;
        }

        let mut notified = 0;
        for node in path {
            for widget in self.widgets.values_mut() {
                if widget.notify_click(node, &self.host.document) {
                    notified += 1;
                }
            }
        }
        Ok(notified)
    }

    /// Click the first element (document order) whose `id` equals `element_id`.
    pub fn click_id(&mut self, element_id: &str) -> AnimapperResult<usize> {
        let root = self.host.document.root();
        let target = self
            .host
            .document
            .find_by_id(root, element_id)
            .ok_or_else(|| AnimapperError::validation(format!("no element with id '{element_id}'")))?;
        self.click(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/page.rs"]
mod tests;
