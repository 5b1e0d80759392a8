//! Widget controller: load the graphic, load the data, classify marked elements.

mod config;

use crate::data::{DataRecord, DataRecords, resolve};
use crate::delegate::{AnimatedDelegate, InteractiveDelegate};
use crate::document::{Document, NodeId};
use crate::foundation::core::{
    ANIMATED_MARKER, COMPLETE_CLASS, INTERACTIVE_MARKER, percent_complete,
};
use crate::foundation::error::{AnimapperError, AnimapperResult};
use crate::host::{FetchStep, Host, Turn, WidgetId};
use crate::loader::ResourceRequest;

pub use config::{AnimapperConfig, FetchMode, FocusPolicy, ScanScope};

/// Click notification handed to the widget callback.
pub struct ClickEvent<'a> {
    /// Widget that owns the clicked delegate.
    pub widget: WidgetId,
    /// The controller itself, for record lookups.
    pub parent: &'a Animapper,
    pub delegate: &'a InteractiveDelegate,
    /// Page document at the time of the click.
    pub document: &'a Document,
}

impl ClickEvent<'_> {
    pub fn data(&self) -> Option<&DataRecord> {
        self.delegate.data()
    }

    /// `id` attribute of the clicked interactive element.
    pub fn element_id(&self) -> Option<&str> {
        self.document.element_id(self.delegate.element())
    }
}

pub type ClickCallback = Box<dyn FnMut(&ClickEvent<'_>)>;

/// Pipeline position of one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Not attached to a page yet.
    Idle,
    LoadingGraphic,
    LoadingData,
    /// Classification ran.
    Ready,
    /// A fetch or parse failed; classification never ran.
    Failed,
}

/// Controller for one annotated graphic mounted on a page.
pub struct Animapper {
    config: AnimapperConfig,
    mount: NodeId,
    on_click: Option<ClickCallback>,
    id: Option<WidgetId>,
    state: LoadState,
    graphic_root: Option<NodeId>,
    records: DataRecords,
    interactives: Vec<InteractiveDelegate>,
    animations: Vec<AnimatedDelegate>,
    last_error: Option<String>,
}

impl std::fmt::Debug for Animapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animapper")
            .field("graphic", &self.config.graphic)
            .field("data", &self.config.data)
            .field("state", &self.state)
            .field("interactives", &self.interactives.len())
            .field("animations", &self.animations.len())
            .finish()
    }
}

impl Animapper {
    /// Create a controller that will mount its graphic under `mount` once attached to a page.
    pub fn new(config: AnimapperConfig, mount: NodeId) -> Self {
        Self {
            config,
            mount,
            on_click: None,
            id: None,
            state: LoadState::Idle,
            graphic_root: None,
            records: DataRecords::default(),
            interactives: Vec::new(),
            animations: Vec::new(),
            last_error: None,
        }
    }

    /// Install the click-notification callback.
    pub fn with_on_click(mut self, f: impl FnMut(&ClickEvent<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn id(&self) -> Option<WidgetId> {
        self.id
    }

    pub fn config(&self) -> &AnimapperConfig {
        &self.config
    }

    pub fn mount(&self) -> NodeId {
        self.mount
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Root of the mounted graphic inside the page document.
    pub fn graphic_root(&self) -> Option<NodeId> {
        self.graphic_root
    }

    pub fn records(&self) -> &DataRecords {
        &self.records
    }

    pub fn interactives(&self) -> &[InteractiveDelegate] {
        &self.interactives
    }

    pub fn animations(&self) -> &[AnimatedDelegate] {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut [AnimatedDelegate] {
        &mut self.animations
    }

    /// Message of the failure that stopped the pipeline, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record for an element id, via the identifier resolver.
    pub fn data_for(&self, id: &str) -> Option<&DataRecord> {
        resolve(id, &self.records)
    }

    /// Stop every animation. The graphic stays mounted.
    pub fn dispose(&mut self) {
        for anim in &mut self.animations {
            anim.dispose();
        }
    }

    #[tracing::instrument(skip(self, host), fields(graphic = %self.config.graphic))]
    pub(crate) fn initialize(&mut self, id: WidgetId, host: &mut Host) -> AnimapperResult<()> {
        self.id = Some(id);
        self.state = LoadState::LoadingGraphic;
        self.schedule(FetchStep::Graphic, host)
    }

    /// Run `step` inline (blocking) or queue it for a later turn.
    fn schedule(&mut self, step: FetchStep, host: &mut Host) -> AnimapperResult<()> {
        match self.config.fetch_mode {
            FetchMode::Blocking => self.resume(step, host),
            FetchMode::NonBlocking => {
                if let Some(widget) = self.id {
                    host.queue.push_back(Turn { widget, step });
                }
                Ok(())
            }
        }
    }

    pub(crate) fn resume(&mut self, step: FetchStep, host: &mut Host) -> AnimapperResult<()> {
        match step {
            FetchStep::Graphic => self.load_graphic(host),
            FetchStep::Data => self.load_data(host),
        }
    }

    #[tracing::instrument(skip(self, host), fields(graphic = %self.config.graphic))]
    fn load_graphic(&mut self, host: &mut Host) -> AnimapperResult<()> {
        let request = ResourceRequest::graphic(&self.config.graphic);
        let mount = self.mount;
        let Host {
            document, loader, ..
        } = &mut *host;

        let mut last_pct = None;
        let fetched = loader.fetch(&request, &mut |p| {
            let Some(pct) = percent_complete(p.loaded, p.total) else {
                return;
            };
            if last_pct == Some(pct) {
                return;
            }
            last_pct = Some(pct);
            tracing::trace!(pct, "graphic progress");
            let value = pct.to_string();
            let bar = document.create_element(
                "progress",
                &[("id", "progressbar"), ("value", value.as_str()), ("max", "100")],
            );
            if let Err(e) = document.replace_children(mount, bar) {
                tracing::debug!(error = %e, "progress indicator not shown");
            }
        });

        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => return self.fail(e),
        };
        let graphic = match Document::parse_bytes(&bytes) {
            Ok(doc) => doc,
            Err(e) => return self.fail(e),
        };

        document.add_class(mount, COMPLETE_CLASS);
        let root = document.import_subtree(&graphic, graphic.root());
        if let Err(e) = document.replace_children(mount, root) {
            return self.fail(e);
        }
        self.graphic_root = Some(root);
        tracing::debug!(bytes = bytes.len(), "graphic mounted");

        self.state = LoadState::LoadingData;
        self.schedule(FetchStep::Data, host)
    }

    #[tracing::instrument(skip(self, host), fields(data = %self.config.data))]
    fn load_data(&mut self, host: &mut Host) -> AnimapperResult<()> {
        let request = ResourceRequest::data(&self.config.data);
        let bytes = match host.loader.fetch(&request, &mut |_| {}) {
            Ok(bytes) => bytes,
            Err(e) => return self.fail(e),
        };
        self.records = match DataRecords::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => return self.fail(e),
        };
        tracing::debug!(records = self.records.len(), "data loaded");

        self.classify(host);
        self.state = LoadState::Ready;
        Ok(())
    }

    /// Report a pipeline failure.
    ///
    /// Fetch failures go to the diagnostic channel only; parse failures are also returned.
    fn fail(&mut self, err: AnimapperError) -> AnimapperResult<()> {
        self.state = LoadState::Failed;
        self.last_error = Some(err.to_string());
        if err.is_resource_load() {
            tracing::error!(error = %err, "problem loading resource");
            Ok(())
        } else {
            tracing::error!(error = %err, "initialization aborted");
            Err(err)
        }
    }

    /// Build delegates for every marked element in scope, in document order.
    ///
    /// An element carrying both markers is treated as interactive only.
    #[tracing::instrument(skip(self, host))]
    pub(crate) fn classify(&mut self, host: &mut Host) {
        let doc = &mut host.document;
        let scan: Vec<NodeId> = match self.config.scan_scope {
            ScanScope::Mount => doc.descendants(self.mount).collect(),
            ScanScope::Document => doc.descendants_or_self(doc.root()).collect(),
        };

        let mut interactive = Vec::new();
        let mut animated = Vec::new();
        for node in scan {
            let Some(id) = doc.element_id(node) else {
                continue;
            };
            let is_interactive = id.contains(INTERACTIVE_MARKER);
            let is_animated = id.contains(ANIMATED_MARKER);
            if is_interactive && is_animated {
                tracing::warn!(id, "element carries both markers; treating it as interactive");
            }
            if is_interactive {
                interactive.push((node, id.to_owned()));
            } else if is_animated {
                animated.push(node);
            }
        }

        self.interactives = interactive
            .into_iter()
            .map(|(node, id)| {
                let data = resolve(&id, &self.records).cloned();
                InteractiveDelegate::new(doc, node, data, self.config.focus_policy)
            })
            .collect();
        self.animations = animated
            .into_iter()
            .map(|node| AnimatedDelegate::new(doc, node, &host.scheduler))
            .collect();

        tracing::debug!(
            interactive = self.interactives.len(),
            animated = self.animations.len(),
            "classified"
        );
    }

    pub(crate) fn animation_for_timer_mut(
        &mut self,
        timer: crate::host::TimerId,
    ) -> Option<&mut AnimatedDelegate> {
        self.animations
            .iter_mut()
            .find(|a| a.timer_id() == Some(timer))
    }

    pub(crate) fn interactive_at(&self, node: NodeId) -> Option<&InteractiveDelegate> {
        self.interactives.iter().find(|d| d.element() == node)
    }

    /// Forward a click on `delegate_node` to the callback. Returns `false` without a callback.
    pub(crate) fn notify_click(&mut self, delegate_node: NodeId, document: &Document) -> bool {
        let Some(widget) = self.id else {
            return false;
        };
        let Some(mut callback) = self.on_click.take() else {
            return false;
        };
        let fired = match self.interactive_at(delegate_node) {
            Some(delegate) => {
                callback(&ClickEvent {
                    widget,
                    parent: self,
                    delegate,
                    document,
                });
                true
            }
            None => false,
        };
        self.on_click = Some(callback);
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/controller.rs"]
mod tests;
