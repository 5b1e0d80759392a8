use crate::document::{Document, NodeId};
use crate::foundation::core::{ANIMATED_CLASS, FRAME_INTERVAL};
use crate::host::{IntervalHandle, Scheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    Stopped,
    Running,
}

/// Round-robin visibility loop over the element children of one animated element.
///
/// The frame list is captured at construction; later changes to the element's children are not
/// tracked. Nothing is painted up front: until the first tick the markup decides what is visible.
#[derive(Debug)]
pub struct AnimatedDelegate {
    element: NodeId,
    frames: Vec<NodeId>,
    current: usize,
    scheduler: Scheduler,
    timer: Option<IntervalHandle>,
}

impl AnimatedDelegate {
    /// Wrap `element` and start ticking right away when it has at least one frame.
    pub fn new(doc: &mut Document, element: NodeId, scheduler: &Scheduler) -> Self {
        doc.add_class(element, ANIMATED_CLASS);
        let frames = doc.element_children(element);
        let mut delegate = Self {
            element,
            frames,
            current: 0,
            scheduler: scheduler.clone(),
            timer: None,
        };
        if !delegate.frames.is_empty() {
            delegate.start();
        }
        delegate
    }

    /// (Re)start the periodic tick. Any running timer is cancelled first.
    pub fn start(&mut self) {
        self.stop();
        self.timer = Some(self.scheduler.set_interval(FRAME_INTERVAL));
    }

    /// Hide the current frame, advance with wraparound, show the new current frame.
    pub fn render(&mut self, doc: &mut Document) {
        let len = self.frames.len();
        if len == 0 {
            return;
        }
        doc.set_style_property(self.frames[self.current], "display", "none");
        self.current = (self.current + 1) % len;
        doc.set_style_property(self.frames[self.current], "display", "block");
    }

    /// Cancel the periodic tick. No-op when not running.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Release the timer for good. Also happens on drop.
    pub fn dispose(&mut self) {
        self.stop();
    }

    pub fn state(&self) -> AnimationState {
        if self.timer.is_some() {
            AnimationState::Running
        } else {
            AnimationState::Stopped
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn frames(&self) -> &[NodeId] {
        &self.frames
    }

    /// Index of the frame shown by the last tick.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(IntervalHandle::id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/delegate/animated.rs"]
mod tests;
