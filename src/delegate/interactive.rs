use crate::controller::FocusPolicy;
use crate::data::DataRecord;
use crate::document::{Document, NodeId};
use crate::foundation::core::INTERACTIVE_CLASS;

/// Accessibility and click wiring for one interactive element.
///
/// Attributes are applied once, at construction. The delegate lives as long as its widget; there
/// is no unregistration.
#[derive(Clone, Debug)]
pub struct InteractiveDelegate {
    element: NodeId,
    data: Option<DataRecord>,
}

impl InteractiveDelegate {
    pub fn new(
        doc: &mut Document,
        element: NodeId,
        data: Option<DataRecord>,
        policy: FocusPolicy,
    ) -> Self {
        doc.add_class(element, INTERACTIVE_CLASS);

        if let Some(title) = data.as_ref().and_then(DataRecord::title) {
            doc.set_attr(element, "title", title);
        }

        let focusable = match policy {
            FocusPolicy::Always => true,
            FocusPolicy::WithRecord => data.is_some(),
        };
        if focusable {
            doc.set_attr(element, "tabindex", "0");
            doc.set_attr(element, "role", "button");
        }

        Self { element, data }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Record resolved for this element, if any.
    pub fn data(&self) -> Option<&DataRecord> {
        self.data.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/delegate/interactive.rs"]
mod tests;
