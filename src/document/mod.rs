//! Mutable XML document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by [`NodeId`]. Detaching a node
//! (for example when a mount point's children are replaced) leaves it in the arena without a
//! parent; traversals only ever walk nodes reachable from the requested root.

mod parse;
mod style;
mod write;

use crate::foundation::error::{AnimapperError, AnimapperResult};

pub(crate) use style::{parse_style, write_style};

/// Handle to a node inside one [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Element payload: qualified name plus attributes in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written (`svg`, `g`, `xlink:a`).
    pub name: String,
    /// Attributes in source order, namespace declarations included.
    pub attrs: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document. The root is always an element.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document holding a single empty root element.
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(Element {
                    name: root_name.to_owned(),
                    attrs: Vec::new(),
                }),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Parse an XML document (SVG, XHTML) from text.
    pub fn parse_str(text: &str) -> AnimapperResult<Self> {
        parse::parse_document(text)
    }

    /// Parse an XML document from raw bytes, which must be UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> AnimapperResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| AnimapperError::graphic(format!("document is not UTF-8: {e}")))?;
        Self::parse_str(text)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// `true` when `id` was allocated by this document.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Fail with a validation error unless `id` is an element of this document.
    pub fn ensure_element(&self, id: NodeId) -> AnimapperResult<()> {
        if self.element(id).is_none() {
            return Err(AnimapperError::validation(format!(
                "node {id:?} is not an element of this document"
            )));
        }
        Ok(())
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.idx()].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.idx()).map(|n| &n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.idx()).map(|n| &mut n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.idx()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.idx()].children
    }

    /// Element children only, in order (text nodes are skipped).
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the `id` attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "id")
    }

    /// Set or replace an attribute. Ignored on text nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        match el.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => el.attrs.push((name.to_owned(), value)),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let el = self.element_mut(id)?;
        let pos = el.attrs.iter().position(|(k, _)| k == name)?;
        Some(el.attrs.remove(pos).1)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|v| v.split_whitespace().any(|c| c == class))
    }

    /// Add a class token unless already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.element(id).is_none() || self.has_class(id, class) {
            return;
        }
        let next = match self.attr(id, "class") {
            Some(cur) if !cur.trim().is_empty() => format!("{} {class}", cur.trim_end()),
            _ => class.to_owned(),
        };
        self.set_attr(id, "class", next);
    }

    /// Read one declaration from the inline `style` attribute.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        parse_style(style)
            .into_iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    /// Set one declaration in the inline `style` attribute, keeping the others.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        if self.element(id).is_none() {
            return;
        }
        let mut decls = self.attr(id, "style").map(parse_style).unwrap_or_default();
        match decls.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_owned(),
            None => decls.push((property.to_owned(), value.to_owned())),
        }
        self.set_attr(id, "style", write_style(&decls));
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.push(NodeKind::Element(Element {
            name: name.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_owned()))
    }

    /// Append `child` under `parent`, detaching it from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> AnimapperResult<()> {
        self.ensure_element(parent)?;
        if !self.contains(child) || child == self.root {
            return Err(AnimapperError::validation(
                "append_child: child is not a detachable node of this document",
            ));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(AnimapperError::validation(
                "append_child: cannot move a node under its own subtree",
            ));
        }
        self.detach(child);
        self.nodes[child.idx()].parent = Some(parent);
        self.nodes[parent.idx()].children.push(child);
        Ok(())
    }

    /// Remove `id` from its parent's child list. The node stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.idx()].parent.take() {
            self.nodes[parent.idx()].children.retain(|c| *c != id);
        }
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let old = std::mem::take(&mut self.nodes[id.idx()].children);
        for c in old {
            self.nodes[c.idx()].parent = None;
        }
    }

    /// Replace every child of `parent` with the single node `child`.
    pub fn replace_children(&mut self, parent: NodeId, child: NodeId) -> AnimapperResult<()> {
        self.ensure_element(parent)?;
        self.clear_children(parent);
        self.append_child(parent, child)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes[node.idx()].parent {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    /// `true` when `node` is `ancestor` or lies below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.contains(node) && self.contains(ancestor) && self.is_ancestor_or_self(ancestor, node)
    }

    /// Deep-copy `src_root` of `src` into this document as a detached subtree.
    pub fn import_subtree(&mut self, src: &Document, src_root: NodeId) -> NodeId {
        let copy = self.push(src.kind(src_root).clone());
        for &c in src.children(src_root) {
            let child = self.import_subtree(src, c);
            self.nodes[child.idx()].parent = Some(copy);
            self.nodes[copy.idx()].children.push(child);
        }
        copy
    }

    /// Pre-order traversal of the elements strictly below `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Pre-order traversal of `id` and every element below it.
    pub fn descendants_or_self(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// First element below `root` (inclusive) whose `id` attribute equals `value`.
    pub fn find_by_id(&self, root: NodeId, value: &str) -> Option<NodeId> {
        self.descendants_or_self(root)
            .find(|n| self.element_id(*n) == Some(value))
    }

    /// Serialize the whole document.
    pub fn to_xml_string(&self) -> String {
        write::write_subtree(self, self.root, true)
    }

    /// Serialize the subtree rooted at `id` as a standalone fragment.
    pub fn subtree_to_string(&self, id: NodeId) -> String {
        write::write_subtree(self, id, false)
    }
}

/// Iterator over elements in document order.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if self.doc.element(id).is_none() {
                continue;
            }
            self.stack
                .extend(self.doc.children(id).iter().rev().copied());
            return Some(id);
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
