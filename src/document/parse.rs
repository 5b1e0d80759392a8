use crate::document::{Document, Element, NodeId, NodeKind};
use crate::foundation::error::{AnimapperError, AnimapperResult};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

pub(super) fn parse_document(text: &str) -> AnimapperResult<Document> {
    // Illustrator exports carry a DOCTYPE.
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let src = roxmltree::Document::parse_with_options(text, opts)
        .map_err(|e| AnimapperError::graphic(format!("parse xml: {e}")))?;

    let src_root = src.root_element();
    let mut doc = Document::new(src_root.tag_name().name());
    let root = doc.root();
    doc.nodes[root.idx()].kind = NodeKind::Element(convert_element(src_root));
    copy_children(&mut doc, root, src_root);
    Ok(doc)
}

fn copy_children(doc: &mut Document, parent: NodeId, src: roxmltree::Node<'_, '_>) {
    for child in src.children() {
        let kind = if child.is_element() {
            NodeKind::Element(convert_element(child))
        } else if child.is_text() {
            NodeKind::Text(child.text().unwrap_or_default().to_owned())
        } else {
            continue;
        };
        let id = doc.push(kind);
        doc.nodes[id.idx()].parent = Some(parent);
        doc.nodes[parent.idx()].children.push(id);
        if child.is_element() {
            copy_children(doc, id, child);
        }
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let name = qualify(node, tag.namespace(), tag.name());

    let mut attrs = Vec::new();
    for (prefix, uri) in declared_namespaces(node) {
        let key = match prefix {
            Some(p) => format!("xmlns:{p}"),
            None => "xmlns".to_owned(),
        };
        attrs.push((key, uri));
    }
    for a in node.attributes() {
        let key = match a.namespace() {
            Some(XML_NS) => format!("xml:{}", a.name()),
            ns => qualify(node, ns, a.name()),
        };
        attrs.push((key, a.value().to_owned()));
    }

    Element { name, attrs }
}

fn qualify(node: roxmltree::Node<'_, '_>, ns: Option<&str>, local: &str) -> String {
    match ns.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_owned(),
    }
}

/// Namespace declarations introduced on `node` itself (not inherited from its parent).
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<(Option<String>, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| (ns.name().map(str::to_owned), ns.uri().to_owned()))
        .collect()
}
