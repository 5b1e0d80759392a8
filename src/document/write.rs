use crate::document::{Document, NodeId, NodeKind};

pub(super) fn write_subtree(doc: &Document, id: NodeId, declaration: bool) -> String {
    let opts = xmlwriter::Options {
        indent: xmlwriter::Indent::None,
        attributes_indent: xmlwriter::Indent::None,
        ..xmlwriter::Options::default()
    };
    let mut w = xmlwriter::XmlWriter::new(opts);
    if declaration {
        w.write_declaration();
    }
    write_node(doc, id, &mut w);
    w.end_document()
}

fn write_node(doc: &Document, id: NodeId, w: &mut xmlwriter::XmlWriter) {
    match doc.kind(id) {
        NodeKind::Element(el) => {
            w.start_element(&el.name);
            for (k, v) in &el.attrs {
                w.write_attribute(k, v);
            }
            for &c in doc.children(id) {
                write_node(doc, c, w);
            }
            w.end_element();
        }
        NodeKind::Text(t) => w.write_text(t),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/write.rs"]
mod tests;
