//! HTML serialization helpers.

use crate::dom::node::{ElementData, NodeData};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that never have children or a closing tag.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Elements whose content is text up to the matching closing tag.
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

pub(crate) fn write_open_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    out.push('>');
}

pub(crate) fn write_close_tag(el: &ElementData, out: &mut String) {
    if !is_void(&el.tag) {
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

/// Write a leaf payload (text or comment). Elements are handled by the caller.
pub(crate) fn write_leaf(data: &NodeData, out: &mut String) {
    match data {
        NodeData::Text(text) => out.push_str(text),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(_) => {}
    }
}
