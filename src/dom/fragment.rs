//! Detached HTML fragments.

use crate::dom::node::{ElementData, NodeData};
use crate::dom::parse::parse_fragment;
use crate::dom::serialize::{write_close_tag, write_leaf, write_open_tag};

/// An owned node of a detached fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentNode {
    pub data: NodeData,
    pub children: Vec<FragmentNode>,
}

impl FragmentNode {
    pub fn element(data: ElementData, children: Vec<FragmentNode>) -> Self {
        Self {
            data: NodeData::Element(data),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            data: NodeData::Text(text.into()),
            children: Vec::new(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            data: NodeData::Comment(text.into()),
            children: Vec::new(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match &self.data {
            NodeData::Element(el) => {
                write_open_tag(el, out);
                for child in &self.children {
                    child.write_html(out);
                }
                write_close_tag(el, out);
            }
            leaf => write_leaf(leaf, out),
        }
    }
}

/// A parsed fragment, not yet attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<FragmentNode>,
}

impl Fragment {
    /// Parse HTML text into a fragment.
    pub fn parse(html: &str) -> Self {
        Self {
            nodes: parse_fragment(html),
        }
    }

    pub fn from_nodes(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<FragmentNode> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first top-level element.
    pub fn root_element(&self) -> Option<&ElementData> {
        self.nodes.iter().find_map(|n| n.data.as_element())
    }

    /// Set `name=value` on the root element.
    ///
    /// A fragment without any top-level element (plain text, comments, or
    /// nothing) is first wrapped in a `<div>` so there is a root to carry it.
    pub fn tag_root(&mut self, name: &str, value: &str) {
        if let Some(root) = self.nodes.iter_mut().find_map(|n| n.data.as_element_mut()) {
            root.set_attribute(name, value);
            return;
        }
        let mut wrapper = ElementData::new("div");
        wrapper.set_attribute(name, value);
        let children = std::mem::take(&mut self.nodes);
        self.nodes = vec![FragmentNode::element(wrapper, children)];
    }

    /// Serialize back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}
