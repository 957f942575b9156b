//! Composition outline and insertion-point search.

use crate::dom::{Document, NodeId};
use crate::routing::{layout_fragment_path, parent_dir};

/// A composed node and the composed nodes nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub path: String,
    pub node: NodeId,
    pub children: Vec<OutlineNode>,
}

/// Composed nodes of a document as a typed tree, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub roots: Vec<OutlineNode>,
    /// First placeholder element in document order.
    pub placeholder: Option<NodeId>,
    pub body_empty: bool,
}

impl Outline {
    /// Extract the outline of `doc`.
    pub fn from_document(doc: &Document, path_attribute: &str, placeholder_tag: &str) -> Self {
        let mut outline = Outline {
            body_empty: doc.is_body_empty(),
            ..Default::default()
        };
        let mut roots = Vec::new();
        collect(
            doc,
            doc.body(),
            path_attribute,
            placeholder_tag,
            &mut roots,
            &mut outline.placeholder,
        );
        outline.roots = roots;
        outline
    }

    /// Composed nodes in document order with their nesting depth.
    pub fn walk(&self) -> Vec<(&OutlineNode, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&OutlineNode, usize)> =
            self.roots.iter().rev().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            out.push((node, depth));
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
        out
    }

    /// The composed node claiming `path`.
    pub fn find(&self, path: &str) -> Option<&OutlineNode> {
        self.walk().into_iter().map(|(n, _)| n).find(|n| n.path == path)
    }

    /// First composed node nested inside another composed node.
    pub fn first_nested(&self) -> Option<&OutlineNode> {
        self.walk().into_iter().find(|(_, depth)| *depth > 0).map(|(n, _)| n)
    }
}

fn collect(
    doc: &Document,
    parent: NodeId,
    path_attribute: &str,
    placeholder_tag: &str,
    out: &mut Vec<OutlineNode>,
    placeholder: &mut Option<NodeId>,
) {
    for &id in doc.children(parent) {
        let Some(el) = doc.element(id) else {
            continue;
        };
        if placeholder.is_none() && el.tag.eq_ignore_ascii_case(placeholder_tag) {
            *placeholder = Some(id);
        }
        match el.attribute(path_attribute) {
            Some(path) => {
                let mut node = OutlineNode {
                    path: path.to_string(),
                    node: id,
                    children: Vec::new(),
                };
                collect(doc, id, path_attribute, placeholder_tag, &mut node.children, placeholder);
                out.push(node);
            }
            None => collect(doc, id, path_attribute, placeholder_tag, out, placeholder),
        }
    }
}

/// Where a fragment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// An existing placeholder element.
    Placeholder(NodeId),
    /// The nested composed node of the nearest ancestor layout.
    Relative(NodeId),
    /// The node already claiming this path (forced re-render).
    SamePath(NodeId),
    /// Any composed node nested in another composed node.
    Nested(NodeId),
    /// Empty body: a placeholder must be created first.
    Bootstrap,
}

impl InsertionPoint {
    /// The node to replace, if it already exists.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            InsertionPoint::Placeholder(id)
            | InsertionPoint::Relative(id)
            | InsertionPoint::SamePath(id)
            | InsertionPoint::Nested(id) => Some(id),
            InsertionPoint::Bootstrap => None,
        }
    }
}

/// Find the insertion point for `path`, in priority order:
///
/// 1. a placeholder anywhere;
/// 2. walking up from the fragment's own directory, the first ancestor
///    layout (`dir/+layout.html`, never `path` itself) that has a nested
///    composed node: that nested node;
/// 3. the node already claiming `path`;
/// 4. any composed node nested in another;
/// 5. an empty body.
///
/// `None` means the document is populated but offers no insertion point.
pub fn locate(outline: &Outline, path: &str) -> Option<InsertionPoint> {
    if let Some(id) = outline.placeholder {
        return Some(InsertionPoint::Placeholder(id));
    }

    let mut dir = parent_dir(path);
    while let Some(current) = dir {
        let layout = layout_fragment_path(current);
        if layout != path {
            if let Some(nested) = outline.find(&layout).and_then(|n| n.children.first()) {
                return Some(InsertionPoint::Relative(nested.node));
            }
        }
        dir = parent_dir(current);
    }

    if let Some(node) = outline.find(path) {
        return Some(InsertionPoint::SamePath(node.node));
    }

    if let Some(node) = outline.first_nested() {
        return Some(InsertionPoint::Nested(node.node));
    }

    if outline.body_empty {
        return Some(InsertionPoint::Bootstrap);
    }

    None
}
