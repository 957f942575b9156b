//! The live document: an arena-backed element tree rooted at `<body>`.

use thiserror::Error;

use crate::dom::fragment::{Fragment, FragmentNode};
use crate::dom::node::{ElementData, NodeData, NodeId};
use crate::dom::serialize::{write_close_tag, write_leaf, write_open_tag};

/// Errors from structural document operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomError {
    /// The node id does not refer to a live node.
    #[error("node {0:?} does not exist")]
    Missing(NodeId),

    /// The body is the document root and cannot be replaced.
    #[error("the document body cannot be replaced")]
    ReplaceBody,

    /// The node has no parent to splice into.
    #[error("node {0:?} is detached")]
    Detached(NodeId),
}

/// A node stored in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An element tree with a single `<body>` root.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: `<body></body>`.
    pub fn new() -> Self {
        let body = Node {
            data: NodeData::Element(ElementData::new("body")),
            parent: None,
            children: Vec::new(),
        };
        Self {
            slots: vec![Some(body)],
            free: Vec::new(),
            body: NodeId(0),
        }
    }

    /// A document whose body holds the parsed `html`.
    pub fn from_body_html(html: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        let children: Vec<NodeId> = Fragment::parse(html)
            .into_nodes()
            .into_iter()
            .map(|node| doc.insert_tree(node, body))
            .collect();
        if let Some(node) = doc.slot_mut(body) {
            node.children = children;
        }
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(|n| n.data.as_element())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attribute(name))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Number of live nodes, body included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_body_empty()
    }

    /// True if the body has no children at all.
    pub fn is_body_empty(&self) -> bool {
        self.children(self.body).is_empty()
    }

    /// Descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First element below `root` (document order) matching `pred`.
    pub fn find_descendant<F>(&self, root: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&ElementData) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.element(id).is_some_and(&pred))
    }

    /// First element in the body matching `pred`.
    pub fn find_element<F>(&self, pred: F) -> Option<NodeId>
    where
        F: Fn(&ElementData) -> bool,
    {
        self.find_descendant(self.body, pred)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_element(|el| el.tag.eq_ignore_ascii_case(tag))
    }

    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.find_element(|el| el.attribute(name) == Some(value))
    }

    /// Append a new empty element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        data: ElementData,
    ) -> Result<NodeId, DomError> {
        if self.node(parent).is_none() {
            return Err(DomError::Missing(parent));
        }
        let id = self.alloc(Node {
            data: NodeData::Element(data),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = self.slot_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Replace `target` and its whole subtree with the fragment's nodes.
    ///
    /// Returns the ids of the inserted top-level nodes, in order.
    pub fn replace_with(
        &mut self,
        target: NodeId,
        fragment: Fragment,
    ) -> Result<Vec<NodeId>, DomError> {
        if target == self.body {
            return Err(DomError::ReplaceBody);
        }
        let parent = self
            .node(target)
            .ok_or(DomError::Missing(target))?
            .parent
            .ok_or(DomError::Detached(target))?;
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == target)
            .ok_or(DomError::Detached(target))?;

        let inserted: Vec<NodeId> = fragment
            .into_nodes()
            .into_iter()
            .map(|node| self.insert_tree(node, parent))
            .collect();

        if let Some(node) = self.slot_mut(parent) {
            node.children.splice(index..=index, inserted.iter().copied());
        }
        self.free_subtree(target);
        Ok(inserted)
    }

    /// Inner HTML of the body.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.body) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Element(el) => {
                write_open_tag(el, out);
                for &child in &node.children {
                    self.write_html(child, out);
                }
                write_close_tag(el, out);
            }
            leaf => write_leaf(leaf, out),
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn insert_tree(&mut self, node: FragmentNode, parent: NodeId) -> NodeId {
        let id = self.alloc(Node {
            data: node.data,
            parent: Some(parent),
            children: Vec::new(),
        });
        let children: Vec<NodeId> = node
            .children
            .into_iter()
            .map(|child| self.insert_tree(child, id))
            .collect();
        if let Some(slot) = self.slot_mut(id) {
            slot.children = children;
        }
        id
    }

    fn free_subtree(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.slots.get_mut(id.0).and_then(Option::take) {
                stack.extend(node.children);
                self.free.push(id.0);
            }
        }
    }
}
