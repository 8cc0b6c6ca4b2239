//! Document tree for the Wisp renderer.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. Each child id appears in exactly one parent's child list,
//! so ownership is a strict tree; the parent link is a plain index used only
//! for upward look-up.
//!
//! The tree builder allocates the `html` element first, so the root is
//! always [`NodeId::ROOT`].

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The `html` root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A single arena entry.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub node_type: NodeType,

    /// Enclosing element, `None` only for the root.
    pub parent: Option<NodeId>,

    /// Child nodes in document order. Always empty for text nodes.
    pub children: Vec<NodeId>,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A run of text; never has children.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Attributes with lower-cased keys.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Look up an attribute value by (lower-cased) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// Arena-based document tree.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]:
/// - O(1) access to any node
/// - O(1) parent traversal
/// - no reference cycles between parent and child
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty arena. The first allocated node becomes the root.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the arena.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if nothing has been allocated yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    ///
    /// The node records `parent` for look-up but is not yet in any child
    /// list; the builder attaches it with [`DomTree::append_child`] once it
    /// is finished.
    ///
    /// # Invariants
    ///
    /// Builder-only. Once the parser hands a tree back it is not mutated
    /// again; every node but the root then sits in exactly one child list.
    pub fn alloc(&mut self, node_type: NodeType, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Invariants
    ///
    /// Builder-only, and called at most once per child: `child` is not
    /// detached from any earlier parent's child list.
    ///
    /// # Panics
    ///
    /// Panics if either id was not allocated in this tree, which is a
    /// builder bug rather than a property of the input.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    /// Concatenated text of all text nodes under `id`, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.as_text(n))
            .collect()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
