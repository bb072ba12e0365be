/*!
Represents an [SVG](https://www.w3.org/TR/SVG11/Overview.html) document as a mutable tree.

`rwsvgtree` uses [`roxmltree`](https://github.com/RazrFalcon/roxmltree) for parsing
and [`xmlwriter`](https://github.com/RazrFalcon/xmlwriter) for writing.
Unlike `rosvgtree`, it doesn't post-process the document: elements, attributes
and namespaces are kept as they are, so a document can be edited in place
and written back.

Only element, text and comment nodes are preserved.
Whitespace-only text is dropped unless it's located inside a text content element.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

use std::collections::HashMap;
use std::num::NonZeroU32;

mod error;
mod names;
mod parse;
mod write;

pub use error::Error;
pub use names::{AId, EId};
pub use parse::decompress_svgz;
pub use roxmltree;
pub use write::{Indent, WriteOptions};

/// An SVG tree container.
pub struct Document {
    nodes: Vec<NodeData>,
    links: HashMap<String, NodeId>,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node {
        self.node(NodeId::new(0))
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> Node {
        // `unwrap` is safe, because `Document` is guarantee to have an `svg` root element.
        self.root().first_element_child().unwrap()
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    #[inline]
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    /// Returns an element by ID.
    ///
    /// Unlike the [`Descendants`] iterator, this is just a HashMap lookup.
    /// IDs are collected during parsing, so editing an `id` attribute
    /// will not be reflected here.
    #[inline]
    pub fn element_by_id(&self, id: &str) -> Option<Node> {
        let node_id = self.links.get(id)?;
        Some(self.node(*node_id))
    }

    /// Returns a node by its ID.
    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        Node {
            id,
            d: &self.nodes[id.get_usize()],
            doc: self,
        }
    }

    /// Returns a mutable node by its ID.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> NodeMut {
        NodeMut {
            d: &mut self.nodes[id.get_usize()],
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_children(
            parent: Node,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in parent.children() {
                if child.is_element() {
                    writeln_indented!(depth, f, "Element {{");
                    writeln_indented!(depth, f, "    tag_name: {:?}", child.tag_name_str());

                    if !child.attributes().is_empty() {
                        writeln_indented!(depth + 1, f, "attributes: [");
                        for attr in child.attributes() {
                            writeln_indented!(depth + 2, f, "{:?}", attr);
                        }
                        writeln_indented!(depth + 1, f, "]");
                    }

                    if child.has_children() {
                        writeln_indented!(depth, f, "    children: [");
                        print_children(child, depth + 2, f)?;
                        writeln_indented!(depth, f, "    ]");
                    }

                    writeln_indented!(depth, f, "}}");
                } else {
                    writeln_indented!(depth, f, "{:?}", child);
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}

/// A node ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    #[inline]
    fn new(id: u32) -> Self {
        debug_assert!(id < core::u32::MAX);

        // We are using `NonZeroU32` to reduce overhead of `Option<NodeId>`.
        NodeId(NonZeroU32::new(id + 1).unwrap())
    }

    #[inline]
    fn get(self) -> u32 {
        self.0.get() - 1
    }

    #[inline]
    fn get_usize(self) -> usize {
        self.get() as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        // We already checked that `id` is limited by u32::MAX.
        debug_assert!(id <= core::u32::MAX as usize);
        NodeId::new(id as u32)
    }
}

/// A qualified XML name.
#[derive(Clone, PartialEq, Debug)]
pub struct QName {
    /// Namespace prefix, as it was written in the original document.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Local name.
    pub local: String,
}

impl QName {
    /// Creates a name without a namespace.
    pub fn new(local: &str) -> Self {
        QName {
            prefix: None,
            namespace: None,
            local: local.to_string(),
        }
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.prefix {
            Some(ref prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// An attribute.
#[derive(Clone)]
pub struct Attribute {
    /// Attribute's name.
    pub name: QName,
    /// Attribute's value.
    pub value: String,
}

impl Attribute {
    /// Checks that this is an SVG attribute with the specified name.
    ///
    /// SVG attributes never have a namespace.
    #[inline]
    pub fn is(&self, aid: AId) -> bool {
        self.name.namespace.is_none() && self.name.prefix.is_none() && self.name.local == aid.to_str()
    }
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {:?}, value: {} }}",
            self.name.to_string(),
            self.value
        )
    }
}

/// A namespace declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Namespace {
    /// Namespace prefix. `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub uri: String,
}

pub(crate) enum NodeKind {
    Root,
    Element {
        name: QName,
        tag_name: Option<EId>,
        attributes: Vec<Attribute>,
        namespaces: Vec<Namespace>,
    },
    Text(String),
    Comment(String),
}

struct NodeData {
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

/// An SVG node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc)
    }
}

impl<'a> Node<'a> {
    /// Returns node's ID.
    ///
    /// Can be used to get a mutable node via [`Document::node_mut`].
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element { .. })
    }

    /// Checks if the current node is a text.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.d.kind, NodeKind::Text(_))
    }

    /// Returns element's tag name, unless the current node is text
    /// or an element is not a known SVG element.
    #[inline]
    pub fn tag_name(&self) -> Option<EId> {
        match self.d.kind {
            NodeKind::Element { tag_name, .. } => tag_name,
            _ => None,
        }
    }

    /// Returns element's qualified name.
    #[inline]
    pub fn name(&self) -> Option<&'a QName> {
        match self.d.kind {
            NodeKind::Element { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns element's local name.
    ///
    /// Returns an empty string for non-element nodes.
    #[inline]
    pub fn tag_name_str(&self) -> &'a str {
        self.name().map(|n| n.local.as_str()).unwrap_or("")
    }

    /// Returns element's `id` attribute value.
    ///
    /// Returns an empty string otherwise.
    #[inline]
    pub fn element_id(&self) -> &'a str {
        self.attribute(AId::Id).unwrap_or("")
    }

    /// Returns an attribute value.
    #[inline]
    pub fn attribute(&self, aid: AId) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.is(aid))
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, aid: AId) -> bool {
        self.attributes().iter().any(|a| a.is(aid))
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns namespaces declared on this element.
    #[inline]
    pub fn namespaces(&self) -> &'a [Namespace] {
        match self.d.kind {
            NodeKind::Element { ref namespaces, .. } => namespaces,
            _ => &[],
        }
    }

    /// Returns node's text data.
    ///
    /// For text and comment nodes returns its content.
    /// For elements returns the first child node text.
    #[inline]
    pub fn text(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Element { .. } => match self.first_child() {
                Some(child) if child.is_text() => child.text(),
                _ => "",
            },
            NodeKind::Text(ref text) | NodeKind::Comment(ref text) => text,
            NodeKind::Root => "",
        }
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.node(id))
    }

    /// Returns the parent element.
    #[inline]
    pub fn parent_element(&self) -> Option<Self> {
        self.ancestors().skip(1).find(|n| n.is_element())
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.doc.node(id))
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.doc.node(id))
    }

    /// Returns the first child element.
    #[inline]
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.doc.node(id))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    #[inline]
    fn traverse(&self) -> Traverse<'a> {
        Traverse {
            root: *self,
            edge: None,
        }
    }

    /// Returns an iterator over this node and its descendants.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element { ref name, .. } => {
                write!(
                    f,
                    "Element {{ tag_name: {:?}, attributes: {:?} }}",
                    name.to_string(),
                    self.attributes()
                )
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
            NodeKind::Comment(ref text) => write!(f, "Comment({:?})", text),
        }
    }
}

/// A mutable SVG node.
///
/// Allows editing element's attributes. The tree structure itself is immutable.
pub struct NodeMut<'a> {
    d: &'a mut NodeData,
}

impl NodeMut<'_> {
    fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match self.d.kind {
            NodeKind::Element {
                ref mut attributes, ..
            } => Some(attributes),
            _ => None,
        }
    }

    /// Sets an attribute value.
    ///
    /// Replaces the value in place when the attribute is already present,
    /// so the attributes order is preserved.
    /// Does nothing for non-element nodes.
    pub fn set_attribute(&mut self, aid: AId, value: impl Into<String>) {
        let value = value.into();
        if let Some(attrs) = self.attributes_mut() {
            match attrs.iter_mut().find(|a| a.is(aid)) {
                Some(attr) => attr.value = value,
                None => attrs.push(Attribute {
                    name: QName::new(aid.to_str()),
                    value,
                }),
            }
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, aid: AId) -> Option<String> {
        let attrs = self.attributes_mut()?;
        let idx = attrs.iter().position(|a| a.is(aid))?;
        Some(attrs.remove(idx).value)
    }

    /// Retains only the attributes specified by the predicate.
    pub fn retain_attributes<F: FnMut(&Attribute) -> bool>(&mut self, f: F) {
        if let Some(attrs) = self.attributes_mut() {
            attrs.retain(f);
        }
    }
}

impl std::fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Element { ref name, .. } => write!(f, "NodeMut({})", name),
            _ => write!(f, "NodeMut"),
        }
    }
}

/// An iterator over ancestor nodes.
#[derive(Clone, Debug)]
pub struct Ancestors<'a>(Option<Node<'a>>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        self.0 = node.as_ref().and_then(Node::parent);
        node
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front.take();
        if self.front == self.back {
            self.back = None;
        } else {
            self.front = node.as_ref().and_then(Node::next_sibling);
        }
        node
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Edge<'a> {
    Open(Node<'a>),
    Close(Node<'a>),
}

#[derive(Clone, Debug)]
struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}

/// A descendants iterator.
#[derive(Clone, Debug)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}
