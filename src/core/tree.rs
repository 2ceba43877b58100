//! Element tree: arena-backed storage for map documents
//!
//! Elements are first assembled into detached [`Node`]s (an element plus the
//! children built alongside it) and then moved into an [`ElementTree`], which
//! assigns every node a document-unique name and records parent/child links.
//! Nodes are addressed with [`NodeId`] handles; parents own their children and
//! a child refers back to its parent by handle only.

use crate::{
    core::{figure::Figure, geo::LatLngBounds, map::Map},
    prelude::HashMap,
    rendering::context::{FigureBuffers, RenderContext},
    traits::Element,
    MapError, Result,
};
use std::path::Path;

/// Handle of a node inside an [`ElementTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element together with the children built alongside it, not yet part of a tree
#[derive(Debug)]
pub struct Node {
    element: Box<dyn Element>,
    key: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new<E: Element>(element: E) -> Self {
        let mut element = element;
        let children = element.take_children();
        Self {
            element: Box::new(element),
            key: None,
            children,
        }
    }

    /// Key the node is stored under once inserted, instead of its generated name
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append a child keyed by its generated name
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child under an explicit key
    pub fn with_keyed_child(self, key: impl Into<String>, child: impl Into<Node>) -> Self {
        self.with_child(child.into().keyed(key))
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn element(&self) -> &dyn Element {
        self.element.as_ref()
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }
}

impl<E: Element> From<E> for Node {
    fn from(element: E) -> Self {
        Node::new(element)
    }
}

struct NodeEntry {
    name: String,
    parent: Option<NodeId>,
    children: Vec<(String, NodeId)>,
    element: Box<dyn Element>,
}

/// A map document: an arena of elements rooted at a single node.
///
/// Names are `"{kind}_{n}"` with `n` counting up from 1 per tree, so they are
/// unique within the document and stable from one build to the next.
pub struct ElementTree {
    nodes: Vec<NodeEntry>,
    by_name: HashMap<String, NodeId>,
    root: NodeId,
    next_id: u64,
}

impl std::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementTree")
            .field("root", &self.name(self.root))
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl ElementTree {
    /// Creates a tree whose root is `root`
    pub fn new(root: impl Into<Node>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            by_name: HashMap::default(),
            root: NodeId(0),
            next_id: 1,
        };
        tree.root = tree.insert(None, None, root.into());
        tree
    }

    /// Creates a document rooted at a [`Figure`]
    pub fn figure() -> Self {
        Self::new(Figure::new())
    }

    /// Creates a document holding `map`, returning the map's handle
    pub fn with_map(map: Map) -> (Self, NodeId) {
        let mut tree = Self::figure();
        let root = tree.root();
        let map_id = tree.add_child(root, map);
        (tree, map_id)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds `child` (and everything built alongside it) under `parent`,
    /// keyed by [`Node::key`] or else by its generated name
    pub fn add_child(&mut self, parent: NodeId, child: impl Into<Node>) -> NodeId {
        self.insert(Some(parent), None, child.into())
    }

    /// Adds `child` under `parent` keyed by `key`.
    ///
    /// A child already stored under the same key is replaced in place and
    /// detached from the tree.
    pub fn add_child_with_key(
        &mut self,
        parent: NodeId,
        child: impl Into<Node>,
        key: impl Into<String>,
    ) -> NodeId {
        self.insert(Some(parent), Some(key.into()), child.into())
    }

    fn insert(&mut self, parent: Option<NodeId>, key: Option<String>, node: Node) -> NodeId {
        let Node {
            element,
            key: node_key,
            children,
        } = node;

        let id = NodeId(self.nodes.len());
        let name = format!("{}_{}", element.kind(), self.next_id);
        self.next_id += 1;

        self.by_name.insert(name.clone(), id);
        self.nodes.push(NodeEntry {
            name: name.clone(),
            parent,
            children: Vec::new(),
            element,
        });

        if let Some(parent) = parent {
            let key = key.or(node_key).unwrap_or(name);
            let existing = self.nodes[parent.0]
                .children
                .iter()
                .position(|(existing, _)| *existing == key);
            match existing {
                Some(index) => {
                    let replaced =
                        std::mem::replace(&mut self.nodes[parent.0].children[index].1, id);
                    self.nodes[replaced.0].parent = None;

                    #[cfg(feature = "debug")]
                    log::debug!("Replaced child {} of {}", key, self.nodes[parent.0].name);
                }
                None => self.nodes[parent.0].children.push((key, id)),
            }
        }

        for child in children {
            self.insert(Some(id), None, child);
        }

        id
    }

    /// Document-unique name of a node, used as its script identifier
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node with their keys, in insertion order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .map(|(key, child)| (key.as_str(), *child))
    }

    /// The child stored under `key`
    pub fn child(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.children(id)
            .find(|(child_key, _)| *child_key == key)
            .map(|(_, child)| child)
    }

    pub fn element(&self, id: NodeId) -> &dyn Element {
        self.nodes[id.0].element.as_ref()
    }

    /// Typed access to an element
    pub fn get<T: Element>(&self, id: NodeId) -> Option<&T> {
        self.element(id).as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to an element, e.g. to flip layer flags after insertion
    pub fn get_mut<T: Element>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes[id.0].element.as_any_mut().downcast_mut::<T>()
    }

    /// Looks a node up by its generated name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Topmost ancestor of a node (the node itself once detached)
    pub fn get_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Bounds of a node and all its descendants, `None` if none of them has any
    pub fn get_bounds(&self, id: NodeId) -> Option<LatLngBounds> {
        self.children(id)
            .filter_map(|(_, child)| self.get_bounds(child))
            .fold(self.element(id).bounds(), |acc, bounds| match acc {
                Some(acc) => Some(acc.union(&bounds)),
                None => Some(bounds),
            })
    }

    /// Renders the whole document
    pub fn render(&self) -> Result<String> {
        self.render_node(self.root)
    }

    /// Renders the subtree at `id`, returning its markup.
    ///
    /// Script fragments land in a scratch buffer that is dropped afterwards;
    /// use [`ElementTree::render_buffers`] to inspect them.
    pub fn render_node(&self, id: NodeId) -> Result<String> {
        let mut buffers = FigureBuffers::default();
        self.render_with(id, &mut buffers)
    }

    /// Renders the document and returns the header, body and script buffers
    pub fn render_buffers(&self) -> Result<FigureBuffers> {
        let mut buffers = FigureBuffers::default();
        self.render_with(self.root, &mut buffers)?;
        Ok(buffers)
    }

    fn render_with(&self, id: NodeId, buffers: &mut FigureBuffers) -> Result<String> {
        let in_document = self.element(self.get_root(id)).is_document();
        let mut ctx = RenderContext::new(self, id, in_document.then_some(buffers));
        self.element(id).render(&mut ctx)
    }

    /// Renders the document and writes it to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !self.element(self.root).is_document() {
            return Err(MapError::NotInDocument(self.name(self.root).to_string()));
        }

        let html = self.render()?;
        std::fs::write(path, html)?;

        #[cfg(feature = "debug")]
        log::info!("Saved {} to {}", self.name(self.root), path.display());

        Ok(())
    }

    /// Number of nodes ever inserted, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::element::{Container, Html},
        layers::{feature_group::FeatureGroup, marker::Marker},
    };

    #[test]
    fn test_generated_names_are_unique() {
        let mut tree = ElementTree::figure();
        let root = tree.root();
        let group = tree.add_child(root, FeatureGroup::new());
        let first = tree.add_child(group, Marker::new((1.0, 2.0)).unwrap());
        let second = tree.add_child(group, Marker::new((3.0, 4.0)).unwrap());

        assert_eq!(tree.name(root), "figure_1");
        assert_eq!(tree.name(group), "feature_group_2");
        assert_eq!(tree.name(first), "marker_3");
        assert_eq!(tree.name(second), "marker_4");
        assert_eq!(tree.find("marker_4"), Some(second));
        assert_eq!(tree.parent(first), Some(group));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = ElementTree::new(Container::new());
        let root = tree.root();
        let ids: Vec<_> = (0..3)
            .map(|i| tree.add_child(root, Html::new(format!("item {i}"))))
            .collect();

        let children: Vec<_> = tree.children(root).map(|(_, id)| id).collect();
        assert_eq!(children, ids);
    }

    #[test]
    fn test_keyed_child_is_replaced_in_place() {
        let mut tree = ElementTree::new(Container::new());
        let root = tree.root();
        tree.add_child_with_key(root, Html::new("a"), "first");
        let old = tree.add_child_with_key(root, Html::new("b"), "second");
        tree.add_child_with_key(root, Html::new("c"), "third");
        let new = tree.add_child_with_key(root, Html::new("d"), "second");

        let keys: Vec<_> = tree.children(root).map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, ["first", "second", "third"]);
        assert_eq!(tree.child(root, "second"), Some(new));
        assert_eq!(tree.parent(old), None);
        assert_eq!(tree.get_root(old), old);
    }

    #[test]
    fn test_nested_nodes_are_inserted_depth_first() {
        let node = Node::from(FeatureGroup::new())
            .with_child(Marker::new((1.0, 1.0)).unwrap())
            .with_keyed_child("note", Html::new("hello"));

        let mut tree = ElementTree::figure();
        let root = tree.root();
        let group = tree.add_child(root, node);

        let children: Vec<_> = tree.children(group).map(|(key, _)| key.to_string()).collect();
        assert_eq!(children, ["marker_3", "note"]);
    }

    #[test]
    fn test_get_bounds_unions_descendants() {
        let mut tree = ElementTree::figure();
        let root = tree.root();
        let group = tree.add_child(root, FeatureGroup::new());
        tree.add_child(group, Marker::new((45.5, -122.3)).unwrap());
        tree.add_child(group, Marker::new((47.6, -122.1)).unwrap());
        let empty = tree.add_child(root, FeatureGroup::new());

        let bounds = tree.get_bounds(root).unwrap();
        assert_eq!(bounds.to_array(), [[45.5, -122.3], [47.6, -122.1]]);
        assert!(tree.get_bounds(empty).is_none());
    }

    #[test]
    fn test_typed_access() {
        let mut tree = ElementTree::figure();
        let root = tree.root();
        let group = tree.add_child(root, FeatureGroup::new());

        assert!(tree.get::<FeatureGroup>(group).is_some());
        assert!(tree.get::<Marker>(group).is_none());

        tree.get_mut::<FeatureGroup>(group)
            .unwrap()
            .properties_mut()
            .set_overlay(false);
        assert!(!tree.get::<FeatureGroup>(group).unwrap().properties().overlay());
    }
}
