use crate::{
    core::tree::{ElementTree, NodeId},
    prelude::HashMap,
    MapError, Result,
};

/// Ordered, name-keyed collection of document fragments.
///
/// Adding a fragment under a name that is already present replaces it while
/// keeping its original position, so re-rendering an element updates its
/// fragment instead of duplicating it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OutputBuffer {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends (or replaces) the fragment stored under `name`
    pub fn add(&mut self, name: impl Into<String>, fragment: impl Into<String>) {
        let name = name.into();
        let fragment = fragment.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = fragment,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, fragment));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fragment names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, fragment)| (name.as_str(), fragment.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All fragments joined by newlines
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(_, fragment)| fragment.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The three collection points of a document: header, body markup and script
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FigureBuffers {
    pub header: OutputBuffer,
    pub html: OutputBuffer,
    pub script: OutputBuffer,
}

/// State handed to [`Element::render`](crate::Element::render).
///
/// Gives the element being rendered its own name, access to the rest of the
/// tree (parent, siblings, children) and, when the tree is rooted at a
/// document, the document buffers.
pub struct RenderContext<'a> {
    tree: &'a ElementTree,
    node: NodeId,
    buffers: Option<&'a mut FigureBuffers>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        tree: &'a ElementTree,
        node: NodeId,
        buffers: Option<&'a mut FigureBuffers>,
    ) -> Self {
        Self {
            tree,
            node,
            buffers,
        }
    }

    pub fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    /// The node being rendered
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Script identifier of the node being rendered
    pub fn name(&self) -> &'a str {
        self.tree.name(self.node)
    }

    pub fn parent(&self) -> Result<NodeId> {
        self.tree
            .parent(self.node)
            .ok_or_else(|| MapError::MissingParent(self.name().to_string()))
    }

    /// Script identifier of the parent, the object most elements attach to
    pub fn parent_name(&self) -> Result<&'a str> {
        Ok(self.tree.name(self.parent()?))
    }

    /// Whether the tree is rooted at a document exposing the output buffers
    pub fn in_document(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn buffers(&mut self) -> Result<&mut FigureBuffers> {
        let name = self.name();
        self.buffers
            .as_deref_mut()
            .ok_or_else(|| MapError::NotInDocument(name.to_string()))
    }

    pub fn header(&mut self) -> Result<&mut OutputBuffer> {
        Ok(&mut self.buffers()?.header)
    }

    pub fn html(&mut self) -> Result<&mut OutputBuffer> {
        Ok(&mut self.buffers()?.html)
    }

    pub fn script(&mut self) -> Result<&mut OutputBuffer> {
        Ok(&mut self.buffers()?.script)
    }

    /// Renders another node of the tree, sharing this context's buffers
    pub fn render_node(&mut self, id: NodeId) -> Result<String> {
        let element = self.tree.element(id);
        let mut ctx = RenderContext {
            tree: self.tree,
            node: id,
            buffers: self.buffers.as_deref_mut(),
        };
        element.render(&mut ctx)
    }

    /// Renders every child in insertion order and concatenates their markup
    pub fn render_children(&mut self) -> Result<String> {
        let tree = self.tree;
        let mut markup = String::new();
        for (_, child) in tree.children(self.node) {
            markup.push_str(&self.render_node(child)?);
        }
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_buffer_replaces_in_place() {
        let mut buffer = OutputBuffer::new();
        buffer.add("a", "first");
        buffer.add("b", "second");
        buffer.add("a", "updated");

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(buffer.get("a"), Some("updated"));
        assert_eq!(buffer.render(), "updated\nsecond");
    }

    #[test]
    fn test_output_buffer_with_many_fragments() {
        let mut buffer = OutputBuffer::new();
        for n in 0..5000 {
            buffer.add(format!("marker_{n}"), format!("m{n}"));
        }
        buffer.add("marker_2500", "moved");

        assert_eq!(buffer.len(), 5000);
        assert_eq!(buffer.get("marker_2500"), Some("moved"));
        assert_eq!(buffer.get("marker_4999"), Some("m4999"));
        assert_eq!(buffer.names().nth(2500), Some("marker_2500"));
        assert!(!buffer.contains("marker_5000"));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = OutputBuffer::default();
        assert!(buffer.is_empty());
        assert!(!buffer.contains("anything"));
        assert_eq!(buffer.render(), "");
    }
}
