//! The tree queries link extraction needs.
//!
//! [`LinkExtractor`](crate::LinkExtractor) works against any tree that can
//! answer these questions; [`Document`] answers them for parsed HTML.

use crate::dom::{Document, NodeData, NodeId};

/// An attribute found while scanning a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOccurrence<'a> {
    /// Attribute name, e.g. `href`.
    pub name: &'a str,
    /// Raw attribute value, before whitespace stripping.
    pub value: &'a str,
    /// Local name of the element carrying the attribute, e.g. `a`.
    pub element: &'a str,
}

/// A navigable, attribute-queryable document tree.
pub trait LinkTree {
    type NodeId: Copy;

    /// Check whether `node` is the document root.
    fn is_document(&self, node: Self::NodeId) -> bool;

    /// The document `node` belongs to. A document owns itself.
    fn owner_document(&self, node: Self::NodeId) -> Self::NodeId;

    /// Every attribute under `root` (inclusive) whose name is in `names`,
    /// in document order, with attributes of one element in source order.
    fn attribute_occurrences<'a>(
        &'a self,
        root: Self::NodeId,
        names: &[&str],
    ) -> Vec<AttributeOccurrence<'a>>;

    /// The value of `attribute` on the first `element` under `scope`
    /// (inclusive), in document order, that carries it.
    fn first_attribute(&self, scope: Self::NodeId, element: &str, attribute: &str)
    -> Option<&str>;
}

impl LinkTree for Document {
    type NodeId = NodeId;

    fn is_document(&self, node: NodeId) -> bool {
        self.get(node)
            .is_some_and(|n| matches!(n.data, NodeData::Document))
    }

    fn owner_document(&self, node: NodeId) -> NodeId {
        if self.is_document(node) {
            node
        } else {
            // An arena holds exactly one document
            self.document()
        }
    }

    fn attribute_occurrences<'a>(
        &'a self,
        root: NodeId,
        names: &[&str],
    ) -> Vec<AttributeOccurrence<'a>> {
        let mut found = Vec::new();
        for id in self.descendants(root) {
            let Some(element) = self.element_name(id).map(|n| &**n) else {
                continue;
            };
            for attr in self.attributes(id) {
                if names.iter().any(|name| attr.is_named(name)) {
                    found.push(AttributeOccurrence {
                        name: &attr.name.local,
                        value: &attr.value,
                        element,
                    });
                }
            }
        }
        found
    }

    fn first_attribute(&self, scope: NodeId, element: &str, attribute: &str) -> Option<&str> {
        self.descendants(scope)
            .filter(|&id| {
                self.element_name(id)
                    .is_some_and(|name| name.as_ref().eq_ignore_ascii_case(element))
            })
            .find_map(|id| self.get_attr(id, attribute))
    }
}
