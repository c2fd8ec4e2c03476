//! Visual node capabilities
//!
//! The engine never talks to a renderer directly. Anything that can expose
//! these two traits can be restyled, including the in-memory [`NodeTree`]
//! used in tests.
//!
//! [`NodeTree`]: crate::tree::NodeTree

use slotmap::new_key_type;
use tinct_core::Rgb;
use tinct_theme::StyleProperty;

new_key_type! {
    /// Identifier of a node in a visual tree
    pub struct NodeId;
}

/// A single rendered node
pub trait VisualNode {
    /// The node's static class tokens.
    ///
    /// `None` means the node cannot be introspected (text nodes, foreign
    /// content) and the override pass must leave it alone.
    fn class_tokens(&self) -> Option<&[String]>;

    /// Current inline value of a color property
    fn inline_style(&self, property: StyleProperty) -> Option<Rgb>;

    /// Set an inline color, overriding the compiled static value
    fn set_inline_style(&mut self, property: StyleProperty, color: Rgb);

    /// Remove an inline color so the compiled static value applies again
    fn clear_inline_style(&mut self, property: StyleProperty);
}

/// A child was inserted under `parent`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    pub parent: NodeId,
    pub node: NodeId,
}

/// A tree of visual nodes with an observable content region
pub trait VisualTree {
    type Node: VisualNode;

    /// Root of the region the engine restyles and observes
    fn content_root(&self) -> Option<NodeId>;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    fn children(&self, id: NodeId) -> &[NodeId];

    fn node(&self, id: NodeId) -> Option<&Self::Node>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Self::Node>;

    /// Take every insertion recorded since the previous call
    fn take_mutations(&mut self) -> Vec<MutationRecord>;

    fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Whether `id` is `ancestor` or lies beneath it
    fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Pre-order list of `root` and every node beneath it
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.contains(id) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }
}
