//! In-memory visual tree
//!
//! `NodeTree` is an arena of [`Element`]s keyed by [`NodeId`]. Every append
//! is recorded as a [`MutationRecord`] until the host drains it through
//! [`VisualTree::take_mutations`], mirroring how a renderer queues insertion
//! notifications for later delivery.

use crate::node::{MutationRecord, NodeId, VisualNode, VisualTree};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use smallvec::SmallVec;
use tinct_core::Rgb;
use tinct_theme::StyleProperty;

/// A rendered element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// `None` for nodes without a token list (text, foreign content)
    tokens: Option<Vec<String>>,
    inline: SmallVec<[(StyleProperty, Rgb); 3]>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            tokens: Some(Vec::new()),
            inline: SmallVec::new(),
        }
    }

    /// A node that exposes no token list
    pub fn opaque(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            tokens: None,
            inline: SmallVec::new(),
        }
    }

    /// Append whitespace-separated class tokens
    pub fn with_class(mut self, class: &str) -> Self {
        let tokens = self.tokens.get_or_insert_with(Vec::new);
        tokens.extend(class.split_whitespace().map(str::to_string));
        self
    }

    /// Pre-set an inline color, as host code might before the engine runs
    pub fn with_inline(mut self, property: StyleProperty, color: Rgb) -> Self {
        self.set_inline_style(property, color);
        self
    }

    /// Every inline color currently set, in property order
    pub fn inline_styles(&self) -> Vec<(StyleProperty, Rgb)> {
        let mut styles = self.inline.to_vec();
        styles.sort_by_key(|(property, _)| *property);
        styles
    }
}

impl VisualNode for Element {
    fn class_tokens(&self) -> Option<&[String]> {
        self.tokens.as_deref()
    }

    fn inline_style(&self, property: StyleProperty) -> Option<Rgb> {
        self.inline
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, color)| *color)
    }

    fn set_inline_style(&mut self, property: StyleProperty, color: Rgb) {
        match self.inline.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = color,
            None => self.inline.push((property, color)),
        }
    }

    fn clear_inline_style(&mut self, property: StyleProperty) {
        self.inline.retain(|(p, _)| *p != property);
    }
}

/// Declarative description of a subtree, used by scenario files
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Whitespace-separated class tokens
    #[serde(default)]
    pub class: String,
    /// Stable name used to refer to the node later
    #[serde(default)]
    pub id: Option<String>,
    /// Node exposes no token list
    #[serde(default)]
    pub opaque: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl NodeSpec {
    pub fn to_element(&self) -> Element {
        if self.opaque {
            Element::opaque(self.tag.clone())
        } else {
            Element::new(self.tag.clone()).with_class(&self.class)
        }
    }
}

struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed visual tree
pub struct NodeTree {
    nodes: SlotMap<NodeId, Slot>,
    root: NodeId,
    /// `None` once the content subtree has been removed
    content_root: Option<NodeId>,
    mutations: Vec<MutationRecord>,
}

impl NodeTree {
    /// Create a tree whose root is also the content root
    pub fn new(root: Element) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Slot {
            element: root,
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            root,
            content_root: Some(root),
            mutations: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Narrow the restyled/observed region to the subtree at `id`
    pub fn set_content_root(&mut self, id: NodeId) -> bool {
        if self.nodes.contains_key(id) {
            self.content_root = Some(id);
            true
        } else {
            false
        }
    }

    /// Insert `element` as the last child of `parent` and record the insertion
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        let id = self.attach(parent, element)?;
        self.mutations.push(MutationRecord { parent, node: id });
        Some(id)
    }

    /// Insert a whole subtree, recording only the top-level insertion
    pub fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) -> Option<NodeId> {
        let id = self.attach(parent, spec.to_element())?;
        for child in &spec.children {
            self.attach_spec(id, child);
        }
        self.mutations.push(MutationRecord { parent, node: id });
        Some(id)
    }

    fn attach_spec(&mut self, parent: NodeId, spec: &NodeSpec) {
        if let Some(id) = self.attach(parent, spec.to_element()) {
            for child in &spec.children {
                self.attach_spec(id, child);
            }
        }
    }

    fn attach(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(Slot {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        Some(id)
    }

    /// Remove `id` and its subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.nodes[id].parent {
            if let Some(slot) = self.nodes.get_mut(parent) {
                slot.children.retain(|child| *child != id);
            }
        }
        for node in self.descendants(id) {
            self.nodes.remove(node);
        }
        if self
            .content_root
            .is_some_and(|root| !self.nodes.contains_key(root))
        {
            self.content_root = None;
        }
        true
    }

    /// Mutable access to an element for host-side edits
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id).map(|slot| &mut slot.element)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insertions not yet drained
    pub fn pending_mutations(&self) -> usize {
        self.mutations.len()
    }
}

impl VisualTree for NodeTree {
    type Node = Element;

    fn content_root(&self) -> Option<NodeId> {
        self.content_root
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|slot| slot.parent)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    fn node(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id).map(|slot| &slot.element)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.element_mut(id)
    }

    fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }
}
