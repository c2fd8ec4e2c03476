//! Visual tree restyling
//!
//! Static class tokens are compiled once and never read the property
//! registry, so a theme change has to be pushed onto the rendered nodes
//! directly. This crate does that against an abstract tree:
//!
//! - [`VisualNode`] / [`VisualTree`] - the capabilities the engine needs from
//!   a renderer: read a node's token list, write its inline colors, walk
//!   children, and collect insertion records
//! - [`NodeTree`] - an arena-backed implementation used by headless hosts and
//!   tests
//! - [`override_tree`] - the full restyling pass
//! - [`MutationWatcher`] - decides which insertions need a follow-up pass
//!
//! # Example
//!
//! ```rust
//! use tinct_theme::{PropertyPublisher, StyleProperty, ThemePreset, Weight};
//! use tinct_tree::{override_tree, Element, NodeTree, OverrideOptions, VisualNode, VisualTree};
//!
//! let mut tree = NodeTree::new(Element::new("main"));
//! let root = tree.root();
//! let button = tree
//!     .append(root, Element::new("button").with_class("background-primary-600 px-4"))
//!     .unwrap();
//!
//! let publication = PropertyPublisher::default().publish(&ThemePreset::Ocean.descriptor(), None);
//! let report = override_tree(&mut tree, &publication.palette, &OverrideOptions::default());
//! assert_eq!(report.styled, 1);
//!
//! let expected = publication.palette.primary.unwrap().get(Weight::W600);
//! let node = tree.node(button).unwrap();
//! assert_eq!(node.inline_style(StyleProperty::Background), Some(expected));
//! ```

pub mod node;
pub mod overrider;
pub mod tree;
pub mod watcher;

pub use node::{MutationRecord, NodeId, VisualNode, VisualTree};
pub use overrider::{override_subtree, override_tree, OverrideOptions, PassReport};
pub use tree::{Element, NodeSpec, NodeTree};
pub use watcher::{MutationWatcher, PassKind, WatchOutcome};
