//! Class token overrides
//!
//! Walks the content region and rewrites each node's inline colors so they
//! match the active palette. The static tokens compiled into the interface
//! never read the registry; this pass is what makes them follow the theme.
//!
//! Rules, per node:
//! - `primary` tokens are always resolved against the primary ramp.
//! - `neutral-surface` tokens are resolved against the background ramp
//!   (background/border roles) or the text ramp (text role) for custom
//!   themes. For dark and light themes they are left to the built-in styling
//!   and any inline value for their property is cleared.
//! - A node with a primary background keeps a readable foreground: its
//!   neutral-surface text tokens resolve to the configured foreground instead
//!   of the text ramp.
//! - When a primary and a neutral-surface token govern the same property,
//!   the primary token wins.
//!
//! The pass never fails. Nodes without a token list are skipped and
//! off-grammar tokens are ignored.

use crate::node::{NodeId, VisualNode, VisualTree};
use smallvec::SmallVec;
use tinct_core::Rgb;
use tinct_theme::{ClassToken, ColorFamily, ResolvedPalette, StyleProperty, ThemeError};

/// Tunables for the override pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideOptions {
    /// Foreground kept on primary-background nodes
    pub readable_foreground: Rgb,
}

impl Default for OverrideOptions {
    fn default() -> Self {
        Self {
            readable_foreground: Rgb::WHITE,
        }
    }
}

/// Summary of one pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Nodes reached from the pass root
    pub visited: usize,
    /// Nodes that received at least one inline color
    pub styled: usize,
    /// Inline colors written
    pub writes: usize,
    /// Inline colors removed
    pub cleared: usize,
    /// Nodes without a token list
    pub skipped: Vec<NodeId>,
}

impl PassReport {
    /// Skipped nodes expressed in the error taxonomy
    pub fn issues(&self) -> Vec<ThemeError> {
        self.skipped
            .iter()
            .map(|id| ThemeError::OverridePassSkipped {
                node: format!("{id:?}"),
            })
            .collect()
    }

    fn absorb(&mut self, other: PassReport) {
        self.visited += other.visited;
        self.styled += other.styled;
        self.writes += other.writes;
        self.cleared += other.cleared;
        self.skipped.extend(other.skipped);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StyleAction {
    Set(Rgb),
    Clear,
}

/// Planned action per style property, indexed Background/Text/Border
type StylePlan = [Option<StyleAction>; 3];

fn property_index(property: StyleProperty) -> usize {
    match property {
        StyleProperty::Background => 0,
        StyleProperty::Text => 1,
        StyleProperty::Border => 2,
    }
}

fn plan_node(
    tokens: &[ClassToken],
    palette: &ResolvedPalette,
    options: &OverrideOptions,
) -> StylePlan {
    let mut plan: StylePlan = [None; 3];
    let on_primary_background = tokens
        .iter()
        .any(|t| t.is_primary() && t.property == StyleProperty::Background);

    for token in tokens.iter().filter(|t| t.family == ColorFamily::NeutralSurface) {
        let action = if !palette.kind.derives_neutral_surfaces() {
            StyleAction::Clear
        } else if on_primary_background && token.property.is_foreground() {
            StyleAction::Set(options.readable_foreground)
        } else {
            palette
                .resolve_token(token)
                .map_or(StyleAction::Clear, StyleAction::Set)
        };
        plan[property_index(token.property)] = Some(action);
    }

    for token in tokens.iter().filter(|t| t.is_primary()) {
        if let Some(color) = palette.resolve_token(token) {
            plan[property_index(token.property)] = Some(StyleAction::Set(color));
        }
    }

    plan
}

fn apply_node<N: VisualNode>(
    node: &mut N,
    palette: &ResolvedPalette,
    options: &OverrideOptions,
    report: &mut PassReport,
) {
    let Some(list) = node.class_tokens() else {
        return;
    };
    let tokens: SmallVec<[ClassToken; 4]> =
        ClassToken::scan(list.iter().map(String::as_str)).collect();
    if tokens.is_empty() {
        return;
    }

    let plan = plan_node(&tokens, palette, options);
    let mut wrote = false;
    for property in StyleProperty::ALL {
        match plan[property_index(property)] {
            Some(StyleAction::Set(color)) => {
                node.set_inline_style(property, color);
                report.writes += 1;
                wrote = true;
            }
            Some(StyleAction::Clear) => {
                if node.inline_style(property).is_some() {
                    node.clear_inline_style(property);
                    report.cleared += 1;
                }
            }
            None => {}
        }
    }
    if wrote {
        report.styled += 1;
    }
}

/// Restyle every node beneath `root` (inclusive)
pub fn override_subtree<T: VisualTree>(
    tree: &mut T,
    root: NodeId,
    palette: &ResolvedPalette,
    options: &OverrideOptions,
) -> PassReport {
    let mut report = PassReport::default();

    for id in tree.descendants(root) {
        let Some(node) = tree.node_mut(id) else {
            continue;
        };
        report.visited += 1;
        if node.class_tokens().is_none() {
            tracing::trace!(?id, "node has no token list, skipping");
            report.skipped.push(id);
            continue;
        }
        apply_node(node, palette, options, &mut report);
    }

    report
}

/// Restyle the whole content region
pub fn override_tree<T: VisualTree>(
    tree: &mut T,
    palette: &ResolvedPalette,
    options: &OverrideOptions,
) -> PassReport {
    let mut report = PassReport::default();
    if let Some(root) = tree.content_root() {
        report.absorb(override_subtree(tree, root, palette, options));
    }

    tracing::debug!(
        kind = %palette.kind,
        visited = report.visited,
        styled = report.styled,
        writes = report.writes,
        cleared = report.cleared,
        skipped = report.skipped.len(),
        "override pass complete"
    );
    report
}
