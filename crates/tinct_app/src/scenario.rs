//! Headless scenarios
//!
//! A scenario is a JSON script that builds a [`NodeTree`], activates themes,
//! mutates the tree, advances frames and asserts on inline styles and the
//! registry. The CLI's `run` command and the integration tests both use it.
//!
//! ```json
//! {
//!   "tree": { "tag": "main", "children": [
//!     { "id": "card", "class": "background-neutral-surface-800" }
//!   ]},
//!   "steps": [
//!     { "type": "activate", "theme": "ember" },
//!     { "type": "insert", "parent": "card",
//!       "node": { "id": "cta", "tag": "button", "class": "background-primary-600" } },
//!     { "type": "tick" },
//!     { "type": "assert_style", "id": "cta", "property": "background",
//!       "registry": "--color-primary-600" }
//!   ]
//! }
//! ```

use crate::config::EngineConfig;
use crate::engine::ThemeEngine;
use crate::provider::InMemoryThemeProvider;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tinct_core::Rgb;
use tinct_theme::{StyleProperty, ThemeDescriptor};
use tinct_tree::{Element, NodeId, NodeSpec, NodeTree, VisualNode, VisualTree};

/// Name always bound to the tree root
pub const ROOT_NAME: &str = "root";

/// A scripted engine session
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Known themes; the built-in presets when empty
    #[serde(default)]
    pub themes: Vec<ThemeDescriptor>,
    /// Initial tree; a bare `main` element when absent
    #[serde(default)]
    pub tree: Option<NodeSpec>,
    /// Named node to use as the content root
    #[serde(default)]
    pub content: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn one_frame() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Ask the provider to activate a theme by id
    Activate { theme: String },
    /// Append a subtree under a named node (the root by default)
    Insert {
        #[serde(default)]
        parent: Option<String>,
        node: NodeSpec,
    },
    /// Remove a named node and its subtree
    Remove { id: String },
    /// Advance one or more frames
    Tick {
        #[serde(default = "one_frame")]
        frames: u32,
    },
    /// Check a node's inline color.
    ///
    /// Compares against `color`, or the registry value at `registry`, or
    /// expects no inline value when neither is given.
    AssertStyle {
        id: String,
        property: StyleProperty,
        #[serde(default)]
        color: Option<Rgb>,
        #[serde(default)]
        registry: Option<String>,
    },
    /// Check a registry entry; `color: null` expects the key to be absent
    AssertRegistry {
        key: String,
        #[serde(default)]
        color: Option<Rgb>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub frames: u64,
    pub activations: usize,
    pub passes: usize,
    pub active_theme: Option<String>,
    /// Absorbed activation issues, in order
    pub issues: Vec<String>,
}

impl ScenarioReport {
    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

struct Session {
    engine: ThemeEngine,
    provider: InMemoryThemeProvider,
    tree: NodeTree,
    names: HashMap<String, NodeId>,
    frames: u64,
    activations: usize,
    passes: usize,
    issues: Vec<String>,
}

impl Session {
    fn report(self, failure: Option<(usize, &str, String)>) -> ScenarioReport {
        let active_theme = self.engine.active_theme().map(|t| t.id.clone());
        let (status, failed_step_index, assertion, message) = match failure {
            Some((index, assertion, message)) => (
                ReportStatus::Failed,
                Some(index),
                Some(assertion.to_string()),
                Some(message),
            ),
            None => (ReportStatus::Passed, None, None, None),
        };
        ScenarioReport {
            status,
            failed_step_index,
            assertion,
            message,
            frames: self.frames,
            activations: self.activations,
            passes: self.passes,
            active_theme,
            issues: self.issues,
        }
    }

    fn lookup(&self, name: &str) -> std::result::Result<NodeId, String> {
        match self.names.get(name) {
            Some(id) if self.tree.contains(*id) => Ok(*id),
            Some(_) => Err(format!("{name}: node was removed")),
            None => Err(format!("{name}: no node with this id")),
        }
    }

    fn step(&mut self, step: &ScenarioStep) -> std::result::Result<(), String> {
        match step {
            ScenarioStep::Activate { theme } => {
                let activation =
                    self.engine
                        .activate_with(&mut self.provider, theme, &mut self.tree);
                self.activations += 1;
                if activation.pass.is_some() {
                    self.passes += 1;
                }
                self.issues
                    .extend(activation.issues.iter().map(ToString::to_string));
            }
            ScenarioStep::Insert { parent, node } => {
                let parent = self.lookup(parent.as_deref().unwrap_or(ROOT_NAME))?;
                let id = self
                    .tree
                    .append_spec(parent, node)
                    .ok_or_else(|| "parent vanished during insert".to_string())?;
                register_names(&self.tree, id, node, &mut self.names);
            }
            ScenarioStep::Remove { id } => {
                let node = self.lookup(id)?;
                if !self.tree.remove(node) {
                    return Err(format!("{id}: cannot remove the root"));
                }
            }
            ScenarioStep::Tick { frames } => {
                for _ in 0..*frames {
                    let report = self.engine.tick(&mut self.tree);
                    self.frames += 1;
                    if report.pass.is_some() {
                        self.passes += 1;
                    }
                }
            }
            ScenarioStep::AssertStyle {
                id,
                property,
                color,
                registry,
            } => {
                let node = self.lookup(id)?;
                let expected = match (color, registry) {
                    (Some(color), _) => Some(*color),
                    (None, Some(key)) => Some(
                        self.engine
                            .registry()
                            .get(key)
                            .ok_or_else(|| format!("{key}: not in registry"))?,
                    ),
                    (None, None) => None,
                };
                let actual = self
                    .tree
                    .node(node)
                    .and_then(|element| element.inline_style(*property));
                if actual != expected {
                    return Err(format!(
                        "{id}: expected {property} {}, got {}",
                        describe(expected),
                        describe(actual)
                    ));
                }
            }
            ScenarioStep::AssertRegistry { key, color } => {
                let actual = self.engine.registry().get(key);
                if actual != *color {
                    return Err(format!(
                        "{key}: expected {}, got {}",
                        describe(*color),
                        describe(actual)
                    ));
                }
            }
        }
        Ok(())
    }
}

fn describe(color: Option<Rgb>) -> String {
    color.map_or_else(|| "none".to_string(), |c| c.to_hex())
}

fn assertion_name(step: &ScenarioStep) -> &'static str {
    match step {
        ScenarioStep::Activate { .. } => "activate",
        ScenarioStep::Insert { .. } => "insert",
        ScenarioStep::Remove { .. } => "remove",
        ScenarioStep::Tick { .. } => "tick",
        ScenarioStep::AssertStyle { .. } => "assert_style",
        ScenarioStep::AssertRegistry { .. } => "assert_registry",
    }
}

/// Bind `spec`'s ids (and its children's) to the matching nodes under `id`
fn register_names(
    tree: &NodeTree,
    id: NodeId,
    spec: &NodeSpec,
    names: &mut HashMap<String, NodeId>,
) {
    if let Some(name) = &spec.id {
        names.insert(name.clone(), id);
    }
    let children = tree.children(id).to_vec();
    for (child_spec, child) in spec.children.iter().zip(children) {
        register_names(tree, child, child_spec, names);
    }
}

fn build_tree(scenario: &Scenario) -> Result<(NodeTree, HashMap<String, NodeId>)> {
    let mut names = HashMap::new();
    let mut tree = match &scenario.tree {
        Some(spec) => {
            let mut tree = NodeTree::new(spec.to_element());
            let root = tree.root();
            for child in &spec.children {
                tree.append_spec(root, child);
            }
            register_names(&tree, root, spec, &mut names);
            tree
        }
        None => NodeTree::new(Element::new("main")),
    };
    names.insert(ROOT_NAME.to_string(), tree.root());

    if let Some(content) = &scenario.content {
        let Some(id) = names.get(content).copied() else {
            bail!("content root {content:?} does not name a node");
        };
        tree.set_content_root(id);
    }
    tree.take_mutations();
    Ok((tree, names))
}

/// Run a loaded scenario against a fresh engine
pub fn run_loaded_scenario(scenario: &Scenario, config: &EngineConfig) -> Result<ScenarioReport> {
    let (tree, names) = build_tree(scenario)?;
    let provider = if scenario.themes.is_empty() {
        InMemoryThemeProvider::from_presets()
    } else {
        InMemoryThemeProvider::new(scenario.themes.clone())
    };

    let mut session = Session {
        engine: ThemeEngine::new(config),
        provider,
        tree,
        names,
        frames: 0,
        activations: 0,
        passes: 0,
        issues: Vec::new(),
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        if let Err(message) = session.step(step) {
            tracing::warn!(step = index, %message, "scenario step failed");
            return Ok(session.report(Some((index, assertion_name(step), message))));
        }
    }
    Ok(session.report(None))
}

/// Parse and run scenario JSON
pub fn run_scenario(input: &str, config: &EngineConfig) -> Result<ScenarioReport> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_deserialize() {
        let scenario = Scenario::from_json(
            r##"{"steps":[
                {"type":"activate","theme":"ocean"},
                {"type":"tick"},
                {"type":"tick","frames":3},
                {"type":"assert_style","id":"x","property":"text","color":"#fff"},
                {"type":"assert_registry","key":"--color-text","color":null}
            ]}"##,
        )
        .unwrap();

        assert!(matches!(scenario.steps[1], ScenarioStep::Tick { frames: 1 }));
        assert!(matches!(scenario.steps[2], ScenarioStep::Tick { frames: 3 }));
        assert!(matches!(
            &scenario.steps[3],
            ScenarioStep::AssertStyle { property: StyleProperty::Text, color: Some(c), .. } if *c == Rgb::WHITE
        ));
        assert!(matches!(
            &scenario.steps[4],
            ScenarioStep::AssertRegistry { color: None, .. }
        ));
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(Scenario::from_json(r#"{"steps":[{"type":"sleep"}]}"#).is_err());
    }

    #[test]
    fn test_names_bind_nested_nodes() {
        let scenario = Scenario::from_json(
            r#"{"tree":{"tag":"body","children":[
                {"id":"nav","tag":"nav"},
                {"id":"main","tag":"main","children":[{"id":"card"}]}
            ]},"content":"main","steps":[]}"#,
        )
        .unwrap();
        let (tree, names) = build_tree(&scenario).unwrap();

        assert_eq!(tree.content_root(), Some(names["main"]));
        assert_eq!(tree.parent(names["card"]), Some(names["main"]));
        assert_eq!(names[ROOT_NAME], tree.root());
    }

    #[test]
    fn test_bad_content_root_is_an_error() {
        let scenario = Scenario::from_json(r#"{"content":"nope","steps":[]}"#).unwrap();
        assert!(run_loaded_scenario(&scenario, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_failed_assertion_reports_step() {
        let report = run_scenario(
            r##"{"steps":[
                {"type":"activate","theme":"ocean"},
                {"type":"assert_registry","key":"--color-primary","color":"#000000"}
            ]}"##,
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(report.is_failed());
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_registry"));
        assert_eq!(
            report.message.as_deref(),
            Some("--color-primary: expected #000000, got #0ea5e9")
        );
    }
}
