//! Tinct Application Layer
//!
//! Wires the theme, tree and core crates into a single owned [`ThemeEngine`].
//!
//! # Example
//!
//! ```rust
//! use tinct_app::{InMemoryThemeProvider, ThemeEngine};
//! use tinct_theme::{StyleProperty, Weight};
//! use tinct_tree::{Element, NodeTree, VisualNode, VisualTree};
//!
//! let mut engine = ThemeEngine::default();
//! let mut provider = InMemoryThemeProvider::from_presets();
//! let mut tree = NodeTree::new(Element::new("main"));
//!
//! let activation = engine.activate_with(&mut provider, "ember", &mut tree);
//! assert!(activation.is_applied());
//!
//! // Content mounted later is picked up on the next tick
//! let root = tree.root();
//! let button = tree
//!     .append(root, Element::new("button").with_class("background-primary-600"))
//!     .unwrap();
//! engine.tick(&mut tree);
//!
//! let expected = engine.registry().get("--color-primary-600");
//! assert_eq!(tree.node(button).unwrap().inline_style(StyleProperty::Background), expected);
//! assert_eq!(expected, Some(engine.palette().unwrap().primary.unwrap().get(Weight::W600)));
//! ```

pub mod config;
pub mod engine;
pub mod logging;
pub mod provider;
pub mod scenario;
pub mod state;

pub use config::EngineConfig;
pub use engine::{Activation, ActivationIssue, ThemeEngine, TickReport};
pub use logging::init_logging;
pub use provider::{InMemoryThemeProvider, ProviderError, ThemeProvider, ThemesFile};
pub use scenario::{run_loaded_scenario, run_scenario, ReportStatus, Scenario, ScenarioReport, ScenarioStep};
pub use state::{EngineEvent, EngineState};
