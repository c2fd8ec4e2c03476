//! The theme engine
//!
//! [`ThemeEngine`] owns everything activation needs: the resolved palette of
//! the active theme, the published registry, the mutation watcher, the frame
//! scheduler and the [`ThemeBus`]. Hosts drive it with two calls:
//!
//! - an activation ([`ThemeEngine::apply_themes`] or
//!   [`ThemeEngine::activate_with`]) whenever the selected theme changes
//! - [`ThemeEngine::tick`] once per frame, which delivers insertion records
//!   to the watcher and runs the single reapply pass they call for
//!
//! Activation never fails outright. Whatever went wrong is absorbed, logged
//! and listed in the returned [`Activation`].

use crate::config::EngineConfig;
use crate::provider::{ProviderError, ThemeProvider};
use crate::state::{engine_machine, EngineEvent, EngineMachine, EngineState};
use thiserror::Error;
use tinct_core::{FrameScheduler, Subscription};
use tinct_theme::{
    find_active, PropertyPublisher, PropertyRegistry, ResolvedPalette, ThemeBus, ThemeDescriptor,
    ThemeError,
};
use tinct_tree::{
    override_tree, MutationWatcher, OverrideOptions, PassKind, PassReport, VisualTree,
    WatchOutcome,
};

/// Something absorbed during an activation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationIssue {
    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Outcome of one activation
#[derive(Debug, Clone, Default)]
pub struct Activation {
    /// Theme now applied, `None` if the activation was abandoned
    pub theme: Option<ThemeDescriptor>,
    pub issues: Vec<ActivationIssue>,
    /// The full pass run as part of the activation
    pub pass: Option<PassReport>,
    /// ThemeBus subscribers notified
    pub notified: usize,
}

impl Activation {
    fn abandoned(issue: ActivationIssue) -> Self {
        Self {
            issues: vec![issue],
            ..Self::default()
        }
    }

    pub fn is_applied(&self) -> bool {
        self.theme.is_some()
    }
}

/// Outcome of one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    pub watched: WatchOutcome,
    /// Reapply pass run this frame, if one was due
    pub pass: Option<PassReport>,
}

struct ActiveTheme {
    descriptor: ThemeDescriptor,
    palette: ResolvedPalette,
}

/// Runtime re-theming engine
pub struct ThemeEngine {
    publisher: PropertyPublisher,
    options: OverrideOptions,
    watch_enabled: bool,
    machine: EngineMachine,
    scheduler: FrameScheduler<PassKind>,
    watcher: MutationWatcher,
    active: Option<ActiveTheme>,
    registry: PropertyRegistry,
    bus: ThemeBus,
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ThemeEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            publisher: config.publisher(),
            options: config.override_options(),
            watch_enabled: config.watcher.enabled,
            machine: engine_machine(),
            scheduler: FrameScheduler::new(),
            watcher: MutationWatcher::new(),
            active: None,
            registry: PropertyRegistry::new(),
            bus: ThemeBus::new(),
        }
    }

    /// Apply whichever descriptor in `themes` is marked active.
    ///
    /// With no active descriptor the engine is left exactly as it was.
    pub fn apply_themes<T: VisualTree>(
        &mut self,
        themes: &[ThemeDescriptor],
        tree: &mut T,
    ) -> Activation {
        match find_active(themes) {
            Ok(theme) => {
                let theme = theme.clone();
                self.activate(theme, tree)
            }
            Err(err) => {
                tracing::warn!(%err, "activation skipped");
                Activation::abandoned(err.into())
            }
        }
    }

    /// Load the provider's current active theme
    pub fn sync_with<P, T>(&mut self, provider: &P, tree: &mut T) -> Activation
    where
        P: ThemeProvider + ?Sized,
        T: VisualTree,
    {
        match provider.list_themes() {
            Ok(themes) => self.apply_themes(&themes, tree),
            Err(err) => {
                tracing::warn!(%err, "could not list themes");
                Activation::abandoned(err.into())
            }
        }
    }

    /// Ask the provider to activate `id`, then apply the result
    pub fn activate_with<P, T>(&mut self, provider: &mut P, id: &str, tree: &mut T) -> Activation
    where
        P: ThemeProvider + ?Sized,
        T: VisualTree,
    {
        match provider.activate_theme(id) {
            Ok(mut theme) => {
                theme.active = true;
                self.activate(theme, tree)
            }
            Err(err) => {
                tracing::warn!(%err, theme = id, "provider refused activation");
                Activation::abandoned(err.into())
            }
        }
    }

    fn activate<T: VisualTree>(&mut self, theme: ThemeDescriptor, tree: &mut T) -> Activation {
        self.machine.send(EngineEvent::Activate);

        let previous = self.active.as_ref().map(|active| &active.palette);
        let publication = self.publisher.publish(&theme, previous);
        let mut issues: Vec<ActivationIssue> =
            publication.issues.into_iter().map(Into::into).collect();
        self.registry = publication.registry;
        let palette = publication.palette;
        self.machine.send(EngineEvent::Published);

        // Full pass now covers anything the watcher had queued
        self.scheduler.cancel(PassKind::Reapply);
        let report = override_tree(tree, &palette, &self.options);
        issues.extend(report.issues().into_iter().map(Into::into));
        self.machine.send(EngineEvent::PassComplete);

        if self.watch_enabled && theme.kind.observes_mutations() {
            self.watcher.attach(theme.id.clone());
        } else {
            self.watcher.detach();
        }

        // Stale records belong to the previous theme's watcher
        tree.take_mutations();

        self.active = Some(ActiveTheme {
            descriptor: theme.clone(),
            palette,
        });
        let notified = self.bus.emit(&theme);

        tracing::info!(
            theme = %theme.id,
            kind = %theme.kind,
            properties = self.registry.len(),
            issues = issues.len(),
            watching = self.watcher.is_attached(),
            notified,
            "theme activated"
        );

        Activation {
            theme: Some(theme),
            issues,
            pass: Some(report),
            notified,
        }
    }

    /// Advance one frame.
    ///
    /// Records of insertions made since the previous tick go to the watcher,
    /// which schedules at most one pass. The frame then advances and runs
    /// it. Insertions made during the pass wait for the following tick.
    pub fn tick<T: VisualTree>(&mut self, tree: &mut T) -> TickReport {
        let records = tree.take_mutations();
        let watched = self.watcher.observe(tree, &records, &mut self.scheduler);

        let tasks = self.scheduler.begin_frame();
        let mut pass = None;
        for task in &tasks {
            match task.kind {
                PassKind::Reapply => {
                    let Some(active) = &self.active else { continue };
                    self.machine.send(EngineEvent::MutationBatch);
                    let report = override_tree(tree, &active.palette, &self.options);
                    self.machine.send(EngineEvent::PassComplete);
                    tracing::debug!(
                        generation = self.watcher.generation(),
                        requests = task.requests,
                        styled = report.styled,
                        "reapplied theme after insertions"
                    );
                    pass = Some(report);
                }
            }
        }
        self.scheduler.finish_frame();

        TickReport {
            frame: self.scheduler.frame(),
            watched,
            pass,
        }
    }

    /// Detach the watcher and drop pending work.
    ///
    /// The registry and palette are kept so a later activation can still fall
    /// back to them.
    pub fn teardown(&mut self) {
        self.watcher.detach();
        self.scheduler.cancel(PassKind::Reapply);
        self.machine.send(EngineEvent::Teardown);
        tracing::debug!("theme engine torn down");
    }

    /// Register for activation notices
    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(&ThemeDescriptor) + Send + 'static,
    {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    pub fn state(&self) -> EngineState {
        self.machine.current_state()
    }

    /// Recent lifecycle transitions, oldest first
    pub fn history(&self) -> &[(EngineState, EngineEvent, EngineState)] {
        self.machine.history()
    }

    pub fn active_theme(&self) -> Option<&ThemeDescriptor> {
        self.active.as_ref().map(|active| &active.descriptor)
    }

    pub fn palette(&self) -> Option<&ResolvedPalette> {
        self.active.as_ref().map(|active| &active.palette)
    }

    pub fn watcher(&self) -> &MutationWatcher {
        &self.watcher
    }

    pub fn has_pending_pass(&self) -> bool {
        self.scheduler.is_pending(PassKind::Reapply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryThemeProvider;
    use tinct_core::Rgb;
    use tinct_theme::{StyleProperty, ThemeKind, ThemePreset, Weight};
    use tinct_tree::{Element, NodeTree, VisualNode};

    fn tree() -> NodeTree {
        let mut tree = NodeTree::new(Element::new("main"));
        let root = tree.root();
        tree.append(root, Element::new("button").with_class("background-primary-600"));
        tree.take_mutations();
        tree
    }

    fn active(preset: ThemePreset) -> Vec<ThemeDescriptor> {
        ThemePreset::all()
            .iter()
            .map(|p| {
                let mut d = p.descriptor();
                d.active = *p == preset;
                d
            })
            .collect()
    }

    #[test]
    fn test_activation_walks_the_lifecycle() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        assert_eq!(engine.state(), EngineState::Idle);

        let activation = engine.apply_themes(&active(ThemePreset::Ocean), &mut tree);
        assert!(activation.is_applied());
        assert!(activation.issues.is_empty());
        assert_eq!(activation.pass.unwrap().styled, 1);
        assert_eq!(engine.state(), EngineState::Observing);

        let states: Vec<EngineState> = engine.history().iter().map(|(_, _, to)| *to).collect();
        assert_eq!(
            states,
            vec![
                EngineState::Publishing,
                EngineState::Overriding,
                EngineState::Observing
            ]
        );
    }

    #[test]
    fn test_missing_active_theme_changes_nothing() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        engine.apply_themes(&active(ThemePreset::Ocean), &mut tree);
        let registry = engine.registry().clone();

        let mut none = active(ThemePreset::Ocean);
        none.iter_mut().for_each(|t| t.active = false);
        let activation = engine.apply_themes(&none, &mut tree);

        assert!(!activation.is_applied());
        assert_eq!(
            activation.issues,
            vec![ActivationIssue::Theme(ThemeError::MissingActiveTheme { known: 4 })]
        );
        assert_eq!(engine.registry(), &registry);
        assert_eq!(engine.active_theme().unwrap().id, "ocean");
        assert_eq!(engine.state(), EngineState::Observing);
    }

    #[test]
    fn test_dark_kind_does_not_watch() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        engine.apply_themes(&active(ThemePreset::Midnight), &mut tree);
        assert_eq!(engine.active_theme().unwrap().kind, ThemeKind::Dark);
        assert!(!engine.watcher().is_attached());

        let root = tree.root();
        let late = tree
            .append(root, Element::new("a").with_class("text-primary-700"))
            .unwrap();
        engine.tick(&mut tree);
        let report = engine.tick(&mut tree);

        assert!(report.pass.is_none());
        assert_eq!(tree.node(late).unwrap().inline_style(StyleProperty::Text), None);
    }

    #[test]
    fn test_insertions_are_restyled_on_next_tick() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        engine.apply_themes(&active(ThemePreset::Daylight), &mut tree);
        let primary = engine.palette().unwrap().primary.unwrap();

        let root = tree.root();
        let ids: Vec<_> = (0..3)
            .map(|_| {
                tree.append(root, Element::new("button").with_class("background-primary-600"))
                    .unwrap()
            })
            .collect();
        for id in &ids {
            assert_eq!(tree.node(*id).unwrap().inline_style(StyleProperty::Background), None);
        }

        let report = engine.tick(&mut tree);
        assert_eq!(report.watched.relevant, 3);
        assert!(report.pass.is_some());
        assert!(!engine.has_pending_pass());
        for id in ids {
            assert_eq!(
                tree.node(id).unwrap().inline_style(StyleProperty::Background),
                Some(primary.get(Weight::W600))
            );
        }
        assert_eq!(engine.state(), EngineState::Observing);

        assert!(engine.tick(&mut tree).pass.is_none());
    }

    #[test]
    fn test_activation_runs_its_own_pass_and_drops_queued_work() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        engine.apply_themes(&active(ThemePreset::Daylight), &mut tree);

        let root = tree.root();
        let late = tree
            .append(root, Element::new("button").with_class("background-primary-600"))
            .unwrap();
        let activation = engine.apply_themes(&active(ThemePreset::Ember), &mut tree);

        assert_eq!(activation.pass.unwrap().styled, 2);
        assert!(!engine.has_pending_pass());
        let ember = engine.palette().unwrap().primary.unwrap();
        assert_eq!(
            tree.node(late).unwrap().inline_style(StyleProperty::Background),
            Some(ember.get(Weight::W600))
        );
        assert!(engine.tick(&mut tree).pass.is_none());
    }

    #[test]
    fn test_bus_notifies_current_subscribers_only() {
        use std::sync::{Arc, Mutex};

        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let sub = engine.subscribe(move |theme| sink.lock().unwrap().push(theme.id.clone()));

        let mut provider = InMemoryThemeProvider::from_presets();
        engine.activate_with(&mut provider, "ocean", &mut tree);
        assert!(engine.unsubscribe(sub));
        let activation = engine.activate_with(&mut provider, "ember", &mut tree);

        assert_eq!(activation.notified, 0);
        assert_eq!(*seen.lock().unwrap(), vec!["ocean".to_string()]);
    }

    #[test]
    fn test_provider_failure_is_absorbed() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        let mut provider = InMemoryThemeProvider::from_presets();

        let activation = engine.activate_with(&mut provider, "sepia", &mut tree);
        assert!(!activation.is_applied());
        assert!(matches!(
            activation.issues[0],
            ActivationIssue::Provider(ProviderError::UnknownTheme { .. })
        ));
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn test_teardown_detaches_watcher() {
        let mut engine = ThemeEngine::default();
        let mut tree = tree();
        engine.apply_themes(&active(ThemePreset::Ocean), &mut tree);
        let generation = engine.watcher().generation();

        engine.teardown();
        assert!(!engine.watcher().is_attached());
        assert_eq!(engine.state(), EngineState::Idle);

        let root = tree.root();
        let late = tree
            .append(root, Element::new("div").with_class("border-primary-300"))
            .unwrap();
        let report = engine.tick(&mut tree);
        assert_eq!(report.watched.ignored, 1);
        assert!(report.pass.is_none());
        assert_eq!(tree.node(late).unwrap().inline_style(StyleProperty::Border), None);

        engine.apply_themes(&active(ThemePreset::Ocean), &mut tree);
        assert_eq!(engine.watcher().generation(), generation + 1);
        assert!(tree.node(late).unwrap().inline_style(StyleProperty::Border).is_some());
    }

    #[test]
    fn test_config_controls_foreground_and_prefix() {
        let config = EngineConfig::from_toml_str(
            "[registry]\nprefix = \"ui\"\n[overrider]\nreadable_foreground = \"#000\"",
        )
        .unwrap();
        let mut engine = ThemeEngine::new(&config);

        let mut tree = NodeTree::new(Element::new("main"));
        let root = tree.root();
        let id = tree
            .append(
                root,
                Element::new("button").with_class("background-primary-500 text-neutral-surface-50"),
            )
            .unwrap();
        engine.apply_themes(&active(ThemePreset::Ember), &mut tree);

        assert!(engine.registry().get("--ui-primary-500").is_some());
        assert_eq!(
            tree.node(id).unwrap().inline_style(StyleProperty::Text),
            Some(Rgb::BLACK)
        );
    }
}
