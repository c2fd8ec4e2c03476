//! Mutation watching
//!
//! Insertions into the content region may carry static class tokens that the
//! last override pass never saw. The watcher filters insertion records and
//! asks the frame scheduler for a single follow-up pass; the pass itself runs
//! on the next frame, so records produced by the pass cannot re-enter it.

use crate::node::{MutationRecord, VisualNode, VisualTree};
use tinct_core::FrameScheduler;
use tinct_theme::ClassToken;

/// Deferred work the watcher can request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Re-run the full override pass with the current palette
    Reapply,
}

/// What one batch of records led to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchOutcome {
    /// Records that touched token-bearing nodes in the content region
    pub relevant: usize,
    /// Records outside the region, for removed nodes, or without tokens
    pub ignored: usize,
    /// Whether a pass was requested (or folded into a pending one)
    pub scheduled: bool,
}

/// Watches a tree on behalf of one active theme
#[derive(Debug, Default)]
pub struct MutationWatcher {
    generation: u64,
    theme: Option<String>,
}

impl MutationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching for `theme`, replacing any previous attachment
    pub fn attach(&mut self, theme: impl Into<String>) {
        self.generation += 1;
        let theme = theme.into();
        tracing::debug!(generation = self.generation, %theme, "mutation watcher attached");
        self.theme = Some(theme);
    }

    /// Stop watching. Returns whether the watcher was attached.
    pub fn detach(&mut self) -> bool {
        match self.theme.take() {
            Some(theme) => {
                tracing::debug!(generation = self.generation, %theme, "mutation watcher detached");
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.theme.is_some()
    }

    /// Number of attachments so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Theme the watcher is attached for
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Inspect `records` and request a reapply pass if any of them matter.
    ///
    /// A detached watcher ignores everything. Any number of relevant records
    /// result in at most one pending pass.
    pub fn observe<T: VisualTree>(
        &self,
        tree: &T,
        records: &[MutationRecord],
        scheduler: &mut FrameScheduler<PassKind>,
    ) -> WatchOutcome {
        let mut outcome = WatchOutcome::default();
        if !self.is_attached() {
            outcome.ignored = records.len();
            return outcome;
        }

        let content_root = tree.content_root();
        for record in records {
            let in_region = content_root.is_some_and(|root| tree.is_within(record.node, root));
            if in_region && carries_tokens(tree, record) {
                outcome.relevant += 1;
            } else {
                outcome.ignored += 1;
            }
        }

        if outcome.relevant > 0 {
            scheduler.request(PassKind::Reapply);
            outcome.scheduled = true;
            tracing::trace!(
                generation = self.generation,
                relevant = outcome.relevant,
                ignored = outcome.ignored,
                "reapply requested"
            );
        }
        outcome
    }
}

fn carries_tokens<T: VisualTree>(tree: &T, record: &MutationRecord) -> bool {
    tree.descendants(record.node).into_iter().any(|id| {
        tree.node(id)
            .and_then(|node| node.class_tokens())
            .is_some_and(|tokens| {
                ClassToken::scan(tokens.iter().map(String::as_str))
                    .next()
                    .is_some()
            })
    })
}
