//! Engine lifecycle states
//!
//! ```text
//!            Activate (from any state)
//!   Idle ──────────────► Publishing ──Published──► Overriding ──PassComplete──► Observing
//!    ▲                                                  ▲                           │
//!    │                                                  └──────MutationBatch────────┘
//!    └──────────── Teardown (from any state)
//! ```

use std::fmt::{Display, Formatter};
use tinct_core::{StateMachine, Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No theme applied yet, or torn down
    Idle,
    /// Resolving ramps and rewriting the registry
    Publishing,
    /// Running an override pass
    Overriding,
    /// Theme applied; waiting for mutation batches
    Observing,
}

impl Display for EngineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EngineState::Idle => "idle",
            EngineState::Publishing => "publishing",
            EngineState::Overriding => "overriding",
            EngineState::Observing => "observing",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    Activate,
    Published,
    PassComplete,
    MutationBatch,
    Teardown,
}

pub type EngineMachine = StateMachine<EngineState, EngineEvent>;

/// Build the engine's lifecycle machine, starting in [`EngineState::Idle`]
pub fn engine_machine() -> EngineMachine {
    StateMachine::new(
        EngineState::Idle,
        vec![
            Transition::from_any(EngineEvent::Activate, EngineState::Publishing),
            Transition::new(
                EngineState::Publishing,
                EngineEvent::Published,
                EngineState::Overriding,
            ),
            Transition::new(
                EngineState::Overriding,
                EngineEvent::PassComplete,
                EngineState::Observing,
            ),
            Transition::new(
                EngineState::Observing,
                EngineEvent::MutationBatch,
                EngineState::Overriding,
            ),
            Transition::from_any(EngineEvent::Teardown, EngineState::Idle),
        ],
    )
}
