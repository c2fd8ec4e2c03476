//! Tinct Core Runtime
//!
//! This crate provides the foundational primitives for the Tinct re-theming
//! engine:
//!
//! - **Colors**: 8-bit RGB values with CSS color parsing
//! - **State Machines**: Typed flat state machines with wildcard transitions
//! - **Event Bus**: Synchronous publish/subscribe with unsubscribe handles
//! - **Frame Scheduling**: Debounced, coalescing per-frame task queue
//!
//! # Example
//!
//! ```rust
//! use tinct_core::{EventBus, Rgb};
//!
//! let mut bus: EventBus<Rgb> = EventBus::new();
//! let sub = bus.subscribe(|color| println!("accent is now {color}"));
//!
//! let delivered = bus.emit(&Rgb::parse("#1e66f5").unwrap());
//! assert_eq!(delivered, 1);
//!
//! bus.unsubscribe(sub);
//! assert!(bus.is_empty());
//! ```

pub mod bus;
pub mod color;
pub mod fsm;
pub mod scheduler;

pub use bus::{EventBus, Subscription};
pub use color::{ColorError, Rgb};
pub use fsm::{StateMachine, Transition};
pub use scheduler::{FrameScheduler, FrameTask};
