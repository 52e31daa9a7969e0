//! Turn order and control flow shared by the sample games.
//!
//! `turn-engine` sits between game rules and [`turn_animation`]: NPC turns are
//! resolved instantly by the [`Timeline`], everything they schedule plays
//! through the [`AnimationSystem`](turn_animation::AnimationSystem), and the
//! [`GameController`] only hands control back to the player once the whole
//! animation cycle has drained.
//!
//! - [`actor`] defines the turn hook and the per-turn context
//! - [`timeline`] holds the NPC turn order with mark-then-sweep removal
//! - [`controller`] alternates between awaiting input and animating
pub mod actor;
pub mod controller;
pub mod timeline;

pub use actor::{Actor, Turn};
pub use controller::{ControllerState, GameController};
pub use timeline::{AdvanceReport, Timeline};

pub use turn_animation::ActorId;
