//! Phase-ordered animation scheduling for turn-based games.
//!
//! Game logic resolves a whole turn instantly; what the player *sees* is
//! scheduled as animations into named, ordered phases and drained one frame at
//! a time. Every ranged attack finishes before any melee attack plays, every
//! melee attack before end-of-turn cleanup, no matter how many actors acted.
//!
//! - **Frame-synchronous**: one [`Animation::tick`] per animation per frame
//! - **Circular pipeline**: after the tail phase drains the cursor wraps to the head
//! - **Pooled**: finished animations return to an [`AnimationPool`] for reuse
//!
//! # Architecture
//!
//! - [`Animation`]: Core trait for all units of work
//! - [`AnimationChain`]: Runs children strictly one after another
//! - [`AnimationPool`]: Free lists keyed by [`AnimationKind`]
//! - [`AnimationPhase`]: Named bucket with an optional [`Preprocess`] hook
//! - [`AnimationSystem`]: Phase registry, chain order and cursor
//! - [`MergeTagged`]: Preprocess hook folding duplicate [`Tag`]ged events

pub mod animation;
pub mod chain;
pub mod config;
pub mod error;
pub mod merge;
pub mod phase;
pub mod pool;
pub mod system;
pub mod tag;

pub use animation::{ActorId, Animation, AnimationCore, AnimationKind, Noop, Pooled};
pub use chain::AnimationChain;
pub use config::PhaseConfig;
pub use error::{AnimationError, ConfigError};
pub use merge::MergeTagged;
pub use phase::{AnimationPhase, PhaseId, Preprocess};
pub use pool::AnimationPool;
pub use system::{AnimationSystem, AnimationSystemBuilder};
pub use tag::{Tag, TagKind};
