//! A small arena game built on [`turn_engine`].
//!
//! One hero faces a roster of monsters. Turns resolve instantly against the
//! [`Arena`]; what they look like is scheduled as pooled animations that play
//! on a headless [`Stage`]:
//!
//! - ranged shots in `RANGED_ATTACKS`
//! - melee lunges in `MELEE_ATTACKS`
//! - health bars and deaths in `END_OF_TURN`, where simultaneous hits on the
//!   hero are merged into one change
pub mod animations;
pub mod combat;
pub mod error;
pub mod loaders;
pub mod npc;
pub mod player;
pub mod session;
pub mod stage;
pub mod world;

pub use combat::{AttackOutcome, CommandError, Strike, merge_hp_changes, resolve_attack};
pub use error::SkirmishError;
pub use loaders::SessionLoader;
pub use npc::{Archer, Brawler, NpcKind};
pub use player::{Command, InputQueue, InputSource, Player};
pub use session::{HeroSpec, MonsterSpec, Outcome, Session, SessionConfig, TurnSummary};
pub use stage::{Shot, Stage, Visual};
pub use world::{Arena, Combatant, Faction};
