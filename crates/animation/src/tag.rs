//! Discriminants attached to animations for phase preprocessing.
//!
//! Preprocess hooks filter scheduled animations by tag equality instead of
//! inspecting concrete types, which keeps phases decoupled from the animation
//! types a game defines.

use crate::ActorId;

/// Category of event an animation represents.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TagKind {
    /// Hit point change shown on an actor's health display.
    HpChange,
    /// Experience gained.
    Experience,
    /// Gold picked up or spent.
    Gold,
}

/// Tag and payload carried by an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: TagKind,
    /// Actor the event is about.
    pub target: ActorId,
    /// Signed magnitude (damage is negative, healing positive).
    pub amount: i32,
}

impl Tag {
    pub const fn new(kind: TagKind, target: ActorId, amount: i32) -> Self {
        Self {
            kind,
            target,
            amount,
        }
    }

    pub const fn hp_change(target: ActorId, amount: i32) -> Self {
        Self::new(TagKind::HpChange, target, amount)
    }

    /// Returns true if both tags describe the same kind of event on the same actor.
    #[inline]
    pub fn same_event(&self, other: &Tag) -> bool {
        self.kind == other.kind && self.target == other.target
    }
}
