//! Core animation trait.
//!
//! This module defines the [`Animation`] trait, the unit of deferred visual
//! work. An animation advances by one discrete step per [`Animation::tick`]
//! and eventually reports completion. Concrete types only implement
//! [`Animation::animate`]; the dispatch, completion flag and reset logic are
//! shared through [`AnimationCore`].

use std::any::Any;
use std::fmt;

use crate::Tag;

/// Identifier of the actor an animation belongs to.
///
/// This is a lookup key only. Holding an `ActorId` never keeps the actor alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the player-controlled actor.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this actor is the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key under which idle instances of one concrete animation type are pooled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationKind(&'static str);

impl AnimationKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// State shared by every animation: completion flag, owner and tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationCore {
    done: bool,
    owner: Option<ActorId>,
    tag: Option<Tag>,
}

impl AnimationCore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_owner(mut self, owner: ActorId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<ActorId>) {
        self.owner = owner;
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn tag_mut(&mut self) -> Option<&mut Tag> {
        self.tag.as_mut()
    }

    pub fn set_tag(&mut self, tag: Option<Tag>) {
        self.tag = tag;
    }

    pub(crate) fn finish(&mut self) {
        self.done = true;
    }

    /// Returns the core to its freshly constructed state.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Object-safe access to [`Any`] for pooled downcasts.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A resettable unit of visual work advanced one frame at a time.
///
/// # Contract
///
/// - Callers only ever use [`tick`](Animation::tick), never `animate` directly.
/// - `is_done` flips from `false` to `true` once and stays there until
///   [`reset`](Animation::reset).
/// - An animation that never calls [`done`](Animation::done) stalls its phase
///   and, transitively, the whole cycle.
pub trait Animation: AsAny {
    /// Pool key for this concrete type.
    fn kind(&self) -> AnimationKind;

    fn core(&self) -> &AnimationCore;

    fn core_mut(&mut self) -> &mut AnimationCore;

    /// Performs exactly one frame of progress.
    ///
    /// The default completes immediately, which makes an unspecialized
    /// animation a no-op sentinel.
    fn animate(&mut self) {
        self.done();
    }

    /// Reinitializes type-specific fields. Called by [`reset`](Animation::reset).
    fn rewind(&mut self) {}

    /// `true` for composites whose children must be released first. The
    /// pool only calls [`take_children`](Animation::take_children) when this
    /// holds.
    fn is_chain(&self) -> bool {
        false
    }

    /// Hands owned children back for release. Leaves own none.
    fn take_children(&mut self) -> Vec<Box<dyn Animation>> {
        Vec::new()
    }

    /// Advances one step unless already done. Returns the post-step done state.
    fn tick(&mut self) -> bool {
        if self.is_done() {
            return true;
        }
        self.animate();
        self.is_done()
    }

    /// Marks the animation complete. Calling it again has no effect.
    fn done(&mut self) {
        self.core_mut().finish();
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.core().is_done()
    }

    fn reset(&mut self) {
        self.core_mut().clear();
        self.rewind();
    }

    fn owner(&self) -> Option<ActorId> {
        self.core().owner()
    }

    fn tag(&self) -> Option<&Tag> {
        self.core().tag()
    }

    fn tag_mut(&mut self) -> Option<&mut Tag> {
        self.core_mut().tag_mut()
    }
}

impl dyn Animation {
    /// Returns the concrete animation if it is of type `T`.
    pub fn downcast_ref<T: Animation>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Animation>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// An animation type the pool can construct on demand.
pub trait Pooled: Animation + Default {
    const KIND: AnimationKind;
}

/// Animation that completes on its first tick.
#[derive(Debug, Default)]
pub struct Noop {
    core: AnimationCore,
}

impl Animation for Noop {
    fn kind(&self) -> AnimationKind {
        Self::KIND
    }

    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }
}

impl Pooled for Noop {
    const KIND: AnimationKind = AnimationKind::new("noop");
}
