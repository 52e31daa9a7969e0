//! Actor turn hook and the context handed to it.

use turn_animation::{ActorId, Animation, AnimationSystem, Pooled};

/// Something that takes turns.
///
/// Implementations decide what to do, mutate the world, and schedule the
/// visible consequences through the [`Turn`]. They return immediately; nothing
/// waits for animations to play.
pub trait Actor<W> {
    fn id(&self) -> ActorId;

    fn take_turn(&mut self, turn: &mut Turn<'_, W>);
}

/// Changes to the turn order requested from inside a turn.
pub(crate) struct Requests<W> {
    pub(crate) removals: Vec<ActorId>,
    pub(crate) spawns: Vec<(Box<dyn Actor<W>>, u32)>,
}

impl<W> Default for Requests<W> {
    fn default() -> Self {
        Self {
            removals: Vec::new(),
            spawns: Vec::new(),
        }
    }
}

/// Everything an actor may touch while resolving its turn.
pub struct Turn<'a, W> {
    actor: ActorId,
    world: &'a mut W,
    animations: &'a mut AnimationSystem,
    requests: &'a mut Requests<W>,
}

impl<'a, W> Turn<'a, W> {
    pub(crate) fn new(
        actor: ActorId,
        world: &'a mut W,
        animations: &'a mut AnimationSystem,
        requests: &'a mut Requests<W>,
    ) -> Self {
        Self {
            actor,
            world,
            animations,
            requests,
        }
    }

    /// The actor whose turn this is.
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn world(&self) -> &W {
        self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        self.world
    }

    pub fn animations(&mut self) -> &mut AnimationSystem {
        self.animations
    }

    /// Takes a pooled animation instance.
    pub fn acquire<T: Pooled>(&mut self) -> Box<T> {
        self.animations.acquire::<T>()
    }

    pub fn schedule(&mut self, animation: Box<dyn Animation>, phase: &str) {
        self.animations.schedule(animation, phase);
    }

    /// Retires an actor. Takes effect before anyone else acts.
    pub fn remove(&mut self, actor: ActorId) {
        self.requests.removals.push(actor);
    }

    /// Adds an actor to the turn order. It first acts in the next pass.
    pub fn spawn(&mut self, actor: Box<dyn Actor<W>>, speed: u32) {
        self.requests.spawns.push((actor, speed));
    }
}
