//! Free lists of reusable animation instances.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::{Animation, AnimationKind, Pooled};

/// Idle animation instances keyed by [`AnimationKind`].
///
/// An instance is either idle here or owned by exactly one phase or chain.
/// Moving a `Box` between the two is the whole resource-transfer discipline,
/// so an instance can never be released while something else still holds it.
#[derive(Default)]
pub struct AnimationPool {
    free: HashMap<AnimationKind, Vec<Box<dyn Animation>>>,
    created: usize,
}

impl AnimationPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a ready-to-use instance of `T`.
    ///
    /// An idle instance is reused (and reset) when available, otherwise a new
    /// one is constructed. The result always reports `is_done() == false`.
    pub fn acquire<T: Pooled>(&mut self) -> Box<T> {
        while let Some(idle) = self.free.get_mut(&T::KIND).and_then(Vec::pop) {
            match idle.into_any().downcast::<T>() {
                Ok(mut reused) => {
                    reused.reset();
                    trace!(kind = %T::KIND, "reusing pooled animation");
                    return reused;
                }
                Err(_) => {
                    warn!(
                        kind = %T::KIND,
                        requested = std::any::type_name::<T>(),
                        "pooled instance has a different concrete type; discarding"
                    );
                }
            }
        }

        self.created += 1;
        Box::default()
    }

    /// Returns an animation and every animation it owns to the free lists.
    ///
    /// Composites (those reporting [`Animation::is_chain`]) give up their
    /// children first, depth-first, so nested chains are fully emptied before
    /// the outer chain becomes idle. Leaves are filed as they are.
    pub fn release(&mut self, mut animation: Box<dyn Animation>) {
        if animation.is_chain() {
            for child in animation.take_children() {
                self.release(child);
            }
        }

        self.free
            .entry(animation.kind())
            .or_default()
            .push(animation);
    }

    /// Releases every animation yielded by the iterator.
    pub fn release_all<I>(&mut self, animations: I)
    where
        I: IntoIterator<Item = Box<dyn Animation>>,
    {
        for animation in animations {
            self.release(animation);
        }
    }

    /// Number of idle instances of `kind`.
    pub fn idle(&self, kind: AnimationKind) -> usize {
        self.free.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of idle instances across all kinds.
    pub fn total_idle(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    /// Number of instances constructed because no idle one was available.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Drops every idle instance.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl std::fmt::Debug for AnimationPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationPool")
            .field("kinds", &self.free.len())
            .field("idle", &self.total_idle())
            .field("created", &self.created)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnimationChain, AnimationCore, Noop};

    #[derive(Default)]
    struct Blink {
        core: AnimationCore,
        frames: u32,
    }

    impl Animation for Blink {
        fn kind(&self) -> AnimationKind {
            Self::KIND
        }

        fn core(&self) -> &AnimationCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AnimationCore {
            &mut self.core
        }

        fn animate(&mut self) {
            self.frames += 1;
            if self.frames >= 2 {
                self.done();
            }
        }

        fn rewind(&mut self) {
            self.frames = 0;
        }
    }

    impl Pooled for Blink {
        const KIND: AnimationKind = AnimationKind::new("blink");
    }

    /// Shares `Blink`'s kind but is a different type.
    #[derive(Default)]
    struct Impostor {
        core: AnimationCore,
    }

    impl Animation for Impostor {
        fn kind(&self) -> AnimationKind {
            Blink::KIND
        }

        fn core(&self) -> &AnimationCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AnimationCore {
            &mut self.core
        }
    }

    #[test]
    fn acquire_constructs_when_empty() {
        let mut pool = AnimationPool::new();
        let blink = pool.acquire::<Blink>();
        assert!(!blink.is_done());
        assert_eq!(pool.created(), 1);
    }

    #[test]
    fn released_instance_is_reused_and_reset() {
        let mut pool = AnimationPool::new();
        let mut blink = pool.acquire::<Blink>();
        while !blink.tick() {}
        assert!(blink.is_done());

        pool.release(blink);
        assert_eq!(pool.idle(Blink::KIND), 1);

        let again = pool.acquire::<Blink>();
        assert!(!again.is_done());
        assert_eq!(again.frames, 0);
        assert_eq!(pool.idle(Blink::KIND), 0);
        assert_eq!(pool.created(), 1);
    }

    #[test]
    fn release_recurses_into_nested_chains() {
        let mut pool = AnimationPool::new();

        let mut inner = pool.acquire::<AnimationChain>();
        inner.add(pool.acquire::<Blink>());
        inner.add(pool.acquire::<Noop>());

        let mut outer = pool.acquire::<AnimationChain>();
        outer.add(pool.acquire::<Blink>());
        outer.add(inner);

        // Partially played: children are released regardless of done state.
        outer.tick();
        pool.release(outer);

        assert_eq!(pool.idle(AnimationChain::KIND), 2);
        assert_eq!(pool.idle(Blink::KIND), 2);
        assert_eq!(pool.idle(Noop::KIND), 1);

        let chain = pool.acquire::<AnimationChain>();
        assert!(chain.is_empty());
        assert!(!chain.is_done());
        let blink = pool.acquire::<Blink>();
        assert_eq!(blink.frames, 0);
        assert!(!blink.is_done());
    }

    /// Leaf that counts how often the pool asks for its children.
    #[derive(Default)]
    struct Spark {
        core: AnimationCore,
        asked: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl Animation for Spark {
        fn kind(&self) -> AnimationKind {
            AnimationKind::new("spark")
        }

        fn core(&self) -> &AnimationCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AnimationCore {
            &mut self.core
        }

        fn take_children(&mut self) -> Vec<Box<dyn Animation>> {
            self.asked.set(self.asked.get() + 1);
            Vec::new()
        }
    }

    #[test]
    fn only_chains_are_asked_for_children() {
        let mut pool = AnimationPool::new();
        let spark = Spark::default();
        let asked = std::rc::Rc::clone(&spark.asked);

        pool.release(Box::new(spark));
        assert_eq!(asked.get(), 0);
        assert_eq!(pool.idle(AnimationKind::new("spark")), 1);

        let mut chain = pool.acquire::<AnimationChain>();
        let spark = Spark::default();
        let nested = std::rc::Rc::clone(&spark.asked);
        chain.add(Box::new(spark));
        pool.release(chain);
        assert_eq!(nested.get(), 0);
        assert_eq!(pool.idle(AnimationKind::new("spark")), 2);
        assert_eq!(pool.idle(AnimationChain::KIND), 1);
    }

    #[test]
    fn mismatched_instance_is_discarded() {
        let mut pool = AnimationPool::new();
        pool.release(Box::new(Impostor::default()));
        assert_eq!(pool.idle(Blink::KIND), 1);

        let blink = pool.acquire::<Blink>();
        assert!(!blink.is_done());
        assert_eq!(pool.idle(Blink::KIND), 0);
        assert_eq!(pool.created(), 1);
    }
}
