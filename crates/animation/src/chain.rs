//! Composite animation running its children strictly in sequence.

use crate::{Animation, AnimationCore, AnimationKind, Pooled};

/// Runs child animations one after another.
///
/// # Semantics
///
/// Each tick inspects the child at `current_index`:
/// - No child there: the chain itself completes
/// - Otherwise the child is ticked once; if it reports done the index moves on
///
/// The next child only starts advancing on the following tick, so no two
/// children ever advance within the same outer tick. Children can be appended
/// while the chain is already playing.
#[derive(Default)]
pub struct AnimationChain {
    core: AnimationCore,
    children: Vec<Box<dyn Animation>>,
    current_index: usize,
}

impl AnimationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one animation to the end of the sequence.
    pub fn add(&mut self, animation: Box<dyn Animation>) -> &mut Self {
        self.children.push(animation);
        self
    }

    /// Appends several animations, preserving their order.
    pub fn extend<I>(&mut self, animations: I) -> &mut Self
    where
        I: IntoIterator<Item = Box<dyn Animation>>,
    {
        self.children.extend(animations);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the child currently playing.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn Animation> + '_ {
        self.children.iter().map(|child| child.as_ref())
    }
}

impl Animation for AnimationChain {
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
        let Some(child) = self.children.get_mut(self.current_index) else {
            self.done();
            return;
        };

        if child.tick() {
            self.current_index += 1;
        }
    }

    fn rewind(&mut self) {
        // Children are normally gone already (moved to the pool on release).
        self.children.clear();
        self.current_index = 0;
    }

    fn is_chain(&self) -> bool {
        true
    }

    fn take_children(&mut self) -> Vec<Box<dyn Animation>> {
        self.current_index = 0;
        std::mem::take(&mut self.children)
    }
}

impl Pooled for AnimationChain {
    const KIND: AnimationKind = AnimationKind::new("chain");
}
