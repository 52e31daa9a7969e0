//! Named buckets of animations that drain together.

use std::fmt;

use crate::Animation;

/// Index of a phase inside its [`AnimationSystem`](crate::AnimationSystem).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhaseId(pub(crate) usize);

impl PhaseId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Hook run once when a phase becomes current, before anything in it ticks.
///
/// Typical use is reconciling logically simultaneous events: fold duplicates
/// into one survivor and force the rest `done()` so they never play.
pub trait Preprocess {
    fn preprocess(&mut self, scheduled: &mut [Box<dyn Animation>]);
}

impl<F> Preprocess for F
where
    F: FnMut(&mut [Box<dyn Animation>]),
{
    fn preprocess(&mut self, scheduled: &mut [Box<dyn Animation>]) {
        self(scheduled)
    }
}

/// A named, ordered bucket of animations for the current resolution cycle.
///
/// # Lifecycle
///
/// `EMPTY → FILLING (schedule) → DRAINING (update) → EMPTY`
///
/// The successor link is wired once at configuration time and forms a fixed
/// pipeline; nothing rewires it afterwards.
pub struct AnimationPhase {
    id: PhaseId,
    name: String,
    scheduled: Vec<Box<dyn Animation>>,
    next: Option<PhaseId>,
    preprocess: Option<Box<dyn Preprocess>>,
}

impl AnimationPhase {
    pub(crate) fn new(id: PhaseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scheduled: Vec::new(),
            next: None,
            preprocess: None,
        }
    }

    pub fn id(&self) -> PhaseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Successor in the pipeline, `None` for the tail.
    pub fn next(&self) -> Option<PhaseId> {
        self.next
    }

    /// Wires `next` as this phase's successor and returns it for fluent wiring.
    pub fn then(&mut self, next: PhaseId) -> PhaseId {
        self.next = Some(next);
        next
    }

    pub(crate) fn set_preprocess(&mut self, hook: Box<dyn Preprocess>) {
        self.preprocess = Some(hook);
    }

    pub fn has_preprocess(&self) -> bool {
        self.preprocess.is_some()
    }

    /// Appends one animation to this cycle's schedule.
    pub fn schedule(&mut self, animation: Box<dyn Animation>) {
        self.scheduled.push(animation);
    }

    pub fn schedule_all<I>(&mut self, animations: I)
    where
        I: IntoIterator<Item = Box<dyn Animation>>,
    {
        self.scheduled.extend(animations);
    }

    /// Runs the preprocess hook, if any, over the scheduled animations.
    pub fn preprocess(&mut self) {
        if let Some(hook) = self.preprocess.as_mut() {
            hook.preprocess(&mut self.scheduled);
        }
    }

    /// Ticks every animation that is not yet done, once, in schedule order.
    ///
    /// Returns `true` when the call found nothing left to tick. The frame in
    /// which the last animation completes still counts as in progress, so its
    /// final step stays on screen for one frame before the phase reports
    /// drained.
    pub fn update(&mut self) -> bool {
        let mut ticked = false;
        for animation in self.scheduled.iter_mut() {
            if !animation.is_done() {
                animation.tick();
                ticked = true;
            }
        }
        !ticked
    }

    /// Removes this cycle's animations, leaving the phase empty.
    pub(crate) fn drain(&mut self) -> Vec<Box<dyn Animation>> {
        std::mem::take(&mut self.scheduled)
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &dyn Animation> + '_ {
        self.scheduled.iter().map(|animation| animation.as_ref())
    }
}

impl fmt::Debug for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationPhase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("scheduled", &self.scheduled.len())
            .field("next", &self.next)
            .field("preprocess", &self.preprocess.is_some())
            .finish()
    }
}
