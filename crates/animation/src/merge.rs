//! Merge-and-suppress preprocessing for simultaneous tagged events.

use tracing::debug;

use crate::{ActorId, Animation, Preprocess, Tag, TagKind};

type TargetFilter = Box<dyn Fn(ActorId) -> bool>;

/// Folds animations describing the same event on the same actor into one.
///
/// For every group of scheduled animations whose tags share a kind and a
/// target, the first one in schedule order survives and its amount becomes the
/// saturating sum of the whole group. The others are forced `done()` before
/// they ever tick.
///
/// # Example
///
/// ```rust,ignore
/// let system = AnimationSystem::builder()
///     .phase("GENERAL")
///     .then("END_OF_TURN")
///     .preprocess("END_OF_TURN", MergeTagged::hp_changes().only_player())
///     .build()?;
/// ```
pub struct MergeTagged {
    kinds: Vec<TagKind>,
    targets: Option<TargetFilter>,
}

impl MergeTagged {
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = TagKind>,
    {
        Self {
            kinds: kinds.into_iter().collect(),
            targets: None,
        }
    }

    /// Merges hit point changes only.
    pub fn hp_changes() -> Self {
        Self::new([TagKind::HpChange])
    }

    /// Restricts merging to targets accepted by `filter`.
    #[must_use]
    pub fn only_targets<F>(mut self, filter: F) -> Self
    where
        F: Fn(ActorId) -> bool + 'static,
    {
        self.targets = Some(Box::new(filter));
        self
    }

    /// Restricts merging to the player-controlled actor.
    #[must_use]
    pub fn only_player(self) -> Self {
        self.only_targets(ActorId::is_player)
    }

    fn applies(&self, tag: &Tag) -> bool {
        self.kinds.contains(&tag.kind)
            && self
                .targets
                .as_ref()
                .is_none_or(|accept| accept(tag.target))
    }
}

impl Preprocess for MergeTagged {
    fn preprocess(&mut self, scheduled: &mut [Box<dyn Animation>]) {
        let mut survivors: Vec<usize> = Vec::new();

        for index in 0..scheduled.len() {
            if scheduled[index].is_done() {
                continue;
            }
            let Some(tag) = scheduled[index].tag().copied() else {
                continue;
            };
            if !self.applies(&tag) {
                continue;
            }

            let survivor = survivors.iter().copied().find(|&s| {
                scheduled[s]
                    .tag()
                    .is_some_and(|existing| existing.same_event(&tag))
            });

            match survivor {
                Some(s) => {
                    if let Some(merged) = scheduled[s].tag_mut() {
                        merged.amount = merged.amount.saturating_add(tag.amount);
                        debug!(
                            kind = %tag.kind,
                            target = %tag.target,
                            total = merged.amount,
                            "merged simultaneous event"
                        );
                    }
                    scheduled[index].done();
                }
                None => survivors.push(index),
            }
        }
    }
}
