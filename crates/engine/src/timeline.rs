//! NPC turn order with deferred removal.

use tracing::{debug, trace};
use turn_animation::{ActorId, AnimationSystem};

use crate::actor::{Actor, Requests, Turn};

/// Energy an actor spends per turn. An actor with this speed acts once per pass.
pub const TURN_COST: u32 = 100;

struct Entry<W> {
    actor: Box<dyn Actor<W>>,
    speed: u32,
    energy: u32,
    removed: bool,
}

/// Outcome of one [`Timeline::advance_npcs`] pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Number of turns taken.
    pub turns: usize,
    /// Actors retired during the pass, in request order. May include actors
    /// that are not on the timeline (the player).
    pub removed: Vec<ActorId>,
}

/// Ordered list of NPCs eligible to take a turn.
///
/// Removal is two-phase: an actor is flagged the moment removal is requested,
/// so the pass in progress skips it, and physically swept only once the pass
/// is over. Nothing shifts under the iteration.
pub struct Timeline<W> {
    entries: Vec<Entry<W>>,
    requests: Requests<W>,
}

impl<W> Default for Timeline<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Timeline<W> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            requests: Requests::default(),
        }
    }

    /// Appends an actor to the turn order.
    pub fn add_actor(&mut self, actor: Box<dyn Actor<W>>, speed: u32) {
        trace!(actor = %actor.id(), speed, "actor joined timeline");
        self.entries.push(Entry {
            actor,
            speed,
            energy: 0,
            removed: false,
        });
    }

    /// Flags an actor for removal. Returns true if it was on the timeline.
    pub fn remove_actor(&mut self, id: ActorId) -> bool {
        let mut found = false;
        for entry in self.entries.iter_mut().filter(|e| e.actor.id() == id) {
            entry.removed = true;
            found = true;
        }
        found
    }

    /// Resolves one pass of NPC turns.
    ///
    /// Each live actor gains its speed in energy and acts for every
    /// [`TURN_COST`] it has banked. Removals requested inside a turn are
    /// flagged as soon as that turn returns; flagged actors are swept after
    /// the pass, and actors spawned during it are admitted last.
    pub fn advance_npcs(
        &mut self,
        world: &mut W,
        animations: &mut AnimationSystem,
    ) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        self.apply_removals(&mut report);

        for index in 0..self.entries.len() {
            if self.entries[index].removed {
                continue;
            }
            let entry = &mut self.entries[index];
            entry.energy = entry.energy.saturating_add(entry.speed);

            while self.entries[index].energy >= TURN_COST
                && !self.entries[index].removed
            {
                let entry = &mut self.entries[index];
                entry.energy -= TURN_COST;

                let id = entry.actor.id();
                let mut turn = Turn::new(id, world, animations, &mut self.requests);
                entry.actor.take_turn(&mut turn);
                report.turns += 1;

                self.apply_removals(&mut report);
            }
        }

        self.sweep();
        self.admit_spawns();
        debug!(
            turns = report.turns,
            removed = report.removed.len(),
            "npc pass resolved"
        );
        report
    }

    fn apply_removals(&mut self, report: &mut AdvanceReport) {
        let removals = std::mem::take(&mut self.requests.removals);
        for id in removals {
            self.remove_actor(id);
            report.removed.push(id);
        }
    }

    fn sweep(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.removed);
        let swept = before - self.entries.len();
        if swept > 0 {
            trace!(swept, "swept retired actors");
        }
    }

    fn admit_spawns(&mut self) {
        for (actor, speed) in std::mem::take(&mut self.requests.spawns) {
            self.add_actor(actor, speed);
        }
    }

    pub(crate) fn requests_mut(&mut self) -> &mut Requests<W> {
        &mut self.requests
    }

    /// Number of actors still on the list, flagged ones included until swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the actor is on the timeline and not flagged for removal.
    pub fn contains(&self, id: ActorId) -> bool {
        self.entries
            .iter()
            .any(|entry| !entry.removed && entry.actor.id() == id)
    }

    /// Live actor ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.removed)
            .map(|entry| entry.actor.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        turns: Vec<ActorId>,
    }

    struct Npc {
        id: ActorId,
        kills: Option<ActorId>,
        spawns: Option<ActorId>,
    }

    impl Npc {
        fn boxed(id: u32) -> Box<dyn Actor<Log>> {
            Box::new(Self {
                id: ActorId(id),
                kills: None,
                spawns: None,
            })
        }

        fn killer(id: u32, victim: u32) -> Box<dyn Actor<Log>> {
            Box::new(Self {
                id: ActorId(id),
                kills: Some(ActorId(victim)),
                spawns: None,
            })
        }
    }

    impl Actor<Log> for Npc {
        fn id(&self) -> ActorId {
            self.id
        }

        fn take_turn(&mut self, turn: &mut Turn<'_, Log>) {
            turn.world_mut().turns.push(self.id);
            if let Some(victim) = self.kills.take() {
                turn.remove(victim);
            }
            if let Some(child) = self.spawns.take() {
                turn.spawn(
                    Box::new(Npc {
                        id: child,
                        kills: None,
                        spawns: None,
                    }),
                    TURN_COST,
                );
            }
        }
    }

    fn animations() -> AnimationSystem {
        AnimationSystem::builder().phase("GENERAL").build().unwrap()
    }

    #[test]
    fn actors_act_in_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.add_actor(Npc::boxed(1), TURN_COST);
        timeline.add_actor(Npc::boxed(2), TURN_COST);
        timeline.add_actor(Npc::boxed(3), TURN_COST);

        let mut log = Log::default();
        let report = timeline.advance_npcs(&mut log, &mut animations());

        assert_eq!(log.turns, vec![ActorId(1), ActorId(2), ActorId(3)]);
        assert_eq!(report.turns, 3);
    }

    #[test]
    fn speed_controls_turn_frequency() {
        let mut timeline = Timeline::new();
        timeline.add_actor(Npc::boxed(1), TURN_COST * 2);
        timeline.add_actor(Npc::boxed(2), TURN_COST / 2);

        let mut log = Log::default();
        let mut system = animations();
        timeline.advance_npcs(&mut log, &mut system);
        timeline.advance_npcs(&mut log, &mut system);

        assert_eq!(
            log.turns,
            vec![ActorId(1), ActorId(1), ActorId(1), ActorId(1), ActorId(2)]
        );
    }

    #[test]
    fn actor_removed_mid_pass_does_not_act() {
        let mut timeline = Timeline::new();
        timeline.add_actor(Npc::boxed(1), TURN_COST);
        timeline.add_actor(Npc::killer(2, 3), TURN_COST);
        timeline.add_actor(Npc::boxed(3), TURN_COST);
        timeline.add_actor(Npc::boxed(4), TURN_COST);

        let mut log = Log::default();
        let report = timeline.advance_npcs(&mut log, &mut animations());

        assert_eq!(log.turns, vec![ActorId(1), ActorId(2), ActorId(4)]);
        assert_eq!(report.removed, vec![ActorId(3)]);
        assert_eq!(timeline.len(), 3);
        assert!(!timeline.contains(ActorId(3)));
    }

    #[test]
    fn actor_can_retire_an_earlier_actor_and_itself() {
        let mut timeline = Timeline::new();
        timeline.add_actor(Npc::boxed(1), TURN_COST);
        timeline.add_actor(Npc::killer(2, 1), TURN_COST);
        timeline.add_actor(Npc::killer(3, 3), TURN_COST);

        let mut log = Log::default();
        let mut system = animations();
        timeline.advance_npcs(&mut log, &mut system);
        assert_eq!(timeline.ids().collect::<Vec<_>>(), vec![ActorId(2)]);

        timeline.advance_npcs(&mut log, &mut system);
        assert_eq!(
            log.turns,
            vec![ActorId(1), ActorId(2), ActorId(3), ActorId(2)]
        );
    }

    #[test]
    fn removal_outside_a_pass_is_flagged_then_swept() {
        let mut timeline = Timeline::new();
        timeline.add_actor(Npc::boxed(1), TURN_COST);
        timeline.add_actor(Npc::boxed(2), TURN_COST);

        assert!(timeline.remove_actor(ActorId(1)));
        assert!(!timeline.remove_actor(ActorId(9)));
        assert_eq!(timeline.len(), 2);
        assert!(!timeline.contains(ActorId(1)));

        let mut log = Log::default();
        timeline.advance_npcs(&mut log, &mut animations());
        assert_eq!(log.turns, vec![ActorId(2)]);
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn spawned_actors_join_after_the_pass() {
        let mut timeline = Timeline::new();
        timeline.add_actor(
            Box::new(Npc {
                id: ActorId(1),
                kills: None,
                spawns: Some(ActorId(5)),
            }),
            TURN_COST,
        );

        let mut log = Log::default();
        let mut system = animations();
        timeline.advance_npcs(&mut log, &mut system);
        assert_eq!(log.turns, vec![ActorId(1)]);
        assert!(timeline.contains(ActorId(5)));

        timeline.advance_npcs(&mut log, &mut system);
        assert_eq!(log.turns, vec![ActorId(1), ActorId(1), ActorId(5)]);
    }
}
