//! Authoritative combat state.
//!
//! Game logic updates the [`Arena`] immediately; the [`Stage`] catches up as
//! animations play.

use std::collections::BTreeMap;

use turn_animation::ActorId;

use crate::stage::Stage;

/// Which side a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Hero,
    Monster,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
}

impl Combatant {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        faction: Faction,
        hp: i32,
        attack: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            hp,
            max_hp: hp,
            attack,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Every combatant plus the stage their visuals live on.
#[derive(Debug, Default)]
pub struct Arena {
    combatants: BTreeMap<ActorId, Combatant>,
    stage: Stage,
}

impl Arena {
    pub fn new(stage: Stage) -> Self {
        Self {
            combatants: BTreeMap::new(),
            stage,
        }
    }

    /// Adds a combatant and its visual.
    pub fn enter(&mut self, combatant: Combatant) {
        self.stage.add(combatant.id, &combatant.name, combatant.hp);
        self.combatants.insert(combatant.id, combatant);
    }

    pub fn get(&self, id: ActorId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    /// Applies a signed HP change clamped to `0..=max_hp`.
    ///
    /// Returns the change actually applied, which is what the HP display
    /// animates.
    pub fn adjust_hp(&mut self, id: ActorId, amount: i32) -> i32 {
        let Some(combatant) = self.combatants.get_mut(&id) else {
            return 0;
        };
        let before = combatant.hp;
        combatant.hp = before.saturating_add(amount).clamp(0, combatant.max_hp);
        combatant.hp - before
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants.values()
    }

    /// Living members of `faction`, lowest id first.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .values()
            .filter(move |c| c.faction == faction && c.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_hp_clamps_and_reports_applied_change() {
        let mut arena = Arena::default();
        arena.enter(Combatant::new(ActorId(1), "Goblin", Faction::Monster, 5, 2));

        assert_eq!(arena.adjust_hp(ActorId(1), -3), -3);
        assert_eq!(arena.adjust_hp(ActorId(1), -10), -2);
        assert!(!arena.is_alive(ActorId(1)));
        assert_eq!(arena.adjust_hp(ActorId(1), 50), 5);
        assert_eq!(arena.adjust_hp(ActorId(9), -1), 0);
    }

    #[test]
    fn living_filters_by_faction() {
        let mut arena = Arena::default();
        arena.enter(Combatant::new(ActorId::PLAYER, "Hero", Faction::Hero, 10, 3));
        arena.enter(Combatant::new(ActorId(1), "Goblin", Faction::Monster, 5, 2));
        arena.enter(Combatant::new(ActorId(2), "Bat", Faction::Monster, 1, 1));
        arena.adjust_hp(ActorId(2), -1);

        let ids: Vec<ActorId> = arena.living(Faction::Monster).map(|c| c.id).collect();
        assert_eq!(ids, vec![ActorId(1)]);
        assert_eq!(arena.stage().len(), 3);
    }
}
