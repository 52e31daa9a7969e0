//! Monster brains.

use tracing::{trace, warn};
use turn_animation::ActorId;
use turn_engine::{Actor, Turn};

use crate::combat::{Strike, resolve_attack};
use crate::world::{Arena, Faction};

/// Which brain a monster runs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NpcKind {
    Brawler,
    Archer,
}

impl NpcKind {
    pub fn spawn(self, id: ActorId) -> Box<dyn Actor<Arena>> {
        match self {
            Self::Brawler => Box::new(Brawler::new(id)),
            Self::Archer => Box::new(Archer::new(id)),
        }
    }
}

/// Walks up and hits the nearest hero.
#[derive(Debug)]
pub struct Brawler {
    id: ActorId,
}

impl Brawler {
    pub fn new(id: ActorId) -> Self {
        Self { id }
    }
}

impl Actor<Arena> for Brawler {
    fn id(&self) -> ActorId {
        self.id
    }

    fn take_turn(&mut self, turn: &mut Turn<'_, Arena>) {
        attack_first_hero(turn, Strike::Melee);
    }
}

/// Shoots the nearest hero from range.
#[derive(Debug)]
pub struct Archer {
    id: ActorId,
}

impl Archer {
    pub fn new(id: ActorId) -> Self {
        Self { id }
    }
}

impl Actor<Arena> for Archer {
    fn id(&self) -> ActorId {
        self.id
    }

    fn take_turn(&mut self, turn: &mut Turn<'_, Arena>) {
        attack_first_hero(turn, Strike::Ranged);
    }
}

fn attack_first_hero(turn: &mut Turn<'_, Arena>, strike: Strike) {
    let Some(target) = turn.world().living(Faction::Hero).map(|c| c.id).next() else {
        trace!(actor = %turn.actor(), "no hero left to attack");
        return;
    };
    if let Err(err) = resolve_attack(turn, target, strike) {
        warn!(actor = %turn.actor(), %err, "monster turn skipped");
    }
}
