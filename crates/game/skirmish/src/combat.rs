//! Attack resolution shared by the player and NPC brains.

use thiserror::Error;
use tracing::debug;
use turn_animation::{ActorId, Animation, AnimationChain, MergeTagged, PhaseConfig, Tag};
use turn_engine::Turn;

use crate::animations::{Delay, FadeOut, FloatingText, HpChange, Lunge, Projectile};
use crate::world::{Arena, Faction};

/// Frames a damage number stays up.
const DAMAGE_TEXT_FRAMES: u32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("actor {0} cannot act")]
    Incapacitated(ActorId),

    #[error("no living target {0}")]
    InvalidTarget(ActorId),

    #[error("unrecognized command '{0}'")]
    Parse(String),
}

/// How an attack reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Strike {
    Melee,
    Ranged,
}

impl Strike {
    /// Phase the attack's travel animation plays in.
    pub fn phase(self) -> &'static str {
        match self {
            Self::Melee => PhaseConfig::MELEE_ATTACKS,
            Self::Ranged => PhaseConfig::RANGED_ATTACKS,
        }
    }
}

/// What an attack did to the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub target: ActorId,
    /// HP actually removed after clamping.
    pub damage: i32,
    pub killed: bool,
}

/// End-of-turn hook: simultaneous hits on the player show as one health bar change.
pub fn merge_hp_changes() -> MergeTagged {
    MergeTagged::hp_changes().only_player()
}

/// Resolves an attack by the acting actor against `target`.
///
/// The arena changes immediately. The visible consequences are scheduled:
/// the strike itself in its attack phase, the health bar in `END_OF_TURN`,
/// and on a kill a death chain that also plays at end of turn. A kill retires
/// the target from the turn order.
///
/// Nothing is mutated when the attack is rejected.
pub fn resolve_attack(
    turn: &mut Turn<'_, Arena>,
    target: ActorId,
    strike: Strike,
) -> Result<AttackOutcome, CommandError> {
    let attacker = turn.actor();
    let arena = turn.world();
    let Some(source) = arena.get(attacker).filter(|c| c.is_alive()) else {
        return Err(CommandError::Incapacitated(attacker));
    };
    if target == attacker || !arena.is_alive(target) {
        return Err(CommandError::InvalidTarget(target));
    }
    let power = source.attack;
    let direction = match source.faction {
        Faction::Hero => 1,
        Faction::Monster => -1,
    };
    let stage = arena.stage().clone();

    let applied = turn.world_mut().adjust_hp(target, power.saturating_neg());
    let killed = !turn.world().is_alive(target);

    let mut strike_chain = turn.acquire::<AnimationChain>();
    strike_chain.core_mut().set_owner(Some(attacker));
    match strike {
        Strike::Melee => {
            let mut lunge = turn.acquire::<Lunge>();
            lunge.setup(stage.clone(), attacker, direction);
            strike_chain.add(lunge);
        }
        Strike::Ranged => {
            let mut shot = turn.acquire::<Projectile>();
            shot.setup(stage.clone(), attacker, target);
            strike_chain.add(shot);
        }
    }
    let mut text = turn.acquire::<FloatingText>();
    text.setup(stage.clone(), target, applied.to_string(), DAMAGE_TEXT_FRAMES);
    strike_chain.add(text);
    turn.schedule(strike_chain, strike.phase());

    let mut hp = turn.acquire::<HpChange>();
    hp.setup(stage.clone());
    hp.core_mut().set_owner(Some(attacker));
    hp.core_mut().set_tag(Some(Tag::hp_change(target, applied)));
    turn.schedule(hp, PhaseConfig::END_OF_TURN);

    if killed {
        let mut death = turn.acquire::<AnimationChain>();
        let mut ko = turn.acquire::<FloatingText>();
        ko.setup(stage.clone(), target, "KO", DAMAGE_TEXT_FRAMES);
        let mut pause = turn.acquire::<Delay>();
        pause.setup(1);
        let mut fade = turn.acquire::<FadeOut>();
        fade.setup(stage, target);
        death.add(ko).add(pause).add(fade);
        turn.schedule(death, PhaseConfig::END_OF_TURN);
        turn.remove(target);
    }

    debug!(%attacker, %target, %strike, damage = -applied, killed, "attack resolved");
    Ok(AttackOutcome {
        target,
        damage: -applied,
        killed,
    })
}
