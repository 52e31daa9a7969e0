//! Session configuration and the turn loop around [`GameController`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use turn_animation::{ActorId, AnimationSystemBuilder, PhaseConfig};
use turn_engine::timeline::TURN_COST;
use turn_engine::{GameController, Timeline};

use crate::combat::{AttackOutcome, CommandError, merge_hp_changes};
use crate::error::SkirmishError;
use crate::npc::NpcKind;
use crate::player::{Command, InputQueue, InputSource, Player};
use crate::stage::Stage;
use crate::world::{Arena, Combatant, Faction};

/// The player's hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSpec {
    pub name: String,
    pub hp: i32,
    pub attack: i32,
}

impl Default for HeroSpec {
    fn default() -> Self {
        Self {
            name: "Hero".into(),
            hp: 30,
            attack: 4,
        }
    }
}

/// One roster entry. Monsters get ids in roster order, starting at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpec {
    pub name: String,
    pub kind: NpcKind,
    pub hp: i32,
    pub attack: i32,
    #[serde(default = "default_speed")]
    pub speed: u32,
}

fn default_speed() -> u32 {
    TURN_COST
}

impl MonsterSpec {
    pub fn new(name: impl Into<String>, kind: NpcKind, hp: i32, attack: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            hp,
            attack,
            speed: TURN_COST,
        }
    }
}

/// Everything needed to start a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Animation phase pipeline.
    pub phases: PhaseConfig,
    /// Frames a single turn may take to settle before the session gives up.
    pub max_frames: usize,
    pub hero: HeroSpec,
    pub monsters: Vec<MonsterSpec>,
    /// Scripted player commands, one per turn.
    pub script: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            phases: PhaseConfig::default(),
            max_frames: 200,
            hero: HeroSpec::default(),
            monsters: vec![
                MonsterSpec::new("Goblin", NpcKind::Brawler, 8, 3),
                MonsterSpec::new("Goblin", NpcKind::Brawler, 8, 3),
                MonsterSpec::new("Archer", NpcKind::Archer, 6, 2),
            ],
            script: ["shoot 3", "shoot 3", "attack 1", "attack 1", "attack 2", "attack 2"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl SessionConfig {
    /// Scripted input for this session.
    pub fn input(&self) -> Result<InputQueue, CommandError> {
        InputQueue::from_script(&self.script)
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Result of one player turn, once its animations have settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    /// Turn number, starting at 1.
    pub turn: u64,
    pub command: Command,
    /// Set when the command was an attack.
    pub attack: Option<AttackOutcome>,
    pub npc_turns: usize,
    /// Actors retired this turn, in order.
    pub removed: Vec<ActorId>,
    /// Frames played before control returned to the player.
    pub frames: usize,
}

/// A running skirmish.
pub struct Session {
    controller: GameController<Arena>,
    max_frames: usize,
}

impl Session {
    /// Wires the arena, the turn order and the animation pipeline.
    pub fn build(config: &SessionConfig) -> Result<Self, SkirmishError> {
        let mut builder = AnimationSystemBuilder::from_config(&config.phases);
        if config.phases.phases.iter().any(|p| p == PhaseConfig::END_OF_TURN) {
            builder = builder.preprocess(PhaseConfig::END_OF_TURN, merge_hp_changes());
        }
        let animations = builder.build()?;

        let mut arena = Arena::new(Stage::new());
        let hero = &config.hero;
        arena.enter(Combatant::new(
            ActorId::PLAYER,
            hero.name.as_str(),
            Faction::Hero,
            hero.hp,
            hero.attack,
        ));

        let mut timeline = Timeline::new();
        for (index, spec) in config.monsters.iter().enumerate() {
            let id = ActorId(index as u32 + 1);
            arena.enter(Combatant::new(
                id,
                spec.name.as_str(),
                Faction::Monster,
                spec.hp,
                spec.attack,
            ));
            timeline.add_actor(spec.kind.spawn(id), spec.speed);
        }

        info!(
            monsters = config.monsters.len(),
            phases = config.phases.phases.len(),
            "skirmish session built"
        );
        Ok(Self {
            controller: GameController::new(arena, Box::new(Player), timeline, animations),
            max_frames: config.max_frames,
        })
    }

    /// Plays one player turn to completion.
    pub fn play_turn(&mut self, command: Command) -> Result<TurnSummary, SkirmishError> {
        self.play_turn_with(command, |_, _| {})
    }

    /// Like [`play_turn`](Self::play_turn), calling `on_frame` with the
    /// frame number and the stage after every frame.
    ///
    /// A rejected command consumes nothing; the player may choose again.
    pub fn play_turn_with<F>(
        &mut self,
        command: Command,
        mut on_frame: F,
    ) -> Result<TurnSummary, SkirmishError>
    where
        F: FnMut(usize, &Stage),
    {
        if self.is_over() {
            return Err(SkirmishError::Over);
        }
        let attack = {
            let mut turn = self.controller.player_turn().ok_or(SkirmishError::Busy)?;
            command.resolve(&mut turn)?
        };
        let report = self
            .controller
            .end_player_turn()
            .ok_or(SkirmishError::Busy)?;

        let frames = self.play_frames(self.max_frames, &mut on_frame)?;

        Ok(TurnSummary {
            turn: self.controller.turn_number(),
            command,
            attack,
            npc_turns: report.turns,
            removed: report.removed,
            frames,
        })
    }

    /// Keeps playing a turn that exceeded its frame budget, for up to
    /// `max_frames` more frames. Returns the frames played, zero when the
    /// session is already awaiting input.
    ///
    /// After [`SkirmishError::Stalled`] the session refuses new commands with
    /// [`SkirmishError::Busy`] until this succeeds.
    pub fn settle(&mut self, max_frames: usize) -> Result<usize, SkirmishError> {
        if self.controller.is_awaiting_input() {
            return Ok(0);
        }
        self.play_frames(max_frames, &mut |_, _| {})
    }

    fn play_frames<F>(
        &mut self,
        max_frames: usize,
        on_frame: &mut F,
    ) -> Result<usize, SkirmishError>
    where
        F: FnMut(usize, &Stage),
    {
        let mut frames = 0;
        loop {
            if frames == max_frames {
                warn!(frames, "turn animations did not settle");
                return Err(SkirmishError::Stalled { frames });
            }
            frames += 1;
            let settled = self.controller.update();
            on_frame(frames, self.controller.world().stage());
            if settled {
                return Ok(frames);
            }
        }
    }

    /// Plays commands from `input` until it runs dry, the session ends or
    /// `max_turns` turns have been played. Rejected commands are skipped.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        max_turns: usize,
    ) -> Result<Vec<TurnSummary>, SkirmishError> {
        let mut summaries = Vec::new();
        while summaries.len() < max_turns && !self.is_over() {
            let Some(command) = input.next_command() else {
                break;
            };
            match self.play_turn(command) {
                Ok(summary) => summaries.push(summary),
                Err(SkirmishError::Command(err)) => warn!(%err, ?command, "command rejected"),
                Err(err) => return Err(err),
            }
        }
        Ok(summaries)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let arena = self.arena();
        if !arena.is_alive(ActorId::PLAYER) {
            Some(Outcome::Defeat)
        } else if arena.living(Faction::Monster).next().is_none() {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn turn_number(&self) -> u64 {
        self.controller.turn_number()
    }

    pub fn arena(&self) -> &Arena {
        self.controller.world()
    }

    pub fn stage(&self) -> &Stage {
        self.arena().stage()
    }

    pub fn controller(&self) -> &GameController<Arena> {
        &self.controller
    }
}
