//! Alternation between player input and animation playback.

use tracing::{debug, warn};
use turn_animation::{ActorId, AnimationSystem};

use crate::{Actor, AdvanceReport, Timeline, Turn};

/// What the controller is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ControllerState {
    /// The player may act.
    AwaitingInput,
    /// The last turn's consequences are still playing.
    Animating,
}

/// Top-level driver for one game session.
///
/// Owns the world, the NPC [`Timeline`], the [`AnimationSystem`] and the
/// player actor, so independent sessions never share state.
///
/// # Flow
///
/// 1. While awaiting input, the input layer resolves the player's action
///    through [`player_turn`](Self::player_turn)
/// 2. [`end_player_turn`](Self::end_player_turn) resolves every NPC turn
///    synchronously, before anything plays
/// 3. [`update`](Self::update) runs once per frame; when the animation cycle
///    drains the player's turn hook runs and input is accepted again
pub struct GameController<W> {
    state: ControllerState,
    world: W,
    player: Box<dyn Actor<W>>,
    timeline: Timeline<W>,
    animations: AnimationSystem,
    turn: u64,
}

impl<W> GameController<W> {
    pub fn new(
        world: W,
        player: Box<dyn Actor<W>>,
        timeline: Timeline<W>,
        animations: AnimationSystem,
    ) -> Self {
        Self {
            state: ControllerState::AwaitingInput,
            world,
            player,
            timeline,
            animations,
            turn: 0,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.state == ControllerState::AwaitingInput
    }

    /// Number of completed player turns.
    pub fn turn_number(&self) -> u64 {
        self.turn
    }

    pub fn player_id(&self) -> ActorId {
        self.player.id()
    }

    /// Context for resolving the player's action. `None` while animating.
    pub fn player_turn(&mut self) -> Option<Turn<'_, W>> {
        if !self.is_awaiting_input() {
            return None;
        }
        Some(Turn::new(
            self.player.id(),
            &mut self.world,
            &mut self.animations,
            self.timeline.requests_mut(),
        ))
    }

    /// Resolves all NPC turns and starts playing the results.
    ///
    /// Ignored (returns `None`) while the previous turn is still animating.
    pub fn end_player_turn(&mut self) -> Option<AdvanceReport> {
        if !self.is_awaiting_input() {
            warn!(state = %self.state, "turn ended while not awaiting input; ignoring");
            return None;
        }

        let report = self
            .timeline
            .advance_npcs(&mut self.world, &mut self.animations);
        self.state = ControllerState::Animating;
        debug!(turn = self.turn, npc_turns = report.turns, "player turn ended");
        Some(report)
    }

    /// Advances one frame. Returns true on the frame control returns to input.
    pub fn update(&mut self) -> bool {
        if self.state == ControllerState::AwaitingInput {
            return false;
        }
        if !self.animations.update() {
            return false;
        }

        self.turn += 1;
        let mut turn = Turn::new(
            self.player.id(),
            &mut self.world,
            &mut self.animations,
            self.timeline.requests_mut(),
        );
        self.player.take_turn(&mut turn);
        self.state = ControllerState::AwaitingInput;
        debug!(turn = self.turn, "animations drained; awaiting input");
        true
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn timeline(&self) -> &Timeline<W> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline<W> {
        &mut self.timeline
    }

    pub fn animations(&self) -> &AnimationSystem {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationSystem {
        &mut self.animations
    }
}
