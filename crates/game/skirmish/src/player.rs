//! Player commands and the input collaborator.

use std::collections::VecDeque;
use std::str::FromStr;

use tracing::debug;
use turn_animation::{ActorId, PhaseConfig};
use turn_engine::{Actor, Turn};

use crate::animations::FloatingText;
use crate::combat::{AttackOutcome, CommandError, Strike, resolve_attack};
use crate::world::Arena;

/// An action the player can choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Melee attack against an adjacent monster.
    Attack(ActorId),
    /// Ranged attack.
    Shoot(ActorId),
    /// Pass the turn.
    Wait,
}

impl Command {
    /// Resolves the command for the acting player.
    pub fn resolve(
        self,
        turn: &mut Turn<'_, Arena>,
    ) -> Result<Option<AttackOutcome>, CommandError> {
        match self {
            Self::Attack(target) => resolve_attack(turn, target, Strike::Melee).map(Some),
            Self::Shoot(target) => resolve_attack(turn, target, Strike::Ranged).map(Some),
            Self::Wait => {
                let stage = turn.world().stage().clone();
                let mut text = turn.acquire::<FloatingText>();
                text.setup(stage, turn.actor(), "...", 2);
                turn.schedule(text, PhaseConfig::GENERAL);
                Ok(None)
            }
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses `attack <id>`, `shoot <id>` or `wait`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CommandError::Parse(s.to_owned());
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or_else(parse_err)?.to_ascii_lowercase();
        let target = words
            .next()
            .map(|w| w.trim_start_matches('#').parse::<u32>().map(ActorId))
            .transpose()
            .map_err(|_| parse_err())?;
        if words.next().is_some() {
            return Err(parse_err());
        }

        match (verb.as_str(), target) {
            ("attack" | "a", Some(target)) => Ok(Self::Attack(target)),
            ("shoot" | "s", Some(target)) => Ok(Self::Shoot(target)),
            ("wait" | "w", None) => Ok(Self::Wait),
            _ => Err(parse_err()),
        }
    }
}

/// Source of player commands. Keyboards and network peers live behind this.
pub trait InputSource {
    /// Next command, or `None` when the source is exhausted.
    fn next_command(&mut self) -> Option<Command>;
}

/// Scripted input, consumed front to back.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    commands: VecDeque<Command>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script of command lines.
    pub fn from_script<I, S>(lines: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands = lines
            .into_iter()
            .map(|line| line.as_ref().parse::<Command>())
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { commands })
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Moves every command of `other` to the back of this queue.
    pub fn append(&mut self, mut other: InputQueue) {
        self.commands.append(&mut other.commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl InputSource for InputQueue {
    fn next_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }
}

/// The player-controlled hero.
///
/// Its actions come from an [`InputSource`]; the turn hook only runs when
/// control comes back after the animation cycle.
#[derive(Debug)]
pub struct Player;

impl Actor<Arena> for Player {
    fn id(&self) -> ActorId {
        ActorId::PLAYER
    }

    fn take_turn(&mut self, turn: &mut Turn<'_, Arena>) {
        let hp = turn.world().get(ActorId::PLAYER).map_or(0, |c| c.hp);
        debug!(hp, "player to act");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("attack 2".parse::<Command>(), Ok(Command::Attack(ActorId(2))));
        assert_eq!("S #3".parse::<Command>(), Ok(Command::Shoot(ActorId(3))));
        assert_eq!(" wait ".parse::<Command>(), Ok(Command::Wait));
    }

    #[test]
    fn rejects_malformed_commands() {
        for line in ["", "attack", "wait 1", "shoot x", "dance 1", "attack 1 2"] {
            assert_eq!(
                line.parse::<Command>(),
                Err(CommandError::Parse(line.to_owned())),
                "{line:?}"
            );
        }
    }

    #[test]
    fn queue_replays_script_in_order() {
        let mut queue = InputQueue::from_script(["shoot 1", "wait"]).unwrap();
        queue.append(InputQueue::from_script(["a 2"]).unwrap());

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_command(), Some(Command::Shoot(ActorId(1))));
        assert_eq!(queue.next_command(), Some(Command::Wait));
        assert_eq!(queue.next_command(), Some(Command::Attack(ActorId(2))));
        assert_eq!(queue.next_command(), None);
        assert!(InputQueue::from_script(["jump"]).is_err());
    }
}
