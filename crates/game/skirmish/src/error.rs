use thiserror::Error;
use turn_animation::ConfigError;

use crate::combat::CommandError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SkirmishError {
    #[error("invalid phase pipeline: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("the skirmish is over")]
    Over,

    #[error("the previous turn is still animating")]
    Busy,

    #[error("animations did not settle within {frames} frames")]
    Stalled { frames: usize },
}
