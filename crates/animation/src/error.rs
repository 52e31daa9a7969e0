//! Error types for pipeline configuration and draining.

/// Errors raised while building an [`AnimationSystem`](crate::AnimationSystem).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("phase pipeline must contain at least one phase")]
    EmptyPipeline,

    #[error("phase `{0}` is declared more than once")]
    DuplicatePhase(String),

    #[error("fallback phase `{0}` is not part of the pipeline")]
    UnknownFallback(String),

    #[error("cannot attach a preprocess hook to unknown phase `{0}`")]
    UnknownPhase(String),
}

/// Errors reported by drain helpers.
///
/// The per-frame [`update`](crate::AnimationSystem::update) never fails; a
/// stalled animation simply keeps its phase busy. [`drain`](crate::AnimationSystem::drain)
/// bounds that wait so tests and tools can detect it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("cycle still busy in phase `{phase}` after {frames} frames")]
    Stalled { phase: String, frames: usize },
}
