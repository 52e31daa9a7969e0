//! Phase registry, chain order and the per-frame drain loop.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error, trace};

use crate::{
    Animation, AnimationError, AnimationPhase, AnimationPool, ConfigError, PhaseConfig, PhaseId,
    Pooled, Preprocess,
};

/// Drives scheduled animations through a fixed, circular pipeline of phases.
///
/// # Cycle
///
/// Each [`update`](Self::update) works on the current phase:
/// - Still busy: returns `false`, the cursor stays put
/// - Drained: its animations go back to the pool and the cursor moves to the
///   successor, whose preprocess hook runs before it ticks in the same call
/// - Drained tail: the cursor wraps to the head and `true` reports that the
///   whole cycle played out
///
/// Consecutive empty phases therefore resolve within a single frame. The walk
/// is an explicit loop bounded by the number of phases.
///
/// One system is constructed per game session; nothing here is global.
pub struct AnimationSystem {
    phases: Vec<AnimationPhase>,
    index: HashMap<String, PhaseId>,
    head: PhaseId,
    current: PhaseId,
    fallback: PhaseId,
    /// Current phase has not run its preprocess hook yet this cycle.
    entering: bool,
    pool: AnimationPool,
}

impl AnimationSystem {
    pub fn builder() -> AnimationSystemBuilder {
        AnimationSystemBuilder::default()
    }

    /// Builds a system from configuration, without preprocess hooks.
    pub fn from_config(config: &PhaseConfig) -> Result<Self, ConfigError> {
        AnimationSystemBuilder::from_config(config).build()
    }

    /// Schedules one animation into the named phase.
    ///
    /// An unknown name is logged and redirected to the fallback phase; the
    /// animation is never dropped.
    pub fn schedule(&mut self, animation: Box<dyn Animation>, phase: &str) {
        let id = self.resolve(phase);
        self.phases[id.0].schedule(animation);
    }

    /// Schedules several animations into the named phase, in order.
    pub fn schedule_all<I>(&mut self, animations: I, phase: &str)
    where
        I: IntoIterator<Item = Box<dyn Animation>>,
    {
        let id = self.resolve(phase);
        self.phases[id.0].schedule_all(animations);
    }

    fn resolve(&self, name: &str) -> PhaseId {
        match self.index.get(name) {
            Some(&id) => id,
            None => {
                error!(
                    phase = name,
                    fallback = self.phases[self.fallback.0].name(),
                    "unknown animation phase; scheduling into fallback"
                );
                self.fallback
            }
        }
    }

    /// Takes an instance from the pool; see [`AnimationPool::acquire`].
    pub fn acquire<T: Pooled>(&mut self) -> Box<T> {
        self.pool.acquire::<T>()
    }

    /// Advances the pipeline by one frame.
    ///
    /// Returns `true` once the full cycle has drained and the cursor is back
    /// at the head.
    pub fn update(&mut self) -> bool {
        for _ in 0..self.phases.len() {
            let phase = &mut self.phases[self.current.0];

            if self.entering {
                self.entering = false;
                if phase.has_preprocess() {
                    trace!(phase = phase.name(), "running preprocess");
                    phase.preprocess();
                }
            }

            if !phase.update() {
                return false;
            }

            let finished = phase.drain();
            let next = phase.next();
            if !finished.is_empty() {
                debug!(phase = phase.name(), animations = finished.len(), "phase drained");
            }
            self.pool.release_all(finished);
            self.entering = true;

            match next {
                Some(next) => self.current = next,
                None => {
                    self.current = self.head;
                    trace!("animation cycle complete");
                    return true;
                }
            }
        }

        // The pipeline is linear, so the tail is always reached within
        // `phases.len()` steps from any phase.
        false
    }

    /// Calls [`update`](Self::update) until the cycle drains.
    ///
    /// Returns the number of frames it took, or [`AnimationError::Stalled`]
    /// after `max_frames` frames without draining.
    pub fn drain(&mut self, max_frames: usize) -> Result<usize, AnimationError> {
        for frame in 1..=max_frames {
            if self.update() {
                return Ok(frame);
            }
        }
        Err(AnimationError::Stalled {
            phase: self.current_phase().name().to_owned(),
            frames: max_frames,
        })
    }

    pub fn current_phase(&self) -> &AnimationPhase {
        &self.phases[self.current.0]
    }

    pub fn head(&self) -> &AnimationPhase {
        &self.phases[self.head.0]
    }

    pub fn fallback(&self) -> &AnimationPhase {
        &self.phases[self.fallback.0]
    }

    pub fn phase(&self, name: &str) -> Option<&AnimationPhase> {
        self.index.get(name).map(|id| &self.phases[id.0])
    }

    /// Phases in pipeline order.
    pub fn phases(&self) -> impl Iterator<Item = &AnimationPhase> + '_ {
        self.phases.iter()
    }

    /// Number of animations scheduled across all phases.
    pub fn pending(&self) -> usize {
        self.phases.iter().map(AnimationPhase::len).sum()
    }

    /// Returns true if nothing is scheduled anywhere.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    pub fn pool(&self) -> &AnimationPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut AnimationPool {
        &mut self.pool
    }
}

impl fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("phases", &self.phases)
            .field("current", &self.current_phase().name())
            .field("fallback", &self.fallback().name())
            .field("pool", &self.pool)
            .finish()
    }
}

/// Fluent configuration of the phase pipeline.
///
/// ```rust,ignore
/// let system = AnimationSystem::builder()
///     .phase("RANGED_ATTACKS")
///     .then("GENERAL")
///     .then("MELEE_ATTACKS")
///     .then("END_OF_TURN")
///     .fallback("GENERAL")
///     .build()?;
/// ```
#[derive(Default)]
pub struct AnimationSystemBuilder {
    names: Vec<String>,
    hooks: Vec<(String, Box<dyn Preprocess>)>,
    fallback: Option<String>,
    pool: Option<AnimationPool>,
}

impl AnimationSystemBuilder {
    pub fn from_config(config: &PhaseConfig) -> Self {
        let mut builder = Self::default();
        for name in &config.phases {
            builder = builder.then(name.as_str());
        }
        builder.fallback = config.fallback.clone();
        builder
    }

    /// Appends a phase to the pipeline. The first phase added is the head.
    #[must_use]
    pub fn phase(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Appends the successor of the previously added phase.
    #[must_use]
    pub fn then(self, name: impl Into<String>) -> Self {
        self.phase(name)
    }

    /// Attaches a preprocess hook to a phase declared anywhere in the pipeline.
    #[must_use]
    pub fn preprocess<P>(mut self, phase: impl Into<String>, hook: P) -> Self
    where
        P: Preprocess + 'static,
    {
        self.hooks.push((phase.into(), Box::new(hook)));
        self
    }

    /// Phase that receives animations scheduled under unknown names.
    #[must_use]
    pub fn fallback(mut self, phase: impl Into<String>) -> Self {
        self.fallback = Some(phase.into());
        self
    }

    /// Starts the system with an existing pool instead of an empty one.
    #[must_use]
    pub fn pool(mut self, pool: AnimationPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<AnimationSystem, ConfigError> {
        if self.names.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }

        let mut index = HashMap::with_capacity(self.names.len());
        let mut phases: Vec<AnimationPhase> = Vec::with_capacity(self.names.len());
        for (i, name) in self.names.into_iter().enumerate() {
            let id = PhaseId(i);
            if index.insert(name.clone(), id).is_some() {
                return Err(ConfigError::DuplicatePhase(name));
            }
            if let Some(previous) = phases.last_mut() {
                previous.then(id);
            }
            phases.push(AnimationPhase::new(id, name));
        }

        for (name, hook) in self.hooks {
            let id = *index.get(&name).ok_or(ConfigError::UnknownPhase(name))?;
            phases[id.0].set_preprocess(hook);
        }

        let head = PhaseId(0);
        let fallback = match self.fallback {
            Some(name) => *index.get(&name).ok_or(ConfigError::UnknownFallback(name))?,
            None => head,
        };

        debug!(
            phases = phases.len(),
            fallback = phases[fallback.0].name(),
            "animation pipeline configured"
        );

        Ok(AnimationSystem {
            phases,
            index,
            head,
            current: head,
            fallback,
            entering: true,
            pool: self.pool.unwrap_or_default(),
        })
    }
}
