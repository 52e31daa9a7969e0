//! Concrete pooled animations that drive the [`Stage`].
//!
//! Every type here is acquired from the animation pool, configured through its
//! `setup` method and scheduled into a phase. None of them touch the arena;
//! by the time they play the turn has already been resolved.

use turn_animation::{ActorId, Animation, AnimationCore, AnimationKind, Pooled};

use crate::stage::Stage;

macro_rules! animation_core {
    () => {
        fn kind(&self) -> AnimationKind {
            Self::KIND
        }

        fn core(&self) -> &AnimationCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AnimationCore {
            &mut self.core
        }
    };
}

/// Waits a number of frames, then completes.
#[derive(Debug, Default)]
pub struct Delay {
    core: AnimationCore,
    frames: u32,
}

impl Delay {
    pub fn setup(&mut self, frames: u32) {
        self.frames = frames;
    }
}

impl Animation for Delay {
    animation_core!();

    fn animate(&mut self) {
        self.frames = self.frames.saturating_sub(1);
        if self.frames == 0 {
            self.done();
        }
    }

    fn rewind(&mut self) {
        self.frames = 0;
    }
}

impl Pooled for Delay {
    const KIND: AnimationKind = AnimationKind::new("delay");
}

/// Melee bump: the attacker steps toward its target and back.
#[derive(Debug, Default)]
pub struct Lunge {
    core: AnimationCore,
    stage: Option<Stage>,
    actor: Option<ActorId>,
    direction: i32,
    frame: usize,
}

impl Lunge {
    const OFFSETS: [i32; 4] = [1, 2, 1, 0];

    /// `direction` is `1` to lunge right and `-1` to lunge left.
    pub fn setup(&mut self, stage: Stage, actor: ActorId, direction: i32) {
        self.stage = Some(stage);
        self.actor = Some(actor);
        self.direction = direction.signum();
    }
}

impl Animation for Lunge {
    animation_core!();

    fn animate(&mut self) {
        let (Some(stage), Some(actor)) = (&self.stage, self.actor) else {
            self.done();
            return;
        };
        let offset = Self::OFFSETS[self.frame] * self.direction;
        stage.with_visual(actor, |visual| visual.offset = offset);

        self.frame += 1;
        if self.frame == Self::OFFSETS.len() {
            self.done();
        }
    }

    fn rewind(&mut self) {
        self.stage = None;
        self.actor = None;
        self.direction = 0;
        self.frame = 0;
    }
}

impl Pooled for Lunge {
    const KIND: AnimationKind = AnimationKind::new("lunge");
}

/// Ranged shot travelling from shooter to target.
#[derive(Debug, Default)]
pub struct Projectile {
    core: AnimationCore,
    stage: Option<Stage>,
    from: Option<ActorId>,
    to: Option<ActorId>,
    progress: u8,
}

impl Projectile {
    const STEP: u8 = 25;

    pub fn setup(&mut self, stage: Stage, from: ActorId, to: ActorId) {
        self.stage = Some(stage);
        self.from = Some(from);
        self.to = Some(to);
    }
}

impl Animation for Projectile {
    animation_core!();

    fn animate(&mut self) {
        let (Some(stage), Some(from), Some(to)) = (&self.stage, self.from, self.to) else {
            self.done();
            return;
        };
        self.progress = self.progress.saturating_add(Self::STEP).min(100);
        if self.progress == 100 {
            stage.set_shot(from, to, None);
            self.done();
        } else {
            stage.set_shot(from, to, Some(self.progress));
        }
    }

    fn rewind(&mut self) {
        self.stage = None;
        self.from = None;
        self.to = None;
        self.progress = 0;
    }
}

impl Pooled for Projectile {
    const KIND: AnimationKind = AnimationKind::new("projectile");
}

/// Counts an actor's displayed HP toward its real value.
///
/// The delta comes from the [`Tag`](turn_animation::Tag) and is read when the
/// animation plays, so a merge preprocess can fold several changes into one.
#[derive(Debug, Default)]
pub struct HpChange {
    core: AnimationCore,
    stage: Option<Stage>,
    shown: i32,
}

impl HpChange {
    /// HP moved on the health bar per frame.
    pub const STEP: i32 = 2;

    pub fn setup(&mut self, stage: Stage) {
        self.stage = Some(stage);
    }
}

impl Animation for HpChange {
    animation_core!();

    fn animate(&mut self) {
        let (Some(stage), Some(tag)) = (&self.stage, self.core.tag().copied()) else {
            self.done();
            return;
        };
        let remaining = tag.amount.saturating_sub(self.shown);
        let step = remaining.clamp(-Self::STEP, Self::STEP);
        stage.with_visual(tag.target, |visual| {
            visual.displayed_hp = visual.displayed_hp.saturating_add(step);
        });

        self.shown = self.shown.saturating_add(step);
        if self.shown == tag.amount {
            self.done();
        }
    }

    fn rewind(&mut self) {
        self.stage = None;
        self.shown = 0;
    }
}

impl Pooled for HpChange {
    const KIND: AnimationKind = AnimationKind::new("hp_change");
}

/// Death fade.
#[derive(Debug, Default)]
pub struct FadeOut {
    core: AnimationCore,
    stage: Option<Stage>,
    actor: Option<ActorId>,
}

impl FadeOut {
    const STEP: u8 = 25;

    pub fn setup(&mut self, stage: Stage, actor: ActorId) {
        self.stage = Some(stage);
        self.actor = Some(actor);
    }
}

impl Animation for FadeOut {
    animation_core!();

    fn animate(&mut self) {
        let (Some(stage), Some(actor)) = (&self.stage, self.actor) else {
            self.done();
            return;
        };
        let mut opacity = 0;
        stage.with_visual(actor, |visual| {
            visual.opacity = visual.opacity.saturating_sub(Self::STEP);
            opacity = visual.opacity;
        });
        if opacity == 0 {
            self.done();
        }
    }

    fn rewind(&mut self) {
        self.stage = None;
        self.actor = None;
    }
}

impl Pooled for FadeOut {
    const KIND: AnimationKind = AnimationKind::new("fade_out");
}

/// Caption shown over an actor for a few frames.
#[derive(Debug, Default)]
pub struct FloatingText {
    core: AnimationCore,
    stage: Option<Stage>,
    actor: Option<ActorId>,
    text: String,
    frames: u32,
}

impl FloatingText {
    pub fn setup(
        &mut self,
        stage: Stage,
        actor: ActorId,
        text: impl Into<String>,
        frames: u32,
    ) {
        self.stage = Some(stage);
        self.actor = Some(actor);
        self.text = text.into();
        self.frames = frames.max(1);
    }
}

impl Animation for FloatingText {
    animation_core!();

    fn animate(&mut self) {
        let (Some(stage), Some(actor)) = (&self.stage, self.actor) else {
            self.done();
            return;
        };
        self.frames = self.frames.saturating_sub(1);
        let text = &self.text;
        let expired = self.frames == 0;
        stage.with_visual(actor, |visual| {
            if expired {
                if visual.caption.as_ref() == Some(text) {
                    visual.caption = None;
                }
            } else {
                visual.caption = Some(text.clone());
            }
        });
        if expired {
            self.done();
        }
    }

    fn rewind(&mut self) {
        self.stage = None;
        self.actor = None;
        self.text.clear();
        self.frames = 0;
    }
}

impl Pooled for FloatingText {
    const KIND: AnimationKind = AnimationKind::new("floating_text");
}
