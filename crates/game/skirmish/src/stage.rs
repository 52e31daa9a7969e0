//! Headless rendering collaborator.
//!
//! The stage holds what the player would see: where each actor is drawn, how
//! opaque it is, the HP its health bar shows and any floating caption.
//! Animations mutate it; the scheduler never touches it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use turn_animation::ActorId;

/// Visible state of one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visual {
    pub name: String,
    /// Horizontal displacement from the resting spot, in cells.
    pub offset: i32,
    /// 0 (invisible) to 100 (fully drawn).
    pub opacity: u8,
    /// HP shown on the health bar; lags the arena until animations catch up.
    pub displayed_hp: i32,
    pub caption: Option<String>,
}

/// A projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shot {
    pub from: ActorId,
    pub to: ActorId,
    /// Percentage of the path covered.
    pub progress: u8,
}

#[derive(Debug, Default)]
struct StageState {
    visuals: BTreeMap<ActorId, Visual>,
    shots: Vec<Shot>,
}

/// Shared handle to the stage. Cloning shares the same state.
#[derive(Clone, Debug, Default)]
pub struct Stage(Rc<RefCell<StageState>>);

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: ActorId, name: &str, hp: i32) {
        self.0.borrow_mut().visuals.insert(
            id,
            Visual {
                name: name.to_owned(),
                offset: 0,
                opacity: 100,
                displayed_hp: hp,
                caption: None,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.0.borrow().visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one actor's visual.
    pub fn visual(&self, id: ActorId) -> Option<Visual> {
        self.0.borrow().visuals.get(&id).cloned()
    }

    /// Mutates one actor's visual in place. Unknown actors are ignored.
    pub fn with_visual<F>(&self, id: ActorId, f: F)
    where
        F: FnOnce(&mut Visual),
    {
        if let Some(visual) = self.0.borrow_mut().visuals.get_mut(&id) {
            f(visual);
        }
    }

    /// Starts, moves or (with `None`) clears the shot from `from` to `to`.
    pub fn set_shot(&self, from: ActorId, to: ActorId, progress: Option<u8>) {
        let mut state = self.0.borrow_mut();
        state.shots.retain(|s| !(s.from == from && s.to == to));
        if let Some(progress) = progress {
            state.shots.push(Shot { from, to, progress });
        }
    }

    pub fn shots(&self) -> Vec<Shot> {
        self.0.borrow().shots.clone()
    }

    /// One-line text rendering, e.g. `Hero[30] >Goblin[4] "-3"`.
    pub fn render(&self) -> String {
        let state = self.0.borrow();
        let mut line = String::new();
        for visual in state.visuals.values().filter(|v| v.opacity > 0) {
            if !line.is_empty() {
                line.push(' ');
            }
            match visual.offset {
                0 => {}
                o if o > 0 => line.push_str(&">".repeat(o as usize)),
                o => line.push_str(&"<".repeat(o.unsigned_abs() as usize)),
            }
            line.push_str(&format!("{}[{}]", visual.name, visual.displayed_hp));
            if visual.opacity < 100 {
                line.push_str(&format!("~{}%", visual.opacity));
            }
            if let Some(caption) = &visual.caption {
                line.push_str(&format!(" \"{caption}\""));
            }
        }
        for shot in &state.shots {
            line.push_str(&format!(" {}->{}@{}%", shot.from, shot.to, shot.progress));
        }
        line
    }
}
