use skirmish::animations::HpChange;
use skirmish::{
    Command, InputQueue, MonsterSpec, NpcKind, Outcome, Session, SessionConfig, SkirmishError,
};
use turn_animation::{ActorId, Pooled};

fn config(hero_hp: i32, hero_attack: i32, monsters: Vec<MonsterSpec>) -> SessionConfig {
    let mut config = SessionConfig {
        monsters,
        script: Vec::new(),
        ..SessionConfig::default()
    };
    config.hero.hp = hero_hp;
    config.hero.attack = hero_attack;
    config
}

fn pack() -> Vec<MonsterSpec> {
    vec![
        MonsterSpec::new("Goblin", NpcKind::Brawler, 10, 3),
        MonsterSpec::new("Goblin", NpcKind::Brawler, 10, 3),
        MonsterSpec::new("Archer", NpcKind::Archer, 10, 2),
    ]
}

fn displayed_hp(session: &Session, id: ActorId) -> Option<i32> {
    session.stage().visual(id).map(|v| v.displayed_hp)
}

#[test]
fn simultaneous_hits_on_the_hero_display_as_one_change() {
    let mut session = Session::build(&config(30, 4, pack())).unwrap();

    let summary = session.play_turn(Command::Wait).unwrap();

    assert_eq!(summary.turn, 1);
    assert_eq!(summary.npc_turns, 3);
    assert_eq!(session.arena().get(ActorId::PLAYER).map(|c| c.hp), Some(22));
    assert_eq!(displayed_hp(&session, ActorId::PLAYER), Some(22));

    // Three changes were scheduled and all of them are back in the pool.
    let pool = session.controller().animations().pool();
    assert_eq!(pool.idle(HpChange::KIND), 3);
    assert!(session.controller().animations().is_idle());
}

#[test]
fn merged_change_plays_at_the_health_bar_pace() {
    let mut one = Session::build(&config(30, 4, pack()[..1].to_vec())).unwrap();
    let mut two = Session::build(&config(30, 4, pack()[..2].to_vec())).unwrap();

    let single = one.play_turn(Command::Wait).unwrap();
    let merged = two.play_turn(Command::Wait).unwrap();

    // Both lunges play side by side. End of turn shows one -6 change, which
    // takes one step more than a lone -3.
    assert_eq!(single.frames, 12);
    assert_eq!(merged.frames, 13);
    assert_eq!(displayed_hp(&two, ActorId::PLAYER), Some(24));
}

#[test]
fn later_turns_reuse_pooled_animations() {
    let mut session = Session::build(&config(60, 1, pack())).unwrap();

    session.play_turn(Command::Shoot(ActorId(3))).unwrap();
    let created = session.controller().animations().pool().created();
    session.play_turn(Command::Shoot(ActorId(3))).unwrap();
    session.play_turn(Command::Shoot(ActorId(3))).unwrap();

    assert_eq!(session.controller().animations().pool().created(), created);
    assert_eq!(session.turn_number(), 3);
}

#[test]
fn killing_the_last_monster_wins() {
    let mut session = Session::build(&config(
        10,
        10,
        vec![MonsterSpec::new("Rat", NpcKind::Brawler, 5, 1)],
    ))
    .unwrap();

    let summary = session.play_turn(Command::Attack(ActorId(1))).unwrap();

    assert_eq!(summary.removed, vec![ActorId(1)]);
    assert_eq!(summary.npc_turns, 0);
    assert_eq!(summary.attack.map(|a| (a.damage, a.killed)), Some((5, true)));
    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert_eq!(displayed_hp(&session, ActorId(1)), Some(0));
    assert_eq!(session.stage().visual(ActorId(1)).map(|v| v.opacity), Some(0));
    assert!(session.controller().timeline().is_empty());

    assert_eq!(
        session.play_turn(Command::Wait),
        Err(SkirmishError::Over)
    );
}

#[test]
fn hero_death_is_a_defeat() {
    let mut session = Session::build(&config(
        4,
        1,
        vec![MonsterSpec::new("Ogre", NpcKind::Brawler, 50, 9)],
    ))
    .unwrap();

    let summary = session.play_turn(Command::Wait).unwrap();

    assert_eq!(summary.removed, vec![ActorId::PLAYER]);
    assert_eq!(session.outcome(), Some(Outcome::Defeat));
    assert_eq!(displayed_hp(&session, ActorId::PLAYER), Some(0));
}

#[test]
fn rejected_command_does_not_consume_the_turn() {
    let mut session = Session::build(&config(30, 4, pack())).unwrap();

    let err = session.play_turn(Command::Attack(ActorId(9))).unwrap_err();

    assert!(matches!(err, SkirmishError::Command(_)));
    assert_eq!(session.turn_number(), 0);
    assert!(session.controller().is_awaiting_input());
    assert_eq!(session.arena().get(ActorId::PLAYER).map(|c| c.hp), Some(30));
}

#[test]
fn frame_budget_reports_a_stall() {
    let mut config = config(30, 4, pack());
    config.max_frames = 1;
    let mut session = Session::build(&config).unwrap();

    assert_eq!(
        session.play_turn(Command::Wait),
        Err(SkirmishError::Stalled { frames: 1 })
    );
    assert_eq!(session.play_turn(Command::Wait), Err(SkirmishError::Busy));
}

#[test]
fn stalled_turn_can_be_settled_and_play_resumes() {
    let mut config = config(30, 4, pack());
    config.max_frames = 1;
    let mut session = Session::build(&config).unwrap();
    assert!(session.play_turn(Command::Wait).is_err());

    assert_eq!(session.settle(0), Err(SkirmishError::Stalled { frames: 0 }));
    let frames = session.settle(200).unwrap();
    assert!(frames > 0);
    assert!(session.controller().is_awaiting_input());
    assert_eq!(session.turn_number(), 1);
    assert_eq!(session.settle(200), Ok(0));

    session.settle(0).unwrap();
    let err = session.play_turn(Command::Wait).unwrap_err();
    assert_eq!(err, SkirmishError::Stalled { frames: 1 });
    session.settle(200).unwrap();
    assert_eq!(session.turn_number(), 2);
}

#[test]
fn default_session_plays_its_script_to_victory() {
    let config = SessionConfig::default();
    let mut input = config.input().unwrap();
    let mut session = Session::build(&config).unwrap();

    let summaries = session.run(&mut input, 20).unwrap();

    assert_eq!(summaries.len(), 6);
    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert_eq!(session.arena().get(ActorId::PLAYER).map(|c| c.hp), Some(4));
    assert_eq!(displayed_hp(&session, ActorId::PLAYER), Some(4));
    assert!(input.is_empty());
}

#[test]
fn run_skips_rejected_commands() {
    let mut session = Session::build(&config(30, 4, pack())).unwrap();
    let mut input = InputQueue::from_script(["attack 7", "wait", "wait"]).unwrap();

    let summaries = session.run(&mut input, 1).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].command, Command::Wait);
    assert_eq!(input.len(), 1);
}
