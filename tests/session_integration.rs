//! Whole-session tests: a world built by `init_world` and driven through the
//! real schedule with scripted input.

use bevy_ecs::prelude::*;
use glam::Vec2;

use timeshift::components::bullet::Bullet;
use timeshift::components::enemy::EnemyAi;
use timeshift::components::faction::Faction;
use timeshift::components::mapposition::MapPosition;
use timeshift::components::pooled::Inactive;
use timeshift::components::rotation::Rotation;
use timeshift::components::timedilation::{DilationState, TimeDilation};
use timeshift::game::{build_schedule, init_world, reset_session, tick};
use timeshift::resources::arena::ArenaLayout;
use timeshift::resources::deferred::{DeferredAction, DeferredQueue};
use timeshift::resources::gameconfig::GameConfig;
use timeshift::resources::gamestate::{GameState, GameStates};
use timeshift::resources::input::InputFrame;
use timeshift::resources::pool::{EntityPools, PoolKind};
use timeshift::resources::session::Session;
use timeshift::resources::timeauthority::TimeAuthority;
use timeshift::resources::worldtime::WorldTime;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn open_arena() -> ArenaLayout {
    ArenaLayout::from_json_str(
        r#"{ "min": [-10, -10], "max": [10, 10], "player_start": [0, 0] }"#,
    )
    .unwrap()
}

/// The open arena plus the given walls, as JSON objects.
fn walled_arena(walls: &str) -> ArenaLayout {
    ArenaLayout::from_json_str(&format!(
        r#"{{ "min": [-10, -10], "max": [10, 10], "player_start": [0, 0], "walls": [{walls}] }}"#
    ))
    .unwrap()
}

fn start_session(layout: ArenaLayout) -> (World, Schedule) {
    start_session_with_enemies(layout, 1)
}

fn start_session_with_enemies(layout: ArenaLayout, enemies: usize) -> (World, Schedule) {
    let mut config = GameConfig::new();
    config.pools.enemy = enemies;
    let mut world = World::new();
    init_world(&mut world, config, layout, Some(11));
    (world, build_schedule())
}

fn the_enemy(world: &mut World) -> Entity {
    let mut q = world.query_filtered::<Entity, (With<EnemyAi>, Without<Inactive>)>();
    q.iter(world).next().unwrap()
}

fn live_enemies(world: &mut World) -> Vec<Entity> {
    let mut q = world.query_filtered::<Entity, (With<EnemyAi>, Without<Inactive>)>();
    q.iter(world).collect()
}

fn live_bullets(world: &mut World) -> Vec<(Entity, Faction, Vec2)> {
    let mut q = world
        .query_filtered::<(Entity, &Faction, &MapPosition), (With<Bullet>, Without<Inactive>)>();
    q.iter(world).map(|(e, f, p)| (e, *f, p.pos)).collect()
}

fn player(world: &World) -> Entity {
    world.resource::<Session>().player.unwrap()
}

fn place(world: &mut World, entity: Entity, x: f32, y: f32) {
    world.get_mut::<MapPosition>(entity).unwrap().pos = Vec2::new(x, y);
}

fn step(world: &mut World, schedule: &mut Schedule, input: InputFrame) {
    world.insert_resource(input);
    tick(world, schedule, DT);
}

fn attack() -> InputFrame {
    InputFrame {
        attack: true,
        ..Default::default()
    }
}

fn dilation() -> InputFrame {
    InputFrame {
        dilation: true,
        ..Default::default()
    }
}

/// Hold dilation for a tick, then press attack to dash.
fn dash(world: &mut World, schedule: &mut Schedule) {
    step(world, schedule, dilation());
    step(
        world,
        schedule,
        InputFrame {
            attack: true,
            ..dilation()
        },
    );
}

#[test]
fn setup_builds_a_playable_session() {
    let (mut world, _schedule) = start_session(open_arena());
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    assert_eq!(world.resource::<Session>().live_enemies, 1);

    let pools = world.resource::<EntityPools>();
    assert_eq!(pools.len(PoolKind::Bullet), 10);
    assert_eq!(pools.active_count(PoolKind::Enemy), 1);
    assert_eq!(pools.active_count(PoolKind::Bullet), 0);

    let enemy = the_enemy(&mut world);
    let pos = world.get::<MapPosition>(enemy).unwrap().pos;
    assert!(pos.length() >= 4.0, "enemy placed too close: {pos:?}");
}

#[test]
fn one_slash_defeats_the_last_enemy_and_wins() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    // Player faces +Y; the slash lands one unit in front.
    place(&mut world, enemy, 0.0, 1.5);

    step(&mut world, &mut schedule, attack());

    let session = world.resource::<Session>();
    assert!(session.won);
    assert_eq!(session.live_enemies, 0);
    assert_eq!(session.defeats, 1);
    assert!(!world.resource::<EntityPools>().is_active(enemy));
    assert!(world.get::<Inactive>(enemy).is_some());

    let authority = world.resource::<TimeAuthority>();
    assert_eq!(authority.base_scale(), 0.0);
    assert!(authority.is_fully_paused());
    assert!(authority.is_hitstop_active());

    step(&mut world, &mut schedule, InputFrame::default());
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Won);
    let time = world.resource::<WorldTime>();
    assert_eq!(time.delta, 0.0);
    assert_eq!(time.real_delta, 0.0);
}

#[test]
fn slash_reflects_an_incoming_bullet() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 9.0, 9.0);

    let bullet = world.resource_scope(|world, mut pools: Mut<EntityPools>| {
        let mut commands = world.commands();
        pools.acquire(PoolKind::Bullet, &mut commands).unwrap()
    });
    world.flush();
    world.entity_mut(bullet).insert((
        MapPosition::new(0.0, 1.5),
        Rotation::new(180.0),
        Faction::Enemy,
    ));

    step(&mut world, &mut schedule, attack());

    assert_eq!(*world.get::<Faction>(bullet).unwrap(), Faction::Player);
    let heading = world.get::<Rotation>(bullet).unwrap().degrees;
    assert!(heading.abs() < EPSILON, "heading = {heading}");
    assert!((world.get::<Bullet>(bullet).unwrap().speed - 24.0).abs() < EPSILON);

    let authority = world.resource::<TimeAuthority>();
    let hitstop = authority.hitstop().unwrap();
    assert!((hitstop.duration - 0.1).abs() < EPSILON);
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::HitVfx), 1);
    assert!(!world.resource::<Session>().is_over());

    // No presenter is attached, so the hit effect ends on the next tick.
    step(&mut world, &mut schedule, InputFrame::default());
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::HitVfx), 0);
}

#[test]
fn dilation_slows_time_until_released() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 9.0, 9.0);
    let hold = InputFrame {
        dilation: true,
        ..Default::default()
    };

    step(&mut world, &mut schedule, hold);
    let player = player(&world);
    assert_eq!(
        world.get::<TimeDilation>(player).unwrap().state(),
        DilationState::Active
    );
    assert!((world.resource::<TimeAuthority>().base_scale() - 0.2).abs() < EPSILON);

    step(&mut world, &mut schedule, hold);
    let time = world.resource::<WorldTime>();
    assert!((time.time_scale - 0.2).abs() < EPSILON);
    assert!((time.delta - DT * 0.2).abs() < EPSILON);

    step(&mut world, &mut schedule, InputFrame::default());
    assert_eq!(
        world.get::<TimeDilation>(player).unwrap().state(),
        DilationState::Recovering
    );
    assert_eq!(world.resource::<TimeAuthority>().base_scale(), 1.0);
}

#[test]
fn held_dilation_roots_the_player() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 9.0, 9.0);
    let player = player(&world);

    step(
        &mut world,
        &mut schedule,
        InputFrame {
            move_vector: Vec2::X,
            dilation: true,
            ..Default::default()
        },
    );
    assert_eq!(world.get::<MapPosition>(player).unwrap().pos, Vec2::ZERO);

    step(
        &mut world,
        &mut schedule,
        InputFrame {
            move_vector: Vec2::X,
            ..Default::default()
        },
    );
    assert!(world.get::<MapPosition>(player).unwrap().pos.x > 0.0);
}

#[test]
fn pause_toggle_freezes_both_clocks() {
    let (mut world, mut schedule) = start_session(open_arena());
    let pause = InputFrame {
        pause: true,
        ..Default::default()
    };

    step(&mut world, &mut schedule, pause);
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Paused);
    assert!(world.resource::<TimeAuthority>().is_fully_paused());

    step(&mut world, &mut schedule, InputFrame::default());
    let time = world.resource::<WorldTime>();
    assert_eq!(time.delta, 0.0);
    assert_eq!(time.real_delta, 0.0);

    step(&mut world, &mut schedule, pause);
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    let authority = world.resource::<TimeAuthority>();
    assert!(!authority.is_fully_paused());
    assert_eq!(authority.base_scale(), 1.0);
}

#[test]
fn reset_gives_a_fresh_session() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 1.5);
    step(&mut world, &mut schedule, attack());
    assert!(world.resource::<Session>().won);

    reset_session(&mut world);

    let session = world.resource::<Session>();
    assert!(!session.is_over());
    assert_eq!(session.live_enemies, 1);
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    let authority = world.resource::<TimeAuthority>();
    assert_eq!(authority.effective_scale(), 1.0);
    assert!(!authority.is_hitstop_active());
    assert!(world.get_entity(enemy).is_err());
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::Enemy), 1);

    step(&mut world, &mut schedule, InputFrame::default());
    assert!(world.resource::<WorldTime>().delta > 0.0);
}

#[test]
fn misconfigured_pool_is_disabled_without_breaking_the_session() {
    let layout = ArenaLayout::from_json_str(
        r#"{ "min": [-10, -10], "max": [10, 10], "player_start": [0, 0],
             "templates": { "slash": "bullet" } }"#,
    )
    .unwrap();
    let (mut world, mut schedule) = start_session(layout);
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 1.5);

    assert!(world.resource::<EntityPools>().is_disabled(PoolKind::Slash));
    assert!(!world.resource::<EntityPools>().is_disabled(PoolKind::Bullet));

    for i in 0..6 {
        let input = if i % 2 == 0 { attack() } else { InputFrame::default() };
        step(&mut world, &mut schedule, input);
    }
    assert_eq!(world.resource::<EntityPools>().len(PoolKind::Slash), 0);
    assert_eq!(world.resource::<Session>().live_enemies, 1);
}

#[test]
fn dash_sweeps_through_an_enemy_and_teleports() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 4.0);
    let player = player(&world);
    let hold = InputFrame {
        dilation: true,
        ..Default::default()
    };

    step(&mut world, &mut schedule, hold);
    step(
        &mut world,
        &mut schedule,
        InputFrame {
            attack: true,
            ..hold
        },
    );

    let pos = world.get::<MapPosition>(player).unwrap().pos;
    assert!(pos.x.abs() < EPSILON);
    assert!((pos.y - 6.0).abs() < EPSILON, "y = {}", pos.y);
    let dilation = world.get::<TimeDilation>(player).unwrap();
    assert_eq!(dilation.state(), DilationState::Recovering);
    assert_eq!(dilation.energy.ratio(), 0.0);
    assert!(world.resource::<Session>().won);
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::DashEffect), 1);
}

#[test]
fn dash_stops_short_of_a_wall_across_its_path() {
    // Wall spanning y = 3..3.5 right in front of the player.
    let (mut world, mut schedule) =
        start_session(walled_arena(r#"{ "x": -2, "y": 3, "width": 4, "height": 0.5 }"#));
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 5.0);
    let player = player(&world);

    dash(&mut world, &mut schedule);

    let pos = world.get::<MapPosition>(player).unwrap().pos;
    assert!(pos.x.abs() < EPSILON);
    // Body radius 0.4 short of the wall face.
    assert!((pos.y - 2.6).abs() < EPSILON, "y = {}", pos.y);
    assert!(world.resource::<EntityPools>().is_active(enemy));
    assert!(!world.resource::<Session>().won);
}

#[test]
fn dash_spares_a_target_hidden_behind_a_wall() {
    // A small block off the dash's centre line, between the player and an
    // enemy that is still inside the sweep width.
    let (mut world, mut schedule) =
        start_session(walled_arena(r#"{ "x": 0.3, "y": 1.3, "width": 0.4, "height": 0.4 }"#));
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 1.0, 3.0);
    let player = player(&world);

    dash(&mut world, &mut schedule);

    let pos = world.get::<MapPosition>(player).unwrap().pos;
    assert!((pos - Vec2::new(0.0, 6.0)).length() < EPSILON, "pos = {pos:?}");
    assert!(world.resource::<EntityPools>().is_active(enemy));
    assert_eq!(world.resource::<Session>().live_enemies, 1);
    assert!(!world.resource::<Session>().won);
}

#[test]
fn slash_does_not_reach_through_a_wall() {
    // The block sits on the line from the player to the enemy; the enemy
    // still overlaps the slash circle.
    let (mut world, mut schedule) =
        start_session(walled_arena(r#"{ "x": 0.4, "y": 0.3, "width": 0.2, "height": 0.4 }"#));
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 1.0, 1.0);

    step(&mut world, &mut schedule, attack());

    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::Slash), 1);
    assert!(world.resource::<EntityPools>().is_active(enemy));
    assert_eq!(world.resource::<Session>().defeats, 0);
    assert!(!world.resource::<TimeAuthority>().is_hitstop_active());
}

#[test]
fn enemy_fires_first_shot_after_its_windup() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 5.0);
    let player = player(&world);

    step(&mut world, &mut schedule, InputFrame::default());
    let ai = *world.get::<EnemyAi>(enemy).unwrap();
    assert_eq!(ai.target, Some(player));
    assert!(ai.attacking);
    assert!(
        world
            .resource::<DeferredQueue>()
            .is_pending(enemy, DeferredAction::EnemyShoot)
    );
    assert!(live_bullets(&mut world).is_empty());

    // Wind-up is 0.5 scaled seconds, about 30 ticks.
    let mut fired_at = None;
    for tick in 1..=60 {
        step(&mut world, &mut schedule, InputFrame::default());
        if !live_bullets(&mut world).is_empty() {
            fired_at = Some(tick);
            break;
        }
    }
    let fired_at = fired_at.expect("enemy never fired");
    assert!((29..=32).contains(&fired_at), "fired at tick {fired_at}");

    let bullets = live_bullets(&mut world);
    assert_eq!(bullets.len(), 1);
    let (_, faction, pos) = bullets[0];
    assert_eq!(faction, Faction::Enemy);
    assert!(pos.distance(Vec2::new(0.0, 5.0)) < 0.5, "bullet at {pos:?}");

    // The next cooldown is rolled as base 5 ± jitter 2.
    let ai = *world.get::<EnemyAi>(enemy).unwrap();
    assert!(!ai.attacking);
    assert!((3.0..=7.0).contains(&ai.shot_cooldown), "cooldown = {}", ai.shot_cooldown);
    assert!(ai.shot_timer <= DT + EPSILON);
    assert!(
        !world
            .resource::<DeferredQueue>()
            .is_pending(enemy, DeferredAction::EnemyShoot)
    );
}

#[test]
fn enemy_without_line_of_sight_holds_fire() {
    let (mut world, mut schedule) =
        start_session(walled_arena(r#"{ "x": -2, "y": 2, "width": 4, "height": 0.5 }"#));
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 0.0, 5.0);

    for _ in 0..40 {
        step(&mut world, &mut schedule, InputFrame::default());
    }

    let ai = *world.get::<EnemyAi>(enemy).unwrap();
    assert_eq!(ai.target, None);
    assert!(!ai.attacking);
    assert!(
        !world
            .resource::<DeferredQueue>()
            .is_pending(enemy, DeferredAction::EnemyShoot)
    );
    assert!(live_bullets(&mut world).is_empty());
}

#[test]
fn defeat_during_windup_cancels_the_shot() {
    let (mut world, mut schedule) = start_session_with_enemies(open_arena(), 2);
    let enemies = live_enemies(&mut world);
    assert_eq!(enemies.len(), 2);
    let (near, far) = (enemies[0], enemies[1]);
    place(&mut world, near, 0.0, 1.5);
    // Out of range, so it never shoots.
    place(&mut world, far, 9.0, 9.0);

    // The near enemy starts its wind-up and is slashed in the same tick.
    step(&mut world, &mut schedule, attack());
    assert!(!world.resource::<EntityPools>().is_active(near));
    assert!(
        !world
            .resource::<DeferredQueue>()
            .is_pending(near, DeferredAction::EnemyShoot)
    );
    assert_eq!(world.resource::<Session>().live_enemies, 1);
    assert!(!world.resource::<Session>().is_over());

    for _ in 0..90 {
        step(&mut world, &mut schedule, InputFrame::default());
    }
    assert!(live_bullets(&mut world).is_empty());
}

#[test]
fn releasing_dilation_during_hitstop_keeps_time_frozen_until_it_ends() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 9.0, 9.0);
    let player = player(&world);

    step(&mut world, &mut schedule, dilation());
    world.resource_mut::<TimeAuthority>().trigger_hitstop(0.09);

    let mut frozen_ticks = 0;
    while world.resource::<TimeAuthority>().is_hitstop_active() {
        step(&mut world, &mut schedule, InputFrame::default());
        assert_eq!(world.resource::<WorldTime>().time_scale, 0.0);
        frozen_ticks += 1;
        assert!(frozen_ticks < 30, "hitstop never ended");
        if world.resource::<TimeAuthority>().is_hitstop_active() {
            // Resume is refused while frozen; the slow-motion scale stays.
            let authority = world.resource::<TimeAuthority>();
            assert!((authority.base_scale() - 0.2).abs() < EPSILON);
            assert_eq!(authority.effective_scale(), 0.0);
        }
    }
    assert!(frozen_ticks >= 5, "hitstop cut short after {frozen_ticks} ticks");
    assert_eq!(
        world.get::<TimeDilation>(player).unwrap().state(),
        DilationState::Recovering
    );
    assert_eq!(world.resource::<TimeAuthority>().base_scale(), 1.0);

    step(&mut world, &mut schedule, InputFrame::default());
    let time = world.resource::<WorldTime>();
    assert_eq!(time.time_scale, 1.0);
    assert!((time.delta - DT).abs() < EPSILON);
}

#[test]
fn holding_attack_slashes_once_per_press() {
    let (mut world, mut schedule) = start_session(open_arena());
    let enemy = the_enemy(&mut world);
    place(&mut world, enemy, 9.0, 9.0);

    let mut slashes = 0;
    let mut was_out = false;
    // Longer than the 0.7 s cooldown.
    for _ in 0..90 {
        step(&mut world, &mut schedule, attack());
        let out = world.resource::<EntityPools>().active_count(PoolKind::Slash) > 0;
        if out && !was_out {
            slashes += 1;
        }
        was_out = out;
    }
    assert_eq!(slashes, 1);

    step(&mut world, &mut schedule, InputFrame::default());
    step(&mut world, &mut schedule, attack());
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::Slash), 1);
}
