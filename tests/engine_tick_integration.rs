//! Engine tick integration tests for movement, lifespans, deferred work, and
//! collision dispatch, each run through a small hand-built schedule.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use timeshift::components::attackable::Attackable;
use timeshift::components::boxcollider::BoxCollider;
use timeshift::components::bullet::Bullet;
use timeshift::components::collider::{Collider, layers};
use timeshift::components::faction::Faction;
use timeshift::components::health::Health;
use timeshift::components::mapposition::MapPosition;
use timeshift::components::player::Player;
use timeshift::components::pooled::{Inactive, Spent};
use timeshift::components::rotation::Rotation;
use timeshift::components::timedilation::{EnergyResource, TimeDilation};
use timeshift::components::wall::Wall;
use timeshift::events::presentation::{Clip, PresentationCmd, PresentationMessage};
use timeshift::game::build_template;
use timeshift::resources::deferred::{Clock, DeferredAction, DeferredQueue};
use timeshift::resources::gameconfig::GameConfig;
use timeshift::resources::physics::ArenaPhysics;
use timeshift::resources::pool::{EntityPools, PoolKind};
use timeshift::resources::session::SessionRng;
use timeshift::resources::timeauthority::TimeAuthority;
use timeshift::resources::worldtime::WorldTime;
use timeshift::systems::collision::{collision_detector, collision_observer};
use timeshift::systems::combat::attack_observer;
use timeshift::systems::deferred::run_deferred_tasks;
use timeshift::systems::hitstop::hitstop_observer;
use timeshift::systems::lifespan::bullet_lifespan_system;
use timeshift::systems::movement::projectile_movement_system;
use timeshift::systems::physics::sync_physics_scene;
use timeshift::systems::presentation::{forward_presentation_cmds, vfx_finished_system};
use timeshift::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    let config = GameConfig::new();
    let mut pools = EntityPools::default();
    for kind in [PoolKind::Bullet, PoolKind::HitVfx] {
        pools
            .register(kind, 2, build_template(&config, kind, kind.expected_behavior()))
            .unwrap();
    }
    world.insert_resource(WorldTime::default());
    world.insert_resource(TimeAuthority::new(config.slow_scale));
    world.insert_resource(config);
    world.insert_resource(pools);
    world.insert_resource(DeferredQueue::default());
    world.insert_resource(ArenaPhysics::default());
    world.insert_resource(SessionRng::with_seed(3));
    world.init_resource::<Messages<PresentationCmd>>();
    world.init_resource::<Messages<PresentationMessage>>();
    world
}

fn acquire(world: &mut World, kind: PoolKind) -> Entity {
    let entity = world.resource_scope(|world, mut pools: Mut<EntityPools>| {
        let mut commands = world.commands();
        pools.acquire(kind, &mut commands).unwrap()
    });
    world.flush();
    entity
}

fn release(world: &mut World, entity: Entity) {
    world.resource_scope(|world, mut pools: Mut<EntityPools>| {
        let mut commands = world.commands();
        assert!(pools.release(entity, &mut commands));
    });
    world.flush();
}

fn token_of(world: &World, entity: Entity) -> u32 {
    world.resource::<EntityPools>().generation_of(entity).unwrap()
}

/// Acquire a pooled bullet at `pos` flying along `heading`.
fn spawn_bullet(world: &mut World, pos: Vec2, heading: f32, faction: Faction) -> Entity {
    let bullet = acquire(world, PoolKind::Bullet);
    world
        .entity_mut(bullet)
        .insert((MapPosition::from_vec(pos), Rotation::new(heading), faction));
    bullet
}

fn spawn_player(world: &mut World, dilation_active: bool) -> Entity {
    let mut dilation =
        TimeDilation::new(EnergyResource::from_durations(5.0, 5.0), 0.2, 0.4, 6.0, 1.5);
    if dilation_active {
        dilation.tick(true, 0.0);
    }
    world
        .spawn((
            Player {
                move_speed: 5.0,
                rotate_speed: 5.0,
                attack_cooldown: 0.7,
                cooldown_remaining: 0.0,
                flash: 0.25,
                radius: 0.4,
            },
            MapPosition::new(0.0, 0.0),
            Rotation::new(0.0),
            Collider::new(0.4, layers::PLAYER),
            Faction::Player,
            Health::new(3).with_invincibility_window(1.0),
            dilation,
        ))
        .id()
}

fn register_combat_observers(world: &mut World) {
    world.spawn(Observer::new(collision_observer));
    world.spawn(Observer::new(attack_observer));
    world.spawn(Observer::new(hitstop_observer));
    world.flush();
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(projectile_movement_system);
    schedule.run(world);
}

fn tick_bullet_lifespan(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(bullet_lifespan_system);
    schedule.run(world);
}

fn tick_deferred(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(run_deferred_tasks);
    schedule.run(world);
}

fn tick_vfx_finished(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(vfx_finished_system);
    schedule.run(world);
}

fn tick_collisions(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((sync_physics_scene, collision_detector).chain());
    schedule.run(world);
}

#[test]
fn bullets_fly_along_heading_with_scaled_time() {
    let mut world = make_world();
    // Heading 90 degrees faces -X.
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, 90.0, Faction::Enemy);

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);
    let pos = world.get::<MapPosition>(bullet).unwrap().pos;
    assert!(approx_eq(pos.x, -4.0), "x = {}", pos.x);
    assert!(approx_eq(pos.y, 0.0));

    world.resource_mut::<TimeAuthority>().slow_down();
    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);
    let pos = world.get::<MapPosition>(bullet).unwrap().pos;
    assert!(approx_eq(pos.x, -4.8), "x = {}", pos.x);
}

#[test]
fn hitstop_freezes_projectiles() {
    let mut world = make_world();
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, 0.0, Faction::Enemy);
    world.resource_mut::<TimeAuthority>().trigger_hitstop(0.1);

    update_world_time(&mut world, 0.05);
    tick_movement(&mut world);
    // Starts inside the window, so this tick stays frozen too.
    update_world_time(&mut world, 0.06);
    tick_movement(&mut world);
    assert_eq!(world.get::<MapPosition>(bullet).unwrap().pos, Vec2::ZERO);

    update_world_time(&mut world, 0.05);
    tick_movement(&mut world);
    let pos = world.get::<MapPosition>(bullet).unwrap().pos;
    assert!(approx_eq(pos.y, 0.4), "y = {}", pos.y);
}

#[test]
fn spent_bullets_do_not_move() {
    let mut world = make_world();
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, 0.0, Faction::Enemy);
    world.entity_mut(bullet).insert(Spent);

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);
    assert_eq!(world.get::<MapPosition>(bullet).unwrap().pos, Vec2::ZERO);
}

#[test]
fn expired_bullet_is_released_after_its_trail() {
    let mut world = make_world();
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, 0.0, Faction::Enemy);
    world.get_mut::<Bullet>(bullet).unwrap().age = 9.9;

    update_world_time(&mut world, 0.2);
    tick_bullet_lifespan(&mut world);
    assert!(world.get::<Spent>(bullet).is_some());
    assert!(
        world
            .resource::<DeferredQueue>()
            .is_pending(bullet, DeferredAction::Release)
    );

    // Trail counts real time; hitstop does not hold it back.
    world.resource_mut::<TimeAuthority>().trigger_hitstop(1.0);
    update_world_time(&mut world, 0.1);
    tick_deferred(&mut world);
    assert!(world.resource::<EntityPools>().is_active(bullet));

    update_world_time(&mut world, 0.15);
    tick_deferred(&mut world);
    assert!(!world.resource::<EntityPools>().is_active(bullet));
    assert!(world.get::<Inactive>(bullet).is_some());
    assert!(world.get::<Spent>(bullet).is_none());
}

#[test]
fn deferred_work_for_a_recycled_entity_is_dropped() {
    let mut world = make_world();
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, 0.0, Faction::Enemy);
    let token = world.resource::<EntityPools>().generation_of(bullet);
    world
        .resource_mut::<DeferredQueue>()
        .schedule(bullet, token, 0.1, Clock::Real, DeferredAction::Release);

    // Recycle: release and hand the same entity out again.
    release(&mut world, bullet);
    assert_eq!(acquire(&mut world, PoolKind::Bullet), bullet);

    update_world_time(&mut world, 0.2);
    tick_deferred(&mut world);
    assert!(world.resource::<EntityPools>().is_active(bullet));
    assert!(world.resource::<DeferredQueue>().is_empty());
}

#[test]
fn bullet_hitting_wall_is_soft_disabled() {
    let mut world = make_world();
    register_combat_observers(&mut world);
    // Wall spanning x = 1..2, y = -1..1.
    world.spawn((
        Wall,
        MapPosition::new(1.0, -1.0),
        BoxCollider::new(1.0, 2.0),
    ));
    let bullet = spawn_bullet(&mut world, Vec2::new(0.9, 0.0), 270.0, Faction::Enemy);

    tick_collisions(&mut world);

    assert!(world.get::<Spent>(bullet).is_some());
    assert!(
        world
            .resource::<DeferredQueue>()
            .is_pending(bullet, DeferredAction::Release)
    );
    assert!(!world.resource::<TimeAuthority>().is_hitstop_active());
}

#[test]
fn enemy_bullet_damages_player_and_opens_invincibility() {
    let mut world = make_world();
    register_combat_observers(&mut world);
    let player = spawn_player(&mut world, false);
    let bullet = spawn_bullet(&mut world, Vec2::new(0.0, 0.4), 180.0, Faction::Enemy);

    tick_collisions(&mut world);

    let health = world.get::<Health>(player).unwrap();
    assert_eq!(health.current, 2);
    assert!(health.invincible);
    assert!(world.get::<Spent>(bullet).is_some());
    let queue = world.resource::<DeferredQueue>();
    assert!(queue.is_pending(player, DeferredAction::EndInvincibility));
    let authority = world.resource::<TimeAuthority>();
    assert!(approx_eq(authority.hitstop().unwrap().duration, 0.1));

    // A second bullet inside the window does nothing to the player.
    let second = spawn_bullet(&mut world, Vec2::new(0.0, -0.4), 0.0, Faction::Enemy);
    tick_collisions(&mut world);
    assert_eq!(world.get::<Health>(player).unwrap().current, 2);
    assert!(world.get::<Spent>(second).is_some());

    // The window closes on real time.
    update_world_time(&mut world, 1.1);
    tick_deferred(&mut world);
    assert!(!world.get::<Health>(player).unwrap().invincible);
}

#[test]
fn dilated_player_reflects_enemy_bullets_with_its_body() {
    let mut world = make_world();
    register_combat_observers(&mut world);
    let player = spawn_player(&mut world, true);
    let bullet = spawn_bullet(&mut world, Vec2::new(0.0, 0.4), 180.0, Faction::Enemy);

    tick_collisions(&mut world);

    assert_eq!(world.get::<Health>(player).unwrap().current, 3);
    assert_eq!(*world.get::<Faction>(bullet).unwrap(), Faction::Player);
    let heading = world.get::<Rotation>(bullet).unwrap().degrees;
    assert!(approx_eq(heading, 0.0), "heading = {heading}");
    assert!(approx_eq(world.get::<Bullet>(bullet).unwrap().speed, 24.0));
    assert!(world.get::<Spent>(bullet).is_none());
    assert!(world.get::<Attackable>(bullet).is_some());
    assert!(world.resource::<TimeAuthority>().is_hitstop_active());
    assert_eq!(world.resource::<EntityPools>().active_count(PoolKind::HitVfx), 1);
}

#[test]
fn player_bullets_pass_through_the_player() {
    let mut world = make_world();
    register_combat_observers(&mut world);
    let player = spawn_player(&mut world, false);
    let bullet = spawn_bullet(&mut world, Vec2::new(0.0, 0.2), 0.0, Faction::Player);

    tick_collisions(&mut world);

    assert_eq!(world.get::<Health>(player).unwrap().current, 3);
    assert!(world.get::<Spent>(bullet).is_none());
}

#[test]
fn finished_signal_only_releases_the_current_life_of_an_effect() {
    let mut world = make_world();
    let effect = acquire(&mut world, PoolKind::HitVfx);
    let old_token = token_of(&world, effect);
    release(&mut world, effect);
    assert_eq!(acquire(&mut world, PoolKind::HitVfx), effect);
    let token = token_of(&world, effect);
    assert_ne!(old_token, token);

    // An answer for the clip of the previous life is ignored.
    world
        .resource_mut::<Messages<PresentationMessage>>()
        .write(PresentationMessage::Finished {
            entity: effect,
            token: old_token,
        });
    tick_vfx_finished(&mut world);
    assert!(world.resource::<EntityPools>().is_active(effect));
    assert!(world.get::<Inactive>(effect).is_none());

    world
        .resource_mut::<Messages<PresentationMessage>>()
        .write(PresentationMessage::Finished {
            entity: effect,
            token,
        });
    tick_vfx_finished(&mut world);
    assert!(!world.resource::<EntityPools>().is_active(effect));
    assert!(world.get::<Inactive>(effect).is_some());
}

#[test]
fn effects_finish_on_their_own_without_a_presenter() {
    let mut world = make_world();
    let effect = acquire(&mut world, PoolKind::HitVfx);
    let token = token_of(&world, effect);
    world
        .resource_mut::<Messages<PresentationCmd>>()
        .write(PresentationCmd::Play {
            entity: effect,
            token,
            clip: Clip::Hit,
        });

    let mut schedule = Schedule::default();
    schedule.add_systems((forward_presentation_cmds, vfx_finished_system).chain());
    schedule.run(&mut world);

    assert!(!world.resource::<EntityPools>().is_active(effect));
    assert!(world.get::<Inactive>(effect).is_some());
}
