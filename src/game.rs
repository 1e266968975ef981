//! Session setup, schedule, and tick.
//!
//! [`init_world`] inserts every resource and observer a session needs and
//! runs [`setup`], which builds the pools, the arena walls, the player, and
//! the scattered enemies. [`build_schedule`] returns the per-tick schedule
//! and [`tick`] advances time and runs it once. [`reset_session`] tears the
//! gameplay entities down and runs [`setup`] again.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::bullet::Bullet;
use crate::components::collider::{Collider, layers};
use crate::components::enemy::EnemyAi;
use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::player::Player;
use crate::components::rotation::{Rotation, heading_from_direction};
use crate::components::timedilation::{EnergyResource, TimeDilation};
use crate::components::vfx::VfxClip;
use crate::components::wall::Wall;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::session::{defeat_observer, game_over_observer, player_win_observer};
use crate::placement::scatter;
use crate::resources::arena::ArenaLayout;
use crate::resources::deferred::DeferredQueue;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputFrame, InputState};
use crate::resources::physics::ArenaPhysics;
use crate::resources::pool::{EntityPools, EntityTemplate, PoolKind, TemplateBehavior};
use crate::resources::presentation::init_presentation_messages;
use crate::resources::session::{Session, SessionRng};
use crate::resources::sessionsystems::SessionSystems;
use crate::resources::timeauthority::TimeAuthority;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{collision_detector, collision_observer};
use crate::systems::combat::attack_observer;
use crate::systems::dash::dash_attack_system;
use crate::systems::deferred::run_deferred_tasks;
use crate::systems::enemy::enemy_ai_system;
use crate::systems::gamestate::{check_pending_state, pause_toggle_system, state_is_playing};
use crate::systems::hitstop::hitstop_observer;
use crate::systems::input::update_input_state;
use crate::systems::lifespan::{bullet_lifespan_system, slash_lifespan_system};
use crate::systems::movement::projectile_movement_system;
use crate::systems::physics::sync_physics_scene;
use crate::systems::player::player_control_system;
use crate::systems::presentation::{
    forward_presentation_cmds, poll_presentation_messages, update_presentation_cmds,
    update_presentation_messages, vfx_finished_system,
};
use crate::systems::time::update_world_time;
use crate::systems::timedilation::time_dilation_system;

/// Template for the pool of `kind`, built from `config` with the behavior
/// the arena layout asked for. A behavior that does not match `kind` is
/// built as asked; the pool rejects it at registration.
pub fn build_template(config: &GameConfig, kind: PoolKind, behavior: TemplateBehavior) -> EntityTemplate {
    match behavior {
        TemplateBehavior::Bullet => EntityTemplate::Bullet {
            bullet: Bullet::new(config.bullet.speed, config.bullet.lifespan, config.bullet.trail),
            radius: config.bullet.radius,
        },
        TemplateBehavior::Slash => EntityTemplate::Slash {
            lifespan: config.slash.lifespan,
            radius: config.slash.radius,
        },
        TemplateBehavior::Vfx => EntityTemplate::Vfx {
            clip: match kind {
                PoolKind::DashEffect => VfxClip::Dash,
                _ => VfxClip::Hit,
            },
        },
        TemplateBehavior::Enemy => EntityTemplate::Enemy {
            ai: EnemyAi::new(
                config.enemy.range,
                config.enemy.rotate_speed,
                config.enemy.shoot_cooldown,
                config.enemy.shoot_jitter,
                config.enemy.windup,
            ),
            health: Health::new(config.enemy.health),
            radius: config.enemy.radius,
        },
    }
}

/// Build a fresh session: pools, walls, player, and enemies.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    layout: Res<ArenaLayout>,
    mut pools: ResMut<EntityPools>,
    mut rng: ResMut<SessionRng>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextGameState>,
) {
    for kind in PoolKind::ALL {
        let template = build_template(&config, kind, layout.template_behavior(kind));
        // Misconfigured pools are logged and disabled by the registry.
        pools
            .register(kind, config.pools.initial_count(kind), template)
            .ok();
    }
    pools.prewarm_all(&mut commands);

    for wall in &layout.walls {
        commands.spawn((Wall, MapPosition::from_vec(wall.position()), wall.collider()));
    }

    let start = layout.player_start();
    let player = commands
        .spawn((
            Player {
                move_speed: config.player.move_speed,
                rotate_speed: config.player.rotate_speed,
                attack_cooldown: config.player.attack_cooldown,
                cooldown_remaining: 0.0,
                flash: config.player.flash,
                radius: config.player.radius,
            },
            MapPosition::from_vec(start),
            Rotation::new(0.0),
            Collider::new(config.player.radius, layers::PLAYER),
            Faction::Player,
            Health::new(config.player.health)
                .with_invincibility_window(config.player.invincibility),
            TimeDilation::new(
                EnergyResource::from_durations(config.max_dilation, config.recharge_duration),
                config.slow_scale,
                config.ramp_threshold,
                config.dash_range,
                config.dash_width,
            ),
        ))
        .id();
    session.player = Some(player);

    let placement = scatter(
        &mut rng.0,
        layout.bounds(),
        &layout.wall_boxes(),
        start,
        config.pools.enemy,
        &config.placement,
    );
    let mut placed = 0;
    for position in placement.positions {
        match pools.acquire(PoolKind::Enemy, &mut commands) {
            Ok(enemy) => {
                let heading = heading_from_direction(start - position);
                commands
                    .entity(enemy)
                    .insert((MapPosition::from_vec(position), Rotation::new(heading)));
                placed += 1;
            }
            Err(err) => {
                warn!("Enemy not placed: {err}");
                break;
            }
        }
    }
    session.live_enemies = placed;
    if placed == 0 {
        warn!("Session starts without enemies");
    }

    next_state.set(GameStates::Playing);
    info!(
        "Session setup done: {} enemies, {} walls, next state set to Playing",
        placed,
        layout.walls.len()
    );
}

/// Insert the session resources and observers into `world` and run setup.
///
/// `seed` makes enemy placement and shot cooldowns reproducible.
pub fn init_world(world: &mut World, config: GameConfig, layout: ArenaLayout, seed: Option<u64>) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(TimeAuthority::new(config.slow_scale));
    world.insert_resource(config);
    world.insert_resource(layout);
    world.insert_resource(InputFrame::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(EntityPools::default());
    world.insert_resource(DeferredQueue::default());
    world.insert_resource(ArenaPhysics::default());
    world.insert_resource(Session::default());
    world.insert_resource(match seed {
        Some(seed) => SessionRng::with_seed(seed),
        None => SessionRng::default(),
    });
    init_presentation_messages(world);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(collision_observer), Persistent));
    world.spawn((Observer::new(attack_observer), Persistent));
    world.spawn((Observer::new(hitstop_observer), Persistent));
    world.spawn((Observer::new(defeat_observer), Persistent));
    world.spawn((Observer::new(player_win_observer), Persistent));
    world.spawn((Observer::new(game_over_observer), Persistent));

    // NOTE: registered systems are entities; keep them across resets.
    let setup_id = world.register_system(setup);
    world.entity_mut(setup_id.entity()).insert(Persistent);
    world.insert_resource(SessionSystems { setup: setup_id });

    // Ensure the observers are registered before anything triggers events.
    world.flush();

    run_setup(world);
}

fn run_setup(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup right away

    let setup_id = world.resource::<SessionSystems>().setup;
    if let Err(err) = world.run_system(setup_id) {
        error!("Session setup failed: {err}");
        return;
    }
    world.flush();
    // Setup left Playing pending; apply it so the first tick already plays.
    world.trigger(GameStateChangedEvent {});
}

/// The per-tick schedule.
///
/// Gameplay only runs while [`GameStates::Playing`]; input decoding, the
/// pause toggle, state transitions, and the presenter bridge always run.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        // presentation systems must be together
        (
            update_presentation_cmds,
            forward_presentation_cmds,
            poll_presentation_messages,
            update_presentation_messages,
        )
            .chain(),
    );
    update.add_systems((update_input_state, pause_toggle_system, check_pending_state).chain());
    update.add_systems(
        (
            sync_physics_scene,
            // Before anything schedules, so new tasks wait at least one tick.
            run_deferred_tasks,
            time_dilation_system,
            player_control_system,
            dash_attack_system,
            enemy_ai_system,
            projectile_movement_system,
            slash_lifespan_system,
            bullet_lifespan_system,
            vfx_finished_system,
            // Rebuild after movement so contacts use this tick's positions.
            sync_physics_scene,
            collision_detector,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state)
            .after(update_presentation_messages),
    );
    update
}

/// Advance one tick of `dt` real seconds.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Throw the current session away and build a fresh one with the same
/// configuration and arena.
pub fn reset_session(world: &mut World) {
    let gameplay: Vec<Entity> = world
        .query_filtered::<Entity, (With<MapPosition>, Without<Persistent>)>()
        .iter(world)
        .collect();
    let despawned = gameplay.len();
    for entity in gameplay {
        world.despawn(entity);
    }

    world.resource_mut::<EntityPools>().clear();
    world.resource_mut::<DeferredQueue>().clear();
    world.resource_mut::<ArenaPhysics>().clear();
    world.resource_mut::<TimeAuthority>().reset();
    world.insert_resource(Session::default());
    world.insert_resource(InputState::default());
    world.insert_resource(InputFrame::default());
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    info!("Session reset, {} entities despawned", despawned);

    run_setup(world);
}
