//! Timeshift headless runner.
//!
//! Builds a session from an INI configuration and a JSON arena layout, then
//! drives it for a fixed number of ticks with a scripted autopilot standing
//! in for a player. Presentation commands go to a logging presenter thread.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 3600 --seed 7
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{info, warn};

use timeshift::components::bullet::Bullet;
use timeshift::components::enemy::EnemyAi;
use timeshift::components::faction::Faction;
use timeshift::components::mapposition::MapPosition;
use timeshift::components::player::Player;
use timeshift::components::pooled::{Inactive, Spent};
use timeshift::components::timedilation::TimeDilation;
use timeshift::game::{build_schedule, init_world, tick};
use timeshift::resources::arena::ArenaLayout;
use timeshift::resources::gameconfig::GameConfig;
use timeshift::resources::gamestate::GameState;
use timeshift::resources::input::InputFrame;
use timeshift::resources::presentation::{setup_presentation, shutdown_presentation};
use timeshift::resources::session::Session;
use timeshift::resources::worldtime::WorldTime;
use timeshift::systems::presentation::logging_presenter;

/// Enemy bullets closer than this make the autopilot hold dilation.
const THREAT_RADIUS: f32 = 3.0;
/// Enemies closer than this are in slash reach.
const SLASH_REACH: f32 = 2.0;

/// Timeshift headless session runner
#[derive(Parser)]
#[command(version, about = "Runs a headless timeshift session with a scripted autopilot.")]
struct Cli {
    /// INI file with gameplay tunables.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON arena layout. The built-in arena is used when omitted.
    #[arg(long, value_name = "PATH")]
    arena: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Real seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for enemy placement and shot timing.
    #[arg(long)]
    seed: Option<u64>,
}

/// Decide the next tick's input from the current world.
///
/// Walks toward the nearest enemy and slashes when in reach. When an enemy
/// bullet gets close it holds dilation and taps attack, dashing along its
/// facing.
fn autopilot(world: &mut World, frame: u32) -> InputFrame {
    let mut players = world.query_filtered::<(&MapPosition, &TimeDilation), With<Player>>();
    let Some((player_pos, dilation_active)) = players
        .iter(world)
        .next()
        .map(|(p, d)| (p.pos, d.is_active()))
    else {
        return InputFrame::default();
    };

    let mut enemies =
        world.query_filtered::<&MapPosition, (With<EnemyAi>, Without<Inactive>)>();
    let nearest_enemy = enemies
        .iter(world)
        .map(|p| p.pos)
        .min_by(|a, b| a.distance(player_pos).total_cmp(&b.distance(player_pos)));

    let mut bullets = world
        .query_filtered::<(&MapPosition, &Faction), (With<Bullet>, Without<Inactive>, Without<Spent>)>();
    let threatened = bullets
        .iter(world)
        .any(|(p, f)| *f == Faction::Enemy && p.pos.distance(player_pos) < THREAT_RADIUS);

    let Some(target) = nearest_enemy else {
        return InputFrame::default();
    };
    let to_target = target - player_pos;
    let move_vector = to_target.normalize_or_zero();

    if threatened || dilation_active {
        return InputFrame {
            move_vector,
            attack: dilation_active && frame % 4 < 2,
            dilation: threatened,
            pause: false,
        };
    }
    InputFrame {
        move_vector: if to_target.length() > SLASH_REACH * 0.5 {
            move_vector
        } else {
            Vec2::ZERO
        },
        attack: to_target.length() < SLASH_REACH && frame % 2 == 0,
        dilation: false,
        pause: false,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Hello, world! This is timeshift!");

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(err) = config.load_from_file() {
        warn!("Using default configuration: {err}");
        config = GameConfig::with_path(&cli.config);
    }

    let layout = match cli.arena.as_ref() {
        Some(path) => ArenaLayout::load_from_file(path).unwrap_or_else(|err| {
            warn!("Using built-in arena: {err}");
            ArenaLayout::default()
        }),
        None => ArenaLayout::default(),
    };

    let mut world = World::new();
    init_world(&mut world, config, layout, cli.seed);
    // Presenter bridge resources must exist before the first tick.
    setup_presentation(&mut world, logging_presenter);

    let mut schedule = build_schedule();
    let dt = if cli.dt.is_finite() && cli.dt > 0.0 { cli.dt } else { 1.0 / 60.0 };

    for frame in 0..cli.frames {
        let input = autopilot(&mut world, frame);
        world.insert_resource(input);
        tick(&mut world, &mut schedule, dt);
        if world.resource::<Session>().is_over() {
            break;
        }
    }

    let session = world.resource::<Session>();
    let time = world.resource::<WorldTime>();
    info!(
        "Session ended in state {:?} after {} ticks ({:.2}s scaled): {} defeats, {} enemies left",
        world.resource::<GameState>().get(),
        time.frame_count,
        time.elapsed,
        session.defeats,
        session.live_enemies
    );

    shutdown_presentation(&mut world);
}
