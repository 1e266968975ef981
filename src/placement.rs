//! Enemy placement.
//!
//! Enemies are scattered uniformly inside the arena, rejecting candidates that
//! come too close to a wall, to an already placed enemy, or to the player
//! start. Sampling is bounded: after `max_attempts` rejections for one enemy
//! the candidate that violated the rules least is used and a warning is
//! logged, so a crowded arena degrades instead of hanging.

use glam::Vec2;
use log::warn;

use crate::components::boxcollider::BoxCollider;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRules {
    pub min_wall: f32,
    pub min_enemy: f32,
    pub min_player: f32,
    pub max_attempts: usize,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            min_wall: 1.0,
            min_enemy: 2.0,
            min_player: 4.0,
            max_attempts: 64,
        }
    }
}

/// Axis-aligned sampling area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Vec2 {
        let span = self.max - self.min;
        self.min + Vec2::new(rng.f32() * span.x, rng.f32() * span.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub positions: Vec<Vec2>,
    /// How many positions had to fall back to the least-bad candidate.
    pub relaxed: usize,
}

/// Smallest margin by which `candidate` clears every rule. Non-negative
/// means every rule holds.
fn slack(
    candidate: Vec2,
    walls: &[(Vec2, BoxCollider)],
    placed: &[Vec2],
    player_start: Vec2,
    rules: &PlacementRules,
) -> f32 {
    let mut margin = candidate.distance(player_start) - rules.min_player;
    for (position, collider) in walls {
        margin = margin.min(collider.distance_to_point(*position, candidate) - rules.min_wall);
    }
    for other in placed {
        margin = margin.min(candidate.distance(*other) - rules.min_enemy);
    }
    margin
}

pub fn scatter(
    rng: &mut fastrand::Rng,
    bounds: Bounds,
    walls: &[(Vec2, BoxCollider)],
    player_start: Vec2,
    count: usize,
    rules: &PlacementRules,
) -> Placement {
    let mut positions = Vec::with_capacity(count);
    let mut relaxed = 0;
    let attempts = rules.max_attempts.max(1);

    for index in 0..count {
        let mut best: Option<(f32, Vec2)> = None;
        for _ in 0..attempts {
            let candidate = bounds.sample(rng);
            let margin = slack(candidate, walls, &positions, player_start, rules);
            if best.is_none_or(|(m, _)| margin > m) {
                best = Some((margin, candidate));
            }
            if margin >= 0.0 {
                break;
            }
        }
        let Some((margin, position)) = best else {
            continue;
        };
        if margin < 0.0 {
            relaxed += 1;
            warn!(
                "enemy {} placed at {:?} after {} attempts, rules violated by {:.2}",
                index, position, attempts, -margin
            );
        }
        positions.push(position);
    }

    Placement { positions, relaxed }
}
