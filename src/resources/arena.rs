//! Arena layout loaded from JSON.
//!
//! ```json
//! {
//!   "min": [-10.0, -6.0],
//!   "max": [10.0, 6.0],
//!   "player_start": [0.0, -4.0],
//!   "walls": [ { "x": -10.0, "y": -7.0, "width": 20.0, "height": 1.0 } ],
//!   "templates": { "bullet": "bullet", "hit_vfx": "vfx" }
//! }
//! ```
//!
//! `templates` names the behavior each pool's template carries. Pools left
//! out use their natural behavior; a mismatch disables that pool.

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;
use crate::error::ConfigError;
use crate::placement::Bounds;
use crate::resources::pool::{PoolKind, TemplateBehavior};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WallRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallRect {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.width, self.height)
    }
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArenaLayout {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub player_start: [f32; 2],
    #[serde(default)]
    pub walls: Vec<WallRect>,
    #[serde(default)]
    pub templates: FxHashMap<PoolKind, TemplateBehavior>,
}

impl Default for ArenaLayout {
    /// A 20×12 room with border walls and two pillars.
    fn default() -> Self {
        let walls = vec![
            WallRect { x: -11.0, y: -7.0, width: 22.0, height: 1.0 },
            WallRect { x: -11.0, y: 6.0, width: 22.0, height: 1.0 },
            WallRect { x: -11.0, y: -6.0, width: 1.0, height: 12.0 },
            WallRect { x: 10.0, y: -6.0, width: 1.0, height: 12.0 },
            WallRect { x: -5.5, y: 0.0, width: 1.0, height: 2.5 },
            WallRect { x: 4.5, y: 0.0, width: 1.0, height: 2.5 },
        ];
        Self {
            min: [-10.0, -6.0],
            max: [10.0, 6.0],
            player_start: [0.0, -4.0],
            walls,
            templates: FxHashMap::default(),
        }
    }
}

impl ArenaLayout {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn bounds(&self) -> Bounds {
        let a = Vec2::from_array(self.min);
        let b = Vec2::from_array(self.max);
        Bounds {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::from_array(self.player_start)
    }

    /// Template behavior for `kind`, defaulting to the pool's own.
    pub fn template_behavior(&self, kind: PoolKind) -> TemplateBehavior {
        self.templates
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.expected_behavior())
    }

    pub fn wall_boxes(&self) -> Vec<(Vec2, BoxCollider)> {
        self.walls
            .iter()
            .map(|w| (w.position(), w.collider()))
            .collect()
    }
}
