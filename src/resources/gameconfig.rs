//! Game configuration resource.
//!
//! Tunables loaded from an INI file. Every key is optional; anything missing
//! or unparsable keeps its default so a session can always start.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! slow_scale = 0.2
//! hitstop = 0.1
//! hitstop_enemy_damage = 0.3
//!
//! [dilation]
//! max_duration = 5.0
//! recharge_duration = 5.0
//! ramp_threshold = 0.4
//! dash_range = 6.0
//! dash_width = 1.5
//!
//! [player]
//! health = 1
//! move_speed = 5.0
//! rotate_speed = 5.0
//! attack_cooldown = 0.7
//! invincibility = 1.0
//! flash = 0.25
//! radius = 0.4
//!
//! [enemy]
//! health = 1
//! range = 10.0
//! shoot_cooldown = 5.0
//! shoot_jitter = 2.0
//! rotate_speed = 5.0
//! windup = 0.5
//! radius = 0.5
//!
//! [bullet]
//! speed = 8.0
//! lifespan = 10.0
//! trail = 0.2
//! radius = 0.15
//!
//! [slash]
//! lifespan = 0.2
//! offset = 1.0
//! radius = 0.8
//!
//! [pools]
//! bullet = 10
//! slash = 5
//! dash = 2
//! hit = 5
//! enemy = 5
//!
//! [placement]
//! min_wall = 1.0
//! min_enemy = 2.0
//! min_player = 4.0
//! max_attempts = 64
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::placement::PlacementRules;
use crate::resources::pool::PoolKind;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Default safe values for startup
const DEFAULT_SLOW_SCALE: f32 = 0.2;
const DEFAULT_HITSTOP: f32 = 0.1;
const DEFAULT_HITSTOP_ENEMY_DAMAGE: f32 = 0.3;
const DEFAULT_MAX_DILATION: f32 = 5.0;
const DEFAULT_RECHARGE: f32 = 5.0;
const DEFAULT_RAMP_THRESHOLD: f32 = 0.4;
const DEFAULT_DASH_RANGE: f32 = 6.0;
const DEFAULT_DASH_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub health: i32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub attack_cooldown: f32,
    pub invincibility: f32,
    pub flash: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 1,
            move_speed: 5.0,
            rotate_speed: 5.0,
            attack_cooldown: 0.7,
            invincibility: 1.0,
            flash: 0.25,
            radius: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyConfig {
    pub health: i32,
    pub range: f32,
    pub shoot_cooldown: f32,
    pub shoot_jitter: f32,
    pub rotate_speed: f32,
    pub windup: f32,
    pub radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            health: 1,
            range: 10.0,
            shoot_cooldown: 5.0,
            shoot_jitter: 2.0,
            rotate_speed: 5.0,
            windup: 0.5,
            radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletConfig {
    pub speed: f32,
    pub lifespan: f32,
    pub trail: f32,
    pub radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            lifespan: 10.0,
            trail: 0.2,
            radius: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlashConfig {
    pub lifespan: f32,
    /// Distance in front of the player where the slash appears.
    pub offset: f32,
    pub radius: f32,
}

impl Default for SlashConfig {
    fn default() -> Self {
        Self {
            lifespan: 0.2,
            offset: 1.0,
            radius: 0.8,
        }
    }
}

/// Pre-warm counts per pool. The enemy count is also how many enemies a
/// session places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSizes {
    pub bullet: usize,
    pub slash: usize,
    pub dash: usize,
    pub hit: usize,
    pub enemy: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            bullet: 10,
            slash: 5,
            dash: 2,
            hit: 5,
            enemy: 5,
        }
    }
}

impl PoolSizes {
    pub fn initial_count(&self, kind: PoolKind) -> usize {
        match kind {
            PoolKind::Bullet => self.bullet,
            PoolKind::Slash => self.slash,
            PoolKind::DashEffect => self.dash,
            PoolKind::HitVfx => self.hit,
            PoolKind::Enemy => self.enemy,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub slow_scale: f32,
    /// Hitstop for deflects, reflects, and damage to the player.
    pub hitstop: f32,
    /// Hitstop when an enemy takes damage.
    pub hitstop_enemy_damage: f32,
    pub max_dilation: f32,
    pub recharge_duration: f32,
    pub ramp_threshold: f32,
    pub dash_range: f32,
    pub dash_width: f32,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub slash: SlashConfig,
    pub pools: PoolSizes,
    pub placement: PlacementRules,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_usize(config: &Ini, section: &str, key: &str, target: &mut usize) {
    if let Some(value) = config.getuint(section, key).ok().flatten() {
        *target = value as usize;
    }
}

fn read_i32(config: &Ini, section: &str, key: &str, target: &mut i32) {
    if let Some(value) = config.getint(section, key).ok().flatten() {
        *target = value as i32;
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            slow_scale: DEFAULT_SLOW_SCALE,
            hitstop: DEFAULT_HITSTOP,
            hitstop_enemy_damage: DEFAULT_HITSTOP_ENEMY_DAMAGE,
            max_dilation: DEFAULT_MAX_DILATION,
            recharge_duration: DEFAULT_RECHARGE,
            ramp_threshold: DEFAULT_RAMP_THRESHOLD,
            dash_range: DEFAULT_DASH_RANGE,
            dash_width: DEFAULT_DASH_WIDTH,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            slash: SlashConfig::default(),
            pools: PoolSizes::default(),
            placement: PlacementRules::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values. Fails if the file cannot
    /// be read or parsed, or if the result does not validate.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        })?;
        self.load_from_str(&text)
    }

    /// Apply INI text on top of the current values.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(|message| ConfigError::Ini {
            path: self.config_path.clone(),
            message,
        })?;

        // [time] section
        read_f32(&config, "time", "slow_scale", &mut self.slow_scale);
        read_f32(&config, "time", "hitstop", &mut self.hitstop);
        read_f32(&config, "time", "hitstop_enemy_damage", &mut self.hitstop_enemy_damage);

        // [dilation] section
        read_f32(&config, "dilation", "max_duration", &mut self.max_dilation);
        read_f32(&config, "dilation", "recharge_duration", &mut self.recharge_duration);
        read_f32(&config, "dilation", "ramp_threshold", &mut self.ramp_threshold);
        read_f32(&config, "dilation", "dash_range", &mut self.dash_range);
        read_f32(&config, "dilation", "dash_width", &mut self.dash_width);

        // [player] section
        let p = &mut self.player;
        read_i32(&config, "player", "health", &mut p.health);
        read_f32(&config, "player", "move_speed", &mut p.move_speed);
        read_f32(&config, "player", "rotate_speed", &mut p.rotate_speed);
        read_f32(&config, "player", "attack_cooldown", &mut p.attack_cooldown);
        read_f32(&config, "player", "invincibility", &mut p.invincibility);
        read_f32(&config, "player", "flash", &mut p.flash);
        read_f32(&config, "player", "radius", &mut p.radius);

        // [enemy] section
        let e = &mut self.enemy;
        read_i32(&config, "enemy", "health", &mut e.health);
        read_f32(&config, "enemy", "range", &mut e.range);
        read_f32(&config, "enemy", "shoot_cooldown", &mut e.shoot_cooldown);
        read_f32(&config, "enemy", "shoot_jitter", &mut e.shoot_jitter);
        read_f32(&config, "enemy", "rotate_speed", &mut e.rotate_speed);
        read_f32(&config, "enemy", "windup", &mut e.windup);
        read_f32(&config, "enemy", "radius", &mut e.radius);

        // [bullet] section
        let b = &mut self.bullet;
        read_f32(&config, "bullet", "speed", &mut b.speed);
        read_f32(&config, "bullet", "lifespan", &mut b.lifespan);
        read_f32(&config, "bullet", "trail", &mut b.trail);
        read_f32(&config, "bullet", "radius", &mut b.radius);

        // [slash] section
        let s = &mut self.slash;
        read_f32(&config, "slash", "lifespan", &mut s.lifespan);
        read_f32(&config, "slash", "offset", &mut s.offset);
        read_f32(&config, "slash", "radius", &mut s.radius);

        // [pools] section
        let pools = &mut self.pools;
        read_usize(&config, "pools", "bullet", &mut pools.bullet);
        read_usize(&config, "pools", "slash", &mut pools.slash);
        read_usize(&config, "pools", "dash", &mut pools.dash);
        read_usize(&config, "pools", "hit", &mut pools.hit);
        read_usize(&config, "pools", "enemy", &mut pools.enemy);

        // [placement] section
        let pl = &mut self.placement;
        read_f32(&config, "placement", "min_wall", &mut pl.min_wall);
        read_f32(&config, "placement", "min_enemy", &mut pl.min_enemy);
        read_f32(&config, "placement", "min_player", &mut pl.min_player);
        read_usize(&config, "placement", "max_attempts", &mut pl.max_attempts);

        self.validate()?;

        info!(
            "Loaded config: slow={} hitstop={}/{} dilation={}s/{}s pools={:?}",
            self.slow_scale,
            self.hitstop,
            self.hitstop_enemy_damage,
            self.max_dilation,
            self.recharge_duration,
            self.pools
        );

        Ok(())
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |section, key, reason: &str| {
            Err(ConfigError::InvalidValue {
                section,
                key,
                reason: reason.to_string(),
            })
        };
        if !(0.0..=1.0).contains(&self.slow_scale) {
            return invalid("time", "slow_scale", "must be within [0, 1]");
        }
        if self.hitstop < 0.0 || self.hitstop_enemy_damage < 0.0 {
            return invalid("time", "hitstop", "must not be negative");
        }
        if !(0.0..=1.0).contains(&self.ramp_threshold) {
            return invalid("dilation", "ramp_threshold", "must be within [0, 1]");
        }
        if self.player.health <= 0 {
            return invalid("player", "health", "must be positive");
        }
        if self.enemy.health <= 0 {
            return invalid("enemy", "health", "must be positive");
        }
        if self.enemy.shoot_jitter > self.enemy.shoot_cooldown {
            return invalid("enemy", "shoot_jitter", "must not exceed shoot_cooldown");
        }
        if self.bullet.speed < 0.0 {
            return invalid("bullet", "speed", "must not be negative");
        }
        if self.placement.max_attempts == 0 {
            return invalid("placement", "max_attempts", "must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameConfig::new().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[time]\nslow_scale = 0.5\n[pools]\nenemy = 3\n")
            .unwrap();
        assert_eq!(config.slow_scale, 0.5);
        assert_eq!(config.pools.enemy, 3);
        assert_eq!(config.hitstop, DEFAULT_HITSTOP);
        assert_eq!(config.player.attack_cooldown, 0.7);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[time]\nslow_scale = 3.0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                section: "time",
                key: "slow_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(matches!(config.load_from_file(), Err(ConfigError::Io { .. })));
    }
}
