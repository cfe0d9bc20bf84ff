//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "graviton";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Locomotion and gravity-gun tunables.
    pub player: PlayerConfig,
    /// Mouse-look settings.
    pub look: LookConfig,
    /// Fixed-step and character-shape settings.
    pub physics: PhysicsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Player locomotion and object-manipulation tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal acceleration applied per second of full input.
    pub walk_speed: f32,
    /// Vertical velocity assigned on a grounded jump.
    pub jump_strength: f32,
    /// Horizontal damping rate per second.
    pub deceleration_rate: f32,
    /// Vertical velocity removed per physics tick while above terminal.
    pub fall_rate: f32,
    /// Magnitude of the downward speed at which gravity stops accumulating.
    pub absolute_terminal_velocity: f32,
    /// Reference "up" used to classify floors.
    pub floor_normal: Vec3,
    /// Contacts steeper than this (in degrees) are walls, not floors.
    pub maximum_floor_angle_degrees: f32,
    /// Reach of the pick-up ray.
    pub maximum_raycast_distance: f32,
    /// Impulse magnitude applied on fling.
    pub gravity_gun_force: f32,
    /// Distance in front of the eye at which held objects are carried.
    pub hold_distance: f32,
    /// Height of the inner pivot (eye) above the body origin.
    pub eye_height: f32,
}

/// Mouse-look configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of rotation per unit of raw mouse delta.
    pub sensitivity: f32,
    /// Optional symmetric pitch clamp in degrees. `None` allows full rotation.
    pub pitch_limit_degrees: Option<f32>,
}

/// Physics stepping and character-shape configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed physics tick rate in Hz.
    pub fixed_hz: u32,
    /// World gravity applied by the engine to free dynamic bodies.
    pub gravity: Vec3,
    /// Half-height of the cylindrical part of the player capsule.
    pub capsule_half_height: f32,
    /// Radius of the player capsule.
    pub capsule_radius: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g., "debug", "warn,graviton_player=trace").
    /// Empty uses the logger's built-in filter.
    pub log_level: String,
}

// --- Default implementations ---

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 20.0,
            jump_strength: 15.0,
            deceleration_rate: 5.0,
            fall_rate: 1.0,
            absolute_terminal_velocity: 40.0,
            floor_normal: Vec3::Y,
            maximum_floor_angle_degrees: 45.0,
            maximum_raycast_distance: 4.0,
            gravity_gun_force: 10.0,
            hold_distance: 2.0,
            eye_height: 0.6,
        }
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            pitch_limit_degrees: None,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 50,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            capsule_half_height: 0.5,
            capsule_radius: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: String::new(),
        }
    }
}

impl PhysicsConfig {
    /// Length of one physics tick in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.fixed_hz.max(1) as f32
    }
}

// --- Validation ---

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a finite number",
        })
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "all components must be finite",
        })
    }
}

impl Config {
    /// Checks that every numeric tunable can drive the simulation.
    ///
    /// No cross-field checks are made beyond what would produce NaNs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        finite("player.walk_speed", p.walk_speed)?;
        finite("player.jump_strength", p.jump_strength)?;
        finite("player.deceleration_rate", p.deceleration_rate)?;
        finite("player.fall_rate", p.fall_rate)?;
        finite(
            "player.absolute_terminal_velocity",
            p.absolute_terminal_velocity,
        )?;
        finite_vec("player.floor_normal", p.floor_normal)?;
        if p.floor_normal.length_squared() == 0.0 {
            return Err(ConfigError::Invalid {
                field: "player.floor_normal",
                reason: "must not be the zero vector",
            });
        }
        finite(
            "player.maximum_floor_angle_degrees",
            p.maximum_floor_angle_degrees,
        )?;
        finite("player.maximum_raycast_distance", p.maximum_raycast_distance)?;
        finite("player.gravity_gun_force", p.gravity_gun_force)?;
        finite("player.hold_distance", p.hold_distance)?;
        finite("player.eye_height", p.eye_height)?;

        finite("look.sensitivity", self.look.sensitivity)?;
        if let Some(limit) = self.look.pitch_limit_degrees {
            finite("look.pitch_limit_degrees", limit)?;
        }

        if self.physics.fixed_hz == 0 {
            return Err(ConfigError::Invalid {
                field: "physics.fixed_hz",
                reason: "must be at least 1",
            });
        }
        finite_vec("physics.gravity", self.physics.gravity)?;
        finite("physics.capsule_half_height", self.physics.capsule_half_height)?;
        finite("physics.capsule_radius", self.physics.capsule_radius)?;
        Ok(())
    }
}

// --- Load / Save / Reload ---

/// Default per-user configuration directory, e.g. `~/.config/graviton`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("walk_speed: 20.0"));
        assert!(ron_str.contains("hold_distance: 2.0"));
    }

    #[test]
    fn test_defaults_match_reference_tuning() {
        let p = PlayerConfig::default();
        assert_eq!(p.jump_strength, 15.0);
        assert_eq!(p.deceleration_rate, 5.0);
        assert_eq!(p.fall_rate, 1.0);
        assert_eq!(p.absolute_terminal_velocity, 40.0);
        assert_eq!(p.floor_normal, Vec3::Y);
        assert_eq!(p.maximum_floor_angle_degrees, 45.0);
        assert_eq!(p.maximum_raycast_distance, 4.0);
        assert_eq!(p.gravity_gun_force, 10.0);
        assert_eq!(LookConfig::default().pitch_limit_degrees, None);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.look.pitch_limit_degrees = Some(85.0);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(player: (walk_speed: 12.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.player.walk_speed, 12.0);
        assert_eq!(config.player.jump_strength, 15.0);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_nan_tunable_rejected() {
        let mut config = Config::default();
        config.player.fall_rate = f32::NAN;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "player.fall_rate"),
            other => panic!("expected invalid fall_rate, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_floor_normal_rejected() {
        let mut config = Config::default();
        config.player.floor_normal = Vec3::ZERO;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "player.floor_normal",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let mut config = Config::default();
        config.physics.fixed_hz = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fixed_dt_from_hz() {
        let physics = PhysicsConfig::default();
        assert!((physics.fixed_dt() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.player.walk_speed = 8.5;
        config.player.floor_normal = Vec3::new(0.0, 0.0, 1.0);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.player.hold_distance = 3.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().player.hold_distance, 3.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
