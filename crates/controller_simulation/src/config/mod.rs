//! Tuning параметры контроллера + RON persistence
//!
//! Defaults совпадают с экспортами Godot сцены:
//! - speed 5.0 m/s, jump 4.5 m/s
//! - mouse sensitivity 0.05 °/px (editor range 0..0.5)
//! - spring cone ±30° pitch/yaw, 0° roll
//! - facing lerp weight 0.15 за physics tick

mod error;

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Минимум sensitivity (editor range hint)
pub const SENSITIVITY_MIN: f32 = 0.0;
/// Максимум sensitivity (editor range hint)
pub const SENSITIVITY_MAX: f32 = 0.5;

/// Tuning контроллера (speed, jump, mouse look, spring cone)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Горизонтальная скорость (m/s)
    pub speed: f32,
    /// Вертикальная скорость прыжка (m/s)
    pub jump_velocity: f32,
    /// Горизонтальная mouse sensitivity (градусы за pixel)
    pub sensitivity_h: f32,
    /// Вертикальная mouse sensitivity (градусы за pixel)
    pub sensitivity_v: f32,
    /// Лимиты CameraPivot по осям X/Y/Z (градусы)
    pub max_spring_rotation: [f32; 3],
    /// Вес `lerp_angle` для поворота Body к направлению движения
    pub facing_weight: f32,
    /// Fallback гравитация (когда host не отдаёт свою)
    pub gravity: [f32; 3],
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            jump_velocity: 4.5,
            sensitivity_h: 0.05,
            sensitivity_v: 0.05,
            max_spring_rotation: [30.0, 30.0, 0.0],
            facing_weight: 0.15,
            gravity: [0.0, -9.8, 0.0],
        }
    }
}

impl ControllerConfig {
    /// Лимиты spring cone как Vec3 (градусы)
    pub fn max_spring_rotation(&self) -> Vec3 {
        Vec3::from_array(self.max_spring_rotation)
    }

    /// Fallback гравитация как Vec3 (m/s²)
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Clamp обеих sensitivity в editor range [0, 0.5]
    pub fn clamp_sensitivities(&mut self) {
        self.sensitivity_h = self.sensitivity_h.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
        self.sensitivity_v = self.sensitivity_v.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
    }

    /// Проверка диапазонов (первая найденная ошибка)
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "sensitivity_h",
            self.sensitivity_h,
            (SENSITIVITY_MIN..=SENSITIVITY_MAX).contains(&self.sensitivity_h),
            "0.0..=0.5",
        )?;
        check_range(
            "sensitivity_v",
            self.sensitivity_v,
            (SENSITIVITY_MIN..=SENSITIVITY_MAX).contains(&self.sensitivity_v),
            "0.0..=0.5",
        )?;
        check_range("speed", self.speed, self.speed >= 0.0, ">= 0.0")?;
        check_range(
            "jump_velocity",
            self.jump_velocity,
            self.jump_velocity >= 0.0,
            ">= 0.0",
        )?;
        for (field, value) in [
            ("max_spring_rotation.x", self.max_spring_rotation[0]),
            ("max_spring_rotation.y", self.max_spring_rotation[1]),
            ("max_spring_rotation.z", self.max_spring_rotation[2]),
        ] {
            check_range(field, value, (0.0..=180.0).contains(&value), "0.0..=180.0")?;
        }
        check_range(
            "facing_weight",
            self.facing_weight,
            self.facing_weight > 0.0 && self.facing_weight <= 1.0,
            "0.0 < w <= 1.0",
        )?;
        for (field, value) in [
            ("gravity.x", self.gravity[0]),
            ("gravity.y", self.gravity[1]),
            ("gravity.z", self.gravity[2]),
        ] {
            check_range(field, value, true, "finite")?;
        }
        Ok(())
    }

    /// Parse из RON строки + validate
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузка RON файла
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_ron_str(&contents)
    }

    /// Загрузка RON файла; если файла нет → defaults
    ///
    /// Битый файл — это ошибка (не молча defaults).
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            crate::logger::log(&format!(
                "Controller config {:?} not found, using defaults",
                path
            ));
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Сохранение в RON (pretty)
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::default();
        let contents =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }
}

fn check_range(
    field: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_spring_rotation(), Vec3::new(30.0, 30.0, 0.0));
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config = ControllerConfig::from_ron_str("(speed: 7.5)").unwrap();
        assert_eq!(config.speed, 7.5);
        assert_eq!(config.jump_velocity, 4.5);
        assert_eq!(config.sensitivity_h, 0.05);
    }

    #[test]
    fn test_sensitivity_out_of_range_rejected() {
        let err = ControllerConfig::from_ron_str("(sensitivity_v: 0.9)").unwrap_err();
        match err {
            ConfigError::OutOfRange { field, .. } => assert_eq!(field, "sensitivity_v"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_facing_weight_rejected() {
        let config = ControllerConfig {
            facing_weight: 0.0,
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_gravity_rejected() {
        let config = ControllerConfig {
            gravity: [0.0, f32::NAN, 0.0],
            ..default()
        };
        match config.validate().unwrap_err() {
            ConfigError::OutOfRange { field, .. } => assert_eq!(field, "gravity.y"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_gravity_from_ron() {
        let config = ControllerConfig::from_ron_str("(gravity: (0.0, -20.0, 0.0))").unwrap();
        assert_eq!(config.gravity(), Vec3::new(0.0, -20.0, 0.0));
    }

    #[test]
    fn test_clamp_sensitivities() {
        let mut config = ControllerConfig {
            sensitivity_h: -1.0,
            sensitivity_v: 3.0,
            ..default()
        };
        config.clamp_sensitivities();
        assert_eq!(config.sensitivity_h, 0.0);
        assert_eq!(config.sensitivity_v, 0.5);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = ControllerConfig::from_ron_str("(speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("controller.ron");

        let config = ControllerConfig {
            speed: 6.0,
            sensitivity_h: 0.1,
            ..default()
        };
        config.save(&path).unwrap();

        let loaded = ControllerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");

        let config = ControllerConfig::load_or_default(&path).unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControllerConfig::load(&dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
