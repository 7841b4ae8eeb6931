#![cfg_attr(not(feature = "std"), no_std)]

//! Serialized configuration and scenario types shared between steering hosts.

use serde::{Deserialize, Serialize};

/// A 3D vector in configuration/wire form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vec3Data {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3Data {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Vec3Data) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        libm::sqrtf(dx * dx + dy * dy + dz * dz)
    }
}

/// Steering tunables for one agent. Angles are in radians;
/// `wander_displacement` is the half-width of the per-tick wander angle
/// perturbation. Validation happens when the host converts these into core
/// parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SteeringSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub wander_radius: f32,
    pub wander_distance: f32,
    pub wander_displacement: f32,
    pub ground_plane: bool,
}

impl Default for SteeringSettings {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.05,
            wander_radius: 2.0,
            wander_distance: 4.0,
            wander_displacement: 0.3,
            ground_plane: true,
        }
    }
}

/// Axis-aligned world box for toroidal position wrapping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: Vec3Data,
    pub max: Vec3Data,
}

/// A complete single-agent simulation description consumed by a host loop:
/// agent tunables, initial kinematics, the perceived target lists (ordered
/// nearest first), and how long to run.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub settings: SteeringSettings,
    pub position: Vec3Data,
    pub velocity: Vec3Data,
    pub seek_targets: Vec<Vec3Data>,
    pub flee_targets: Vec<Vec3Data>,
    pub ticks: u32,
    pub bounds: Option<Bounds>,
}

#[cfg(feature = "std")]
impl Default for Scenario {
    fn default() -> Self {
        Self {
            settings: SteeringSettings::default(),
            position: Vec3Data::default(),
            velocity: Vec3Data::default(),
            seek_targets: Vec::new(),
            flee_targets: Vec::new(),
            ticks: 100,
            bounds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec3Data::new(0.0, 0.0, 0.0);
        let b = Vec3Data::new(2.0, 3.0, 6.0);
        assert_eq!(a.distance_to(&b), 7.0);
    }

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: SteeringSettings = serde_json::from_str(r#"{"max_speed": 5.0}"#).unwrap();
        assert_eq!(settings.max_speed, 5.0);
        assert_eq!(settings.max_force, SteeringSettings::default().max_force);
        assert!(settings.ground_plane);
    }

    #[test]
    fn test_scenario_round_trip() {
        let scenario = Scenario {
            settings: SteeringSettings {
                max_speed: 5.0,
                ..SteeringSettings::default()
            },
            position: Vec3Data::new(1.0, 0.0, -2.0),
            velocity: Vec3Data::new(0.0, 0.0, 1.0),
            seek_targets: vec![Vec3Data::new(10.0, 0.0, 0.0)],
            flee_targets: Vec::new(),
            ticks: 50,
            bounds: Some(Bounds {
                min: Vec3Data::new(-15.0, -15.0, -15.0),
                max: Vec3Data::new(15.0, 15.0, 15.0),
            }),
        };

        let json = serde_json::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scenario);
    }

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let scenario: Scenario = serde_json::from_str("{}").unwrap();
        assert_eq!(scenario.ticks, 100);
        assert!(scenario.seek_targets.is_empty());
        assert!(scenario.bounds.is_none());
    }
}
