//! Host loop for the steering controller: loads a scenario, owns the mover
//! and perception stubs, and ticks the controller for a fixed number of
//! steps.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use steer_core::{Mover, Perception, PointMass, SteeringController, SteeringParams, Vec3};
use steer_shared::{Scenario, SteeringSettings, Vec3Data};

pub fn to_vec3(d: Vec3Data) -> Vec3 {
    Vec3::new(d.x, d.y, d.z)
}

pub fn to_data(v: Vec3) -> Vec3Data {
    Vec3Data::new(v.x, v.y, v.z)
}

/// Validate settings into core steering parameters.
pub fn build_params(settings: &SteeringSettings) -> Result<SteeringParams> {
    let params = SteeringParams::new(
        settings.max_speed,
        settings.max_force,
        settings.wander_radius,
        settings.wander_distance,
        settings.wander_displacement,
    )
    .context("Invalid steering settings")?;
    Ok(params.with_ground_plane(settings.ground_plane))
}

/// Perception stub feeding a fixed, pre-sorted target list every tick.
pub struct StaticPerception {
    targets: Vec<Vec3>,
}

impl StaticPerception {
    pub fn new(targets: &[Vec3Data]) -> Self {
        Self {
            targets: targets.iter().copied().map(to_vec3).collect(),
        }
    }
}

impl Perception for StaticPerception {
    fn targets(&self) -> &[Vec3] {
        &self.targets
    }
}

/// Final agent state after a run
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub ticks: u32,
    pub position: Vec3Data,
    pub velocity: Vec3Data,
    pub wander_angle: f32,
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scenario file {}", path.display()))
}

/// Run the scenario to completion. A seed makes the wander walk
/// reproducible; without one the controller draws from entropy.
pub fn run(scenario: &Scenario, seed: Option<u64>) -> Result<SimReport> {
    let params = build_params(&scenario.settings)?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut controller = SteeringController::with_rng(params, rng);
    let mut agent = PointMass::new(
        to_vec3(scenario.position),
        to_vec3(scenario.velocity),
        params.max_speed(),
    );
    let seek = StaticPerception::new(&scenario.seek_targets);
    let flee = StaticPerception::new(&scenario.flee_targets);

    for tick in 0..scenario.ticks {
        let force = controller.compute(&agent.kinematics(), seek.targets(), flee.targets());
        agent.apply_force(force);
        agent.step();
        if let Some(bounds) = &scenario.bounds {
            agent.wrap_bounds(to_vec3(bounds.min), to_vec3(bounds.max));
        }
        log::debug!(
            "tick {}: pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})",
            tick,
            agent.position.x,
            agent.position.y,
            agent.position.z,
            agent.velocity.x,
            agent.velocity.y,
            agent.velocity.z,
        );
    }

    Ok(SimReport {
        ticks: scenario.ticks,
        position: to_data(agent.position),
        velocity: to_data(agent.velocity()),
        wander_angle: controller.wander_angle(),
    })
}
