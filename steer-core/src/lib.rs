#![cfg_attr(not(feature = "std"), no_std)]

//! Per-agent steering behaviors: seek, flee, and wander.
//!
//! The host owns the simulation loop. Once per tick it hands a
//! [`SteeringController`] the agent's current kinematics and the perceived
//! seek/flee targets, and gets back a single combined force to feed into its
//! integrator. Every contributing behavior is clamped to the configured
//! maximum force before summation; the sum itself is not re-clamped, so a
//! tick with both a seek and a flee target may exceed `max_force`.

use core::f32::consts::TAU;

use thiserror::Error;

/// A 3D vector used for positions, velocities, and forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn magnitude(&self) -> f32 {
        #[cfg(feature = "std")]
        {
            (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
        }
    }

    /// Unit vector in the same direction; the zero vector normalizes to zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Clamp the magnitude to `max`, preserving direction.
    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            self.normalize() * max
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vec3) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn dot(&self, other: &Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Project onto the horizontal plane by zeroing the vertical component.
    pub const fn flatten_y(&self) -> Self {
        Self {
            x: self.x,
            y: 0.0,
            z: self.z,
        }
    }
}

impl core::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Kinematic snapshot read by the controller each tick. Owned by the host's
/// mover; the controller never writes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl KinematicState {
    pub const fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }
}

/// Rejected steering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("max_speed must be positive and finite")]
    InvalidMaxSpeed,
    #[error("max_force must be positive and finite")]
    InvalidMaxForce,
    #[error("wander parameters must be non-negative and finite")]
    InvalidWander,
}

/// Immutable per-agent steering tunables.
///
/// `max_speed` and `max_force` must be positive; the wander scalars must be
/// non-negative. `wander_displacement` is the half-width, in radians, of the
/// per-tick wander angle perturbation. A non-positive speed or force would
/// produce degenerate forces at runtime, so construction rejects it up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    max_speed: f32,
    max_force: f32,
    wander_radius: f32,
    wander_distance: f32,
    wander_displacement: f32,
    ground_plane: bool,
}

impl SteeringParams {
    pub fn new(
        max_speed: f32,
        max_force: f32,
        wander_radius: f32,
        wander_distance: f32,
        wander_displacement: f32,
    ) -> Result<Self, ParamsError> {
        if !(max_speed.is_finite() && max_speed > 0.0) {
            return Err(ParamsError::InvalidMaxSpeed);
        }
        if !(max_force.is_finite() && max_force > 0.0) {
            return Err(ParamsError::InvalidMaxForce);
        }
        for scalar in [wander_radius, wander_distance, wander_displacement] {
            if !(scalar.is_finite() && scalar >= 0.0) {
                return Err(ParamsError::InvalidWander);
            }
        }
        Ok(Self {
            max_speed,
            max_force,
            wander_radius,
            wander_distance,
            wander_displacement,
            ground_plane: true,
        })
    }

    /// Toggle ground-plane steering. When enabled (the default), desired
    /// directions are flattened to the horizontal plane before normalizing;
    /// disable it for free-flight agents.
    pub fn with_ground_plane(mut self, enabled: bool) -> Self {
        self.ground_plane = enabled;
        self
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    pub fn wander_radius(&self) -> f32 {
        self.wander_radius
    }

    pub fn wander_distance(&self) -> f32 {
        self.wander_distance
    }

    pub fn wander_displacement(&self) -> f32 {
        self.wander_displacement
    }

    pub fn ground_plane(&self) -> bool {
        self.ground_plane
    }
}

/// Uniform random source for the wander angle walk.
///
/// Under `std` every [`rand::Rng`] implements this, so hosts pass
/// `thread_rng()` or a seeded `StdRng` directly; tests inject fixed
/// sequences for determinism.
pub trait UniformRng {
    /// Sample uniformly from `[lo, hi)`. An empty range returns `lo`.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

#[cfg(feature = "std")]
impl<R: rand::Rng> UniformRng for R {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if lo < hi {
            self.gen_range(lo..hi)
        } else {
            lo
        }
    }
}

/// Persistent wander angle in radians, wrapped to `[0, 2π)`.
///
/// Initialized once at agent creation and advanced by a bounded random walk
/// for the agent's entire lifetime; wrapping (rather than clamping) keeps the
/// angle a valid rotation input without losing float precision over long
/// runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderState {
    angle: f32,
}

impl WanderState {
    pub fn random<R: UniformRng>(rng: &mut R) -> Self {
        Self {
            angle: rng.uniform(0.0, TAU),
        }
    }

    pub fn from_angle(angle: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Steering force primitives
pub mod steering {
    use super::*;

    /// Clamped steering force toward a desired direction.
    ///
    /// `direction` need not be a unit vector and may be zero; a zero (or
    /// flattened-to-zero) direction yields a zero desired velocity, so the
    /// force decays the current velocity toward rest rather than dividing by
    /// zero. The result never exceeds `max_force`.
    pub fn steer_toward(direction: Vec3, velocity: Vec3, params: &SteeringParams) -> Vec3 {
        let direction = if params.ground_plane() {
            direction.flatten_y()
        } else {
            direction
        };
        let desired = direction.normalize() * params.max_speed();
        (desired - velocity).limit(params.max_force())
    }

    /// Steer toward `target`. Coincident positions produce zero force.
    pub fn seek(agent: Vec3, target: Vec3, velocity: Vec3, params: &SteeringParams) -> Vec3 {
        steer_toward(target - agent, velocity, params)
    }

    /// Steer directly away from `target`.
    pub fn flee(agent: Vec3, target: Vec3, velocity: Vec3, params: &SteeringParams) -> Vec3 {
        steer_toward(agent - target, velocity, params)
    }

    /// Advance the wander walk one step and produce the resulting force.
    ///
    /// The stored angle is perturbed by a uniform delta in
    /// `±wander_displacement` and wrapped, then swept around a circle of
    /// `wander_radius` projected `wander_distance` ahead along the current
    /// velocity. With zero velocity the projected center collapses to the
    /// agent's own position, so the agent steers in place around itself.
    pub fn wander<R: UniformRng>(
        state: &mut WanderState,
        velocity: Vec3,
        params: &SteeringParams,
        rng: &mut R,
    ) -> Vec3 {
        let d = params.wander_displacement();
        state.angle = wrap_angle(state.angle + rng.uniform(-d, d));

        // rotate the forward axis (0, 0, 1) around the vertical axis
        #[cfg(feature = "std")]
        let (sin, cos) = (state.angle.sin(), state.angle.cos());
        #[cfg(not(feature = "std"))]
        let (sin, cos) = (libm::sinf(state.angle), libm::cosf(state.angle));

        let point_on_circle = Vec3::new(sin, 0.0, cos) * params.wander_radius();
        let circle_center = velocity.normalize() * params.wander_distance();

        // a relative offset, not a world position
        steer_toward(circle_center + point_on_circle, velocity, params)
    }
}

/// Per-agent controller combining seek, flee, and wander into one net force
/// per tick.
///
/// Seek and flee each act on the nearest (first) target of their category;
/// wander runs only when both target lists are empty. Contributions are
/// summed raw after per-behavior clamping.
#[derive(Debug, Clone)]
pub struct SteeringController<R> {
    params: SteeringParams,
    wander: WanderState,
    rng: R,
}

impl<R: UniformRng> SteeringController<R> {
    /// Controller with an explicit random source; the initial wander angle is
    /// drawn from `rng`.
    pub fn with_rng(params: SteeringParams, mut rng: R) -> Self {
        let wander = WanderState::random(&mut rng);
        Self {
            params,
            wander,
            rng,
        }
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    pub fn wander_angle(&self) -> f32 {
        self.wander.angle()
    }

    /// Combined steering force for this tick.
    ///
    /// Target lists are ordered nearest first and may be empty; only the
    /// first entry per category is considered. Total over all well-typed
    /// inputs; the only side effect is the wander angle advancing when
    /// wander runs.
    pub fn compute(
        &mut self,
        state: &KinematicState,
        seek_targets: &[Vec3],
        flee_targets: &[Vec3],
    ) -> Vec3 {
        let mut force = Vec3::zero();

        if let Some(target) = seek_targets.first() {
            force += steering::seek(state.position, *target, state.velocity, &self.params);
        }

        if let Some(target) = flee_targets.first() {
            force += steering::flee(state.position, *target, state.velocity, &self.params);
        }

        if seek_targets.is_empty() && flee_targets.is_empty() {
            force += steering::wander(&mut self.wander, state.velocity, &self.params, &mut self.rng);
        }

        force
    }
}

#[cfg(feature = "std")]
impl SteeringController<rand::rngs::ThreadRng> {
    pub fn new(params: SteeringParams) -> Self {
        Self::with_rng(params, rand::thread_rng())
    }
}

/// Host-side integrator contract: exposes current velocity and consumes
/// steering forces. Force application is additive; multiple calls within a
/// tick accumulate.
pub trait Mover {
    fn velocity(&self) -> Vec3;
    fn apply_force(&mut self, force: Vec3);
}

/// Host-side perception contract: target positions ordered nearest first,
/// already filtered for range and relevance. May be empty.
pub trait Perception {
    fn targets(&self) -> &[Vec3];
}

/// Minimal point-mass integrator for hosts and tests.
///
/// Accumulates applied forces into an acceleration; [`step`](Self::step)
/// folds the acceleration into the velocity (clamped to `max_speed`),
/// advances the position, and resets the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub position: Vec3,
    pub velocity: Vec3,
    acceleration: Vec3,
    max_speed: f32,
}

impl PointMass {
    pub fn new(position: Vec3, velocity: Vec3, max_speed: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::zero(),
            max_speed,
        }
    }

    pub fn kinematics(&self) -> KinematicState {
        KinematicState::new(self.position, self.velocity)
    }

    /// Integrate one tick.
    pub fn step(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec3::zero();
    }

    /// Wrap each coordinate into the box `[min, max)`, torus style.
    pub fn wrap_bounds(&mut self, min: Vec3, max: Vec3) {
        self.position.x = wrap_coord(self.position.x, min.x, max.x);
        self.position.y = wrap_coord(self.position.y, min.y, max.y);
        self.position.z = wrap_coord(self.position.z, min.z, max.z);
    }
}

fn wrap_coord(value: f32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        lo + (value - lo).rem_euclid(hi - lo)
    } else {
        value
    }
}

impl Mover for PointMass {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }
}
