//! Fixed-step trajectory integration.
//!
//! Advances a point mass under constant vertical acceleration plus attractor
//! pull until it leaves the canvas, collecting every post-step position. The
//! stepping scheme is semi-implicit Euler: the position update uses the
//! velocity already advanced by this step's acceleration. That ordering is
//! what keeps the cheap first-order scheme stable and must not be changed.

use crate::config::SimulationConfig;
use crate::forces::{check_clearance, net_attraction, Body};
use crate::TrajGenError;
use nalgebra::Vector2;
use serde::Serialize;

/// Initial position and velocity of the simulated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InitialState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl InitialState {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vector2<f64> {
        Vector2::new(self.vx, self.vy)
    }
}

/// Why an integration run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// The point left the canvas rectangle
    LeftBounds,
    /// The step ceiling was reached first (orbit trapping, slow drift)
    StepLimit,
}

/// The ordered positions visited by one integration run
///
/// The initial position is not included; the last point is the first one
/// outside the bounds (when `termination` is `LeftBounds`). Immutable once
/// returned.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub points: Vec<Vector2<f64>>,
    pub termination: Termination,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Integrate one trajectory from `initial` until it leaves `config.bounds`
///
/// Per step: query the attractor pull at the current position, add the
/// constant vertical acceleration to its y component, advance the velocity,
/// then advance the position with the updated velocity, and record it. A
/// start already outside the bounds yields an empty trajectory.
///
/// Errors if the start position is degenerately close to an attractor. With
/// `max_steps: None` a configuration that never exits (a captured orbit)
/// loops forever; the default ceiling turns that into `StepLimit`.
pub fn integrate(
    initial: &InitialState,
    bodies: &[Body],
    config: &SimulationConfig,
) -> Result<Trajectory, TrajGenError> {
    check_clearance(&initial.position(), bodies)?;

    let dt = config.dt;
    let mut position = initial.position();
    let mut velocity = initial.velocity();
    let mut points = Vec::new();
    let mut steps: u64 = 0;

    while config.bounds.contains(&position) {
        if let Some(limit) = config.max_steps {
            if steps >= limit {
                return Ok(Trajectory {
                    points,
                    termination: Termination::StepLimit,
                });
            }
        }

        let mut accel = net_attraction(&position, bodies, config.g_constant);
        accel.y += config.vertical_accel;

        // Velocity first, then position from the updated velocity.
        velocity += dt * accel;
        position += dt * velocity;

        points.push(position);
        steps += 1;
    }

    Ok(Trajectory {
        points,
        termination: Termination::LeftBounds,
    })
}
