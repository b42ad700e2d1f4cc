//! Inverse-square attraction from fixed "planet" bodies.
//!
//! The force model is a pure function of position: it sums the pull of every
//! attractor and knows nothing about the constant vertical acceleration,
//! which the integrator adds separately. That keeps it usable for free-fall
//! runs with an empty body set.

use crate::constants::MIN_BODY_DISTANCE;
use crate::TrajGenError;
use nalgebra::Vector2;

/// A fixed point mass exerting inverse-square attraction on the moving point
///
/// Bodies never move and do not attract each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2<f64>,
    pub mass: f64,
}

impl Body {
    pub fn new(position: Vector2<f64>, mass: f64) -> Self {
        Self { position, mass }
    }
}

/// Net acceleration at `position` from every attractor in `bodies`
///
/// Each body contributes `g_constant * mass / d²` directed along the unit
/// vector from `position` toward the body; contributions are vector-summed.
/// An empty body set yields the zero vector for any position.
///
/// The caller must keep `position` clear of every body position (see
/// [`check_clearance`]); at exact coincidence the magnitude is undefined.
pub fn net_attraction(position: &Vector2<f64>, bodies: &[Body], g_constant: f64) -> Vector2<f64> {
    bodies
        .iter()
        .map(|body| {
            let dr = body.position - position;
            let d2 = dr.norm_squared();
            let d = d2.sqrt();
            // a = G*m/d² along dr/d, folded into one scale factor
            dr * (g_constant * body.mass / (d2 * d))
        })
        .fold(Vector2::zeros(), |acc, a| acc + a)
}

/// Reject positions degenerately close to an attractor
///
/// Distance below `MIN_BODY_DISTANCE` would blow up the force magnitude;
/// validated here so it never surfaces as a NaN mid-integration.
pub fn check_clearance(position: &Vector2<f64>, bodies: &[Body]) -> Result<(), TrajGenError> {
    for body in bodies {
        if (body.position - position).norm() < MIN_BODY_DISTANCE {
            return Err(TrajGenError::DegenerateStart { sample: None });
        }
    }
    Ok(())
}
