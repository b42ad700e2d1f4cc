//! Configuration objects for simulation and dataset generation.
//!
//! All runtime settings live in explicit immutable structs passed into the
//! integrator and generator at call time. Nothing is process-global, so
//! sample generation parallelizes without shared mutable state.

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DT, DEFAULT_G, DEFAULT_MAX_STEPS,
    DEFAULT_OUTPUT_SIZE, DEFAULT_STROKE_WIDTH, EARTH_ACCEL, MIN_BODY_DISTANCE,
};
use crate::forces::Body;
use crate::sampling::{InitialConditionPolicy, ParamDist};
use crate::TrajGenError;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// The valid simulation region: the rectangle [0, width] x [0, height]
///
/// Integration terminates when the moving point leaves this rectangle.
/// Canvas units double as native raster pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a position lies inside the bounds, edges inclusive.
    ///
    /// NaN coordinates compare false and therefore count as outside.
    pub fn contains(&self, p: &Vector2<f64>) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Everything one integration run reads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub bounds: CanvasBounds,
    /// Fixed time step in simulated seconds
    pub dt: f64,
    /// Inverse-square attraction scaling constant
    pub g_constant: f64,
    /// Constant vertical acceleration added each step (negative = down)
    pub vertical_accel: f64,
    /// Iteration ceiling; `None` runs unbounded
    pub max_steps: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds: CanvasBounds::default(),
            dt: DEFAULT_DT,
            g_constant: DEFAULT_G,
            vertical_accel: EARTH_ACCEL,
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), TrajGenError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(format!("time step must be positive and finite, got {}", self.dt).into());
        }
        if !self.bounds.width.is_finite() || self.bounds.width <= 0.0 {
            return Err(format!("canvas width must be positive, got {}", self.bounds.width).into());
        }
        if !self.bounds.height.is_finite() || self.bounds.height <= 0.0 {
            return Err(
                format!("canvas height must be positive, got {}", self.bounds.height).into(),
            );
        }
        if !self.g_constant.is_finite() {
            return Err("attraction constant must be finite".into());
        }
        if !self.vertical_accel.is_finite() {
            return Err("vertical acceleration must be finite".into());
        }
        Ok(())
    }
}

/// Serde mirror of a fixed attractor body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyConfig {
    pub x: f64,
    pub y: f64,
    pub mass: f64,
}

impl From<&BodyConfig> for Body {
    fn from(cfg: &BodyConfig) -> Self {
        Body::new(Vector2::new(cfg.x, cfg.y), cfg.mass)
    }
}

/// Rasterization settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of the square downsampled output image
    pub output_size: u32,
    /// Stroke width of the trajectory polyline in native canvas pixels
    pub stroke_width: f64,
    /// Whether attractor bodies are drawn as filled circles
    pub draw_bodies: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_size: DEFAULT_OUTPUT_SIZE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            draw_bodies: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), TrajGenError> {
        if self.output_size == 0 {
            return Err("output image size must be at least 1".into());
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(
                format!("stroke width must be positive, got {}", self.stroke_width).into(),
            );
        }
        Ok(())
    }
}

/// What to do when a single sample fails
///
/// Failures are isolated per sample either way; this selects whether the run
/// records the failure and continues or stops at the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    Skip,
    Abort,
}

/// Full configuration of one dataset generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_samples: usize,
    pub output_dir: PathBuf,
    /// Base RNG seed; sample `i` draws from a stream seeded with `seed + i`
    pub seed: u64,
    pub policy: InitialConditionPolicy,
    pub bodies: Vec<BodyConfig>,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub on_error: ErrorPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let simulation = SimulationConfig::default();
        Self {
            num_samples: 10,
            output_dir: PathBuf::from("dataset"),
            seed: 0,
            policy: InitialConditionPolicy::edge_launch(&simulation.bounds),
            bodies: Vec::new(),
            simulation,
            render: RenderConfig::default(),
            on_error: ErrorPolicy::Skip,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their defaults, so partial configs are accepted.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TrajGenError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| format!("failed to parse {}: {}", path.as_ref().display(), e).into())
    }

    /// Validate every setting before any integration begins
    pub fn validate(&self) -> Result<(), TrajGenError> {
        if self.num_samples == 0 {
            return Err("number of samples must be at least 1".into());
        }
        self.simulation.validate()?;
        self.render.validate()?;
        self.policy.validate()?;

        for (i, body) in self.bodies.iter().enumerate() {
            if !body.mass.is_finite() || body.mass <= 0.0 {
                return Err(format!("body {}: mass must be positive, got {}", i, body.mass).into());
            }
            if !body.x.is_finite() || !body.y.is_finite() {
                return Err(format!("body {}: position must be finite", i).into());
            }
        }

        // A fully fixed start can be checked against the attractors up front;
        // randomized starts are checked per sample at draw time.
        if let (ParamDist::Fixed { value: x }, ParamDist::Fixed { value: y }) =
            (&self.policy.x, &self.policy.y)
        {
            let start = Vector2::new(*x, *y);
            for body in &self.bodies {
                let d = (Vector2::new(body.x, body.y) - start).norm();
                if d < MIN_BODY_DISTANCE {
                    return Err(TrajGenError::DegenerateStart { sample: None });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = CanvasBounds::new(500.0, 500.0);
        assert!(bounds.contains(&Vector2::new(0.0, 0.0)));
        assert!(bounds.contains(&Vector2::new(500.0, 500.0)));
        assert!(!bounds.contains(&Vector2::new(500.001, 250.0)));
        assert!(!bounds.contains(&Vector2::new(250.0, -0.001)));
    }

    #[test]
    fn test_bounds_rejects_nan() {
        let bounds = CanvasBounds::default();
        assert!(!bounds.contains(&Vector2::new(f64::NAN, 10.0)));
        assert!(!bounds.contains(&Vector2::new(10.0, f64::NAN)));
    }

    #[test]
    fn test_zero_time_step_rejected() {
        let mut config = SimulationConfig::default();
        config.dt = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_mass_rejected() {
        let mut config = GeneratorConfig::default();
        config.bodies.push(BodyConfig { x: 100.0, y: 100.0, mass: -5.0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fixed_start_on_body_rejected() {
        let mut config = GeneratorConfig::default();
        config.policy.x = ParamDist::Fixed { value: 100.0 };
        config.policy.y = ParamDist::Fixed { value: 100.0 };
        config.bodies.push(BodyConfig { x: 100.0, y: 100.0, mass: 10.0 });
        match config.validate() {
            Err(TrajGenError::DegenerateStart { sample: None }) => {}
            other => panic!("expected DegenerateStart, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GeneratorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.num_samples, config.num_samples);
        assert_eq!(parsed.simulation.max_steps, config.simulation.max_steps);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: GeneratorConfig =
            serde_json::from_str(r#"{"num_samples": 3, "seed": 7}"#).unwrap();
        assert_eq!(parsed.num_samples, 3);
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.render.output_size, DEFAULT_OUTPUT_SIZE);
    }
}
