/// Physical and numerical constants used in trajectory generation

/// Default inverse-square attraction scaling constant
///
/// This is a tuning constant for visually distinct trajectories, not a
/// physical gravitational constant. Acceleration toward a body of mass `m`
/// at distance `d` is `G * m / d²` canvas units per simulated second squared.
pub const DEFAULT_G: f64 = 1000.0;

/// Constant vertical acceleration (canvas units / s²)
///
/// Negative sign pulls trajectories toward y = 0 (the bottom canvas edge).
pub const EARTH_ACCEL: f64 = -9.8;

/// Default fixed integration time step in simulated seconds
pub const DEFAULT_DT: f64 = 0.01;

/// Default simulation canvas width in canvas units (= native raster pixels)
pub const DEFAULT_CANVAS_WIDTH: f64 = 500.0;

/// Default simulation canvas height in canvas units (= native raster pixels)
pub const DEFAULT_CANVAS_HEIGHT: f64 = 500.0;

/// Default side length of the square downsampled output image
pub const DEFAULT_OUTPUT_SIZE: u32 = 28;

/// Default trajectory stroke width in native canvas pixels
pub const DEFAULT_STROKE_WIDTH: f64 = 10.0;

/// Default iteration ceiling for a single integration run
///
/// A body trapped in a stable orbit around an attractor never leaves the
/// canvas. The ceiling converts that hang into a reported `StepLimit`
/// outcome; set `max_steps` to `None` for the unbounded behavior.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Minimum accepted distance between a start position and any attractor
///
/// The attraction magnitude diverges as the separation approaches zero;
/// starts closer than this are rejected before integration begins.
pub const MIN_BODY_DISTANCE: f64 = 1e-6;

/// Number of completed samples between progress reports
pub const PROGRESS_INTERVAL: usize = 100;
