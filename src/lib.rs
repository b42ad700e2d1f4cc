//! # Trajgen
//!
//! Generator of synthetic labeled images of 2-D ballistic trajectories.
//!
//! Each sample draws initial conditions from a configurable random policy,
//! integrates a point mass under constant downward acceleration plus
//! inverse-square attraction from fixed "planet" bodies, rasterizes the path
//! as a thick polyline, downsamples it to a small square image, and records
//! the initial parameters in a CSV table indexed like the image files.

// Re-export the main types and functions
pub use config::{
    BodyConfig, CanvasBounds, ErrorPolicy, GeneratorConfig, RenderConfig, SimulationConfig,
};
pub use dataset::{configure_thread_pool, generate_dataset, DatasetSummary, GeneratedSample};
pub use error::TrajGenError;
pub use forces::{check_clearance, net_attraction, Body};
pub use integrator::{integrate, InitialState, Termination, Trajectory};
pub use render::{downsample, render_trajectory};
pub use sampling::{InitialConditionPolicy, ParamDist, PolicySampler};

// Module declarations
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod render;
pub mod sampling;
