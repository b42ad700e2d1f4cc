use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use trajgen::{
    configure_thread_pool, generate_dataset, integrate, Body, CanvasBounds, ErrorPolicy,
    GeneratorConfig, InitialConditionPolicy, InitialState, SimulationConfig, Termination,
};

#[derive(Parser)]
#[command(name = "trajgen")]
#[command(version = "0.1.0")]
#[command(about = "Synthetic ballistic trajectory image dataset generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a labeled image dataset
    Generate {
        /// Number of samples to generate [default: 10]
        #[arg(short = 'n', long)]
        num_samples: Option<usize>,

        /// Output directory, images go to <out>/images [default: dataset]
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// JSON configuration file; explicit flags override its values
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Base RNG seed [default: 0]
        #[arg(long)]
        seed: Option<u64>,

        /// Side length of the square output images
        #[arg(long)]
        image_size: Option<u32>,

        /// Trajectory stroke width in canvas pixels
        #[arg(long)]
        stroke_width: Option<f64>,

        /// Integration time step (seconds)
        #[arg(long)]
        dt: Option<f64>,

        /// Inverse-square attraction constant
        #[arg(long)]
        g_constant: Option<f64>,

        /// Iteration ceiling per trajectory (0 = unbounded)
        #[arg(long)]
        max_steps: Option<u64>,

        /// Initial-condition policy preset
        #[arg(long, value_enum)]
        policy: Option<PolicyPreset>,

        /// What to do when a single sample fails [default: skip]
        #[arg(long, value_enum)]
        on_error: Option<ErrorChoice>,

        /// Number of worker threads (default: rayon's choice)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Integrate a single trajectory and print it
    Trajectory {
        /// Initial x position
        #[arg(short = 'x', long, default_value = "0.0")]
        x: f64,

        /// Initial y position
        #[arg(short = 'y', long, default_value = "250.0")]
        y: f64,

        /// Initial horizontal velocity
        #[arg(long, default_value = "30.0")]
        vx: f64,

        /// Initial vertical velocity
        #[arg(long, default_value = "0.0")]
        vy: f64,

        /// Canvas width
        #[arg(long, default_value = "500.0")]
        width: f64,

        /// Canvas height
        #[arg(long, default_value = "500.0")]
        height: f64,

        /// Integration time step (seconds)
        #[arg(long, default_value = "0.01")]
        dt: f64,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyPreset {
    /// Left edge, random height, horizontal speed only
    Edge,
    /// Bottom-left corner, random speed in both axes
    Corner,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ErrorChoice {
    Skip,
    Abort,
}

#[derive(Debug, Serialize)]
struct TrajectoryOutput {
    initial: InitialState,
    termination: Termination,
    num_points: usize,
    points: Vec<[f64; 2]>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            num_samples,
            out,
            config,
            seed,
            image_size,
            stroke_width,
            dt,
            g_constant,
            max_steps,
            policy,
            on_error,
            threads,
        } => {
            configure_thread_pool(threads)?;

            let mut generator = match config {
                Some(path) => GeneratorConfig::from_json_file(&path)?,
                None => GeneratorConfig::default(),
            };
            if let Some(n) = num_samples {
                generator.num_samples = n;
            }
            if let Some(dir) = out {
                generator.output_dir = dir;
            }
            if let Some(s) = seed {
                generator.seed = s;
            }
            if let Some(size) = image_size {
                generator.render.output_size = size;
            }
            if let Some(w) = stroke_width {
                generator.render.stroke_width = w;
            }
            if let Some(step) = dt {
                generator.simulation.dt = step;
            }
            if let Some(g) = g_constant {
                generator.simulation.g_constant = g;
            }
            if let Some(limit) = max_steps {
                generator.simulation.max_steps = if limit == 0 { None } else { Some(limit) };
            }
            if let Some(preset) = policy {
                generator.policy = match preset {
                    PolicyPreset::Edge => {
                        InitialConditionPolicy::edge_launch(&generator.simulation.bounds)
                    }
                    PolicyPreset::Corner => InitialConditionPolicy::corner_launch(),
                };
            }
            if let Some(choice) = on_error {
                generator.on_error = match choice {
                    ErrorChoice::Skip => ErrorPolicy::Skip,
                    ErrorChoice::Abort => ErrorPolicy::Abort,
                };
            }

            let summary = generate_dataset(&generator)?;
            println!(
                "✓ Generated {} images in {:.2}s ({} skipped)",
                summary.generated,
                summary.elapsed.as_secs_f64(),
                summary.skipped
            );
            println!("✓ Images in {}", generator.output_dir.join("images").display());
            println!(
                "✓ Parameters in {}",
                generator.output_dir.join("initial_parameters.csv").display()
            );
        }

        Commands::Trajectory {
            x,
            y,
            vx,
            vy,
            width,
            height,
            dt,
            output,
        } => {
            let mut simulation = SimulationConfig::default();
            simulation.bounds = CanvasBounds::new(width, height);
            simulation.dt = dt;
            simulation.validate()?;

            let initial = InitialState::new(x, y, vx, vy);
            let bodies: Vec<Body> = Vec::new();
            let trajectory = integrate(&initial, &bodies, &simulation)?;
            display_trajectory(&initial, &trajectory, output)?;
        }
    }

    Ok(())
}

fn display_trajectory(
    initial: &InitialState,
    trajectory: &trajgen::Trajectory,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let result = TrajectoryOutput {
                initial: *initial,
                termination: trajectory.termination,
                num_points: trajectory.len(),
                points: trajectory.points.iter().map(|p| [p.x, p.y]).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        OutputFormat::Csv => {
            println!("step,x,y");
            for (i, p) in trajectory.points.iter().enumerate() {
                println!("{},{:.3},{:.3}", i + 1, p.x, p.y);
            }
        }

        OutputFormat::Table => {
            println!(
                "Initial state: ({:.2}, {:.2}) with velocity ({:.2}, {:.2})",
                initial.x, initial.y, initial.vx, initial.vy
            );
            println!("Points:        {}", trajectory.len());
            println!("Termination:   {:?}", trajectory.termination);

            if let Some(last) = trajectory.points.last() {
                println!("Final point:   ({:.2}, {:.2})", last.x, last.y);
            }

            // Print roughly every tenth point
            let step = (trajectory.len() / 10).max(1);
            println!("\n   Step │        X │        Y");
            println!("────────┼──────────┼──────────");
            for (i, p) in trajectory.points.iter().enumerate() {
                if i % step == 0 || i == trajectory.len() - 1 {
                    println!("{:>7} │ {:>8.2} │ {:>8.2}", i + 1, p.x, p.y);
                }
            }
        }
    }

    Ok(())
}
