//! Batch dataset generation: sample, integrate, render, persist.
//!
//! Each sample is independent and draws from its own RNG stream seeded with
//! `base seed + sample index`, so a dataset reproduces exactly for a given
//! seed regardless of thread count. Samples run in parallel across the rayon
//! pool; the parameter table is written in sample order afterwards.

use crate::config::{ErrorPolicy, GeneratorConfig};
use crate::constants::PROGRESS_INTERVAL;
use crate::forces::{check_clearance, Body};
use crate::integrator::{integrate, InitialState, Termination};
use crate::render::{downsample, render_trajectory};
use crate::sampling::PolicySampler;
use crate::TrajGenError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// One successfully generated sample
#[derive(Debug, Clone)]
pub struct GeneratedSample {
    /// Dataset ordinal; also the image file index
    pub index: usize,
    /// The recorded label: the drawn initial parameters
    pub initial: InitialState,
    /// Number of integration steps until the point left the canvas
    pub steps: usize,
}

/// Outcome of a whole generation run
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub generated: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Configure the global rayon thread pool
///
/// `None` keeps the default. A failure to reconfigure (the pool may already
/// be initialized) is reported as a warning and the run continues with
/// whatever pool exists.
pub fn configure_thread_pool(num_threads: Option<usize>) -> Result<(), TrajGenError> {
    if let Some(n) = num_threads {
        if n == 0 {
            return Err("thread count must be greater than 0".into());
        }
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            eprintln!("Warning: failed to set {} threads, using default threading: {}", n, e);
        }
    }
    Ok(())
}

/// Generate the full dataset described by `config`
///
/// Creates `<output_dir>/images/example_<i>.png` per sample plus
/// `<output_dir>/initial_parameters.csv`. Per-sample failures follow
/// `config.on_error`: `Skip` reports the sample and continues (its image
/// index is simply absent), `Abort` stops the run at the first failure.
pub fn generate_dataset(config: &GeneratorConfig) -> Result<DatasetSummary, TrajGenError> {
    config.validate()?;
    let sampler = config.policy.sampler()?;
    let bodies: Vec<Body> = config.bodies.iter().map(Body::from).collect();

    let images_dir = config.output_dir.join("images");
    fs::create_dir_all(&images_dir)?;

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let total = config.num_samples;

    let results: Vec<Result<Option<GeneratedSample>, TrajGenError>> = (0..total)
        .into_par_iter()
        .map(|i| {
            let outcome = generate_sample(i, &sampler, &bodies, config, &images_dir);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_INTERVAL == 0 && done < total {
                let elapsed = start.elapsed().as_secs_f64();
                let remaining = elapsed * (total - done) as f64 / done as f64;
                println!(
                    "Generated {} of {} images in {:.2}s (about {:.2}s remaining)",
                    done, total, elapsed, remaining
                );
            }

            match outcome {
                Ok(sample) => Ok(Some(sample)),
                Err(e) => match config.on_error {
                    ErrorPolicy::Skip => {
                        eprintln!("Warning: skipping sample: {}", e);
                        Ok(None)
                    }
                    ErrorPolicy::Abort => Err(e),
                },
            }
        })
        .collect();

    let mut samples = Vec::with_capacity(total);
    let mut skipped = 0;
    for result in results {
        match result? {
            Some(sample) => samples.push(sample),
            None => skipped += 1,
        }
    }

    write_initial_parameters(&config.output_dir.join("initial_parameters.csv"), &samples)?;

    Ok(DatasetSummary {
        generated: samples.len(),
        skipped,
        elapsed: start.elapsed(),
    })
}

fn generate_sample(
    index: usize,
    sampler: &PolicySampler,
    bodies: &[Body],
    config: &GeneratorConfig,
    images_dir: &Path,
) -> Result<GeneratedSample, TrajGenError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(index as u64));
    let initial = sampler.sample(&mut rng);

    check_clearance(&initial.position(), bodies)
        .map_err(|_| TrajGenError::DegenerateStart { sample: Some(index) })?;

    let trajectory = integrate(&initial, bodies, &config.simulation)?;
    if trajectory.termination == Termination::StepLimit {
        return Err(TrajGenError::DidNotTerminate {
            sample: index,
            steps: trajectory.len() as u64,
        });
    }

    let canvas = render_trajectory(
        &trajectory.points,
        bodies,
        &config.simulation.bounds,
        &config.render,
    );
    let img = downsample(&canvas, config.render.output_size);
    img.save(images_dir.join(format!("example_{}.png", index)))?;

    Ok(GeneratedSample {
        index,
        initial,
        steps: trajectory.len(),
    })
}

/// Write the headerless parameter table: one `x,y,vx,vy` row per sample
///
/// Values are formatted to two decimal places, rows in sample order.
pub fn write_initial_parameters(
    path: &Path,
    samples: &[GeneratedSample],
) -> Result<(), TrajGenError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for sample in samples {
        writeln!(
            writer,
            "{:.2},{:.2},{:.2},{:.2}",
            sample.initial.x, sample.initial.y, sample.initial.vx, sample.initial.vy
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(index: usize, x: f64, y: f64, vx: f64, vy: f64) -> GeneratedSample {
        GeneratedSample {
            index,
            initial: InitialState::new(x, y, vx, vy),
            steps: 0,
        }
    }

    #[test]
    fn test_parameter_table_format() {
        let dir = std::env::temp_dir().join(format!("trajgen_csv_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("initial_parameters.csv");

        let samples = vec![
            sample_at(0, 0.0, 128.5, 43.21987, 0.0),
            sample_at(1, 0.0, 301.25, 20.0, -5.5),
        ];
        write_initial_parameters(&path, &samples).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0.00,128.50,43.22,0.00\n0.00,301.25,20.00,-5.50\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(configure_thread_pool(Some(0)).is_err());
        assert!(configure_thread_pool(None).is_ok());
    }
}
