//! ringsynth CLI — generate and inspect synthetic ring datasets.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ringsynth::{generate_dataset, DatasetRecord, GeneratorConfig};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ringsynth")]
#[command(about = "Generate sparse ring grids with ground-truth circle parameters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset of pruned ring grids.
    Generate(CliGenerateArgs),

    /// Print the header and hit count of a dataset file.
    Inspect {
        /// Path to a dataset text file.
        #[arg(long)]
        file: PathBuf,

        /// Print the record as JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
struct CliGenerateArgs {
    /// Base configuration (JSON); flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Linear grid size n.
    #[arg(long)]
    size: Option<usize>,

    /// Number of grids to generate.
    #[arg(long)]
    samples: Option<usize>,

    /// Circles per grid.
    #[arg(long)]
    circles: Option<usize>,

    /// Mean of the center distribution (default: n/2).
    #[arg(long)]
    mu: Option<f64>,

    /// Standard deviation of the center distribution (default: mu/2).
    #[arg(long)]
    sigma: Option<f64>,

    /// Smallest radius, inclusive (default: mu/4).
    #[arg(long)]
    rmin: Option<f64>,

    /// Largest radius, exclusive (default: mu).
    #[arg(long)]
    rmax: Option<f64>,

    /// Survival probability of each ring cell in [0, 1].
    #[arg(long)]
    threshold: Option<f64>,

    /// Maximum number of set cells kept per grid.
    #[arg(long)]
    max_hits: Option<usize>,

    /// Give up on a circle after this many rejected center draws.
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory (created if absent).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Also write a PNG next to every text file.
    #[arg(long)]
    png: bool,

    /// Pixels per cell in PNG output.
    #[arg(long)]
    png_scale: Option<u32>,

    /// Path to write the run manifest (JSON).
    #[arg(long)]
    manifest: Option<PathBuf>,
}

impl CliGenerateArgs {
    fn to_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading config: {}", path.display());
                GeneratorConfig::from_json_file(path)?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(v) = self.size {
            config.grid_size = v;
        }
        if let Some(v) = self.samples {
            config.n_samples = v;
        }
        if let Some(v) = self.circles {
            config.n_circles = v;
        }
        if self.mu.is_some() {
            config.distribution.mu = self.mu;
        }
        if self.sigma.is_some() {
            config.distribution.sigma = self.sigma;
        }
        if self.rmin.is_some() {
            config.distribution.rmin = self.rmin;
        }
        if self.rmax.is_some() {
            config.distribution.rmax = self.rmax;
        }
        if let Some(v) = self.threshold {
            config.prune.threshold = v;
        }
        if let Some(v) = self.max_hits {
            config.prune.max_hits = v;
        }
        if self.max_attempts.is_some() {
            config.sampler.max_attempts = self.max_attempts;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
        if self.png {
            config.write_png = true;
        }
        if let Some(v) = self.png_scale {
            config.png_scale = v;
        }

        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Inspect { file, json } => run_inspect(&file, json),
    }
}

// ── generate ───────────────────────────────────────────────────────────

fn run_generate(args: &CliGenerateArgs) -> CliResult<()> {
    let config = args.to_config()?;
    let params = config.distribution.resolve(config.grid_size);
    tracing::info!(
        "mu={:.2} sigma={:.2} r=[{:.2}, {:.2}) threshold={:.2} max_hits={}",
        params.mu,
        params.sigma,
        params.rmin,
        params.rmax,
        config.prune.threshold,
        config.prune.max_hits,
    );

    let report = generate_dataset(&config)?;

    for (index, error) in report.failures() {
        tracing::warn!("sample {} skipped: {}", index, error);
    }

    if let Some(path) = &args.manifest {
        report.write_manifest(path)?;
        tracing::info!("Manifest written to {}", path.display());
    }

    println!(
        "{} written, {} failed ({})",
        report.n_written(),
        report.n_failed(),
        config.output_dir.display()
    );
    Ok(())
}

// ── inspect ────────────────────────────────────────────────────────────

fn run_inspect(path: &std::path::Path, json: bool) -> CliResult<()> {
    let record = DatasetRecord::read(path).map_err(|e| -> CliError {
        format!("Failed to read {}: {}", path.display(), e).into()
    })?;
    let n = record.grid.size();
    let hits = record.grid.count_ones();

    if json {
        let value = serde_json::json!({
            "file": path.to_string_lossy(),
            "grid_size": n,
            "hits": hits,
            "binary": record.grid.is_binary(),
            "circles": record.circles,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", path.display());
    println!("  grid:     {}x{}", n, n);
    println!("  hits:     {}", hits);
    if !record.grid.is_binary() {
        println!("  warning:  grid contains values other than 0/1");
    }
    println!("  circles:  {}", record.circles.len());
    for (i, c) in record.circles.iter().enumerate() {
        println!(
            "    [{}] center=({}, {}) r={}",
            i, c.center[0], c.center[1], c.radius
        );
    }
    Ok(())
}
