use clap::{Parser, ValueEnum};
use inpaint_kit::config::{
    self, EngineKind, FillOverrides, MaskSource, RunConfig, WorkingSize,
};
use inpaint_kit::io::{load_mask, load_rgba_image, resize_to, save_png};
use inpaint_kit::{FillStats, InpaintAlgorithm, inpaint_with_stats};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Diffusion,
    RegionFill,
}

impl From<AlgorithmArg> for EngineKind {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Diffusion => Self::Diffusion,
            AlgorithmArg::RegionFill => Self::RegionFill,
        }
    }
}

/// Fill the masked region of an image from its surroundings.
#[derive(Debug, Parser)]
#[command(name = "inpaint_demo", version)]
struct Cli {
    /// JSON run configuration; explicit flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source image.
    #[arg(long, required_unless_present = "config")]
    input: Option<PathBuf>,

    /// Mask image; nonzero pixels are filled.
    #[arg(long, required_unless_present = "config")]
    mask: Option<PathBuf>,

    /// Where the PNG result is written.
    #[arg(long, required_unless_present = "config")]
    output: Option<PathBuf>,

    /// Read the mask from the alpha channel instead of luma.
    #[arg(long)]
    mask_from_alpha: bool,

    /// Resample image and mask to WIDTHxHEIGHT before filling.
    #[arg(long)]
    resize: Option<WorkingSize>,

    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Sweep / pass budget.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Diffusion convergence tolerance.
    #[arg(long)]
    tolerance: Option<f32>,

    /// Region fill: luma at or above which a pixel seeds the fill.
    #[arg(long)]
    white_threshold: Option<f32>,

    /// Region fill: 4 or 8.
    #[arg(long)]
    connectivity: Option<u8>,

    /// Region fill: leave unreachable masked pixels untouched.
    #[arg(long)]
    no_fill_residual: bool,
}

impl Cli {
    fn resolve(&self) -> Result<RunConfig, String> {
        let mut run = match &self.config {
            Some(path) => config::load_config(path)?,
            None => RunConfig {
                input: self.input.clone().ok_or("--input is required")?,
                mask: self.mask.clone().ok_or("--mask is required")?,
                output: self.output.clone().ok_or("--output is required")?,
                mask_source: MaskSource::default(),
                working_size: None,
                fill: InpaintAlgorithm::default(),
            },
        };

        if let Some(input) = &self.input {
            run.input = input.clone();
        }
        if let Some(mask) = &self.mask {
            run.mask = mask.clone();
        }
        if let Some(output) = &self.output {
            run.output = output.clone();
        }
        if self.mask_from_alpha {
            run.mask_source = MaskSource::Alpha;
        }
        if self.resize.is_some() {
            run.working_size = self.resize;
        }

        let overrides = FillOverrides {
            engine: self.algorithm.map(EngineKind::from),
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            white_threshold: self.white_threshold,
            connectivity: self.connectivity,
            no_fill_residual: self.no_fill_residual,
        };
        run.fill = overrides.apply(run.fill).map_err(|e| e.to_string())?;
        Ok(run)
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let run = cli.resolve()?;

    let image = load_rgba_image(&run.input)?;
    let image = match run.working_size {
        Some(size) => resize_to(&image, size),
        None => image,
    };
    let mask = load_mask(&run.mask, run.mask_source, run.working_size)?;

    let started = Instant::now();
    let (result, stats) =
        inpaint_with_stats(&image, &mask, &run.fill).map_err(|e| e.to_string())?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    save_png(&run.output, &result)?;

    let (width, height) = result.dimensions();
    print!(
        "{} {width}x{height}, {} masked, {elapsed_ms:.1} ms: ",
        run.fill.name(),
        mask.masked_count()
    );
    match stats {
        FillStats::Diffusion(stats) => println!(
            "{} sweeps, converged={}, max_delta={:.3}",
            stats.iterations, stats.converged, stats.max_delta
        ),
        FillStats::RegionFill(stats) => println!(
            "{} passes, {} flipped, {} residual, {} remaining",
            stats.passes, stats.flipped, stats.residual_filled, stats.remaining
        ),
    }
    println!("Result written to {}", run.output.display());
    Ok(())
}
