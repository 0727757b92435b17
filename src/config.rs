//! Runtime configuration for the `inpaint_demo` tool.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::InpaintError;
use crate::inpaint_kit::algorithm::InpaintAlgorithm;
use crate::inpaint_kit::diffusion::DiffusionOptions;
use crate::inpaint_kit::region_fill::{Connectivity, RegionFillOptions};

/// How a mask image is turned into a [`crate::MaskGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskSource {
    /// Any nonzero luma selects the pixel.
    #[default]
    Luma,
    /// Any nonzero alpha selects the pixel (a painted overlay).
    Alpha,
}

/// Size both image and mask are resampled to before filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorkingSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for WorkingSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `256x256`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: u32 = width
            .trim()
            .parse()
            .map_err(|e| format!("Invalid width in '{s}': {e}"))?;
        let height: u32 = height
            .trim()
            .parse()
            .map_err(|e| format!("Invalid height in '{s}': {e}"))?;
        if width == 0 || height == 0 {
            return Err(format!("Working size must be non-zero, got '{s}'"));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for WorkingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub mask: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub mask_source: MaskSource,
    #[serde(default)]
    pub working_size: Option<WorkingSize>,
    #[serde(default)]
    pub fill: InpaintAlgorithm,
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parses and validates a JSON run configuration.
pub fn parse_config(contents: &str) -> Result<RunConfig, String> {
    let config: RunConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    config.fill.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Engine choice accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Diffusion,
    RegionFill,
}

/// Command-line adjustments applied on top of a configured algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FillOverrides {
    pub engine: Option<EngineKind>,
    pub max_iterations: Option<u32>,
    pub tolerance: Option<f32>,
    pub white_threshold: Option<f32>,
    pub connectivity: Option<u8>,
    pub no_fill_residual: bool,
}

impl FillOverrides {
    /// Applies the overrides to `base`.
    ///
    /// Switching engines starts from that engine's defaults. Overrides that do
    /// not belong to the resulting engine are ignored.
    pub fn apply(&self, base: InpaintAlgorithm) -> Result<InpaintAlgorithm, InpaintError> {
        let base = match (self.engine, base) {
            (Some(EngineKind::Diffusion), InpaintAlgorithm::RegionFill(_)) => {
                InpaintAlgorithm::Diffusion(DiffusionOptions::default())
            }
            (Some(EngineKind::RegionFill), InpaintAlgorithm::Diffusion(_)) => {
                InpaintAlgorithm::RegionFill(RegionFillOptions::default())
            }
            _ => base,
        };

        let algorithm = match base {
            InpaintAlgorithm::Diffusion(mut options) => {
                if let Some(max_iterations) = self.max_iterations {
                    options.max_iterations = max_iterations;
                }
                if let Some(tolerance) = self.tolerance {
                    options.convergence_tolerance = tolerance;
                }
                InpaintAlgorithm::Diffusion(options)
            }
            InpaintAlgorithm::RegionFill(mut options) => {
                if let Some(max_iterations) = self.max_iterations {
                    options.max_iterations = max_iterations;
                }
                if let Some(threshold) = self.white_threshold {
                    options.white_threshold = threshold;
                }
                if let Some(connectivity) = self.connectivity {
                    options.connectivity = Connectivity::try_from(connectivity)?;
                }
                if self.no_fill_residual {
                    options.fill_residual = false;
                }
                InpaintAlgorithm::RegionFill(options)
            }
        };

        algorithm.validate()?;
        Ok(algorithm)
    }
}
