//! Command-line interface for generating and rendering a single image

use crate::algorithm::executor::{Artwork, Orchestrator, RunConfig};
use crate::algorithm::generator::GenerationConfig;
use crate::expression::parse_equation;
use crate::io::configuration::{
    DEFAULT_DEPTH, DEFAULT_ZOOM, EXTENT, MAX_ZOOM, MIN_RANDOM_DEPTH, RANDOM_ZOOM_CHANCE,
};
use crate::io::error::{BitartError, Result, invalid_parameter};
use crate::io::image::{export_png, render};
use crate::io::metadata::{Metadata, default_file_name, metadata_path};
use crate::io::palette::{ColorMode, Palette};
use crate::io::progress::AttemptProgress;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bitart")]
#[command(
    author,
    version,
    about = "Generate images from random bitwise arithmetic on pixel coordinates"
)]
/// Command-line arguments for the image generator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output filename; defaults to the base64-encoded equation text
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Equation depth
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Pick a random depth up to the given maximum
    #[arg(short, long)]
    pub max_depth: Option<usize>,

    /// Suppress the '<filename>.yaml' description file
    #[arg(short = 'i', long)]
    pub no_meta: bool,

    /// Execute COMMAND followed by the output filename on completion
    #[arg(short, long, value_name = "COMMAND")]
    pub run: Option<String>,

    /// Keep the first image, regardless of quality
    #[arg(short, long)]
    pub keep: bool,

    /// Quiet output
    #[arg(short, long)]
    pub quiet: bool,

    /// Zoom power; each cell becomes a 2^zoom pixel square
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_ZOOM)))]
    pub zoom: Option<u32>,

    /// Custom equation such as 'x ^ y', replacing the generator
    #[arg(short, long)]
    pub equation: Option<String>,

    /// Force a color mode
    #[arg(short, long, value_enum)]
    pub color: Option<ColorMode>,

    /// Random seed for reproducible images
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Check whether problematic images are discarded
    pub const fn reject_bad(&self) -> bool {
        !self.keep
    }

    /// Check if metadata should be written
    pub const fn write_metadata(&self) -> bool {
        !self.no_meta
    }
}

/// Runs one generate-render-save cycle for parsed arguments
pub struct Session {
    cli: Cli,
    seed: u64,
    rng: StdRng,
}

impl Session {
    /// Create a session, drawing a seed when none was given
    pub fn new(cli: Cli) -> Self {
        let seed = cli.seed.unwrap_or_else(rand::random::<u64>);
        Self {
            cli,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed driving every random choice of this session
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Requested depth, or a random one when a maximum was given
    ///
    /// A random depth is `max(2, uniform(0..=max_depth - 2))`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the maximum depth is below 2
    pub fn resolve_depth(&mut self) -> Result<usize> {
        match self.cli.max_depth {
            None => Ok(self.cli.depth),
            Some(max_depth) if max_depth < MIN_RANDOM_DEPTH => Err(invalid_parameter(
                "max_depth",
                &max_depth,
                &format!("must be at least {MIN_RANDOM_DEPTH}"),
            )),
            Some(max_depth) => {
                let drawn = self.rng.random_range(0..=max_depth - MIN_RANDOM_DEPTH);
                Ok(drawn.max(MIN_RANDOM_DEPTH))
            }
        }
    }

    /// Requested zoom, otherwise occasionally random and usually the default
    pub fn resolve_zoom(&mut self) -> u32 {
        self.cli.zoom.unwrap_or_else(|| {
            if self.rng.random::<f64>() < RANDOM_ZOOM_CHANCE {
                self.rng.random_range(0..=MAX_ZOOM)
            } else {
                DEFAULT_ZOOM
            }
        })
    }

    /// Orchestrator configuration for a depth and zoom
    pub fn run_config(&self, depth: usize, zoom: u32) -> RunConfig {
        let extent = EXTENT >> zoom;
        RunConfig::default()
            .with_generation(GenerationConfig::default().with_depth(depth))
            .with_size(extent, extent)
            .with_reject_bad(self.cli.reject_bad())
            .with_color_override(self.cli.color)
    }

    /// Generate or parse, render, save, describe and optionally hand off the image
    ///
    /// Returns the path of the written image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An argument is out of range or the equation cannot be parsed
    /// - No acceptable image is found within the attempt budget
    /// - The image or metadata cannot be written
    /// - The post-render command fails
    pub fn process(&mut self) -> Result<PathBuf> {
        info!(seed = self.seed, "Starting");

        let depth = self.resolve_depth()?;
        if self.cli.max_depth.is_some() {
            info!(depth, "Random depth");
        }

        let zoom = self.resolve_zoom();
        let config = self.run_config(depth, zoom);
        info!(zoom, extent = config.width, "Zoom");

        let mut orchestrator = Orchestrator::with_rng(config, StdRng::from_rng(&mut self.rng))?;

        let (artwork, described_depth) = match self.cli.equation.as_deref() {
            Some(text) => {
                let expression = parse_equation(text)?;
                info!("Custom equation: {expression}");
                let custom_depth = expression.depth();
                (orchestrator.render_custom(expression), custom_depth)
            }
            None => {
                let progress = AttemptProgress::new(config.attempts, self.cli.quiet);
                let outcome = orchestrator.run_with(|number, attempt| {
                    let verdict = attempt
                        .problem
                        .map_or_else(|| "Accepted".to_string(), |problem| problem.to_string());
                    progress.update(number, &verdict);
                });
                let recorded = progress.finish();
                info!(attempts = recorded, "Search finished");
                (outcome.into_artwork()?, depth)
            }
        };

        info!("Function: f(x,y) := {}", artwork.expression);

        let path = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_file_name(&artwork.expression.to_string())));

        save(&artwork, &path, zoom)?;

        let metadata = Metadata::new(&artwork, described_depth, zoom)?;
        let yaml = metadata.to_yaml()?;
        info!("Metadata:");
        for line in yaml.lines() {
            info!("  {line}");
        }

        if self.cli.write_metadata() {
            let metadata_file = metadata_path(&path);
            info!("Writing info file {}...", metadata_file.display());
            metadata.write(&metadata_file)?;
        }

        if let Some(command) = self.cli.run.as_deref() {
            run_command(command, &path)?;
        }

        Ok(path)
    }
}

fn save(artwork: &Artwork, path: &Path, zoom: u32) -> Result<()> {
    info!("Saving to {}...", path.display());
    let palette = Palette::new(artwork.color_mode, &artwork.analysis);
    let image = render(&artwork.grid, &palette, 1 << zoom);
    export_png(&image, path)
}

/// Run `command` with the image path appended as the final argument
///
/// The command line is split on whitespace; no shell is involved.
///
/// # Errors
///
/// Returns `Command` when the command is empty, cannot be started, or exits unsuccessfully
pub fn run_command(command: &str, path: &Path) -> Result<()> {
    let failure = |reason: String| BitartError::Command {
        command: command.to_string(),
        reason,
    };

    let mut words = command.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| failure("empty command".to_string()))?;

    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| failure(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(failure(format!("exited with {status}")))
    }
}
