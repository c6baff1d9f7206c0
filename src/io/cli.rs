//! Command-line driver: load rules, generate a grid, write the result

use crate::algorithm::executor::{SolverState, WaveCollapse};
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{Configuration, DEFAULT_DEPTH, default_output_path};
use crate::io::error::Result;
use crate::io::output::GeneratedOutput;
use crate::io::prefill::PrefillData;
use crate::io::progress::ProgressManager;
use crate::spatial::dimensions::Dimensions;
use crate::spatial::grid::Grid;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile grids from adjacency rules with wave function collapse"
)]
/// Command-line arguments for the grid generation tool
pub struct Cli {
    /// JSON file with the tile types and their adjacency rules
    #[arg(value_name = "CONFIGURATION")]
    pub configuration: PathBuf,

    /// Grid width
    #[arg(short = 'w', long)]
    pub width: usize,

    /// Grid height
    #[arg(short = 'H', long)]
    pub height: usize,

    /// Grid depth (number of independent layers)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Random seed for reproducible generation (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output JSON path (defaults to <CONFIGURATION stem>_result.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file restricting the starting tile types of some positions
    #[arg(short, long)]
    pub prefill: Option<PathBuf>,

    /// Give up after this many collapse iterations
    #[arg(short = 'i', long)]
    pub max_iterations: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log generation details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Requested grid extents
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }

    /// Where the generated grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.configuration))
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}

/// Runs one generation request described by the command line
pub struct GenerationRunner {
    cli: Cli,
}

impl GenerationRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, generate and write the grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration or prefill file cannot be read or is invalid
    /// - The dimensions are unusable
    /// - The run contradicts or exceeds the iteration budget
    /// - The output cannot be written
    pub fn process(&self) -> Result<GeneratedOutput> {
        let catalog = Configuration::from_path(&self.cli.configuration)?.into_catalog()?;
        let dimensions = self.cli.dimensions();

        let grid = match &self.cli.prefill {
            Some(path) => {
                let prefill = PrefillData::from_path(path, &catalog, dimensions)?;
                log::info!("Applying {} prefilled positions", prefill.len());
                prefill.build_grid(&catalog, dimensions)?
            }
            None => Grid::new(&catalog, dimensions)?,
        };
        let cell_count = grid.cell_count();

        let selector = self
            .cli
            .seed
            .map_or_else(RandomSelector::unseeded, RandomSelector::new);
        log::info!(
            "Generating {dimensions} grid from {} tile types with seed {}",
            catalog.len(),
            selector.seed()
        );

        let mut executor = WaveCollapse::new(grid, selector)?;
        let mut progress = if self.cli.should_show_progress() {
            ProgressManager::new(cell_count, &self.label())
        } else {
            ProgressManager::hidden(cell_count)
        };

        let outcome = executor.run_observed(self.cli.max_iterations, |grid| {
            progress.update(resolved_cells(grid));
        });
        let status = match &outcome {
            Ok(()) => "done",
            Err(error) if error.is_contradiction() => "contradiction",
            Err(_) => "stopped",
        };
        progress.finish(resolved_cells(executor.grid()), status);

        if let SolverState::Contradicted(contradiction) = executor.state() {
            log::warn!(
                "Seed {} contradicts at {}; another seed may succeed",
                executor.seed(),
                contradiction.position
            );
        }
        outcome?;

        let output = executor.output()?;
        let output_path = self.cli.output_path();
        output.write_to(&output_path)?;
        log::info!("Wrote {}", output_path.display());

        Ok(output)
    }

    fn label(&self) -> String {
        self.cli
            .configuration
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

fn resolved_cells(grid: &Grid<'_>) -> usize {
    grid.cell_count() - grid.unresolved_count()
}
