use crate::{
    algorithm::propagation::{
        Contradiction, PropagationOutcome, check_initial_consistency, constrained_cells, propagate,
    },
    algorithm::selection::RandomSelector,
    io::error::{AlgorithmError, Result, internal_error},
    io::output::GeneratedOutput,
    spatial::grid::Grid,
};

/// Where a run stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// More cells remain to collapse
    Running,
    /// Every cell holds exactly one tile type
    Complete,
    /// Some cell has no legal tile type left; terminal
    Contradicted(Contradiction),
}

/// Wave function collapse executor
///
/// Owns the grid and the random source of one generation run. Every
/// iteration collapses the most constrained cell to a weighted-random tile
/// type and propagates the consequences until the grid is complete or a
/// contradiction is found. There is no backtracking; a contradicted run is
/// finished and the caller may start over with another seed.
pub struct WaveCollapse<'c> {
    grid: Grid<'c>,
    random_selector: RandomSelector,
    state: SolverState,
    iteration: usize,
}

impl<'c> WaveCollapse<'c> {
    /// Create an executor and settle the constraints the grid starts with
    ///
    /// Pre-resolved and pre-narrowed cells are propagated before the first
    /// iteration. This consumes no randomness and is not counted as an
    /// iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial propagation hits an internal invariant
    /// violation. An unsatisfiable starting grid is not an error; it yields
    /// the `Contradicted` state.
    pub fn new(mut grid: Grid<'c>, random_selector: RandomSelector) -> Result<Self> {
        let state = if let Some(contradiction) = check_initial_consistency(&grid)? {
            SolverState::Contradicted(contradiction)
        } else {
            let origins = constrained_cells(&grid);
            match propagate(&mut grid, &origins)? {
                PropagationOutcome::Contradicted(contradiction) => {
                    SolverState::Contradicted(contradiction)
                }
                PropagationOutcome::Settled(stats) => {
                    log::debug!(
                        "Initial propagation from {} cells narrowed {} cells",
                        origins.len(),
                        stats.narrowed
                    );
                    if grid.is_complete() {
                        SolverState::Complete
                    } else {
                        SolverState::Running
                    }
                }
            }
        };

        if let SolverState::Contradicted(contradiction) = state {
            log::warn!(
                "Grid is unsatisfiable before the first collapse at {}",
                contradiction.position
            );
        }

        Ok(Self {
            grid,
            random_selector,
            state,
            iteration: 0,
        })
    }

    /// Create an executor with a deterministic seed
    ///
    /// # Errors
    ///
    /// See [`WaveCollapse::new`]
    pub fn with_seed(grid: Grid<'c>, seed: u64) -> Result<Self> {
        Self::new(grid, RandomSelector::new(seed))
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid<'c> {
        &self.grid
    }

    /// Current state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Number of collapse cycles run so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Seed of the random source
    pub const fn seed(&self) -> u64 {
        self.random_selector.seed()
    }

    /// Whether another iteration would do work
    pub const fn is_running(&self) -> bool {
        matches!(self.state, SolverState::Running)
    }

    /// Run one collapse and propagate cycle
    ///
    /// Returns whether the run should continue.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid or catalog report an internal invariant
    /// violation. Contradictions are reported through [`SolverState`].
    pub fn run_iteration(&mut self) -> Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        self.iteration += 1;

        let cell = self.grid.most_constrained_cell(&mut self.random_selector)?;
        let Some(current) = self.grid.cell(cell) else {
            return Err(internal_error(
                "run_iteration",
                &format!("selected cell {cell} is outside the grid"),
            ));
        };

        // An empty cell must never reach the weighted pick
        let candidates = current.possible().to_vec();
        if candidates.is_empty() {
            self.state = SolverState::Contradicted(Contradiction {
                cell,
                position: current.position(),
                neighbor: None,
            });
            return Ok(false);
        }

        let catalog = self.grid.catalog();
        let chosen = catalog.weighted_pick(&candidates, &mut self.random_selector)?;
        log::trace!(
            "Iteration {}: {} -> '{}' from {} candidates",
            self.iteration,
            current.position(),
            catalog.id_of(chosen).unwrap_or("?"),
            candidates.len()
        );
        self.grid.collapse(cell, chosen)?;

        match propagate(&mut self.grid, &[cell])? {
            PropagationOutcome::Contradicted(contradiction) => {
                log::warn!(
                    "Contradiction at {} after {} iterations",
                    contradiction.position,
                    self.iteration
                );
                self.state = SolverState::Contradicted(contradiction);
                Ok(false)
            }
            PropagationOutcome::Settled(_) if self.grid.is_complete() => {
                log::info!(
                    "Generated {} grid in {} iterations",
                    self.grid.dimensions(),
                    self.iteration
                );
                self.state = SolverState::Complete;
                Ok(false)
            }
            PropagationOutcome::Settled(_) => Ok(true),
        }
    }

    /// Iterate until the run completes or contradicts
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if the run ends contradicted, or any error
    /// raised by an iteration.
    pub fn run(&mut self) -> Result<()> {
        self.run_observed(None, |_| {})
    }

    /// Iterate at most `budget` times
    ///
    /// # Errors
    ///
    /// Returns `IterationBudgetExceeded` if the grid is still running after
    /// `budget` iterations, and `Contradiction` if the run contradicts.
    pub fn run_with_budget(&mut self, budget: usize) -> Result<()> {
        self.run_observed(Some(budget), |_| {})
    }

    /// Iterate until the run finishes, handing the grid to `observer` after
    /// every iteration
    ///
    /// # Errors
    ///
    /// Returns `IterationBudgetExceeded` if a budget is given and the grid is
    /// still running once it is spent, `Contradiction` if the run contradicts,
    /// or any error raised by an iteration.
    pub fn run_observed(
        &mut self,
        budget: Option<usize>,
        mut observer: impl FnMut(&Grid<'c>),
    ) -> Result<()> {
        while self.is_running() {
            if let Some(limit) = budget
                && self.iteration >= limit
            {
                return Err(AlgorithmError::IterationBudgetExceeded { budget: limit });
            }
            self.run_iteration()?;
            observer(&self.grid);
        }
        self.finished()
    }

    /// Output document of a completed run
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` for a contradicted run and
    /// `InternalInvariant` while the run is still going.
    pub fn output(&self) -> Result<GeneratedOutput> {
        self.finished()?;
        GeneratedOutput::from_grid(&self.grid)
    }

    fn finished(&self) -> Result<()> {
        match self.state {
            SolverState::Complete => Ok(()),
            SolverState::Contradicted(contradiction) => {
                Err(contradiction.into_error(self.iteration))
            }
            SolverState::Running => Err(internal_error("output", &"generation has not finished")),
        }
    }
}
