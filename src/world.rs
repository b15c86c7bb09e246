//! Run controller: seeding, tick orchestration and termination policy.

use crate::config::Config;
use crate::grid::Grid;
use crate::history::HistoryTracker;
use crate::patterns::{self, Shape};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// What drives the current grid contents: a stamped shape or a random fill.
#[derive(Debug, Clone, Copy)]
pub enum Seeding {
    Shape {
        shape: &'static Shape,
        x_offset: i64,
        y_offset: i64,
    },
    Random {
        seed: u64,
    },
}

impl fmt::Display for Seeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { shape, .. } => write!(f, "Shape: {}", shape.name),
            Self::Random { seed } => write!(f, "Seed: {}", seed),
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every cell died.
    Extinct,
    /// The grid matched the state from `age` ticks ago.
    Loop { age: usize },
    /// The caller asked for a stop (quit key, closed input).
    External,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extinct => write!(f, "all dead"),
            Self::Loop { age } => write!(f, "stuck in a loop (same as {} ticks ago)", age),
            Self::External => write!(f, "stopped"),
        }
    }
}

/// Snapshot of a completed generation, for rendering and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub generation: u64,
    pub live_cells: usize,
}

/// Result of advancing the world by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The generation advanced with no termination condition; render it.
    Frame(TickReport),
    /// A termination condition fired in infinite mode and the grid was
    /// refilled from a fresh seed. The fill itself is not rendered; the
    /// next step ticks it.
    Reseeded { seed: u64 },
    /// The run is over. Repeated steps return the same outcome.
    Halted {
        reason: StopReason,
        report: TickReport,
    },
}

/// Fatal setup errors; the run never starts.
#[derive(Debug)]
pub enum WorldError {
    UnknownShape(String),
    InvalidDimensions { width: usize, height: usize },
    ShapeOutOfBounds { shape: &'static str, x_offset: i64, y_offset: i64 },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownShape(name) => {
                write!(
                    f,
                    "Unknown shape '{}' (available: {})",
                    name,
                    patterns::names().join(", ")
                )
            }
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid grid dimensions {}x{}: both sides must be greater than 1",
                    width, height
                )
            }
            Self::ShapeOutOfBounds { shape, x_offset, y_offset } => {
                write!(
                    f,
                    "Shape '{}' does not fit inside the grid at offset ({}, {})",
                    shape, x_offset, y_offset
                )
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// The simulation: grid, recent history and the run state machine.
pub struct World {
    grid: Grid,
    history: HistoryTracker,
    seeding: Seeding,
    infinite: bool,
    generation: u64,
    live: usize,
    halted: Option<StopReason>,
}

impl World {
    /// Seed a new world from the given configuration.
    ///
    /// A shape name stamps the catalog bitmap onto an all-dead grid; a
    /// numeric seed drives the random fill; with neither, a seed is derived
    /// from the wall clock. If both are given the seed wins, matching the
    /// original behavior of a fill overwriting the stamp (`Config::validate`
    /// rejects the combination up front).
    pub fn new(config: &Config) -> Result<Self, WorldError> {
        let width = config.width.unwrap_or(0);
        let height = config.height.unwrap_or(0);
        if width <= 1 || height <= 1 {
            return Err(WorldError::InvalidDimensions { width, height });
        }

        let seeding = match (config.shape.as_deref(), config.seed) {
            (_, Some(seed)) => Seeding::Random { seed },
            (Some(name), None) => {
                let shape = patterns::lookup(name)
                    .ok_or_else(|| WorldError::UnknownShape(name.to_string()))?;
                if !shape.fits(width, height, config.shape_x_offset, config.shape_y_offset) {
                    return Err(WorldError::ShapeOutOfBounds {
                        shape: shape.name,
                        x_offset: config.shape_x_offset,
                        y_offset: config.shape_y_offset,
                    });
                }
                Seeding::Shape {
                    shape,
                    x_offset: config.shape_x_offset,
                    y_offset: config.shape_y_offset,
                }
            }
            (None, None) => Seeding::Random { seed: time_seed() },
        };

        let mut grid = Grid::new(width, height);
        let live = match seeding {
            Seeding::Shape { shape, x_offset, y_offset } => {
                patterns::stamp(&mut grid, shape, x_offset, y_offset)
            }
            Seeding::Random { seed } => grid.fill_random(seed),
        };

        Ok(Self {
            grid,
            history: HistoryTracker::new(),
            seeding,
            infinite: config.infinite,
            generation: 0,
            live,
            halted: None,
        })
    }

    /// Advance one generation and classify the result.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.halted {
            return StepOutcome::Halted { reason, report: self.report() };
        }

        self.live = self.grid.tick();
        self.generation += 1;

        let reason = if self.live == 0 {
            Some(StopReason::Extinct)
        } else {
            self.history
                .observe(self.grid.cells())
                .map(|age| StopReason::Loop { age })
        };

        match reason {
            None => StepOutcome::Frame(self.report()),
            Some(reason) if self.infinite => {
                let seed = self.reseed();
                log::info!("{}; reseeding with seed {}", reason, seed);
                StepOutcome::Reseeded { seed }
            }
            Some(reason) => {
                self.halted = Some(reason);
                StepOutcome::Halted { reason, report: self.report() }
            }
        }
    }

    /// Advance up to `max_ticks` generations, stopping early on a halt.
    /// Returns the stop reason if the run halted within the budget.
    pub fn run(&mut self, max_ticks: u64) -> Option<StopReason> {
        for _ in 0..max_ticks {
            if let StepOutcome::Halted { reason, .. } = self.step() {
                return Some(reason);
            }
        }
        None
    }

    /// Force a halt from outside the simulation (quit key, closed input).
    /// A reason already set by a natural halt is kept.
    pub fn halt_external(&mut self) -> StopReason {
        *self.halted.get_or_insert(StopReason::External)
    }

    fn reseed(&mut self) -> u64 {
        let seed = match self.seeding {
            Seeding::Random { seed } => seed.wrapping_add(1),
            // A shape-seeded run has no previous seed; restart the sequence.
            Seeding::Shape { .. } => 0,
        };
        self.seeding = Seeding::Random { seed };
        self.live = self.grid.fill_random(seed);
        self.generation = 0;
        self.history.clear();
        seed
    }

    fn report(&self) -> TickReport {
        TickReport {
            generation: self.generation,
            live_cells: self.live,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Completed ticks since the last (re)seed.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Live cells in the current generation.
    #[inline]
    pub fn live_cells(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn seeding(&self) -> &Seeding {
        &self.seeding
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
