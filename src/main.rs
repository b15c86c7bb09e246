//! termlife - CLI entry point.
//!
//! Conway's Game of Life on a wraparound grid, animated in the terminal.

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use termlife::render::{self, Screen};
use termlife::world::StepOutcome;
use termlife::{patterns, Config, World};

#[derive(Parser)]
#[command(name = "termlife")]
#[command(version)]
#[command(about = "Conway's Game of Life on a wraparound grid, animated in the terminal")]
struct Cli {
    /// Seed for the random fill
    #[arg(short, long)]
    seed: Option<u64>,

    /// Catalog shape to stamp instead of a random fill
    #[arg(short = 'S', long)]
    shape: Option<String>,

    /// Column of the shape's top-left corner
    #[arg(short = 'x', long, value_name = "COL")]
    shape_x_offset: Option<i64>,

    /// Row of the shape's top-left corner
    #[arg(short = 'y', long, value_name = "ROW")]
    shape_y_offset: Option<i64>,

    /// Grid width in cells (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Grid height in cells (defaults to the terminal height)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Ticks per second; 0 runs a single tick and exits
    #[arg(short, long)]
    tps: Option<u32>,

    /// Reseed and continue instead of halting on extinction or a loop
    #[arg(short, long)]
    infinite: bool,

    /// YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the shape catalog and exit
    #[arg(long)]
    list_shapes: bool,
}

impl Cli {
    /// Lay the command-line flags over a loaded or default configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(shape) = &self.shape {
            config.shape = Some(shape.clone());
        }
        if let Some(x) = self.shape_x_offset {
            config.shape_x_offset = x;
        }
        if let Some(y) = self.shape_y_offset {
            config.shape_y_offset = y;
        }
        if let Some(width) = self.width {
            config.width = Some(width);
        }
        if let Some(height) = self.height {
            config.height = Some(height);
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if self.infinite {
            config.infinite = true;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default to warn: stderr chatter would corrupt the raw-mode animation.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.list_shapes {
        for shape in patterns::SHAPES {
            println!("{:<12} {}x{}", shape.name, shape.width, shape.height);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);

    let (cols, rows) = crossterm::terminal::size()?;
    config.resolve_dimensions(cols, rows);
    config.validate()?;

    let mut world = World::new(&config)?;
    log::info!(
        "starting: {}x{} grid, {}, {} tps",
        world.grid().width(),
        world.grid().height(),
        world.seeding(),
        config.ticks_per_second
    );

    run(&mut world, config.ticks_per_second)
}

/// Drive the world until it halts: tick, poll for a quit key, draw, pace.
fn run(world: &mut World, tps: u32) -> Result<(), Box<dyn std::error::Error>> {
    let frame = (tps > 0).then(|| Duration::from_millis(1000 / u64::from(tps)));
    let mut screen = Screen::enter()?;

    loop {
        match world.step() {
            StepOutcome::Frame(report) => {
                if render::quit_pending()? {
                    world.halt_external();
                    screen.restore(true)?;
                    log::info!("stopped by user at tick {}", report.generation);
                    return Ok(());
                }
                screen.draw(world.grid(), report, world.seeding())?;

                let Some(frame) = frame else {
                    // Single-tick mode: leave the frame up and exit.
                    screen.restore(false)?;
                    return Ok(());
                };
                if render::pace_until(Instant::now() + frame)? {
                    world.halt_external();
                    screen.restore(true)?;
                    log::info!("stopped by user at tick {}", report.generation);
                    return Ok(());
                }
            }
            StepOutcome::Reseeded { .. } => {
                // Nothing to draw; the next step ticks the fresh fill.
            }
            StepOutcome::Halted { reason, report } => {
                screen.draw(world.grid(), report, world.seeding())?;
                screen.restore(false)?;
                println!("Game over - {}.", reason);
                return Ok(());
            }
        }
    }
}
