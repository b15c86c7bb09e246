//! # termlife
//!
//! Conway's Game of Life on a fixed-size toroidal grid, built for terminal
//! animation.
//!
//! ## Features
//!
//! - **Toroidal**: edges wrap, so every cell has exactly eight neighbors
//! - **Reproducible**: random fills use a ChaCha8 generator seeded from an
//!   integer, bit-identical across runs and platforms
//! - **Loop-aware**: a bounded history of recent generations detects
//!   extinction and short-period cycles and ends the run (or reseeds it)
//! - **Configurable**: YAML configuration files with CLI flag overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use termlife::{Config, World};
//!
//! let config = Config {
//!     width: Some(20),
//!     height: Some(20),
//!     seed: Some(42),
//!     ..Config::default()
//! };
//! let mut world = World::new(&config).unwrap();
//!
//! // Advance up to 100 generations; stops early on extinction or a loop.
//! world.run(100);
//! println!("Tick {}: {} live cells", world.generation(), world.live_cells());
//! ```
//!
//! ## Stamping a shape
//!
//! ```rust
//! use termlife::{Config, World};
//!
//! let config = Config {
//!     width: Some(40),
//!     height: Some(20),
//!     shape: Some("glider".to_string()),
//!     ..Config::default()
//! };
//! let world = World::new(&config).unwrap();
//! assert_eq!(world.live_cells(), 5);
//! ```

pub mod config;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod render;
pub mod world;

// Re-export main types
pub use config::Config;
pub use grid::Grid;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
