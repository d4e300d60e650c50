//! This crate provides the core logic for a turmite simulator.
//! It includes modules for parsing turmite rule tables, stepping the automaton over a
//! fixed-size grid, analyzing rule tables, and rendering the final grid as an image.

pub mod analyzer;
pub mod config;
pub mod encoder;
pub mod grid;
pub mod loader;
pub mod machine;
pub mod palette;
pub mod parser;
pub mod programs;
pub mod render;
pub mod rules;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the analysis entry points from the analyzer module.
pub use analyzer::{analyze, lint, AnalysisError};
/// Re-exports the run settings.
pub use config::RunConfig;
/// Re-exports the encoding function from the encoder module.
pub use encoder::encode;
/// Re-exports the `Grid` struct from the grid module.
pub use grid::Grid;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `Turmite` engine and its run summary from the machine module.
pub use machine::{RunSummary, Turmite};
/// Re-exports the `Palette` struct from the palette module.
pub use palette::Palette;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `Program`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the rendering functions from the render module.
pub use render::{export_png, render};
/// Re-exports the `RuleTable` struct from the rules module.
pub use rules::RuleTable;
/// Re-exports the core value types and error type from the types module.
pub use types::{
    Action, Color, Heading, Signal, State, Turn, TurmiteError, DEFAULT_GRID_SIZE, DEFAULT_SCALE,
    DEFAULT_STEPS, MAX_PROGRAM_SIZE,
};
