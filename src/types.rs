//! This module defines the core data structures and types used throughout the turmite
//! simulator: colors and states, headings and turns, rule signals and actions, and the
//! error taxonomy shared by the parser, the engine and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// A color identifier. Indexes the renderer's palette.
pub type Color = u8;

/// An internal automaton state, derived from a lowercase letter (`'a'` is 0).
pub type State = u8;

/// The maximum allowed size for a turmite program in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default edge length of the square grid.
pub const DEFAULT_GRID_SIZE: usize = 100;
/// The default number of steps to simulate.
pub const DEFAULT_STEPS: usize = 100_000;
/// The default number of pixels per grid cell when rendering.
pub const DEFAULT_SCALE: u32 = 5;
/// The number of distinct internal states (`a` through `z`).
pub const MAX_STATES: usize = 26;

/// Converts a state letter into its numeric state.
///
/// Only lowercase ASCII letters are valid states.
pub fn state_from_letter(letter: char) -> Option<State> {
    letter
        .is_ascii_lowercase()
        .then(|| letter as u8 - b'a')
}

/// Converts a numeric state back into its letter.
pub fn state_letter(state: State) -> char {
    (b'a' + state % MAX_STATES as u8) as char
}

/// A turn offset, relative to the current heading.
///
/// The discriminants are the number of clockwise quarter-turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Turn {
    Forward = 0,
    Right = 1,
    Backward = 2,
    Left = 3,
}

impl Turn {
    /// All turns in quarter-turn order.
    pub const ALL: [Turn; 4] = [Turn::Forward, Turn::Right, Turn::Backward, Turn::Left];

    /// Parses a turn word as it appears in rule sources.
    ///
    /// Accepts `forward`/`f`, `backward`/`back`, `left`/`l` and `right`/`r`, ignoring case.
    pub fn from_word(word: &str) -> Option<Turn> {
        match word.to_ascii_lowercase().as_str() {
            "forward" | "f" => Some(Turn::Forward),
            "backward" | "back" => Some(Turn::Backward),
            "left" | "l" => Some(Turn::Left),
            "right" | "r" => Some(Turn::Right),
            _ => None,
        }
    }

    /// The canonical word for this turn.
    pub fn word(self) -> &'static str {
        match self {
            Turn::Forward => "forward",
            Turn::Right => "right",
            Turn::Backward => "backward",
            Turn::Left => "left",
        }
    }

    /// Number of clockwise quarter-turns.
    pub fn quarter_turns(self) -> usize {
        self as usize
    }
}

/// An absolute compass heading on a screen-coordinate grid (y grows southward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    /// All headings in clockwise order starting from North.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Returns the heading for a quarter-turn index, normalised into `[0, 4)`.
    pub fn from_index(index: usize) -> Heading {
        Self::ALL[index % 4]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Applies a relative turn: `(heading + turn) mod 4`.
    pub fn rotate(self, turn: Turn) -> Heading {
        Self::from_index(self.index() + turn.quarter_turns())
    }

    /// The unit movement vector `(dx, dy)` for this heading.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The lookup key of a rule: the automaton's state and the color under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signal {
    pub state: State,
    pub color: Color,
}

impl Signal {
    pub fn new(state: State, color: Color) -> Self {
        Self { state, color }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", state_letter(self.state), self.color)
    }
}

/// What a rule does: the next state, the color to write and the turn to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub state: State,
    pub color: Color,
    pub turn: Turn,
}

impl Action {
    pub fn new(state: State, color: Color, turn: Turn) -> Self {
        Self { state, color, turn }
    }
}

/// Represents various errors that can occur while loading, simulating or rendering a turmite.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurmiteError {
    /// A rule line does not match the grammar.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A rule uses a turn word that is not recognised.
    #[error("Unknown turn '{word}' on line {line}")]
    UnknownTurn { word: String, line: usize },
    /// A state token is not a lowercase letter.
    #[error("Invalid state '{letter}' on line {line}")]
    InvalidState { letter: String, line: usize },
    /// A color literal does not fit a color identifier.
    #[error("Invalid color '{value}' on line {line}")]
    InvalidColor { value: String, line: usize },
    /// Two rules share the same signal.
    #[error("Duplicate rule for signal {signal} on line {line} (first defined on line {first_line})")]
    DuplicateRule {
        signal: Signal,
        line: usize,
        first_line: usize,
    },
    /// The rule table has no entry for the automaton's current signal.
    #[error("No rule for signal {signal} at step {step}")]
    NoRuleForSignal { signal: Signal, step: usize },
    /// The automaton tried to move off the grid.
    #[error("Turmite left the grid at ({x}, {y}) on step {step}")]
    OutOfBounds { x: i64, y: i64, step: usize },
    /// Indicates an error during the validation of a program or run configuration.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error turning a grid into an image.
    #[error("Render error: {0}")]
    RenderError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

impl TurmiteError {
    /// Whether the error aborts before any simulation starts.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            TurmiteError::ParseError(_)
                | TurmiteError::UnknownTurn { .. }
                | TurmiteError::InvalidState { .. }
                | TurmiteError::InvalidColor { .. }
                | TurmiteError::DuplicateRule { .. }
                | TurmiteError::ValidationError(_)
                | TurmiteError::FileError(_)
        )
    }
}
