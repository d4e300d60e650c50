//! This module defines the `Turmite` struct, the automaton engine. It owns the
//! automaton's position, heading and internal state, and advances them one step at a
//! time against a grid owned by the caller.

use crate::grid::Grid;
use crate::rules::RuleTable;
use crate::types::{state_letter, Heading, Signal, State, TurmiteError};
use serde::Serialize;
use std::sync::Arc;
use tracing::trace;

/// A turmite walking a grid.
///
/// The rule table is shared read-only. The grid is never owned: every `step`
/// borrows it mutably from the driver.
#[derive(Debug, Clone)]
pub struct Turmite {
    rules: Arc<RuleTable>,
    origin: (usize, usize),
    x: usize,
    y: usize,
    heading: Heading,
    state: State,
    step_count: usize,
}

/// Where a run ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Steps completed successfully.
    pub steps: usize,
    /// Final `(x, y)` cell.
    pub position: (usize, usize),
    pub heading: Heading,
    /// Current state as its letter.
    pub state: char,
}

impl Turmite {
    /// Creates a turmite at the center of `grid`, facing North, in state `a`.
    pub fn new(rules: Arc<RuleTable>, grid: &Grid) -> Self {
        let origin = grid.center();
        Self {
            rules,
            origin,
            x: origin.0,
            y: origin.1,
            heading: Heading::North,
            state: 0,
            step_count: 0,
        }
    }

    /// Executes a single step against `grid`.
    ///
    /// Reads the current cell, looks up the rule for `(state, color)`, writes the
    /// rule's color, switches state, rotates and moves one cell.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the step completed.
    /// * `Err(TurmiteError::NoRuleForSignal)` if no rule matches; nothing is mutated.
    /// * `Err(TurmiteError::OutOfBounds)` if the move would leave the grid. The write,
    ///   state change and rotation of this step have already been applied.
    pub fn step(&mut self, grid: &mut Grid) -> Result<(), TurmiteError> {
        let step = self.step_count;

        let color = grid
            .get(self.x, self.y)
            .map_err(|_| self.out_of_bounds(self.x as i64, self.y as i64))?;

        let signal = Signal::new(self.state, color);
        let action = self
            .rules
            .lookup(signal)
            .ok_or(TurmiteError::NoRuleForSignal { signal, step })?;

        grid.set(self.x, self.y, action.color)
            .map_err(|_| self.out_of_bounds(self.x as i64, self.y as i64))?;
        self.state = action.state;
        self.heading = self.heading.rotate(action.turn);

        let (dx, dy) = self.heading.delta();
        let (nx, ny) = (self.x as i64 + dx, self.y as i64 + dy);
        if !grid.contains(nx, ny) {
            return Err(self.out_of_bounds(nx, ny));
        }

        trace!(
            step,
            %signal,
            heading = %self.heading,
            x = nx,
            y = ny,
            "turmite stepped"
        );

        self.x = nx as usize;
        self.y = ny as usize;
        self.step_count += 1;

        Ok(())
    }

    /// Runs `steps` steps, stopping at the first failure.
    pub fn run(&mut self, grid: &mut Grid, steps: usize) -> Result<RunSummary, TurmiteError> {
        for _ in 0..steps {
            self.step(grid)?;
        }

        Ok(self.summary())
    }

    /// Resets the turmite to its initial configuration. The grid is left alone.
    pub fn reset(&mut self) {
        (self.x, self.y) = self.origin;
        self.heading = Heading::North;
        self.state = 0;
        self.step_count = 0;
    }

    /// Current `(x, y)` position.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the total number of steps completed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// A snapshot of the turmite's current configuration.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.step_count,
            position: (self.x, self.y),
            heading: self.heading,
            state: state_letter(self.state),
        }
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> TurmiteError {
        TurmiteError::OutOfBounds {
            x,
            y,
            step: self.step_count,
        }
    }
}
