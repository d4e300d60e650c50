//! This module provides functions for analyzing rule tables before a run. `analyze`
//! rejects tables that cannot be rendered; `lint` reports tables that are likely to
//! get stuck, without blocking them, since a missing rule is only fatal when reached.

use crate::palette::Palette;
use crate::rules::RuleTable;
use crate::types::{state_letter, Color, Signal, State, TurmiteError};
use std::collections::{BTreeSet, HashSet};

/// Represents the problems that can be found while analyzing a rule table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The table has no rules at all.
    EmptyProgram,
    /// Colors used by rules that the palette cannot draw.
    ColorsOutsidePalette(Vec<Color>),
    /// No rule for the very first step, `(a, 0)`.
    MissingInitialSignal,
    /// States entered by some rule that have no rules of their own.
    DeadEndStates(Vec<State>),
    /// Colors written by some rule that no rule ever reads.
    UnreadColors(Vec<Color>),
    /// States with rules that can never be entered from state `a`.
    UnreachableStates(Vec<State>),
}

fn letters(states: &[State]) -> String {
    states
        .iter()
        .map(|&s| state_letter(s).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::EmptyProgram => write!(f, "Program defines no rules"),
            AnalysisError::ColorsOutsidePalette(colors) => {
                write!(f, "Colors not in the palette: {:?}", colors)
            }
            AnalysisError::MissingInitialSignal => {
                write!(f, "No rule for the initial signal (a, 0)")
            }
            AnalysisError::DeadEndStates(states) => {
                write!(f, "States entered but never defined: {}", letters(states))
            }
            AnalysisError::UnreadColors(colors) => {
                write!(f, "Colors written but never read: {:?}", colors)
            }
            AnalysisError::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {}", letters(states))
            }
        }
    }
}

impl From<AnalysisError> for TurmiteError {
    /// Converts an `AnalysisError` into a `TurmiteError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        TurmiteError::ValidationError(error.to_string())
    }
}

/// Checks that `table` can be run and rendered with `palette`.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TurmiteError::ValidationError)` for the first failing check.
pub fn analyze(table: &RuleTable, palette: &Palette) -> Result<(), TurmiteError> {
    check_not_empty(table)?;
    check_palette(table, palette)?;
    Ok(())
}

/// Reports every warning-level finding for `table`, in a stable order.
pub fn lint(table: &RuleTable) -> Vec<AnalysisError> {
    [
        check_initial_signal,
        check_dead_end_states,
        check_unread_colors,
        check_unreachable_states,
    ]
    .iter()
    .filter_map(|f| f(table).err())
    .collect()
}

fn check_not_empty(table: &RuleTable) -> Result<(), AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyProgram);
    }
    Ok(())
}

/// Every color a rule reads or writes must have a palette entry, otherwise
/// the final grid cannot be drawn.
fn check_palette(table: &RuleTable, palette: &Palette) -> Result<(), AnalysisError> {
    let outside: Vec<Color> = table
        .colors()
        .into_iter()
        .filter(|&c| !palette.contains(c))
        .collect();

    if !outside.is_empty() {
        return Err(AnalysisError::ColorsOutsidePalette(outside));
    }
    Ok(())
}

fn check_initial_signal(table: &RuleTable) -> Result<(), AnalysisError> {
    if !table.contains(Signal::new(0, 0)) {
        return Err(AnalysisError::MissingInitialSignal);
    }
    Ok(())
}

fn check_dead_end_states(table: &RuleTable) -> Result<(), AnalysisError> {
    let defined: HashSet<State> = table.iter().map(|(signal, _)| signal.state).collect();
    let dead: BTreeSet<State> = table
        .iter()
        .map(|(_, action)| action.state)
        .filter(|s| !defined.contains(s))
        .collect();

    if !dead.is_empty() {
        return Err(AnalysisError::DeadEndStates(dead.into_iter().collect()));
    }
    Ok(())
}

fn check_unread_colors(table: &RuleTable) -> Result<(), AnalysisError> {
    let read: HashSet<Color> = table.iter().map(|(signal, _)| signal.color).collect();
    let unread: BTreeSet<Color> = table
        .iter()
        .map(|(_, action)| action.color)
        .filter(|c| !read.contains(c))
        .collect();

    if !unread.is_empty() {
        return Err(AnalysisError::UnreadColors(unread.into_iter().collect()));
    }
    Ok(())
}

/// Walks the state graph from state `a`, following every rule's target state.
fn check_unreachable_states(table: &RuleTable) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![0];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (signal, action) in table.iter() {
            if signal.state == state && !visited.contains(&action.state) {
                queue.push(action.state);
            }
        }
    }

    let unreachable: BTreeSet<State> = table
        .iter()
        .map(|(signal, _)| signal.state)
        .filter(|s| !visited.contains(s))
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(
            unreachable.into_iter().collect(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_langtons_ant_is_clean() {
        let table = parse("a 0 -> a 1 r\na 1 -> a 0 l").unwrap();
        assert!(analyze(&table, &Palette::default()).is_ok());
        assert!(lint(&table).is_empty());
    }

    #[test]
    fn test_empty_program() {
        let table = parse("# nothing here").unwrap();
        let error = analyze(&table, &Palette::default()).unwrap_err();
        assert_eq!(
            error,
            TurmiteError::ValidationError("Program defines no rules".to_string())
        );
    }

    #[test]
    fn test_colors_outside_palette() {
        let table = parse("a 0 -> a 7 r\na 7 -> a 0 l\na 9 -> a 0 l").unwrap();
        assert_eq!(
            check_palette(&table, &Palette::default()),
            Err(AnalysisError::ColorsOutsidePalette(vec![7, 9]))
        );
        assert!(analyze(&table, &Palette::default())
            .unwrap_err()
            .to_string()
            .contains("[7, 9]"));
    }

    #[test]
    fn test_missing_initial_signal() {
        let table = parse("a 1 -> a 0 l").unwrap();
        assert!(lint(&table).contains(&AnalysisError::MissingInitialSignal));
    }

    #[test]
    fn test_dead_end_states() {
        let table = parse("a 0 -> b 1 r\na 1 -> c 0 l").unwrap();
        assert_eq!(
            check_dead_end_states(&table),
            Err(AnalysisError::DeadEndStates(vec![1, 2]))
        );
        assert_eq!(
            AnalysisError::DeadEndStates(vec![1, 2]).to_string(),
            "States entered but never defined: b, c"
        );
    }

    #[test]
    fn test_unread_colors() {
        let table = parse("a 0 -> a 1 r\na 1 -> a 2 l").unwrap();
        assert_eq!(
            check_unread_colors(&table),
            Err(AnalysisError::UnreadColors(vec![2]))
        );
    }

    #[test]
    fn test_unreachable_states() {
        let table = parse("a 0 -> a 1 r\na 1 -> a 0 l\nc 0 -> d 1 r\nd 0 -> c 0 l").unwrap();
        assert_eq!(
            check_unreachable_states(&table),
            Err(AnalysisError::UnreachableStates(vec![2, 3]))
        );
    }

    #[test]
    fn test_lint_order() {
        let table = parse("a 1 -> b 3 r").unwrap();
        let warnings = lint(&table);
        assert_eq!(
            warnings,
            vec![
                AnalysisError::MissingInitialSignal,
                AnalysisError::DeadEndStates(vec![1]),
                AnalysisError::UnreadColors(vec![3]),
            ]
        );
    }
}
