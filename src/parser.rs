//! This module provides the parser for turmite programs, utilizing the `pest` crate.
//! It defines the grammar for `.mite` files and functions to parse the input into a `RuleTable`.

use crate::{
    rules::RuleTable,
    types::{state_from_letter, Action, Color, Signal, State, Turn, TurmiteError},
};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use std::collections::HashMap;

/// Derives a `PestParser` for the turmite grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TurmiteParser;

/// Parses the given input string into a `RuleTable`.
///
/// Each non-empty, non-comment line must have the form
/// `<state> <color> -> <state> <color> <turn>`. Every failure names the
/// offending line.
///
/// # Returns
///
/// * `Ok(RuleTable)` if every line is a well-formed rule.
/// * `Err(TurmiteError::ParseError)` if a line does not match the grammar.
/// * `Err(TurmiteError::UnknownTurn)`, `InvalidState` or `InvalidColor` for bad tokens.
/// * `Err(TurmiteError::DuplicateRule)` if two lines share a signal.
pub fn parse(input: &str) -> Result<RuleTable, TurmiteError> {
    let root = TurmiteParser::parse(Rule::program, input)
        .map_err(|e| TurmiteError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TurmiteError::ValidationError("Empty parse tree".to_string()))?;

    parse_program(root)
}

/// Collects every transition of a `Rule::program` pair into a table.
fn parse_program(pair: Pair<Rule>) -> Result<RuleTable, TurmiteError> {
    let mut table = RuleTable::new();
    let mut lines: HashMap<Signal, usize> = HashMap::new();

    for p in pair.into_inner() {
        if p.as_rule() != Rule::transition {
            continue;
        }

        let line = line_of(&p);
        let (signal, action) = parse_transition(p)?;

        // Prevent duplicated rules
        if let Some(&first_line) = lines.get(&signal) {
            return Err(TurmiteError::DuplicateRule {
                signal,
                line,
                first_line,
            });
        }

        lines.insert(signal, line);
        table.insert(signal, action);
    }

    Ok(table)
}

/// Parses `state color -> state color turn`.
fn parse_transition(pair: Pair<Rule>) -> Result<(Signal, Action), TurmiteError> {
    let mut pairs = pair.into_inner();
    let mut next = || {
        pairs
            .next()
            .ok_or_else(|| TurmiteError::ValidationError("Incomplete transition".to_string()))
    };

    let state_in = parse_state(next()?)?;
    let color_in = parse_color(next()?)?;
    let state_out = parse_state(next()?)?;
    let color_out = parse_color(next()?)?;
    let turn = parse_turn(next()?)?;

    Ok((
        Signal::new(state_in, color_in),
        Action::new(state_out, color_out, turn),
    ))
}

/// A state is a single lowercase letter.
fn parse_state(pair: Pair<Rule>) -> Result<State, TurmiteError> {
    let text = pair.as_str();
    let mut chars = text.chars();

    match (chars.next().and_then(state_from_letter), chars.next()) {
        (Some(state), None) => Ok(state),
        _ => Err(TurmiteError::InvalidState {
            letter: text.to_string(),
            line: line_of(&pair),
        }),
    }
}

fn parse_color(pair: Pair<Rule>) -> Result<Color, TurmiteError> {
    pair.as_str()
        .parse::<Color>()
        .map_err(|_| TurmiteError::InvalidColor {
            value: pair.as_str().to_string(),
            line: line_of(&pair),
        })
}

fn parse_turn(pair: Pair<Rule>) -> Result<Turn, TurmiteError> {
    Turn::from_word(pair.as_str()).ok_or_else(|| TurmiteError::UnknownTurn {
        word: pair.as_str().to_string(),
        line: line_of(&pair),
    })
}

/// 1-based source line of a pair.
fn line_of(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}
