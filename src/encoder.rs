//! This module provides encoding functionality for converting a rule table back into
//! canonical `.mite` source text: one rule per line, sorted by signal, turns spelled out.

use crate::rules::RuleTable;
use crate::types::state_letter;

/// Encodes a rule table as source text that `parse` reads back to an equal table.
///
/// Format per line: `<state> <color> -> <state> <color> <turn>`.
pub fn encode(table: &RuleTable) -> String {
    table
        .iter()
        .map(|(signal, action)| {
            format!(
                "{} {} -> {} {} {}\n",
                state_letter(signal.state),
                signal.color,
                state_letter(action.state),
                action.color,
                action.turn.word()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_encode_canonical_form() {
        let table = parse("# comment\nb 0 -> a 1 L\n\na 0 -> b 2 r\n").unwrap();
        assert_eq!(encode(&table), "a 0 -> b 2 right\nb 0 -> a 1 left\n");
    }

    #[test]
    fn test_encode_parses_back() {
        let source = "a 0 -> b 1 forward\na 1 -> a 0 back\nb 0 -> c 3 l\nb 1 -> a 5 r\nc 0 -> a 0 f\n";
        let table = parse(source).unwrap();
        assert_eq!(parse(&encode(&table)).unwrap(), table);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&RuleTable::new()), "");
    }
}
