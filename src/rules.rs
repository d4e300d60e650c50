//! The rule table: an exact-match mapping from signals to actions.

use crate::types::{Action, Color, Signal, State};
use std::collections::{BTreeSet, HashMap};

/// An immutable-after-load mapping from `(state, color)` signals to actions.
///
/// Keys are unique. The parser rejects duplicate signals, so `insert` reports
/// a previous action instead of silently replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<Signal, Action>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, returning the action previously bound to `signal` if any.
    /// The table is left unchanged when the signal is already bound.
    pub fn insert(&mut self, signal: Signal, action: Action) -> Option<Action> {
        match self.rules.get(&signal) {
            Some(existing) => Some(*existing),
            None => {
                self.rules.insert(signal, action);
                None
            }
        }
    }

    /// Looks up the action for `signal`. `None` means no rule covers it.
    pub fn lookup(&self, signal: Signal) -> Option<Action> {
        self.rules.get(&signal).copied()
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.rules.contains_key(&signal)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over all rules in signal order.
    pub fn iter(&self) -> impl Iterator<Item = (Signal, Action)> + '_ {
        let mut signals: Vec<&Signal> = self.rules.keys().collect();
        signals.sort();
        signals.into_iter().map(|s| (*s, self.rules[s]))
    }

    /// Every state that appears in a rule, as a source or a target.
    pub fn states(&self) -> BTreeSet<State> {
        self.rules
            .iter()
            .flat_map(|(signal, action)| [signal.state, action.state])
            .collect()
    }

    /// Every color that appears in a rule, read or written.
    pub fn colors(&self) -> BTreeSet<Color> {
        self.rules
            .iter()
            .flat_map(|(signal, action)| [signal.color, action.color])
            .collect()
    }
}

impl FromIterator<(Signal, Action)> for RuleTable {
    /// Builds a table from rule pairs. Later duplicates are ignored.
    fn from_iter<I: IntoIterator<Item = (Signal, Action)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (signal, action) in iter {
            table.insert(signal, action);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;

    fn langtons_ant() -> RuleTable {
        [
            (Signal::new(0, 0), Action::new(0, 1, Turn::Right)),
            (Signal::new(0, 1), Action::new(0, 0, Turn::Left)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let table = langtons_ant();
        assert_eq!(
            table.lookup(Signal::new(0, 0)),
            Some(Action::new(0, 1, Turn::Right))
        );
        assert_eq!(table.lookup(Signal::new(0, 2)), None);
        assert_eq!(table.lookup(Signal::new(1, 0)), None);
    }

    #[test]
    fn test_insert_keeps_first_definition() {
        let mut table = langtons_ant();
        let previous = table.insert(Signal::new(0, 0), Action::new(1, 2, Turn::Left));
        assert_eq!(previous, Some(Action::new(0, 1, Turn::Right)));
        assert_eq!(
            table.lookup(Signal::new(0, 0)),
            Some(Action::new(0, 1, Turn::Right))
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_iter_is_sorted() {
        let table: RuleTable = [
            (Signal::new(1, 0), Action::new(0, 0, Turn::Forward)),
            (Signal::new(0, 1), Action::new(1, 0, Turn::Left)),
            (Signal::new(0, 0), Action::new(0, 1, Turn::Right)),
        ]
        .into_iter()
        .collect();

        let signals: Vec<Signal> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(
            signals,
            vec![Signal::new(0, 0), Signal::new(0, 1), Signal::new(1, 0)]
        );
    }

    #[test]
    fn test_states_and_colors() {
        let table: RuleTable = [
            (Signal::new(0, 0), Action::new(2, 4, Turn::Right)),
            (Signal::new(2, 4), Action::new(0, 0, Turn::Left)),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.states().into_iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table.colors().into_iter().collect::<Vec<_>>(), vec![0, 4]);
    }
}
