use crate::rules::RuleTable;
use crate::types::TurmiteError;

// Default embedded programs
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    ("Langton's Ant", include_str!("../demos/langtons-ant.mite")),
    ("RLR", include_str!("../demos/rlr.mite")),
    ("LLRR", include_str!("../demos/llrr.mite")),
    ("Two-State", include_str!("../demos/two-state.mite")),
];

/// A built-in program: its display name and parsed rules.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: &'static str,
    pub rules: RuleTable,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, text)| match crate::parser::parse(text) {
            Ok(rules) => Some(Program { name, rules }),
            Err(e) => {
                tracing::warn!(program = name, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TurmiteError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TurmiteError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<Program, TurmiteError> {
        PROGRAMS
            .iter()
            .find(|program| program.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| TurmiteError::ValidationError(format!("Program '{}' not found", name)))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TurmiteError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name,
            state_count: program.rules.states().len(),
            rule_count: program.rules.len(),
            colors: program.rules.colors().len(),
        })
    }

    /// Get the source text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TurmiteError> {
        PROGRAM_TEXTS
            .get(index)
            .map(|(_, text)| *text)
            .ok_or_else(|| {
                TurmiteError::ValidationError(format!(
                    "Program text index {} out of range",
                    index
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: &'static str,
    pub state_count: usize,
    pub rule_count: usize,
    pub colors: usize,
}
