//! This module provides the `ProgramLoader` struct, responsible for loading turmite
//! rule tables from files, strings and directories.

use crate::parser::parse;
use crate::rules::RuleTable;
use crate::types::{TurmiteError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of turmite programs.
pub const PROGRAM_EXTENSION: &str = "mite";

/// `ProgramLoader` is a utility struct for loading turmite programs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a rule table from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleTable)` if the file is read and parsed.
    /// * `Err(TurmiteError::FileError)` if the file cannot be read or is too large.
    /// * Any parser error if the content is not a valid program.
    pub fn load_program(path: &Path) -> Result<RuleTable, TurmiteError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TurmiteError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let table = Self::load_program_from_string(&content)?;
        debug!(path = %path.display(), rules = table.len(), "loaded turmite");

        Ok(table)
    }

    /// Loads a rule table from string content.
    pub fn load_program_from_string(content: &str) -> Result<RuleTable, TurmiteError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TurmiteError::FileError(format!(
                "Program is {} bytes, the limit is {}",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        parse(content)
    }

    /// Loads every `.mite` file in `directory`. Subdirectories and other files are skipped.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, RuleTable), TurmiteError>> {
        if !directory.exists() {
            return vec![Err(TurmiteError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TurmiteError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TurmiteError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(table) => Some(Ok((path, table))),
                    Err(e) => Some(Err(TurmiteError::FileError(format!(
                        "Failed to load program from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect();

        // read_dir order is platform dependent
        results.sort_by(|a, b| match (a, b) {
            (Ok((pa, _)), Ok((pb, _))) => pa.cmp(pb),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Signal;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "ant.mite", "a 0 -> a 1 r\na 1 -> a 0 l\n");

        let table = ProgramLoader::load_program(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains(Signal::new(0, 1)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let error = ProgramLoader::load_program(&dir.path().join("nope.mite")).unwrap_err();
        assert!(matches!(error, TurmiteError::FileError(_)));
        assert!(error.is_load_error());
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "bad.mite", "This is not a valid program");
        assert!(ProgramLoader::load_program(&path).is_err());
    }

    #[test]
    fn test_load_oversized_program() {
        let content = "# ".repeat(MAX_PROGRAM_SIZE);
        let error = ProgramLoader::load_program_from_string(&content).unwrap_err();
        assert!(matches!(error, TurmiteError::FileError(_)));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "valid.mite", "a 0 -> a 1 r\n");
        write_file(dir.path(), "invalid.mite", "a 0 -> a 1 up\n");
        write_file(dir.path(), "ignored.txt", "a 0 -> a 1 r\n");
        std::fs::create_dir(dir.path().join("nested.mite")).unwrap();

        let results = ProgramLoader::load_programs(dir.path());

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        let (path, _) = results[0].as_ref().unwrap();
        assert!(path.ends_with("valid.mite"));
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();
        let results = ProgramLoader::load_programs(&dir.path().join("absent"));
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
