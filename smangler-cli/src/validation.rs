use std::path::{Path, PathBuf};

use smangler::{CopyOp, DeleteOp, Matcher};

use crate::error::CliError;

/// Validation context for the copy and delete commands.
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub directories: Vec<String>,
    pub pattern: Option<String>,
    /// Whether a non-empty pattern must be given.
    pub pattern_required: bool,
    /// Whether the directories must all be different.
    pub distinct_directories: bool,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, dir: impl Into<String>) -> Self {
        self.directories.push(dir.into());
        self
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn require_pattern(mut self) -> Self {
        self.pattern_required = true;
        self
    }

    pub fn require_distinct_directories(mut self) -> Self {
        self.distinct_directories = true;
        self
    }
}

/// Validate that `path` exists and is a directory.
pub fn validate_directory(path: &str) -> Result<PathBuf, CliError> {
    let path_obj = Path::new(path);
    if !path_obj.is_dir() {
        return Err(CliError::MissingDirectory(path.to_string()));
    }
    Ok(path_obj.to_path_buf())
}

/// Validate that two directories do not resolve to the same place.
pub fn validate_distinct(first: &Path, second: &Path) -> Result<(), CliError> {
    let same = match (first.canonicalize(), second.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => first == second,
    };
    if same {
        return Err(CliError::SameDirectory);
    }
    Ok(())
}

/// Compile the name pattern.
pub fn validate_pattern(pattern: Option<&str>, required: bool) -> Result<Matcher, CliError> {
    if required && pattern.is_none_or(str::is_empty) {
        return Err(CliError::InvalidPattern(
            "a non-empty pattern is required".to_string(),
        ));
    }
    Matcher::new(pattern).map_err(|e| CliError::InvalidPattern(e.to_string()))
}

/// Validate a complete validation context, returning the checked directories
/// and the compiled pattern.
pub fn validate_context(context: &ValidationContext) -> Result<(Vec<PathBuf>, Matcher), CliError> {
    let directories = context
        .directories
        .iter()
        .map(|dir| validate_directory(dir))
        .collect::<Result<Vec<_>, _>>()?;

    if context.distinct_directories {
        for (i, first) in directories.iter().enumerate() {
            for second in &directories[i + 1..] {
                validate_distinct(first, second)?;
            }
        }
    }

    let matcher = validate_pattern(context.pattern.as_deref(), context.pattern_required)?;
    Ok((directories, matcher))
}

/// Check the arguments of `copy` and build the operation.
pub fn validate_copy(
    source: &str,
    destination: &str,
    pattern: Option<String>,
) -> Result<CopyOp, CliError> {
    let context = ValidationContext::new()
        .with_directory(source)
        .with_directory(destination)
        .with_pattern(pattern)
        .require_distinct_directories();
    let (directories, matcher) = validate_context(&context)?;

    match directories.as_slice() {
        [source, destination] => Ok(CopyOp::new(source, destination, matcher)),
        _ => Err(CliError::Arguments(
            "copy needs a source and a destination directory".to_string(),
        )),
    }
}

/// Check the arguments of `delete` and build the operation.
pub fn validate_delete(directory: &str, pattern: String) -> Result<DeleteOp, CliError> {
    let context = ValidationContext::new()
        .with_directory(directory)
        .with_pattern(Some(pattern))
        .require_pattern();
    let (directories, matcher) = validate_context(&context)?;

    let [directory] = directories.as_slice() else {
        return Err(CliError::Arguments(
            "delete needs exactly one resource directory".to_string(),
        ));
    };
    Ok(DeleteOp::new(directory, matcher)?)
}
