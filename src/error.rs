use thiserror::Error;

/// Errors surfaced by the core walkers and checks.
///
/// The crate never swallows these: every operation either returns its result
/// or fails with one of the conditions below, and the caller decides how to
/// turn a failure into a reported test result.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document contains a reference cycle and flattening would
    /// never terminate.
    #[error("input document contains a reference cycle")]
    CyclicStructure,

    /// A path/key combination matched zero values. Reported as a failed
    /// check, not a crash.
    #[error("no values found at path '{path}' with key '{key}'")]
    EmptyPath { path: String, key: String },

    /// Uniqueness violated. Both counts are kept for diagnostics.
    #[error(
        "values at path '{path}' with key '{key}' are not unique: {total} values, {unique} unique"
    )]
    DuplicateValues {
        path: String,
        key: String,
        total: usize,
        unique: usize,
    },

    #[error("path must contain at least one segment")]
    EmptyPathSpec,

    #[error("path segment {index} is blank")]
    BlankSegment { index: usize },

    #[error("terminal key must not be blank")]
    BlankKey,

    #[error("field '{field}' does not exist in the document")]
    MissingField { field: String },

    #[error("field '{field}' is empty or not a valid sequence")]
    NotASequence { field: String },

    #[error("key '{key}' does not exist in objects inside '{field}'")]
    MissingKey { key: String, field: String },

    #[error("limit must be 1 or greater, got {given}")]
    InvalidLimit { given: i64 },

    #[error("response time measurement is not available")]
    MissingElapsed,

    #[error("cannot rotate through an empty value list")]
    EmptyCycle,

    #[error("failed to parse body as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
