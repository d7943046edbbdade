use thiserror::Error;

/// Domain-specific errors for the timetable generator.
///
/// Infeasibility is not an error: the engine answers it with an empty
/// schedule and logs. These variants cover the loader and CLI boundary.
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Unknown program '{0}' (expected CS or IT)")]
    UnknownProgram(String),

    // Data validation errors
    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("Room inventory is empty")]
    NoRooms,

    // Solver errors (programmer errors only; never raised for infeasibility)
    #[error("MIP solver failed: {0}")]
    SolverFailed(String),
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
