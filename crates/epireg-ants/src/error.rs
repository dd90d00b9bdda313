use std::path::PathBuf;

/// An error type for building and running ANTs commands.
#[derive(thiserror::Error, Debug)]
pub enum AntsError {
    /// Error when a required input path is empty.
    #[error("Input path for the {0} image is empty")]
    EmptyPath(&'static str),

    /// Error when the multi-resolution schedule levels do not agree.
    #[error("Schedule levels do not match: {iterations} iterations, {sigmas} smoothing sigmas, {shrink} shrink factors")]
    ScheduleMismatch {
        /// Number of iteration levels.
        iterations: usize,
        /// Number of smoothing sigma levels.
        sigmas: usize,
        /// Number of shrink factor levels.
        shrink: usize,
    },

    /// Error when a schedule has no levels at all.
    #[error("Schedule must contain at least one resolution level")]
    EmptySchedule,

    /// Error when the B-spline order is outside of 2..=5.
    #[error("Invalid B-spline order: {0}. Expected a value between 2 and 5")]
    InvalidSplineOrder(u8),

    /// Error when a registration has no stages.
    #[error("Registration requires at least one stage")]
    NoStages,

    /// Error when the external program could not be started.
    #[error("Failed to launch {program}. {source}")]
    SpawnFailed {
        /// Program that failed to launch.
        program: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// Error when an external step exits with a failure status.
    #[error("Error in {command} (exit code {code})")]
    CommandFailed {
        /// Rendered command line of the failing step.
        command: String,
        /// Exit code as a shell would report it.
        code: i32,
    },

    /// Error to manipulate files or directories.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to serialize an invocation.
    #[error("Failed to serialize the invocation. {0}")]
    SerializeError(#[from] serde_json::Error),
}
