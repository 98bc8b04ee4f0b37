use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error returned by a [`crate::ingestion::TableReader`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// The source sheet has no data rows (or no header row at all).
    #[error("the report contains no data rows")]
    Empty,

    /// A required column is absent from the header row.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// The workbook could not be opened or parsed.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "csv")]
    /// The CSV payload could not be parsed (feature-gated behind `csv`).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Error returned by a [`crate::export::TableWriter`].
#[derive(Debug, Error)]
pub enum WriteError {
    /// Workbook serialization failed (invalid sheet name, oversized cell, ...).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "csv")]
    /// CSV serialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error while flushing an in-memory buffer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by [`crate::export::ArchiveBuilder`].
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The zip writer rejected an entry or failed to finish.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Underlying I/O error while writing entry data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source table has zero data rows.
    Empty,
    /// Required grouping column absent from the header.
    MissingColumn,
    /// Zero rows passed the status filter.
    NoMatches,
    /// A group's rows could not be serialized.
    Write,
    /// The archive could not be assembled.
    Archive,
    /// Anything else, carrying the underlying message.
    Unknown,
}

/// Error type returned by [`crate::pipeline::Pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the source table failed.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// No row matched the status filter.
    #[error("no rows where '{column}' is '{wanted}'")]
    NoMatches { column: String, wanted: String },

    /// Serializing one group's table failed.
    #[error("failed to write group '{group}': {source}")]
    Write {
        group: String,
        #[source]
        source: WriteError,
    },

    /// Building the archive failed.
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Any other failure surfaced during processing.
    #[error("processing error: {message}")]
    Unknown { message: String },
}

impl PipelineError {
    /// Classify this error into one of the terminal [`ErrorKind`]s.
    ///
    /// Unparseable payloads are not one of the named input problems, so they classify as
    /// [`ErrorKind::Unknown`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Read(ReadError::Empty) => ErrorKind::Empty,
            PipelineError::Read(ReadError::MissingColumn(_)) => ErrorKind::MissingColumn,
            PipelineError::Read(_) => ErrorKind::Unknown,
            PipelineError::NoMatches { .. } => ErrorKind::NoMatches,
            PipelineError::Write { .. } => ErrorKind::Write,
            PipelineError::Archive(_) => ErrorKind::Archive,
            PipelineError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Human-readable message suitable for showing to the person who supplied the file.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Read(ReadError::Empty) => "The file is empty.".to_string(),
            PipelineError::Read(ReadError::MissingColumn(column)) => {
                format!("The file has no '{column}' column.")
            }
            PipelineError::NoMatches { column, wanted } => {
                format!("No rows have {column} = {wanted}.")
            }
            PipelineError::Write { group, source } => {
                format!("Could not create the table for '{group}': {source}")
            }
            PipelineError::Archive(e) => format!("Could not create the archive: {e}"),
            PipelineError::Read(e) => format!("Error while processing the file: {e}"),
            PipelineError::Unknown { message } => format!("Error while processing the file: {message}"),
        }
    }
}
