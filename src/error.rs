use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimingsError>;

#[derive(Error, Debug)]
pub enum TimingsError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A column was referenced by name but the table has no such header.
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("invalid {field} {value:?} on line {line}")]
    InvalidField {
        field: &'static str,
        value: String,
        line: u64,
    },

    #[error("no passengers found in {0}")]
    NoPassengers(PathBuf),

    #[error("could not encode the png: {0}")]
    Png(#[from] png::EncodingError),

    #[error("could not draw the chart: {0}")]
    Plot(String),
}

impl TimingsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TimingsError::Io {
            path: path.into(),
            source,
        }
    }

    /// The kind of the underlying I/O error, if any.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            TimingsError::Io { source, .. } => Some(source.kind()),
            TimingsError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(io) => Some(io.kind()),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for TimingsError
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        TimingsError::Plot(e.to_string())
    }
}
