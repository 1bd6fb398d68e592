#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// A malformed report request, detected before any repository access.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("unknown report type: {0}")]
    UnknownReportType(String),
    #[error("unknown export format: {0}")]
    UnknownExportFormat(String),
    #[error("an exercise id or an exercise name is required")]
    MissingExercise,
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl From<StorageError> for ReportError {
    fn from(value: StorageError) -> Self {
        ReportError::Read(ReadError::Storage(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_from_storage_error() {
        assert!(matches!(
            ReportError::from(StorageError::NoConnection),
            ReportError::Read(ReadError::Storage(StorageError::NoConnection))
        ));
    }

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::UnknownReportType("bogus".to_string()).to_string(),
            "unknown report type: bogus"
        );
        assert_eq!(
            RequestError::MissingExercise.to_string(),
            "an exercise id or an exercise name is required"
        );
    }
}
