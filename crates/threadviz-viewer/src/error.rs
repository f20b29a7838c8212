use thiserror::Error;

/// Terminal failure of one visualization request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThreadError {
    #[error("invalid post URL or ID: {0:?}")]
    MalformedInput(String),
    #[error("{0}")]
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("nothing to track: input is empty")]
    Empty,
    #[error("{0} is already being tracked")]
    AlreadyTracked(String),
}
