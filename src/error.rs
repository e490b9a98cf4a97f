use std::fmt;

/// Hard failures of an export build. Per-report fetch failures are not
/// represented here: they are recovered inside the document as an error
/// paragraph and never abort the build.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The batch summarization call failed. Summary exports abort whole;
    /// no partial document is saved.
    Summarization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {e}"),
            Error::Summarization(msg) => write!(f, "summarization failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Summarization(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
