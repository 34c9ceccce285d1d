use std::{error, fmt};

/// Broad failure categories a caller may want to match on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad stream handle, chunk size, or delimiter.
    InvalidArgument,
    /// Memory for the line or the carry-over could not be obtained.
    Allocation,
    /// The underlying read(2) reported a failure (not EOF).
    Read,
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error>>,
}

impl Error {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            message: message.into(),
            source: None,
        }
    }

    pub fn allocation<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::Allocation,
            message: message.into(),
            source: None,
        }
    }

    pub fn read<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::Read,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E: error::Error + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
