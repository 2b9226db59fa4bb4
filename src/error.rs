use std::fmt::{Display, Formatter};

/// Failures the pipeline can surface.
///
/// Per-request transport problems are absorbed close to where they happen
/// (the chart loop stops with partial pages, the tag lookup yields no tags);
/// only configuration and type-coercion failures are meant to reach `main`.
#[derive(Debug)]
pub enum Error {
    /// A required environment variable is missing or empty.
    Config(String),
    /// The provider answered with a non-success status.
    Request { code: u16, message: String },
    /// The request never produced a usable response.
    Transport(String),
    /// The payload did not match the expected shape.
    Parse(String),
    /// A chart field that must be numeric was not.
    TypeCoercion { field: &'static str, value: String },
    Io(std::io::Error),
}

impl Error {
    pub fn custom<S: Display>(message: S) -> Self {
        Self::Transport(message.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(var) => write!(f, "missing required environment variable `{var}`"),
            Self::Request { code, message } => write!(f, "lastfm request failed [{code}]: {message}"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Parse(message) => write!(f, "malformed response: {message}"),
            Self::TypeCoercion { field, value } => {
                write!(f, "non-numeric value {value:?} in `{field}` column")
            }
            Self::Io(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(error: serde_urlencoded::ser::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
