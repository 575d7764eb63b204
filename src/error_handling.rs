use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// Where in a grammar blob something went wrong. Lines are 1-based, 0 means
// "the blob as a whole"
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location {
            file: None,
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.file, self.line) {
            (Some(file), 0) => write!(f, "{}", file.display()),
            (Some(file), line) => write!(f, "{}:{}", file.display(), line),
            (None, 0) => write!(f, "input"),
            (None, line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn at_line(line: usize, error: T) -> Self {
        Error {
            location: Location::line(line),
            error
        }
    }

    // Attach the file the blob was read from
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.location.file = Some(file.into());
        self
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;
