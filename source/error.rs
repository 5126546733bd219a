use std::{error, fmt, io, num::ParseIntError, path::PathBuf};

/// Closed set of failure kinds a feature processor can report while being
/// built from training configuration. `process_sentence`/`process_entities`
/// never produce one of these: malformed input at inference time yields no
/// features rather than an error (see `Pipeline::process_sentence`).
#[derive(Debug)]
pub enum Error {
  ConfigArity {
    processor: String,
    expected: &'static str,
    got: usize,
  },
  BadInteger {
    processor: String,
    argument: String,
    source: ParseIntError,
  },
  FileOpen {
    path: PathBuf,
    source: io::Error,
  },
  FileFormat {
    path: PathBuf,
    line: usize,
    message: String,
  },
  DuplicateKey {
    path: PathBuf,
    line: usize,
    key: String,
  },
  UnknownEntityType {
    name: String,
  },
  UnknownProcessorName {
    name: String,
  },
  WindowConstraint {
    processor: String,
    message: String,
  },
  // The binary decoder's own contract: a short read during `load`.
  Truncated {
    context: &'static str,
  },
}

impl fmt::Display for Error {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::ConfigArity {
        processor,
        expected,
        got,
      } => write!(
        formatter,
        "{processor}: expected {expected} argument(s), got {got}"
      ),
      Error::BadInteger {
        processor,
        argument,
        source,
      } => write!(
        formatter,
        "{processor}: {argument:?} is not a valid integer ({source})"
      ),
      Error::FileOpen { path, source } => write!(formatter, "couldn't open {path:?}: {source}"),
      Error::FileFormat {
        path,
        line,
        message,
      } => write!(formatter, "{path:?}:{line}: {message}"),
      Error::DuplicateKey { path, line, key } => {
        write!(formatter, "{path:?}:{line}: duplicate entry {key:?}")
      }
      Error::UnknownEntityType { name } => write!(formatter, "unknown entity type {name:?}"),
      Error::UnknownProcessorName { name } => write!(formatter, "unknown processor name {name:?}"),
      Error::WindowConstraint { processor, message } => {
        write!(formatter, "{processor}: {message}")
      }
      Error::Truncated { context } => write!(formatter, "truncated model data ({context})"),
    }
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Error::BadInteger { source, .. } => Some(source),
      Error::FileOpen { source, .. } => Some(source),
      _ => None,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
