use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Configuration problems reported before any solving is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("square size must be non-negative, got {0}")]
    InvalidSize(i64),
    #[error("unknown method: {0:?} (expected \"simple\" or \"advanced\")")]
    UnknownMethod(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config: {inner}\n{backtrace}")]
    Config {
        inner: Box<ConfigError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<ConfigError> for Error {
    fn from(inner: ConfigError) -> Self {
        Error::Config {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
